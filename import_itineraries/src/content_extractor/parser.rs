use std::vec::IntoIter;

use entities::trip::{ActiveView, ItemId, ItineraryItem, TripDate, TripDay};
use itertools::Itertools;
use lazy_static::lazy_static;
use multipeek::{multipeek, MultiPeek};
use regex::{Regex, RegexBuilder};

use crate::content_extractor::categorize::categorize;
use crate::content_extractor::scanner::Token;
use crate::content_extractor::time_of_day;

const UNKNOWN_LOCATION: &str = "TBD";
const FALLBACK_REGION: &str = "Imported itinerary";
const TITLE_CHAR_LIMIT: usize = 140;
const SUMMARY_ITEM_LIMIT: usize = 3;

pub(crate) const NO_DATED_BLOCKS_WARNING: &str =
    "No dated itinerary blocks could be detected from the uploaded text.";

lazy_static! {
    static ref SEPARATORS: Regex = Regex::new(r"[\s\-/,]+").expect("SEPARATORS regex to compile");
    static ref UPPERCASE_RUN: Regex =
        Regex::new(r"[A-Z]{3,}").expect("UPPERCASE_RUN regex to compile");
    static ref BULLET_ONLY: Regex = Regex::new(r"^(-|•|\*)$").expect("BULLET_ONLY regex to compile");
    static ref LEADING_BULLET: Regex =
        Regex::new(r"^[-•*]\s*").expect("LEADING_BULLET regex to compile");
    static ref LEADING_TIME_RANGE: Regex = Regex::new(r"^\d{1,2}:\d{2}\s*[–-]\s*\d{1,2}:\d{2}\s*")
        .expect("LEADING_TIME_RANGE regex to compile");
    static ref LEADING_TIME: Regex = RegexBuilder::new(r"^\d{1,2}:\d{2}(?:\s*[ap]m)?\s*")
        .case_insensitive(true)
        .build()
        .expect("LEADING_TIME regex to compile");
}

pub struct ParsedDays {
    pub days: Vec<TripDay>,
    pub warnings: Vec<String>,
}

/// One day block being accumulated: the recognized date, an opportunistically
/// captured location label, and the event lines seen so far.
struct DayBlock {
    date: TripDate,
    location: Option<String>,
    event_lines: Vec<String>,
}

/// Walks the token stream in order, flushing a completed day whenever a new
/// date header starts the next one. Total: unparseable streams produce zero
/// days and a warning, never an error.
pub struct Parser {
    tokens: MultiPeek<IntoIter<Token>>,
    active: Option<DayBlock>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: multipeek(tokens.into_iter()),
            active: None,
        }
    }

    pub fn parse(mut self) -> ParsedDays {
        let mut days = Vec::new();

        while let Some(token) = self.tokens.next() {
            match token {
                Token::DateHeader {
                    date: Some(date), ..
                } => self.start_day(date, &mut days),
                Token::Weekday { line } => self.weekday_line(line, &mut days),
                Token::DateHeader { date: None, line }
                | Token::MonthDay { line, .. }
                | Token::Text { line } => self.body_line(line),
            }
        }
        self.flush(&mut days);

        let mut warnings = Vec::new();
        if days.is_empty() {
            warnings.push(NO_DATED_BLOCKS_WARNING.to_owned());
        }

        ParsedDays { days, warnings }
    }

    /// The two-line date form: a weekday alone consumes a following
    /// month-day token, even when that token's month is unknown.
    fn weekday_line(&mut self, line: String, days: &mut Vec<TripDay>) {
        if !matches!(self.tokens.peek(), Some(Token::MonthDay { .. })) {
            self.body_line(line);
            return;
        }
        match self.tokens.next() {
            Some(Token::MonthDay {
                date: Some(date), ..
            }) => self.start_day(date, days),
            _ => self.body_line(line),
        }
    }

    fn start_day(&mut self, date: TripDate, days: &mut Vec<TripDay>) {
        self.flush(days);
        self.active = Some(DayBlock {
            date,
            location: None,
            event_lines: Vec::new(),
        });
    }

    /// Lines before the first date header are discarded. While a day has no
    /// location yet, a line with a run of 3+ uppercase letters (separators
    /// removed) becomes its location label instead of an event.
    fn body_line(&mut self, line: String) {
        let Some(block) = self.active.as_mut() else {
            return;
        };
        if block.location.is_none() && looks_like_location(&line) {
            block.location = Some(line);
            return;
        }
        block.event_lines.push(line);
    }

    fn flush(&mut self, days: &mut Vec<TripDay>) {
        if let Some(day) = self.active.take().and_then(build_day) {
            days.push(day);
        }
    }
}

fn looks_like_location(line: &str) -> bool {
    let condensed = SEPARATORS.replace_all(line, "");
    UPPERCASE_RUN.is_match(&condensed)
}

/// Builds the day from its accumulated lines, or discards the block when
/// nothing but blanks and bare bullets accumulated.
fn build_day(block: DayBlock) -> Option<TripDay> {
    let cleaned = block
        .event_lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !BULLET_ONLY.is_match(line))
        .collect_vec();
    if cleaned.is_empty() {
        return None;
    }

    let location = block.location.as_deref();
    let detail_items = cleaned
        .iter()
        .enumerate()
        .map(|(index, line)| build_item(&block.date, line, location, index + 1))
        .collect_vec();
    let summary_items = detail_items
        .iter()
        .take(SUMMARY_ITEM_LIMIT)
        .enumerate()
        .map(|(index, item)| ItineraryItem {
            id: ItemId::from(format!("{}-summary-{}", block.date, index + 1)),
            ..item.clone()
        })
        .collect_vec();

    Some(TripDay {
        date: block.date,
        region: location.unwrap_or(FALLBACK_REGION).to_owned(),
        summary_items,
        detail_items,
        active_view: ActiveView::Detail,
    })
}

fn build_item(date: &TripDate, line: &str, location: Option<&str>, index: usize) -> ItineraryItem {
    let without_bullet = LEADING_BULLET.replace(line, "");
    let without_range = LEADING_TIME_RANGE.replace(&without_bullet, "");
    let stripped = LEADING_TIME.replace(&without_range, "");
    let stripped = stripped.trim();

    let title_source = if stripped.is_empty() { line } else { stripped };
    let title = title_source.chars().take(TITLE_CHAR_LIMIT).collect::<String>();
    let time = time_of_day::recognize(line);
    let category = categorize(&format!("{title} {line}"));

    ItineraryItem {
        id: ItemId::from(format!("{date}-detail-{index}")),
        title,
        start_time: time.start,
        end_time: time.end,
        location: location.unwrap_or(UNKNOWN_LOCATION).to_owned(),
        notes: line.to_owned(),
        category,
        lat: None,
        lng: None,
    }
}
