use std::collections::HashMap;

use entities::trip::TripDate;
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

const WEEKDAYS: &str = "mon|monday|tue|tues|tuesday|wed|weds|wednesday|thu|thurs|thursday|fri|friday|sat|saturday|sun|sunday";

lazy_static! {
    static ref TABS_AND_RETURNS: Regex =
        Regex::new(r"[\t\r]+").expect("TABS_AND_RETURNS regex to compile");
    static ref WHITESPACE_RUN: Regex =
        Regex::new(r"\s+").expect("WHITESPACE_RUN regex to compile");
    static ref DATE_LINE: Regex =
        RegexBuilder::new(&format!(r"^(?:{WEEKDAYS})\s+([a-z]+)\s+(\d{{1,2}})$"))
            .case_insensitive(true)
            .build()
            .expect("DATE_LINE regex to compile");
    static ref WEEKDAY_LINE: Regex = RegexBuilder::new(&format!(r"^(?:{WEEKDAYS})$"))
        .case_insensitive(true)
        .build()
        .expect("WEEKDAY_LINE regex to compile");
    static ref MONTH_DAY_LINE: Regex = RegexBuilder::new(r"^([a-z]+)\s+(\d{1,2})$")
        .case_insensitive(true)
        .build()
        .expect("MONTH_DAY_LINE regex to compile");
    static ref MONTHS: HashMap<&'static str, &'static str> = HashMap::from([
        ("jan", "01"),
        ("feb", "02"),
        ("mar", "03"),
        ("apr", "04"),
        ("may", "05"),
        ("jun", "06"),
        ("jul", "07"),
        ("aug", "08"),
        ("sep", "09"),
        ("oct", "10"),
        ("nov", "11"),
        ("dec", "12"),
    ]);
}

/// One normalized document line, classified by shape. Every variant keeps the
/// line text so the parser can demote it to plain body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `Wed Feb 12` — weekday, month word and day on a single line. `date` is
    /// `None` when the month word is not in the month table.
    DateHeader {
        date: Option<TripDate>,
        line: String,
    },
    /// A weekday name alone; the parser peeks at the next token for the
    /// two-line date form.
    Weekday { line: String },
    /// `Feb 12` — the second half of a two-line date header.
    MonthDay {
        date: Option<TripDate>,
        line: String,
    },
    Text { line: String },
}

impl Token {
    pub fn into_line(self) -> String {
        match self {
            Token::DateHeader { line, .. }
            | Token::Weekday { line }
            | Token::MonthDay { line, .. }
            | Token::Text { line } => line,
        }
    }
}

/// Splits raw document text into trimmed, whitespace-collapsed lines (blank
/// lines dropped, order preserved) and classifies each one.
pub fn scan(text: &str, default_year: i32) -> Vec<Token> {
    normalized_lines(text)
        .into_iter()
        .map(|line| classify_line(line, default_year))
        .collect_vec()
}

fn normalized_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(normalize_line)
        .filter(|line| !line.is_empty())
        .collect_vec()
}

fn normalize_line(value: &str) -> String {
    let value = TABS_AND_RETURNS.replace_all(value, " ");
    WHITESPACE_RUN.replace_all(&value, " ").trim().to_owned()
}

fn classify_line(line: String, default_year: i32) -> Token {
    if let Some(captures) = DATE_LINE.captures(&line) {
        let date = to_trip_date(&captures[1], &captures[2], default_year);
        return Token::DateHeader { date, line };
    }
    if WEEKDAY_LINE.is_match(&line) {
        return Token::Weekday { line };
    }
    if let Some(captures) = MONTH_DAY_LINE.captures(&line) {
        let date = to_trip_date(&captures[1], &captures[2], default_year);
        return Token::MonthDay { date, line };
    }
    Token::Text { line }
}

/// Builds the day key without calendar validation: `Feb 31` yields
/// `2026-02-31`. Day keys are string keys, not calendar dates.
fn to_trip_date(month_label: &str, day_digits: &str, year: i32) -> Option<TripDate> {
    let month = month_number(month_label)?;
    let day = day_digits.parse::<u32>().ok()?;
    Some(TripDate::from(format!("{year}-{month}-{day:02}")))
}

fn month_number(label: &str) -> Option<&'static str> {
    let lower = label.to_ascii_lowercase();
    let prefix = lower.get(0..3)?;
    MONTHS.get(prefix).copied()
}
