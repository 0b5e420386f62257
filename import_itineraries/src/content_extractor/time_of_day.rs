use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use shared_kernel::date_time::clock::ClockTime;
use shared_kernel::date_time::time_range::TimeRange;

lazy_static! {
    static ref TIME_RANGE: Regex =
        RegexBuilder::new(r"(\d{1,2}:\d{2}(?:\s*[ap]m)?)\s*[–-]\s*(\d{1,2}:\d{2}(?:\s*[ap]m)?)")
            .case_insensitive(true)
            .build()
            .expect("TIME_RANGE regex to compile");
    static ref TIME_SINGLE: Regex = RegexBuilder::new(r"\d{1,2}:\d{2}(?:\s*[ap]m)?")
        .case_insensitive(true)
        .build()
        .expect("TIME_SINGLE regex to compile");
    static ref DEFAULT_START: ClockTime =
        ClockTime::from_hm(9, 0).expect("09:00 to be a valid clock time");
}

/// Scans arbitrary text for a `start – end` pair (en dash or hyphen), then
/// for a single time token, then falls back to an open-ended 09:00 slot.
/// Tokens that fail normalization count as not found.
pub fn recognize(text: &str) -> TimeRange {
    if let Some(captures) = TIME_RANGE.captures(text) {
        if let (Ok(start), Ok(end)) = (
            ClockTime::parse(&captures[1]),
            ClockTime::parse(&captures[2]),
        ) {
            return TimeRange {
                start,
                end: Some(end),
            };
        }
    }

    if let Some(token) = TIME_SINGLE.find(text) {
        if let Ok(start) = ClockTime::parse(token.as_str()) {
            return TimeRange::open_ended(start);
        }
    }

    TimeRange::open_ended(*DEFAULT_START)
}
