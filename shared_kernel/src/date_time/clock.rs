use std::fmt;

use chrono::{NaiveTime, Timelike};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

lazy_static! {
    static ref CLOCK: Regex =
        Regex::new(r"^(\d{1,2}):(\d{2})\s*([AaPp][Mm])?$").expect("CLOCK regex to compile");
}

/// A wall-clock time of day, always rendered as zero-padded 24-hour `HH:MM`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ClockTime(NaiveTime);

#[derive(Debug, Error, Eq, PartialEq)]
pub enum ClockTimeError {
    #[error("value does not look like a clock time: {0:?}")]
    Unrecognized(String),
    #[error("clock time is out of range: {0:?}")]
    OutOfRange(String),
}

impl ClockTime {
    /// Accepts `H:MM` (assumed 24-hour) and `H:MM am/pm` with an optional
    /// space before the meridiem. `12am` maps to hour 0, `12pm` stays 12.
    pub fn parse(value: &str) -> Result<Self, ClockTimeError> {
        let trimmed = value.trim();
        let captures = CLOCK
            .captures(trimmed)
            .ok_or_else(|| ClockTimeError::Unrecognized(value.to_owned()))?;

        let hours = &captures[1];
        let minutes = &captures[2];
        let parsed = match captures.get(3) {
            Some(meridiem) => NaiveTime::parse_from_str(
                &format!("{hours}:{minutes} {}", meridiem.as_str().to_ascii_uppercase()),
                "%I:%M %p",
            ),
            None => NaiveTime::parse_from_str(&format!("{hours}:{minutes}"), "%H:%M"),
        };

        parsed
            .map(ClockTime)
            .map_err(|_| ClockTimeError::OutOfRange(value.to_owned()))
    }

    pub fn from_hm(hours: u32, minutes: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hours, minutes, 0).map(ClockTime)
    }

    pub fn minute_of_day(&self) -> u32 {
        self.0.hour() * 60 + self.0.minute()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        ClockTime::parse(&value).map_err(de::Error::custom)
    }
}
