use serde::{Deserialize, Serialize};

use crate::date_time::clock::ClockTime;

/// A scheduled slot within a day. `end` is absent for open-ended entries.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: ClockTime,
    pub end: Option<ClockTime>,
}

impl TimeRange {
    pub fn open_ended(start: ClockTime) -> Self {
        Self { start, end: None }
    }
}
