pub mod schedule;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};
use shared_kernel::date_time::clock::ClockTime;
use shared_kernel::string_key;

use crate::sources::SourceDocument;

string_key!(ItemId);
string_key!(TripDate);

/// Activity buckets the itinerary UI groups and colours by.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sights,
    Food,
    Coffee,
    Rest,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveView {
    Summary,
    Detail,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryItem {
    pub id: ItemId,
    pub title: String,
    pub start_time: ClockTime,
    pub end_time: Option<ClockTime>,
    pub location: String,
    pub notes: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

/// One calendar date of the trip, carrying a coarse summary view and a
/// fine-grained detail view of the same day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDay {
    pub date: TripDate,
    pub region: String,
    pub summary_items: Vec<ItineraryItem>,
    pub detail_items: Vec<ItineraryItem>,
    pub active_view: ActiveView,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripConflict {
    pub date: TripDate,
    pub reason: String,
}

/// Heuristic extraction quality, clamped to `[0, 1]` on construction and on
/// deserialization so untrusted assisted-extraction payloads cannot carry
/// out-of-range scores.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize)]
pub struct ParseConfidence(f32);

impl ParseConfidence {
    pub fn new(value: f32) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// More recognized days means more confidence, floored at 0.2 and capped
    /// at 0.95 no matter how many days were found.
    pub fn from_day_count(days: usize) -> Self {
        Self((days as f32 * 0.04).clamp(0.2, 0.95))
    }

    pub fn value(&self) -> f32 {
        self.0
    }
}

impl<'de> Deserialize<'de> for ParseConfidence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f32::deserialize(deserializer)?;
        Ok(ParseConfidence::new(value))
    }
}

/// A proposed change set derived from one parsed document. Consumed by the
/// merge engine and returned to the client for review; never stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPatch {
    pub days_added: Vec<TripDay>,
    pub days_updated: Vec<TripDay>,
    pub conflicts: Vec<TripConflict>,
    pub parse_confidence: ParseConfidence,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlan {
    pub trip_name: String,
    pub start_date: TripDate,
    pub end_date: TripDate,
    pub timezone: String,
    pub days: Vec<TripDay>,
    pub sources: Vec<SourceDocument>,
}

impl TripPlan {
    /// Today's day key in the plan's timezone, falling back to the UTC date
    /// when the timezone label does not parse.
    pub fn day_key_at(&self, now: DateTime<Utc>) -> TripDate {
        let date = match self.timezone.parse::<Tz>() {
            Ok(tz) => now.with_timezone(&tz).date_naive(),
            Err(_) => now.date_naive(),
        };
        TripDate::from(date.format("%Y-%m-%d").to_string())
    }

    /// The day the UI should open on: today when it falls inside the trip,
    /// otherwise the trip's first day.
    pub fn current_day(&self, now: DateTime<Utc>) -> TripDate {
        let today = self.day_key_at(now);
        if self.days.iter().any(|day| day.date == today) {
            today
        } else {
            self.start_date.clone()
        }
    }
}
