pub mod categorize;
pub mod parser;
pub mod scanner;
pub mod time_of_day;

use entities::trip::{ParseConfidence, TripPatch};
use serde::Deserialize;

const DEFAULT_YEAR: i32 = 2026;

/// Uploaded documents rarely spell out a year, so recognized dates borrow
/// this one.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct ExtractorConfig {
    pub default_year: i32,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            default_year: DEFAULT_YEAR,
        }
    }
}

impl ExtractorConfig {
    pub fn load() -> anyhow::Result<Self> {
        shared_kernel::configuration::config()
    }
}

pub struct Extraction {
    pub patch: TripPatch,
    pub warnings: Vec<String>,
}

/// Runs the heuristic pipeline over extracted document text. Total over any
/// input: unparseable text yields an empty patch plus an advisory warning,
/// never an error.
#[tracing::instrument(skip_all)]
pub fn extract(text: &str, config: &ExtractorConfig) -> Extraction {
    let tokens = scanner::scan(text, config.default_year);
    let parsed = parser::Parser::new(tokens).parse();
    tracing::debug!(days = parsed.days.len(), "segmented itinerary days");

    let parse_confidence = ParseConfidence::from_day_count(parsed.days.len());
    Extraction {
        patch: TripPatch {
            days_added: vec![],
            days_updated: parsed.days,
            conflicts: vec![],
            parse_confidence,
        },
        warnings: parsed.warnings,
    }
}
