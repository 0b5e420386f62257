use std::sync::Arc;

use async_trait::async_trait;
use entities::trip::TripPatch;
use import_itineraries::content_extractor::{self, ExtractorConfig};
#[cfg(test)]
use mockall::automock;
use tracing::warn;

/// An external collaborator (typically an LLM) that may turn document text
/// into a structured patch. `Ok(None)` means it had nothing to offer.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AssistedItineraryExtractor: Send + Sync {
    async fn extract(&self, text: &str, file_name: &str) -> anyhow::Result<Option<TripPatch>>;
}

pub struct ExtractOutcome {
    pub trip_patch: TripPatch,
    pub warnings: Vec<String>,
}

/// Turns uploaded document text into a trip patch. The heuristic parser runs
/// unconditionally as the guaranteed fallback; an assisted extractor's patch
/// is preferred only when it actually carries updated days.
pub struct ExtractItinerary {
    assisted: Option<Arc<dyn AssistedItineraryExtractor>>,
    config: ExtractorConfig,
}

impl ExtractItinerary {
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            assisted: None,
            config,
        }
    }

    pub fn with_assisted(
        config: ExtractorConfig,
        assisted: Arc<dyn AssistedItineraryExtractor>,
    ) -> Self {
        Self {
            assisted: Some(assisted),
            config,
        }
    }

    #[tracing::instrument(skip(self, text))]
    pub async fn extract(&self, text: &str, file_name: &str) -> ExtractOutcome {
        let local = content_extractor::extract(text, &self.config);
        let mut warnings = local.warnings;

        let Some(assisted) = self.assisted.as_ref() else {
            return ExtractOutcome {
                trip_patch: local.patch,
                warnings,
            };
        };

        match assisted.extract(text, file_name).await {
            Ok(Some(patch)) if !patch.days_updated.is_empty() => ExtractOutcome {
                trip_patch: patch,
                warnings,
            },
            Ok(_) => {
                warnings.push(
                    "Assisted extraction returned no structured days. Using local parser fallback."
                        .to_owned(),
                );
                ExtractOutcome {
                    trip_patch: local.patch,
                    warnings,
                }
            }
            Err(error) => {
                warn!("assisted extraction failed: {error:?}");
                warnings.push(format!(
                    "Assisted extraction failed; fallback parser used. {error}"
                ));
                ExtractOutcome {
                    trip_patch: local.patch,
                    warnings,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::anyhow;
    use entities::trip::{ActiveView, ParseConfidence, TripDate, TripDay, TripPatch};
    use import_itineraries::content_extractor::ExtractorConfig;

    use super::{ExtractItinerary, MockAssistedItineraryExtractor};

    const TEXT: &str = "Wed Feb 12\nSALALAH\nExplore Salalah and Al Baleed";

    fn assisted_patch() -> TripPatch {
        TripPatch {
            days_added: vec![],
            days_updated: vec![TripDay {
                date: TripDate::from("2026-02-12"),
                region: "Oman - Salalah".to_owned(),
                summary_items: vec![],
                detail_items: vec![],
                active_view: ActiveView::Summary,
            }],
            conflicts: vec![],
            parse_confidence: ParseConfidence::new(0.7),
        }
    }

    #[tokio::test]
    async fn test_without_assisted_extractor_the_heuristic_patch_wins() {
        let interactor = ExtractItinerary::new(ExtractorConfig::default());

        let outcome = interactor.extract(TEXT, "oman.txt").await;
        assert_eq!(outcome.trip_patch.days_updated.len(), 1);
        assert_eq!(outcome.trip_patch.days_updated[0].region, "SALALAH");
        assert!(outcome.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_assisted_patch_with_updated_days_is_preferred() {
        let mut mock = MockAssistedItineraryExtractor::new();
        mock.expect_extract()
            .returning(|_, _| Ok(Some(assisted_patch())));
        let interactor =
            ExtractItinerary::with_assisted(ExtractorConfig::default(), Arc::new(mock));

        let outcome = interactor.extract(TEXT, "oman.txt").await;
        assert_eq!(outcome.trip_patch.days_updated[0].region, "Oman - Salalah");
        assert!(outcome.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_assisted_patch_without_days_falls_back_with_warning() {
        let mut mock = MockAssistedItineraryExtractor::new();
        mock.expect_extract().returning(|_, _| Ok(None));
        let interactor =
            ExtractItinerary::with_assisted(ExtractorConfig::default(), Arc::new(mock));

        let outcome = interactor.extract(TEXT, "oman.txt").await;
        assert_eq!(outcome.trip_patch.days_updated[0].region, "SALALAH");
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("no structured days"));
    }

    #[tokio::test]
    async fn test_assisted_failure_falls_back_with_warning() {
        let mut mock = MockAssistedItineraryExtractor::new();
        mock.expect_extract()
            .returning(|_, _| Err(anyhow!("upstream timeout")));
        let interactor =
            ExtractItinerary::with_assisted(ExtractorConfig::default(), Arc::new(mock));

        let outcome = interactor.extract(TEXT, "oman.txt").await;
        assert_eq!(outcome.trip_patch.days_updated[0].region, "SALALAH");
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("upstream timeout"));
    }
}
