use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::trip::{TripDate, TripPatch};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Docx,
    Doc,
    Txt,
    Unknown,
}

impl DocumentKind {
    pub fn from_file_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".pdf") {
            DocumentKind::Pdf
        } else if lower.ends_with(".docx") {
            DocumentKind::Docx
        } else if lower.ends_with(".doc") {
            DocumentKind::Doc
        } else if lower.ends_with(".txt") {
            DocumentKind::Txt
        } else {
            DocumentKind::Unknown
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
    Parsed,
    Warning,
    Failed,
}

/// Provenance record for one uploaded document, kept on the trip plan so the
/// UI can show where each imported day came from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDocument {
    pub id: Uuid,
    pub name: String,
    pub kind: DocumentKind,
    pub uploaded_at: DateTime<Utc>,
    pub covers_dates: Vec<TripDate>,
    pub status: SourceStatus,
}

impl SourceDocument {
    /// Synthesizes the record for a freshly extracted patch: it covers every
    /// date the patch touches, and any extraction warnings demote the status.
    pub fn synthesized(
        id: Uuid,
        file_name: &str,
        uploaded_at: DateTime<Utc>,
        patch: &TripPatch,
        warnings: &[String],
    ) -> Self {
        let covers_dates = patch
            .days_added
            .iter()
            .chain(patch.days_updated.iter())
            .map(|day| day.date.clone())
            .collect();
        let status = if warnings.is_empty() {
            SourceStatus::Parsed
        } else {
            SourceStatus::Warning
        };

        Self {
            id,
            name: file_name.to_owned(),
            kind: DocumentKind::from_file_name(file_name),
            uploaded_at,
            covers_dates,
            status,
        }
    }
}
