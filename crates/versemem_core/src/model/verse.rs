//! Verse domain model.
//!
//! # Invariants
//! - `id` is assigned once at creation and never changes.
//! - `notes` is either absent or non-blank.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque verse identifier.
///
/// Kept as a string alias so records written by earlier builds (which used
/// millisecond timestamps) remain addressable.
pub type VerseId = String;

/// One memorized passage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verse {
    pub id: VerseId,
    /// Human-readable citation, e.g. `John 3:16`.
    pub reference: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub date_added: DateTime<Utc>,
}

impl Verse {
    /// Creates a verse with a fresh time-ordered ID and `date_added = now`.
    pub fn new(
        reference: impl Into<String>,
        text: impl Into<String>,
        notes: Option<String>,
    ) -> Self {
        Self::with_id(
            Uuid::now_v7().to_string(),
            reference,
            text,
            notes,
            Utc::now(),
        )
    }

    /// Creates a verse with caller-provided identity and timestamp.
    ///
    /// Does not validate `reference`/`text`; input policy belongs to the
    /// library service.
    pub fn with_id(
        id: impl Into<VerseId>,
        reference: impl Into<String>,
        text: impl Into<String>,
        notes: Option<String>,
        date_added: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            reference: reference.into(),
            text: text.into(),
            notes: normalize_notes(notes),
            date_added,
        }
    }

    /// Case-insensitive substring match over reference, text and notes.
    ///
    /// `needle` must already be lowercase.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.reference.to_lowercase().contains(needle)
            || self.text.to_lowercase().contains(needle)
            || self
                .notes
                .as_deref()
                .is_some_and(|notes| notes.to_lowercase().contains(needle))
    }
}

fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
