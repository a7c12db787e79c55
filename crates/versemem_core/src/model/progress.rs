//! Practice progress model.
//!
//! # Invariants
//! - `current_step` is one of 0, 1, 2, 4 on the wire; 3 is reserved.
//! - Counters never decrease.
//! - `notes` is append-only.

use crate::model::verse::VerseId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Drill phase of one verse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PracticeStep {
    Reading,
    Reciting,
    Review,
    /// Terminal phase.
    Mastered,
}

impl PracticeStep {
    /// Integer marker persisted in `currentStep`.
    pub fn marker(self) -> u8 {
        match self {
            Self::Reading => 0,
            Self::Reciting => 1,
            Self::Review => 2,
            Self::Mastered => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Reading => "Reading",
            Self::Reciting => "Reciting",
            Self::Review => "Daily Review",
            Self::Mastered => "Mastered",
        }
    }

    pub fn is_mastered(self) -> bool {
        self == Self::Mastered
    }
}

impl Display for PracticeStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Rejected `currentStep` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidStepMarker(pub u8);

impl Display for InvalidStepMarker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid practice step marker {}; expected 0, 1, 2 or 4",
            self.0
        )
    }
}

impl Error for InvalidStepMarker {}

impl TryFrom<u8> for PracticeStep {
    type Error = InvalidStepMarker;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Reading),
            1 => Ok(Self::Reciting),
            2 => Ok(Self::Review),
            4 => Ok(Self::Mastered),
            other => Err(InvalidStepMarker(other)),
        }
    }
}

impl From<PracticeStep> for u8 {
    fn from(value: PracticeStep) -> Self {
        value.marker()
    }
}

/// Per-verse drill state, persisted as one element of the progress array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub verse_id: VerseId,
    pub current_step: PracticeStep,
    pub reading_count: u32,
    pub reciting_count: u32,
    /// Stamped on every mutation.
    pub last_practiced: DateTime<Utc>,
    /// Count of review actions. Does not decay on missed days.
    pub daily_review_streak: u32,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl ProgressRecord {
    /// Fresh record at the start of the drill.
    pub fn new(verse_id: impl Into<VerseId>, now: DateTime<Utc>) -> Self {
        Self {
            verse_id: verse_id.into(),
            current_step: PracticeStep::Reading,
            reading_count: 0,
            reciting_count: 0,
            last_practiced: now,
            daily_review_streak: 0,
            notes: Vec::new(),
        }
    }
}
