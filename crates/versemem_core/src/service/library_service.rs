//! Verse library use-case service.
//!
//! # Responsibility
//! - Validate add-verse input at the boundary.
//! - Provide list/search/delete entry points and dashboard statistics.
//!
//! # Invariants
//! - Stored references and texts are trimmed and non-blank.
//! - Search never reorders; it filters the insertion-ordered list.

use crate::lookup::VerseText;
use crate::model::verse::Verse;
use crate::repo::progress_repo::ProgressStore;
use crate::repo::verse_repo::VerseStore;
use crate::repo::{RepoError, RepoResult};
use crate::service::stats::DashboardStats;
use crate::storage::KeyValueStore;
use chrono::{DateTime, Local, TimeZone};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected add-verse input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerseInputError {
    BlankReference,
    BlankText,
}

impl Display for VerseInputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankReference => write!(f, "reference must not be blank"),
            Self::BlankText => write!(f, "verse text must not be blank"),
        }
    }
}

impl Error for VerseInputError {}

/// Errors from library operations.
#[derive(Debug)]
pub enum LibraryError {
    InvalidInput(VerseInputError),
    Repo(RepoError),
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LibraryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<VerseInputError> for LibraryError {
    fn from(value: VerseInputError) -> Self {
        Self::InvalidInput(value)
    }
}

impl From<RepoError> for LibraryError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Library facade over one key-value medium.
pub struct LibraryService<S: KeyValueStore> {
    kv: S,
}

impl<S: KeyValueStore> LibraryService<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    fn verse_store(&self) -> VerseStore<&S> {
        VerseStore::new(&self.kv)
    }

    pub fn list(&self) -> Vec<Verse> {
        self.verse_store().list_verses()
    }

    pub fn get(&self, id: &str) -> Option<Verse> {
        self.verse_store().get_verse(id)
    }

    /// Case-insensitive filter over reference, text and notes.
    ///
    /// A blank term returns every verse.
    pub fn search(&self, term: &str) -> Vec<Verse> {
        let verses = self.list();
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return verses;
        }
        verses
            .into_iter()
            .filter(|verse| verse.matches_lowercase(&needle))
            .collect()
    }

    /// Adds a manually typed verse.
    pub fn add_manual(
        &self,
        reference: &str,
        text: &str,
        notes: Option<String>,
    ) -> Result<Verse, LibraryError> {
        let reference = reference.trim();
        let text = text.trim();
        if reference.is_empty() {
            return Err(VerseInputError::BlankReference.into());
        }
        if text.is_empty() {
            return Err(VerseInputError::BlankText.into());
        }

        let verse = Verse::new(reference, text, notes);
        self.verse_store().save_verse(&verse)?;
        info!("event=verse_add module=service status=ok source=manual");
        Ok(verse)
    }

    /// Adds a verse staged by a successful lookup.
    pub fn add_from_lookup(
        &self,
        staged: &VerseText,
        notes: Option<String>,
    ) -> Result<Verse, LibraryError> {
        let reference = staged.reference.trim();
        let text = staged.text.trim();
        if reference.is_empty() {
            return Err(VerseInputError::BlankReference.into());
        }
        if text.is_empty() {
            return Err(VerseInputError::BlankText.into());
        }

        let verse = Verse::new(reference, text, notes);
        self.verse_store().save_verse(&verse)?;
        info!("event=verse_add module=service status=ok source=lookup");
        Ok(verse)
    }

    /// Deletes a verse together with its progress record.
    pub fn delete(&self, id: &str) -> RepoResult<()> {
        self.verse_store().delete_verse(id)
    }

    /// Dashboard counters relative to the local calendar day.
    pub fn dashboard_stats(&self) -> DashboardStats {
        self.dashboard_stats_at(Local::now())
    }

    /// Dashboard counters relative to the calendar day of `now`.
    pub fn dashboard_stats_at<Tz: TimeZone>(&self, now: DateTime<Tz>) -> DashboardStats {
        let verses = self.list();
        let records = ProgressStore::new(&self.kv).list_all_progress();
        DashboardStats::compute(&verses, &records, &now)
    }
}
