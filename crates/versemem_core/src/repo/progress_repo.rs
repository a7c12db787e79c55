//! Progress store.
//!
//! # Invariants
//! - At most one record per `verse_id`.
//! - `initialize_progress` overwrites any existing record for the verse.

use super::{load_collection, remove_elements, upsert_element, write_mode, RepoResult};
use crate::model::progress::ProgressRecord;
use crate::storage::{KeyValueStore, Namespace};
use chrono::{DateTime, Utc};
use log::debug;

const KEY_FIELD: &str = "verseId";

/// Ordered progress collection persisted under `Namespace::Progress`.
pub struct ProgressStore<S: KeyValueStore> {
    kv: S,
}

impl<S: KeyValueStore> ProgressStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn get_progress(&self, verse_id: &str) -> Option<ProgressRecord> {
        self.list_all_progress()
            .into_iter()
            .find(|record| record.verse_id == verse_id)
    }

    pub fn list_all_progress(&self) -> Vec<ProgressRecord> {
        load_collection(&self.kv, Namespace::Progress)
    }

    /// Upserts by `verse_id`, keeping the position of an existing record.
    pub fn save_progress(&self, record: &ProgressRecord) -> RepoResult<()> {
        let (replaced, count) = upsert_element(
            &self.kv,
            Namespace::Progress,
            KEY_FIELD,
            &record.verse_id,
            record,
        )?;

        debug!(
            "event=progress_save module=repo status=ok mode={} step={} record_count={}",
            write_mode(replaced),
            record.current_step.marker(),
            count
        );
        Ok(())
    }

    /// Persists and returns a fresh record stamped with the current time.
    ///
    /// Not idempotent: an existing record for `verse_id` is reset.
    pub fn initialize_progress(&self, verse_id: &str) -> RepoResult<ProgressRecord> {
        self.initialize_progress_at(verse_id, Utc::now())
    }

    /// Same as [`Self::initialize_progress`] with an explicit timestamp.
    pub fn initialize_progress_at(
        &self,
        verse_id: &str,
        now: DateTime<Utc>,
    ) -> RepoResult<ProgressRecord> {
        let record = ProgressRecord::new(verse_id, now);
        self.save_progress(&record)?;
        Ok(record)
    }

    /// Removes the record for `verse_id`. Missing records are a no-op.
    pub fn delete_progress(&self, verse_id: &str) -> RepoResult<()> {
        let (removed, remaining) =
            remove_elements(&self.kv, Namespace::Progress, KEY_FIELD, verse_id)?;
        if removed > 0 {
            debug!(
                "event=progress_delete module=repo status=ok record_count={}",
                remaining
            );
        }
        Ok(())
    }
}
