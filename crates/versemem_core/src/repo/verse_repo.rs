//! Verse store.
//!
//! # Invariants
//! - `id` is unique across the collection.
//! - Deleting a verse also deletes its progress record, progress first, so a
//!   failed delete never leaves a record without its verse.

use super::progress_repo::ProgressStore;
use super::{load_collection, remove_elements, upsert_element, write_mode, RepoResult};
use crate::model::verse::Verse;
use crate::storage::{KeyValueStore, Namespace};
use log::{debug, info};

const KEY_FIELD: &str = "id";

/// Ordered verse collection persisted under `Namespace::Verses`.
pub struct VerseStore<S: KeyValueStore> {
    kv: S,
}

impl<S: KeyValueStore> VerseStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Returns all verses in insertion order; empty when nothing is stored.
    pub fn list_verses(&self) -> Vec<Verse> {
        load_collection(&self.kv, Namespace::Verses)
    }

    pub fn get_verse(&self, id: &str) -> Option<Verse> {
        self.list_verses().into_iter().find(|verse| verse.id == id)
    }

    /// Upserts by `id`, keeping the position of an existing verse.
    pub fn save_verse(&self, verse: &Verse) -> RepoResult<()> {
        let (replaced, count) =
            upsert_element(&self.kv, Namespace::Verses, KEY_FIELD, &verse.id, verse)?;

        debug!(
            "event=verse_save module=repo status=ok mode={} verse_count={}",
            write_mode(replaced),
            count
        );
        Ok(())
    }

    /// Removes the verse and its progress record. Missing ids are a no-op.
    pub fn delete_verse(&self, id: &str) -> RepoResult<()> {
        ProgressStore::new(&self.kv).delete_progress(id)?;
        let (removed, remaining) = remove_elements(&self.kv, Namespace::Verses, KEY_FIELD, id)?;

        info!(
            "event=verse_delete module=repo status=ok removed={} verse_count={}",
            removed, remaining
        );
        Ok(())
    }
}
