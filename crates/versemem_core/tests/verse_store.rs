use chrono::{TimeZone, Utc};
use std::cell::Cell;
use versemem_core::repo::{RepoError, RECORDS_KEY};
use versemem_core::storage::{StorageError, StorageResult};
use versemem_core::{
    KeyValueStore, MemoryKeyValueStore, Namespace, PracticeService, PracticeStep, ProgressStore,
    Verse, VerseStore,
};

/// Memory medium whose n-th `set` (1-based) fails.
struct FailingSetStore {
    inner: MemoryKeyValueStore,
    sets: Cell<usize>,
    fail_on: usize,
}

impl FailingSetStore {
    fn new(inner: MemoryKeyValueStore, fail_on: usize) -> Self {
        Self {
            inner,
            sets: Cell::new(0),
            fail_on,
        }
    }
}

impl KeyValueStore for FailingSetStore {
    fn get(&self, namespace: Namespace, key: &str) -> StorageResult<Option<String>> {
        self.inner.get(namespace, key)
    }

    fn set(&self, namespace: Namespace, key: &str, value: &str) -> StorageResult<()> {
        let attempt = self.sets.get() + 1;
        self.sets.set(attempt);
        if attempt == self.fail_on {
            return Err(StorageError::Busy(namespace));
        }
        self.inner.set(namespace, key, value)
    }

    fn delete(&self, namespace: Namespace, key: &str) -> StorageResult<()> {
        self.inner.delete(namespace, key)
    }
}

fn stored_json(kv: &impl KeyValueStore, namespace: Namespace) -> serde_json::Value {
    let raw = kv.get(namespace, RECORDS_KEY).unwrap().unwrap();
    serde_json::from_str(&raw).unwrap()
}

fn john_3_16() -> Verse {
    Verse::with_id(
        "1",
        "John 3:16",
        "For God so loved the world",
        None,
        Utc.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap(),
    )
}

#[test]
fn empty_store_lists_nothing() {
    let kv = MemoryKeyValueStore::new();
    let verses = VerseStore::new(&kv);
    let progress = ProgressStore::new(&kv);

    assert!(verses.list_verses().is_empty());
    assert!(progress.list_all_progress().is_empty());
    assert!(progress.get_progress("1").is_none());
}

#[test]
fn repeated_save_with_same_id_keeps_one_record() {
    let kv = MemoryKeyValueStore::new();
    let store = VerseStore::new(&kv);
    let mut verse = john_3_16();

    store.save_verse(&verse).unwrap();
    store.save_verse(&verse).unwrap();
    verse.text = "For God so loved the world, that he gave".to_string();
    store.save_verse(&verse).unwrap();

    let listed = store.list_verses();
    assert_eq!(listed, vec![verse]);
}

#[test]
fn save_replaces_in_place_and_appends_new_ids() {
    let kv = MemoryKeyValueStore::new();
    let store = VerseStore::new(&kv);
    let added = Utc.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap();
    let first = Verse::with_id("a", "Romans 8:28", "And we know", None, added);
    let second = Verse::with_id("b", "Joshua 1:9", "Be strong", None, added);
    store.save_verse(&first).unwrap();
    store.save_verse(&second).unwrap();

    let edited = Verse::with_id("a", "Romans 8:28", "And we know that", None, added);
    store.save_verse(&edited).unwrap();
    let third = Verse::with_id("c", "Psalm 23:1", "The LORD is my shepherd", None, added);
    store.save_verse(&third).unwrap();

    let ids: Vec<String> = store.list_verses().into_iter().map(|v| v.id).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(store.get_verse("a").unwrap().text, "And we know that");
}

#[test]
fn delete_verse_cascades_to_progress() {
    let kv = MemoryKeyValueStore::new();
    let verses = VerseStore::new(&kv);
    let progress = ProgressStore::new(&kv);

    verses.save_verse(&john_3_16()).unwrap();
    progress.initialize_progress("1").unwrap();
    progress.initialize_progress("other").unwrap();

    verses.delete_verse("1").unwrap();

    assert!(verses.list_verses().is_empty());
    assert!(progress.get_progress("1").is_none());
    assert!(progress.get_progress("other").is_some());
}

#[test]
fn delete_missing_verse_is_noop() {
    let kv = MemoryKeyValueStore::new();
    let verses = VerseStore::new(&kv);
    verses.save_verse(&john_3_16()).unwrap();

    verses.delete_verse("missing").unwrap();

    assert_eq!(verses.list_verses().len(), 1);
}

#[test]
fn undecodable_collection_reads_as_empty() {
    let kv = MemoryKeyValueStore::new();
    kv.set(Namespace::Verses, RECORDS_KEY, "{not json").unwrap();
    kv.set(Namespace::Progress, RECORDS_KEY, r#"[{"verseId":"1","currentStep":3}]"#)
        .unwrap();

    assert!(VerseStore::new(&kv).list_verses().is_empty());
    assert!(ProgressStore::new(&kv).list_all_progress().is_empty());
}

#[test]
fn unknown_step_record_does_not_hide_valid_records() {
    let kv = MemoryKeyValueStore::new();
    kv.set(
        Namespace::Progress,
        RECORDS_KEY,
        r#"[{"verseId":"a","currentStep":4,"readingCount":10,"recitingCount":10,"lastPracticed":"2024-06-01T07:00:00Z","dailyReviewStreak":7,"notes":[]},{"verseId":"b","currentStep":3,"readingCount":10,"recitingCount":10,"lastPracticed":"2024-06-01T07:00:00Z","dailyReviewStreak":0,"notes":[]}]"#,
    )
    .unwrap();

    let records = ProgressStore::new(&kv).list_all_progress();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].verse_id, "a");
    assert_eq!(records[0].daily_review_streak, 7);
}

#[test]
fn opening_a_session_keeps_records_that_fail_to_decode() {
    let kv = MemoryKeyValueStore::new();
    VerseStore::new(&kv)
        .save_verse(&Verse::with_id(
            "new",
            "Joshua 1:9",
            "Be strong and of a good courage",
            None,
            Utc.with_ymd_and_hms(2024, 6, 2, 9, 0, 0).unwrap(),
        ))
        .unwrap();
    kv.set(
        Namespace::Progress,
        RECORDS_KEY,
        r#"[{"verseId":"a","currentStep":4,"readingCount":10,"recitingCount":10,"lastPracticed":"2024-06-01T07:00:00Z","dailyReviewStreak":7,"notes":[]},{"verseId":"b","currentStep":3,"readingCount":10,"recitingCount":10,"lastPracticed":"2024-06-01T07:00:00Z","dailyReviewStreak":0,"notes":[]}]"#,
    )
    .unwrap();

    PracticeService::new(&kv).open_session("new").unwrap();

    let stored = stored_json(&kv, Namespace::Progress);
    let ids: Vec<&str> = stored
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["verseId"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["a", "b", "new"]);
    assert_eq!(stored[0]["dailyReviewStreak"], 7);
    assert_eq!(stored[1]["currentStep"], 3);
}

#[test]
fn deleting_keeps_verses_with_bad_dates() {
    let kv = MemoryKeyValueStore::new();
    kv.set(
        Namespace::Verses,
        RECORDS_KEY,
        r#"[{"id":"x","reference":"Psalm 1:1","text":"Blessed is the man","dateAdded":"not-a-date"},{"id":"1","reference":"John 3:16","text":"For God so loved the world","dateAdded":"2024-02-01T10:00:00Z"}]"#,
    )
    .unwrap();
    let store = VerseStore::new(&kv);

    store.delete_verse("missing").unwrap();
    assert_eq!(stored_json(&kv, Namespace::Verses).as_array().unwrap().len(), 2);
    assert_eq!(store.list_verses().len(), 1);

    store.delete_verse("1").unwrap();
    let stored = stored_json(&kv, Namespace::Verses);
    assert_eq!(stored.as_array().unwrap().len(), 1);
    assert_eq!(stored[0]["id"], "x");
}

#[test]
fn writes_refuse_to_replace_an_unreadable_collection() {
    let kv = MemoryKeyValueStore::new();
    kv.set(Namespace::Verses, RECORDS_KEY, "{not json").unwrap();
    let store = VerseStore::new(&kv);

    let err = store.save_verse(&john_3_16()).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Unreadable {
            namespace: Namespace::Verses,
            ..
        }
    ));
    assert!(store.delete_verse("1").is_err());
    assert_eq!(
        kv.get(Namespace::Verses, RECORDS_KEY).unwrap().as_deref(),
        Some("{not json")
    );
}

#[test]
fn failed_verse_write_during_delete_leaves_no_orphan_progress() {
    let seed = MemoryKeyValueStore::new();
    VerseStore::new(&seed).save_verse(&john_3_16()).unwrap();
    ProgressStore::new(&seed).initialize_progress("1").unwrap();
    let kv = FailingSetStore::new(seed, 2);

    let err = VerseStore::new(&kv).delete_verse("1").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Storage(StorageError::Busy(Namespace::Verses))
    ));

    assert!(VerseStore::new(&kv).get_verse("1").is_some());
    assert!(ProgressStore::new(&kv).get_progress("1").is_none());
}

#[test]
fn collections_use_camel_case_wire_shape() {
    let kv = MemoryKeyValueStore::new();
    VerseStore::new(&kv).save_verse(&john_3_16()).unwrap();
    let mut record = ProgressStore::new(&kv)
        .initialize_progress_at("1", Utc.with_ymd_and_hms(2024, 2, 2, 8, 30, 0).unwrap())
        .unwrap();
    record.current_step = PracticeStep::Mastered;
    ProgressStore::new(&kv).save_progress(&record).unwrap();

    let raw_verses = kv.get(Namespace::Verses, RECORDS_KEY).unwrap().unwrap();
    let verses: serde_json::Value = serde_json::from_str(&raw_verses).unwrap();
    assert_eq!(verses[0]["id"], "1");
    assert_eq!(verses[0]["reference"], "John 3:16");
    assert_eq!(verses[0]["dateAdded"], "2024-02-01T10:00:00Z");
    assert!(verses[0].get("notes").is_none());

    let raw_progress = kv.get(Namespace::Progress, RECORDS_KEY).unwrap().unwrap();
    let progress: serde_json::Value = serde_json::from_str(&raw_progress).unwrap();
    assert_eq!(progress[0]["verseId"], "1");
    assert_eq!(progress[0]["currentStep"], 4);
    assert_eq!(progress[0]["readingCount"], 0);
    assert_eq!(progress[0]["dailyReviewStreak"], 0);
    assert_eq!(progress[0]["lastPracticed"], "2024-02-02T08:30:00Z");
    assert_eq!(progress[0]["notes"], serde_json::json!([]));
}

#[test]
fn reads_collections_written_by_browser_build() {
    let kv = MemoryKeyValueStore::new();
    kv.set(
        Namespace::Verses,
        RECORDS_KEY,
        r#"[{"id":"1717171717171","reference":"Psalm 119:11","text":"Thy word have I hid in mine heart","notes":"evening","dateAdded":"2024-05-31T16:08:37.171Z"}]"#,
    )
    .unwrap();
    kv.set(
        Namespace::Progress,
        RECORDS_KEY,
        r#"[{"verseId":"1717171717171","currentStep":1,"readingCount":10,"recitingCount":2,"lastPracticed":"2024-06-01T07:00:00.000Z","dailyReviewStreak":0,"notes":["hard"]}]"#,
    )
    .unwrap();

    let verse = VerseStore::new(&kv).get_verse("1717171717171").unwrap();
    assert_eq!(verse.notes.as_deref(), Some("evening"));

    let record = ProgressStore::new(&kv).get_progress("1717171717171").unwrap();
    assert_eq!(record.current_step, PracticeStep::Reciting);
    assert_eq!(record.reading_count, 10);
    assert_eq!(record.notes, vec!["hard".to_string()]);
}
