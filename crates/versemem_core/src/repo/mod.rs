//! Verse and progress stores over an injected key-value medium.
//!
//! # Responsibility
//! - Persist each namespace as one JSON array under a fixed key.
//! - Provide upsert-by-id semantics that preserve insertion order.
//!
//! # Invariants
//! - Reads never fail: absent or unreadable collections load as empty, and
//!   undecodable elements are skipped without hiding their neighbours.
//! - Writes operate on the stored elements verbatim; an element this build
//!   cannot decode is carried through untouched.
//! - A collection that cannot be read is never overwritten.
//! - Every write persists the whole collection before returning.

use crate::storage::{KeyValueStore, Namespace, StorageError};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod progress_repo;
pub mod verse_repo;

/// Key holding the JSON array inside each namespace.
pub const RECORDS_KEY: &str = "records";

pub type RepoResult<T> = Result<T, RepoError>;

/// Write-path failure of a verse or progress store.
#[derive(Debug)]
pub enum RepoError {
    Storage(StorageError),
    Serialization(serde_json::Error),
    /// Stored collection is not a JSON array; writing would discard it.
    Unreadable {
        namespace: Namespace,
        source: serde_json::Error,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "failed to encode collection: {err}"),
            Self::Unreadable { namespace, source } => write!(
                f,
                "refusing to overwrite unreadable collection `{namespace}`: {source}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::Unreadable { source, .. } => Some(source),
        }
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Loads the raw elements of a namespace for a read-modify-write cycle.
fn load_elements<S>(kv: &S, namespace: Namespace) -> RepoResult<Vec<Value>>
where
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = kv.get(namespace, RECORDS_KEY)? else {
        return Ok(Vec::new());
    };
    serde_json::from_str(&raw).map_err(|source| RepoError::Unreadable { namespace, source })
}

fn load_collection<T, S>(kv: &S, namespace: Namespace) -> Vec<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let elements = match load_elements(kv, namespace) {
        Ok(elements) => elements,
        Err(err) => {
            warn!(
                "event=collection_load module=repo status=error namespace={} error_code=load_failed error={}",
                namespace, err
            );
            return Vec::new();
        }
    };

    elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| match serde_json::from_value(element) {
            Ok(item) => Some(item),
            Err(err) => {
                warn!(
                    "event=collection_load module=repo status=skipped namespace={} index={} error_code=element_decode_failed error={}",
                    namespace, index, err
                );
                None
            }
        })
        .collect()
}

fn store_elements<S>(kv: &S, namespace: Namespace, elements: &[Value]) -> RepoResult<()>
where
    S: KeyValueStore + ?Sized,
{
    let encoded = serde_json::to_string(elements)?;
    kv.set(namespace, RECORDS_KEY, &encoded)?;
    Ok(())
}

/// Upserts `item` into the stored elements, matching on the `key_field`
/// string. Elements that do not decode are left in place.
fn upsert_element<T, S>(
    kv: &S,
    namespace: Namespace,
    key_field: &str,
    key: &str,
    item: &T,
) -> RepoResult<(bool, usize)>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let mut elements = load_elements(kv, namespace)?;
    let encoded = serde_json::to_value(item)?;
    let replaced = upsert_by(&mut elements, encoded, |element| {
        element_key(element, key_field) == Some(key)
    });
    store_elements(kv, namespace, &elements)?;
    Ok((replaced, elements.len()))
}

/// Removes every element whose `key_field` equals `key`.
///
/// Returns `(removed, remaining)`; nothing is written when nothing matched.
fn remove_elements<S>(
    kv: &S,
    namespace: Namespace,
    key_field: &str,
    key: &str,
) -> RepoResult<(usize, usize)>
where
    S: KeyValueStore + ?Sized,
{
    let mut elements = load_elements(kv, namespace)?;
    let before = elements.len();
    elements.retain(|element| element_key(element, key_field) != Some(key));
    let removed = before - elements.len();
    if removed > 0 {
        store_elements(kv, namespace, &elements)?;
    }
    Ok((removed, elements.len()))
}

fn element_key<'a>(element: &'a Value, key_field: &str) -> Option<&'a str> {
    element.get(key_field).and_then(Value::as_str)
}

/// Replaces the first matching item in place, or appends.
///
/// Returns `true` when an existing item was replaced.
fn upsert_by<T>(items: &mut Vec<T>, item: T, same_key: impl Fn(&T) -> bool) -> bool {
    match items.iter().position(same_key) {
        Some(index) => {
            items[index] = item;
            true
        }
        None => {
            items.push(item);
            false
        }
    }
}

fn write_mode(replaced: bool) -> &'static str {
    if replaced {
        "replace"
    } else {
        "insert"
    }
}
