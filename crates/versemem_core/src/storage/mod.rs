//! Injected key-value medium behind the verse and progress stores.
//!
//! # Responsibility
//! - Define the uniform get/set/delete contract over named namespaces.
//! - Provide process-local and SQLite-backed implementations.
//!
//! # Invariants
//! - Absence of a key is `Ok(None)`, never an error.
//! - `set` is a full replacement of the stored value for that key.
//! - Stores above this layer never assume a specific medium.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite_kv;

pub use memory::MemoryKeyValueStore;
pub use sqlite_kv::SqliteKeyValueStore;

pub type StorageResult<T> = Result<T, StorageError>;

/// Logical namespaces persisted by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Namespace {
    /// Ordered verse collection.
    Verses,
    /// Ordered per-verse progress records.
    Progress,
}

impl Namespace {
    /// Stable storage name, shared with data exported by earlier builds.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Verses => "bible-memorization-verses",
            Self::Progress => "bible-memorization-progress",
        }
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of the underlying medium.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    /// The medium is already borrowed by an in-flight operation.
    Busy(Namespace),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Busy(namespace) => write!(f, "storage busy for namespace `{namespace}`"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Busy(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistent key-value medium with named namespaces.
pub trait KeyValueStore {
    fn get(&self, namespace: Namespace, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, namespace: Namespace, key: &str, value: &str) -> StorageResult<()>;
    fn delete(&self, namespace: Namespace, key: &str) -> StorageResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, namespace: Namespace, key: &str) -> StorageResult<Option<String>> {
        (**self).get(namespace, key)
    }

    fn set(&self, namespace: Namespace, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(namespace, key, value)
    }

    fn delete(&self, namespace: Namespace, key: &str) -> StorageResult<()> {
        (**self).delete(namespace, key)
    }
}
