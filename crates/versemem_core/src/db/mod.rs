//! SQLite backing for the key-value medium.
//!
//! The only table is `kv_entries`; every namespace row holds one JSON
//! document, so the schema stays small and versioned by `PRAGMA user_version`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or using the `kv_entries` database.
#[derive(Debug)]
pub enum DbError {
    /// The database file or in-memory handle could not be opened.
    Open {
        medium: &'static str,
        source: rusqlite::Error,
    },
    /// A `kv_entries` statement or schema step failed.
    Sqlite(rusqlite::Error),
    /// The file was written by a build with a newer kv schema.
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { medium, source } => {
                write!(f, "cannot open {medium} verse database: {source}")
            }
            Self::Sqlite(err) => write!(f, "verse database error: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "verse database uses kv schema v{found}; this build reads up to v{supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
