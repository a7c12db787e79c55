//! Core domain logic for verse memorization.
//! This crate is the single source of truth for drill and storage invariants.

pub mod db;
pub mod logging;
pub mod lookup;
pub mod model;
pub mod practice;
pub mod repo;
pub mod service;
pub mod storage;

pub use logging::{default_log_level, init_logging, logging_status, LoggingStatus};
pub use lookup::{
    format_verse_text, LookupClient, LookupGuard, LookupTicket, LookupTransport, TransportError,
    TransportResponse, VerseText,
};
pub use model::progress::{InvalidStepMarker, PracticeStep, ProgressRecord};
pub use model::verse::{Verse, VerseId};
pub use practice::{
    apply_action, overall_progress, reading_percent, reciting_percent, IgnoredReason,
    PracticeAction, Transition,
};
pub use repo::progress_repo::ProgressStore;
pub use repo::verse_repo::VerseStore;
pub use repo::{RepoError, RepoResult};
pub use service::library_service::{LibraryError, LibraryService, VerseInputError};
pub use service::practice_service::{
    ActionOutcome, PracticeService, PracticeServiceError, PracticeSession,
};
pub use service::review_deck::{ReviewCard, ReviewDeck};
pub use service::stats::{step_percentage, DashboardStats};
pub use storage::{
    KeyValueStore, MemoryKeyValueStore, Namespace, SqliteKeyValueStore, StorageError,
    StorageResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
