//! Domain model for verses and their practice progress.
//!
//! # Invariants
//! - Every verse is identified by a stable `VerseId`.
//! - A progress record is keyed by the `VerseId` it belongs to (one-to-one).

pub mod progress;
pub mod verse;
