//! Verse lookup client for the public reference-based text service.
//!
//! # Responsibility
//! - Build lookup URLs and decode service responses.
//! - Collapse every failure mode into an absent result.
//! - Normalize verse text before it reaches the stores.
//!
//! # Invariants
//! - Callers cannot distinguish "not found" from transport failure.
//! - HTTP itself is supplied by the host through `LookupTransport`.

pub mod catalog;
pub mod client;
pub mod guard;
pub mod text;

pub use catalog::{find_book, BibleBook, BIBLE_BOOKS, POPULAR_MEMORY_VERSES};
pub use client::{
    LookupClient, LookupResponse, LookupTransport, LookupVerseEntry, TransportError,
    TransportResponse, VerseText, DEFAULT_LOOKUP_BASE_URL, DEFAULT_TRANSLATION,
};
pub use guard::{LookupGuard, LookupTicket};
pub use text::format_verse_text;
