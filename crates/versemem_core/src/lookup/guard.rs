//! Stale lookup guard.
//!
//! A lookup started from one screen must not be applied after the user has
//! navigated away or started a newer lookup. The guard is a generation
//! counter: tickets from older generations are rejected.

use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};

/// Proof that a lookup was started at a given generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTicket {
    generation: u64,
}

/// Generation counter owned by the screen issuing lookups.
#[derive(Debug, Default)]
pub struct LookupGuard {
    generation: AtomicU64,
}

impl LookupGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a lookup, superseding any lookup still in flight.
    pub fn begin(&self) -> LookupTicket {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        LookupTicket { generation }
    }

    /// Discards every outstanding ticket (screen torn down or navigated away).
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    pub fn is_current(&self, ticket: LookupTicket) -> bool {
        self.generation.load(Ordering::Acquire) == ticket.generation
    }

    /// Returns `result` only when `ticket` is still current.
    pub fn accept<T>(&self, ticket: LookupTicket, result: Option<T>) -> Option<T> {
        if self.is_current(ticket) {
            result
        } else {
            debug!(
                "event=verse_lookup_discard module=lookup status=stale ticket_generation={}",
                ticket.generation
            );
            None
        }
    }
}
