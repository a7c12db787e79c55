//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store reads, state-machine transitions and store writes.
//! - Keep presentation callers decoupled from storage details.

pub mod library_service;
pub mod practice_service;
pub mod review_deck;
pub mod stats;
