//! Practice drill state machine.
//!
//! # Responsibility
//! - Compute phase transitions from a progress snapshot and one action.
//! - Derive informational completion percentages.
//!
//! # Invariants
//! - Transitions are pure: no storage access and no hidden state.
//! - Every applied transition stamps `last_practiced`.

pub mod machine;

pub use machine::{
    apply_action, overall_progress, reading_percent, reciting_percent, IgnoredReason,
    PracticeAction, Transition, OVERALL_PROGRESS_DENOMINATOR, READING_TARGET, RECITING_TARGET,
};
