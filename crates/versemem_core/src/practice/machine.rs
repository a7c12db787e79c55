//! Reading → Reciting → Review → Mastered transitions.

use crate::model::progress::{PracticeStep, ProgressRecord};
use chrono::{DateTime, Utc};
use std::fmt::{Display, Formatter};

/// Completed readings required before reciting unlocks.
pub const READING_TARGET: u32 = 10;
/// Recitation attempts required before review unlocks.
pub const RECITING_TARGET: u32 = 10;
/// Denominator of the overall completion heuristic.
pub const OVERALL_PROGRESS_DENOMINATOR: u32 = 25;

/// User action applied to one verse's progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PracticeAction {
    CompleteReading,
    AttemptRecitation,
    MarkReviewed,
    /// Raw note input; trimmed before it is stored.
    AddNote(String),
}

impl PracticeAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CompleteReading => "complete_reading",
            Self::AttemptRecitation => "attempt_recitation",
            Self::MarkReviewed => "mark_reviewed",
            Self::AddNote(_) => "add_note",
        }
    }
}

/// Why an action left the record untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    /// The action belongs to another phase.
    WrongPhase {
        expected: PracticeStep,
        actual: PracticeStep,
    },
    /// Note input was empty after trimming.
    BlankNote,
}

impl Display for IgnoredReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongPhase { expected, actual } => {
                write!(f, "action requires phase {expected}, verse is in {actual}")
            }
            Self::BlankNote => write!(f, "note is blank"),
        }
    }
}

/// Result of applying one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Updated record to persist.
    Applied(ProgressRecord),
    /// No-op; the caller keeps its snapshot and writes nothing.
    Ignored(IgnoredReason),
}

/// Applies `action` to a snapshot and returns the next record.
///
/// # Contract
/// - Reading advances to Reciting once `reading_count` reaches the target.
/// - Reciting advances to Review once `reciting_count` reaches the target.
/// - Review (from Review or Mastered) lands on Mastered and bumps the
///   streak by one.
/// - Notes are accepted in every phase.
pub fn apply_action(
    record: &ProgressRecord,
    action: &PracticeAction,
    now: DateTime<Utc>,
) -> Transition {
    let mut next = record.clone();

    match action {
        PracticeAction::CompleteReading => {
            if let Err(reason) = require_phase(record, PracticeStep::Reading) {
                return Transition::Ignored(reason);
            }
            next.reading_count = next.reading_count.saturating_add(1);
            if next.reading_count >= READING_TARGET {
                next.current_step = PracticeStep::Reciting;
            }
        }
        PracticeAction::AttemptRecitation => {
            if let Err(reason) = require_phase(record, PracticeStep::Reciting) {
                return Transition::Ignored(reason);
            }
            next.reciting_count = next.reciting_count.saturating_add(1);
            if next.reciting_count >= RECITING_TARGET {
                next.current_step = PracticeStep::Review;
            }
        }
        PracticeAction::MarkReviewed => {
            // Mastered verses stay reviewable; each review extends the streak.
            if record.current_step != PracticeStep::Mastered {
                if let Err(reason) = require_phase(record, PracticeStep::Review) {
                    return Transition::Ignored(reason);
                }
            }
            next.daily_review_streak = next.daily_review_streak.saturating_add(1);
            next.current_step = PracticeStep::Mastered;
        }
        PracticeAction::AddNote(note) => {
            let trimmed = note.trim();
            if trimmed.is_empty() {
                return Transition::Ignored(IgnoredReason::BlankNote);
            }
            next.notes.push(trimmed.to_string());
        }
    }

    next.last_practiced = now;
    Transition::Applied(next)
}

fn require_phase(record: &ProgressRecord, expected: PracticeStep) -> Result<(), IgnoredReason> {
    if record.current_step == expected {
        Ok(())
    } else {
        Err(IgnoredReason::WrongPhase {
            expected,
            actual: record.current_step,
        })
    }
}

/// Informational completion percentage. Not clamped; exceeds 100 once the
/// streak grows past its share of the denominator.
pub fn overall_progress(record: &ProgressRecord) -> f64 {
    let total = f64::from(record.reading_count)
        + f64::from(record.reciting_count)
        + f64::from(record.daily_review_streak);
    total / f64::from(OVERALL_PROGRESS_DENOMINATOR) * 100.0
}

pub fn reading_percent(record: &ProgressRecord) -> f64 {
    f64::from(record.reading_count) / f64::from(READING_TARGET) * 100.0
}

pub fn reciting_percent(record: &ProgressRecord) -> f64 {
    f64::from(record.reciting_count) / f64::from(RECITING_TARGET) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, minute, 0).unwrap()
    }

    fn applied(transition: Transition) -> ProgressRecord {
        match transition {
            Transition::Applied(record) => record,
            Transition::Ignored(reason) => panic!("expected applied transition, got {reason}"),
        }
    }

    fn repeat(record: ProgressRecord, action: &PracticeAction, times: u32) -> ProgressRecord {
        (0..times).fold(record, |current, _| {
            applied(apply_action(&current, action, at(1)))
        })
    }

    #[test]
    fn reading_advances_exactly_at_target() {
        let record = ProgressRecord::new("1", at(0));
        let nine = repeat(record, &PracticeAction::CompleteReading, 9);
        assert_eq!(nine.current_step, PracticeStep::Reading);
        assert_eq!(nine.reading_count, 9);

        let ten = repeat(nine, &PracticeAction::CompleteReading, 1);
        assert_eq!(ten.current_step, PracticeStep::Reciting);
        assert_eq!(ten.reading_count, 10);
    }

    #[test]
    fn recitation_advances_exactly_at_target() {
        let mut record = ProgressRecord::new("1", at(0));
        record.current_step = PracticeStep::Reciting;

        let nine = repeat(record, &PracticeAction::AttemptRecitation, 9);
        assert_eq!(nine.current_step, PracticeStep::Reciting);

        let ten = repeat(nine, &PracticeAction::AttemptRecitation, 1);
        assert_eq!(ten.current_step, PracticeStep::Review);
        assert_eq!(ten.reciting_count, 10);
    }

    #[test]
    fn mark_reviewed_masters_and_increments_streak_once() {
        let mut record = ProgressRecord::new("1", at(0));
        record.current_step = PracticeStep::Review;
        record.daily_review_streak = 7;

        let next = applied(apply_action(&record, &PracticeAction::MarkReviewed, at(5)));
        assert_eq!(next.current_step, PracticeStep::Mastered);
        assert_eq!(next.daily_review_streak, 8);
        assert_eq!(next.last_practiced, at(5));
    }

    #[test]
    fn wrong_phase_is_ignored() {
        let record = ProgressRecord::new("1", at(0));
        let transition = apply_action(&record, &PracticeAction::MarkReviewed, at(1));
        assert_eq!(
            transition,
            Transition::Ignored(IgnoredReason::WrongPhase {
                expected: PracticeStep::Review,
                actual: PracticeStep::Reading,
            })
        );
    }

    #[test]
    fn mastered_never_regresses() {
        let mut record = ProgressRecord::new("1", at(0));
        record.current_step = PracticeStep::Mastered;
        for action in [
            PracticeAction::CompleteReading,
            PracticeAction::AttemptRecitation,
        ] {
            assert!(matches!(
                apply_action(&record, &action, at(1)),
                Transition::Ignored(IgnoredReason::WrongPhase { .. })
            ));
        }
    }

    #[test]
    fn mastered_verse_can_be_reviewed_again() {
        let mut record = ProgressRecord::new("1", at(0));
        record.current_step = PracticeStep::Mastered;
        record.daily_review_streak = 1;

        let next = applied(apply_action(&record, &PracticeAction::MarkReviewed, at(2)));
        assert_eq!(next.current_step, PracticeStep::Mastered);
        assert_eq!(next.daily_review_streak, 2);
    }

    #[test]
    fn notes_are_trimmed_and_blank_notes_ignored() {
        let record = ProgressRecord::new("1", at(0));
        let blank = apply_action(&record, &PracticeAction::AddNote("  \n ".into()), at(1));
        assert_eq!(blank, Transition::Ignored(IgnoredReason::BlankNote));

        let next = applied(apply_action(
            &record,
            &PracticeAction::AddNote("  keep going  ".into()),
            at(1),
        ));
        assert_eq!(next.notes, vec!["keep going".to_string()]);
        assert_eq!(next.current_step, PracticeStep::Reading);
    }

    #[test]
    fn overall_progress_is_not_clamped() {
        let mut record = ProgressRecord::new("1", at(0));
        record.reading_count = 10;
        record.reciting_count = 10;
        record.daily_review_streak = 10;
        assert!((overall_progress(&record) - 120.0).abs() < f64::EPSILON);
        assert!((reading_percent(&record) - 100.0).abs() < f64::EPSILON);
    }
}
