//! Practice use-case service.
//!
//! # Responsibility
//! - Lazily initialize progress when a verse is first opened for practice.
//! - Apply drill actions to a fresh snapshot and persist the result.
//!
//! # Invariants
//! - Every action re-reads the stored record; nothing is cached between calls.
//! - Ignored actions write nothing.

use crate::model::progress::{PracticeStep, ProgressRecord};
use crate::model::verse::{Verse, VerseId};
use crate::practice::{apply_action, IgnoredReason, PracticeAction, Transition};
use crate::repo::progress_repo::ProgressStore;
use crate::repo::verse_repo::VerseStore;
use crate::repo::{RepoError, RepoResult};
use crate::storage::KeyValueStore;
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from practice operations.
#[derive(Debug)]
pub enum PracticeServiceError {
    /// No verse with this id exists.
    VerseNotFound(VerseId),
    /// The verse was never initialized for practice.
    ProgressNotFound(VerseId),
    Repo(RepoError),
}

impl Display for PracticeServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VerseNotFound(id) => write!(f, "verse not found: {id}"),
            Self::ProgressNotFound(id) => write!(f, "no practice progress for verse: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PracticeServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for PracticeServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Record after an action plus whether the action took effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub record: ProgressRecord,
    /// `None` when the action was applied and persisted.
    pub ignored: Option<IgnoredReason>,
}

impl ActionOutcome {
    pub fn was_applied(&self) -> bool {
        self.ignored.is_none()
    }
}

/// Practice service facade over one key-value medium.
pub struct PracticeService<S: KeyValueStore> {
    kv: S,
}

impl<S: KeyValueStore> PracticeService<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    fn progress_store(&self) -> ProgressStore<&S> {
        ProgressStore::new(&self.kv)
    }

    pub fn get_progress(&self, verse_id: &str) -> Option<ProgressRecord> {
        self.progress_store().get_progress(verse_id)
    }

    /// Resets progress for `verse_id` unconditionally.
    pub fn initialize_progress(&self, verse_id: &str) -> RepoResult<ProgressRecord> {
        let record = self.progress_store().initialize_progress(verse_id)?;
        info!("event=progress_init module=service status=ok");
        Ok(record)
    }

    /// Loads a verse for practice, creating its progress record on first use.
    pub fn open_session(&self, verse_id: &str) -> Result<PracticeSession, PracticeServiceError> {
        let verse = VerseStore::new(&self.kv)
            .get_verse(verse_id)
            .ok_or_else(|| PracticeServiceError::VerseNotFound(verse_id.to_string()))?;

        let progress = match self.get_progress(verse_id) {
            Some(record) => record,
            None => self.initialize_progress(verse_id)?,
        };

        Ok(PracticeSession::new(verse, progress))
    }

    pub fn complete_reading(&self, verse_id: &str) -> Result<ActionOutcome, PracticeServiceError> {
        self.apply(verse_id, &PracticeAction::CompleteReading)
    }

    pub fn attempt_recitation(
        &self,
        verse_id: &str,
    ) -> Result<ActionOutcome, PracticeServiceError> {
        self.apply(verse_id, &PracticeAction::AttemptRecitation)
    }

    pub fn mark_reviewed(&self, verse_id: &str) -> Result<ActionOutcome, PracticeServiceError> {
        self.apply(verse_id, &PracticeAction::MarkReviewed)
    }

    pub fn add_note(
        &self,
        verse_id: &str,
        note: impl Into<String>,
    ) -> Result<ActionOutcome, PracticeServiceError> {
        self.apply(verse_id, &PracticeAction::AddNote(note.into()))
    }

    /// Applies one action stamped with the current time.
    pub fn apply(
        &self,
        verse_id: &str,
        action: &PracticeAction,
    ) -> Result<ActionOutcome, PracticeServiceError> {
        self.apply_at(verse_id, action, Utc::now())
    }

    /// Applies one action with an explicit timestamp.
    pub fn apply_at(
        &self,
        verse_id: &str,
        action: &PracticeAction,
        now: DateTime<Utc>,
    ) -> Result<ActionOutcome, PracticeServiceError> {
        let store = self.progress_store();
        let snapshot = store
            .get_progress(verse_id)
            .ok_or_else(|| PracticeServiceError::ProgressNotFound(verse_id.to_string()))?;

        match apply_action(&snapshot, action, now) {
            Transition::Applied(record) => {
                store.save_progress(&record)?;
                log_transition(action, snapshot.current_step, record.current_step);
                Ok(ActionOutcome {
                    record,
                    ignored: None,
                })
            }
            Transition::Ignored(reason) => {
                debug!(
                    "event=practice_action module=service status=ignored action={} reason={}",
                    action.name(),
                    reason
                );
                Ok(ActionOutcome {
                    record: snapshot,
                    ignored: Some(reason),
                })
            }
        }
    }
}

fn log_transition(action: &PracticeAction, from: PracticeStep, to: PracticeStep) {
    if from == to {
        debug!(
            "event=practice_action module=service status=ok action={} step={}",
            action.name(),
            to.marker()
        );
    } else {
        info!(
            "event=practice_action module=service status=ok action={} from_step={} to_step={}",
            action.name(),
            from.marker(),
            to.marker()
        );
    }
}

/// One open practice screen: verse, latest progress, and input buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeSession {
    verse: Verse,
    progress: ProgressRecord,
    show_text: bool,
    recitation_input: String,
    note_draft: String,
}

impl PracticeSession {
    fn new(verse: Verse, progress: ProgressRecord) -> Self {
        let show_text = shows_text_in(progress.current_step);
        Self {
            verse,
            progress,
            show_text,
            recitation_input: String::new(),
            note_draft: String::new(),
        }
    }

    pub fn verse(&self) -> &Verse {
        &self.verse
    }

    pub fn progress(&self) -> &ProgressRecord {
        &self.progress
    }

    pub fn phase(&self) -> PracticeStep {
        self.progress.current_step
    }

    /// Whether the verse text is currently revealed.
    pub fn is_text_visible(&self) -> bool {
        self.show_text
    }

    /// Peek at or hide the text (reciting hides it on entry).
    pub fn toggle_text(&mut self) {
        self.show_text = !self.show_text;
    }

    pub fn recitation_input(&self) -> &str {
        &self.recitation_input
    }

    pub fn set_recitation_input(&mut self, value: impl Into<String>) {
        self.recitation_input = value.into();
    }

    pub fn clear_recitation_input(&mut self) {
        self.recitation_input.clear();
    }

    pub fn note_draft(&self) -> &str {
        &self.note_draft
    }

    pub fn set_note_draft(&mut self, value: impl Into<String>) {
        self.note_draft = value.into();
    }

    pub fn complete_reading<S: KeyValueStore>(
        &mut self,
        service: &PracticeService<S>,
    ) -> Result<ActionOutcome, PracticeServiceError> {
        self.run(service, &PracticeAction::CompleteReading)
    }

    /// Counts a recitation attempt and clears the input buffer when applied.
    pub fn attempt_recitation<S: KeyValueStore>(
        &mut self,
        service: &PracticeService<S>,
    ) -> Result<ActionOutcome, PracticeServiceError> {
        let outcome = self.run(service, &PracticeAction::AttemptRecitation)?;
        if outcome.was_applied() {
            self.recitation_input.clear();
        }
        Ok(outcome)
    }

    pub fn mark_reviewed<S: KeyValueStore>(
        &mut self,
        service: &PracticeService<S>,
    ) -> Result<ActionOutcome, PracticeServiceError> {
        self.run(service, &PracticeAction::MarkReviewed)
    }

    /// Submits the note draft; the draft is cleared once the note is stored.
    pub fn submit_note<S: KeyValueStore>(
        &mut self,
        service: &PracticeService<S>,
    ) -> Result<ActionOutcome, PracticeServiceError> {
        let action = PracticeAction::AddNote(self.note_draft.clone());
        let outcome = self.run(service, &action)?;
        if outcome.was_applied() {
            self.note_draft.clear();
        }
        Ok(outcome)
    }

    fn run<S: KeyValueStore>(
        &mut self,
        service: &PracticeService<S>,
        action: &PracticeAction,
    ) -> Result<ActionOutcome, PracticeServiceError> {
        let outcome = service.apply(&self.verse.id, action)?;
        if outcome.record.current_step != self.progress.current_step {
            self.show_text = shows_text_in(outcome.record.current_step);
        }
        self.progress = outcome.record.clone();
        Ok(outcome)
    }
}

fn shows_text_in(step: PracticeStep) -> bool {
    step != PracticeStep::Reciting
}
