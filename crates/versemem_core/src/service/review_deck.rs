//! Flashcard review deck.
//!
//! # Invariants
//! - `order` is always a permutation of the verses the deck was built from.
//! - The cursor stays in range whenever the deck is non-empty.
//! - Moving between cards hides the verse text again.

use crate::model::progress::ProgressRecord;
use crate::model::verse::Verse;
use crate::repo::progress_repo::ProgressStore;
use crate::storage::KeyValueStore;
use uuid::Uuid;

/// Card shown to the user: verse plus its current progress, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewCard {
    pub verse: Verse,
    pub progress: Option<ProgressRecord>,
    /// 1-based position in the deck.
    pub position: usize,
    pub total: usize,
}

/// Navigable flashcard sequence over a verse snapshot.
#[derive(Debug, Clone)]
pub struct ReviewDeck {
    verses: Vec<Verse>,
    order: Vec<Verse>,
    index: usize,
    show_text: bool,
    shuffled: bool,
}

impl ReviewDeck {
    pub fn new(verses: Vec<Verse>) -> Self {
        Self {
            order: verses.clone(),
            verses,
            index: 0,
            show_text: false,
            shuffled: false,
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Verse> {
        self.order.get(self.index)
    }

    /// Current verse with its progress snapshot read from `store`.
    pub fn current_card<S: KeyValueStore>(&self, store: &ProgressStore<S>) -> Option<ReviewCard> {
        let verse = self.current()?.clone();
        let progress = store.get_progress(&verse.id);
        Some(ReviewCard {
            verse,
            progress,
            position: self.index + 1,
            total: self.len(),
        })
    }

    pub fn order(&self) -> &[Verse] {
        &self.order
    }

    pub fn is_text_visible(&self) -> bool {
        self.show_text
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    pub fn toggle_text(&mut self) {
        self.show_text = !self.show_text;
    }

    /// Advances with wrap-around.
    pub fn next(&mut self) {
        if self.is_empty() {
            return;
        }
        self.index = (self.index + 1) % self.len();
        self.show_text = false;
    }

    /// Steps back with wrap-around.
    pub fn previous(&mut self) {
        if self.is_empty() {
            return;
        }
        self.index = (self.index + self.len() - 1) % self.len();
        self.show_text = false;
    }

    /// Jumps to a 0-based position; out-of-range positions are ignored.
    pub fn jump_to(&mut self, index: usize) {
        if index < self.len() {
            self.index = index;
            self.show_text = false;
        }
    }

    /// Randomizes card order and restarts from the first card.
    pub fn shuffle(&mut self) {
        self.order.sort_by_cached_key(|_| Uuid::new_v4());
        self.restart();
        self.shuffled = true;
    }

    /// Restores the original order and restarts from the first card.
    pub fn reset(&mut self) {
        self.order = self.verses.clone();
        self.restart();
        self.shuffled = false;
    }

    fn restart(&mut self) {
        self.index = 0;
        self.show_text = false;
    }
}
