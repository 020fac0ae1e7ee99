//! Review session state machine
//!
//! Idle -> Active (queue head showing) -> Complete, with an explicit
//! show-answer gate: a rating is only accepted while the answer is visible.
//! Rating persists the Leitner transition through the store and pops the
//! queue head. Ending a session discards in-memory queue state only; the
//! session holds no locks and expects the caller to serialize ratings
//! against a single queue.

use std::collections::VecDeque;

use thiserror::Error;

use super::algorithm::{apply_rating, Rating};
use crate::cards::Card;
use crate::store::{Store, StoreError};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("no active review session")]
    NotActive,

    #[error("the answer must be shown before rating")]
    AnswerHidden,

    #[error("card not found: {0}")]
    CardNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Active,
    Complete,
}

/// One reviewer's session over a prebuilt queue of card ids.
#[derive(Debug, Default)]
pub struct ReviewSession {
    queue: VecDeque<String>,
    answer_shown: bool,
    reviewed: usize,
    active: bool,
}

impl ReviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a session over a queue (typically from `build_review_queue`).
    ///
    /// An empty queue lands directly in `Complete`: there is no head to
    /// show.
    pub fn start(&mut self, queue: Vec<String>) {
        self.queue = queue.into();
        self.answer_shown = false;
        self.reviewed = 0;
        self.active = true;
    }

    pub fn phase(&self) -> SessionPhase {
        if !self.active {
            SessionPhase::Idle
        } else if self.queue.is_empty() {
            SessionPhase::Complete
        } else {
            SessionPhase::Active
        }
    }

    /// The card currently being reviewed.
    pub fn current(&self) -> Option<&str> {
        if self.active {
            self.queue.front().map(String::as_str)
        } else {
            None
        }
    }

    pub fn answer_shown(&self) -> bool {
        self.answer_shown
    }

    /// Reveal the answer for the current card. Independent of progress; may
    /// be toggled freely.
    pub fn show_answer(&mut self) {
        self.answer_shown = true;
    }

    pub fn hide_answer(&mut self) {
        self.answer_shown = false;
    }

    pub fn reviewed(&self) -> usize {
        self.reviewed
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Rate the current card: persist the Leitner transition and advance to
    /// the next card. Only valid while the answer is shown.
    pub fn rate(&mut self, store: &mut dyn Store, rating: Rating, now: i64) -> Result<Card> {
        if self.phase() != SessionPhase::Active {
            return Err(SessionError::NotActive);
        }
        if !self.answer_shown {
            return Err(SessionError::AnswerHidden);
        }

        // phase() == Active guarantees a head
        let id = match self.queue.front() {
            Some(id) => id.clone(),
            None => return Err(SessionError::NotActive),
        };

        let mut card = store
            .get_card(&id)?
            .ok_or_else(|| SessionError::CardNotFound(id.clone()))?;
        apply_rating(&mut card, rating, now);
        store.put_card(card.clone())?;

        self.queue.pop_front();
        self.reviewed += 1;
        self.answer_shown = false;

        Ok(card)
    }

    /// End the session, discarding any remaining queue. Valid from any
    /// state; a synchronous transition back to Idle.
    pub fn end(&mut self) {
        *self = Self::default();
    }
}
