//! Spaced repetition review
//!
//! This module provides:
//! - The Leitner box transition algorithm
//! - Review queue construction over the card collection
//! - The per-session state machine that drives a review

pub mod algorithm;
pub mod queue;
pub mod session;

pub use algorithm::{
    apply_rating, box_interval_days, next_box_and_due, NextReview, Rating, MAX_BOX, MIN_BOX,
};
pub use queue::build_review_queue;
pub use session::{ReviewSession, SessionError, SessionPhase};
