//! Leitner Box Scheduling
//!
//! Deterministic state transition over boxes 1..=5:
//! - "again" sends the card back to box 1, due immediately
//! - "good" moves it up one box
//! - "easy" moves it up two boxes
//!
//! The interval to the next review depends only on the box the card lands
//! in: 1 day for boxes 1 and 2, then 3, 7, and 21 days.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Lowest Leitner box
pub const MIN_BOX: i32 = 1;
/// Highest Leitner box
pub const MAX_BOX: i32 = 5;

/// Review interval in days, indexed by (box - 1)
const INTERVAL_DAYS: [i64; 5] = [1, 1, 3, 7, 21];

/// Reviewer rating for a shown answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Again,
    Good,
    Easy,
}

/// Result of one Leitner transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextReview {
    /// New box, 1..=5
    pub box_: i32,
    /// Next review timestamp (epoch ms)
    pub due: i64,
}

/// Interval in days for a given box, input clamped into range.
pub fn box_interval_days(box_: i32) -> i64 {
    INTERVAL_DAYS[(box_.clamp(MIN_BOX, MAX_BOX) - 1) as usize]
}

/// Compute the next box and due timestamp for a review.
///
/// A card that was never reviewed starts from box 1. Out-of-range previous
/// boxes are clamped rather than rejected. "again" is due immediately; the
/// other ratings are due after the new box's interval.
pub fn next_box_and_due(prev_box: Option<i32>, rating: Rating, now: i64) -> NextReview {
    let prev = prev_box.unwrap_or(MIN_BOX).clamp(MIN_BOX, MAX_BOX);

    match rating {
        Rating::Again => NextReview {
            box_: MIN_BOX,
            due: now,
        },
        Rating::Good => schedule(prev + 1, now),
        Rating::Easy => schedule(prev + 2, now),
    }
}

fn schedule(new_box: i32, now: i64) -> NextReview {
    let box_ = new_box.clamp(MIN_BOX, MAX_BOX);
    let interval = Duration::days(box_interval_days(box_));
    NextReview {
        box_,
        due: now + interval.num_milliseconds(),
    }
}

/// Apply a rating to a card in place, stamping its review state.
pub fn apply_rating(card: &mut Card, rating: Rating, now: i64) -> NextReview {
    let next = next_box_and_due(card.box_, rating, now);
    card.box_ = Some(next.box_);
    card.due = Some(next.due);
    card.updated_at = now;
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY_MS: i64 = 24 * 60 * 60 * 1000;

    #[test]
    fn test_again_resets_to_box_one_due_now() {
        for prev in 1..=5 {
            let next = next_box_and_due(Some(prev), Rating::Again, 10_000);
            assert_eq!(next.box_, 1);
            assert_eq!(next.due, 10_000);
        }
    }

    #[test]
    fn test_good_moves_up_one_box() {
        let next = next_box_and_due(Some(2), Rating::Good, 0);
        assert_eq!(next.box_, 3);
        assert_eq!(next.due, 3 * DAY_MS);
    }

    #[test]
    fn test_easy_moves_up_two_boxes() {
        let next = next_box_and_due(Some(2), Rating::Easy, 0);
        assert_eq!(next.box_, 4);
        assert_eq!(next.due, 7 * DAY_MS);
    }

    #[test]
    fn test_no_overflow_past_top_box() {
        assert_eq!(next_box_and_due(Some(5), Rating::Easy, 0).box_, 5);
        assert_eq!(next_box_and_due(Some(5), Rating::Good, 0).box_, 5);
        assert_eq!(next_box_and_due(Some(4), Rating::Easy, 0).box_, 5);
    }

    #[test]
    fn test_unreviewed_card_starts_from_box_one() {
        let next = next_box_and_due(None, Rating::Good, 0);
        assert_eq!(next.box_, 2);
        assert_eq!(next.due, DAY_MS);
    }

    #[test]
    fn test_out_of_range_previous_box_clamped() {
        assert_eq!(next_box_and_due(Some(0), Rating::Good, 0).box_, 2);
        assert_eq!(next_box_and_due(Some(99), Rating::Good, 0).box_, 5);
        assert_eq!(next_box_and_due(Some(-3), Rating::Again, 7).due, 7);
    }

    #[test]
    fn test_interval_table() {
        assert_eq!(box_interval_days(1), 1);
        assert_eq!(box_interval_days(2), 1);
        assert_eq!(box_interval_days(3), 3);
        assert_eq!(box_interval_days(4), 7);
        assert_eq!(box_interval_days(5), 21);
    }

    #[test]
    fn test_apply_rating_stamps_card() {
        let mut card = Card::new("Q".to_string(), "A".to_string(), vec![], 0);
        let next = apply_rating(&mut card, Rating::Easy, 1_000);

        assert_eq!(card.box_, Some(next.box_));
        assert_eq!(card.due, Some(next.due));
        assert_eq!(card.updated_at, 1_000);
        assert_eq!(next.box_, 3);
    }
}
