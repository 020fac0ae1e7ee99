//! Review queue construction
//!
//! A pure function of (cards, filter, includeNew, budget, now): due cards
//! first, ordered by box then due date then recency, followed by up to
//! `new_budget` never-reviewed cards in pool order.

use crate::cards::Card;

/// Build the ordered list of card ids for a review session.
///
/// The tag filter is an AND over case-insensitive tags. Due cards are those
/// with an assigned box whose due timestamp has passed, sorted ascending by
/// box, then ascending by due, then descending by `updated_at`. New cards
/// keep their pool order and are appended after every due card.
pub fn build_review_queue(
    cards: &[Card],
    tag_filter: &[String],
    include_new: bool,
    new_budget: usize,
    now: i64,
) -> Vec<String> {
    let filter: Vec<String> = tag_filter
        .iter()
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect();

    let pool: Vec<&Card> = cards
        .iter()
        .filter(|card| {
            filter
                .iter()
                .all(|wanted| card.tags.iter().any(|tag| tag.to_lowercase() == *wanted))
        })
        .collect();

    let mut due: Vec<&Card> = pool
        .iter()
        .copied()
        .filter(|card| card.is_reviewed() && card.due.is_some_and(|due| due <= now))
        .collect();
    due.sort_by(|a, b| {
        a.box_
            .cmp(&b.box_)
            .then(a.due.cmp(&b.due))
            .then(b.updated_at.cmp(&a.updated_at))
    });

    let mut queue: Vec<String> = due.iter().map(|card| card.id.clone()).collect();

    if include_new {
        queue.extend(
            pool.iter()
                .filter(|card| !card.is_reviewed())
                .take(new_budget)
                .map(|card| card.id.clone()),
        );
    }

    queue
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, tags: &[&str]) -> Card {
        let mut card = Card::new(
            format!("Q {id}"),
            "A".to_string(),
            tags.iter().map(|t| t.to_string()).collect(),
            1_000,
        );
        card.id = id.to_string();
        card
    }

    fn due_card(id: &str, tags: &[&str], box_: i32, due: i64, updated_at: i64) -> Card {
        let mut card = card(id, tags);
        card.box_ = Some(box_);
        card.due = Some(due);
        card.updated_at = updated_at;
        card
    }

    #[test]
    fn test_due_before_new_with_budget() {
        // Three due and five untouched cards, all tagged "gita"
        let mut cards = vec![
            due_card("due-b2", &["gita"], 2, 50, 0),
            due_card("due-b1", &["gita"], 1, 80, 0),
            due_card("due-b3", &["gita"], 3, 10, 0),
        ];
        for i in 0..5 {
            cards.push(card(&format!("new-{i}"), &["gita"]));
        }

        let queue = build_review_queue(&cards, &["gita".to_string()], true, 2, 100);

        assert_eq!(
            queue,
            vec!["due-b1", "due-b2", "due-b3", "new-0", "new-1"]
        );
    }

    #[test]
    fn test_tag_filter_is_case_insensitive_and_conjunctive() {
        let cards = vec![
            due_card("both", &["gita", "soul"], 1, 0, 0),
            due_card("only-gita", &["gita"], 1, 0, 0),
        ];

        let queue = build_review_queue(
            &cards,
            &["Gita".to_string(), "SOUL".to_string()],
            false,
            0,
            100,
        );
        assert_eq!(queue, vec!["both"]);
    }

    #[test]
    fn test_not_yet_due_cards_excluded() {
        let cards = vec![
            due_card("ready", &[], 1, 100, 0),
            due_card("later", &[], 1, 101, 0),
        ];
        let queue = build_review_queue(&cards, &[], false, 0, 100);
        assert_eq!(queue, vec!["ready"]);
    }

    #[test]
    fn test_due_ordering_box_then_due_then_recency() {
        let cards = vec![
            due_card("b1-late", &[], 1, 90, 0),
            due_card("b1-early", &[], 1, 10, 0),
            due_card("b1-tie-stale", &[], 1, 50, 5),
            due_card("b1-tie-fresh", &[], 1, 50, 9),
            due_card("b2", &[], 2, 1, 0),
        ];

        let queue = build_review_queue(&cards, &[], false, 0, 100);
        assert_eq!(
            queue,
            vec!["b1-early", "b1-tie-fresh", "b1-tie-stale", "b1-late", "b2"]
        );
    }

    #[test]
    fn test_new_cards_keep_pool_order() {
        let cards = vec![card("n1", &[]), card("n2", &[]), card("n3", &[])];
        let queue = build_review_queue(&cards, &[], true, 10, 100);
        assert_eq!(queue, vec!["n1", "n2", "n3"]);
    }

    #[test]
    fn test_include_new_false_drops_new_cards() {
        let cards = vec![card("n1", &[]), due_card("d1", &[], 1, 0, 0)];
        let queue = build_review_queue(&cards, &[], false, 10, 100);
        assert_eq!(queue, vec!["d1"]);
    }

    #[test]
    fn test_zero_budget_means_no_new_cards() {
        let cards = vec![card("n1", &[])];
        let queue = build_review_queue(&cards, &[], true, 0, 100);
        assert!(queue.is_empty());
    }
}
