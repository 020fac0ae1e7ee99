//! Manual card edits and bulk tag operations
//!
//! Review state is never touched here: editing changes question, answer,
//! and tags only, and stamps `updated_at`. Bulk operations silently skip
//! ids that no longer resolve to a card.

use thiserror::Error;

use super::Card;
use crate::markdown::normalize_tags;
use crate::store::{Store, StoreError};

#[derive(Error, Debug)]
pub enum EditError {
    #[error("card not found: {0}")]
    CardNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, EditError>;

/// A partial update to a card's editable fields; absent fields keep their
/// current value.
#[derive(Debug, Clone, Default)]
pub struct CardEdit {
    pub question: Option<String>,
    pub answer_body: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Apply an edit to one card and persist it.
pub fn edit_card(store: &mut dyn Store, id: &str, edit: CardEdit, now: i64) -> Result<Card> {
    let mut card = store
        .get_card(id)?
        .ok_or_else(|| EditError::CardNotFound(id.to_string()))?;

    if let Some(question) = edit.question {
        card.question = question;
    }
    if let Some(answer_body) = edit.answer_body {
        card.answer_body = answer_body;
    }
    if let Some(tags) = edit.tags {
        card.tags = normalize_tags(tags);
    }
    card.updated_at = now;

    store.put_card(card.clone())?;
    Ok(card)
}

/// Add a tag to every listed card that does not already hold it.
///
/// Returns the number of cards that changed. Ids without a card are
/// skipped.
pub fn add_tag_to_cards(store: &mut dyn Store, ids: &[String], tag: &str, now: i64) -> Result<usize> {
    let tag = tag.trim().to_lowercase();
    if tag.is_empty() {
        return Ok(0);
    }

    let mut changed = 0;
    for id in ids {
        let Some(mut card) = store.get_card(id)? else {
            continue;
        };
        if card.tags.iter().any(|existing| *existing == tag) {
            continue;
        }
        card.tags.push(tag.clone());
        card.updated_at = now;
        store.put_card(card)?;
        changed += 1;
    }
    Ok(changed)
}

/// Remove a tag from every listed card holding it.
///
/// Returns the number of cards that changed.
pub fn remove_tag_from_cards(
    store: &mut dyn Store,
    ids: &[String],
    tag: &str,
    now: i64,
) -> Result<usize> {
    let tag = tag.trim().to_lowercase();

    let mut changed = 0;
    for id in ids {
        let Some(mut card) = store.get_card(id)? else {
            continue;
        };
        let before = card.tags.len();
        card.tags.retain(|existing| *existing != tag);
        if card.tags.len() == before {
            continue;
        }
        card.updated_at = now;
        store.put_card(card)?;
        changed += 1;
    }
    Ok(changed)
}
