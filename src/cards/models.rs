//! Data models shared across parsing, import, and review

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current time as epoch milliseconds, the unit used throughout the
/// persisted data model.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// A flashcard committed to the collection.
///
/// `box_` and `due` stay unset until the card's first review; once a box is
/// assigned, a due timestamp is always present alongside it. Tags are stored
/// lowercased and deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Card {
    /// Opaque unique identifier
    pub id: String,
    pub question: String,
    /// Answer as raw markdown
    pub answer_body: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Creation timestamp (epoch ms)
    pub created_at: i64,
    /// Last modification timestamp (epoch ms)
    pub updated_at: i64,
    /// Leitner box 1..=5, unset until the first review
    #[serde(rename = "box", skip_serializing_if = "Option::is_none")]
    pub box_: Option<i32>,
    /// Next review timestamp (epoch ms), present iff `box_` is present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<i64>,
}

impl Card {
    /// Create a fresh, never-reviewed card with a minted id.
    pub fn new(question: String, answer_body: String, tags: Vec<String>, now: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            question,
            answer_body,
            tags,
            created_at: now,
            updated_at: now,
            box_: None,
            due: None,
        }
    }

    /// Whether the card has entered the review cycle.
    pub fn is_reviewed(&self) -> bool {
        self.box_.is_some()
    }
}

/// Ledger entry mapping imported content to the card it produced.
///
/// The identity key is the content hash, not the filename, so a renamed but
/// otherwise identical note is still recognized as a duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecord {
    pub file_name: String,
    pub content_hash: String,
    pub card_id: String,
    pub created_at: i64,
}

/// Immutable output of parsing a markdown note.
///
/// Discarded once the import decision for the note has been committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedNote {
    pub question: String,
    #[serde(rename = "answerMD")]
    pub answer_md: String,
    pub tags: Vec<String>,
}
