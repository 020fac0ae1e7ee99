//! Versioned backup export and restore
//!
//! The backup file is a single JSON object carrying a schema version, an
//! export timestamp, and the full card collection. Restoration validates
//! every record and reports failures as a bounded list instead of aborting
//! on the first bad card. Merging into the existing collection and
//! replacing it wholesale are two distinctly named operations; replace is
//! never implied.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::Card;
use crate::markdown::normalize_tags;
use crate::store::{Store, StoreError};

/// Backup format version this build reads and writes.
pub const SCHEMA_VERSION: u32 = 1;

/// Ceiling on reported validation errors; the rest collapse into a
/// trailing "+N more" entry.
const MAX_REPORTED_ERRORS: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub schema_version: u32,
    /// Export timestamp (epoch ms)
    pub exported_at: i64,
    pub cards: Vec<Card>,
}

impl Backup {
    pub fn to_json(&self) -> Result<String, BackupError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Error, Debug)]
pub enum BackupError {
    #[error("invalid backup JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported backup schema version {0}")]
    UnsupportedVersion(u64),

    #[error("invalid backup: {}", .errors.join("; "))]
    Invalid { errors: Vec<String> },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// How restored cards meet the existing collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreMode {
    /// Upsert each backup card by id, leaving other cards alone
    Merge,
    /// Swap the whole collection for the backup's cards. Destructive; must
    /// be an explicit caller choice.
    ReplaceAll,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreSummary {
    pub restored: usize,
    pub mode: RestoreMode,
}

/// Snapshot the card collection into a backup object.
pub fn export_backup(cards: Vec<Card>, now: i64) -> Backup {
    Backup {
        schema_version: SCHEMA_VERSION,
        exported_at: now,
        cards,
    }
}

/// Decode and validate a backup file.
///
/// Structural problems (wrong root shape, bad version) fail immediately.
/// Card records are validated individually so one corrupt record does not
/// mask the rest; messages are capped at ten plus a summary line. Tags are
/// normalized on the way in so the card invariant holds regardless of what
/// the file contained.
pub fn parse_backup(json: &str) -> Result<Backup, BackupError> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    let root = value
        .as_object()
        .ok_or_else(|| invalid(vec!["backup root must be a JSON object".to_string()]))?;

    let version = root
        .get("schemaVersion")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| invalid(vec!["schemaVersion missing or not an integer".to_string()]))?;
    if version != SCHEMA_VERSION as u64 {
        return Err(BackupError::UnsupportedVersion(version));
    }

    let exported_at = root
        .get("exportedAt")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| invalid(vec!["exportedAt missing or not an integer".to_string()]))?;

    let records = root
        .get("cards")
        .and_then(|v| v.as_array())
        .ok_or_else(|| invalid(vec!["cards missing or not an array".to_string()]))?;

    let mut cards = Vec::with_capacity(records.len());
    let mut errors = Vec::new();

    for (index, record) in records.iter().enumerate() {
        match serde_json::from_value::<Card>(record.clone()) {
            Ok(mut card) => match validate_card(&card) {
                Ok(()) => {
                    card.tags = normalize_tags(card.tags);
                    cards.push(card);
                }
                Err(message) => errors.push(format!("card {index}: {message}")),
            },
            Err(err) => errors.push(format!("card {index}: {err}")),
        }
    }

    if !errors.is_empty() {
        return Err(invalid(errors));
    }

    Ok(Backup {
        schema_version: SCHEMA_VERSION,
        exported_at,
        cards,
    })
}

fn validate_card(card: &Card) -> Result<(), String> {
    if card.id.trim().is_empty() {
        return Err("id must not be empty".to_string());
    }
    if card.question.trim().is_empty() {
        return Err("question must not be empty".to_string());
    }
    match (card.box_, card.due) {
        (Some(box_), _) if !(1..=5).contains(&box_) => {
            Err(format!("box {box_} outside the range 1..=5"))
        }
        (Some(_), None) => Err("due missing for a card with a box".to_string()),
        (None, Some(_)) => Err("due present without a box".to_string()),
        _ => Ok(()),
    }
}

fn invalid(mut errors: Vec<String>) -> BackupError {
    if errors.len() > MAX_REPORTED_ERRORS {
        let extra = errors.len() - MAX_REPORTED_ERRORS;
        errors.truncate(MAX_REPORTED_ERRORS);
        errors.push(format!("+{extra} more"));
    }
    BackupError::Invalid { errors }
}

/// Restore a validated backup into the store.
pub fn restore_backup(
    store: &mut dyn Store,
    backup: Backup,
    mode: RestoreMode,
) -> Result<RestoreSummary, BackupError> {
    let restored = backup.cards.len();

    match mode {
        RestoreMode::ReplaceAll => {
            log::info!("replacing card collection with {restored} restored cards");
            store.replace_all_cards(backup.cards)?;
        }
        RestoreMode::Merge => {
            log::info!("merging {restored} restored cards into the collection");
            for card in backup.cards {
                store.put_card(card)?;
            }
        }
    }

    Ok(RestoreSummary { restored, mode })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn card(id: &str, question: &str) -> Card {
        let mut card = Card::new(question.to_string(), "A".to_string(), vec![], 1_000);
        card.id = id.to_string();
        card
    }

    #[test]
    fn test_export_then_parse_roundtrip() {
        let backup = export_backup(vec![card("a", "Q1"), card("b", "Q2")], 42);
        let json = backup.to_json().unwrap();

        let parsed = parse_backup(&json).unwrap();
        assert_eq!(parsed.schema_version, SCHEMA_VERSION);
        assert_eq!(parsed.exported_at, 42);
        assert_eq!(parsed.cards.len(), 2);
    }

    #[test]
    fn test_wrong_schema_version_rejected() {
        let json = r#"{"schemaVersion": 2, "exportedAt": 1, "cards": []}"#;
        let err = parse_backup(json).unwrap_err();
        assert!(matches!(err, BackupError::UnsupportedVersion(2)));
    }

    #[test]
    fn test_bad_records_collected_not_fatal_one_by_one() {
        let json = r#"{
            "schemaVersion": 1,
            "exportedAt": 1,
            "cards": [
                {"id": "ok", "question": "Q", "answerBody": "A", "createdAt": 1, "updatedAt": 1},
                {"id": "", "question": "Q", "answerBody": "A", "createdAt": 1, "updatedAt": 1},
                {"id": "x", "question": "Q", "answerBody": "A", "createdAt": 1, "updatedAt": 1, "box": 9, "due": 5}
            ]
        }"#;
        match parse_backup(json).unwrap_err() {
            BackupError::Invalid { errors } => {
                assert_eq!(errors.len(), 2);
                assert!(errors[0].contains("card 1"));
                assert!(errors[1].contains("card 2"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_error_list_bounded_with_summary() {
        let mut records = Vec::new();
        for _ in 0..25 {
            records.push(serde_json::json!({
                "id": "", "question": "Q", "answerBody": "A", "createdAt": 1, "updatedAt": 1
            }));
        }
        let json = serde_json::json!({
            "schemaVersion": 1,
            "exportedAt": 1,
            "cards": records,
        })
        .to_string();

        match parse_backup(&json).unwrap_err() {
            BackupError::Invalid { errors } => {
                assert_eq!(errors.len(), 11);
                assert_eq!(errors.last().unwrap(), "+15 more");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_box_without_due_rejected() {
        let json = r#"{
            "schemaVersion": 1,
            "exportedAt": 1,
            "cards": [
                {"id": "x", "question": "Q", "answerBody": "A", "createdAt": 1, "updatedAt": 1, "box": 3}
            ]
        }"#;
        assert!(matches!(
            parse_backup(json).unwrap_err(),
            BackupError::Invalid { .. }
        ));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let json = r#"{
            "schemaVersion": 1,
            "exportedAt": 1,
            "cards": [
                {"id": "x", "question": "Q", "answerBody": "A", "createdAt": 1, "updatedAt": 1, "surprise": true}
            ]
        }"#;
        assert!(matches!(
            parse_backup(json).unwrap_err(),
            BackupError::Invalid { .. }
        ));
    }

    #[test]
    fn test_restored_tags_are_normalized() {
        let json = r#"{
            "schemaVersion": 1,
            "exportedAt": 1,
            "cards": [
                {"id": "x", "question": "Q", "answerBody": "A", "tags": ["Gita", "gita", " Soul "], "createdAt": 1, "updatedAt": 1}
            ]
        }"#;
        let backup = parse_backup(json).unwrap();
        assert_eq!(backup.cards[0].tags, vec!["gita", "soul"]);
    }

    #[test]
    fn test_merge_upserts_without_touching_others() {
        let mut store = MemoryStore::new();
        store.put_card(card("keep", "Existing")).unwrap();
        store.put_card(card("update", "Old text")).unwrap();

        let backup = export_backup(vec![card("update", "New text"), card("added", "Q")], 1);
        let summary = restore_backup(&mut store, backup, RestoreMode::Merge).unwrap();

        assert_eq!(summary.restored, 2);
        assert_eq!(store.len(), 3);
        assert_eq!(
            store.get_card("update").unwrap().unwrap().question,
            "New text"
        );
        assert!(store.get_card("keep").unwrap().is_some());
    }

    #[test]
    fn test_replace_all_swaps_the_collection() {
        let mut store = MemoryStore::new();
        store.put_card(card("old", "Gone after replace")).unwrap();

        let backup = export_backup(vec![card("fresh", "Q")], 1);
        restore_backup(&mut store, backup, RestoreMode::ReplaceAll).unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.get_card("old").unwrap().is_none());
        assert!(store.get_card("fresh").unwrap().is_some());
    }
}
