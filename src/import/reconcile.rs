//! Import reconciliation
//!
//! Decides whether a parsed note is new or a duplicate of previously
//! imported content, and commits the decision against the store. Identity
//! is the content hash; the filename only travels along for the ledger.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::hash::content_hash;
use crate::cards::{Card, ImportRecord, ParsedNote};
use crate::store::{Store, StoreError};

#[derive(Error, Debug)]
pub enum ImportError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("card not found: {0}")]
    CardNotFound(String),
}

pub type Result<T> = std::result::Result<T, ImportError>;

/// What the reconciler found for a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum CandidateStatus {
    /// Content hash unseen (or its card has since been deleted)
    New,
    /// Content hash already maps to a live card
    Duplicate { existing_id: String },
}

/// How to commit a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImportAction {
    /// Leave the existing card untouched
    Skip,
    /// Update the existing card's content in place, keeping its id and
    /// review progress
    Overwrite,
    /// Mint a new card, ignoring the match
    Duplicate,
}

/// An evaluated, not yet committed, import candidate.
#[derive(Debug, Clone)]
pub struct ImportCandidate {
    pub note: ParsedNote,
    pub file_name: String,
    pub content_hash: String,
    pub status: CandidateStatus,
}

impl ImportCandidate {
    pub fn is_duplicate(&self) -> bool {
        matches!(self.status, CandidateStatus::Duplicate { .. })
    }

    /// The action taken when the caller expresses no preference: duplicates
    /// are skipped, new candidates are committed as fresh cards.
    pub fn default_action(&self) -> ImportAction {
        match self.status {
            CandidateStatus::New => ImportAction::Duplicate,
            CandidateStatus::Duplicate { .. } => ImportAction::Skip,
        }
    }
}

/// Result of committing one candidate.
#[derive(Debug, Clone)]
pub enum ImportOutcome {
    Created(Card),
    Overwritten(Card),
    Skipped(Card),
}

impl ImportOutcome {
    pub fn card(&self) -> &Card {
        match self {
            Self::Created(card) | Self::Overwritten(card) | Self::Skipped(card) => card,
        }
    }
}

/// Hash a parsed note and classify it against the import ledger.
///
/// A ledger hit whose card no longer exists counts as new: the record is
/// stale and will be re-pointed on commit.
pub fn evaluate_candidate(
    store: &dyn Store,
    note: ParsedNote,
    file_name: &str,
) -> Result<ImportCandidate> {
    let hash = content_hash(&note.question, &note.answer_md);

    let status = match store.find_import_record_by_hash(&hash)? {
        Some(record) => match store.get_card(&record.card_id)? {
            Some(card) => CandidateStatus::Duplicate { existing_id: card.id },
            None => CandidateStatus::New,
        },
        None => CandidateStatus::New,
    };

    Ok(ImportCandidate {
        note,
        file_name: file_name.to_string(),
        content_hash: hash,
        status,
    })
}

/// Commit a candidate with the given action.
///
/// New candidates always produce a new card, whatever the action. Every
/// path that writes a card also writes the ledger entry for the candidate's
/// content hash, so a later import of the same content finds it.
pub fn commit_import(
    store: &mut dyn Store,
    candidate: &ImportCandidate,
    action: ImportAction,
    now: i64,
) -> Result<ImportOutcome> {
    match (&candidate.status, action) {
        (CandidateStatus::Duplicate { existing_id }, ImportAction::Skip) => {
            let card = store
                .get_card(existing_id)?
                .ok_or_else(|| ImportError::CardNotFound(existing_id.clone()))?;
            log::debug!("skipped duplicate of card {} ({})", card.id, candidate.file_name);
            Ok(ImportOutcome::Skipped(card))
        }
        (CandidateStatus::Duplicate { existing_id }, ImportAction::Overwrite) => {
            let mut card = store
                .get_card(existing_id)?
                .ok_or_else(|| ImportError::CardNotFound(existing_id.clone()))?;

            // Content is refreshed; id, createdAt, and review progress
            // (box/due) stay as they are.
            card.question = candidate.note.question.clone();
            card.answer_body = candidate.note.answer_md.clone();
            card.tags = candidate.note.tags.clone();
            card.updated_at = now;

            store.put_card(card.clone())?;
            write_ledger_entry(store, candidate, &card.id, now)?;
            log::info!("overwrote card {} from {}", card.id, candidate.file_name);
            Ok(ImportOutcome::Overwritten(card))
        }
        _ => {
            // New candidate under any action, or a duplicate the caller
            // chose to import anyway
            let card = Card::new(
                candidate.note.question.clone(),
                candidate.note.answer_md.clone(),
                candidate.note.tags.clone(),
                now,
            );
            store.put_card(card.clone())?;
            write_ledger_entry(store, candidate, &card.id, now)?;
            log::info!("created card {} from {}", card.id, candidate.file_name);
            Ok(ImportOutcome::Created(card))
        }
    }
}

fn write_ledger_entry(
    store: &mut dyn Store,
    candidate: &ImportCandidate,
    card_id: &str,
    now: i64,
) -> Result<()> {
    store.put_import_record(ImportRecord {
        file_name: candidate.file_name.clone(),
        content_hash: candidate.content_hash.clone(),
        card_id: card_id.to_string(),
        created_at: now,
    })?;
    Ok(())
}
