//! flashfiles: markdown note ingestion and Leitner-box flashcard engine
//!
//! The pipeline runs raw markdown through front matter parsing, a four-tier
//! question/answer extraction, and tag collection to produce a `ParsedNote`;
//! the import reconciler hashes that note and commits it against the store,
//! deduplicating by content identity rather than filename. The committed
//! collection feeds wiki-link resolution and the Leitner review scheduler.
//!
//! Parsing, hashing, resolving, and queue construction are pure functions;
//! persistence goes through the `Store` trait and the caller owns
//! serialization of rating actions against a single review queue.

pub mod backup;
pub mod cards;
pub mod import;
pub mod markdown;
pub mod review;
pub mod store;
pub mod wiki;

pub use backup::{
    export_backup, parse_backup, restore_backup, Backup, BackupError, RestoreMode, RestoreSummary,
};
pub use cards::{
    add_tag_to_cards, edit_card, now_millis, remove_tag_from_cards, Card, CardEdit, EditError,
    ImportRecord, ParsedNote,
};
pub use import::{
    commit_import, content_hash, evaluate_candidate, import_files, CandidateStatus, ImportAction,
    ImportCandidate, ImportError, ImportFile, ImportFileError, ImportOutcome, ImportReport,
};
pub use markdown::parse_note;
pub use review::{
    build_review_queue, next_box_and_due, NextReview, Rating, ReviewSession, SessionError,
    SessionPhase,
};
pub use store::{MemoryStore, Store, StoreError};
pub use wiki::{extract_wiki_links, resolve_wiki_link, WikiLink, WikiLinkResolution};
