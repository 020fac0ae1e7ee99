//! Persistence collaborator contract
//!
//! The engine never talks to a concrete backend directly; it goes through
//! the `Store` trait. Implementations must offer read-your-writes
//! consistency for the reconciler's read-then-write dedup check. No
//! cross-file transactional guarantees are expected.

mod memory;

pub use memory::MemoryStore;

use thiserror::Error;

use crate::cards::{Card, ImportRecord};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Card and import-record persistence.
pub trait Store {
    fn get_card(&self, id: &str) -> Result<Option<Card>>;

    /// Insert or update a card by id.
    fn put_card(&mut self, card: Card) -> Result<()>;

    fn delete_card(&mut self, id: &str) -> Result<()>;

    /// All cards in stable collection order.
    fn list_cards(&self) -> Result<Vec<Card>>;

    /// Swap the entire card collection. Destructive; callers must treat this
    /// as an explicitly requested replace, never a merge.
    fn replace_all_cards(&mut self, cards: Vec<Card>) -> Result<()>;

    fn find_import_record_by_hash(&self, hash: &str) -> Result<Option<ImportRecord>>;

    /// Insert or update the import record keyed by its content hash.
    fn put_import_record(&mut self, record: ImportRecord) -> Result<()>;
}
