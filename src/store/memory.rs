//! In-memory store with optional JSON file persistence
//!
//! Cards keep their insertion order, which is the collection order seen by
//! queue construction and wiki-link resolution. The whole store serializes
//! to a single pretty-printed JSON file for the CLI.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Result, Store};
use crate::cards::{Card, ImportRecord};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStore {
    #[serde(default)]
    cards: Vec<Card>,
    /// Import records keyed by content hash
    #[serde(default)]
    import_records: HashMap<String, ImportRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a JSON file; a missing file is an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Persist the store as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Store for MemoryStore {
    fn get_card(&self, id: &str) -> Result<Option<Card>> {
        Ok(self.cards.iter().find(|card| card.id == id).cloned())
    }

    fn put_card(&mut self, card: Card) -> Result<()> {
        match self.cards.iter_mut().find(|existing| existing.id == card.id) {
            Some(existing) => *existing = card,
            None => self.cards.push(card),
        }
        Ok(())
    }

    fn delete_card(&mut self, id: &str) -> Result<()> {
        self.cards.retain(|card| card.id != id);
        Ok(())
    }

    fn list_cards(&self) -> Result<Vec<Card>> {
        Ok(self.cards.clone())
    }

    fn replace_all_cards(&mut self, cards: Vec<Card>) -> Result<()> {
        self.cards = cards;
        Ok(())
    }

    fn find_import_record_by_hash(&self, hash: &str) -> Result<Option<ImportRecord>> {
        Ok(self.import_records.get(hash).cloned())
    }

    fn put_import_record(&mut self, record: ImportRecord) -> Result<()> {
        self.import_records
            .insert(record.content_hash.clone(), record);
        Ok(())
    }
}
