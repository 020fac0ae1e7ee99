//! Core data model for the flashcard engine
//!
//! This module provides:
//! - `Card`: a committed flashcard with optional review state
//! - `ImportRecord`: the content-hash dedup ledger entry
//! - `ParsedNote`: the transient output of markdown parsing
//! - manual editing and bulk tag operations over committed cards

pub mod edit;
mod models;

pub use edit::{add_tag_to_cards, edit_card, remove_tag_from_cards, CardEdit, EditError};
pub use models::*;
