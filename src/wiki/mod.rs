//! Wiki-link extraction and resolution
//!
//! Inline `[[Target]]` and `[[Target|Alias]]` references are resolved
//! against the live card collection through an ordered chain of matching
//! tiers, first success wins:
//!
//! 1. exact case-insensitive match on the raw question
//! 2. exact match on normalized forms
//! 3. substring containment in either direction between normalized forms
//!
//! Tier 3 is deliberately unscored: the first matching card in collection
//! order wins, so the caller's ordering is authoritative. Everything here
//! is pure and read-only, safe to re-run per render.

use regex::Regex;

use crate::cards::Card;

/// One wiki-link occurrence in a markdown body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiLink {
    /// The full `[[...]]` source text
    pub raw: String,
    pub target: String,
    pub alias: Option<String>,
}

/// Result of resolving a wiki-link target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WikiLinkResolution {
    Found {
        id: String,
        question: String,
        tags: Vec<String>,
    },
    NotFound,
}

/// Extract all wiki-links from markdown text, in order of appearance.
pub fn extract_wiki_links(markdown: &str) -> Vec<WikiLink> {
    let link = Regex::new(r"\[\[([^\]|]+)(?:\|([^\]]+))?\]\]").unwrap();

    link.captures_iter(markdown)
        .map(|caps| WikiLink {
            raw: caps[0].to_string(),
            target: caps[1].trim().to_string(),
            alias: caps
                .get(2)
                .map(|m| m.as_str().trim().to_string())
                .filter(|alias| !alias.is_empty()),
        })
        .collect()
}

/// Normalize text for matching: lowercase, `-`/`_` to space, whitespace
/// runs collapsed, trimmed.
fn normalize_for_matching(text: &str) -> String {
    let lowered: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect();
    let runs = Regex::new(r"\s+").unwrap();
    runs.replace_all(&lowered, " ").trim().to_string()
}

/// Resolve a wiki-link target against the card collection.
pub fn resolve_wiki_link(target: &str, cards: &[Card]) -> WikiLinkResolution {
    let matched = try_exact(target, cards)
        .or_else(|| try_normalized(target, cards))
        .or_else(|| try_containment(target, cards));

    match matched {
        Some(card) => WikiLinkResolution::Found {
            id: card.id.clone(),
            question: card.question.clone(),
            tags: card.tags.clone(),
        },
        None => WikiLinkResolution::NotFound,
    }
}

fn try_exact<'a>(target: &str, cards: &'a [Card]) -> Option<&'a Card> {
    let target = target.to_lowercase();
    cards
        .iter()
        .find(|card| card.question.to_lowercase() == target)
}

fn try_normalized<'a>(target: &str, cards: &'a [Card]) -> Option<&'a Card> {
    let target = normalize_for_matching(target);
    cards
        .iter()
        .find(|card| normalize_for_matching(&card.question) == target)
}

fn try_containment<'a>(target: &str, cards: &'a [Card]) -> Option<&'a Card> {
    let target = normalize_for_matching(target);
    cards.iter().find(|card| {
        let question = normalize_for_matching(&card.question);
        question.contains(&target) || target.contains(&question)
    })
}
