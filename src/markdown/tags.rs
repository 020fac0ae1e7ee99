//! Tag extraction and normalization
//!
//! Inline `#tags` are scanned from the note body after fenced code regions
//! have been stripped, then merged with front matter tags into one
//! lowercased, deduplicated set.

use regex::Regex;
use std::collections::HashSet;

/// Remove fenced code regions of both fence styles.
///
/// Fences are matched non-overlapping and lazily closed; an unclosed fence
/// is left in place.
pub fn strip_code_fences(markdown: &str) -> String {
    let backtick = Regex::new(r"(?s)```.*?```").unwrap();
    let tilde = Regex::new(r"(?s)~~~.*?~~~").unwrap();

    let stripped = backtick.replace_all(markdown, "");
    tilde.replace_all(&stripped, "").into_owned()
}

/// Extract inline hashtags from markdown content.
///
/// A tag is a `#` at the start of the text or after a character that cannot
/// itself belong to a tag, followed by `[A-Za-z0-9/_-]+`. Hierarchies like
/// `chapter/2` count as one tag. Tags inside code fences are excluded.
pub fn extract_inline_tags(markdown: &str) -> Vec<String> {
    let text = strip_code_fences(markdown);
    let hashtag = Regex::new(r"(^|[^A-Za-z0-9/_-])#([A-Za-z0-9/_-]+)").unwrap();

    let found: Vec<String> = hashtag
        .captures_iter(&text)
        .filter_map(|caps| caps.get(2))
        .map(|m| m.as_str().to_string())
        .collect();

    normalize_tags(found)
}

/// Lowercase and trim each tag, drop empties, and deduplicate keeping the
/// first occurrence.
pub fn normalize_tags<I>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() || !seen.insert(tag.clone()) {
            continue;
        }
        out.push(tag);
    }
    out
}

/// Merge front matter tags with inline tags into one normalized set.
pub fn merge_tags(front_matter: Vec<String>, inline: Vec<String>) -> Vec<String> {
    normalize_tags(front_matter.into_iter().chain(inline))
}
