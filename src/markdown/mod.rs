//! Markdown note parsing pipeline
//!
//! Turns raw note text into a `ParsedNote`: front matter extraction,
//! question/answer derivation, and tag collection. The whole pipeline is
//! pure and infallible; malformed input degrades to sensible fallbacks
//! instead of errors.

pub mod extract;
pub mod frontmatter;
pub mod tags;

pub use extract::{extract_qa, strip_extension, strip_zk_prefix, NO_CONTENT_PLACEHOLDER};
pub use frontmatter::{parse_front_matter, FrontMatter, FrontMatterValue};
pub use tags::{extract_inline_tags, merge_tags, normalize_tags, strip_code_fences};

use crate::cards::ParsedNote;

/// Parse a raw markdown note into a `ParsedNote`.
///
/// The question/answer pair follows the four-tier fallback in `extract`,
/// front matter tags (array or scalar) are merged with inline hashtags from
/// the answer body, and the result is normalized.
pub fn parse_note(raw: &str, filename: &str) -> ParsedNote {
    let (front, _content) = parse_front_matter(raw);
    let (question, answer_md) = extract_qa(raw, filename);

    let inline = extract_inline_tags(&answer_md);
    let tags = merge_tags(front.tags(), inline);

    ParsedNote {
        question,
        answer_md,
        tags,
    }
}
