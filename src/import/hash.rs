//! Content-identity hashing for import dedup

use sha2::{Digest, Sha256};

/// Compute the dedup identity of a parsed note.
///
/// The digest covers the canonical `question + "\n\n" + answer` string, so
/// the same pair hashes identically regardless of filename or tags. This is
/// a dedup identity, not a security primitive.
pub fn content_hash(question: &str, answer_body: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(question.as_bytes());
    hasher.update(b"\n\n");
    hasher.update(answer_body.as_bytes());
    format!("sha256:{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        let h1 = content_hash("What is karma?", "Action and its fruit.");
        let h2 = content_hash("What is karma?", "Action and its fruit.");
        assert_eq!(h1, h2);
        assert!(h1.starts_with("sha256:"));
    }

    #[test]
    fn test_hash_ignores_nothing_but_question_and_answer() {
        let base = content_hash("Q", "A");
        assert_ne!(base, content_hash("Q", "B"));
        assert_ne!(base, content_hash("P", "A"));
    }

    #[test]
    fn test_separator_prevents_boundary_collisions() {
        assert_ne!(content_hash("ab", "c"), content_hash("a", "bc"));
    }
}
