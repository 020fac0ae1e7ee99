//! Question/answer extraction
//!
//! Derives a (question, answer) pair from a raw note through an ordered
//! chain of fallback tiers, first success wins:
//!
//! 1. front matter `title`
//! 2. first level-1 heading
//! 3. first non-empty line
//! 4. filename, stripped of extension and Zettelkasten prefix
//!
//! The question always comes back non-empty with whitespace runs collapsed,
//! and a blank answer is replaced by a placeholder so downstream consumers
//! never see an empty answer field.

use regex::Regex;

use super::frontmatter::{parse_front_matter, FrontMatter};

/// Stand-in answer for notes whose body is entirely blank.
pub const NO_CONTENT_PLACEHOLDER: &str = "_(No content)_";

/// Extract the (question, answer markdown) pair for a note.
pub fn extract_qa(raw: &str, filename: &str) -> (String, String) {
    let (front, content) = parse_front_matter(raw);

    let (question, answer) = try_front_matter_title(&front, content)
        .or_else(|| try_first_heading(content))
        .or_else(|| try_first_line(content))
        .unwrap_or_else(|| from_filename(filename));

    let question = collapse_whitespace(&question);
    let answer = if answer.trim().is_empty() {
        NO_CONTENT_PLACEHOLDER.to_string()
    } else {
        answer
    };

    (question, answer)
}

/// Tier 1: a non-empty front matter `title`; the answer is the full body.
fn try_front_matter_title(front: &FrontMatter, content: &str) -> Option<(String, String)> {
    let title = front.get_str("title")?.trim();
    if title.is_empty() {
        return None;
    }
    Some((title.to_string(), content.to_string()))
}

/// Tier 2: the first `# Heading` line; removed from the answer.
fn try_first_heading(content: &str) -> Option<(String, String)> {
    let heading = Regex::new(r"^\s*#\s+(.+?)\s*$").unwrap();
    let lines: Vec<&str> = content.lines().collect();
    for (index, line) in lines.iter().enumerate() {
        if let Some(caps) = heading.captures(line) {
            return Some((caps[1].to_string(), remove_line(&lines, index)));
        }
    }
    None
}

/// Tier 3: the first non-empty line; removed from the answer.
fn try_first_line(content: &str) -> Option<(String, String)> {
    let lines: Vec<&str> = content.lines().collect();
    let index = lines.iter().position(|line| !line.trim().is_empty())?;
    Some((lines[index].trim().to_string(), remove_line(&lines, index)))
}

/// Tier 4: the filename, only reached when the body is entirely blank.
fn from_filename(filename: &str) -> (String, String) {
    let stem = strip_extension(filename);
    let mut question = strip_zk_prefix(stem);
    if question.is_empty() {
        question = stem.trim().to_string();
    }
    if question.is_empty() {
        question = "Untitled".to_string();
    }
    (question, String::new())
}

fn remove_line(lines: &[&str], index: usize) -> String {
    lines
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, line)| *line)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Drop a trailing `.ext` (the last dot segment, if it has content and no
/// path separator in it).
pub fn strip_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(index) if index + 1 < filename.len() && !filename[index + 1..].contains('/') => {
            &filename[..index]
        }
        _ => filename,
    }
}

/// Strip a leading Zettelkasten identifier: 8 to 14 digits followed by an
/// optional run of `-`, `_`, or spaces.
pub fn strip_zk_prefix(name: &str) -> String {
    let zk = Regex::new(r"^\d{8,14}[-_ ]*").unwrap();
    zk.replace(name, "").trim().to_string()
}

fn collapse_whitespace(text: &str) -> String {
    let runs = Regex::new(r"\s+").unwrap();
    runs.replace_all(text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_front_matter_title_wins_over_heading() {
        let raw = "---\ntitle: The Title\n---\n# A Heading\n\nBody text";
        let (question, answer) = extract_qa(raw, "note.md");
        assert_eq!(question, "The Title");
        assert!(answer.contains("# A Heading"));
        assert!(answer.contains("Body text"));
    }

    #[test]
    fn test_heading_extracted_and_removed() {
        let raw = "  # What is dharma?  \n\nDuty in harmony with cosmic order.";
        let (question, answer) = extract_qa(raw, "note.md");
        assert_eq!(question, "What is dharma?");
        assert_eq!(answer, "Duty in harmony with cosmic order.");
    }

    #[test]
    fn test_level_two_heading_is_not_a_title() {
        let raw = "## Not a title\nmore";
        let (question, answer) = extract_qa(raw, "note.md");
        // Falls through to the first-line tier
        assert_eq!(question, "## Not a title");
        assert_eq!(answer, "more");
    }

    #[test]
    fn test_first_line_fallback() {
        let raw = "\n\nOpening thought\nSecond line";
        let (question, answer) = extract_qa(raw, "note.md");
        assert_eq!(question, "Opening thought");
        assert_eq!(answer, "Second line");
    }

    #[test]
    fn test_filename_fallback_strips_zk_prefix() {
        let (question, answer) = extract_qa("", "202509301145 Supreme Person.md");
        assert_eq!(question, "Supreme Person");
        assert_eq!(answer, NO_CONTENT_PLACEHOLDER);
    }

    #[test]
    fn test_filename_fallback_with_separator_runs() {
        let (question, _) = extract_qa("   \n\n", "20230101__-_daily-note.md");
        assert_eq!(question, "daily-note");
    }

    #[test]
    fn test_pure_uid_filename_keeps_the_uid() {
        let (question, _) = extract_qa("", "202501011200.md");
        assert_eq!(question, "202501011200");
    }

    #[test]
    fn test_short_digit_prefix_not_treated_as_uid() {
        // 7 digits is below the Zettelkasten range
        assert_eq!(strip_zk_prefix("1234567 note"), "1234567 note");
        assert_eq!(strip_zk_prefix("12345678 note"), "note");
    }

    #[test]
    fn test_question_whitespace_collapsed() {
        let raw = "# What   is\tthe    Self?\nAtman.";
        let (question, _) = extract_qa(raw, "note.md");
        assert_eq!(question, "What is the Self?");
    }

    #[test]
    fn test_blank_answer_gets_placeholder() {
        let raw = "Only a question";
        let (question, answer) = extract_qa(raw, "note.md");
        assert_eq!(question, "Only a question");
        assert_eq!(answer, NO_CONTENT_PLACEHOLDER);
    }

    #[test]
    fn test_question_never_empty() {
        for (raw, filename) in [
            ("", ""),
            ("", ".md"),
            ("", "20250101.md"),
            ("\n\n\n", "   .txt"),
        ] {
            let (question, answer) = extract_qa(raw, filename);
            assert!(!question.trim().is_empty(), "raw={raw:?} file={filename:?}");
            assert!(!answer.trim().is_empty());
        }
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("note.md"), "note");
        assert_eq!(strip_extension("archive.tar.gz"), "archive.tar");
        assert_eq!(strip_extension("no-extension"), "no-extension");
        assert_eq!(strip_extension("trailing-dot."), "trailing-dot.");
    }
}
