//! Restricted front matter parser
//!
//! Extracts a leading `---` delimited block of line-oriented `key: value`
//! pairs. This is intentionally not a YAML parser: no nesting, no multiline
//! scalars. Anything it cannot make sense of is kept as a raw string, and a
//! missing or unclosed block yields no data with the whole input as content.

use std::collections::HashMap;

/// A single front matter value: a raw scalar or a flat list of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontMatterValue {
    Scalar(String),
    List(Vec<String>),
}

/// Parsed front matter data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    data: HashMap<String, FrontMatterValue>,
}

impl FrontMatter {
    pub fn get(&self, key: &str) -> Option<&FrontMatterValue> {
        self.data.get(key)
    }

    /// Scalar value for `key`, if the key holds a scalar.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.data.get(key) {
            Some(FrontMatterValue::Scalar(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The `tags` entry with a scalar coerced to a one-element list.
    pub fn tags(&self) -> Vec<String> {
        match self.data.get("tags") {
            Some(FrontMatterValue::List(items)) => items.clone(),
            Some(FrontMatterValue::Scalar(s)) if !s.trim().is_empty() => vec![s.clone()],
            _ => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Split `raw` into front matter and body content.
///
/// The opening delimiter must be the very first line; the block runs to the
/// next line that is exactly `---`. Malformed input never errors: it comes
/// back as empty data plus the full text as content.
pub fn parse_front_matter(raw: &str) -> (FrontMatter, &str) {
    let mut lines = raw.split_inclusive('\n');

    let opening_len = match lines.next() {
        Some(first) if first.trim_end() == "---" => first.len(),
        _ => return (FrontMatter::default(), raw),
    };

    let mut offset = opening_len;
    for line in lines {
        if line.trim_end() == "---" {
            let block = &raw[opening_len..offset];
            let content = &raw[offset + line.len()..];
            return (parse_block(block), content);
        }
        offset += line.len();
    }

    // Unclosed block: treat the whole input as content
    (FrontMatter::default(), raw)
}

fn parse_block(block: &str) -> FrontMatter {
    let lines: Vec<&str> = block.lines().collect();
    let mut data = HashMap::new();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].trim();
        i += 1;

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some(colon) = line.find(':') else {
            continue;
        };
        let key = line[..colon].trim().to_string();
        let value = strip_quotes(line[colon + 1..].trim());

        if value.len() > 2 && value.starts_with('[') && value.ends_with(']') {
            let items = value[1..value.len() - 1]
                .split(',')
                .map(|item| strip_quotes(item.trim()).to_string())
                .filter(|item| !item.is_empty())
                .collect();
            data.insert(key, FrontMatterValue::List(items));
        } else if value.is_empty() || value == "[]" {
            // A bare key (or a literal []) may introduce a dash-item list on
            // the lines below
            let mut items = Vec::new();
            while i < lines.len() {
                let next = lines[i].trim();
                if let Some(item) = next.strip_prefix('-') {
                    items.push(strip_quotes(item.trim()).to_string());
                    i += 1;
                } else if next.is_empty() {
                    i += 1;
                } else {
                    break;
                }
            }
            if items.is_empty() {
                data.insert(key, FrontMatterValue::Scalar(value.to_string()));
            } else {
                data.insert(key, FrontMatterValue::List(items));
            }
        } else {
            data.insert(key, FrontMatterValue::Scalar(value.to_string()));
        }
    }

    FrontMatter { data }
}

/// Strip one pair of matching surrounding quotes, if present.
fn strip_quotes(s: &str) -> &str {
    if s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')))
    {
        &s[1..s.len() - 1]
    } else {
        s
    }
}
