//! YAML front-matter parsing.
//!
//! A document opens with a `---` line, a YAML mapping, and a closing `---`
//! line; everything after that is the body, which this crate never reads:
//!
//! ```text
//! ---
//! title: Night walk in Kyoto
//! date: 2023-04-01
//! keywords: travel, japan
//! thumbnail: /images/kyoto/main.png
//! ---
//!
//! Body text...
//! ```
//!
//! Field lookup is deliberately loose: the extractor decides which keys are
//! required, so this module only reports *whether* a key is present and what
//! it says.

use serde_yaml::{Mapping, Value};
use thiserror::Error;

const DELIMITER: &str = "---";

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("invalid front matter: {0}")]
    Invalid(String),
    #[error("invalid front matter YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Parsed header fields of one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    pub fields: Mapping,
}

impl Frontmatter {
    /// Raw YAML value for `key`. `null` counts as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    /// Scalar value for `key` rendered as a string.
    ///
    /// Numbers and booleans are rendered the way YAML wrote them, so
    /// `title: 1984` gives `"1984"`. Sequences and mappings yield `None`.
    pub fn get_str(&self, key: &str) -> Option<String> {
        scalar_to_string(self.get(key)?)
    }
}

/// Render a YAML scalar as a string.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Parse the front-matter mapping at the top of `content`.
///
/// A document without a leading `---` line has no front matter and yields an
/// empty mapping.
pub fn parse_frontmatter(content: &str) -> Result<Frontmatter, FrontmatterError> {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();

    let Some(rest) = strip_delimiter_line(trimmed) else {
        return Ok(Frontmatter::default());
    };

    let header = split_at_closing_delimiter(rest)
        .ok_or_else(|| FrontmatterError::Invalid("missing closing delimiter (---)".into()))?;

    let fields = if header.trim().is_empty() {
        Mapping::new()
    } else {
        match serde_yaml::from_str::<Value>(header)? {
            Value::Mapping(map) => map,
            Value::Null => Mapping::new(),
            _ => {
                return Err(FrontmatterError::Invalid(
                    "header is not a key/value mapping".into(),
                ));
            }
        }
    };

    Ok(Frontmatter { fields })
}

/// If `text` starts with a `---` line, return what follows that line.
fn strip_delimiter_line(text: &str) -> Option<&str> {
    let after = text.strip_prefix(DELIMITER)?;
    let (line_rest, remainder) = match after.find('\n') {
        Some(i) => (&after[..i], &after[i + 1..]),
        None => (after, ""),
    };
    line_rest.trim().is_empty().then_some(remainder)
}

/// Find the first line that is exactly `---` (ignoring trailing whitespace)
/// and return the header before it.
fn split_at_closing_delimiter(text: &str) -> Option<&str> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            return Some(&text[..offset]);
        }
        offset += line.len();
    }
    None
}
