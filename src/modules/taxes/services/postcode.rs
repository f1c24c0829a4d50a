use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// Glob-style postcode pattern
///
/// `*` matches any run of characters (including none) and `?` exactly one.
/// Everything else is literal. Matching ignores case and surrounding
/// whitespace on both sides. Serialized as the glob text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostcodePattern {
    raw: String,
    regex: Regex,
}

impl PostcodePattern {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AppError::invalid_context("Postcode pattern cannot be empty"));
        }

        let mut expr = String::with_capacity(trimmed.len() + 8);
        expr.push_str("(?i)^");
        let mut literal = String::new();
        for ch in trimmed.chars() {
            match ch {
                '*' | '?' => {
                    expr.push_str(&regex::escape(&literal));
                    literal.clear();
                    expr.push_str(if ch == '*' { ".*" } else { "." });
                }
                _ => literal.push(ch),
            }
        }
        expr.push_str(&regex::escape(&literal));
        expr.push('$');

        let regex = Regex::new(&expr).map_err(|e| {
            AppError::invalid_context(format!("Invalid postcode pattern {}: {}", raw, e))
        })?;

        Ok(Self {
            raw: trimmed.to_string(),
            regex,
        })
    }

    pub fn matches(&self, postcode: &str) -> bool {
        self.regex.is_match(postcode.trim())
    }
}

impl PartialEq for PostcodePattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl TryFrom<String> for PostcodePattern {
    type Error = AppError;

    fn try_from(raw: String) -> Result<Self> {
        Self::parse(&raw)
    }
}

impl From<PostcodePattern> for String {
    fn from(pattern: PostcodePattern) -> Self {
        pattern.raw
    }
}
