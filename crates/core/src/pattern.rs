//! Regex-based key filtering
//!
//! Patterns are searched, not anchored: `txt` matches `notes.txt.bak`.
//! Users who want whole-key semantics write `^...$` themselves.

use regex::Regex;

use crate::error::{Error, Result};
use crate::traits::ListResult;

/// A compiled, user-supplied key pattern
#[derive(Debug, Clone)]
pub struct KeyPattern {
    compiled: Regex,
}

impl KeyPattern {
    /// Compile a pattern
    ///
    /// Returns [`Error::Pattern`] if the expression is malformed.
    pub fn new(pattern: &str) -> Result<Self> {
        let compiled = Regex::new(pattern).map_err(|e| Error::Pattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self { compiled })
    }

    /// Get the original pattern string
    pub fn as_str(&self) -> &str {
        self.compiled.as_str()
    }

    /// Check whether the pattern occurs anywhere in `key`
    pub fn matches(&self, key: &str) -> bool {
        self.compiled.is_match(key)
    }

    /// Keys of `listing` that match, in listing order
    pub fn filter(&self, listing: &ListResult) -> Vec<String> {
        listing
            .keys()
            .filter(|key| self.matches(key))
            .map(str::to_string)
            .collect()
    }
}

impl std::fmt::Display for KeyPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
