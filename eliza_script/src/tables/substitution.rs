//! Substitution table - word-level rewrites applied before matching.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maps a case-folded trigger word to its replacement.
///
/// Replacements are stored as written; a replacement may contain several
/// words (e.g. `"i'm"` -> `"you are"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, String>", into = "HashMap<String, String>")]
pub struct SubstitutionTable {
    entries: HashMap<String, String>,
}

impl SubstitutionTable {
    /// Create a new empty substitution table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a substitution.
    pub fn insert(&mut self, trigger: impl AsRef<str>, replacement: impl Into<String>) {
        self.entries
            .insert(trigger.as_ref().to_lowercase(), replacement.into());
    }

    /// Builder-style variant of [`SubstitutionTable::insert`].
    pub fn with(mut self, trigger: impl AsRef<str>, replacement: impl Into<String>) -> Self {
        self.insert(trigger, replacement);
        self
    }

    /// Get the replacement for a word, ignoring the word's case.
    pub fn get(&self, word: &str) -> Option<&str> {
        self.entries.get(&word.to_lowercase()).map(String::as_str)
    }

    /// Get the number of substitutions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<HashMap<String, String>> for SubstitutionTable {
    fn from(raw: HashMap<String, String>) -> Self {
        let mut table = SubstitutionTable::new();
        for (trigger, replacement) in raw {
            table.insert(trigger, replacement);
        }
        table
    }
}

impl From<SubstitutionTable> for HashMap<String, String> {
    fn from(table: SubstitutionTable) -> Self {
        table.entries
    }
}
