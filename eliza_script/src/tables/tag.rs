//! Tag table - named word sets usable inside decomposition patterns.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maps a tag name to the words it stands for.
///
/// Names and members are case-folded on insertion. A member may span several
/// words (e.g. `"no one"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "HashMap<String, Vec<String>>",
    into = "HashMap<String, Vec<String>>"
)]
pub struct TagTable {
    tags: HashMap<String, Vec<String>>,
}

impl TagTable {
    /// Create a new empty tag table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a tag.
    pub fn insert(
        &mut self,
        name: impl AsRef<str>,
        members: impl IntoIterator<Item = impl AsRef<str>>,
    ) {
        let members = members
            .into_iter()
            .map(|m| m.as_ref().trim().to_lowercase())
            .filter(|m| !m.is_empty())
            .collect();
        self.tags.insert(name.as_ref().to_lowercase(), members);
    }

    /// Builder-style variant of [`TagTable::insert`].
    pub fn with_tag(
        mut self,
        name: impl AsRef<str>,
        members: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Self {
        self.insert(name, members);
        self
    }

    /// Get the members of a tag. Lookup is case-insensitive.
    pub fn members(&self, name: &str) -> Option<&[String]> {
        self.tags.get(&name.to_lowercase()).map(|v| v.as_slice())
    }

    /// Check if a tag exists.
    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains_key(&name.to_lowercase())
    }

    /// Check if `word` is a member of the named tag.
    pub fn is_member(&self, name: &str, word: &str) -> bool {
        let word = word.to_lowercase();
        self.members(name)
            .map(|members| members.iter().any(|m| *m == word))
            .unwrap_or(false)
    }

    /// Get the number of tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Check if the table has no tags.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl From<HashMap<String, Vec<String>>> for TagTable {
    fn from(raw: HashMap<String, Vec<String>>) -> Self {
        let mut table = TagTable::new();
        for (name, members) in raw {
            table.insert(name, members);
        }
        table
    }
}

impl From<TagTable> for HashMap<String, Vec<String>> {
    fn from(table: TagTable) -> Self {
        table.tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_lookup_is_case_insensitive() {
        let table = TagTable::new().with_tag("Family", ["Mother", "father"]);

        assert!(table.contains("family"));
        assert!(table.contains("FAMILY"));
        assert_eq!(table.members("family").unwrap(), ["mother", "father"]);
    }

    #[test]
    fn test_is_member() {
        let table = TagTable::new().with_tag("sad", ["sad", "unhappy"]);

        assert!(table.is_member("sad", "Unhappy"));
        assert!(!table.is_member("sad", "happy"));
        assert!(!table.is_member("happy", "sad"));
    }

    #[test]
    fn test_multi_word_member_kept() {
        let table = TagTable::new().with_tag("everyone", ["everyone", "no one"]);
        assert!(table.is_member("everyone", "no one"));
    }

    #[test]
    fn test_from_raw_map() {
        let mut raw = HashMap::new();
        raw.insert("DESIRE".to_string(), vec!["Want".to_string(), "need".to_string()]);

        let table = TagTable::from(raw);
        assert_eq!(table.len(), 1);
        assert!(table.is_member("desire", "want"));
    }
}
