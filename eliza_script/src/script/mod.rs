//! Script definitions - the declarative form of a conversation script.
//!
//! A script is an ordered list of keywords, each with a rank and an ordered
//! list of decomposition rules. Two keywords are reserved:
//! - [`GENERIC_KEYWORD`] (`$`) supplies the last-resort reply
//! - [`MEMORY_KEYWORD`] (`^`) supplies replies deferred on the memory stack

mod loader;

pub use loader::*;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{ConfigError, Result};
use crate::tables::{SubstitutionTable, TagTable};

/// Keyword whose catch-all rule produces the generic reply.
pub const GENERIC_KEYWORD: &str = "$";

/// Keyword whose rules produce replies pushed onto the memory stack.
pub const MEMORY_KEYWORD: &str = "^";

/// A decomposition rule as written in the script file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDef {
    /// Pattern in the decomposition mini-language, e.g. `(0 YOU ARE 0)`.
    pub decomp: String,

    /// Reassembly templates, used in rotation.
    #[serde(alias = "answer")]
    pub answers: Vec<String>,
}

impl RuleDef {
    /// Create a new rule definition.
    pub fn new(
        decomp: impl Into<String>,
        answers: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            decomp: decomp.into(),
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }
}

/// A keyword and its rules as written in the script file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordDef {
    pub keyword: String,

    /// Higher ranks are tried first when a sentence holds several keywords.
    #[serde(default)]
    pub rank: i32,

    /// Rules in the order they are tried.
    pub rules: Vec<RuleDef>,
}

impl KeywordDef {
    /// Create a new keyword definition with no rules.
    pub fn new(keyword: impl Into<String>, rank: i32) -> Self {
        Self {
            keyword: keyword.into(),
            rank,
            rules: Vec::new(),
        }
    }

    /// Append a rule.
    pub fn with_rule(mut self, rule: RuleDef) -> Self {
        self.rules.push(rule);
        self
    }
}

/// Fixed texts used by the console around the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleText {
    /// Prefix printed before every reply.
    pub speaker: String,
    pub greeting: String,
    pub farewell: String,
    /// Reply for inputs that contain no letters at all.
    pub invalid_input: String,
}

impl Default for ConsoleText {
    fn default() -> Self {
        Self {
            speaker: "Eliza".to_string(),
            greeting: "Welcome.".to_string(),
            farewell: "Goodbye.".to_string(),
            invalid_input: "Please, use letters. I am human, after all.".to_string(),
        }
    }
}

/// The complete declarative script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptDefinition {
    #[serde(default)]
    pub substitutions: SubstitutionTable,

    #[serde(default)]
    pub tags: TagTable,

    /// Keywords whose selection also pushes a memory reply.
    #[serde(default)]
    pub memory_inputs: Vec<String>,

    /// Inputs that end the conversation.
    #[serde(default)]
    pub exit_inputs: Vec<String>,

    #[serde(default)]
    pub console: ConsoleText,

    pub keywords: Vec<KeywordDef>,
}

impl ScriptDefinition {
    /// Check the structural invariants of the script.
    pub fn validate(&self) -> Result<()> {
        validate_keywords(&self.keywords)
    }

    /// Find a keyword definition (case-insensitive).
    pub fn keyword(&self, keyword: &str) -> Option<&KeywordDef> {
        let keyword = keyword.to_lowercase();
        self.keywords
            .iter()
            .find(|k| k.keyword.to_lowercase() == keyword)
    }
}

/// Check that keywords are unique, every keyword has rules, every rule has
/// answers and none of them is blank, and both reserved keywords are present.
pub fn validate_keywords(keywords: &[KeywordDef]) -> Result<()> {
    let mut seen = HashSet::new();

    for def in keywords {
        let keyword = def.keyword.to_lowercase();
        if !seen.insert(keyword.clone()) {
            return Err(ConfigError::DuplicateKeyword(keyword));
        }
        if def.rules.is_empty() {
            return Err(ConfigError::EmptyRules(keyword));
        }
        if let Some(rule) = def
            .rules
            .iter()
            .find(|r| r.answers.is_empty() || r.answers.iter().any(|a| a.trim().is_empty()))
        {
            return Err(ConfigError::EmptyAnswers {
                keyword,
                decomp: rule.decomp.clone(),
            });
        }
    }

    for reserved in [GENERIC_KEYWORD, MEMORY_KEYWORD] {
        if !seen.contains(reserved) {
            return Err(ConfigError::MissingReservedKeyword(reserved));
        }
    }

    Ok(())
}
