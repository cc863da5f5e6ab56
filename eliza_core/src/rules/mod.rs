//! Compiled script and the decomposer.
//!
//! A [`Script`] is the typed, validated form of the keyword list: every
//! keyword holds its rules in author order, every rule a compiled pattern
//! and an [`AnswerRule`] carrying its own rotation cursor.

mod answer;

pub use answer::*;

use eliza_script::{
    validate_keywords, ConfigError, KeywordDef, Result, TagTable, GENERIC_KEYWORD, MEMORY_KEYWORD,
};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::pattern::DecompPattern;

/// A compiled pattern paired with its answers.
#[derive(Debug, Clone)]
pub struct Rule {
    pub pattern: DecompPattern,
    pub answers: AnswerRule,
}

/// A keyword, its rank, and its rules in the order they are tried.
#[derive(Debug, Clone)]
pub struct KeywordEntry {
    /// Case-folded keyword.
    pub keyword: String,
    pub rank: i32,
    pub rules: Vec<Rule>,
}

/// The outcome of a successful decomposition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposition {
    pub keyword: String,

    /// Index of the rule that matched within its keyword.
    pub rule_index: usize,

    /// Captured fragments, 1-indexed by templates.
    pub fragments: Vec<String>,

    /// The template selected by the rule's rotation cursor.
    pub template: String,
}

/// The compiled keyword tree.
#[derive(Debug, Clone, Default)]
pub struct Script {
    entries: Vec<KeywordEntry>,

    /// Index: keyword -> position in `entries`.
    index: HashMap<String, usize>,
}

impl Script {
    /// Compile keyword definitions, resolving tag references against `tags`.
    ///
    /// Fails when the keywords break a structural invariant, a pattern is
    /// malformed, or the generic keyword's first rule is not a catch-all or
    /// has a template made only of placeholders.
    /// Unresolved tags and out-of-range template placeholders only warn.
    pub fn compile(keywords: &[KeywordDef], tags: &TagTable) -> Result<Self> {
        validate_keywords(keywords)?;

        let mut script = Script::default();

        for def in keywords {
            let keyword = def.keyword.to_lowercase();
            let mut rules = Vec::with_capacity(def.rules.len());

            for rule_def in &def.rules {
                let pattern = DecompPattern::compile(&rule_def.decomp, tags)?;
                warn_on_unreachable_placeholders(&keyword, &pattern, &rule_def.answers);

                let answers = AnswerRule::new(rule_def.answers.clone()).ok_or_else(|| {
                    ConfigError::EmptyAnswers {
                        keyword: keyword.clone(),
                        decomp: rule_def.decomp.clone(),
                    }
                })?;
                rules.push(Rule { pattern, answers });
            }

            script.index.insert(keyword.clone(), script.entries.len());
            script.entries.push(KeywordEntry {
                keyword,
                rank: def.rank,
                rules,
            });
        }

        let generic = script
            .entry(GENERIC_KEYWORD)
            .and_then(|entry| entry.rules.first())
            .ok_or(ConfigError::MissingReservedKeyword(GENERIC_KEYWORD))?;
        if !generic.pattern.is_catch_all() {
            return Err(ConfigError::GenericNotCatchAll(
                generic.pattern.source().to_string(),
            ));
        }
        // The generic reply is the last resort and must never come out empty.
        let placeholder_only = generic.answers.templates().iter().any(|template| {
            template
                .split_whitespace()
                .all(crate::reassemble::is_placeholder)
        });
        if placeholder_only {
            return Err(ConfigError::EmptyAnswers {
                keyword: GENERIC_KEYWORD.to_string(),
                decomp: generic.pattern.source().to_string(),
            });
        }

        debug!(keywords = script.entries.len(), "compiled script");
        Ok(script)
    }

    /// Get a keyword entry.
    pub fn entry(&self, keyword: &str) -> Option<&KeywordEntry> {
        self.index.get(keyword).map(|&i| &self.entries[i])
    }

    /// Rank of `word` if it is a keyword retrieval may select.
    ///
    /// The reserved keywords are never selectable.
    pub fn rank(&self, word: &str) -> Option<i32> {
        if word == GENERIC_KEYWORD || word == MEMORY_KEYWORD {
            return None;
        }
        self.entry(word).map(|entry| entry.rank)
    }

    /// Iterate over all keyword entries in script order.
    pub fn entries(&self) -> impl Iterator<Item = &KeywordEntry> {
        self.entries.iter()
    }

    /// Get the number of keywords.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the script has no keywords.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decompose `sentence` with the rules of `keyword`.
    ///
    /// Rules are tried in author order and the first structural match wins;
    /// its rotation cursor advances. Returns `None` for an unknown keyword
    /// or when no rule matches.
    pub fn decompose<S: AsRef<str>>(
        &mut self,
        keyword: &str,
        sentence: &[S],
    ) -> Option<Decomposition> {
        let &position = self.index.get(keyword)?;
        let entry = &mut self.entries[position];

        for (rule_index, rule) in entry.rules.iter_mut().enumerate() {
            let Some(fragments) = rule.pattern.match_words(sentence) else {
                continue;
            };
            let template = rule.answers.advance().to_string();
            debug!(
                keyword,
                rule = rule.pattern.source(),
                %template,
                "decomposed sentence"
            );
            return Some(Decomposition {
                keyword: entry.keyword.clone(),
                rule_index,
                fragments,
                template,
            });
        }

        debug!(keyword, "no rule matched");
        None
    }
}

/// Warn about template placeholders the pattern can never fill.
fn warn_on_unreachable_placeholders(keyword: &str, pattern: &DecompPattern, answers: &[String]) {
    let available = pattern.fragment_count();

    for template in answers {
        let highest = template
            .split_whitespace()
            .filter_map(crate::reassemble::placeholder_index)
            .max();
        if let Some(index) = highest.filter(|&i| i > available) {
            warn!(
                keyword,
                pattern = pattern.source(),
                template = %template,
                index,
                available,
                "template refers to a fragment the pattern never captures"
            );
        }
    }
}
