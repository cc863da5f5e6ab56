//! Pattern compiler - turns decomposition patterns into exact word matchers.
//!
//! A pattern such as `(0 YOUR @FAMILY 0)` is a whitespace-separated list of
//! elements:
//! - `0` matches any run of words, including none
//! - a positive integer `n` matches exactly `n` words
//! - `@name` matches one member of the named tag
//! - anything else matches that word, ignoring case
//!
//! A compiled pattern must consume the whole sentence to match.

mod matcher;

use eliza_script::{ConfigError, Result, TagTable};
use tracing::warn;

/// Prefix marking a tag reference inside a pattern.
pub const TAG_PREFIX: char = '@';

/// One element of a compiled decomposition pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternElement {
    /// A single word, stored case-folded.
    Literal(String),

    /// Zero or more words.
    AnyWords,

    /// Exactly this many words (at least one).
    ExactCount(usize),

    /// One member of a tag. Each member is a run of case-folded words; an
    /// unresolved tag has no members and never matches.
    TagRef {
        name: String,
        members: Vec<Vec<String>>,
    },
}

impl PatternElement {
    /// Number of fragments this element reports on a match.
    pub fn fragment_count(&self) -> usize {
        match self {
            PatternElement::TagRef { .. } => 2,
            _ => 1,
        }
    }

    fn from_token(token: &str, tags: &TagTable) -> Self {
        if token == "0" {
            return PatternElement::AnyWords;
        }
        if token.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = token.parse::<usize>() {
                if n > 0 {
                    return PatternElement::ExactCount(n);
                }
            }
        }
        if let Some(name) = token.strip_prefix(TAG_PREFIX) {
            let name = name.to_lowercase();
            let members = match tags.members(&name) {
                Some(members) => members
                    .iter()
                    .map(|m| m.split_whitespace().map(str::to_string).collect())
                    .collect(),
                None => {
                    warn!(tag = %name, "unresolved tag reference, element will never match");
                    Vec::new()
                }
            };
            return PatternElement::TagRef { name, members };
        }
        PatternElement::Literal(token.to_lowercase())
    }
}

/// A compiled decomposition pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecompPattern {
    source: String,
    elements: Vec<PatternElement>,
}

impl DecompPattern {
    /// Compile a pattern, resolving tag references against `tags`.
    ///
    /// The pattern may be wrapped in parentheses; they must balance. A
    /// pattern with no elements is rejected.
    pub fn compile(source: &str, tags: &TagTable) -> Result<Self> {
        let body = strip_delimiters(source)?;

        let elements: Vec<_> = body
            .split_whitespace()
            .map(|token| PatternElement::from_token(token, tags))
            .collect();

        if elements.is_empty() {
            return Err(ConfigError::MalformedPattern {
                pattern: source.to_string(),
                reason: "pattern has no elements",
            });
        }

        Ok(Self {
            source: source.to_string(),
            elements,
        })
    }

    /// The pattern text as written in the script.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The compiled elements in order.
    pub fn elements(&self) -> &[PatternElement] {
        &self.elements
    }

    /// Total number of fragments reported on a successful match.
    pub fn fragment_count(&self) -> usize {
        self.elements.iter().map(PatternElement::fragment_count).sum()
    }

    /// Check if this pattern matches every possible sentence.
    pub fn is_catch_all(&self) -> bool {
        self.elements
            .iter()
            .all(|e| matches!(e, PatternElement::AnyWords))
    }

    /// Match the pattern against a whole sentence.
    ///
    /// On success returns one fragment per element, in element order, with a
    /// tag reference contributing its matched span followed by the member
    /// that matched.
    pub fn match_words<S: AsRef<str>>(&self, words: &[S]) -> Option<Vec<String>> {
        matcher::match_elements(&self.elements, words)
    }

    /// Convenience wrapper splitting `sentence` on whitespace.
    pub fn match_text(&self, sentence: &str) -> Option<Vec<String>> {
        let words: Vec<&str> = sentence.split_whitespace().collect();
        self.match_words(&words)
    }
}

/// Shorthand for [`DecompPattern::compile`].
pub fn compile_pattern(source: &str, tags: &TagTable) -> Result<DecompPattern> {
    DecompPattern::compile(source, tags)
}

/// Remove enclosing parentheses after checking that all of them balance.
fn strip_delimiters(source: &str) -> Result<String> {
    let mut depth: i32 = 0;
    for c in source.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            break;
        }
    }

    if depth != 0 {
        return Err(ConfigError::MalformedPattern {
            pattern: source.to_string(),
            reason: "unbalanced parentheses",
        });
    }

    Ok(source.chars().filter(|c| !matches!(c, '(' | ')')).collect())
}
