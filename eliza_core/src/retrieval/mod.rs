//! Keyword retrieval - picks the sentence to answer and the keywords to try.
//!
//! The retrieval pipeline works as follows:
//! 1. **Split**: break the input on `.`, `,`, `!`, `?` (a trailing one is ignored)
//! 2. **Strip**: drop every character that is not a word character, whitespace or `'`
//! 3. **Normalize**: apply the substitution table word by word
//! 4. **Select**: take the first sentence holding at least one script keyword
//! 5. **Rank**: order its keywords by descending rank, ties left to right

mod normalize;

pub use normalize::*;

use eliza_script::SubstitutionTable;
use tracing::debug;

use crate::rules::Script;

/// The sentence chosen for decomposition and its keywords in trial order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retrieval {
    /// Normalized words of the sentence, casing as written.
    pub sentence: Vec<String>,

    /// Case-folded keywords found in the sentence, highest rank first.
    pub keywords: Vec<String>,
}

impl Retrieval {
    /// The sentence as a single space-separated string.
    pub fn sentence_text(&self) -> String {
        self.sentence.join(" ")
    }
}

/// Split input into candidate sentences.
///
/// Splits on every `.`, `,`, `!` or `?` except one that ends the input, so a
/// trailing terminator does not create an empty final sentence.
pub fn split_sentences(input: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = input.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | ',' | '!' | '?') && chars.peek().is_some() {
            sentences.push(&input[start..i]);
            start = i + c.len_utf8();
        }
    }
    sentences.push(&input[start..]);
    sentences
}

/// Remove every character that is not a word character, whitespace or `'`.
pub fn strip_punctuation(sentence: &str) -> String {
    sentence
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace() || *c == '\'')
        .collect()
}

/// Select the first sentence of `input` that holds a script keyword.
///
/// Any recognized keyword selects the sentence, including rank-0 ones.
/// Returns `None` when no sentence holds a keyword.
pub fn retrieve(
    input: &str,
    script: &Script,
    substitutions: &SubstitutionTable,
) -> Option<Retrieval> {
    for candidate in split_sentences(input) {
        let normalized = substitute(&strip_punctuation(candidate), substitutions);
        if normalized.is_empty() {
            continue;
        }

        let mut ranked: Vec<(String, i32)> = normalized
            .split_whitespace()
            .map(str::to_lowercase)
            .filter_map(|word| script.rank(&word).map(|rank| (word, rank)))
            .collect();

        if ranked.is_empty() {
            continue;
        }

        // Stable: equal ranks keep their order in the sentence.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        let retrieval = Retrieval {
            sentence: normalized.split_whitespace().map(str::to_string).collect(),
            keywords: ranked.into_iter().map(|(word, _)| word).collect(),
        };
        debug!(
            sentence = %retrieval.sentence_text(),
            keywords = ?retrieval.keywords,
            "retrieved sentence"
        );
        return Some(retrieval);
    }

    None
}
