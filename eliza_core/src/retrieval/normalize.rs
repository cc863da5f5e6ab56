//! Substitution normalizer - pronoun flips and synonym canonicalization.

use eliza_script::SubstitutionTable;

/// Rewrite every whitespace-delimited word that has an entry in `table`.
///
/// Words without an entry are kept exactly as written. The output words are
/// joined by single spaces.
pub fn substitute(text: &str, table: &SubstitutionTable) -> String {
    text.split_whitespace()
        .map(|word| table.get(word).unwrap_or(word))
        .collect::<Vec<_>>()
        .join(" ")
}
