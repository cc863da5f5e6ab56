//! Reassembler - expands a reply template with captured fragments.

use tracing::warn;

/// Build a reply from `template`, replacing each positive integer token `n`
/// with fragment `n` (1-indexed).
///
/// A placeholder beyond the captured fragments expands to nothing. Tokens
/// are re-joined with single spaces; casing is left untouched.
pub fn reassemble<S: AsRef<str>>(fragments: &[S], template: &str) -> String {
    template
        .split_whitespace()
        .map(|token| {
            if !is_placeholder(token) {
                return token;
            }
            match placeholder_index(token).and_then(|i| fragments.get(i - 1)) {
                Some(fragment) => fragment.as_ref(),
                None => {
                    warn!(
                        %template,
                        placeholder = token,
                        captured = fragments.len(),
                        "placeholder out of range"
                    );
                    ""
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A token of ASCII digits denoting a positive integer.
pub(crate) fn is_placeholder(token: &str) -> bool {
    token.bytes().all(|b| b.is_ascii_digit()) && token.bytes().any(|b| b != b'0')
}

/// The 1-based fragment index named by a placeholder token, if it fits.
pub(crate) fn placeholder_index(token: &str) -> Option<usize> {
    if !is_placeholder(token) {
        return None;
    }
    token.parse().ok()
}
