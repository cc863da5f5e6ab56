//! Final whitespace and punctuation cleanup of a reply.

/// Collapse whitespace runs to single spaces and pull a standalone terminal
/// mark (`?`, `.`, `!` or `"`) onto the preceding word.
///
/// A mark that pulled its space cannot be followed by another pulled mark:
/// `"why ? ."` becomes `"why? ."`.
pub fn clean_response(response: &str) -> String {
    let mut cleaned = String::with_capacity(response.len());
    let mut previous_pulled = false;

    for (i, token) in response.split_whitespace().enumerate() {
        if i > 0 {
            let pull = !previous_pulled && is_terminal_mark(token);
            if !pull {
                cleaned.push(' ');
            }
            previous_pulled = pull;
        }
        cleaned.push_str(token);
    }

    cleaned
}

fn is_terminal_mark(token: &str) -> bool {
    let mut chars = token.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some('?' | '.' | '!' | '"'), None)
    )
}
