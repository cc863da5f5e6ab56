//! Backtracking matcher over word sequences.

use tracing::trace;

use super::PatternElement;

/// Match `elements` against the whole of `words`.
pub(super) fn match_elements<S: AsRef<str>>(
    elements: &[PatternElement],
    words: &[S],
) -> Option<Vec<String>> {
    let mut fragments = Vec::with_capacity(elements.len());
    if consume(elements, words, &mut fragments) {
        trace!(?fragments, "pattern matched");
        Some(fragments)
    } else {
        None
    }
}

/// Try to consume all of `words` with `elements`, pushing fragments as it
/// goes. On failure `fragments` is left as it was on entry.
fn consume<S: AsRef<str>>(
    elements: &[PatternElement],
    words: &[S],
    fragments: &mut Vec<String>,
) -> bool {
    let Some((element, rest)) = elements.split_first() else {
        return words.is_empty();
    };

    match element {
        PatternElement::Literal(literal) => match words.split_first() {
            Some((word, tail)) if word.as_ref().to_lowercase() == *literal => {
                attempt(rest, tail, fragments, &[word.as_ref().to_string()])
            }
            _ => false,
        },
        PatternElement::AnyWords => (0..=words.len()).any(|taken| {
            attempt(rest, &words[taken..], fragments, &[join(&words[..taken])])
        }),
        PatternElement::ExactCount(n) => {
            words.len() >= *n && attempt(rest, &words[*n..], fragments, &[join(&words[..*n])])
        }
        PatternElement::TagRef { members, .. } => members.iter().any(|member| {
            if !starts_with_member(words, member) {
                return false;
            }
            let span = join(&words[..member.len()]);
            attempt(rest, &words[member.len()..], fragments, &[span.clone(), span])
        }),
    }
}

/// Push `captured`, recurse, and undo the push if the rest fails.
fn attempt<S: AsRef<str>>(
    rest: &[PatternElement],
    words: &[S],
    fragments: &mut Vec<String>,
    captured: &[String],
) -> bool {
    let mark = fragments.len();
    fragments.extend_from_slice(captured);
    if consume(rest, words, fragments) {
        return true;
    }
    fragments.truncate(mark);
    false
}

fn starts_with_member<S: AsRef<str>>(words: &[S], member: &[String]) -> bool {
    !member.is_empty()
        && words.len() >= member.len()
        && words
            .iter()
            .zip(member)
            .all(|(word, m)| word.as_ref().to_lowercase() == *m)
}

fn join<S: AsRef<str>>(words: &[S]) -> String {
    words
        .iter()
        .map(|w| w.as_ref())
        .collect::<Vec<&str>>()
        .join(" ")
}
