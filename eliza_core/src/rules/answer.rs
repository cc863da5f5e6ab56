//! Answer rotation for a single decomposition rule.

/// The reassembly templates of one rule and the cursor selecting the next one.
///
/// The cursor always indexes into `templates` and wraps after the last one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRule {
    templates: Vec<String>,
    cursor: usize,
}

impl AnswerRule {
    /// Create an answer rule. Returns `None` when `templates` is empty.
    pub fn new(templates: Vec<String>) -> Option<Self> {
        if templates.is_empty() {
            return None;
        }
        Some(Self {
            templates,
            cursor: 0,
        })
    }

    /// Return the template under the cursor and move the cursor on.
    pub fn advance(&mut self) -> &str {
        let current = self.cursor;
        self.cursor = (self.cursor + 1) % self.templates.len();
        &self.templates[current]
    }

    /// The template the next [`AnswerRule::advance`] will return.
    pub fn peek(&self) -> &str {
        &self.templates[self.cursor]
    }

    /// Get the index of the next template.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Get all templates in rotation order.
    pub fn templates(&self) -> &[String] {
        &self.templates
    }
}
