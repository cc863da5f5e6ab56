//! Memory stack - replies deferred for turns with nothing to respond to.

/// A LIFO stack of pre-assembled replies, owned by one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStack {
    entries: Vec<String>,
}

impl MemoryStack {
    /// Create a new empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a reply for later use.
    pub fn push(&mut self, reply: impl Into<String>) {
        self.entries.push(reply.into());
    }

    /// Remove and return the most recently pushed reply.
    pub fn pop(&mut self) -> Option<String> {
        self.entries.pop()
    }

    /// The reply [`MemoryStack::pop`] would return.
    pub fn peek(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    /// Get the number of deferred replies.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no reply is deferred.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}
