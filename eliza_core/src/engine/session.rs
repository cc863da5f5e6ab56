//! Conversation sessions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::memory::MemoryStack;
use crate::rules::Script;

/// Unique identifier for a conversation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// State of one conversation.
///
/// A session owns its own copy of the keyword tree, so rotation cursors
/// advance independently per session, and its own memory stack.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    pub(crate) script: Script,
    pub(crate) memory: MemoryStack,
    turns: u64,
}

impl Session {
    pub(crate) fn new(script: Script) -> Self {
        Self {
            id: SessionId::new(),
            script,
            memory: MemoryStack::new(),
            turns: 0,
        }
    }

    /// Get the session's unique ID.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Number of turns answered so far.
    pub fn turns(&self) -> u64 {
        self.turns
    }

    /// Replies currently deferred on the memory stack.
    pub fn memory(&self) -> &MemoryStack {
        &self.memory
    }

    /// This session's keyword tree, including its rotation state.
    pub fn script(&self) -> &Script {
        &self.script
    }

    pub(crate) fn begin_turn(&mut self) -> u64 {
        self.turns += 1;
        self.turns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::new(Script::default());

        assert_eq!(session.turns(), 0);
        assert!(session.memory().is_empty());
    }

    #[test]
    fn test_session_ids_unique() {
        let a = Session::new(Script::default());
        let b = Session::new(Script::default());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_begin_turn_counts() {
        let mut session = Session::new(Script::default());
        assert_eq!(session.begin_turn(), 1);
        assert_eq!(session.begin_turn(), 2);
        assert_eq!(session.turns(), 2);
    }
}
