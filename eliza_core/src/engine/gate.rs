//! Input gate - screens console input before it reaches the engine.

use std::collections::HashSet;

/// What the console should do with a line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Pass the input to [`crate::Engine::respond`].
    Accepted,
    /// The input holds no letters; answer with the rejection text.
    Rejected,
    /// The input is an exit phrase; end the session.
    Exit,
}

/// Classifies raw input against the script's exit phrases.
#[derive(Debug, Clone, Default)]
pub struct InputGate {
    exit_inputs: HashSet<String>,
}

impl InputGate {
    /// Create a gate recognizing the given exit phrases (case-insensitive).
    pub fn new(exit_inputs: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        Self {
            exit_inputs: exit_inputs
                .into_iter()
                .map(|e| e.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    /// Classify one line of input.
    pub fn classify(&self, input: &str) -> GateDecision {
        let folded = input.trim().to_lowercase();

        if self.exit_inputs.contains(&folded) {
            GateDecision::Exit
        } else if !input.chars().any(|c| c.is_lowercase() || c.is_uppercase()) {
            GateDecision::Rejected
        } else {
            GateDecision::Accepted
        }
    }

    /// Check if `input` is an exit phrase.
    pub fn is_exit(&self, input: &str) -> bool {
        self.classify(input) == GateDecision::Exit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> InputGate {
        InputGate::new(["bye", "Goodbye", "quit."])
    }

    #[test]
    fn test_exit_phrases_ignore_case_and_padding() {
        let gate = gate();

        assert_eq!(gate.classify("bye"), GateDecision::Exit);
        assert_eq!(gate.classify("GOODBYE"), GateDecision::Exit);
        assert_eq!(gate.classify("  quit.\n"), GateDecision::Exit);
        assert!(!gate.is_exit("quit"));
    }

    #[test]
    fn test_inputs_without_letters_rejected() {
        let gate = gate();

        assert_eq!(gate.classify("123"), GateDecision::Rejected);
        assert_eq!(gate.classify("?!"), GateDecision::Rejected);
        assert_eq!(gate.classify(""), GateDecision::Rejected);
    }

    #[test]
    fn test_ordinary_input_accepted() {
        let gate = gate();

        assert_eq!(gate.classify("I am unhappy."), GateDecision::Accepted);
        assert_eq!(gate.classify("bye bye"), GateDecision::Accepted);
        assert_eq!(gate.classify("ÉTÉ"), GateDecision::Accepted);
    }
}
