//! Response orchestrator - answers one user turn.
//!
//! Each turn runs the following steps:
//! 1. **Retrieve**: pick the sentence and its ranked keywords
//! 2. **Decompose**: try keywords in rank order until one yields a non-empty reply
//! 3. **Remember**: for memory keywords, also push a reply built from the `^` rules
//! 4. **Fall back**: with no match, pop the memory stack or use the `$` reply
//! 5. **Clean**: normalize whitespace and punctuation spacing of every candidate reply

mod cleanup;
mod gate;
mod session;

pub use cleanup::*;
pub use gate::*;
pub use session::*;

use eliza_script::{
    ConsoleText, Result, ScriptDefinition, SubstitutionTable, GENERIC_KEYWORD, MEMORY_KEYWORD,
};
use std::collections::HashSet;
use tracing::{debug, debug_span, warn};

use crate::reassemble::reassemble;
use crate::retrieval::{retrieve, Retrieval};
use crate::rules::Script;

/// The compiled conversation engine.
///
/// Immutable once compiled; all per-conversation state lives in [`Session`].
#[derive(Debug, Clone)]
pub struct Engine {
    script: Script,
    substitutions: SubstitutionTable,
    memory_triggers: HashSet<String>,
    gate: InputGate,
    console: ConsoleText,
}

impl Engine {
    /// Compile a script definition into an engine.
    pub fn compile(definition: ScriptDefinition) -> Result<Self> {
        let script = Script::compile(&definition.keywords, &definition.tags)?;

        let memory_triggers: HashSet<String> = definition
            .memory_inputs
            .iter()
            .map(|k| k.to_lowercase())
            .collect();
        for trigger in &memory_triggers {
            if script.rank(trigger).is_none() {
                warn!(keyword = %trigger, "memory input is not a selectable keyword");
            }
        }

        debug!(
            keywords = script.len(),
            tags = definition.tags.len(),
            substitutions = definition.substitutions.len(),
            memory_triggers = memory_triggers.len(),
            "engine ready"
        );

        Ok(Self {
            script,
            substitutions: definition.substitutions,
            memory_triggers,
            gate: InputGate::new(&definition.exit_inputs),
            console: definition.console,
        })
    }

    /// Compile the bundled DOCTOR script.
    pub fn bundled() -> Result<Self> {
        Self::compile(ScriptDefinition::bundled()?)
    }

    /// Start a conversation with fresh rotation state and an empty memory.
    pub fn new_session(&self) -> Session {
        Session::new(self.script.clone())
    }

    /// Produce the reply to one line of user input.
    ///
    /// Never fails and never returns an empty string: input with nothing to
    /// respond to gets a deferred memory reply or the generic reply.
    pub fn respond(&self, session: &mut Session, input: &str) -> String {
        let turn = session.begin_turn();
        let _span = debug_span!("turn", session = %session.id(), turn).entered();

        let reply = match retrieve(input, &self.script, &self.substitutions) {
            Some(retrieval) => self.answer_keywords(session, &retrieval),
            None => None,
        };
        reply.unwrap_or_else(|| self.fallback(session))
    }

    /// The pristine compiled script sessions are cloned from.
    pub fn script(&self) -> &Script {
        &self.script
    }

    /// Get the substitution table applied to input.
    pub fn substitutions(&self) -> &SubstitutionTable {
        &self.substitutions
    }

    /// Check if selecting `keyword` also pushes a memory reply.
    pub fn is_memory_trigger(&self, keyword: &str) -> bool {
        self.memory_triggers.contains(&keyword.to_lowercase())
    }

    /// Get the input gate built from the script's exit phrases.
    pub fn gate(&self) -> &InputGate {
        &self.gate
    }

    /// Get the console texts of the script.
    pub fn console(&self) -> &ConsoleText {
        &self.console
    }

    /// Try keywords in rank order; the first with a matching rule and a
    /// non-empty reply answers.
    fn answer_keywords(&self, session: &mut Session, retrieval: &Retrieval) -> Option<String> {
        for keyword in &retrieval.keywords {
            let Some(decomposition) = session.script.decompose(keyword, &retrieval.sentence)
            else {
                continue;
            };
            let reply = clean_response(&reassemble(
                &decomposition.fragments,
                &decomposition.template,
            ));
            if reply.is_empty() {
                debug!(%keyword, "reply came out empty, trying the next keyword");
                continue;
            }

            if self.memory_triggers.contains(keyword) {
                self.remember(session, &retrieval.sentence);
            }
            return Some(reply);
        }

        debug!(keywords = ?retrieval.keywords, "no keyword produced a decomposition");
        None
    }

    /// Push a reply built from the memory rules onto the session's stack.
    fn remember(&self, session: &mut Session, sentence: &[String]) {
        match session.script.decompose(MEMORY_KEYWORD, sentence) {
            Some(decomposition) => {
                let reply = clean_response(&reassemble(
                    &decomposition.fragments,
                    &decomposition.template,
                ));
                if reply.is_empty() {
                    debug!("memory reply came out empty, nothing pushed");
                    return;
                }
                debug!(%reply, depth = session.memory.len() + 1, "pushed memory");
                session.memory.push(reply);
            }
            None => debug!("memory rules did not match, nothing pushed"),
        }
    }

    /// Pop a deferred reply, or fall back to the generic reply.
    fn fallback(&self, session: &mut Session) -> String {
        if let Some(reply) = session.memory.pop() {
            debug!(remaining = session.memory.len(), "answering from memory");
            return reply;
        }

        debug!("answering with the generic reply");
        // Compilation guarantees the generic keyword's first rule matches
        // anything and each of its templates holds literal text.
        session
            .script
            .decompose(GENERIC_KEYWORD, &[GENERIC_KEYWORD])
            .map(|d| clean_response(&reassemble(&d.fragments, &d.template)))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eliza_script::{ConfigError, KeywordDef, RuleDef};

    fn doctor() -> Engine {
        Engine::bundled().unwrap()
    }

    const GENERIC: [&str; 6] = [
        "Please go on.",
        "I am not sure I understand you fully.",
        "What does that suggest to you?",
        "That is interesting. Please continue.",
        "Tell me more about that.",
        "Does talking about this bother you?",
    ];

    #[test]
    fn test_sad_rule_captures_tag_member() {
        let engine = doctor();
        let mut session = engine.new_session();

        assert_eq!(
            engine.respond(&mut session, "I am unhappy."),
            "I am sorry to hear that you are unhappy."
        );
        assert_eq!(
            engine.respond(&mut session, "I am unhappy."),
            "Do you think coming here will help you not to be unhappy?"
        );
        assert_eq!(
            engine.respond(&mut session, "I am unhappy."),
            "I'm sure it's not pleasant to be unhappy."
        );
        assert_eq!(
            engine.respond(&mut session, "I am unhappy."),
            "Can you explain what made you unhappy?"
        );
        assert_eq!(
            engine.respond(&mut session, "I am unhappy."),
            "I am sorry to hear that you are unhappy."
        );
    }

    #[test]
    fn test_second_person_input_flips_to_first() {
        let engine = doctor();
        let mut session = engine.new_session();

        assert_eq!(
            engine.respond(&mut session, "You are unhappy."),
            "Does it please you to believe I am unhappy?"
        );
    }

    #[test]
    fn test_generic_reply_rotates() {
        let engine = doctor();
        let mut session = engine.new_session();

        for expected in GENERIC.iter().chain(GENERIC.iter().take(1)) {
            assert_eq!(engine.respond(&mut session, "plugh xyzzy"), *expected);
        }
    }

    #[test]
    fn test_memory_round_trip() {
        let engine = doctor();
        let mut session = engine.new_session();

        assert_eq!(
            engine.respond(&mut session, "My mother hates me."),
            "Who else in your family hates you?"
        );
        assert_eq!(session.memory().len(), 1);

        assert_eq!(
            engine.respond(&mut session, "xyzzy"),
            "Earlier you mentioned that your mother hates you."
        );
        assert!(session.memory().is_empty());

        assert_eq!(engine.respond(&mut session, "xyzzy"), GENERIC[0]);
    }

    #[test]
    fn test_memory_is_lifo() {
        let engine = doctor();
        let mut session = engine.new_session();

        engine.respond(&mut session, "My car is broken");
        engine.respond(&mut session, "My mother hates me");
        assert_eq!(session.memory().len(), 2);

        assert_eq!(
            engine.respond(&mut session, "xyzzy"),
            "Earlier you mentioned that your mother hates you."
        );
        assert_eq!(
            engine.respond(&mut session, "xyzzy"),
            "Does that have anything to do with the fact that your car is broken?"
        );
    }

    #[test]
    fn test_highest_rank_keyword_first() {
        let engine = doctor();
        let mut session = engine.new_session();

        assert_eq!(
            engine.respond(&mut session, "I think machines are weird"),
            "Do computers worry you?"
        );
    }

    #[test]
    fn test_unmatched_keyword_falls_through_to_memory() {
        let engine = doctor();
        let mut session = engine.new_session();

        engine.respond(&mut session, "My car is broken");
        assert_eq!(
            engine.respond(&mut session, "why not"),
            "Does that have anything to do with the fact that your car is broken?"
        );
        assert_eq!(engine.respond(&mut session, "why not"), GENERIC[0]);
    }

    #[test]
    fn test_later_sentence_selected() {
        let engine = doctor();
        let mut session = engine.new_session();

        assert_eq!(
            engine.respond(&mut session, "xyzzy. I am unhappy"),
            "I am sorry to hear that you are unhappy."
        );
    }

    #[test]
    fn test_greeting_substitution() {
        let engine = doctor();
        let mut session = engine.new_session();

        assert_eq!(engine.respond(&mut session, "hello!"), "Hi.");
        assert_eq!(engine.respond(&mut session, "Hey"), "Hello.");
    }

    #[test]
    fn test_sessions_are_independent() {
        let engine = doctor();
        let mut first = engine.new_session();
        let mut second = engine.new_session();

        engine.respond(&mut first, "My mother hates me");
        assert_eq!(
            engine.respond(&mut first, "xyzzy"),
            "Earlier you mentioned that your mother hates you."
        );

        assert_eq!(engine.respond(&mut second, "xyzzy"), GENERIC[0]);
        assert_eq!(
            engine.respond(&mut second, "My mother hates me"),
            "Who else in your family hates you?"
        );
        assert_eq!(first.turns(), 2);
        assert_eq!(second.turns(), 2);
    }

    #[test]
    fn test_empty_input_gets_generic_reply() {
        let engine = doctor();
        let mut session = engine.new_session();
        assert_eq!(engine.respond(&mut session, ""), GENERIC[0]);
    }

    #[test]
    fn test_memory_trigger_lookup() {
        let engine = doctor();
        assert!(engine.is_memory_trigger("your"));
        assert!(engine.is_memory_trigger("YOUR"));
        assert!(!engine.is_memory_trigger("you"));
    }

    #[test]
    fn test_memory_rule_miss_pushes_nothing() {
        let definition = ScriptDefinition {
            memory_inputs: vec!["dream".to_string()],
            keywords: vec![
                KeywordDef::new("$", 0).with_rule(RuleDef::new("(0)", ["Go on."])),
                KeywordDef::new("^", 0)
                    .with_rule(RuleDef::new("(0 YOUR 0)", ["Earlier: your 3 ."])),
                KeywordDef::new("dream", 3).with_rule(RuleDef::new("(0)", ["Dreams?"])),
            ],
            ..Default::default()
        };
        let engine = Engine::compile(definition).unwrap();
        let mut session = engine.new_session();

        assert_eq!(engine.respond(&mut session, "a dream"), "Dreams?");
        assert!(session.memory().is_empty());
    }

    fn empty_capture_definition() -> ScriptDefinition {
        ScriptDefinition {
            memory_inputs: vec!["dream".to_string()],
            keywords: vec![
                KeywordDef::new("$", 0).with_rule(RuleDef::new("(0)", ["Go on."])),
                KeywordDef::new("^", 0).with_rule(RuleDef::new("(0 DREAM 0)", ["3"])),
                KeywordDef::new("dream", 3).with_rule(RuleDef::new("(0 DREAM 0)", ["3"])),
                KeywordDef::new("you", 1).with_rule(RuleDef::new("(0 YOU 0)", ["You 3 ?"])),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_reply_falls_back_to_generic() {
        let engine = Engine::compile(empty_capture_definition()).unwrap();
        let mut session = engine.new_session();

        let reply = engine.respond(&mut session, "dream");
        assert!(!reply.is_empty());
        assert_eq!(reply, "Go on.");
        assert!(session.memory().is_empty());
    }

    #[test]
    fn test_empty_reply_tries_next_keyword() {
        let engine = Engine::compile(empty_capture_definition()).unwrap();
        let mut session = engine.new_session();

        let reply = engine.respond(&mut session, "you dream");
        assert!(!reply.is_empty());
        assert_eq!(reply, "You dream?");
    }

    #[test]
    fn test_blank_generic_template_rejected() {
        let definition = ScriptDefinition {
            keywords: vec![
                KeywordDef::new("$", 0).with_rule(RuleDef::new("(0)", ["   "])),
                KeywordDef::new("^", 0).with_rule(RuleDef::new("(0)", ["Earlier..."])),
            ],
            ..Default::default()
        };

        let err = Engine::compile(definition).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyAnswers { .. }));
    }

    #[test]
    fn test_session_tracks_its_own_rotation() {
        let engine = doctor();
        let mut session = engine.new_session();
        let generic_cursor = |script: &Script| script.entry("$").unwrap().rules[0].answers.cursor();

        engine.respond(&mut session, "plugh");
        engine.respond(&mut session, "plugh");

        assert_eq!(generic_cursor(session.script()), 2);
        assert_eq!(
            session.script().entry("$").unwrap().rules[0].answers.peek(),
            GENERIC[2]
        );
        assert_eq!(generic_cursor(engine.script()), 0);
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Engine>();
        assert_send_sync::<Session>();
    }
}
