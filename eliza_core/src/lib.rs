//! # Eliza Core (The Doctor)
//!
//! The conversational engine. This crate compiles a script from
//! `eliza_script` into typed matchers and answers user input by keyword
//! selection, decomposition and reassembly, in the manner of Weizenbaum's
//! ELIZA.
//!
//! ## Core Components
//!
//! - **pattern**: Compiles decomposition patterns into exact word matchers
//! - **retrieval**: Normalizes input and ranks the keywords of the chosen sentence
//! - **rules**: The compiled keyword tree, answer rotation and the decomposer
//! - **reassemble**: Expands reply templates with captured fragments
//! - **memory**: Replies deferred for turns without a keyword
//! - **engine**: Orchestrates a turn; owns sessions and the input gate
//!
//! ## Design Philosophy
//!
//! - **Compile Once**: Patterns and tags are resolved before the first turn
//! - **Always Answer**: Unmatched input degrades to memory or generic replies, never errors
//! - **Session-Owned State**: Rotation cursors and memory live in the session, not the engine

pub mod engine;
pub mod memory;
pub mod pattern;
pub mod reassemble;
pub mod retrieval;
pub mod rules;

pub use engine::*;
pub use memory::*;
pub use pattern::*;
pub use reassemble::*;
pub use retrieval::*;
pub use rules::*;

pub use eliza_script::{ConfigError, ScriptDefinition};
