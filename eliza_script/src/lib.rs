//! # Eliza Script
//!
//! The "Script Book" crate - contains the keyword scripts, tag tables and
//! substitution tables that drive a conversation. This crate is the single
//! source of truth for script data and does not contain any matching logic.

pub mod error;
pub mod script;
pub mod tables;

pub use error::*;
pub use script::*;
pub use tables::*;
