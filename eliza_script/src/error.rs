//! Configuration errors raised while loading or compiling a script.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that make a script unusable. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the script file from disk.
    #[error("failed to read script file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a TOML script.
    #[error("failed to parse script TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// Failed to parse a JSON script.
    #[error("failed to parse script JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The script file extension is neither `.toml` nor `.json`.
    #[error("unsupported script format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// A keyword was declared without any decomposition rules.
    #[error("keyword '{0}' has no rules")]
    EmptyRules(String),

    /// A rule has no reassembly templates, or one of them is blank.
    #[error("rule '{decomp}' of keyword '{keyword}' has no usable answers")]
    EmptyAnswers { keyword: String, decomp: String },

    /// The same keyword appears more than once in the script.
    #[error("keyword '{0}' is defined more than once")]
    DuplicateKeyword(String),

    /// One of the reserved keywords (`$` or `^`) is absent.
    #[error("reserved keyword '{0}' is missing")]
    MissingReservedKeyword(&'static str),

    /// A decomposition pattern could not be parsed.
    #[error("malformed pattern '{pattern}': {reason}")]
    MalformedPattern {
        pattern: String,
        reason: &'static str,
    },

    /// The generic keyword's rule does not match every input.
    #[error("the first rule of '$' must match any input, found '{0}'")]
    GenericNotCatchAll(String),
}

/// Result type for script operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
