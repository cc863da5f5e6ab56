//! Script loading from TOML and JSON documents.
//!
//! The format is chosen by file extension. Every successfully parsed script
//! is validated before it is returned.

use std::path::Path;

use tracing::debug;

use super::ScriptDefinition;
use crate::error::{ConfigError, Result};

/// The classic DOCTOR script, embedded at build time.
pub const BUNDLED_DOCTOR: &str = include_str!("../../data/doctor.toml");

impl ScriptDefinition {
    /// Load the bundled DOCTOR script.
    pub fn bundled() -> Result<Self> {
        Self::from_toml_str(BUNDLED_DOCTOR)
    }

    /// Load a script from a `.toml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str) -> Result<Self> = match extension.as_deref() {
            Some("toml") => Self::from_toml_str,
            Some("json") => Self::from_json_str,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };

        debug!(?path, "loading script from file");
        let content = std::fs::read_to_string(path)?;
        parse(&content)
    }

    /// Parse and validate a TOML script.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let script: Self = toml::from_str(content)?;
        script.validate()?;
        debug!(keywords = script.keywords.len(), "parsed TOML script");
        Ok(script)
    }

    /// Parse and validate a JSON script.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let script: Self = serde_json::from_str(content)?;
        script.validate()?;
        debug!(keywords = script.keywords.len(), "parsed JSON script");
        Ok(script)
    }
}
