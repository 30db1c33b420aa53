//! Sandbox configuration loaded from TOML.

use std::path::Path;

use chess_core::START_FEN;
use serde::{Deserialize, Serialize};

use crate::{PlayerMode, SandboxError};

/// Startup settings. Missing keys fall back to [`SandboxConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SandboxConfig {
    /// Position the board starts from
    pub start_fen: String,
    pub white: PlayerMode,
    pub black: PlayerMode,
    /// Render with Black at the bottom
    pub flipped: bool,
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            start_fen: START_FEN.to_string(),
            white: PlayerMode::Human,
            black: PlayerMode::Human,
            flipped: false,
            log_filter: "info".to_string(),
        }
    }
}

impl SandboxConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, SandboxError> {
        Ok(toml::from_str(s)?)
    }

    /// Load a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SandboxError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| SandboxError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
