use std::{fmt, str::FromStr};

use minimax_engine::Difficulty;
use serde::{Deserialize, Serialize};

use crate::SandboxError;

/// Who makes the moves for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PlayerMode {
    #[default]
    Human,
    Bot(Difficulty),
}

impl fmt::Display for PlayerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerMode::Human => f.write_str("human"),
            PlayerMode::Bot(difficulty) => fmt::Display::fmt(difficulty, f),
        }
    }
}

impl FromStr for PlayerMode {
    type Err = SandboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("human") {
            return Ok(PlayerMode::Human);
        }
        s.parse::<Difficulty>()
            .map(PlayerMode::Bot)
            .map_err(|_| SandboxError::UnknownMode(s.to_string()))
    }
}

impl TryFrom<String> for PlayerMode {
    type Error = SandboxError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PlayerMode> for String {
    fn from(mode: PlayerMode) -> Self {
        mode.to_string()
    }
}
