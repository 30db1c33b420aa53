//! Named bot strengths and the fixed search depth behind each.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How strongly a bot plays. Each level is a fixed search depth in plies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Great,
    Perfect,
}

impl Difficulty {
    pub const ALL: [Difficulty; 2] = [Difficulty::Great, Difficulty::Perfect];

    pub const fn depth(self) -> u8 {
        match self {
            Difficulty::Great => 3,
            Difficulty::Perfect => 5,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Difficulty::Great => "great",
            Difficulty::Perfect => "perfect",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty `{0}`, expected `great` or `perfect`")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseDifficultyError(s.to_string()))
    }
}
