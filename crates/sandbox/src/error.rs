use std::{io, path::PathBuf};

use chess_core::{FenError, Outcome, SquareError};
use thiserror::Error;

/// Everything a sandbox command can be refused for.
#[derive(Debug, Error)]
pub enum SandboxError {
    #[error("illegal move `{0}`")]
    IllegalMove(String),
    #[error("moves are disabled in edit mode")]
    EditMode,
    #[error("the game is over ({0})")]
    GameOver(Outcome),
    #[error("unknown player mode `{0}`, expected human, great or perfect")]
    UnknownMode(String),
    #[error(transparent)]
    Square(#[from] SquareError),
    #[error("invalid piece `{0}`, expected a FEN letter such as N or q")]
    InvalidPiece(String),
    #[error("no piece on {0}")]
    EmptySquare(String),
    #[error("unknown command `{0}`, try `help`")]
    UnknownCommand(String),
    #[error("`{0}` needs more arguments")]
    MissingArgument(&'static str),
    #[error("invalid ply count `{0}`")]
    InvalidCount(String),
    #[error("invalid FEN: {0}")]
    Fen(#[from] FenError),
    #[error("failed to read config {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
