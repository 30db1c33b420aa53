//! Chess rules for the sandbox.
//!
//! Provides the board representation, FEN parsing, legal move generation,
//! make/unmake and game-over detection, and implements [`RulesEngine`] on
//! [`Game`] so search code can stay independent of the concrete rules.

pub mod bitboard;
pub mod board;
pub mod game;
pub mod movegen;
pub mod perft;
pub mod rules;
pub mod types;
pub mod uci;
pub mod zobrist;

pub use bitboard::*;
pub use board::*;
pub use game::*;
pub use movegen::*;
pub use perft::{perft, perft_divide};
pub use rules::RulesEngine;
pub use types::*;
pub use uci::*;
