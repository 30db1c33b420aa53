//! The capability a search needs from a rules implementation.

use std::fmt;

use crate::types::{Color, PieceKind};

/// Legal-move enumeration, reversible move application and game-over
/// detection over a mutable position.
///
/// Implementors must guarantee that `pop` undoes exactly the most recent
/// `push`, restoring the position to the state it had before that push.
/// Searches rely on this to leave the position unchanged when they return.
pub trait RulesEngine {
    type Move: Copy + PartialEq + fmt::Debug;

    /// Legal moves for the side to move. The order is implementation
    /// defined and may be empty.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Apply a move produced by `legal_moves`.
    fn push(&mut self, mv: Self::Move);

    /// Undo the last pushed move, returning it, or `None` if nothing is pushed.
    fn pop(&mut self) -> Option<Self::Move>;

    /// True for checkmate, stalemate or any other terminal condition.
    fn is_game_over(&self) -> bool;

    fn turn(&self) -> Color;

    /// Number of pieces of the given kind and color on the board.
    fn piece_count(&self, kind: PieceKind, color: Color) -> u32;
}
