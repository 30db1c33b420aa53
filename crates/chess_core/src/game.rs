//! A position together with its move stack and repetition history.

use std::fmt;

use crate::{
    bitboard::Bitboard,
    board::{Position, Undo},
    movegen::{has_legal_move, legal_moves},
    rules::RulesEngine,
    types::{Color, Move, PieceKind},
};

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    SeventyFiveMoves,
    FivefoldRepetition,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub termination: Termination,
    /// `None` for draws.
    pub winner: Option<Color>,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self.termination {
            Termination::Checkmate => "checkmate",
            Termination::Stalemate => "stalemate",
            Termination::InsufficientMaterial => "insufficient material",
            Termination::SeventyFiveMoves => "seventy-five-move rule",
            Termination::FivefoldRepetition => "fivefold repetition",
        };
        match self.winner {
            Some(color) => write!(f, "{color} wins by {reason}"),
            None => write!(f, "draw by {reason}"),
        }
    }
}

/// The mutable game state shared by the editor, human players and bots.
///
/// Moves are applied with [`Game::push`] and reverted in LIFO order with
/// [`Game::pop`]. Free edits go through [`Game::edit`], which starts a new
/// history because moves made before the edit can no longer be undone
/// meaningfully.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    position: Position,
    stack: Vec<(Move, Undo)>,
    /// Hash of every position since the last edit, current one last.
    history: Vec<u64>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::from_position(Position::startpos())
    }

    pub fn from_position(position: Position) -> Self {
        let history = vec![position.position_hash()];
        Self {
            position,
            stack: Vec::new(),
            history,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn turn(&self) -> Color {
        self.position.side_to_move
    }

    pub fn pieces(&self, kind: PieceKind, color: Color) -> Bitboard {
        self.position.pieces(kind, color)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(&self.position)
    }

    /// Moves currently on the stack, oldest first.
    pub fn move_stack(&self) -> impl Iterator<Item = Move> + '_ {
        self.stack.iter().map(|(mv, _)| *mv)
    }

    pub fn peek(&self) -> Option<Move> {
        self.stack.last().map(|(mv, _)| *mv)
    }

    /// Apply a move. The move is trusted to be legal in the current position.
    pub fn push(&mut self, mv: Move) {
        let undo = self.position.make_move(mv);
        self.stack.push((mv, undo));
        self.history.push(self.position.position_hash());
    }

    /// Undo the last pushed move.
    pub fn pop(&mut self) -> Option<Move> {
        let (mv, undo) = self.stack.pop()?;
        self.position.unmake_move(mv, undo);
        self.history.pop();
        Some(mv)
    }

    /// Apply a free edit to the board. Castling and en-passant state that the
    /// edit invalidated is dropped and the move stack is cleared.
    pub fn edit<F: FnOnce(&mut Position)>(&mut self, f: F) {
        f(&mut self.position);
        self.position.sanitize();
        self.stack.clear();
        self.history.clear();
        self.history.push(self.position.position_hash());
    }

    /// Replace the whole position, discarding the move stack.
    pub fn set_position(&mut self, position: Position) {
        *self = Self::from_position(position);
    }

    /// Remove every piece and reset the clocks, with White to move.
    pub fn clear(&mut self) {
        self.set_position(Position::empty());
    }

    /// Back to the standard starting position.
    pub fn reset(&mut self) {
        self.set_position(Position::startpos());
    }

    pub fn is_check(&self) -> bool {
        self.position.in_check(self.turn())
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_check() && !self.has_legal_move()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && !self.has_legal_move()
    }

    /// True if the current position occurred at least `count` times since
    /// the last edit, counting the current occurrence.
    pub fn is_repetition(&self, count: usize) -> bool {
        let current = self.position.position_hash();
        self.history.iter().filter(|&&h| h == current).count() >= count
    }

    /// Fifty-move rule or threefold repetition; these end the game only when claimed.
    pub fn can_claim_draw(&self) -> bool {
        self.position.is_fifty_move_draw() || self.is_repetition(3)
    }

    /// The automatic result of the game, if it is over.
    pub fn outcome(&self) -> Option<Outcome> {
        let draw = |termination| {
            Some(Outcome {
                termination,
                winner: None,
            })
        };

        let has_moves = self.has_legal_move();
        if !has_moves && self.is_check() {
            return Some(Outcome {
                termination: Termination::Checkmate,
                winner: Some(self.turn().other()),
            });
        }
        if self.position.is_insufficient_material() {
            return draw(Termination::InsufficientMaterial);
        }
        if !has_moves {
            return draw(Termination::Stalemate);
        }
        if self.position.is_seventyfive_move_draw() {
            return draw(Termination::SeventyFiveMoves);
        }
        if self.is_repetition(5) {
            return draw(Termination::FivefoldRepetition);
        }
        None
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }

    fn has_legal_move(&self) -> bool {
        has_legal_move(&mut self.position.clone())
    }
}

impl RulesEngine for Game {
    type Move = Move;

    fn legal_moves(&self) -> Vec<Move> {
        Game::legal_moves(self)
    }

    fn push(&mut self, mv: Move) {
        Game::push(self, mv)
    }

    fn pop(&mut self) -> Option<Move> {
        Game::pop(self)
    }

    fn is_game_over(&self) -> bool {
        Game::is_game_over(self)
    }

    fn turn(&self) -> Color {
        Game::turn(self)
    }

    fn piece_count(&self, kind: PieceKind, color: Color) -> u32 {
        self.pieces(kind, color).len()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.position, f)
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
