//! Minimax Chess Engine
//!
//! Fixed-depth minimax with alpha-beta pruning over a material-only
//! evaluation. The search is written against [`chess_core::RulesEngine`]
//! alone, so it runs unchanged on the real rules or on a scripted tree.

mod difficulty;
mod eval;
mod search;

use std::time::Instant;

use chess_core::RulesEngine;
use tracing::debug;

pub use difficulty::{Difficulty, ParseDifficultyError};
pub use eval::{Score, evaluate, piece_value};
pub use search::{ROOT_WINDOW, VALUE_SENTINEL, minimax, pick_best_move};

/// Result of a search operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult<M> {
    /// The best move found (None if no legal moves)
    pub best_move: Option<M>,
    /// Score of the best move from White's perspective, or the static
    /// evaluation when there is no move
    pub score: Score,
    /// Search depth in plies
    pub depth: u8,
    /// Number of moves pushed during the search
    pub nodes: u64,
}

/// Picks the best move for the side to move, searching `depth` plies.
///
/// The position is borrowed exclusively for the duration of the call and is
/// identical to its prior state on return. Returns `None` when there are no
/// legal moves; callers should not ask for a move in a finished game.
pub fn select_move<R: RulesEngine>(rules: &mut R, depth: u8) -> Option<R::Move> {
    let mut nodes = 0;
    pick_best_move(rules, depth, &mut nodes).map(|(mv, _)| mv)
}

/// Minimax engine with node statistics.
///
/// Holds no state between searches besides the node count of the last one;
/// every search starts from scratch.
#[derive(Debug, Clone, Default)]
pub struct MinimaxEngine {
    /// Node counter for statistics
    nodes: u64,
}

impl MinimaxEngine {
    pub fn new() -> Self {
        Self { nodes: 0 }
    }

    /// Searches `depth` plies and reports the chosen move with its score.
    pub fn search<R: RulesEngine>(&mut self, rules: &mut R, depth: u8) -> SearchResult<R::Move> {
        self.nodes = 0;
        let started = Instant::now();
        let outcome = pick_best_move(rules, depth, &mut self.nodes);

        let result = SearchResult {
            best_move: outcome.map(|(mv, _)| mv),
            score: outcome.map(|(_, s)| s).unwrap_or_else(|| evaluate(rules)),
            depth,
            nodes: self.nodes,
        };
        debug!(
            depth,
            nodes = result.nodes,
            score = result.score,
            best_move = ?result.best_move,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "search finished"
        );
        result
    }

    /// Searches at the depth the difficulty stands for.
    pub fn play<R: RulesEngine>(
        &mut self,
        rules: &mut R,
        difficulty: Difficulty,
    ) -> SearchResult<R::Move> {
        self.search(rules, difficulty.depth())
    }

    /// Nodes searched by the most recent search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }
}
