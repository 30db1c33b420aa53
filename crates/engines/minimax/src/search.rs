//! Minimax search with alpha-beta pruning

use chess_core::{Color, RulesEngine};
use tracing::trace;

use crate::eval::{Score, evaluate};

/// Starting value of a node before any child has been seen; below (or above,
/// for the minimizing side) every reachable material score.
pub const VALUE_SENTINEL: Score = 9_999;

/// Half-width of the window each root move is searched with.
pub const ROOT_WINDOW: Score = 10_000;

/// Searches every legal move at the root and returns the best one with its score.
///
/// White keeps the move with the highest score and Black the lowest. Only a
/// strictly better score replaces the current best, so among equal scores the
/// first move in enumeration order wins. Each root move gets the full
/// `(-ROOT_WINDOW, ROOT_WINDOW)` window.
///
/// # Arguments
/// * `rules` - The position to search; restored before returning
/// * `depth` - Search depth in plies; depth 0 is searched as depth 1
/// * `nodes` - Counter for moves pushed (for statistics)
///
/// # Returns
/// `None` if there are no legal moves
pub fn pick_best_move<R: RulesEngine>(
    rules: &mut R,
    depth: u8,
    nodes: &mut u64,
) -> Option<(R::Move, Score)> {
    let white_to_move = rules.turn() == Color::White;
    let mut best = None;
    let mut best_value = if white_to_move {
        -VALUE_SENTINEL
    } else {
        VALUE_SENTINEL
    };

    for mv in rules.legal_moves() {
        rules.push(mv);
        *nodes += 1;
        // The reply is searched from the perspective of whoever moves next.
        let maximizing = rules.turn() == Color::White;
        let value = minimax(
            rules,
            depth.saturating_sub(1),
            -ROOT_WINDOW,
            ROOT_WINDOW,
            maximizing,
            nodes,
        );
        undo(rules, mv);
        trace!(?mv, value, "root move searched");

        let improves = if white_to_move {
            value > best_value
        } else {
            value < best_value
        };
        if improves {
            best_value = value;
            best = Some((mv, value));
        }
    }
    best
}

/// Fixed-depth minimax with alpha-beta pruning.
///
/// Leaves (depth exhausted or game over) are scored by the material
/// evaluator; checkmate, stalemate and draws are not scored specially.
/// `alpha` and `beta` are narrowed locally and never flow back to the caller.
pub fn minimax<R: RulesEngine>(
    rules: &mut R,
    depth: u8,
    mut alpha: Score,
    mut beta: Score,
    maximizing: bool,
    nodes: &mut u64,
) -> Score {
    if depth == 0 || rules.is_game_over() {
        return evaluate(rules);
    }

    if maximizing {
        let mut value = -VALUE_SENTINEL;
        for mv in rules.legal_moves() {
            rules.push(mv);
            *nodes += 1;
            let child = minimax(rules, depth - 1, alpha, beta, false, nodes);
            undo(rules, mv);

            value = value.max(child);
            alpha = alpha.max(value);
            if beta <= alpha {
                break; // Beta cutoff
            }
        }
        value
    } else {
        let mut value = VALUE_SENTINEL;
        for mv in rules.legal_moves() {
            rules.push(mv);
            *nodes += 1;
            let child = minimax(rules, depth - 1, alpha, beta, true, nodes);
            undo(rules, mv);

            value = value.min(child);
            beta = beta.min(value);
            if beta <= alpha {
                break; // Alpha cutoff
            }
        }
        value
    }
}

/// Pops the move pushed by the caller. A rules engine that pops anything
/// else has corrupted the position, and the search result would be garbage.
fn undo<R: RulesEngine>(rules: &mut R, mv: R::Move) {
    let popped = rules.pop();
    debug_assert_eq!(popped, Some(mv), "pop did not undo the pushed move");
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
