//! Material-based position evaluation

use chess_core::{Color, PieceKind, RulesEngine};

/// Signed evaluation: positive favours White, negative favours Black.
pub type Score = i32;

/// Material values in pawns, indexed by PieceKind::idx().
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
const PIECE_VALUES: [Score; 6] = [1, 3, 3, 5, 9, 0];

/// Evaluates the position from White's perspective, whoever is to move.
///
/// Sums `value * (white_count - black_count)` over every piece kind. Kings are
/// counted like everything else but weigh nothing. No positional terms.
pub fn evaluate<R: RulesEngine + ?Sized>(rules: &R) -> Score {
    let mut score = 0;
    for kind in PieceKind::ALL {
        let white = rules.piece_count(kind, Color::White) as Score;
        let black = rules.piece_count(kind, Color::Black) as Score;
        score += piece_value(kind) * (white - black);
    }
    score
}

/// Returns the material value of a piece in pawns.
#[inline]
pub fn piece_value(kind: PieceKind) -> Score {
    PIECE_VALUES[kind.idx()]
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
