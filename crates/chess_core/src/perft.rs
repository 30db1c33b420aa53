//! Move-path enumeration for validating a [`RulesEngine`].

use crate::rules::RulesEngine;

/// Counts the leaf nodes of the legal move tree `depth` plies deep.
///
/// Runs entirely through `push`/`pop`, so besides checking move generation it
/// also exercises the undo contract: the engine must be unchanged afterwards.
pub fn perft<R: RulesEngine>(rules: &mut R, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = rules.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for mv in moves {
        rules.push(mv);
        nodes += perft(rules, depth - 1);
        rules.pop();
    }
    nodes
}

/// Per-root-move leaf counts, in move generation order.
pub fn perft_divide<R: RulesEngine>(rules: &mut R, depth: u8) -> Vec<(R::Move, u64)> {
    let moves = rules.legal_moves();
    let mut out = Vec::with_capacity(moves.len());
    for mv in moves {
        rules.push(mv);
        out.push((mv, perft(rules, depth.saturating_sub(1))));
        rules.pop();
    }
    out
}
