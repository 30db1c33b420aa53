use crate::{
    board::{DIAGONALS, KING_DELTAS, KNIGHT_DELTAS, ORTHOGONALS, Position, promotion_rank},
    types::*,
};

const PROMOTIONS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Generate all legal moves, returning a freshly allocated vector.
/// Internally delegates to `legal_moves_into`, cloning the position only once.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
///
/// Moves come out in square order (a1 first) and, per piece, in a fixed
/// direction order, so the enumeration is stable for a given position.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);

    let mover = pos.side_to_move;
    // Filter illegal moves in-place by playing them on the mutable position.
    out.retain(|&mv| {
        let undo = pos.make_move(mv);
        let illegal = pos.in_check(mover);
        pos.unmake_move(mv, undo);
        !illegal
    });
}

/// True when the side to move has at least one legal move.
///
/// Stops at the first piece that can move, so it is much cheaper than
/// `legal_moves` in ordinary positions.
pub fn has_legal_move(pos: &mut Position) -> bool {
    let mover = pos.side_to_move;
    let mut buf = Vec::with_capacity(32);
    for from in 0..64u8 {
        buf.clear();
        piece_moves(pos, from, &mut buf);
        let found = buf.iter().any(|&mv| {
            let undo = pos.make_move(mv);
            let legal = !pos.in_check(mover);
            pos.unmake_move(mv, undo);
            legal
        });
        if found {
            return true;
        }
    }
    false
}

fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    for from in 0..64u8 {
        piece_moves(pos, from, out);
    }
}

/// Pseudo-legal moves of the piece on `from`, if it belongs to the side to move.
fn piece_moves(pos: &Position, from: u8, out: &mut Vec<Move>) {
    let us = pos.side_to_move;
    let Some(pc) = pos.piece_at(from).filter(|pc| pc.color == us) else {
        return;
    };
    match pc.kind {
        PieceKind::Pawn => gen_pawn(pos, from, us, out),
        PieceKind::Knight => gen_steps(pos, from, us, out, &KNIGHT_DELTAS),
        PieceKind::Bishop => gen_slider(pos, from, us, out, &DIAGONALS),
        PieceKind::Rook => gen_slider(pos, from, us, out, &ORTHOGONALS),
        PieceKind::Queen => {
            gen_slider(pos, from, us, out, &DIAGONALS);
            gen_slider(pos, from, us, out, &ORTHOGONALS);
        }
        PieceKind::King => {
            gen_steps(pos, from, us, out, &KING_DELTAS);
            gen_castle(pos, from, us, out);
        }
    }
}

fn push_pawn_move(from: u8, to: u8, c: Color, out: &mut Vec<Move>) {
    if rank_of(to) == promotion_rank(c) {
        for pk in PROMOTIONS {
            let mut mv = Move::new(from, to);
            mv.promo = Some(pk);
            out.push(mv);
        }
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_pawn(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    let (dir, start_rank): (i8, i8) = match c {
        Color::White => (1, 1),
        Color::Black => (-1, 6),
    };

    if let Some(to) = sq(f, r + dir)
        && pos.piece_at(to).is_none()
    {
        push_pawn_move(from, to, c, out);
        if r == start_rank
            && let Some(to2) = sq(f, r + 2 * dir)
            && pos.piece_at(to2).is_none()
        {
            out.push(Move::new(from, to2));
        }
    }

    for df in [-1, 1] {
        let Some(to) = sq(f + df, r + dir) else {
            continue;
        };
        match pos.piece_at(to) {
            Some(target) if target.color != c => push_pawn_move(from, to, c, out),
            None if pos.en_passant == Some(to) => {
                let mut mv = Move::new(from, to);
                mv.is_en_passant = true;
                out.push(mv);
            }
            _ => {}
        }
    }
}

fn gen_steps(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>, deltas: &[(i8, i8)]) {
    let f = file_of(from);
    let r = rank_of(from);
    for (df, dr) in deltas {
        if let Some(to) = sq(f + df, r + dr)
            && pos.piece_at(to).is_none_or(|pc| pc.color != c)
        {
            out.push(Move::new(from, to));
        }
    }
}

fn gen_slider(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>, dirs: &[(i8, i8)]) {
    let f0 = file_of(from);
    let r0 = rank_of(from);
    for (df, dr) in dirs {
        let mut f = f0 + df;
        let mut r = r0 + dr;
        while let Some(to) = sq(f, r) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => {
                    out.push(Move::new(from, to));
                    break;
                }
                _ => break,
            }
            f += df;
            r += dr;
        }
    }
}

struct CastleSide {
    king_to: u8,
    rook_from: u8,
    /// Squares between king and rook that must be empty.
    empty: &'static [u8],
    /// Squares the king crosses or lands on, which must not be attacked.
    safe: [u8; 2],
}

const WHITE_CASTLES: [CastleSide; 2] = [
    CastleSide {
        king_to: 6,
        rook_from: 7,
        empty: &[5, 6],
        safe: [5, 6],
    },
    CastleSide {
        king_to: 2,
        rook_from: 0,
        empty: &[3, 2, 1],
        safe: [3, 2],
    },
];
const BLACK_CASTLES: [CastleSide; 2] = [
    CastleSide {
        king_to: 62,
        rook_from: 63,
        empty: &[61, 62],
        safe: [61, 62],
    },
    CastleSide {
        king_to: 58,
        rook_from: 56,
        empty: &[59, 58, 57],
        safe: [59, 58],
    },
];

fn gen_castle(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let (home, rights, sides) = match c {
        Color::White => (4u8, [pos.castling.wk, pos.castling.wq], &WHITE_CASTLES),
        Color::Black => (60u8, [pos.castling.bk, pos.castling.bq], &BLACK_CASTLES),
    };
    // Can't castle out of check.
    if from != home || pos.in_check(c) {
        return;
    }

    let enemy = c.other();
    let rook = Some(Piece::new(c, PieceKind::Rook));
    for (allowed, side) in rights.into_iter().zip(sides.iter()) {
        if allowed
            && pos.piece_at(side.rook_from) == rook
            && side.empty.iter().all(|&s| pos.piece_at(s).is_none())
            && side.safe.iter().all(|&s| !pos.is_square_attacked(s, enemy))
        {
            let mut mv = Move::new(home, side.king_to);
            mv.is_castle = true;
            out.push(mv);
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
