//! Long algebraic move notation (`e2e4`, `e7e8q`).

use crate::{board::Position, movegen::legal_moves, types::*};

pub fn move_to_uci(mv: Move) -> String {
    let mut s = String::with_capacity(5);
    s.push_str(&sq_to_coord(mv.from));
    s.push_str(&sq_to_coord(mv.to));
    if let Some(p) = mv.promo {
        s.push(p.to_char());
    }
    s
}

/// Parses `txt` and matches it against the legal moves of `pos`, so the
/// castle and en-passant flags come from the move generator. Returns `None`
/// for malformed text and for moves that are not legal here.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Option<Move> {
    let txt = txt.trim();
    if !txt.is_ascii() || !(4..=5).contains(&txt.len()) {
        return None;
    }
    let from = coord_to_sq(&txt[0..2])?;
    let to = coord_to_sq(&txt[2..4])?;
    let promo = match txt.as_bytes().get(4) {
        None => None,
        Some(ch) => match ch.to_ascii_lowercase() {
            b'q' => Some(PieceKind::Queen),
            b'r' => Some(PieceKind::Rook),
            b'b' => Some(PieceKind::Bishop),
            b'n' => Some(PieceKind::Knight),
            _ => return None,
        },
    };

    legal_moves(pos)
        .into_iter()
        .find(|m| m.from == from && m.to == to && m.promo == promo)
}
