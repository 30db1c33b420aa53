//! Zobrist keys for repetition detection.
//!
//! A position's key XORs one random value per (piece, square) plus values for
//! the side to move, each castling right and a capturable en-passant file.
//! Clocks are not part of the key, so positions that differ only in their
//! move counters compare equal.

use crate::{
    board::Position,
    types::{Color, Piece, PieceKind, file_of, rank_of, sq},
};

pub struct ZobristKeys {
    /// Indexed by [color][piece_kind][square].
    pieces: [[[u64; 64]; 6]; 2],
    black_to_move: u64,
    /// [wk, wq, bk, bq]
    castling: [u64; 4],
    en_passant: [u64; 8],
}

impl ZobristKeys {
    /// Fills the table from a fixed-seed splitmix64 stream so keys are
    /// identical across runs and builds.
    const fn new() -> Self {
        const fn splitmix64(state: &mut u64) -> u64 {
            *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
            let mut z = *state;
            z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
            z ^ (z >> 31)
        }

        let mut state = 0x5EED_C0DE_CAFE_F00Du64;
        let mut pieces = [[[0u64; 64]; 6]; 2];
        let mut c = 0;
        while c < 2 {
            let mut k = 0;
            while k < 6 {
                let mut s = 0;
                while s < 64 {
                    pieces[c][k][s] = splitmix64(&mut state);
                    s += 1;
                }
                k += 1;
            }
            c += 1;
        }

        let black_to_move = splitmix64(&mut state);

        let mut castling = [0u64; 4];
        let mut i = 0;
        while i < 4 {
            castling[i] = splitmix64(&mut state);
            i += 1;
        }

        let mut en_passant = [0u64; 8];
        let mut i = 0;
        while i < 8 {
            en_passant[i] = splitmix64(&mut state);
            i += 1;
        }

        ZobristKeys {
            pieces,
            black_to_move,
            castling,
            en_passant,
        }
    }

    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: u8) -> u64 {
        self.pieces[piece.color.idx()][piece.kind.idx()][sq as usize]
    }
}

pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

impl Position {
    /// Hash of everything that makes two positions "the same" for repetition:
    /// placement, side to move, castling rights and a usable en-passant file.
    pub fn position_hash(&self) -> u64 {
        let mut h = 0u64;
        for s in 0..64u8 {
            if let Some(pc) = self.piece_at(s) {
                h ^= ZOBRIST.piece_key(pc, s);
            }
        }
        if self.side_to_move == Color::Black {
            h ^= ZOBRIST.black_to_move;
        }
        let rights = [
            self.castling.wk,
            self.castling.wq,
            self.castling.bk,
            self.castling.bq,
        ];
        for (i, on) in rights.into_iter().enumerate() {
            if on {
                h ^= ZOBRIST.castling[i];
            }
        }
        if let Some(ep) = self.en_passant
            && self.en_passant_capturable(ep)
        {
            h ^= ZOBRIST.en_passant[file_of(ep) as usize];
        }
        h
    }

    /// An en-passant square only distinguishes positions when a pawn of the
    /// side to move stands ready to take on it.
    fn en_passant_capturable(&self, ep: u8) -> bool {
        let us = self.side_to_move;
        let from_rank = match us {
            Color::White => rank_of(ep) - 1,
            Color::Black => rank_of(ep) + 1,
        };
        [-1, 1].into_iter().any(|df| {
            sq(file_of(ep) + df, from_rank)
                .is_some_and(|s| self.piece_at(s) == Some(Piece::new(us, PieceKind::Pawn)))
        })
    }
}

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
