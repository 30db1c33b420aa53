use std::fmt;

use thiserror::Error;

use crate::{bitboard::Bitboard, types::*};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        wk: true,
        wq: true,
        bk: true,
        bq: true,
    };
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Undo {
    pub captured: Option<Piece>,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub moved_piece: Piece,
    pub rook_move: Option<(u8, u8)>, // (rook_from, rook_to) for castling
    pub ep_captured_sq: Option<u8>,  // square actually captured in en-passant
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected at least 4 space-separated fields, found {0}")]
    MissingFields(usize),
    #[error("expected 8 ranks in the board field, found {0}")]
    RankCount(usize),
    #[error("rank {rank} does not describe exactly 8 files")]
    RankWidth { rank: usize },
    #[error("invalid piece character `{0}`")]
    InvalidPiece(char),
    #[error("invalid side to move `{0}`")]
    InvalidSideToMove(String),
    #[error("invalid castling character `{0}`")]
    InvalidCastling(char),
    #[error("invalid en-passant square `{0}`")]
    InvalidEnPassant(String),
    #[error("invalid move counter `{0}`")]
    InvalidCounter(String),
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    /// A board with no pieces, White to move and no castling rights.
    pub fn empty() -> Self {
        Position {
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::default(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn startpos() -> Self {
        let mut p = Position::empty();
        p.castling = CastlingRights::ALL;

        for f in 0..8 {
            p.board[8 + f] = Some(Piece::new(Color::White, PieceKind::Pawn));
            p.board[48 + f] = Some(Piece::new(Color::Black, PieceKind::Pawn));
        }
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            p.board[f] = Some(Piece::new(Color::White, kind));
            p.board[56 + f] = Some(Piece::new(Color::Black, kind));
        }
        p
    }

    /// Parses Forsyth-Edwards Notation. The two move counters are optional.
    /// An en-passant square with no enemy pawn in front of it is ignored.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::MissingFields(parts.len()));
        }

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }

        let mut pos = Position::empty();
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank: i8 = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            let mut file: i8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let piece = Piece::from_char(ch).ok_or(FenError::InvalidPiece(ch))?;
                    let s = sq(file, rank).ok_or(FenError::RankWidth { rank: 8 - rank_idx })?;
                    pos.board[s as usize] = Some(piece);
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::RankWidth { rank: 8 - rank_idx });
                }
            }
            if file != 8 {
                return Err(FenError::RankWidth { rank: 8 - rank_idx });
            }
        }

        pos.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidSideToMove(other.to_string())),
        };

        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => pos.castling.wk = true,
                    'Q' => pos.castling.wq = true,
                    'k' => pos.castling.bk = true,
                    'q' => pos.castling.bq = true,
                    _ => return Err(FenError::InvalidCastling(c)),
                }
            }
        }

        pos.en_passant = match parts[3] {
            "-" => None,
            ep => Some(coord_to_sq(ep).ok_or_else(|| FenError::InvalidEnPassant(ep.to_string()))?),
        };

        let counter = |txt: &str| {
            txt.parse::<u32>()
                .map_err(|_| FenError::InvalidCounter(txt.to_string()))
        };
        pos.halfmove_clock = counter(parts.get(4).copied().unwrap_or("0"))?;
        pos.fullmove_number = counter(parts.get(5).copied().unwrap_or("1"))?;

        pos.drop_invalid_en_passant();
        Ok(pos)
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(90);
        for rank in (0..8i8).rev() {
            let mut empty = 0;
            for file in 0..8i8 {
                let s = (rank * 8 + file) as u8;
                match self.piece_at(s) {
                    Some(pc) => {
                        if empty > 0 {
                            fen.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        fen.push(pc.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push(char::from(b'0' + empty));
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        let before = fen.len();
        for (flag, ch) in [
            (self.castling.wk, 'K'),
            (self.castling.wq, 'Q'),
            (self.castling.bk, 'k'),
            (self.castling.bq, 'q'),
        ] {
            if flag {
                fen.push(ch);
            }
        }
        if fen.len() == before {
            fen.push('-');
        }

        fen.push(' ');
        match self.en_passant {
            Some(ep) => fen.push_str(&sq_to_coord(ep)),
            None => fen.push('-'),
        }

        fen.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        fen
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        self.pieces(PieceKind::King, c).squares().next()
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }
    pub fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        self.board[sq as usize] = pc;
    }

    /// Squares holding a piece of the given kind and color.
    pub fn pieces(&self, kind: PieceKind, color: Color) -> Bitboard {
        let wanted = Some(Piece::new(color, kind));
        (0..64u8).filter(|&s| self.piece_at(s) == wanted).collect()
    }

    /// Drops castling rights and the en-passant square when the pieces that
    /// justify them are no longer in place. Called after free board edits.
    pub fn sanitize(&mut self) {
        let has = |pos: &Position, s: u8, color: Color, kind: PieceKind| {
            pos.piece_at(s) == Some(Piece::new(color, kind))
        };
        let white_king_home = has(self, 4, Color::White, PieceKind::King);
        let black_king_home = has(self, 60, Color::Black, PieceKind::King);
        self.castling.wk &= white_king_home && has(self, 7, Color::White, PieceKind::Rook);
        self.castling.wq &= white_king_home && has(self, 0, Color::White, PieceKind::Rook);
        self.castling.bk &= black_king_home && has(self, 63, Color::Black, PieceKind::Rook);
        self.castling.bq &= black_king_home && has(self, 56, Color::Black, PieceKind::Rook);

        self.drop_invalid_en_passant();
    }

    fn drop_invalid_en_passant(&mut self) {
        let Some(ep) = self.en_passant else {
            return;
        };
        // The pawn that just double-stepped sits one rank beyond the ep square.
        let (expected_rank, pawn_rank, pawn_color) = match self.side_to_move {
            Color::White => (5, 4, Color::Black),
            Color::Black => (2, 3, Color::White),
        };
        let pawn = Some(Piece::new(pawn_color, PieceKind::Pawn));
        let valid = rank_of(ep) == expected_rank
            && self.piece_at(ep).is_none()
            && sq(file_of(ep), pawn_rank).is_some_and(|s| self.piece_at(s) == pawn);
        if !valid {
            self.en_passant = None;
        }
    }

    /// The same placement with colors swapped and ranks mirrored, the other
    /// side to move, and castling rights exchanged.
    pub fn mirrored(&self) -> Position {
        let mut out = Position::empty();
        for s in 0..64u8 {
            if let Some(pc) = self.piece_at(s) {
                out.set_piece(s ^ 56, Some(Piece::new(pc.color.other(), pc.kind)));
            }
        }
        out.side_to_move = self.side_to_move.other();
        out.castling = CastlingRights {
            wk: self.castling.bk,
            wq: self.castling.bq,
            bk: self.castling.wk,
            bq: self.castling.wq,
        };
        out.en_passant = self.en_passant.map(|ep| ep ^ 56);
        out.halfmove_clock = self.halfmove_clock;
        out.fullmove_number = self.fullmove_number;
        out
    }

    pub fn in_check(&self, c: Color) -> bool {
        let ksq = match self.king_sq(c) {
            Some(s) => s,
            None => return false,
        };
        self.is_square_attacked(ksq, c.other())
    }

    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        let tf = file_of(target);
        let tr = rank_of(target);
        let holds = |s: u8, kinds: &[PieceKind]| {
            self.piece_at(s)
                .is_some_and(|pc| pc.color == by && kinds.contains(&pc.kind))
        };

        // An attacking pawn sits one rank behind the target from its own point of view.
        let pawn_rank = match by {
            Color::White => -1,
            Color::Black => 1,
        };
        for df in [-1, 1] {
            if sq(tf + df, tr + pawn_rank).is_some_and(|s| holds(s, &[PieceKind::Pawn])) {
                return true;
            }
        }

        for (df, dr) in KNIGHT_DELTAS {
            if sq(tf + df, tr + dr).is_some_and(|s| holds(s, &[PieceKind::Knight])) {
                return true;
            }
        }

        for (df, dr) in KING_DELTAS {
            if sq(tf + df, tr + dr).is_some_and(|s| holds(s, &[PieceKind::King])) {
                return true;
            }
        }

        let sliders: [(&[(i8, i8)], [PieceKind; 2]); 2] = [
            (&DIAGONALS, [PieceKind::Bishop, PieceKind::Queen]),
            (&ORTHOGONALS, [PieceKind::Rook, PieceKind::Queen]),
        ];
        for (dirs, kinds) in sliders {
            for &(df, dr) in dirs {
                let mut f = tf + df;
                let mut r = tr + dr;
                while let Some(s) = sq(f, r) {
                    if self.piece_at(s).is_some() {
                        if holds(s, &kinds) {
                            return true;
                        }
                        break;
                    }
                    f += df;
                    r += dr;
                }
            }
        }

        false
    }

    /// Fifty moves by each side without a capture or pawn move; claimable.
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Seventy-five moves by each side without a capture or pawn move; automatic.
    pub fn is_seventyfive_move_draw(&self) -> bool {
        self.halfmove_clock >= 150
    }

    /// Neither side can ever deliver mate: no pawns, rooks or queens, and either
    /// at most one minor piece on the board or only bishops all on one square color.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = Bitboard::EMPTY;
        let mut bishops = Bitboard::EMPTY;
        for color in Color::ALL {
            for kind in [PieceKind::Pawn, PieceKind::Rook, PieceKind::Queen] {
                if !self.pieces(kind, color).is_empty() {
                    return false;
                }
            }
            let b = self.pieces(PieceKind::Bishop, color);
            bishops |= b;
            minors |= b | self.pieces(PieceKind::Knight, color);
        }

        if minors.len() <= 1 {
            return true;
        }
        // More than one minor: only drawn when every one is a bishop on the same color.
        minors == bishops
            && ((bishops & Bitboard::LIGHT_SQUARES).is_empty()
                || (bishops & Bitboard::DARK_SQUARES).is_empty())
    }

    pub fn make_move(&mut self, mv: Move) -> Undo {
        let from = mv.from;
        let to = mv.to;
        let moved = self.piece_at(from).expect("no piece on from-square");
        let mut captured = self.piece_at(to);
        let prev_castling = self.castling.clone();
        let prev_ep = self.en_passant;
        let prev_hmc = self.halfmove_clock;
        let prev_fmn = self.fullmove_number;

        self.en_passant = None;

        let mut reset_hmc = moved.kind == PieceKind::Pawn || captured.is_some();

        let mut ep_captured_sq = None;
        if mv.is_en_passant {
            let dir = match moved.color {
                Color::White => -1,
                Color::Black => 1,
            };
            if let Some(cs) = sq(file_of(to), rank_of(to) + dir) {
                captured = self.piece_at(cs);
                self.set_piece(cs, None);
                ep_captured_sq = Some(cs);
                reset_hmc = true;
            }
        }

        self.set_piece(from, None);
        self.set_piece(to, Some(moved));

        if moved.kind == PieceKind::Pawn && rank_of(to) == promotion_rank(moved.color) {
            let promo = mv.promo.unwrap_or(PieceKind::Queen);
            self.set_piece(to, Some(Piece::new(moved.color, promo)));
        }

        // White: e1->g1 rook h1->f1, e1->c1 rook a1->d1
        // Black: e8->g8 rook h8->f8, e8->c8 rook a8->d8
        let mut rook_move = None;
        if mv.is_castle && moved.kind == PieceKind::King {
            let rook_squares = match (moved.color, from, to) {
                (Color::White, 4, 6) => Some((7, 5)),
                (Color::White, 4, 2) => Some((0, 3)),
                (Color::Black, 60, 62) => Some((63, 61)),
                (Color::Black, 60, 58) => Some((56, 59)),
                _ => None,
            };
            if let Some((rf, rt)) = rook_squares {
                let rook = self.piece_at(rf).expect("castling without a rook");
                self.set_piece(rf, None);
                self.set_piece(rt, Some(rook));
                rook_move = Some((rf, rt));
            }
        }

        // A king or rook leaving home, or a rook captured at home, loses the right.
        for touched in [from, to] {
            match touched {
                0 => self.castling.wq = false,
                7 => self.castling.wk = false,
                56 => self.castling.bq = false,
                63 => self.castling.bk = false,
                _ => {}
            }
        }
        if moved.kind == PieceKind::King {
            match moved.color {
                Color::White => {
                    self.castling.wk = false;
                    self.castling.wq = false;
                }
                Color::Black => {
                    self.castling.bk = false;
                    self.castling.bq = false;
                }
            }
        }

        if moved.kind == PieceKind::Pawn && (rank_of(to) - rank_of(from)).abs() == 2 {
            self.en_passant = sq(file_of(from), (rank_of(from) + rank_of(to)) / 2);
        }

        self.halfmove_clock = if reset_hmc {
            0
        } else {
            self.halfmove_clock + 1
        };

        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();

        Undo {
            captured,
            castling: prev_castling,
            en_passant: prev_ep,
            halfmove_clock: prev_hmc,
            fullmove_number: prev_fmn,
            moved_piece: moved,
            rook_move,
            ep_captured_sq,
        }
    }

    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;

        if let Some((rf, rt)) = undo.rook_move {
            let rook = self.piece_at(rt);
            self.set_piece(rt, None);
            self.set_piece(rf, rook);
        }

        // Promotions are reverted by putting the original piece back.
        self.set_piece(mv.to, None);
        self.set_piece(mv.from, Some(undo.moved_piece));

        match undo.ep_captured_sq {
            Some(cs) => self.set_piece(cs, undo.captured),
            None => self.set_piece(mv.to, undo.captured),
        }
    }
}

pub(crate) fn promotion_rank(c: Color) -> i8 {
    match c {
        Color::White => 7,
        Color::Black => 0,
    }
}

pub(crate) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

pub(crate) const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            for file in 0..8u8 {
                let ch = self
                    .piece_at(rank * 8 + file)
                    .map(Piece::to_char)
                    .unwrap_or('.');
                if file > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
