use super::*;
use crate::types::{Color, PieceKind};

#[test]
fn test_zobrist_keys_unique() {
    let mut seen = std::collections::HashSet::new();

    for color in 0..2 {
        for piece in 0..6 {
            for sq in 0..64 {
                let key = ZOBRIST.pieces[color][piece][sq];
                assert!(seen.insert(key), "Duplicate Zobrist key found");
            }
        }
    }
    assert!(seen.insert(ZOBRIST.black_to_move), "Side to move key collision");
    for key in ZOBRIST.castling {
        assert!(seen.insert(key), "Castling key collision");
    }
    for key in ZOBRIST.en_passant {
        assert!(seen.insert(key), "En passant key collision");
    }
}

#[test]
fn test_zobrist_piece_key() {
    let piece = Piece::new(Color::White, PieceKind::Pawn);
    assert_ne!(ZOBRIST.piece_key(piece, 0), ZOBRIST.piece_key(piece, 1));
}

#[test]
fn test_uncapturable_en_passant_is_ignored() {
    // After 1.e4 no black pawn can take on e3.
    let with_ep =
        Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1").unwrap();
    let without_ep =
        Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1").unwrap();
    assert_eq!(with_ep.position_hash(), without_ep.position_hash());
}

#[test]
fn test_capturable_en_passant_changes_hash() {
    // Black pawn on d4 can take e3 en passant.
    let with_ep =
        Position::from_fen("rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 3").unwrap();
    let without_ep =
        Position::from_fen("rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 3").unwrap();
    assert_ne!(with_ep.position_hash(), without_ep.position_hash());
}
