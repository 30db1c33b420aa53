use super::*;
use crate::movegen::legal_moves;

#[test]
fn test_start_fen_round_trip() {
    let pos = Position::from_fen(START_FEN).unwrap();
    assert_eq!(pos, Position::startpos());
    assert_eq!(pos.to_fen(), START_FEN);
}

#[test]
fn test_fen_round_trip_with_state() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R b Kq e3 7 42";
    assert_eq!(Position::from_fen(fen).unwrap().to_fen(), fen);
}

#[test]
fn test_fen_counters_are_optional() {
    let pos = Position::from_fen("8/8/8/4k3/8/4K3/8/8 w - -").unwrap();
    assert_eq!(pos.halfmove_clock, 0);
    assert_eq!(pos.fullmove_number, 1);
}

#[test]
fn test_fen_errors() {
    assert_eq!(
        Position::from_fen("8/8/8 w - -"),
        Err(FenError::RankCount(3))
    );
    assert_eq!(Position::from_fen("8/8"), Err(FenError::MissingFields(1)));
    assert_eq!(
        Position::from_fen("8/8/8/8/8/8/8/7x w - -"),
        Err(FenError::InvalidPiece('x'))
    );
    assert_eq!(
        Position::from_fen("8/8/8/8/8/8/8/9 w - -"),
        Err(FenError::RankWidth { rank: 1 })
    );
    assert_eq!(
        Position::from_fen("8/8/8/8/8/8/8/7 w - -"),
        Err(FenError::RankWidth { rank: 1 })
    );
    assert_eq!(
        Position::from_fen("8/8/8/8/8/8/8/8 x - -"),
        Err(FenError::InvalidSideToMove("x".into()))
    );
    assert_eq!(
        Position::from_fen("8/8/8/8/8/8/8/8 w Z -"),
        Err(FenError::InvalidCastling('Z'))
    );
    assert_eq!(
        Position::from_fen("8/8/8/8/8/8/8/8 w - z9"),
        Err(FenError::InvalidEnPassant("z9".into()))
    );
    assert_eq!(
        Position::from_fen("8/8/8/8/8/8/8/8 w - - x 1"),
        Err(FenError::InvalidCounter("x".into()))
    );
}

#[test]
fn test_make_unmake_restores_every_move() {
    let fens = [
        START_FEN,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
    ];
    for fen in fens {
        let original = Position::from_fen(fen).unwrap();
        let mut pos = original.clone();
        for mv in legal_moves(&original) {
            let undo = pos.make_move(mv);
            assert_ne!(pos, original, "{fen}: {mv} changed nothing");
            pos.unmake_move(mv, undo);
            assert_eq!(pos, original, "{fen}: {mv} was not undone");
        }
    }
}

#[test]
fn test_castling_moves_rook_and_clears_rights() {
    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let castle = legal_moves(&pos)
        .into_iter()
        .find(|m| m.is_castle && m.to == 6)
        .unwrap();
    pos.make_move(castle);
    assert_eq!(pos.piece_at(5), Some(Piece::new(Color::White, PieceKind::Rook)));
    assert_eq!(pos.piece_at(6), Some(Piece::new(Color::White, PieceKind::King)));
    assert!(!pos.castling.wk && !pos.castling.wq);
    assert!(pos.castling.bk && pos.castling.bq);
}

#[test]
fn test_sanitize_drops_orphaned_rights() {
    let mut pos = Position::startpos();
    pos.set_piece(7, None); // h1 rook removed
    pos.set_piece(60, None); // black king removed
    pos.en_passant = coord_to_sq("e3");
    pos.sanitize();
    assert!(!pos.castling.wk);
    assert!(pos.castling.wq);
    assert!(!pos.castling.bk && !pos.castling.bq);
    assert_eq!(pos.en_passant, None);
}

#[test]
fn test_sanitize_keeps_valid_en_passant() {
    let mut pos =
        Position::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3").unwrap();
    pos.sanitize();
    assert_eq!(pos.en_passant, coord_to_sq("f6"));
}

#[test]
fn test_fen_ignores_en_passant_without_enemy_pawn() {
    // e6 is named, but a white knight stands on e5 where the black pawn should be.
    let pos = Position::from_fen("4k3/8/8/3PN3/8/8/8/4K3 w - e6 0 1").unwrap();
    assert_eq!(pos.en_passant, None);
    assert_eq!(pos.to_fen(), "4k3/8/8/3PN3/8/8/8/4K3 w - - 0 1");
    assert!(legal_moves(&pos).iter().all(|m| !m.is_en_passant));

    // Wrong rank for the side to move.
    let pos = Position::from_fen("4k3/8/8/8/4P3/8/8/4K3 w - e3 0 1").unwrap();
    assert_eq!(pos.en_passant, None);

    let pos = Position::from_fen("4k3/8/8/3Pp3/8/8/8/4K3 w - e6 0 1").unwrap();
    assert_eq!(pos.en_passant, coord_to_sq("e6"));
    assert!(legal_moves(&pos).iter().any(|m| m.is_en_passant));
}

#[test]
fn test_mirrored_swaps_colors() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
    let m = pos.mirrored();
    assert_eq!(m.piece_at(56), Some(Piece::new(Color::Black, PieceKind::Rook))); // a8
    assert_eq!(m.piece_at(4), Some(Piece::new(Color::White, PieceKind::King))); // e1
    assert_eq!(m.side_to_move, Color::Black);
    assert!(m.castling.bq && !m.castling.wq);
    assert_eq!(m.mirrored(), pos);
}

#[test]
fn test_pieces_bitboard() {
    let pos = Position::startpos();
    assert_eq!(pos.pieces(PieceKind::Pawn, Color::White).len(), 8);
    assert_eq!(pos.pieces(PieceKind::Queen, Color::Black).len(), 1);
    assert_eq!(pos.king_sq(Color::White), Some(4));
}

#[test]
fn test_display_start_position() {
    let text = Position::startpos().to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "r n b q k b n r");
    assert_eq!(lines[4], ". . . . . . . .");
    assert_eq!(lines[7], "R N B Q K B N R");
}
