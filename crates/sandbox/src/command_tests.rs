use super::*;
use chess_core::{PieceKind, coord_to_sq};
use minimax_engine::Difficulty;

fn parse(line: &str) -> Result<Command, SandboxError> {
    line.parse()
}

fn square(name: &str) -> u8 {
    coord_to_sq(name).unwrap()
}

#[test]
fn test_simple_commands() {
    assert_eq!(parse("show").unwrap(), Command::Show);
    assert_eq!(parse("  EDIT ").unwrap(), Command::Edit);
    assert_eq!(parse("undo").unwrap(), Command::Undo);
    assert_eq!(parse("exit").unwrap(), Command::Quit);
    assert_eq!(parse("auto").unwrap(), Command::Auto(DEFAULT_AUTO_PLIES));
    assert_eq!(parse("auto 12").unwrap(), Command::Auto(12));
}

#[test]
fn test_fen_keeps_every_field() {
    assert_eq!(parse("fen").unwrap(), Command::Fen(None));
    assert_eq!(
        parse("fen 8/8/8/4k3/8/8/8/4K3 w - - 0 1").unwrap(),
        Command::Fen(Some("8/8/8/4k3/8/8/8/4K3 w - - 0 1".to_string()))
    );
}

#[test]
fn test_editor_commands() {
    assert_eq!(
        parse("place e4 N").unwrap(),
        Command::Place(square("e4"), Piece::new(Color::White, PieceKind::Knight))
    );
    assert_eq!(
        parse("place H8 q").unwrap(),
        Command::Place(square("h8"), Piece::new(Color::Black, PieceKind::Queen))
    );
    assert_eq!(parse("remove a1").unwrap(), Command::Remove(square("a1")));
    assert_eq!(
        parse("drag d1 h5").unwrap(),
        Command::Drag(square("d1"), square("h5"))
    );
}

#[test]
fn test_player_modes() {
    assert_eq!(
        parse("white perfect").unwrap(),
        Command::SetMode(Color::White, PlayerMode::Bot(Difficulty::Perfect))
    );
    assert_eq!(
        parse("black human").unwrap(),
        Command::SetMode(Color::Black, PlayerMode::Human)
    );
    assert!(matches!(
        parse("black strong"),
        Err(SandboxError::UnknownMode(m)) if m == "strong"
    ));
}

#[test]
fn test_bad_input() {
    assert!(matches!(parse("castle"), Err(SandboxError::UnknownCommand(c)) if c == "castle"));
    assert!(matches!(parse(""), Err(SandboxError::UnknownCommand(_))));
    assert!(matches!(parse("move"), Err(SandboxError::MissingArgument("move"))));
    assert!(matches!(parse("place e4"), Err(SandboxError::MissingArgument("place"))));
    assert!(matches!(parse("place e9 N"), Err(SandboxError::Square(_))));
    assert!(matches!(parse("place e4 X"), Err(SandboxError::InvalidPiece(_))));
    assert!(matches!(parse("place e4 Nb"), Err(SandboxError::InvalidPiece(_))));
    assert!(matches!(parse("auto -3"), Err(SandboxError::InvalidCount(_))));
}

#[test]
fn test_move_text_is_passed_through() {
    assert_eq!(parse("move e7e8q").unwrap(), Command::Move("e7e8q".to_string()));
}
