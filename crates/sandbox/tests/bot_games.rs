//! Whole games driven through the sandbox
//!
//! A seeded random "human" plays against a bot, and scripted command
//! sessions exercise the editor and the turn driver together.

use chess_core::{Color, legal_moves};
use chess_sandbox::{Command, PlayerMode, Sandbox, SandboxError};
use minimax_engine::Difficulty;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

const GREAT: PlayerMode = PlayerMode::Bot(Difficulty::Great);

fn run(sandbox: &mut Sandbox, line: &str) -> Result<String, SandboxError> {
    sandbox.execute(line.parse::<Command>()?)
}

#[test]
fn test_random_human_against_bot() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut sandbox = Sandbox::new();
    sandbox.set_mode(Color::Black, GREAT);

    for _ in 0..20 {
        if sandbox.game().is_game_over() {
            break;
        }
        let moves = sandbox.game().legal_moves();
        let mv = *moves.choose(&mut rng).unwrap();
        sandbox.play_move(&mv.to_string()).unwrap();

        let before = sandbox.game().position().clone();
        if let Some(reply) = sandbox.bot_step() {
            assert!(legal_moves(&before).contains(&reply), "bot played {reply}");
            assert_eq!(sandbox.game().turn(), Color::White);
        }
    }
    assert!(sandbox.game().move_stack().count() >= 2);
}

#[test]
fn test_scripted_session() {
    let mut sandbox = Sandbox::new();
    for line in ["move e2e4", "move e7e5", "move d1h5"] {
        run(&mut sandbox, line).unwrap();
    }
    // Handing Black to a bot lets it answer straight away.
    let reply = run(&mut sandbox, "black great").unwrap();
    assert!(reply.contains("bot plays"), "{reply}");
    assert_eq!(sandbox.game().move_stack().count(), 4);
    assert_eq!(sandbox.game().turn(), Color::White);
    assert_eq!(run(&mut sandbox, "bot").unwrap(), "no bot to move");

    // Build an endgame by hand, then let the bot answer.
    for line in [
        "clear",
        "edit",
        "place e1 K",
        "place e8 k",
        "place d5 q",
        "place d1 R",
        "edit",
        "black human",
        "white great",
    ] {
        run(&mut sandbox, line).unwrap();
    }
    assert_eq!(sandbox.fen(), "4k3/8/8/3R4/8/8/8/4K3 b - - 0 1");
}

#[test]
fn test_human_move_gets_one_bot_reply() {
    let mut sandbox = Sandbox::new();
    run(&mut sandbox, "black great").unwrap();
    // White is human, so nothing happens yet.
    assert_eq!(sandbox.game().move_stack().count(), 0);

    let reply = run(&mut sandbox, "move e2e4").unwrap();
    let last = reply.lines().last().unwrap();
    let bot_move = sandbox.game().peek().unwrap();
    assert_eq!(last, format!("bot plays {bot_move}"));
    assert_eq!(sandbox.game().move_stack().count(), 2);

    // With both sides on bots, a human move still buys only one reply.
    run(&mut sandbox, "white great").unwrap();
    assert_eq!(sandbox.game().move_stack().count(), 3);
    let mv = sandbox.game().legal_moves()[0];
    run(&mut sandbox, &format!("move {mv}")).unwrap();
    assert_eq!(sandbox.game().move_stack().count(), 5);
    assert_eq!(sandbox.game().turn(), Color::Black);
}

#[test]
fn test_command_replies() {
    let mut sandbox = Sandbox::new();
    assert_eq!(run(&mut sandbox, "fen").unwrap(), chess_core::START_FEN);
    assert_eq!(run(&mut sandbox, "undo").unwrap(), "nothing to undo");
    assert_eq!(run(&mut sandbox, "help").unwrap(), chess_sandbox::HELP);
    assert!(run(&mut sandbox, "show").unwrap().ends_with("white to move"));

    run(&mut sandbox, "move g1f3").unwrap();
    assert!(run(&mut sandbox, "undo").unwrap().starts_with("took back g1f3"));

    run(&mut sandbox, "white great").unwrap();
    run(&mut sandbox, "black great").unwrap();
    let reply = run(&mut sandbox, "auto 3").unwrap();
    assert!(reply.ends_with("3 plies played"), "{reply}");
    assert_eq!(run(&mut sandbox, "quit").unwrap(), "");
}

#[test]
fn test_editor_rejections_leave_state_alone() {
    let mut sandbox = Sandbox::new();
    run(&mut sandbox, "edit").unwrap();
    assert!(matches!(run(&mut sandbox, "move e2e4"), Err(SandboxError::EditMode)));
    assert!(matches!(run(&mut sandbox, "drag e4 e5"), Err(SandboxError::EmptySquare(_))));
    assert!(matches!(run(&mut sandbox, "fen 8/8 w"), Err(SandboxError::Fen(_))));
    assert!(matches!(run(&mut sandbox, "place z9 K"), Err(SandboxError::Square(_))));
    assert_eq!(sandbox.fen(), chess_core::START_FEN);
}

#[test]
fn test_bots_play_out_a_short_endgame() {
    // King and rook against king: bots play until the ply cap or the game ends.
    let mut sandbox = Sandbox::new();
    sandbox.set_fen("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
    sandbox.set_mode(Color::White, GREAT);
    sandbox.set_mode(Color::Black, GREAT);
    let played = sandbox.run_bots(12);
    assert!(!played.is_empty());
    assert_eq!(sandbox.game().move_stack().count(), played.len());
    assert!(played.len() == 12 || sandbox.game().is_game_over());
}
