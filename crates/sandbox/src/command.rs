//! Text commands understood by the sandbox front end.

use std::str::FromStr;

use chess_core::{Color, Piece, parse_square};

use crate::{PlayerMode, SandboxError};

/// Plies `auto` plays when no count is given.
pub const DEFAULT_AUTO_PLIES: usize = 100;

pub const HELP: &str = "\
commands:
  show                  print the board
  fen [<fen>]           print the FEN, or load one
  edit                  toggle edit mode
  place <sq> <piece>    put a piece (FEN letter, e.g. N or q) on a square
  remove <sq>           take the piece off a square
  drag <from> <to>      move a piece freely, capturing what is there
  clear                 empty the board
  reset                 back to the starting position
  flip                  flip the board
  white <mode>          human, great or perfect
  black <mode>          human, great or perfect
  move <uci>            play a move, e.g. e2e4 or e7e8q
  undo                  take back the last move
  bot                   let the bot on move play once
  auto [n]              let bots play up to n plies
  help                  this text
  quit                  leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Fen(Option<String>),
    Edit,
    Place(u8, Piece),
    Remove(u8),
    Drag(u8, u8),
    Clear,
    Reset,
    Flip,
    SetMode(Color, PlayerMode),
    Move(String),
    Undo,
    Bot,
    Auto(usize),
    Help,
    Quit,
}

fn parse_piece(token: &str) -> Result<Piece, SandboxError> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => {
            Piece::from_char(ch).ok_or_else(|| SandboxError::InvalidPiece(token.to_string()))
        }
        _ => Err(SandboxError::InvalidPiece(token.to_string())),
    }
}

impl FromStr for Command {
    type Err = SandboxError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&name, args)) = parts.split_first() else {
            return Err(SandboxError::UnknownCommand(String::new()));
        };
        let arg = |i: usize, command: &'static str| {
            args.get(i).copied().ok_or(SandboxError::MissingArgument(command))
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "show" | "board" => Command::Show,
            "fen" if args.is_empty() => Command::Fen(None),
            "fen" => Command::Fen(Some(args.join(" "))),
            "edit" => Command::Edit,
            "place" => Command::Place(
                parse_square(arg(0, "place")?)?,
                parse_piece(arg(1, "place")?)?,
            ),
            "remove" => Command::Remove(parse_square(arg(0, "remove")?)?),
            "drag" => Command::Drag(
                parse_square(arg(0, "drag")?)?,
                parse_square(arg(1, "drag")?)?,
            ),
            "clear" => Command::Clear,
            "reset" => Command::Reset,
            "flip" => Command::Flip,
            "white" => Command::SetMode(Color::White, arg(0, "white")?.parse()?),
            "black" => Command::SetMode(Color::Black, arg(0, "black")?.parse()?),
            "move" => Command::Move(arg(0, "move")?.to_string()),
            "undo" => Command::Undo,
            "bot" => Command::Bot,
            "auto" => match args.first() {
                None => Command::Auto(DEFAULT_AUTO_PLIES),
                Some(n) => Command::Auto(
                    n.parse()
                        .map_err(|_| SandboxError::InvalidCount(n.to_string()))?,
                ),
            },
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(SandboxError::UnknownCommand(name.to_string())),
        };
        Ok(command)
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod command_tests;
