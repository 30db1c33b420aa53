//! The sandbox: a board editor plus a turn driver for humans and bots.

use std::fmt::Write as _;

use chess_core::{Color, Game, Move, Piece, Position, parse_uci_move, sq_to_coord};
use minimax_engine::MinimaxEngine;
use tracing::{debug, info};

use crate::{Command, HELP, PlayerMode, SandboxConfig, SandboxError};

/// Bot plies played after a human move or a mode change, enough to answer once.
pub const REPLY_PLIES: usize = 1;

/// Owns the game and everything around it. The engine borrows the game only
/// for the duration of a bot move.
#[derive(Debug, Clone)]
pub struct Sandbox {
    game: Game,
    edit_mode: bool,
    flipped: bool,
    white: PlayerMode,
    black: PlayerMode,
    engine: MinimaxEngine,
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Sandbox {
    /// Start position, both sides human, play mode.
    pub fn new() -> Self {
        Self::with_game(Game::new())
    }

    pub fn with_game(game: Game) -> Self {
        Self {
            game,
            edit_mode: false,
            flipped: false,
            white: PlayerMode::Human,
            black: PlayerMode::Human,
            engine: MinimaxEngine::new(),
        }
    }

    pub fn from_config(config: &SandboxConfig) -> Result<Self, SandboxError> {
        let position = Position::from_fen(&config.start_fen)?;
        let mut sandbox = Self::with_game(Game::from_position(position));
        sandbox.flipped = config.flipped;
        sandbox.white = config.white;
        sandbox.black = config.black;
        Ok(sandbox)
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn toggle_edit(&mut self) -> bool {
        self.edit_mode = !self.edit_mode;
        info!(edit_mode = self.edit_mode, "edit mode toggled");
        self.edit_mode
    }

    pub fn flip_board(&mut self) -> bool {
        self.flipped = !self.flipped;
        self.flipped
    }

    pub fn mode(&self, color: Color) -> PlayerMode {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    pub fn set_mode(&mut self, color: Color, mode: PlayerMode) {
        match color {
            Color::White => self.white = mode,
            Color::Black => self.black = mode,
        }
        info!(%color, %mode, "player mode set");
    }

    // Board editing. Edits work in either mode and clear the move stack.

    /// Drops a piece from the library onto `square`, replacing what was there.
    pub fn place_piece(&mut self, square: u8, piece: Piece) {
        self.game.edit(|pos| pos.set_piece(square, Some(piece)));
        info!(square = %sq_to_coord(square), piece = %piece.to_char(), "piece placed");
    }

    /// Takes the piece off `square`, if any.
    pub fn remove_piece(&mut self, square: u8) -> Option<Piece> {
        let removed = self.game.position().piece_at(square)?;
        self.game.edit(|pos| pos.set_piece(square, None));
        info!(square = %sq_to_coord(square), piece = %removed.to_char(), "piece removed");
        Some(removed)
    }

    /// Drags the piece on `from` to `to`, capturing whatever stood there.
    /// No legality check: this is the editor, not a move.
    pub fn move_piece(&mut self, from: u8, to: u8) -> Result<Piece, SandboxError> {
        let piece = self
            .game
            .position()
            .piece_at(from)
            .ok_or_else(|| SandboxError::EmptySquare(sq_to_coord(from)))?;
        if from != to {
            self.game.edit(|pos| {
                pos.set_piece(from, None);
                pos.set_piece(to, Some(piece));
            });
            info!(from = %sq_to_coord(from), to = %sq_to_coord(to), "piece dragged");
        }
        Ok(piece)
    }

    /// Empties the board.
    pub fn clear_board(&mut self) {
        self.game.clear();
        info!("board cleared");
    }

    /// Back to the starting position.
    pub fn reset_board(&mut self) {
        self.game.reset();
        info!("board reset");
    }

    pub fn set_fen(&mut self, fen: &str) -> Result<(), SandboxError> {
        let position = Position::from_fen(fen)?;
        self.game.set_position(position);
        info!(fen, "position loaded");
        Ok(())
    }

    pub fn fen(&self) -> String {
        self.game.position().to_fen()
    }

    // Play.

    /// Plays a human move given in UCI notation (`e2e4`, `e7e8q`).
    pub fn play_move(&mut self, uci: &str) -> Result<Move, SandboxError> {
        if self.edit_mode {
            return Err(SandboxError::EditMode);
        }
        if let Some(outcome) = self.game.outcome() {
            return Err(SandboxError::GameOver(outcome));
        }
        let text = uci.trim().to_ascii_lowercase();
        let mv = parse_uci_move(self.game.position(), &text)
            .ok_or_else(|| SandboxError::IllegalMove(uci.trim().to_string()))?;
        self.game.push(mv);
        info!(%mv, "human move");
        Ok(mv)
    }

    /// Lets the bot on move play once. `None` if the game is over, the side
    /// to move is human, or the board is being edited.
    pub fn bot_step(&mut self) -> Option<Move> {
        if self.edit_mode || self.game.is_game_over() {
            return None;
        }
        let color = self.game.turn();
        let PlayerMode::Bot(difficulty) = self.mode(color) else {
            return None;
        };

        let result = self.engine.play(&mut self.game, difficulty);
        let mv = result.best_move?;
        self.game.push(mv);
        debug!(
            %color,
            %difficulty,
            %mv,
            score = result.score,
            nodes = result.nodes,
            "bot move"
        );
        Some(mv)
    }

    /// Runs `bot_step` until it yields nothing or `max_plies` moves were made.
    pub fn run_bots(&mut self, max_plies: usize) -> Vec<Move> {
        let mut played = Vec::new();
        while played.len() < max_plies {
            match self.bot_step() {
                Some(mv) => played.push(mv),
                None => break,
            }
        }
        played
    }

    /// Applies one front-end command and returns the text to print. After a
    /// human move or a mode change, a bot on move answers once.
    pub fn execute(&mut self, command: Command) -> Result<String, SandboxError> {
        let reply = match command {
            Command::Show => self.render(),
            Command::Help => HELP.to_string(),
            Command::Fen(None) => self.fen(),
            Command::Fen(Some(fen)) => {
                self.set_fen(&fen)?;
                self.render()
            }
            Command::Edit => {
                self.toggle_edit();
                self.render()
            }
            Command::Place(square, piece) => {
                self.place_piece(square, piece);
                self.render()
            }
            Command::Remove(square) => {
                self.remove_piece(square);
                self.render()
            }
            Command::Drag(from, to) => {
                self.move_piece(from, to)?;
                self.render()
            }
            Command::Clear => {
                self.clear_board();
                self.render()
            }
            Command::Reset => {
                self.reset_board();
                self.render()
            }
            Command::Flip => {
                self.flip_board();
                self.render()
            }
            Command::SetMode(color, mode) => {
                self.set_mode(color, mode);
                let replies = self.run_bots(REPLY_PLIES);
                self.render_with_replies(&replies)
            }
            Command::Move(uci) => {
                self.play_move(&uci)?;
                let replies = self.run_bots(REPLY_PLIES);
                self.render_with_replies(&replies)
            }
            Command::Undo => match self.undo() {
                Some(mv) => format!("took back {mv}\n{}", self.render()),
                None => "nothing to undo".to_string(),
            },
            Command::Bot => match self.bot_step() {
                Some(mv) => self.render_with_replies(&[mv]),
                None => "no bot to move".to_string(),
            },
            Command::Auto(plies) => {
                let played = self.run_bots(plies);
                format!("{}\n{} plies played", self.render(), played.len())
            }
            Command::Quit => String::new(),
        };
        Ok(reply)
    }

    fn render_with_replies(&self, replies: &[Move]) -> String {
        let mut out = self.render();
        for mv in replies {
            let _ = write!(out, "\nbot plays {mv}");
        }
        out
    }

    /// Takes back the last move.
    pub fn undo(&mut self) -> Option<Move> {
        let mv = self.game.pop()?;
        info!(%mv, "move undone");
        Some(mv)
    }

    /// One-line summary: mode, players, and whose turn it is or how the game ended.
    pub fn status(&self) -> String {
        let mode = if self.edit_mode { "EDIT MODE" } else { "PLAY MODE" };
        let state = match self.game.outcome() {
            Some(outcome) => outcome.to_string(),
            None if self.game.is_check() => format!("{} to move, in check", self.game.turn()),
            None => format!("{} to move", self.game.turn()),
        };
        format!(
            "{mode} | white: {}, black: {} | {state}",
            self.white, self.black
        )
    }

    /// The board as text, from White's side unless flipped, with a status line.
    pub fn render(&self) -> String {
        let ranks: Vec<u8> = if self.flipped {
            (0..8).collect()
        } else {
            (0..8).rev().collect()
        };
        let files: Vec<u8> = if self.flipped {
            (0..8).rev().collect()
        } else {
            (0..8).collect()
        };

        let mut out = String::new();
        let border = "  +-----------------+\n";
        out.push_str(border);
        for &rank in &ranks {
            let _ = write!(out, "{} |", rank + 1);
            for &file in &files {
                let ch = self
                    .game
                    .position()
                    .piece_at(rank * 8 + file)
                    .map_or('.', Piece::to_char);
                let _ = write!(out, " {ch}");
            }
            out.push_str(" |\n");
        }
        out.push_str(border);
        out.push_str("   ");
        for &file in &files {
            let _ = write!(out, " {}", (b'a' + file) as char);
        }
        out.push('\n');
        out.push_str(&self.status());
        out
    }
}

#[cfg(test)]
#[path = "sandbox_tests.rs"]
mod sandbox_tests;
