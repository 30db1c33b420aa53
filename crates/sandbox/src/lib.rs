//! Chess Sandbox
//!
//! A free board editor with a turn driver: each side is either a human
//! entering moves or a minimax bot at a fixed difficulty.

mod command;
mod config;
mod error;
mod player;
mod sandbox;

pub use command::{Command, DEFAULT_AUTO_PLIES, HELP};
pub use config::SandboxConfig;
pub use error::SandboxError;
pub use player::PlayerMode;
pub use sandbox::{REPLY_PLIES, Sandbox};
