//! Sandbox CLI
//!
//! Reads commands from stdin and prints the board to stdout. Logs go to
//! stderr. An optional first argument names a TOML config file.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use chess_sandbox::{Command, REPLY_PLIES, Sandbox, SandboxConfig};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => SandboxConfig::load(&path).with_context(|| format!("loading {path}"))?,
        None => SandboxConfig::default(),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut sandbox = Sandbox::from_config(&config).context("invalid start_fen in config")?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    // A bot holding the first move starts right away.
    sandbox.run_bots(REPLY_PLIES);
    writeln!(stdout, "{}", sandbox.render())?;
    writeln!(stdout, "type `help` for commands")?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "rejected command");
                writeln!(stdout, "error: {e}")?;
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }

        match sandbox.execute(command) {
            Ok(reply) => writeln!(stdout, "{reply}")?,
            Err(e) => {
                warn!(error = %e, "command failed");
                writeln!(stdout, "error: {e}")?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}
