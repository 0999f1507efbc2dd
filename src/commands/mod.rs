//! Command module - Strategy pattern for CLI commands.
//!
//! Each command is a separate module implementing the `CommandExecutor` trait.

mod capacity;
mod codes;
mod hide;
mod reveal;

pub use capacity::CapacityCommand;
pub use codes::CodesCommand;
pub use hide::HideCommand;
pub use reveal::RevealCommand;

use std::io::{self, Read};

use anyhow::{Context, Result};

use pixelhide::Config;

/// Trait for command execution - Strategy pattern.
///
/// Each command struct holds its parsed arguments and implements
/// this trait to define its execution logic.
pub trait CommandExecutor {
    /// Executes the command with its parsed arguments and the loaded config.
    fn execute(&self, config: &Config) -> Result<()>;
}

/// Returns `message`, or reads it from stdin when absent.
fn message_or_stdin(message: Option<&str>) -> Result<String> {
    match message {
        Some(m) => Ok(m.to_string()),
        None => {
            eprintln!("Reading message from stdin (Ctrl+D to finish):");
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read message from stdin")?;
            Ok(buffer.trim_end_matches(['\r', '\n']).to_string())
        }
    }
}
