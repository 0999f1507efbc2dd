//! pixelhide - Hide text in image pixels
//!
//! A CLI tool for LSB steganography with raw, Caesar and Huffman codecs.

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use commands::{CapacityCommand, CodesCommand, CommandExecutor, HideCommand, RevealCommand};
use pixelhide::logging::setup_logging;
use pixelhide::Config;

/// pixelhide - Hide text in image pixels
///
/// Encodes a message with a raw, Caesar or Huffman codec and stores the bits
/// in the least significant bit of every RGB channel.
#[derive(Parser)]
#[command(name = "pixelhide")]
#[command(version)]
#[command(about = "LSB image steganography with raw, Caesar and Huffman codecs")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file (defaults to ~/.pixelhide/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hide a message in an image
    Hide(HideCommand),

    /// Reveal a message hidden in an image
    Reveal(RevealCommand),

    /// Show how many bits an image can carry
    Capacity(CapacityCommand),

    /// Print the Huffman code table for a message
    Codes(CodesCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().context("Failed to load config")?,
    };

    let command: &dyn CommandExecutor = match &cli.command {
        Commands::Hide(cmd) => cmd,
        Commands::Reveal(cmd) => cmd,
        Commands::Capacity(cmd) => cmd,
        Commands::Codes(cmd) => cmd,
    };

    command.execute(&config)
}
