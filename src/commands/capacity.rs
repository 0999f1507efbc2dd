//! Capacity command - show how much an image can carry.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use pixelhide::{CodecKind, Config, ImageCarrier, PixelGrid, Session};

use super::CommandExecutor;

/// Show an image's capacity, and whether a message would fit.
#[derive(Args, Debug)]
pub struct CapacityCommand {
    /// Path to the image
    #[arg(short, long)]
    pub input: PathBuf,

    /// Message to check against the capacity
    #[arg(short, long)]
    pub message: Option<String>,

    /// Codec used to size the message (defaults to the config value)
    #[arg(short, long, value_enum)]
    pub codec: Option<CodecKind>,
}

impl CommandExecutor for CapacityCommand {
    fn execute(&self, config: &Config) -> Result<()> {
        let carrier = ImageCarrier::open(&self.input)
            .with_context(|| format!("Failed to load image from {}", self.input.display()))?;
        let grid = carrier.grid();
        let capacity = config.embedder().capacity(grid);

        println!("Image: {} x {} pixels", grid.col_count(), grid.row_count());
        println!("  Capacity: {} bits", capacity.bits);
        println!("  Maximum bytes available: {}", capacity.available_bytes());
        println!(
            "  Usable message bits: {} (margin {} byte)",
            capacity.payload_bits(),
            capacity.margin_bytes
        );

        if let Some(message) = &self.message {
            let kind = self.codec.unwrap_or(config.codec);
            let bits = Session::new(kind, &config.codec_options())
                .encode_message(message)
                .context("Failed to encode message")?;
            let needed = capacity.required_bytes(bits.len());

            println!();
            println!("Message ({} codec): {} bits", kind, bits.len());
            println!("  Bytes to encode: {}", needed);
            if capacity.fits(bits.len()) {
                println!("  Fits: yes");
            } else {
                println!("  Fits: no (insufficient bytes)");
            }
        }

        Ok(())
    }
}
