//! Reveal command - extract a hidden message from an image.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use pixelhide::{CodeBook, CodecKind, Config, ImageCarrier, Session};

use super::CommandExecutor;

/// Reveal a message hidden with the same codec.
///
/// The huffman codec needs the code book written by `hide --code-book`.
#[derive(Args, Debug)]
pub struct RevealCommand {
    /// Path to the image holding the message
    #[arg(short, long)]
    pub input: PathBuf,

    /// Codec: raw, caesar or huffman (defaults to the config value)
    #[arg(short, long, value_enum)]
    pub codec: Option<CodecKind>,

    /// Caesar shift, reduced mod 256 (must match the one used to hide)
    #[arg(long, allow_hyphen_values = true)]
    pub shift: Option<i64>,

    /// Huffman code book saved by `hide`
    #[arg(long)]
    pub code_book: Option<PathBuf>,

    /// Print the message together with every bit read
    #[arg(long)]
    pub print: bool,
}

impl CommandExecutor for RevealCommand {
    fn execute(&self, config: &Config) -> Result<()> {
        let mut config = config.clone();
        if let Some(shift) = self.shift {
            config.caesar_shift = shift;
        }
        let kind = self.codec.unwrap_or(config.codec);

        let carrier = ImageCarrier::open(&self.input)
            .with_context(|| format!("Failed to load image from {}", self.input.display()))?;

        let mut session = match (&self.code_book, kind) {
            (Some(path), CodecKind::Huffman) => {
                let book = CodeBook::load(path)
                    .with_context(|| format!("Failed to read code book from {}", path.display()))?;
                Session::from_code_book(&book)?
            }
            (Some(_), _) => {
                anyhow::bail!("--code-book only applies to the huffman codec");
            }
            (None, _) => Session::new(kind, &config.codec_options()),
        };

        let message = session
            .extract(carrier.grid(), kind, &config.embedder())
            .context("Failed to reveal message")?;

        if self.print {
            println!("{}", session.report());
        } else {
            println!("{}", message);
        }

        Ok(())
    }
}
