//! Hide command - embed a message in an image.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use pixelhide::{CodecKind, Config, ImageCarrier, Session};

use super::{message_or_stdin, CommandExecutor};

/// Hide a text message in the LSBs of an image.
///
/// Save to a lossless format (PNG, BMP). The huffman codec requires
/// --code-book: the tree is written there before the image, and reveal
/// needs it to decode.
#[derive(Args, Debug)]
pub struct HideCommand {
    /// Path to the source image
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path for the image with the hidden message
    #[arg(short, long)]
    pub output: PathBuf,

    /// Message to hide (reads from stdin if not provided)
    #[arg(short, long)]
    pub message: Option<String>,

    /// Codec: raw, caesar or huffman (defaults to the config value)
    #[arg(short, long, value_enum)]
    pub codec: Option<CodecKind>,

    /// Caesar shift, reduced mod 256
    #[arg(long, allow_hyphen_values = true)]
    pub shift: Option<i64>,

    /// Where to save the Huffman code book (JSON)
    #[arg(long)]
    pub code_book: Option<PathBuf>,

    /// Print the message and its bits after hiding
    #[arg(long)]
    pub print: bool,
}

impl CommandExecutor for HideCommand {
    fn execute(&self, config: &Config) -> Result<()> {
        let mut config = config.clone();
        if let Some(shift) = self.shift {
            config.caesar_shift = shift;
        }
        let kind = self.codec.unwrap_or(config.codec);

        // The tree never enters the pixels; without the book the message is lost.
        if kind == CodecKind::Huffman && self.code_book.is_none() {
            bail!("The huffman codec needs --code-book to save the tree for reveal");
        }

        let message = message_or_stdin(self.message.as_deref())?;

        let mut carrier = ImageCarrier::open(&self.input)
            .with_context(|| format!("Failed to load image from {}", self.input.display()))?;

        let mut session = Session::new(kind, &config.codec_options());
        let report = session
            .embed(carrier.grid_mut(), &message, &config.embedder())
            .context("Failed to hide message")?;

        if let (Some(path), Some(book)) = (&self.code_book, session.code_book()) {
            book.save(path)
                .with_context(|| format!("Failed to write code book to {}", path.display()))?;
        }

        carrier
            .save(&self.output)
            .with_context(|| format!("Failed to save image to {}", self.output.display()))?;

        println!("Message hidden in: {}", self.output.display());
        println!("  Codec: {}", kind);
        println!("  Bits: {}", report.bits);
        println!(
            "  Bytes: {} of {} available",
            report.needed_bytes, report.available_bytes
        );
        if kind == CodecKind::Huffman {
            if let Some(path) = &self.code_book {
                println!("  Code book: {}", path.display());
            }
        }

        if self.print {
            println!();
            println!("{}", session.report());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use pixelhide::CodeBook;
    use std::path::Path;

    fn write_test_image(path: &Path) {
        let img = ImageBuffer::from_fn(32, 32, |x, y| {
            Rgb([
                ((x * 17) % 256) as u8,
                ((y * 23) % 256) as u8,
                (((x + y) * 31) % 256) as u8,
            ])
        });
        ImageCarrier::from(img).save(path).unwrap();
    }

    fn hide_command(input: &Path, output: &Path, code_book: Option<PathBuf>) -> HideCommand {
        HideCommand {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            message: Some("meet me at noon".to_string()),
            codec: Some(CodecKind::Huffman),
            shift: None,
            code_book,
            print: false,
        }
    }

    #[test]
    fn test_huffman_without_code_book_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("cover.png");
        let output = dir.path().join("stego.png");
        write_test_image(&input);

        let result = hide_command(&input, &output, None).execute(&Config::default());

        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_huffman_writes_code_book_and_image() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("cover.png");
        let output = dir.path().join("stego.png");
        let book_path = dir.path().join("stego.json");
        write_test_image(&input);

        hide_command(&input, &output, Some(book_path.clone()))
            .execute(&Config::default())
            .unwrap();

        assert!(output.exists());
        let book = CodeBook::load(&book_path).unwrap();
        let mut session = Session::from_code_book(&book).unwrap();
        let carrier = ImageCarrier::open(&output).unwrap();
        let text = session
            .extract(
                carrier.grid(),
                CodecKind::Huffman,
                &Config::default().embedder(),
            )
            .unwrap();
        assert_eq!(text, "meet me at noon");
    }

    #[test]
    fn test_unwritable_code_book_leaves_no_image() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("cover.png");
        let output = dir.path().join("stego.png");
        let book_path = dir.path().join("missing").join("stego.json");
        write_test_image(&input);

        let result = hide_command(&input, &output, Some(book_path)).execute(&Config::default());

        assert!(result.is_err());
        assert!(!output.exists());
    }
}
