//! # pixelhide - Hide text in image pixels
//!
//! pixelhide hides a text message in the least significant bits (LSBs) of an
//! image's RGB channels, after turning it into bits with one of three codecs.
//!
//! ## Overview
//!
//! - The message gets a trailing delimiter (`#`) and is encoded to bits
//! - Bits are written one per channel LSB, row-major over pixels,
//!   channel-minor within a pixel
//! - Extraction reads every LSB and lets the codec find the delimiter
//! - No length prefix is stored anywhere
//!
//! ## Codecs
//!
//! - **raw**: 8 bits per character, MSB first
//! - **caesar**: characters shifted mod 256, then raw (a toy, not encryption)
//! - **huffman**: prefix code built from the message's own frequencies;
//!   the tree stays in the [`Session`] that encoded, so extraction needs
//!   that session or its [`CodeBook`]
//!
//! ## Example Usage
//!
//! ```rust
//! use image::RgbImage;
//! use pixelhide::{embed_message, extract_message, CodecKind, Config};
//!
//! let mut grid = RgbImage::new(32, 32);
//! let config = Config::default();
//!
//! let mut session = embed_message(&mut grid, "meet at noon", CodecKind::Huffman, &config).unwrap();
//!
//! // Huffman extraction must reuse the session that embedded.
//! let text = extract_message(&grid, CodecKind::Huffman, &config, Some(&mut session)).unwrap();
//! assert_eq!(text, "meet at noon");
//!
//! // Raw and Caesar need no session state.
//! embed_message(&mut grid, "hello", CodecKind::Caesar, &config).unwrap();
//! let text = extract_message(&grid, CodecKind::Caesar, &config, None).unwrap();
//! assert_eq!(text, "hello");
//! ```
//!
//! ## Modules
//!
//! - [`codec`]: raw, Caesar and Huffman codecs
//! - [`stego`]: pixel grids, bit embedding and image containers
//! - [`session`]: per-message codec ownership
//! - [`config`]: TOML configuration

/// End-of-message symbol appended before encoding and stripped on decode.
pub const DELIMITER: char = '#';

pub mod bits;
pub mod codec;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod stego;

// Re-export commonly used types at the crate root
pub use bits::BitString;
pub use codec::{
    new_codec, CaesarCodec, Codec, CodeBook, CodecKind, CodecOptions, HuffmanCodec, HuffmanTree,
    RawBinaryCodec,
};
pub use config::Config;
pub use error::{Result, SessionError, StegoError};
pub use session::{EmbedReport, Session};
pub use stego::{BitEmbedder, Capacity, ImageCarrier, PixelGrid};

/// Encodes `message` with a new codec of `kind` and embeds it in `grid`.
///
/// Returns the session holding the codec state; Huffman extraction needs it.
/// On error the grid is left unmodified.
pub fn embed_message<G: PixelGrid + ?Sized>(
    grid: &mut G,
    message: &str,
    kind: CodecKind,
    config: &Config,
) -> Result<Session> {
    let mut session = Session::new(kind, &config.codec_options());
    session.embed(grid, message, &config.embedder())?;
    Ok(session)
}

/// Extracts a message of `kind` from `grid`.
///
/// With `session`, its codec is used and must match `kind`. Without one, a
/// fresh codec is built from `config`, which fails with
/// [`SessionError::MissingTree`] for Huffman.
pub fn extract_message<G: PixelGrid + ?Sized>(
    grid: &G,
    kind: CodecKind,
    config: &Config,
    session: Option<&mut Session>,
) -> Result<String> {
    let embedder = config.embedder();
    match session {
        Some(session) => session.extract(grid, kind, &embedder),
        None => Session::new(kind, &config.codec_options()).extract(grid, kind, &embedder),
    }
}
