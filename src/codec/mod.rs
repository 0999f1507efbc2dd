//! Text codecs - Strategy pattern for turning a message into bits and back.
//!
//! Three codecs share the [`Codec`] contract:
//! - [`RawBinaryCodec`]: fixed 8 bits per character, MSB first
//! - [`CaesarCodec`]: shifts every character mod 256, then encodes raw
//! - [`HuffmanCodec`]: prefix code built from the message's own frequencies
//!
//! Every codec works over the single-byte symbol space (code points 0-255).
//! Decoding stops at the [`DELIMITER`](crate::DELIMITER), which callers
//! append to the message before encoding.

pub mod caesar;
pub mod huffman;
pub mod raw;

pub use caesar::CaesarCodec;
pub use huffman::{CodeBook, CodeBookEntry, HuffmanCodec, HuffmanTree};
pub use raw::RawBinaryCodec;

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::bits::BitString;
use crate::error::{Result, StegoError};

/// Default Caesar shift.
pub const DEFAULT_SHIFT: i64 = 3;

/// Selects one of the codec variants by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CodecKind {
    /// Fixed-width 8-bit binary
    #[default]
    #[serde(alias = "binary")]
    #[value(alias = "binary")]
    Raw,
    /// Caesar shift followed by raw binary
    Caesar,
    /// Adaptive Huffman prefix code
    Huffman,
}

impl CodecKind {
    /// Returns the canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            CodecKind::Raw => "raw",
            CodecKind::Caesar => "caesar",
            CodecKind::Huffman => "huffman",
        }
    }
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CodecKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raw" | "binary" => Ok(CodecKind::Raw),
            "caesar" => Ok(CodecKind::Caesar),
            "huffman" => Ok(CodecKind::Huffman),
            other => Err(format!("Unknown codec: {other} (expected raw, caesar or huffman)")),
        }
    }
}

/// Parameters for building a codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// Caesar shift, reduced mod 256.
    pub shift: i64,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            shift: DEFAULT_SHIFT,
        }
    }
}

/// A paired encode/decode transformation between text and bits.
///
/// `encode` takes `&mut self` because the Huffman codec keeps the tree it
/// built; its `decode` only works on the instance that encoded.
pub trait Codec {
    /// The variant this codec implements.
    fn kind(&self) -> CodecKind;

    /// Short name of the codec (`raw`, `caesar`, `huffman`).
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Encodes `text`, which already carries the trailing delimiter.
    fn encode(&mut self, text: &str) -> Result<BitString>;

    /// Decodes bits up to the delimiter. The delimiter is not returned.
    fn decode(&self, bits: &BitString) -> Result<String>;

    /// Copies the codec, state included, behind a new box.
    fn clone_box(&self) -> Box<dyn Codec>;

    /// Downcast hook for callers that need the Huffman tree.
    fn as_huffman(&self) -> Option<&HuffmanCodec> {
        None
    }
}

/// Builds a fresh codec of the given kind.
pub fn new_codec(kind: CodecKind, options: &CodecOptions) -> Box<dyn Codec> {
    match kind {
        CodecKind::Raw => Box::new(RawBinaryCodec::new()),
        CodecKind::Caesar => Box::new(CaesarCodec::new(options.shift)),
        CodecKind::Huffman => Box::new(HuffmanCodec::new()),
    }
}

/// Converts text into single-byte symbols.
///
/// Fails with [`StegoError::Format`] on the first character above U+00FF.
pub(crate) fn to_symbols(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .enumerate()
        .map(|(position, character)| {
            u8::try_from(u32::from(character))
                .map_err(|_| StegoError::Format { character, position })
        })
        .collect()
}

/// Converts single-byte symbols back into text (Latin-1).
pub(crate) fn from_symbols(symbols: &[u8]) -> String {
    symbols.iter().map(|&b| b as char).collect()
}
