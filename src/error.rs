//! Error types for pixelhide.

use thiserror::Error;

use crate::codec::CodecKind;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, StegoError>;

/// Errors raised while pairing an encode with its decode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("A Huffman tree is not set: decode requires a prior encode on the same codec")]
    MissingTree,

    #[error("Codec mismatch: session uses {found}, but {expected} was requested")]
    KindMismatch { expected: CodecKind, found: CodecKind },
}

/// Errors that can occur while encoding, embedding, extracting or decoding.
#[derive(Error, Debug)]
pub enum StegoError {
    #[error("Format error: character {character:?} at position {position} is outside the single-byte range")]
    Format { character: char, position: usize },

    #[error("Insufficient bytes: need {needed_bytes} bytes, image has {available_bytes}")]
    Capacity {
        needed_bytes: usize,
        available_bytes: usize,
    },

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Truncated data: {bits} bits ended before the delimiter was found")]
    TruncatedData { bits: usize },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Image load error: {0}")]
    ImageLoad(String),

    #[error("Image save error: {0}")]
    ImageSave(String),

    #[error("Code book error: {0}")]
    CodeBook(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for StegoError {
    fn from(e: toml::de::Error) -> Self {
        StegoError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for StegoError {
    fn from(e: toml::ser::Error) -> Self {
        StegoError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for StegoError {
    fn from(e: serde_json::Error) -> Self {
        StegoError::CodeBook(e.to_string())
    }
}
