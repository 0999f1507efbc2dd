//! Per-message sessions pairing one codec with one embed/extract exchange.
//!
//! A [`Session`] owns its codec. For the Huffman codec the tree built by
//! [`Session::embed`] stays inside the session, so extraction must use the
//! same session (or one rebuilt from its code book). Create a new session
//! for every message; never share one across threads.

use tracing::{debug, info, warn};

use crate::bits::BitString;
use crate::codec::{new_codec, Codec, CodeBook, CodecKind, CodecOptions, HuffmanCodec};
use crate::error::{Result, SessionError, StegoError};
use crate::stego::{BitEmbedder, PixelGrid};
use crate::DELIMITER;

/// Outcome of a successful embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedReport {
    /// Encoded bits written, delimiter included.
    pub bits: usize,
    /// Whole bytes consumed, margin included.
    pub needed_bytes: usize,
    /// Whole bytes the grid offers.
    pub available_bytes: usize,
}

/// One codec instance plus the last message it handled.
pub struct Session {
    codec: Box<dyn Codec>,
    text: String,
    binary: BitString,
}

impl Session {
    /// Creates a session with a fresh codec of `kind`.
    pub fn new(kind: CodecKind, options: &CodecOptions) -> Self {
        Self::with_codec(new_codec(kind, options))
    }

    /// Creates a session around an existing codec.
    pub fn with_codec(codec: Box<dyn Codec>) -> Self {
        Self {
            codec,
            text: String::new(),
            binary: BitString::new(),
        }
    }

    /// Creates a Huffman session from a saved code book.
    pub fn from_code_book(book: &CodeBook) -> Result<Self> {
        Ok(Self::with_codec(Box::new(HuffmanCodec::from_code_book(book)?)))
    }

    pub fn kind(&self) -> CodecKind {
        self.codec.kind()
    }

    pub fn codec(&self) -> &dyn Codec {
        self.codec.as_ref()
    }

    /// Last message embedded or extracted.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Bits of the last embed, or every bit read by the last extract.
    pub fn binary(&self) -> &BitString {
        &self.binary
    }

    /// Code book of the Huffman tree, if this is a Huffman session that has encoded.
    pub fn code_book(&self) -> Option<CodeBook> {
        self.codec.as_huffman().and_then(HuffmanCodec::code_book)
    }

    /// Appends the delimiter and encodes.
    pub fn encode_message(&mut self, message: &str) -> Result<BitString> {
        encode_with_delimiter(self.codec.as_mut(), message)
    }

    /// Encodes `message` and writes it into the grid.
    ///
    /// On error both the grid and the session are left unmodified: the
    /// message is encoded on a copy of the codec, which replaces the
    /// session's codec only once the bits are written.
    pub fn embed<G: PixelGrid + ?Sized>(
        &mut self,
        grid: &mut G,
        message: &str,
        embedder: &BitEmbedder,
    ) -> Result<EmbedReport> {
        let capacity = embedder.capacity(grid);
        debug!(
            codec = %self.kind(),
            max_bytes = capacity.available_bytes(),
            "Embedding message"
        );

        let mut codec = self.codec.clone_box();
        let bits = encode_with_delimiter(codec.as_mut(), message)?;
        embedder.write(grid, &bits)?;
        self.codec = codec;

        let report = EmbedReport {
            bits: bits.len(),
            needed_bytes: capacity.required_bytes(bits.len()),
            available_bytes: capacity.available_bytes(),
        };
        info!(
            bits = report.bits,
            bytes = report.needed_bytes,
            "Message embedded"
        );

        self.text = message.to_string();
        self.binary = bits;
        Ok(report)
    }

    /// Reads the whole grid and decodes it with this session's codec.
    ///
    /// `kind` must match the session's codec.
    pub fn extract<G: PixelGrid + ?Sized>(
        &mut self,
        grid: &G,
        kind: CodecKind,
        embedder: &BitEmbedder,
    ) -> Result<String> {
        if kind != self.kind() {
            return Err(SessionError::KindMismatch {
                expected: kind,
                found: self.kind(),
            }
            .into());
        }

        let bits = embedder.read_all(grid);
        if bits.len() < 8 {
            return Err(StegoError::TruncatedData { bits: bits.len() });
        }

        let text = self.codec.decode(&bits)?;
        info!(chars = text.chars().count(), codec = %kind, "Message extracted");

        self.text = text.clone();
        self.binary = bits;
        Ok(text)
    }

    /// Human-readable summary of the last message.
    pub fn report(&self) -> String {
        if self.text.is_empty() {
            "The message is not set.".to_string()
        } else {
            format!(
                "Text message: {}\nBinary message: {}",
                self.text, self.binary
            )
        }
    }
}

fn encode_with_delimiter(codec: &mut dyn Codec, message: &str) -> Result<BitString> {
    if message.contains(DELIMITER) {
        warn!("Message contains the delimiter; decoding will stop at its first occurrence");
    }
    codec.encode(&format!("{message}{DELIMITER}"))
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("codec", &self.kind())
            .field("text", &self.text)
            .field("bits", &self.binary.len())
            .finish()
    }
}
