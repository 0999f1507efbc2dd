//! Fixed-width binary codec: 8 bits per character, MSB first.

use crate::bits::BitString;
use crate::error::Result;
use crate::DELIMITER;

use super::{from_symbols, to_symbols, Codec, CodecKind};

/// Stateless raw binary codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawBinaryCodec;

impl RawBinaryCodec {
    pub fn new() -> Self {
        Self
    }

    /// Encodes raw bytes, 8 bits each.
    pub fn encode_symbols(symbols: &[u8]) -> BitString {
        let mut bits = BitString::with_capacity(symbols.len() * 8);
        for &symbol in symbols {
            bits.push_byte(symbol);
        }
        bits
    }

    /// Reads 8-bit chunks until one equals `stop`.
    ///
    /// The stop byte is not returned. A trailing partial chunk is dropped
    /// without error, and a stream without `stop` yields every whole chunk.
    pub fn decode_until(bits: &BitString, stop: u8) -> Vec<u8> {
        bits.bytes().take_while(|&byte| byte != stop).collect()
    }
}

impl Codec for RawBinaryCodec {
    fn kind(&self) -> CodecKind {
        CodecKind::Raw
    }

    fn encode(&mut self, text: &str) -> Result<BitString> {
        let symbols = to_symbols(text)?;
        Ok(Self::encode_symbols(&symbols))
    }

    fn decode(&self, bits: &BitString) -> Result<String> {
        let symbols = Self::decode_until(bits, DELIMITER as u8);
        Ok(from_symbols(&symbols))
    }

    fn clone_box(&self) -> Box<dyn Codec> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StegoError;

    #[test]
    fn test_encode_ab_with_delimiter() {
        let bits = RawBinaryCodec::new().encode("AB#").unwrap();
        assert_eq!(bits.to_string(), "010000010100001000100011");
        assert_eq!(bits.len(), 24);
    }

    #[test]
    fn test_decode_stops_at_delimiter() {
        let bits: BitString = "010000010100001000100011".parse().unwrap();
        assert_eq!(RawBinaryCodec::new().decode(&bits).unwrap(), "AB");
    }

    #[test]
    fn test_decode_ignores_bits_after_delimiter() {
        let mut codec = RawBinaryCodec::new();
        let mut bits = codec.encode("hi#").unwrap();
        bits.extend_from(&codec.encode("junk").unwrap());
        assert_eq!(codec.decode(&bits).unwrap(), "hi");
    }

    #[test]
    fn test_decode_drops_partial_trailing_chunk() {
        // "A" followed by 5 stray bits, no delimiter
        let bits: BitString = "0100000110101".parse().unwrap();
        assert_eq!(RawBinaryCodec::new().decode(&bits).unwrap(), "A");
    }

    #[test]
    fn test_decode_without_delimiter_returns_everything() {
        let mut codec = RawBinaryCodec::new();
        let bits = codec.encode("abc").unwrap();
        assert_eq!(codec.decode(&bits).unwrap(), "abc");
    }

    #[test]
    fn test_roundtrip_full_byte_range() {
        let message: String = (0u8..=255)
            .filter(|&b| b != DELIMITER as u8)
            .map(|b| b as char)
            .collect();
        let mut codec = RawBinaryCodec::new();
        let bits = codec.encode(&format!("{message}{DELIMITER}")).unwrap();
        assert_eq!(codec.decode(&bits).unwrap(), message);
    }

    #[test]
    fn test_encode_rejects_non_byte_text() {
        let result = RawBinaryCodec::new().encode("日本#");
        assert!(matches!(result, Err(StegoError::Format { position: 0, .. })));
    }
}
