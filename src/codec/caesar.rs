//! Caesar codec: shift every symbol mod 256, then encode raw.
//!
//! This is a toy substitution, not encryption.

use crate::bits::BitString;
use crate::error::Result;
use crate::DELIMITER;

use super::raw::RawBinaryCodec;
use super::{from_symbols, to_symbols, Codec, CodecKind, DEFAULT_SHIFT};

/// Caesar-shifted raw binary codec.
#[derive(Debug, Clone, Copy)]
pub struct CaesarCodec {
    shift: u8,
}

impl CaesarCodec {
    /// Creates a codec with `shift` reduced mod 256. Negative shifts wrap.
    pub fn new(shift: i64) -> Self {
        Self {
            shift: shift.rem_euclid(256) as u8,
        }
    }

    /// The effective shift in `0..=255`.
    pub fn shift(&self) -> u8 {
        self.shift
    }

    /// Shifts one symbol forward.
    pub fn shift_symbol(&self, symbol: u8) -> u8 {
        symbol.wrapping_add(self.shift)
    }

    /// Shifts one symbol back.
    pub fn unshift_symbol(&self, symbol: u8) -> u8 {
        symbol.wrapping_sub(self.shift)
    }
}

impl Default for CaesarCodec {
    fn default() -> Self {
        Self::new(DEFAULT_SHIFT)
    }
}

impl Codec for CaesarCodec {
    fn kind(&self) -> CodecKind {
        CodecKind::Caesar
    }

    fn encode(&mut self, text: &str) -> Result<BitString> {
        let shifted: Vec<u8> = to_symbols(text)?
            .into_iter()
            .map(|symbol| self.shift_symbol(symbol))
            .collect();
        Ok(RawBinaryCodec::encode_symbols(&shifted))
    }

    fn decode(&self, bits: &BitString) -> Result<String> {
        // The delimiter travels shifted like every other symbol.
        let stop = self.shift_symbol(DELIMITER as u8);
        let symbols: Vec<u8> = RawBinaryCodec::decode_until(bits, stop)
            .into_iter()
            .map(|symbol| self.unshift_symbol(symbol))
            .collect();
        Ok(from_symbols(&symbols))
    }

    fn clone_box(&self) -> Box<dyn Codec> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_default_shift_is_three() {
        let mut codec = CaesarCodec::default();
        assert_eq!(codec.shift(), 3);
        // 'A' + 3 = 'D' = 01000100
        assert_eq!(codec.encode("A").unwrap().to_string(), "01000100");
    }

    #[test]
    fn test_shift_wraps_into_byte_range() {
        assert_eq!(CaesarCodec::new(259).shift(), 3);
        assert_eq!(CaesarCodec::new(-1).shift(), 255);

        let codec = CaesarCodec::new(10);
        assert_eq!(codec.shift_symbol(250), 4);
        assert_eq!(codec.unshift_symbol(4), 250);
    }

    #[test]
    fn test_shift_reversible_for_every_symbol_and_shift() {
        for shift in 0..=255i64 {
            let codec = CaesarCodec::new(shift);
            for symbol in 0..=255u8 {
                assert_eq!(codec.unshift_symbol(codec.shift_symbol(symbol)), symbol);
            }
        }
    }

    #[test]
    fn test_roundtrip_with_spaces() {
        // ' ' shifted by 3 is '#', which must not end the message.
        let mut codec = CaesarCodec::default();
        let bits = codec.encode("Casino Royale 10:30 Order martini#").unwrap();
        assert_eq!(codec.decode(&bits).unwrap(), "Casino Royale 10:30 Order martini");
    }

    #[test]
    fn test_roundtrip_every_shift() {
        let message: String = (0u8..=255)
            .filter(|&b| b != DELIMITER as u8)
            .map(|b| b as char)
            .collect();
        let text = format!("{message}{DELIMITER}");
        for shift in 0..=255i64 {
            let mut codec = CaesarCodec::new(shift);
            let bits = codec.encode(&text).unwrap();
            assert_eq!(codec.decode(&bits).unwrap(), message, "shift {shift}");
        }
    }

    #[test]
    fn test_roundtrip_random_messages() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let shift = rng.gen_range(-300i64..300);
            let len = rng.gen_range(0..64);
            let message: String = (0..len)
                .map(|_| rng.gen_range(0u8..=255))
                .filter(|&b| b != DELIMITER as u8)
                .map(|b| b as char)
                .collect();
            let mut codec = CaesarCodec::new(shift);
            let bits = codec.encode(&format!("{message}#")).unwrap();
            assert_eq!(codec.decode(&bits).unwrap(), message);
        }
    }

    #[test]
    fn test_decode_drops_trailing_garbage() {
        let mut codec = CaesarCodec::new(42);
        let mut bits = codec.encode("spy#").unwrap();
        bits.extend_from(&"1011".parse().unwrap());
        assert_eq!(codec.decode(&bits).unwrap(), "spy");
    }
}
