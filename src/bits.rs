//! Bit sequences exchanged between codecs and the embedder.
//!
//! A [`BitString`] carries no length prefix or separators. Character
//! boundaries are recovered structurally by the codec that reads it.

use std::fmt;
use std::str::FromStr;

/// An ordered sequence of bits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitString {
    bits: Vec<bool>,
}

impl BitString {
    /// Creates an empty bit string.
    pub fn new() -> Self {
        Self { bits: Vec::new() }
    }

    /// Creates an empty bit string with room for `capacity` bits.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity(capacity),
        }
    }

    /// Appends one bit.
    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Appends the 8 bits of `value`, most significant first.
    pub fn push_byte(&mut self, value: u8) {
        for shift in (0..8).rev() {
            self.bits.push((value >> shift) & 1 == 1);
        }
    }

    /// Appends every bit of `other`.
    pub fn extend_from(&mut self, other: &BitString) {
        self.bits.extend_from_slice(&other.bits);
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns the bit at `index`, if any.
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Iterates over the bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// Iterates over complete 8-bit chunks, MSB first.
    ///
    /// A trailing chunk shorter than 8 bits is skipped.
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.bits
            .chunks_exact(8)
            .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | bit as u8))
    }

    /// Drops every bit from `len` onwards.
    pub fn truncate(&mut self, len: usize) {
        self.bits.truncate(len);
    }
}

impl From<Vec<bool>> for BitString {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl FromIterator<bool> for BitString {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Error returned when parsing a bit string containing something other than `0` or `1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBitStringError {
    pub position: usize,
    pub found: char,
}

impl fmt::Display for ParseBitStringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid bit {:?} at position {}", self.found, self.position)
    }
}

impl std::error::Error for ParseBitStringError {}

impl FromStr for BitString {
    type Err = ParseBitStringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(position, c)| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                found => Err(ParseBitStringError { position, found }),
            })
            .collect()
    }
}
