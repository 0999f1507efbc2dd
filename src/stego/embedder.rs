//! Bit embedding and extraction.
//!
//! Bit `i` lives in the LSB of channel `i % 3` of the pixel at
//! row `i / (cols * 3)`, column `(i / 3) % cols`: row-major over pixels,
//! channel-minor within a pixel. Write and read must agree on this order.

use tracing::{debug, warn};

use crate::bits::BitString;
use crate::error::{Result, StegoError};

use super::grid::{PixelGrid, CHANNELS};

/// Spare bytes required beyond the encoded message.
pub const DEFAULT_MARGIN_BYTES: usize = 1;

/// Maps a bit index to `(row, col, channel)`.
pub fn slot(index: usize, cols: usize) -> (usize, usize, usize) {
    (
        index / (cols * CHANNELS),
        (index / CHANNELS) % cols,
        index % CHANNELS,
    )
}

/// Capacity of a grid, in bits and whole bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    /// One bit per channel.
    pub bits: usize,
    pub margin_bytes: usize,
}

impl Capacity {
    /// Whole bytes the grid can hold.
    pub fn available_bytes(&self) -> usize {
        self.bits / 8
    }

    /// Whole bytes needed to carry `bit_len` bits, margin included.
    pub fn required_bytes(&self, bit_len: usize) -> usize {
        bit_len.div_ceil(8) + self.margin_bytes
    }

    /// Returns true if `bit_len` bits can be written.
    ///
    /// Without a margin every LSB slot is usable, including the slots past
    /// the last whole byte. With a margin the check works in whole bytes.
    pub fn fits(&self, bit_len: usize) -> bool {
        if self.margin_bytes == 0 {
            return bit_len <= self.bits;
        }
        bit_len <= self.bits && self.required_bytes(bit_len) <= self.available_bytes()
    }

    /// Largest bit length that still fits.
    pub fn payload_bits(&self) -> usize {
        if self.margin_bytes == 0 {
            return self.bits;
        }
        self.available_bytes().saturating_sub(self.margin_bytes) * 8
    }
}

/// Writes bit strings into channel LSBs and reads them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitEmbedder {
    margin_bytes: usize,
}

impl Default for BitEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_MARGIN_BYTES)
    }
}

impl BitEmbedder {
    pub fn new(margin_bytes: usize) -> Self {
        Self { margin_bytes }
    }

    pub fn margin_bytes(&self) -> usize {
        self.margin_bytes
    }

    /// Capacity of `grid` under this embedder's margin.
    pub fn capacity<G: PixelGrid + ?Sized>(&self, grid: &G) -> Capacity {
        Capacity {
            bits: grid.capacity_bits(),
            margin_bytes: self.margin_bytes,
        }
    }

    /// Writes `bits` into the grid, one bit per channel LSB.
    ///
    /// All or nothing: on [`StegoError::Capacity`] the grid is untouched.
    /// The upper 7 bits of every channel are preserved.
    pub fn write<G: PixelGrid + ?Sized>(&self, grid: &mut G, bits: &BitString) -> Result<()> {
        let capacity = self.capacity(grid);
        let needed_bytes = capacity.required_bytes(bits.len());

        debug!(
            available_bytes = capacity.available_bytes(),
            needed_bytes, "Checking capacity"
        );

        if !capacity.fits(bits.len()) {
            warn!(
                needed_bytes,
                available_bytes = capacity.available_bytes(),
                "Insufficient bytes"
            );
            return Err(StegoError::Capacity {
                needed_bytes,
                available_bytes: capacity.available_bytes(),
            });
        }

        let cols = grid.col_count();
        for (index, bit) in bits.iter().enumerate() {
            let (row, col, channel) = slot(index, cols);
            let value = grid.channel(row, col, channel);
            grid.set_channel(row, col, channel, (value & 0xFE) | bit as u8);
        }

        debug!(bits = bits.len(), "Bits written");
        Ok(())
    }

    /// Reads the LSB of every channel in the grid.
    ///
    /// No boundary detection happens here; the codec finds the delimiter.
    pub fn read_all<G: PixelGrid + ?Sized>(&self, grid: &G) -> BitString {
        let cols = grid.col_count();
        let bits: BitString = (0..grid.capacity_bits())
            .map(|index| {
                let (row, col, channel) = slot(index, cols);
                grid.channel(row, col, channel) & 1 == 1
            })
            .collect();

        debug!(bits = bits.len(), "Bits read");
        bits
    }
}
