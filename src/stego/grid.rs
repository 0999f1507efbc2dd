//! Pixel grid abstraction.

use image::RgbImage;

/// Channels per pixel.
pub const CHANNELS: usize = 3;

/// A mutable rows x cols grid of pixels with [`CHANNELS`] 8-bit channels each.
///
/// `row` indexes the vertical axis and `col` the horizontal one, so
/// `(0, 1)` is the second pixel of the first row.
pub trait PixelGrid {
    fn row_count(&self) -> usize;

    fn col_count(&self) -> usize;

    /// Reads one channel value.
    fn channel(&self, row: usize, col: usize, channel: usize) -> u8;

    /// Overwrites one channel value.
    fn set_channel(&mut self, row: usize, col: usize, channel: usize, value: u8);

    /// Number of LSB slots (`rows * cols * 3`).
    fn capacity_bits(&self) -> usize {
        self.row_count() * self.col_count() * CHANNELS
    }
}

impl PixelGrid for RgbImage {
    fn row_count(&self) -> usize {
        self.height() as usize
    }

    fn col_count(&self) -> usize {
        self.width() as usize
    }

    fn channel(&self, row: usize, col: usize, channel: usize) -> u8 {
        self.get_pixel(col as u32, row as u32).0[channel]
    }

    fn set_channel(&mut self, row: usize, col: usize, channel: usize, value: u8) {
        self.get_pixel_mut(col as u32, row as u32).0[channel] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_rgb_image_axes() {
        // 3 wide, 2 tall
        let mut img = RgbImage::from_pixel(3, 2, Rgb([10, 20, 30]));
        assert_eq!(img.row_count(), 2);
        assert_eq!(img.col_count(), 3);
        assert_eq!(img.capacity_bits(), 18);

        img.set_channel(1, 2, 0, 99);
        assert_eq!(img.get_pixel(2, 1).0, [99, 20, 30]);
        assert_eq!(img.channel(1, 2, 0), 99);
        assert_eq!(img.channel(0, 0, 2), 30);
    }
}
