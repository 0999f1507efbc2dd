//! Raster image containers for the pixel grid.
//!
//! Loads any format the `image` crate can decode and keeps it as 8-bit RGB.
//! Alpha is dropped. Save only to lossless formats (PNG, BMP): lossy
//! compression rewrites the LSBs and destroys the message.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbImage};

use crate::error::{Result, StegoError};

/// An image whose RGB channels serve as the pixel grid.
#[derive(Debug, Clone)]
pub struct ImageCarrier {
    pixels: RgbImage,
}

impl ImageCarrier {
    /// Loads an image from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let image = image::open(path).map_err(|e| StegoError::ImageLoad(e.to_string()))?;
        Ok(Self::from_image(image))
    }

    /// Loads an image from encoded bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let image =
            image::load_from_memory(bytes).map_err(|e| StegoError::ImageLoad(e.to_string()))?;
        Ok(Self::from_image(image))
    }

    /// Wraps a decoded image, converting it to RGB8.
    pub fn from_image(image: DynamicImage) -> Self {
        Self {
            pixels: image.to_rgb8(),
        }
    }

    /// The pixel grid.
    pub fn grid(&self) -> &RgbImage {
        &self.pixels
    }

    /// The pixel grid, mutably.
    pub fn grid_mut(&mut self) -> &mut RgbImage {
        &mut self.pixels
    }

    /// Saves the image; the format follows the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.pixels
            .save(path)
            .map_err(|e| StegoError::ImageSave(e.to_string()))
    }

    /// Returns the image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.pixels
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| StegoError::ImageSave(e.to_string()))?;
        Ok(bytes)
    }

    /// Consumes the carrier and returns the RGB pixels.
    pub fn into_grid(self) -> RgbImage {
        self.pixels
    }
}

impl From<RgbImage> for ImageCarrier {
    fn from(pixels: RgbImage) -> Self {
        Self { pixels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stego::{BitEmbedder, PixelGrid};
    use image::{ImageBuffer, Rgb, Rgba, RgbaImage};

    fn create_test_image(width: u32, height: u32) -> DynamicImage {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([
                ((x * 17) % 256) as u8,
                ((y * 23) % 256) as u8,
                (((x + y) * 31) % 256) as u8,
            ])
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_png_roundtrip_keeps_lsbs() {
        let mut carrier = ImageCarrier::from_image(create_test_image(20, 20));
        let bits = "1100101011110000".parse().unwrap();
        BitEmbedder::default()
            .write(carrier.grid_mut(), &bits)
            .unwrap();

        let png = carrier.to_png_bytes().unwrap();
        let reloaded = ImageCarrier::from_bytes(&png).unwrap();
        assert_eq!(reloaded.grid(), carrier.grid());
    }

    #[test]
    fn test_save_and_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("carrier.png");

        let carrier = ImageCarrier::from_image(create_test_image(8, 6));
        carrier.save(&path).unwrap();

        let opened = ImageCarrier::open(&path).unwrap();
        assert_eq!(opened.grid().row_count(), 6);
        assert_eq!(opened.grid().col_count(), 8);
        assert_eq!(opened.into_grid(), carrier.into_grid());
    }

    #[test]
    fn test_alpha_is_dropped() {
        let rgba: RgbaImage = ImageBuffer::from_pixel(2, 2, Rgba([1, 2, 3, 4]));
        let carrier = ImageCarrier::from_image(DynamicImage::ImageRgba8(rgba));
        assert_eq!(carrier.grid().get_pixel(1, 1).0, [1, 2, 3]);
        assert_eq!(carrier.grid().capacity_bits(), 12);
    }

    #[test]
    fn test_open_missing_file() {
        let result = ImageCarrier::open("/nonexistent/path/image.png");
        assert!(matches!(result, Err(StegoError::ImageLoad(_))));
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let result = ImageCarrier::from_bytes(b"not an image");
        assert!(matches!(result, Err(StegoError::ImageLoad(_))));
    }
}
