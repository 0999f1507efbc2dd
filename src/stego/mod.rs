//! LSB steganography over pixel grids.
//!
//! - [`grid`]: the [`PixelGrid`] abstraction and its `image` implementation
//! - [`embedder`]: bit placement, capacity checks and extraction
//! - [`image`]: loading and saving raster containers

pub mod embedder;
pub mod grid;
pub mod image;

pub use embedder::{BitEmbedder, Capacity, DEFAULT_MARGIN_BYTES};
pub use grid::{PixelGrid, CHANNELS};
pub use image::ImageCarrier;
