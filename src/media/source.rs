// SPDX-License-Identifier: MPL-2.0
//! Read-only source rasters handed to the compositor.

use crate::error::{Error, Result};
use image_rs::{DynamicImage, RgbaImage};
use std::path::Path;
use tiny_skia::{ColorU8, IntSize, Pixmap};

/// A decoded source image.
///
/// Holds the straight-alpha RGBA pixels and a premultiplied copy used as the
/// draw source, so repeated renders never convert the source again.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pixels: RgbaImage,
    pixmap: Pixmap,
}

impl SourceImage {
    /// Wraps an already-decoded image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Load`] for zero-sized images or images too large to
    /// rasterize.
    pub fn from_dynamic(image: &DynamicImage) -> Result<Self> {
        Self::from_rgba_image(image.to_rgba8())
    }

    /// Builds a source from raw straight-alpha RGBA bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Load`] if `bytes` does not hold exactly
    /// `width * height * 4` values or the size is unusable.
    pub fn from_rgba(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self> {
        let expected = u64::from(width) * u64::from(height) * 4;
        if bytes.len() as u64 != expected {
            return Err(Error::Load(format!(
                "pixel buffer holds {} bytes, expected {expected} for {width}x{height}",
                bytes.len()
            )));
        }
        let pixels = RgbaImage::from_raw(width, height, bytes)
            .ok_or_else(|| Error::Load("invalid RGBA buffer".to_string()))?;
        Self::from_rgba_image(pixels)
    }

    /// Decodes an encoded image held in memory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Load`] if the bytes cannot be decoded.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let image = image_rs::load_from_memory(bytes)?;
        Self::from_dynamic(&image)
    }

    /// Opens and decodes an image file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Load`] if
    /// it cannot be decoded.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let image = image_rs::open(path.as_ref())?;
        Self::from_dynamic(&image)
    }

    fn from_rgba_image(pixels: RgbaImage) -> Result<Self> {
        let (width, height) = pixels.dimensions();
        let size = IntSize::from_wh(width, height)
            .ok_or_else(|| Error::Load(format!("unusable image size {width}x{height}")))?;

        let premultiplied: Vec<u8> = pixels
            .pixels()
            .flat_map(|pixel| {
                let [r, g, b, a] = pixel.0;
                let color = ColorU8::from_rgba(r, g, b, a).premultiply();
                [color.red(), color.green(), color.blue(), color.alpha()]
            })
            .collect();
        let pixmap = Pixmap::from_vec(premultiplied, size)
            .ok_or_else(|| Error::Load(format!("image too large: {width}x{height}")))?;

        Ok(Self { pixels, pixmap })
    }

    /// Natural width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Natural height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Straight-alpha pixel access.
    #[must_use]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub(crate) fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}
