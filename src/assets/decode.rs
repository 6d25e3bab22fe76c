use anyhow::Context;

use crate::foundation::error::{ShapeClipError, ShapeClipResult};

/// Decoded straight-alpha RGBA8 image.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterImage {
    pixels: image::RgbaImage,
    has_alpha: bool,
}

impl RasterImage {
    /// Wrap an RGBA image, recording whether its alpha channel is meaningful.
    pub fn new(pixels: image::RgbaImage, has_alpha: bool) -> Self {
        Self { pixels, has_alpha }
    }

    /// Convert any decoded image, promoting alpha-less formats to RGBA.
    pub fn from_dynamic(img: image::DynamicImage) -> Self {
        let has_alpha = img.color().has_alpha();
        Self::new(img.to_rgba8(), has_alpha)
    }

    /// Build from raw straight-alpha RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, rgba: Vec<u8>) -> ShapeClipResult<Self> {
        let pixels = image::RgbaImage::from_raw(width, height, rgba).ok_or_else(|| {
            ShapeClipError::validation(format!(
                "rgba buffer does not match {width}x{height} image"
            ))
        })?;
        Ok(Self::new(pixels, true))
    }

    /// Solid-color image.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self::new(
            image::RgbaImage::from_pixel(width, height, image::Rgba(rgba)),
            rgba[3] != 255,
        )
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Whether the source carried an alpha channel.
    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    /// Pixel grid.
    pub fn pixels(&self) -> &image::RgbaImage {
        &self.pixels
    }

    /// Whether the image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Decode encoded image bytes (PNG, JPEG, ...) into a [`RasterImage`].
pub fn decode_image(bytes: &[u8]) -> ShapeClipResult<RasterImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(RasterImage::from_dynamic(dyn_img))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
