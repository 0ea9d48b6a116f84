//! # Bitmap
//!
//! The finished avatar: an immutable RGBA pixel buffer plus the density it
//! was rendered at. UI layers that want encoded bytes can use
//! [`Bitmap::to_png`]; nothing here touches the filesystem.

use image::{ImageEncoder, RgbaImage};

use crate::color::Color;
use crate::error::MonogramError;
use crate::geometry::Size;

/// Rendered avatar pixels (straight-alpha RGBA8).
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    image: RgbaImage,
    scale: f32,
}

impl Bitmap {
    pub(crate) fn new(image: RgbaImage, scale: f32) -> Self {
        Self { image, scale }
    }

    /// 0×0 placeholder returned for empty canvases.
    pub fn empty(scale: f32) -> Self {
        Self::new(RgbaImage::new(0, 0), scale)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Pixels per point.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Size in points (pixels divided by scale).
    pub fn size(&self) -> Size {
        if self.scale > 0.0 {
            Size::new(self.width() as f32 / self.scale, self.height() as f32 / self.scale)
        } else {
            Size::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Pixel at `(x, y)`, or `None` outside the bitmap.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.image.get_pixel_checked(x, y).map(|&p| Color::from(p))
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Encode as PNG in memory.
    ///
    /// Empty bitmaps cannot be encoded and return an error.
    pub fn to_png(&self) -> Result<Vec<u8>, MonogramError> {
        if self.is_empty() {
            return Err(MonogramError::ImageEncode("cannot encode an empty bitmap".to_string()));
        }

        let mut png_bytes = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
        encoder
            .write_image(
                self.image.as_raw(),
                self.width(),
                self.height(),
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e: image::ImageError| MonogramError::ImageEncode(e.to_string()))?;
        Ok(png_bytes)
    }
}
