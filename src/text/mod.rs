//! # Text
//!
//! Everything needed to put letters on a canvas:
//!
//! - [`attributes`]: optional text attributes and their per-size defaults
//! - [`font`]: the [`FontBook`] of named fonts
//! - [`layout`]: single-line layout, measurement and centering
//!
//! The renderer only talks to text through [`TextRasterizer`], so any 2D
//! backend that can measure and draw a line of text can stand in for the
//! bundled ab_glyph implementation.

pub mod attributes;
pub mod font;
pub mod layout;

pub use attributes::{
    FONT_SIZE_PROPORTION, ResolvedTextAttributes, Shadow, TextAlignment, TextAttributes,
    default_text_attributes,
};
pub use font::{FontBook, SYSTEM_FONT, SYSTEM_FONT_BOLD};
pub use layout::{InkBounds, TextMetrics, text_origin};

use crate::render::mask::CoverageMask;

/// Text style in device pixels, ready for a rasterizer.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_name: String,
    /// Em size in pixels.
    pub size_px: f32,
    /// Extra advance between letters in pixels.
    pub letter_spacing_px: f32,
}

impl TextStyle {
    /// Convert resolved attributes (points) to a pixel style at `scale`.
    pub fn from_attributes(attrs: &ResolvedTextAttributes, scale: f32) -> Self {
        Self {
            font_name: attrs.font_name.clone(),
            size_px: attrs.font_size * scale,
            letter_spacing_px: attrs.letter_spacing * scale,
        }
    }
}

/// Measure and draw a single line of text.
///
/// Coordinates are pixels with y pointing down. `origin` is the left end of
/// the baseline.
pub trait TextRasterizer {
    /// Extents of `text` laid out with `style`, relative to the baseline origin.
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;

    /// Accumulate the coverage of `text` into `mask`.
    fn rasterize(&self, text: &str, style: &TextStyle, origin: (f32, f32), mask: &mut CoverageMask);
}

// Every render measures before it rasterizes, so only `measure` reports an
// unknown font.
impl TextRasterizer for FontBook {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let font = self.resolve(&style.font_name);
        layout::GlyphRun::new(font, text, style.size_px, style.letter_spacing_px).metrics()
    }

    fn rasterize(&self, text: &str, style: &TextStyle, origin: (f32, f32), mask: &mut CoverageMask) {
        let font = self.resolve_quiet(&style.font_name);
        layout::GlyphRun::new(font, text, style.size_px, style.letter_spacing_px).draw(origin, mask);
    }
}
