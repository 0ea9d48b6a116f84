//! # Rendering Module
//!
//! Composites an avatar bitmap from text, a background color and text
//! attributes.
//!
//! ## Pipeline
//!
//! ```text
//! RenderRequest
//!     ↓ snap size to device pixels (scale, content mode)
//! Surface (transparent RGBA)
//!     ↓ clip to inscribed circle (optional)
//!     ↓ fill background
//!     ↓ resolve text attributes per key
//!     ↓ measure → center → rasterize into CoverageMask
//!     ↓ paint shadow (offset + blur), then text
//! Bitmap
//! ```
//!
//! ## Example
//!
//! ```
//! use monogram::{Color, ContentMode, Size, render_snapshot};
//!
//! let bitmap = render_snapshot(
//!     "JS",
//!     Size::square(64.0),
//!     true,
//!     None,
//!     Color::rgb(52, 152, 219),
//!     ContentMode::ScaleAspectFill,
//! )?;
//! assert_eq!((bitmap.width(), bitmap.height()), (64, 64));
//! # Ok::<(), monogram::MonogramError>(())
//! ```

pub mod mask;
pub mod surface;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::bitmap::Bitmap;
use crate::color::Color;
use crate::error::MonogramError;
use crate::geometry::{ContentMode, Size};
use crate::text::{FontBook, ResolvedTextAttributes, TextAttributes, TextRasterizer, TextStyle, text_origin};
use mask::CoverageMask;
use surface::Surface;

/// Default pixel budget per surface (64 Mi pixels, 256 MiB of RGBA).
pub const DEFAULT_MAX_SURFACE_PIXELS: u64 = 64 * 1024 * 1024;

/// Renderer-wide settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Device pixels per point, used when a request does not set its own.
    pub scale: f32,
    /// Largest surface (in pixels) a render may allocate.
    pub max_surface_pixels: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            max_surface_pixels: DEFAULT_MAX_SURFACE_PIXELS,
        }
    }
}

/// Everything needed for one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    /// Drawn as is; see [`crate::initials::extract_initials`].
    pub text: String,
    pub size: Size,
    #[serde(default)]
    pub circular: bool,
    #[serde(default)]
    pub text_attributes: Option<TextAttributes>,
    pub background: Color,
    #[serde(default)]
    pub content_mode: ContentMode,
    /// Overrides [`RenderConfig::scale`].
    #[serde(default)]
    pub scale: Option<f32>,
}

impl RenderRequest {
    /// Square, default attributes, `ScaleToFill`, renderer density.
    pub fn new(text: impl Into<String>, size: Size, background: Color) -> Self {
        Self {
            text: text.into(),
            size,
            circular: false,
            text_attributes: None,
            background,
            content_mode: ContentMode::default(),
            scale: None,
        }
    }
}

/// Avatar renderer over a text backend.
///
/// Holds no per-render state; one renderer can serve any number of renders,
/// from any number of threads when `R` is `Sync`.
#[derive(Debug, Clone)]
pub struct Renderer<R = FontBook> {
    rasterizer: R,
    config: RenderConfig,
}

impl Default for Renderer<FontBook> {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

impl Renderer<FontBook> {
    /// Renderer using the bundled fonts.
    pub fn new(config: RenderConfig) -> Self {
        Self::with_rasterizer(FontBook::default(), config)
    }

    /// Fonts available to this renderer, for registering custom fonts.
    pub fn fonts_mut(&mut self) -> &mut FontBook {
        &mut self.rasterizer
    }
}

impl<R: TextRasterizer> Renderer<R> {
    pub fn with_rasterizer(rasterizer: R, config: RenderConfig) -> Self {
        Self { rasterizer, config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    /// Render `request` into a new bitmap.
    ///
    /// Empty sizes produce an empty bitmap. Only oversized requests, or
    /// surface and mask buffers that cannot be reserved, fail.
    pub fn render_snapshot(&self, request: &RenderRequest) -> Result<Bitmap, MonogramError> {
        let scale = request.scale.unwrap_or(self.config.scale);
        let (width, height) = request.size.to_pixels(scale, request.content_mode);
        if width == 0 || height == 0 {
            warn!(
                "Empty canvas for {:?} at scale {}, returning empty bitmap",
                request.size, scale
            );
            return Ok(Bitmap::empty(scale));
        }

        let mut surface = Surface::new(width, height, scale, self.config.max_surface_pixels)?;
        if request.circular {
            surface.clip_to_circle()?;
        }
        surface.fill(request.background);

        let attrs = request
            .text_attributes
            .clone()
            .unwrap_or_default()
            .resolve(request.size);

        debug!(
            "Rendering {:?} at {}x{} px (scale {}), font '{}' {:.1}pt, circular={}",
            request.text, width, height, scale, attrs.font_name, attrs.font_size, request.circular
        );

        if !request.text.is_empty() {
            self.draw_text(&mut surface, &request.text, &attrs)?;
        }

        Ok(surface.into_bitmap())
    }

    fn draw_text(
        &self,
        surface: &mut Surface,
        text: &str,
        attrs: &ResolvedTextAttributes,
    ) -> Result<(), MonogramError> {
        let scale = surface.scale();
        let style = TextStyle::from_attributes(attrs, scale);
        let canvas = (surface.width() as f32, surface.height() as f32);

        let metrics = self.rasterizer.measure(text, &style);
        let origin = text_origin(&metrics, canvas, attrs.alignment);

        let mut mask = CoverageMask::new(surface.width(), surface.height())?;
        self.rasterizer.rasterize(text, &style, origin, &mut mask);

        if let Some(shadow) = &attrs.shadow {
            let offset = (
                (shadow.offset_x * scale).round() as i32,
                (shadow.offset_y * scale).round() as i32,
            );
            surface.paint(&mask.blurred(shadow.blur * scale)?, offset, shadow.color);
        }
        surface.paint(&mask, (0, 0), attrs.color);
        Ok(())
    }
}

/// Render with the bundled fonts at density 1.
///
/// `text` is drawn as given. Attributes left unset fall back to
/// [`crate::text::default_text_attributes`] for `size`.
pub fn render_snapshot(
    text: &str,
    size: Size,
    circular: bool,
    text_attributes: Option<&TextAttributes>,
    background: Color,
    content_mode: ContentMode,
) -> Result<Bitmap, MonogramError> {
    let request = RenderRequest {
        text: text.to_string(),
        size,
        circular,
        text_attributes: text_attributes.cloned(),
        background,
        content_mode,
        scale: None,
    };
    Renderer::new(RenderConfig::default()).render_snapshot(&request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{InkBounds, Shadow, TextAlignment, TextMetrics};

    /// Draws every character as a solid box: advance 0.6 em, ink from
    /// 0.05 to 0.55 em horizontally and from the baseline up 0.7 em.
    struct BlockRasterizer;

    impl TextRasterizer for BlockRasterizer {
        fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
            let em = style.size_px;
            let n = text.chars().count();
            let advance = n as f32 * 0.6 * em;
            let ink = (n > 0).then(|| InkBounds {
                min_x: 0.05 * em,
                min_y: -0.7 * em,
                max_x: advance - 0.05 * em,
                max_y: 0.0,
            });
            TextMetrics {
                advance,
                ascent: 0.8 * em,
                descent: -0.2 * em,
                ink,
            }
        }

        fn rasterize(&self, text: &str, style: &TextStyle, origin: (f32, f32), mask: &mut CoverageMask) {
            let em = style.size_px;
            for i in 0..text.chars().count() {
                let left = origin.0 + i as f32 * 0.6 * em + 0.05 * em;
                let right = left + 0.5 * em;
                let top = origin.1 - 0.7 * em;
                let bottom = origin.1;
                for y in 0..mask.height() as i32 {
                    for x in 0..mask.width() as i32 {
                        let (cx, cy) = (x as f32 + 0.5, y as f32 + 0.5);
                        if cx >= left && cx < right && cy >= top && cy < bottom {
                            mask.accumulate(x, y, 1.0);
                        }
                    }
                }
            }
        }
    }

    fn block_renderer() -> Renderer<BlockRasterizer> {
        Renderer::with_rasterizer(BlockRasterizer, RenderConfig::default())
    }

    /// Bounding box (min_x, min_y, max_x, max_y) of pixels equal to `color`.
    fn bbox_of(bitmap: &Bitmap, color: Color) -> Option<(u32, u32, u32, u32)> {
        let mut found: Option<(u32, u32, u32, u32)> = None;
        for (x, y, p) in bitmap.as_image().enumerate_pixels() {
            if Color::from(*p) == color {
                found = Some(match found {
                    None => (x, y, x, y),
                    Some((a, b, c, d)) => (a.min(x), b.min(y), c.max(x), d.max(y)),
                });
            }
        }
        found
    }

    fn attrs(font_size: f32) -> TextAttributes {
        TextAttributes {
            font_size: Some(font_size),
            color: Some(Color::WHITE),
            ..Default::default()
        }
    }

    #[test]
    fn test_text_is_centered_on_ink() {
        let mut request = RenderRequest::new("A", Size::square(100.0), Color::BLACK);
        request.text_attributes = Some(attrs(40.0));
        let bitmap = block_renderer().render_snapshot(&request).unwrap();
        // ink box 20x28 centered on (50, 50)
        assert_eq!(bbox_of(&bitmap, Color::WHITE), Some((40, 36, 59, 63)));
    }

    #[test]
    fn test_scale_doubles_everything() {
        let mut request = RenderRequest::new("A", Size::square(100.0), Color::BLACK);
        request.text_attributes = Some(attrs(40.0));
        request.scale = Some(2.0);
        let bitmap = block_renderer().render_snapshot(&request).unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (200, 200));
        assert_eq!(bitmap.scale(), 2.0);
        assert_eq!(bbox_of(&bitmap, Color::WHITE), Some((80, 72, 119, 127)));
    }

    #[test]
    fn test_left_and_right_alignment() {
        let mut request = RenderRequest::new("A", Size::square(100.0), Color::BLACK);
        request.text_attributes = Some(TextAttributes {
            alignment: Some(TextAlignment::Left),
            ..attrs(40.0)
        });
        let left = block_renderer().render_snapshot(&request).unwrap();
        assert_eq!(bbox_of(&left, Color::WHITE).map(|b| b.0), Some(2));

        request.text_attributes = Some(TextAttributes {
            alignment: Some(TextAlignment::Right),
            ..attrs(40.0)
        });
        let right = block_renderer().render_snapshot(&request).unwrap();
        assert_eq!(bbox_of(&right, Color::WHITE).map(|b| b.2), Some(97));
    }

    #[test]
    fn test_shadow_is_drawn_under_text() {
        let shadow_color = Color::rgb(255, 0, 0);
        let mut request = RenderRequest::new("A", Size::square(100.0), Color::BLACK);
        request.text_attributes = Some(TextAttributes {
            shadow: Some(Shadow {
                offset_x: 3.0,
                offset_y: 3.0,
                blur: 0.0,
                color: shadow_color,
            }),
            ..attrs(40.0)
        });
        let bitmap = block_renderer().render_snapshot(&request).unwrap();
        assert_eq!(bbox_of(&bitmap, Color::WHITE), Some((40, 36, 59, 63)));
        // the visible part of the shadow pokes out below and to the right
        assert_eq!(bbox_of(&bitmap, shadow_color), Some((43, 39, 62, 66)));
    }

    #[test]
    fn test_default_attributes_apply() {
        let request = RenderRequest::new("A", Size::square(100.0), Color::BLACK);
        let bitmap = block_renderer().render_snapshot(&request).unwrap();
        let (x0, y0, x1, y1) = bbox_of(&bitmap, Color::WHITE).unwrap();
        // 42pt em: ink is 21 px wide and 29.4 px tall
        assert!((20..=22).contains(&(x1 - x0 + 1)));
        assert!((29..=30).contains(&(y1 - y0 + 1)));
    }

    #[test]
    fn test_empty_text_only_fills() {
        let request = RenderRequest::new("", Size::square(10.0), Color::rgb(1, 2, 3));
        let bitmap = block_renderer().render_snapshot(&request).unwrap();
        assert!(bitmap.as_image().pixels().all(|p| p.0 == [1, 2, 3, 255]));
    }

    #[test]
    fn test_empty_size_returns_empty_bitmap() {
        for size in [Size::new(0.0, 10.0), Size::new(-4.0, -4.0), Size::new(f32::NAN, 1.0)] {
            let request = RenderRequest::new("A", size, Color::BLACK);
            let bitmap = block_renderer().render_snapshot(&request).unwrap();
            assert!(bitmap.is_empty());
        }
    }

    #[test]
    fn test_oversized_surface_is_an_error() {
        let renderer = Renderer::with_rasterizer(
            BlockRasterizer,
            RenderConfig {
                max_surface_pixels: 1_000,
                ..Default::default()
            },
        );
        let request = RenderRequest::new("A", Size::square(100.0), Color::BLACK);
        let err = renderer.render_snapshot(&request).unwrap_err();
        assert!(matches!(err, MonogramError::SurfaceTooLarge { .. }));
    }

    #[test]
    fn test_unreservable_canvas_is_an_error() {
        let renderer = Renderer::with_rasterizer(
            BlockRasterizer,
            RenderConfig {
                max_surface_pixels: u64::MAX,
                ..Default::default()
            },
        );
        let mut request = RenderRequest::new("A", Size::square(1.0e12), Color::BLACK);
        request.circular = true;
        request.text_attributes = Some(TextAttributes {
            shadow: Some(Shadow::default()),
            ..attrs(40.0)
        });
        let err = renderer.render_snapshot(&request).unwrap_err();
        assert!(matches!(err, MonogramError::Allocation(_)));
    }

    #[test]
    fn test_request_from_json() {
        let request: RenderRequest = serde_json::from_str(
            r##"{
                "text": "JS",
                "size": {"width": 48, "height": 48},
                "circular": true,
                "background": "#336699",
                "text_attributes": {"font_name": "system-bold"}
            }"##,
        )
        .unwrap();
        assert!(request.circular);
        assert_eq!(request.content_mode, ContentMode::ScaleToFill);
        assert_eq!(request.background, Color::rgb(0x33, 0x66, 0x99));
        assert_eq!(request.scale, None);
    }

    #[test]
    fn test_config_defaults_from_partial_json() {
        let config: RenderConfig = serde_json::from_str(r#"{"scale": 3.0}"#).unwrap();
        assert_eq!(config.scale, 3.0);
        assert_eq!(config.max_surface_pixels, DEFAULT_MAX_SURFACE_PIXELS);
    }
}
