//! Single-line text layout with ab_glyph.
//!
//! ## Centering
//!
//! ```text
//!            ┌──────── advance ────────┐
//!   ascent ─ ┊                         ┊
//!            ┊   ██████   ███████      ┊  ← ink top
//!            ┊   ██  ██   ██           ┊
//!   ─ ─ ─ ─  ┊ ─ ██████ ─ ███████ ─ ─ ─┊ ─ canvas center
//!            ┊   ██  ██        ██      ┊
//! baseline ──┊───██──██───███████──────┊  ← ink bottom
//!  descent ─ ┊                         ┊
//! ```
//!
//! Horizontal placement uses the advance width. Vertically the ink box is
//! centered, so capitals sit in the optical middle instead of riding high
//! as they would with the ascent/descent line box. Text without ink falls
//! back to centering the line box.

use ab_glyph::{Font, FontArc, GlyphId, PxScale, ScaleFont, point};

use super::attributes::TextAlignment;
use crate::render::mask::CoverageMask;

/// Bounding box of the drawn pixels, relative to the baseline origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InkBounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl InkBounds {
    pub fn union(self, other: InkBounds) -> InkBounds {
        InkBounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn center_y(&self) -> f32 {
        (self.min_y + self.max_y) / 2.0
    }
}

/// Extents of a laid-out line, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Pen advance from the first to past the last glyph.
    pub advance: f32,
    /// Distance from baseline to the top of the line box (positive).
    pub ascent: f32,
    /// Distance from baseline to the bottom of the line box (negative).
    pub descent: f32,
    /// `None` when nothing visible is drawn.
    pub ink: Option<InkBounds>,
}

impl TextMetrics {
    pub fn line_height(&self) -> f32 {
        self.ascent - self.descent
    }
}

/// Baseline origin that places text of `metrics` on a `canvas` of
/// `(width, height)` pixels.
pub fn text_origin(metrics: &TextMetrics, canvas: (f32, f32), alignment: TextAlignment) -> (f32, f32) {
    let (width, height) = canvas;

    let x = match alignment {
        TextAlignment::Left => 0.0,
        TextAlignment::Center => (width - metrics.advance) / 2.0,
        TextAlignment::Right => width - metrics.advance,
    };

    let y = match metrics.ink {
        Some(ink) => height / 2.0 - ink.center_y(),
        None => height / 2.0 + (metrics.ascent + metrics.descent) / 2.0,
    };

    (x, y)
}

/// Scale at which one em of `font` is `em_px` pixels.
///
/// ab_glyph's `PxScale` is the height of the ascent-to-descent box, while
/// font sizes are conventionally em sizes.
pub fn em_scale(font: &FontArc, em_px: f32) -> PxScale {
    let upem = font.units_per_em().unwrap_or(1000.0);
    PxScale::from(em_px * font.height_unscaled() / upem)
}

/// Glyphs of one line positioned along the baseline.
pub struct GlyphRun<'a> {
    font: &'a FontArc,
    scale: PxScale,
    /// (glyph, pen x)
    glyphs: Vec<(GlyphId, f32)>,
    advance: f32,
}

impl<'a> GlyphRun<'a> {
    pub fn new(font: &'a FontArc, text: &str, em_px: f32, letter_spacing: f32) -> Self {
        let scale = em_scale(font, em_px.max(0.0));
        let scaled = font.as_scaled(scale);

        let mut glyphs = Vec::new();
        let mut caret_x = 0.0f32;
        let mut prev: Option<GlyphId> = None;

        for ch in text.chars().filter(|c| !c.is_control()) {
            let glyph_id = font.glyph_id(ch);
            if let Some(prev_id) = prev {
                caret_x += scaled.kern(prev_id, glyph_id) + letter_spacing;
            }
            glyphs.push((glyph_id, caret_x));
            caret_x += scaled.h_advance(glyph_id);
            prev = Some(glyph_id);
        }

        Self {
            font,
            scale,
            glyphs,
            advance: caret_x.max(0.0),
        }
    }

    pub fn metrics(&self) -> TextMetrics {
        let scaled = self.font.as_scaled(self.scale);
        let (h_factor, v_factor) = (scaled.h_scale_factor(), scaled.v_scale_factor());

        let ink = self
            .glyphs
            .iter()
            .filter_map(|&(id, x)| {
                let outline = self.font.outline(id)?;
                let b = outline.bounds;
                // Font units are y-up; pixels are y-down.
                Some(InkBounds {
                    min_x: x + b.min.x * h_factor,
                    min_y: -b.max.y * v_factor,
                    max_x: x + b.max.x * h_factor,
                    max_y: -b.min.y * v_factor,
                })
            })
            .filter(|b| b.max_x > b.min_x && b.max_y > b.min_y)
            .reduce(InkBounds::union);

        TextMetrics {
            advance: self.advance,
            ascent: scaled.ascent(),
            descent: scaled.descent(),
            ink,
        }
    }

    /// Rasterize into `mask` with the baseline origin at `origin`.
    pub fn draw(&self, origin: (f32, f32), mask: &mut CoverageMask) {
        for &(id, x) in &self.glyphs {
            let glyph = id.with_scale_and_position(self.scale, point(origin.0 + x, origin.1));
            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|px, py, coverage| {
                    let x = px as i32 + bounds.min.x as i32;
                    let y = py as i32 + bounds.min.y as i32;
                    mask.accumulate(x, y, coverage);
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::font::{FontBook, SYSTEM_FONT};

    fn system_font() -> FontArc {
        FontBook::default().resolve(SYSTEM_FONT).clone()
    }

    #[test]
    fn test_em_scale_matches_em_size() {
        let font = system_font();
        let scale = em_scale(&font, 100.0);
        let upem = font.units_per_em().unwrap();
        let em_px = scale.y * upem / font.height_unscaled();
        assert!((em_px - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_metrics_basic() {
        let font = system_font();
        let m = GlyphRun::new(&font, "HE", 40.0, 0.0).metrics();
        assert!(m.advance > 20.0 && m.advance < 80.0);
        assert!(m.ascent > 0.0);
        assert!(m.descent < 0.0);
        let ink = m.ink.unwrap();
        // Capitals sit on the baseline and rise above it.
        assert!(ink.min_y < -20.0);
        assert!(ink.max_y.abs() < 1.0);
    }

    #[test]
    fn test_letter_spacing_widens() {
        let font = system_font();
        let tight = GlyphRun::new(&font, "AB", 40.0, 0.0).metrics().advance;
        let loose = GlyphRun::new(&font, "AB", 40.0, 10.0).metrics().advance;
        assert!((loose - tight - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_whitespace_has_no_ink() {
        let font = system_font();
        let m = GlyphRun::new(&font, "  ", 40.0, 0.0).metrics();
        assert!(m.ink.is_none());
        assert!(m.advance > 0.0);
    }

    #[test]
    fn test_empty_text() {
        let font = system_font();
        let m = GlyphRun::new(&font, "", 40.0, 0.0).metrics();
        assert_eq!(m.advance, 0.0);
        assert!(m.ink.is_none());
    }

    #[test]
    fn test_origin_centers_ink() {
        let metrics = TextMetrics {
            advance: 20.0,
            ascent: 16.0,
            descent: -4.0,
            ink: Some(InkBounds {
                min_x: 1.0,
                min_y: -14.0,
                max_x: 19.0,
                max_y: 0.0,
            }),
        };
        let (x, y) = text_origin(&metrics, (100.0, 100.0), TextAlignment::Center);
        assert!((x - 40.0).abs() < 1e-6);
        assert!((y - 57.0).abs() < 1e-6);
    }

    #[test]
    fn test_origin_without_ink_centers_line_box() {
        let metrics = TextMetrics {
            advance: 0.0,
            ascent: 16.0,
            descent: -4.0,
            ink: None,
        };
        let (_, y) = text_origin(&metrics, (100.0, 100.0), TextAlignment::Center);
        // line box spans y-16 .. y+4, centered on 50
        assert!((y - 56.0).abs() < 1e-6);
    }

    #[test]
    fn test_origin_alignment() {
        let metrics = TextMetrics {
            advance: 30.0,
            ascent: 10.0,
            descent: -2.0,
            ink: None,
        };
        assert_eq!(text_origin(&metrics, (100.0, 50.0), TextAlignment::Left).0, 0.0);
        assert_eq!(text_origin(&metrics, (100.0, 50.0), TextAlignment::Right).0, 70.0);
    }

    #[test]
    fn test_draw_produces_anti_aliased_coverage() {
        let font = system_font();
        let run = GlyphRun::new(&font, "Ag", 48.0, 0.0);
        let mut mask = CoverageMask::new(120, 80).unwrap();
        run.draw((10.0, 55.0), &mut mask);
        assert!(mask.data().iter().any(|&v| v > 0.99));
        assert!(mask.data().iter().any(|&v| v > 0.01 && v < 0.99));
    }
}
