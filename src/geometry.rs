//! Sizes in points and the point → pixel rules used when a canvas is created.
//!
//! ## Density
//!
//! ```text
//! pixels = points × scale
//!
//! 40×40 pt at scale 2.0  → 80×80 px
//! 40×40 pt at scale 3.0  → 120×120 px
//! ```
//!
//! Scaling content modes snap down to whole device pixels so the image maps
//! 1:1 when the view stretches it; positional modes round up so no content
//! is cut off.

use serde::{Deserialize, Serialize};

/// Width and height in points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Square size.
    pub const fn square(side: f32) -> Self {
        Self::new(side, side)
    }

    /// True for zero, negative or non-finite dimensions.
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }

    /// The smaller of the two sides.
    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Size in pixels at `scale`, snapped according to `mode`.
    ///
    /// Empty sizes and invalid scales give `(0, 0)`.
    pub fn to_pixels(&self, scale: f32, mode: ContentMode) -> (u32, u32) {
        if self.is_empty() || !(scale.is_finite() && scale > 0.0) {
            return (0, 0);
        }
        let snap = |v: f32| -> u32 {
            let px = v * scale;
            let px = if mode.is_scaling() { px.floor() } else { px.ceil() };
            // float → int `as` saturates, so absurd sizes stay representable
            // and are rejected later by the surface limit.
            px as u32
        };
        (snap(self.width), snap(self.height))
    }
}

/// How content is positioned within its target frame.
///
/// Names follow the usual UI toolkit vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentMode {
    /// Stretch to fill, ignoring aspect ratio.
    #[default]
    ScaleToFill,
    /// Scale to fit inside, keeping aspect ratio.
    ScaleAspectFit,
    /// Scale to cover, keeping aspect ratio.
    ScaleAspectFill,
    /// Redraw at the new size.
    Redraw,
    Center,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ContentMode {
    /// Modes that rescale the image to the frame.
    pub fn is_scaling(self) -> bool {
        matches!(
            self,
            ContentMode::ScaleToFill
                | ContentMode::ScaleAspectFit
                | ContentMode::ScaleAspectFill
                | ContentMode::Redraw
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sizes() {
        assert!(Size::new(0.0, 10.0).is_empty());
        assert!(Size::new(10.0, -1.0).is_empty());
        assert!(Size::new(f32::NAN, 10.0).is_empty());
        assert!(Size::new(f32::INFINITY, 10.0).is_empty());
        assert!(!Size::square(1.0).is_empty());
    }

    #[test]
    fn test_pixels_at_density() {
        let size = Size::new(40.0, 30.0);
        assert_eq!(size.to_pixels(1.0, ContentMode::ScaleToFill), (40, 30));
        assert_eq!(size.to_pixels(2.0, ContentMode::ScaleToFill), (80, 60));
        assert_eq!(size.to_pixels(3.0, ContentMode::Center), (120, 90));
    }

    #[test]
    fn test_fractional_snapping_depends_on_mode() {
        let size = Size::new(40.4, 40.6);
        assert_eq!(size.to_pixels(1.0, ContentMode::ScaleAspectFill), (40, 40));
        assert_eq!(size.to_pixels(1.0, ContentMode::Redraw), (40, 40));
        assert_eq!(size.to_pixels(1.0, ContentMode::Center), (41, 41));
        assert_eq!(size.to_pixels(1.0, ContentMode::TopLeft), (41, 41));
    }

    #[test]
    fn test_invalid_scale_or_size_gives_zero() {
        assert_eq!(Size::square(10.0).to_pixels(0.0, ContentMode::Center), (0, 0));
        assert_eq!(Size::square(10.0).to_pixels(f32::NAN, ContentMode::Center), (0, 0));
        assert_eq!(Size::square(-3.0).to_pixels(2.0, ContentMode::Center), (0, 0));
    }

    #[test]
    fn test_min_side() {
        assert_eq!(Size::new(80.0, 50.0).min_side(), 50.0);
    }

    #[test]
    fn test_content_mode_serde_names() {
        let mode: ContentMode = serde_json::from_str("\"scale_aspect_fit\"").unwrap();
        assert_eq!(mode, ContentMode::ScaleAspectFit);
        assert_eq!(
            serde_json::to_string(&ContentMode::BottomRight).unwrap(),
            "\"bottom_right\""
        );
    }
}
