//! Text attributes for the avatar letters.
//!
//! Every key is optional. Missing keys fall back one by one to
//! [`default_text_attributes`] for the canvas size, so setting only a color
//! keeps the default font and size.
//!
//! ```
//! use monogram::{Color, Size, TextAttributes};
//!
//! let attrs = TextAttributes {
//!     color: Some(Color::BLACK),
//!     ..Default::default()
//! };
//! let resolved = attrs.resolve(Size::square(100.0));
//! assert_eq!(resolved.color, Color::BLACK);
//! assert_eq!(resolved.font_name, "system");
//! assert!((resolved.font_size - 42.0).abs() < 1e-4);
//! ```

use serde::{Deserialize, Serialize};

use super::font::SYSTEM_FONT;
use crate::color::Color;
use crate::geometry::Size;

/// Default font size as a fraction of the canvas' smaller side.
pub const FONT_SIZE_PROPORTION: f32 = 0.42;

/// Horizontal placement of the text line on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlignment {
    Left,
    #[default]
    Center,
    Right,
}

/// Drop shadow drawn beneath the text. Offsets and blur are in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Shadow {
    pub offset_x: f32,
    pub offset_y: f32,
    /// Gaussian blur sigma; 0 gives a hard shadow.
    pub blur: f32,
    pub color: Color,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 1.0,
            blur: 2.0,
            color: Color::rgba(0, 0, 0, 0x55),
        }
    }
}

/// Optional text attributes, merged per key over the size defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextAttributes {
    /// Font book name; unknown names fall back to the system font.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,
    /// Em size in points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<TextAlignment>,
    /// Extra space between letters, in points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f32>,
}

/// Text attributes with every key filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTextAttributes {
    pub font_name: String,
    pub font_size: f32,
    pub color: Color,
    pub shadow: Option<Shadow>,
    pub alignment: TextAlignment,
    pub letter_spacing: f32,
}

/// Defaults for a canvas of `size`: system font at 42% of the smaller side,
/// white, centered, no shadow, no extra spacing.
pub fn default_text_attributes(size: Size) -> TextAttributes {
    let side = if size.is_empty() { 0.0 } else { size.min_side() };
    TextAttributes {
        font_name: Some(SYSTEM_FONT.to_string()),
        font_size: Some(side * FONT_SIZE_PROPORTION),
        color: Some(Color::WHITE),
        shadow: None,
        alignment: Some(TextAlignment::Center),
        letter_spacing: Some(0.0),
    }
}

impl TextAttributes {
    /// Attributes that only set the font, as when a caller passes a font name
    /// and nothing else.
    pub fn with_font(name: impl Into<String>) -> Self {
        Self {
            font_name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Keys set in `self` win; the rest come from `fallback`.
    pub fn merged_over(&self, fallback: &TextAttributes) -> TextAttributes {
        TextAttributes {
            font_name: self.font_name.clone().or_else(|| fallback.font_name.clone()),
            font_size: self.font_size.or(fallback.font_size),
            color: self.color.or(fallback.color),
            shadow: self.shadow.or(fallback.shadow),
            alignment: self.alignment.or(fallback.alignment),
            letter_spacing: self.letter_spacing.or(fallback.letter_spacing),
        }
    }

    /// Fill every missing key from the defaults for `size`.
    ///
    /// Non-finite or negative font sizes are treated as missing.
    pub fn resolve(&self, size: Size) -> ResolvedTextAttributes {
        let defaults = default_text_attributes(size);
        let merged = self.merged_over(&defaults);

        let default_size = defaults.font_size.unwrap_or(0.0);
        let font_size = merged
            .font_size
            .filter(|s| s.is_finite() && *s >= 0.0)
            .unwrap_or(default_size);

        ResolvedTextAttributes {
            font_name: merged.font_name.unwrap_or_else(|| SYSTEM_FONT.to_string()),
            font_size,
            color: merged.color.unwrap_or(Color::WHITE),
            shadow: merged.shadow,
            alignment: merged.alignment.unwrap_or_default(),
            letter_spacing: merged.letter_spacing.filter(|s| s.is_finite()).unwrap_or(0.0),
        }
    }
}
