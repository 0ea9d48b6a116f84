//! # Avatars
//!
//! One-call avatar generation from a name: initials, background color and
//! rendering wired together with sensible defaults.
//!
//! ## Defaults
//!
//! | Option | Default |
//! |--------|---------|
//! | `background` | [`Background::Seeded`] (color derived from the name) |
//! | `circular` | `false` |
//! | `font_name` | system font |
//! | `text_attributes` | [`crate::text::default_text_attributes`] for the size |
//!
//! ## Example
//!
//! ```
//! use monogram::{AvatarOptions, Bitmap, ContentMode, ImageTarget, Size, set_image};
//!
//! struct ProfileImage {
//!     image: Option<Bitmap>,
//! }
//!
//! impl ImageTarget for ProfileImage {
//!     fn bounds(&self) -> Size {
//!         Size::square(48.0)
//!     }
//!     fn content_mode(&self) -> ContentMode {
//!         ContentMode::ScaleAspectFill
//!     }
//!     fn scale(&self) -> f32 {
//!         2.0
//!     }
//!     fn set_image(&mut self, bitmap: Bitmap) {
//!         self.image = Some(bitmap);
//!     }
//! }
//!
//! let mut view = ProfileImage { image: None };
//! set_image(&mut view, "Grace Hopper", &AvatarOptions::circular())?;
//! assert_eq!(view.image.unwrap().width(), 96);
//! # Ok::<(), monogram::MonogramError>(())
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::bitmap::Bitmap;
use crate::color::{Color, color_from_seed, random_color};
use crate::error::MonogramError;
use crate::geometry::{ContentMode, Size};
use crate::initials::{extract_initials, is_initials};
use crate::render::{RenderConfig, RenderRequest, Renderer};
use crate::text::{TextAttributes, TextRasterizer};

/// Where the background color comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    /// Derived from the name; the same name always gets the same color.
    #[default]
    Seeded,
    /// A new random color on every render.
    Random,
    /// A fixed color.
    Solid(Color),
}

impl Background {
    /// Concrete color for an avatar of `name`.
    pub fn color_for(&self, name: &str) -> Color {
        match self {
            Background::Seeded => color_from_seed(name),
            Background::Random => random_color(),
            Background::Solid(color) => *color,
        }
    }
}

impl From<Color> for Background {
    fn from(color: Color) -> Self {
        Background::Solid(color)
    }
}

/// Options for [`set_image`] and [`image_snapshot`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarOptions {
    pub background: Background,
    pub circular: bool,
    /// Font for the letters when `text_attributes` does not name one.
    pub font_name: Option<String>,
    pub text_attributes: Option<TextAttributes>,
}

impl AvatarOptions {
    /// Default options, clipped to a circle.
    pub fn circular() -> Self {
        Self {
            circular: true,
            ..Default::default()
        }
    }

    /// Load options from a JSON document; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, MonogramError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_background(mut self, background: impl Into<Background>) -> Self {
        self.background = background.into();
        self
    }

    pub fn with_font(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = Some(font_name.into());
        self
    }

    pub fn with_text_attributes(mut self, attrs: TextAttributes) -> Self {
        self.text_attributes = Some(attrs);
        self
    }

    /// Text attributes with `font_name` filled in where the attributes leave
    /// the font unset.
    pub fn effective_text_attributes(&self) -> Option<TextAttributes> {
        match (&self.text_attributes, &self.font_name) {
            (Some(attrs), Some(font)) => Some(attrs.merged_over(&TextAttributes::with_font(font))),
            (Some(attrs), None) => Some(attrs.clone()),
            (None, Some(font)) => Some(TextAttributes::with_font(font)),
            (None, None) => None,
        }
    }

    /// Build the render request for an avatar of `name`.
    ///
    /// A name that already is uppercase initials (e.g. `"JS"`) is drawn
    /// unchanged.
    pub fn request(&self, name: &str, size: Size, content_mode: ContentMode, scale: Option<f32>) -> RenderRequest {
        let text = if is_initials(name) {
            name.to_string()
        } else {
            extract_initials(name)
        };

        RenderRequest {
            text,
            size,
            circular: self.circular,
            text_attributes: self.effective_text_attributes(),
            background: self.background.color_for(name),
            content_mode,
            scale,
        }
    }
}

/// A UI element that displays the generated avatar.
///
/// Only its geometry is read; the avatar is written back through
/// [`ImageTarget::set_image`].
pub trait ImageTarget {
    /// Size of the element in points.
    fn bounds(&self) -> Size;

    fn content_mode(&self) -> ContentMode {
        ContentMode::ScaleToFill
    }

    /// Device pixels per point.
    fn scale(&self) -> f32 {
        1.0
    }

    /// Receive the finished bitmap.
    fn set_image(&mut self, bitmap: Bitmap);
}

/// Render an avatar for `name` at `target`'s size and density and assign it.
pub fn set_image<T: ImageTarget + ?Sized>(
    target: &mut T,
    name: &str,
    options: &AvatarOptions,
) -> Result<(), MonogramError> {
    set_image_with(&Renderer::new(RenderConfig::default()), target, name, options)
}

/// [`set_image`] with a caller-provided renderer (custom fonts or limits).
pub fn set_image_with<R: TextRasterizer, T: ImageTarget + ?Sized>(
    renderer: &Renderer<R>,
    target: &mut T,
    name: &str,
    options: &AvatarOptions,
) -> Result<(), MonogramError> {
    let request = options.request(name, target.bounds(), target.content_mode(), Some(target.scale()));
    debug!("Setting avatar {:?} ({})", request.text, request.background);

    let bitmap = renderer.render_snapshot(&request)?;
    target.set_image(bitmap);
    Ok(())
}

/// Render an avatar for `name` without a target: density 1, `ScaleToFill`.
pub fn image_snapshot(name: &str, size: Size, options: &AvatarOptions) -> Result<Bitmap, MonogramError> {
    let request = options.request(name, size, ContentMode::ScaleToFill, None);
    Renderer::new(RenderConfig::default()).render_snapshot(&request)
}
