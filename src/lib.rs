//! # Monogram - Initials Avatar Library
//!
//! Monogram renders placeholder avatars from a person's name: the initials,
//! centered over a background color, optionally clipped to a circle. It is
//! meant as an offline, deterministic fallback when no profile photo exists.
//!
//! - **Initials**: grapheme-aware extraction from free-form names
//! - **Colors**: random, or derived from a seed string so a name keeps its color
//! - **Rendering**: anti-aliased text with font metrics based centering,
//!   circular clipping, shadows and device pixel density
//!
//! ## Quick Start
//!
//! ```
//! use monogram::{
//!     color_from_seed, default_text_attributes, extract_initials, render_snapshot,
//!     ContentMode, Size,
//! };
//!
//! let name = "Ada Lovelace";
//! let size = Size::square(64.0);
//!
//! let initials = extract_initials(name);
//! assert_eq!(initials, "AL");
//!
//! let bitmap = render_snapshot(
//!     &initials,
//!     size,
//!     true,
//!     Some(&default_text_attributes(size)),
//!     color_from_seed(name),
//!     ContentMode::ScaleAspectFill,
//! )?;
//!
//! let png = bitmap.to_png()?;
//! assert!(!png.is_empty());
//! # Ok::<(), monogram::MonogramError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`initials`] | Initials extraction |
//! | [`color`] | Colors, random and seeded color sources, palettes |
//! | [`text`] | Text attributes, fonts, layout |
//! | [`render`] | Surface compositing and the renderer |
//! | [`avatar`] | Name → avatar convenience layer |
//! | [`bitmap`] | Output bitmap |
//! | [`geometry`] | Sizes and content modes |
//! | [`error`] | Error types |

pub mod avatar;
pub mod bitmap;
pub mod color;
pub mod error;
pub mod geometry;
pub mod initials;
pub mod render;
pub mod text;

// Re-exports for convenience
pub use avatar::{AvatarOptions, Background, ImageTarget, image_snapshot, set_image, set_image_with};
pub use bitmap::Bitmap;
pub use color::{Color, Palette, color_from_seed, random_color};
pub use error::MonogramError;
pub use geometry::{ContentMode, Size};
pub use initials::extract_initials;
pub use render::{RenderConfig, RenderRequest, Renderer, render_snapshot};
pub use text::{FontBook, TextAttributes, TextRasterizer, default_text_attributes};
