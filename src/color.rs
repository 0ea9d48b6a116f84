//! # Colors
//!
//! RGBA color type plus the two background color sources:
//!
//! - [`random_color`]: a fresh color on every call
//! - [`color_from_seed`]: a pure function of a string, stable across runs and
//!   platforms
//!
//! Both draw each RGB channel from the same legible band, so white initials
//! stay readable on either.
//!
//! ```
//! use monogram::color::{color_from_seed, Color};
//!
//! let a = color_from_seed("Alice");
//! assert_eq!(a, color_from_seed("Alice"));
//! assert_eq!(a.a, 255);
//! assert_eq!(Color::from_hex("#ff8000").unwrap(), Color::rgb(255, 128, 0));
//! ```

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::MonogramError;

/// Lowest channel value produced by the color sources (~10%).
pub const CHANNEL_MIN: u8 = 26;

/// Highest channel value produced by the color sources (~84%).
pub const CHANNEL_MAX: u8 = 214;

/// Straight (non-premultiplied) RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, MonogramError> {
        let digits = hex.trim().trim_start_matches('#');
        let invalid = || MonogramError::Color(format!("'{}' is not a hex color", hex));

        if !digits.is_ascii() {
            return Err(invalid());
        }
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());

        match digits.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (i, ch) in digits.chars().enumerate() {
                    let v = ch.to_digit(16).ok_or_else(invalid)? as u8;
                    channels[i] = v * 17;
                }
                Ok(Color::rgb(channels[0], channels[1], channels[2]))
            }
            6 => Ok(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Color::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(invalid()),
        }
    }

    /// `#rrggbb` for opaque colors, `#rrggbbaa` otherwise.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Relative luminance in [0, 1] (Rec. 709 weights, no gamma decode).
    pub fn luminance(self) -> f32 {
        (0.2126 * self.r as f32 + 0.7152 * self.g as f32 + 0.0722 * self.b as f32) / 255.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = MonogramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = MonogramError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl From<Color> for image::Rgba<u8> {
    fn from(c: Color) -> Self {
        image::Rgba([c.r, c.g, c.b, c.a])
    }
}

impl From<image::Rgba<u8>> for Color {
    fn from(px: image::Rgba<u8>) -> Self {
        let [r, g, b, a] = px.0;
        Color::rgba(r, g, b, a)
    }
}

// ============================================================================
// COLOR SOURCES
// ============================================================================

/// Uniformly random opaque color from the legible band.
///
/// Non-deterministic: every call draws from the thread-local RNG.
pub fn random_color() -> Color {
    let mut rng = rand::rng();
    Color::rgb(
        rng.random_range(CHANNEL_MIN..=CHANNEL_MAX),
        rng.random_range(CHANNEL_MIN..=CHANNEL_MAX),
        rng.random_range(CHANNEL_MIN..=CHANNEL_MAX),
    )
}

/// Deterministic opaque color derived from `seed`.
///
/// The same seed gives the same color on every platform and in every process.
pub fn color_from_seed(seed: &str) -> Color {
    let h = seed_hash(seed);
    Color::rgb(
        band_channel(mix(h)),
        band_channel(mix(h ^ 0x9e37_79b9)),
        band_channel(mix(h.wrapping_add(0x85eb_ca6b))),
    )
}

/// FNV-1a over the UTF-8 bytes of `seed`.
pub fn seed_hash(seed: &str) -> u32 {
    const OFFSET: u32 = 0x811c_9dc5;
    const PRIME: u32 = 0x0100_0193;

    seed.bytes()
        .fold(OFFSET, |h, b| (h ^ b as u32).wrapping_mul(PRIME))
}

/// Integer finalizer spreading nearby hashes across the full range.
#[inline]
fn mix(mut x: u32) -> u32 {
    x = x.wrapping_mul(0x45d9f3b);
    x ^= x >> 16;
    x = x.wrapping_mul(0x45d9f3b);
    x ^= x >> 16;
    x
}

#[inline]
fn band_channel(h: u32) -> u8 {
    let span = (CHANNEL_MAX - CHANNEL_MIN) as u32 + 1;
    CHANNEL_MIN + (h % span) as u8
}

// ============================================================================
// PALETTES
// ============================================================================

/// A fixed set of background colors indexed by seed hash.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub colors: &'static [Color],
}

impl Palette {
    /// Flat UI colors, all dark enough for white text.
    pub const FLAT: Palette = Palette {
        colors: &[
            Color::rgb(0x1a, 0xbc, 0x9c),
            Color::rgb(0x16, 0xa0, 0x85),
            Color::rgb(0x2e, 0xcc, 0x71),
            Color::rgb(0x27, 0xae, 0x60),
            Color::rgb(0x34, 0x98, 0xdb),
            Color::rgb(0x29, 0x80, 0xb9),
            Color::rgb(0x9b, 0x59, 0xb6),
            Color::rgb(0x8e, 0x44, 0xad),
            Color::rgb(0x34, 0x49, 0x5e),
            Color::rgb(0x2c, 0x3e, 0x50),
            Color::rgb(0xf3, 0x9c, 0x12),
            Color::rgb(0xe6, 0x7e, 0x22),
            Color::rgb(0xd3, 0x54, 0x00),
            Color::rgb(0xe7, 0x4c, 0x3c),
            Color::rgb(0xc0, 0x39, 0x2b),
            Color::rgb(0x7f, 0x8c, 0x8d),
        ],
    };

    /// Deterministically pick a palette entry for `seed`.
    ///
    /// An empty palette yields [`color_from_seed`].
    pub fn pick(&self, seed: &str) -> Color {
        if self.colors.is_empty() {
            return color_from_seed(seed);
        }
        let idx = mix(seed_hash(seed)) as usize % self.colors.len();
        self.colors[idx]
    }
}
