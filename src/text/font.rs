//! Font lookup by name.
//!
//! The crate bundles DejaVu Sans (regular and bold) as its system font so
//! rendering works offline and looks the same everywhere. Hosts can register
//! their own TrueType/OpenType fonts under any name.

use ab_glyph::FontArc;
use log::warn;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::MonogramError;

/// Name of the default font.
pub const SYSTEM_FONT: &str = "system";

/// Name of the bold variant of the default font.
pub const SYSTEM_FONT_BOLD: &str = "system-bold";

static DEJAVU_SANS: OnceLock<FontArc> = OnceLock::new();
static DEJAVU_SANS_BOLD: OnceLock<FontArc> = OnceLock::new();

fn dejavu_sans() -> &'static FontArc {
    DEJAVU_SANS.get_or_init(|| {
        FontArc::try_from_slice(include_bytes!("fonts/DejaVuSans.ttf"))
            .expect("Failed to load DejaVu Sans")
    })
}

fn dejavu_sans_bold() -> &'static FontArc {
    DEJAVU_SANS_BOLD.get_or_init(|| {
        FontArc::try_from_slice(include_bytes!("fonts/DejaVuSans-Bold.ttf"))
            .expect("Failed to load DejaVu Sans Bold")
    })
}

/// Named fonts available to the renderer.
///
/// Names are matched case-insensitively. Cloning is cheap: fonts are shared.
#[derive(Clone)]
pub struct FontBook {
    fonts: HashMap<String, FontArc>,
}

impl Default for FontBook {
    fn default() -> Self {
        let mut fonts = HashMap::new();
        fonts.insert(SYSTEM_FONT.to_string(), dejavu_sans().clone());
        fonts.insert(SYSTEM_FONT_BOLD.to_string(), dejavu_sans_bold().clone());
        fonts.insert("dejavu sans".to_string(), dejavu_sans().clone());
        fonts.insert("dejavu sans bold".to_string(), dejavu_sans_bold().clone());
        Self { fonts }
    }
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names = self.names();
        names.sort_unstable();
        f.debug_struct("FontBook").field("fonts", &names).finish()
    }
}

impl FontBook {
    /// Register font data under `name`, replacing any font of that name.
    pub fn register_font(&mut self, name: &str, data: Vec<u8>) -> Result<(), MonogramError> {
        let font = FontArc::try_from_vec(data)
            .map_err(|e| MonogramError::Font(format!("'{}': {}", name, e)))?;
        self.fonts.insert(key(name), font);
        Ok(())
    }

    /// Font registered under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&FontArc> {
        self.fonts.get(&key(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fonts.contains_key(&key(name))
    }

    /// Font for `name`, or the system font when the name is unknown.
    pub fn resolve(&self, name: &str) -> &FontArc {
        if !self.contains(name) {
            warn!("Unknown font '{}', falling back to {}", name, SYSTEM_FONT);
        }
        self.resolve_quiet(name)
    }

    /// [`FontBook::resolve`] without the unknown-font warning.
    pub(crate) fn resolve_quiet(&self, name: &str) -> &FontArc {
        self.get(name)
            .or_else(|| self.fonts.get(SYSTEM_FONT))
            .unwrap_or_else(|| dejavu_sans())
    }

    /// Registered names (lowercased), in no particular order.
    pub fn names(&self) -> Vec<&str> {
        self.fonts.keys().map(String::as_str).collect()
    }
}

fn key(name: &str) -> String {
    name.trim().to_lowercase()
}
