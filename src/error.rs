//! # Error Types
//!
//! This module defines the error type used throughout the monogram library.
//!
//! Most inputs have a defined fallback (empty names, zero sizes, unknown font
//! names) and never reach this type. What remains are resource limits and
//! malformed caller data.

use thiserror::Error;

/// Main error type for monogram operations
#[derive(Debug, Error)]
pub enum MonogramError {
    /// Requested canvas exceeds the configured pixel budget
    #[error("Surface too large: {width}x{height} pixels exceeds limit of {limit}")]
    SurfaceTooLarge { width: u32, height: u32, limit: u64 },

    /// Pixel buffer could not be reserved
    #[error("Surface allocation failed: {0}")]
    Allocation(String),

    /// Invalid font data
    #[error("Font error: {0}")]
    Font(String),

    /// Malformed color value
    #[error("Invalid color: {0}")]
    Color(String),

    /// Malformed configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Image encoding error
    #[error("Image encoding error: {0}")]
    ImageEncode(String),
}

impl From<serde_json::Error> for MonogramError {
    fn from(err: serde_json::Error) -> Self {
        MonogramError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_too_large_message() {
        let err = MonogramError::SurfaceTooLarge {
            width: 100_000,
            height: 100_000,
            limit: 1024,
        };
        assert_eq!(
            err.to_string(),
            "Surface too large: 100000x100000 pixels exceeds limit of 1024"
        );
    }

    #[test]
    fn test_json_error_maps_to_config() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: MonogramError = json_err.into();
        assert!(matches!(err, MonogramError::Config(_)));
    }
}
