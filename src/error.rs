//! Error taxonomy shared by conversion, construction, and tone derivation.

use thiserror::Error;

/// Errors raised by color conversion, construction, and tone derivation.
///
/// Every variant is produced at the point where the invalid input is seen and is handed
/// back to the caller untouched; nothing inside the crate catches or retries them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// A hex string was not `#RRGGBB` (the `#` is optional).
    #[error("invalid hex color format: {0:?}")]
    InvalidFormat(String),
    /// HSL or RGB components were outside their valid ranges.
    #[error("invalid color value: {0}")]
    InvalidColorValue(String),
    /// A tone lightness outside `0..=100`.
    #[error("invalid lightness: {0} (expected 0..=100)")]
    InvalidLightness(i32),
}
