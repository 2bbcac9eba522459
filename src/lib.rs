//! Library crate for chroma-deck: color conversion, constrained palette generation with
//! per-color locks, and tone ladders.

pub mod color;
pub mod config;
pub mod error;
pub mod generator;
pub mod tones;

pub use color::{Color, Hsl, Rgb, create_color_from_hex, create_color_from_hsl, create_color_from_rgb};
pub use error::ColorError;
pub use generator::{Palette, PaletteGenerator, PaletteOptions, toggle_color_lock, validate_palette};
pub use tones::{ColorTone, StandardTone};
