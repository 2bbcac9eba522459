//! Pure conversions between HSL, RGB, and hex, plus validation and contrast helpers.
//!
//! Every function here is total unless it returns a [`Result`]: out-of-range numeric input
//! is clamped (or wrapped, for hue) instead of rejected. Rounding is half away from zero.

use super::{Hsl, Rgb};
use crate::error::ColorError;

/// Text color returned by [`contrast_color`] for light backgrounds.
pub const BLACK: &str = "#000000";
/// Text color returned by [`contrast_color`] for dark backgrounds.
pub const WHITE: &str = "#FFFFFF";

/// Relative luminance above which black text is chosen over white.
///
/// Sits where black and white reach the same contrast ratio (about 4.58:1), so whichever side
/// wins clears 4.5:1.
const CONTRAST_LUMINANCE_THRESHOLD: f64 = 0.179;

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(unit: f64) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Convert HSL (degrees, percent, percent) into 8-bit RGB.
///
/// Hue accepts any real number and is wrapped into `[0, 360)`; saturation and lightness are
/// clamped to `[0, 100]`.
#[must_use]
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let h = h.rem_euclid(360.0);
    let s = s.clamp(0.0, 100.0) / 100.0;
    let l = l.clamp(0.0, 100.0) / 100.0;

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (r, g, b) = match (h / 60.0) as u8 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Rgb {
        r: to_channel(r + m),
        g: to_channel(g + m),
        b: to_channel(b + m),
    }
}

/// Convert RGB channels into HSL with integer degrees and percentages.
///
/// Channels are clamped to `[0, 255]`. A hue that rounds up to 360 is reported as 0.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn rgb_to_hsl(r: f64, g: f64, b: f64) -> Hsl {
    let r = r.clamp(0.0, 255.0) / 255.0;
    let g = g.clamp(0.0, 255.0) / 255.0;
    let b = b.clamp(0.0, 255.0) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl {
            h: 0,
            s: 0,
            l: (l * 100.0).round() as u8,
        };
    }

    let diff = max - min;
    let s = if l > 0.5 {
        diff / (2.0 - max - min)
    } else {
        diff / (max + min)
    };

    let sector = if max == r {
        (g - b) / diff + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / diff + 2.0
    } else {
        (r - g) / diff + 4.0
    };
    let h = sector / 6.0;

    Hsl {
        h: ((h * 360.0).round() as u16) % 360,
        s: (s * 100.0).round() as u8,
        l: (l * 100.0).round() as u8,
    }
}

/// Format RGB channels as `#RRGGBB` (upper-case). Channels are clamped and rounded.
#[must_use]
pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let channel = |v: f64| v.clamp(0.0, 255.0).round() as u8;
    format!("#{:02X}{:02X}{:02X}", channel(r), channel(g), channel(b))
}

/// Parse `#RRGGBB` or `RRGGBB` (either case) into RGB.
///
/// # Errors
///
/// [`ColorError::InvalidFormat`] unless exactly six hex digits follow the optional `#`.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ColorError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if !is_hex_digits(digits) {
        return Err(ColorError::InvalidFormat(hex.to_owned()));
    }

    let byte = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|_| ColorError::InvalidFormat(hex.to_owned()))
    };

    Ok(Rgb {
        r: byte(0..2)?,
        g: byte(2..4)?,
        b: byte(4..6)?,
    })
}

/// Parse a hex color straight into HSL.
///
/// # Errors
///
/// [`ColorError::InvalidFormat`] for malformed hex, see [`hex_to_rgb`].
pub fn hex_to_hsl(hex: &str) -> Result<Hsl, ColorError> {
    hex_to_rgb(hex).map(Rgb::to_hsl)
}

/// Format an HSL triple as `#RRGGBB`.
#[must_use]
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    hsl_to_rgb(h, s, l).to_hex()
}

/// WCAG relative luminance of an sRGB color, in `[0, 1]`.
#[must_use]
pub fn relative_luminance(rgb: Rgb) -> f64 {
    let linear = |channel: u8| {
        let c = f64::from(channel) / 255.0;
        if c <= 0.039_28 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * linear(rgb.r) + 0.7152 * linear(rgb.g) + 0.0722 * linear(rgb.b)
}

/// Pick black or white text for the given background.
///
/// # Errors
///
/// [`ColorError::InvalidFormat`] for malformed hex.
pub fn contrast_color(hex: &str) -> Result<&'static str, ColorError> {
    hex_to_rgb(hex).map(contrast_for)
}

pub(crate) fn contrast_for(rgb: Rgb) -> &'static str {
    if relative_luminance(rgb) > CONTRAST_LUMINANCE_THRESHOLD {
        BLACK
    } else {
        WHITE
    }
}

/// WCAG contrast ratio between two hex colors, in `[1, 21]`.
///
/// # Errors
///
/// [`ColorError::InvalidFormat`] if either input is malformed.
pub fn contrast_ratio(a: &str, b: &str) -> Result<f64, ColorError> {
    let la = relative_luminance(hex_to_rgb(a)?);
    let lb = relative_luminance(hex_to_rgb(b)?);
    let (hi, lo) = if la >= lb { (la, lb) } else { (lb, la) };
    Ok((hi + 0.05) / (lo + 0.05))
}

/// Circular distance between two hues in degrees, in `[0, 180]`.
#[must_use]
pub fn hue_distance(a: u16, b: u16) -> u16 {
    let diff = a.abs_diff(b) % 360;
    diff.min(360 - diff)
}

fn is_hex_digits(digits: &str) -> bool {
    digits.len() == 6 && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

/// True when `s` is `#RRGGBB` or `RRGGBB`.
#[must_use]
pub fn is_valid_hex(s: &str) -> bool {
    is_hex_digits(s.strip_prefix('#').unwrap_or(s))
}

/// True when hue is in `[0, 360]` and saturation/lightness in `[0, 100]`.
#[must_use]
pub fn is_valid_hsl(h: f64, s: f64, l: f64) -> bool {
    (0.0..=360.0).contains(&h) && (0.0..=100.0).contains(&s) && (0.0..=100.0).contains(&l)
}

/// True when every channel is in `[0, 255]`.
#[must_use]
pub fn is_valid_rgb(r: f64, g: f64, b: f64) -> bool {
    [r, g, b].iter().all(|c| (0.0..=255.0).contains(c))
}
