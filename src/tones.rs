//! Tone ladders: lightness variants of a base color with its hue and saturation held fixed.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    color::{Color, Hsl, convert::hex_to_hsl, convert::hue_distance},
    error::ColorError,
    generator::Palette,
};

/// Allowed drift between a tone's declared and re-derived HSL.
const TONE_TOLERANCE: u16 = 4;

/// One rung of a tone ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTone {
    /// Tier name, `"50"`..`"900"` for standard steps or a caller-chosen label.
    pub label: String,
    /// Lightness percentage, `0..=100`.
    pub lightness: u8,
    /// Derived `#RRGGBB` at that lightness.
    pub hex: String,
}

/// A step of the fixed ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StandardTone {
    /// Tier name.
    pub label: &'static str,
    /// Lightness percentage.
    pub lightness: u8,
}

const fn step(label: &'static str, lightness: u8) -> StandardTone {
    StandardTone { label, lightness }
}

/// Lightest to darkest.
const STANDARD_TONES: [StandardTone; 10] = [
    step("50", 95),
    step("100", 90),
    step("200", 80),
    step("300", 70),
    step("400", 60),
    step("500", 50),
    step("600", 40),
    step("700", 30),
    step("800", 20),
    step("900", 10),
];

fn tone_at(base: &Color, lightness: u8, label: String) -> ColorTone {
    let Hsl { h, s, .. } = base.hsl();
    ColorTone {
        label,
        lightness,
        hex: Hsl::new(h, s, lightness).to_hex(),
    }
}

fn checked_lightness(lightness: i32) -> Result<u8, ColorError> {
    u8::try_from(lightness)
        .ok()
        .filter(|l| *l <= 100)
        .ok_or(ColorError::InvalidLightness(lightness))
}

/// All ten standard tones of `base`, lightest first.
pub fn generate_all_tones(base: &Color) -> [ColorTone; 10] {
    STANDARD_TONES.map(|tone| tone_at(base, tone.lightness, tone.label.to_owned()))
}

/// The seven middle tones, `"100"` through `"700"`.
pub fn generate_tones(base: &Color) -> [ColorTone; 7] {
    std::array::from_fn(|i| {
        let tone = STANDARD_TONES[i + 1];
        tone_at(base, tone.lightness, tone.label.to_owned())
    })
}

/// A single tone of `base`; the label defaults to the lightness.
///
/// # Errors
///
/// [`ColorError::InvalidLightness`] unless `lightness` is in `0..=100`.
pub fn generate_specific_tone(
    base: &Color,
    lightness: i32,
    label: Option<&str>,
) -> Result<ColorTone, ColorError> {
    let lightness = checked_lightness(lightness)?;
    let label = label.map_or_else(|| lightness.to_string(), str::to_owned);
    Ok(tone_at(base, lightness, label))
}

/// Standard step nearest to `lightness`; on a tie the lighter step wins.
///
/// # Errors
///
/// [`ColorError::InvalidLightness`] unless `lightness` is in `0..=100`.
pub fn find_closest_tone(lightness: i32) -> Result<StandardTone, ColorError> {
    let lightness = checked_lightness(lightness)?;
    let mut best = STANDARD_TONES[0];
    for tone in &STANDARD_TONES[1..] {
        if tone.lightness.abs_diff(lightness) < best.lightness.abs_diff(lightness) {
            best = *tone;
        }
    }
    Ok(best)
}

/// Fresh color with `base`'s hue and saturation at the tone's lightness.
///
/// # Errors
///
/// [`ColorError::InvalidLightness`] if the tone's lightness exceeds 100.
pub fn tone_to_color(tone: &ColorTone, base: &Color, is_locked: bool) -> Result<Color, ColorError> {
    let lightness = checked_lightness(i32::from(tone.lightness))?;
    let hsl = Hsl {
        l: lightness,
        ..base.hsl()
    };
    Ok(Color::from_hsl_parts(Uuid::new_v4(), hsl, is_locked))
}

/// Swap the color with `color_id` for its variant at the tone's lightness.
///
/// The replacement keeps the original id and lock flag. Unknown ids leave the palette as is.
///
/// # Errors
///
/// [`ColorError::InvalidLightness`] if the tone's lightness exceeds 100.
pub fn apply_tone(palette: &Palette, color_id: Uuid, tone: &ColorTone) -> Result<Palette, ColorError> {
    let lightness = checked_lightness(i32::from(tone.lightness))?;
    Ok(palette.map_colors(|color| {
        if color.id() == color_id {
            let hsl = Hsl {
                l: lightness,
                ..color.hsl()
            };
            Color::from_hsl_parts(color.id(), hsl, color.is_locked())
        } else {
            color.clone()
        }
    }))
}

/// Re-derive each tone from its hex and compare against `base` within a few units.
///
/// Hue and saturation are checked against the base, lightness against the tone's own
/// declared value. A single unparsable hex fails the whole check.
pub fn validate_tone_consistency(base: &Color, tones: &[ColorTone]) -> bool {
    let Hsl { h, s, .. } = base.hsl();
    tones.iter().all(|tone| match hex_to_hsl(&tone.hex) {
        Ok(derived) => {
            hue_distance(derived.h, h) <= TONE_TOLERANCE
                && u16::from(derived.s.abs_diff(s)) <= TONE_TOLERANCE
                && u16::from(derived.l.abs_diff(tone.lightness)) <= TONE_TOLERANCE
        }
        Err(_) => false,
    })
}

/// Standard labels, lightest to darkest.
pub fn standard_labels() -> [&'static str; 10] {
    STANDARD_TONES.map(|tone| tone.label)
}

/// Standard lightness values, lightest to darkest.
pub fn standard_lightness() -> [u8; 10] {
    STANDARD_TONES.map(|tone| tone.lightness)
}
