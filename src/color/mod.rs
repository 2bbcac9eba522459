//! Color value types and validated constructors.
//!
//! A [`Color`] carries its hex, RGB, and HSL forms side by side. All three are derived once,
//! at construction, from whichever form the caller supplied, so they never disagree beyond
//! conversion rounding.

pub mod convert;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ColorError;
use convert::{hex_to_rgb, hsl_to_rgb, is_valid_hsl, is_valid_rgb, rgb_to_hex, rgb_to_hsl};

/// 8-bit sRGB channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Build an RGB triple.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Canonical `#RRGGBB` form.
    #[must_use]
    pub fn to_hex(self) -> String {
        rgb_to_hex(f64::from(self.r), f64::from(self.g), f64::from(self.b))
    }

    /// Integer HSL form.
    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        rgb_to_hsl(f64::from(self.r), f64::from(self.g), f64::from(self.b))
    }
}

/// Hue in whole degrees, saturation and lightness in whole percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hsl {
    /// Hue, `0..360`.
    pub h: u16,
    /// Saturation, `0..=100`.
    pub s: u8,
    /// Lightness, `0..=100`.
    pub l: u8,
}

impl Hsl {
    /// Build an HSL triple.
    pub const fn new(h: u16, s: u8, l: u8) -> Self {
        Self { h, s, l }
    }

    /// 8-bit RGB form.
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        hsl_to_rgb(f64::from(self.h), f64::from(self.s), f64::from(self.l))
    }

    /// Canonical `#RRGGBB` form.
    #[must_use]
    pub fn to_hex(self) -> String {
        self.to_rgb().to_hex()
    }
}

/// One palette color with a stable identity and a lock flag.
///
/// Values are never mutated. Toggling the lock or applying a tone yields a replacement that
/// keeps the same [`Color::id`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ColorRecord")]
pub struct Color {
    id: Uuid,
    hex: String,
    rgb: Rgb,
    hsl: Hsl,
    is_locked: bool,
}

impl Color {
    /// Derive the RGB and hex forms from `hsl`. Callers guarantee `hsl` is in range.
    pub(crate) fn from_hsl_parts(id: Uuid, hsl: Hsl, is_locked: bool) -> Self {
        let hsl = Hsl { h: hsl.h % 360, ..hsl };
        let rgb = hsl.to_rgb();
        Self {
            id,
            hex: rgb.to_hex(),
            rgb,
            hsl,
            is_locked,
        }
    }

    fn from_rgb_parts(id: Uuid, rgb: Rgb, is_locked: bool) -> Self {
        Self {
            id,
            hex: rgb.to_hex(),
            rgb,
            hsl: rgb.to_hsl(),
            is_locked,
        }
    }

    /// Opaque identifier, kept across lock toggles and tone application.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Upper-case `#RRGGBB`.
    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// RGB form.
    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    /// HSL form.
    pub fn hsl(&self) -> Hsl {
        self.hsl
    }

    /// Whether the next regeneration must carry this color over unchanged.
    pub fn is_locked(&self) -> bool {
        self.is_locked
    }

    /// Same color and id with the given lock flag.
    #[must_use]
    pub fn with_lock(self, is_locked: bool) -> Self {
        Self { is_locked, ..self }
    }

    /// Black or white, whichever reads better on top of this color.
    pub fn contrast_text(&self) -> &'static str {
        convert::contrast_for(self.rgb)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        create_color_from_hex(s, false)
    }
}

/// Create a color from HSL components (`h` in `0..=360`, `s`/`l` in `0..=100`).
///
/// A hue of 360 is stored as 0.
///
/// # Errors
///
/// [`ColorError::InvalidColorValue`] when a component is out of range.
pub fn create_color_from_hsl(h: i32, s: i32, l: i32, is_locked: bool) -> Result<Color, ColorError> {
    if !is_valid_hsl(f64::from(h), f64::from(s), f64::from(l)) {
        return Err(ColorError::InvalidColorValue(format!(
            "hsl({h}, {s}%, {l}%) is out of range"
        )));
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let hsl = Hsl::new(h as u16, s as u8, l as u8);
    Ok(Color::from_hsl_parts(Uuid::new_v4(), hsl, is_locked))
}

/// Create a color from RGB channels (each in `0..=255`).
///
/// # Errors
///
/// [`ColorError::InvalidColorValue`] when a channel is out of range.
pub fn create_color_from_rgb(r: i32, g: i32, b: i32, is_locked: bool) -> Result<Color, ColorError> {
    if !is_valid_rgb(f64::from(r), f64::from(g), f64::from(b)) {
        return Err(ColorError::InvalidColorValue(format!(
            "rgb({r}, {g}, {b}) is out of range"
        )));
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rgb = Rgb::new(r as u8, g as u8, b as u8);
    Ok(Color::from_rgb_parts(Uuid::new_v4(), rgb, is_locked))
}

/// Create a color from `#RRGGBB` / `RRGGBB`. The stored hex is upper-cased.
///
/// # Errors
///
/// [`ColorError::InvalidColorValue`] when the hex is malformed.
pub fn create_color_from_hex(hex: &str, is_locked: bool) -> Result<Color, ColorError> {
    let rgb = hex_to_rgb(hex).map_err(|err| ColorError::InvalidColorValue(err.to_string()))?;
    Ok(Color::from_rgb_parts(Uuid::new_v4(), rgb, is_locked))
}

/// Wire shape of a [`Color`], checked before it becomes one.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ColorRecord {
    id: Uuid,
    hex: String,
    rgb: Rgb,
    hsl: Hsl,
    #[serde(default)]
    is_locked: bool,
}

impl TryFrom<ColorRecord> for Color {
    type Error = ColorError;

    fn try_from(record: ColorRecord) -> Result<Self, Self::Error> {
        let parsed = hex_to_rgb(&record.hex)?;
        if parsed != record.rgb {
            return Err(ColorError::InvalidColorValue(format!(
                "hex {} does not match rgb({}, {}, {})",
                record.hex, record.rgb.r, record.rgb.g, record.rgb.b
            )));
        }
        let Hsl { h, s, l } = record.hsl;
        if !is_valid_hsl(f64::from(h), f64::from(s), f64::from(l)) {
            return Err(ColorError::InvalidColorValue(format!(
                "hsl({h}, {s}%, {l}%) is out of range"
            )));
        }

        // A color built from HSL derives its RGB exactly, one built from RGB derives its HSL
        // exactly; a record has to match one of the two.
        let hsl = Hsl { h: h % 360, s, l };
        if hsl.to_rgb() != record.rgb && record.rgb.to_hsl() != hsl {
            return Err(ColorError::InvalidColorValue(format!(
                "hsl({h}, {s}%, {l}%) does not match rgb({}, {}, {})",
                record.rgb.r, record.rgb.g, record.rgb.b
            )));
        }

        Ok(Self {
            id: record.id,
            hex: record.rgb.to_hex(),
            rgb: record.rgb,
            hsl,
            is_locked: record.is_locked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsl_constructor_derives_other_forms() {
        let color = create_color_from_hsl(9, 100, 60, false).unwrap();
        assert_eq!(color.hsl(), Hsl::new(9, 100, 60));
        assert_eq!(color.rgb(), Rgb::new(255, 82, 51));
        assert_eq!(color.hex(), "#FF5233");
        assert!(!color.is_locked());
    }

    #[test]
    fn hue_of_full_turn_is_stored_as_zero() {
        let color = create_color_from_hsl(360, 100, 50, true).unwrap();
        assert_eq!(color.hsl().h, 0);
        assert_eq!(color.hex(), "#FF0000");
        assert!(color.is_locked());
    }

    #[test]
    fn rgb_and_hex_constructors_agree() {
        let from_rgb = create_color_from_rgb(255, 87, 51, false).unwrap();
        let from_hex = create_color_from_hex("#ff5733", false).unwrap();
        assert_eq!(from_rgb.hex(), "#FF5733");
        assert_eq!(from_hex.hex(), "#FF5733");
        assert_eq!(from_rgb.rgb(), from_hex.rgb());
        assert_eq!(from_rgb.hsl(), from_hex.hsl());
        assert_ne!(from_rgb.id(), from_hex.id());
    }

    #[test]
    fn constructors_reject_out_of_range_input() {
        assert!(matches!(
            create_color_from_hsl(361, 50, 50, false),
            Err(ColorError::InvalidColorValue(_))
        ));
        assert!(matches!(
            create_color_from_hsl(10, -1, 50, false),
            Err(ColorError::InvalidColorValue(_))
        ));
        assert!(matches!(
            create_color_from_rgb(0, 256, 0, false),
            Err(ColorError::InvalidColorValue(_))
        ));
        assert!(matches!(
            create_color_from_hex("#12345", false),
            Err(ColorError::InvalidColorValue(_))
        ));
    }

    #[test]
    fn with_lock_keeps_identity() {
        let color = create_color_from_hex("#3366FF", false).unwrap();
        let locked = color.clone().with_lock(true);
        assert!(locked.is_locked());
        assert_eq!(locked.id(), color.id());
        assert_eq!(locked.hex(), color.hex());
        assert_eq!(locked.hsl(), color.hsl());
    }

    #[test]
    fn display_and_from_str_use_hex() {
        let color: Color = "00aaff".parse().unwrap();
        assert_eq!(color.to_string(), "#00AAFF");
        assert!("blue".parse::<Color>().is_err());
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let color = create_color_from_hsl(200, 80, 50, true).unwrap();
        let value = serde_json::to_value(&color).unwrap();
        assert_eq!(value["hex"], color.hex());
        assert_eq!(value["isLocked"], true);
        assert_eq!(value["hsl"]["h"], 200);
        assert_eq!(value["rgb"]["r"], color.rgb().r);

        let back: Color = serde_json::from_value(value).unwrap();
        assert_eq!(back, color);
    }

    #[test]
    fn deserializing_rejects_inconsistent_records() {
        let id = Uuid::new_v4();
        let mismatched = serde_json::json!({
            "id": id,
            "hex": "#FF0000",
            "rgb": { "r": 0, "g": 255, "b": 0 },
            "hsl": { "h": 120, "s": 100, "l": 50 },
            "isLocked": false
        });
        assert!(serde_json::from_value::<Color>(mismatched).is_err());

        let out_of_range = serde_json::json!({
            "id": id,
            "hex": "#00FF00",
            "rgb": { "r": 0, "g": 255, "b": 0 },
            "hsl": { "h": 120, "s": 140, "l": 50 }
        });
        assert!(serde_json::from_value::<Color>(out_of_range).is_err());
    }

    #[test]
    fn deserializing_rejects_hsl_that_disagrees_with_rgb() {
        let record = serde_json::json!({
            "id": Uuid::new_v4(),
            "hex": "#FF0000",
            "rgb": { "r": 255, "g": 0, "b": 0 },
            "hsl": { "h": 120, "s": 100, "l": 50 },
            "isLocked": true
        });
        assert!(matches!(
            serde_json::from_value::<Color>(record),
            Err(err) if err.to_string().contains("does not match rgb")
        ));
    }

    #[test]
    fn colors_from_every_constructor_survive_a_json_trip() {
        let colors = [
            create_color_from_hsl(9, 100, 60, true).unwrap(),
            create_color_from_hsl(210, 5, 97, false).unwrap(),
            create_color_from_hsl(300, 100, 0, false).unwrap(),
            create_color_from_rgb(120, 121, 122, true).unwrap(),
            create_color_from_rgb(20, 197, 181, false).unwrap(),
            create_color_from_hex("#FF5733", false).unwrap(),
        ];
        for color in colors {
            let value = serde_json::to_value(&color).unwrap();
            let back: Color = serde_json::from_value(value).unwrap();
            assert_eq!(back, color);
        }
    }

    #[test]
    fn deserializing_canonicalizes_hex_case() {
        let record = serde_json::json!({
            "id": Uuid::new_v4(),
            "hex": "#00ff00",
            "rgb": { "r": 0, "g": 255, "b": 0 },
            "hsl": { "h": 120, "s": 100, "l": 50 }
        });
        let color: Color = serde_json::from_value(record).unwrap();
        assert_eq!(color.hex(), "#00FF00");
        assert!(!color.is_locked());
    }
}
