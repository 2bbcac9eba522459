//! Constrained random palette generation with lock preservation.
//!
//! Generated colors keep saturation in `[60, 100]` and lightness in `[40, 70]`, and each new
//! hue stays at least 30 degrees (circularly) away from every color accepted before it. Locked
//! colors are carried over verbatim and are never rejected, even when they crowd each other.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{debug, trace};
use uuid::{Builder, Uuid};

use crate::{
    color::{Color, Hsl, convert::hue_distance},
    config::GeneratorConfig,
};

/// Lowest saturation a generated color may have.
pub const SATURATION_MIN: u8 = 60;
/// Highest saturation a generated color may have.
pub const SATURATION_MAX: u8 = 100;
/// Lowest lightness a generated color may have.
pub const LIGHTNESS_MIN: u8 = 40;
/// Highest lightness a generated color may have.
pub const LIGHTNESS_MAX: u8 = 70;
/// Minimum circular hue distance between generated colors.
pub const MIN_HUE_DIFFERENCE: u16 = 30;
/// Number of colors in every palette.
pub const PALETTE_SIZE: usize = 5;
/// Hue draws tried before giving up on distinctness.
pub const DEFAULT_MAX_ATTEMPTS: usize = 50;

/// A fixed-size, ordered set of colors stamped with its creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "PaletteRecord")]
pub struct Palette {
    colors: Vec<Color>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl Palette {
    /// Wrap exactly [`PALETTE_SIZE`] colors.
    pub fn new(colors: [Color; PALETTE_SIZE], created_at: OffsetDateTime) -> Self {
        Self {
            colors: colors.into(),
            created_at,
        }
    }

    /// Colors in display order; always [`PALETTE_SIZE`] long.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// When the generator produced this palette.
    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    /// Look a color up by id.
    pub fn find(&self, id: Uuid) -> Option<&Color> {
        self.colors.iter().find(|color| color.id() == id)
    }

    /// Locked colors, in palette order.
    pub fn locked(&self) -> impl Iterator<Item = &Color> {
        self.colors.iter().filter(|color| color.is_locked())
    }

    /// Same timestamp, with `f` applied to every color.
    pub(crate) fn map_colors<F>(&self, f: F) -> Self
    where
        F: FnMut(&Color) -> Color,
    {
        Self {
            colors: self.colors.iter().map(f).collect(),
            created_at: self.created_at,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaletteRecord {
    colors: [Color; PALETTE_SIZE],
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl From<PaletteRecord> for Palette {
    fn from(record: PaletteRecord) -> Self {
        Self::new(record.colors, record.created_at)
    }
}

/// Knobs for [`PaletteGenerator::harmonious_palette`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaletteOptions {
    /// Carry locked colors from the previous palette into the new one.
    pub preserve_locked: bool,
}

impl Default for PaletteOptions {
    fn default() -> Self {
        Self {
            preserve_locked: true,
        }
    }
}

/// Palette generator over an injectable random source.
///
/// Identifiers of generated colors are drawn from the same source, so a seeded generator
/// reproduces palettes exactly (timestamps aside).
#[derive(Debug, Clone)]
pub struct PaletteGenerator<R = StdRng> {
    rng: R,
    max_attempts: usize,
}

impl PaletteGenerator<StdRng> {
    /// Generator seeded from the operating system.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Deterministic generator.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    /// Generator honoring the configured seed and attempt budget.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        let generator = match config.seed {
            Some(seed) => Self::seeded(seed),
            None => Self::new(),
        };
        generator.with_max_attempts(config.max_attempts)
    }
}

impl Default for PaletteGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> PaletteGenerator<R> {
    /// Wrap an existing random source.
    pub fn from_rng(rng: R) -> Self {
        Self {
            rng,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Override the number of hue draws [`Self::distinct_color`] tries.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Current attempt budget.
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    fn next_id(&mut self) -> Uuid {
        Builder::from_random_bytes(self.rng.random()).into_uuid()
    }

    fn random_hue(&mut self) -> u16 {
        self.rng.random_range(0..360)
    }

    fn color_with_hue(&mut self, h: u16) -> Color {
        let s = self.rng.random_range(SATURATION_MIN..=SATURATION_MAX);
        let l = self.rng.random_range(LIGHTNESS_MIN..=LIGHTNESS_MAX);
        let id = self.next_id();
        Color::from_hsl_parts(id, Hsl::new(h, s, l), false)
    }

    /// Unlocked color with uniform hue and in-bounds saturation and lightness.
    pub fn random_color(&mut self) -> Color {
        let h = self.random_hue();
        self.color_with_hue(h)
    }

    /// Color whose hue keeps [`MIN_HUE_DIFFERENCE`] from every color in `existing`.
    ///
    /// Falls back to [`Self::random_color`] once the attempt budget is spent.
    pub fn distinct_color(&mut self, existing: &[Color]) -> Color {
        self.distinct_color_within(existing, self.max_attempts)
    }

    /// [`Self::distinct_color`] with an explicit attempt budget.
    pub fn distinct_color_within(&mut self, existing: &[Color], max_attempts: usize) -> Color {
        for _ in 0..max_attempts {
            let hue = self.random_hue();
            let far_enough = existing
                .iter()
                .all(|color| hue_distance(hue, color.hsl().h) >= MIN_HUE_DIFFERENCE);
            if far_enough {
                return self.color_with_hue(hue);
            }
        }

        debug!(
            attempts = max_attempts,
            existing = existing.len(),
            "no distinct hue found; falling back to an unconstrained color"
        );
        self.random_color()
    }

    /// Build a palette, seeded with the locked subset of `existing` when asked to.
    ///
    /// Every new color must stay distinct from all colors accepted before it, preserved or
    /// generated.
    pub fn harmonious_palette(&mut self, existing: &[Color], options: PaletteOptions) -> Palette {
        let mut colors: Vec<Color> = if options.preserve_locked {
            existing
                .iter()
                .filter(|color| color.is_locked())
                .cloned()
                .collect()
        } else {
            Vec::new()
        };
        let preserved = colors.len();

        while colors.len() < PALETTE_SIZE {
            let next = self.distinct_color(&colors);
            colors.push(next);
        }
        colors.truncate(PALETTE_SIZE);

        trace!(preserved, "assembled palette");
        Palette {
            colors,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    /// Palette with no carried-over colors.
    pub fn fresh_palette(&mut self) -> Palette {
        self.harmonious_palette(
            &[],
            PaletteOptions {
                preserve_locked: false,
            },
        )
    }

    /// Replace every unlocked color of `current`, keeping locked ones in order.
    pub fn regenerate(&mut self, current: &Palette) -> Palette {
        self.harmonious_palette(current.colors(), PaletteOptions::default())
    }
}

/// Check size, saturation/lightness bounds, and pairwise hue distinctness.
///
/// Locked colors get no exemption, so a regenerated palette that preserved two close hues
/// reports `false` here. Use it as a diagnostic for fully generated palettes.
pub fn validate_palette(palette: &Palette) -> bool {
    let colors = palette.colors();
    if colors.len() != PALETTE_SIZE {
        return false;
    }

    let in_bounds = colors.iter().all(|color| {
        let Hsl { h, s, l } = color.hsl();
        h < 360
            && (SATURATION_MIN..=SATURATION_MAX).contains(&s)
            && (LIGHTNESS_MIN..=LIGHTNESS_MAX).contains(&l)
    });

    in_bounds
        && colors.iter().enumerate().all(|(i, a)| {
            colors[i + 1..]
                .iter()
                .all(|b| hue_distance(a.hsl().h, b.hsl().h) >= MIN_HUE_DIFFERENCE)
        })
}

/// Flip the lock of the color with `color_id`; unknown ids leave the palette as is.
pub fn toggle_color_lock(palette: &Palette, color_id: Uuid) -> Palette {
    palette.map_colors(|color| {
        if color.id() == color_id {
            color.clone().with_lock(!color.is_locked())
        } else {
            color.clone()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::create_color_from_hsl;

    fn locked(h: i32) -> Color {
        create_color_from_hsl(h, 80, 50, true).unwrap()
    }

    #[test]
    fn random_color_stays_in_bounds() {
        let mut generator = PaletteGenerator::seeded(7);
        for _ in 0..500 {
            let color = generator.random_color();
            let Hsl { h, s, l } = color.hsl();
            assert!(h < 360);
            assert!((SATURATION_MIN..=SATURATION_MAX).contains(&s));
            assert!((LIGHTNESS_MIN..=LIGHTNESS_MAX).contains(&l));
            assert!(!color.is_locked());
        }
    }

    #[test]
    fn seeded_generators_are_reproducible() {
        let a = PaletteGenerator::seeded(42).fresh_palette();
        let b = PaletteGenerator::seeded(42).fresh_palette();
        assert_eq!(a.colors(), b.colors());
    }

    #[test]
    fn distinct_color_keeps_its_distance() {
        let mut generator = PaletteGenerator::seeded(3);
        let existing = vec![locked(0), locked(120), locked(240)];
        for _ in 0..200 {
            let color = generator.distinct_color(&existing);
            for other in &existing {
                assert!(hue_distance(color.hsl().h, other.hsl().h) >= MIN_HUE_DIFFERENCE);
            }
        }
    }

    #[test]
    fn distinct_color_falls_back_when_the_wheel_is_full() {
        // Every hue is within 15 degrees of one of these.
        let crowded: Vec<Color> = (0..12).map(|i| locked(i * 30)).collect();
        let mut generator = PaletteGenerator::seeded(11);
        let color = generator.distinct_color(&crowded);
        let Hsl { s, l, .. } = color.hsl();
        assert!((SATURATION_MIN..=SATURATION_MAX).contains(&s));
        assert!((LIGHTNESS_MIN..=LIGHTNESS_MAX).contains(&l));
    }

    #[test]
    fn zero_attempt_budget_still_yields_a_color() {
        let mut generator = PaletteGenerator::seeded(5).with_max_attempts(0);
        assert_eq!(generator.max_attempts(), 0);
        let palette = generator.fresh_palette();
        assert_eq!(palette.colors().len(), PALETTE_SIZE);
    }

    #[test]
    fn fresh_palettes_are_valid() {
        for seed in 0..200 {
            let palette = PaletteGenerator::seeded(seed).fresh_palette();
            assert_eq!(palette.colors().len(), PALETTE_SIZE);
            assert!(validate_palette(&palette), "seed {seed}: {palette:?}");
            assert_eq!(palette.locked().count(), 0);
        }
    }

    #[test]
    fn locked_colors_lead_the_new_palette() {
        let mut generator = PaletteGenerator::seeded(9);
        let first = locked(10);
        let second = locked(200);
        let unlocked = create_color_from_hsl(100, 80, 50, false).unwrap();
        let existing = vec![first.clone(), unlocked.clone(), second.clone()];

        let palette = generator.harmonious_palette(&existing, PaletteOptions::default());
        assert_eq!(palette.colors().len(), PALETTE_SIZE);
        assert_eq!(palette.colors()[0], first);
        assert_eq!(palette.colors()[1], second);
        assert!(palette.find(unlocked.id()).is_none());
        for generated in &palette.colors()[2..] {
            assert!(!generated.is_locked());
        }
    }

    #[test]
    fn preserve_locked_off_ignores_existing() {
        let existing = vec![locked(10), locked(50)];
        let palette = PaletteGenerator::seeded(1).harmonious_palette(
            &existing,
            PaletteOptions {
                preserve_locked: false,
            },
        );
        assert!(palette.find(existing[0].id()).is_none());
        assert!(palette.find(existing[1].id()).is_none());
    }

    #[test]
    fn crowded_locked_colors_are_kept_even_though_validation_fails() {
        let a = locked(100);
        let b = locked(110);
        let palette =
            PaletteGenerator::seeded(2).harmonious_palette(&[a.clone(), b.clone()], PaletteOptions::default());
        assert_eq!(palette.colors()[0], a);
        assert_eq!(palette.colors()[1], b);
        assert!(!validate_palette(&palette));
    }

    #[test]
    fn more_locked_colors_than_slots_are_truncated() {
        let existing: Vec<Color> = (0..7).map(|i| locked(i * 40)).collect();
        let palette = PaletteGenerator::seeded(4).harmonious_palette(&existing, PaletteOptions::default());
        assert_eq!(palette.colors(), &existing[..PALETTE_SIZE]);
    }

    #[test]
    fn regenerate_keeps_locked_entries() {
        let mut generator = PaletteGenerator::seeded(21);
        let palette = generator.fresh_palette();
        let target = palette.colors()[3].id();
        let palette = toggle_color_lock(&palette, target);

        let next = generator.regenerate(&palette);
        assert_eq!(next.colors()[0], *palette.find(target).unwrap());
        assert_eq!(next.locked().count(), 1);
    }

    #[test]
    fn toggle_only_touches_the_matching_color() {
        let palette = PaletteGenerator::seeded(8).fresh_palette();
        let target = palette.colors()[0].id();
        let toggled = toggle_color_lock(&palette, target);

        assert!(toggled.colors()[0].is_locked());
        assert_eq!(toggled.colors()[0].clone().with_lock(false), palette.colors()[0]);
        assert_eq!(toggled.colors()[1..], palette.colors()[1..]);
        assert_eq!(toggled.created_at(), palette.created_at());

        let back = toggle_color_lock(&toggled, target);
        assert_eq!(back, palette);
    }

    #[test]
    fn toggle_with_unknown_id_is_a_no_op() {
        let palette = PaletteGenerator::seeded(8).fresh_palette();
        assert_eq!(toggle_color_lock(&palette, Uuid::new_v4()), palette);
    }

    #[test]
    fn palette_json_requires_exactly_five_colors() {
        let palette = PaletteGenerator::seeded(13).fresh_palette();
        let mut value = serde_json::to_value(&palette).unwrap();
        assert!(value["createdAt"].is_string());

        let back: Palette = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(back.colors(), palette.colors());

        value["colors"].as_array_mut().unwrap().pop();
        assert!(serde_json::from_value::<Palette>(value).is_err());
    }
}
