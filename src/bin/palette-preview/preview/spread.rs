#![forbid(unsafe_code)]

use chroma_deck::{Color, Palette};
use palette::{FromColor, Oklab, Srgb};
use tracing::info;

#[inline]
fn to_oklab(color: &Color) -> Oklab {
    let rgb = color.rgb();
    Oklab::from_color(Srgb::new(rgb.r, rgb.g, rgb.b).into_format::<f32>())
}

#[inline]
fn dist_oklab(a: Oklab, b: Oklab) -> f32 {
    let dl = a.l - b.l;
    let da = a.a - b.a;
    let db = a.b - b.b;
    db.mul_add(db, dl.mul_add(dl, da * da)).sqrt()
}

/// Smallest perceptual distance between any two palette colors.
#[must_use]
pub fn min_pairwise_distance(colors: &[Color]) -> f32 {
    let labs: Vec<Oklab> = colors.iter().map(to_oklab).collect();
    let mut best = f32::INFINITY;
    for (i, a) in labs.iter().enumerate() {
        for b in &labs[i + 1..] {
            best = best.min(dist_oklab(*a, *b));
        }
    }
    best
}

/// Log how far apart the closest two colors sit in `OKLab`.
pub fn report(palette: &Palette) {
    let spread = min_pairwise_distance(palette.colors());
    info!(min_oklab_distance = spread, "palette perceptual spread");
}
