#![forbid(unsafe_code)]

mod html;
mod json_io;
#[cfg(feature = "tool-palette-preview")]
mod spread;

use anyhow::{Context, Result};
use chroma_deck::{
    Color, ColorTone, PaletteGenerator, PaletteOptions, config::PreviewConfig, create_color_from_hex,
    tones::{generate_all_tones, validate_tone_consistency},
    validate_palette,
};
use serde::Serialize;
use std::fs;
use tracing::{info, warn};

use html::write_html_page;
use json_io::save_snapshot_json;

/// A base color with its full tone ladder.
#[derive(Debug, Serialize)]
pub struct Ladder {
    pub base: Color,
    pub tones: [ColorTone; 10],
}

impl Ladder {
    fn of(base: Color) -> Self {
        let tones = generate_all_tones(&base);
        if !validate_tone_consistency(&base, &tones) {
            warn!(base = %base, "tone ladder drifted from its base color");
        }
        Self { base, tones }
    }
}

pub fn run() -> Result<()> {
    let config = PreviewConfig::load();
    let out_dir = &config.output_dir;
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let mut generator = PaletteGenerator::from_config(&config.generator);
    let pinned = config.pinned_colors().context("parsing pinned colors")?;
    let palette = if pinned.is_empty() {
        generator.fresh_palette()
    } else {
        generator.harmonious_palette(&pinned, PaletteOptions::default())
    };

    if !validate_palette(&palette) {
        warn!(
            pinned = pinned.len(),
            "palette breaks hue separation; pinned colors sit too close together"
        );
    }

    #[cfg(feature = "tool-palette-preview")]
    spread::report(&palette);

    let mut ladders: Vec<Ladder> = palette.colors().iter().cloned().map(Ladder::of).collect();
    if let Some(hex) = &config.tone_base {
        let base = create_color_from_hex(hex, false).context("parsing tone base color")?;
        ladders.push(Ladder::of(base));
    }

    let html_path = write_html_page(&palette, &ladders, out_dir.join("palette.html"))?;
    let json_path = save_snapshot_json(out_dir.join("palette.json"), &palette, &ladders)?;

    info!(
        colors = %palette.colors().iter().map(Color::hex).collect::<Vec<_>>().join(" "),
        "generated palette"
    );
    println!(
        "Generated palette assets in {}:\n  - {}\n  - {}",
        out_dir.display(),
        html_path.display(),
        json_path.display()
    );

    Ok(())
}
