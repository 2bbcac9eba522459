#![forbid(unsafe_code)]

use super::Ladder;
use anyhow::{Context, Result};
use chroma_deck::Palette;
use serde::Serialize;
use std::{fs::File, io::BufWriter, path::PathBuf};

#[derive(Serialize)]
struct Snapshot<'a> {
    palette: &'a Palette,
    ladders: &'a [Ladder],
}

/// Serialize the palette and its tone ladders to a JSON file.
pub fn save_snapshot_json(
    path: impl AsRef<std::path::Path>,
    palette: &Palette,
    ladders: &[Ladder],
) -> Result<PathBuf> {
    let path = path.as_ref();
    let f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let w = BufWriter::new(f);
    serde_json::to_writer_pretty(w, &Snapshot { palette, ladders })?;
    Ok(path.to_path_buf())
}
