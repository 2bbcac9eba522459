#![forbid(unsafe_code)]

use super::Ladder;
use anyhow::{Context, Result};
use chroma_deck::{
    Color, Palette,
    color::convert::contrast_color,
    tones::ColorTone,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[inline]
fn hsl_label(color: &Color) -> String {
    let hsl = color.hsl();
    format!("{}°, {}%, {}%", hsl.h, hsl.s, hsl.l)
}

#[inline]
fn lock_marker(color: &Color) -> &'static str {
    if color.is_locked() { " 🔒" } else { "" }
}

fn tone_text(tone: &ColorTone) -> Result<&'static str> {
    contrast_color(&tone.hex).with_context(|| format!("tone {} has a malformed hex", tone.label))
}

pub fn write_html_page(
    palette: &Palette,
    ladders: &[Ladder],
    path: impl AsRef<Path>,
) -> Result<PathBuf> {
    let path = path.as_ref();
    let f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut w = BufWriter::new(f);
    writeln!(
        w,
        r#"<!doctype html><meta charset="utf-8">
<style>
  body{{margin:0;background:#111;color:#eee;font-family:system-ui}}
  h2,h3{{margin:12px}}
  .g{{display:grid;grid-template-columns:repeat(5,1fr);gap:6px;padding:8px}}
  .t{{display:grid;grid-template-columns:repeat(10,1fr);gap:4px;padding:4px 8px}}
  .s{{aspect-ratio:3/1;border-radius:10px;display:flex;flex-direction:column;align-items:center;
      justify-content:center;font-weight:700}}
  .s small{{font-weight:400}}
</style>
<h2>Palette ({created})</h2>
<div class="g">"#,
        created = palette.created_at()
    )?;
    for color in palette.colors() {
        writeln!(
            w,
            r#"<div class="s" style="background:{hex};color:{text}">{hex}{lock}<small>{hsl}</small></div>"#,
            hex = color.hex(),
            text = color.contrast_text(),
            lock = lock_marker(color),
            hsl = hsl_label(color),
        )?;
    }
    writeln!(w, "</div>")?;

    for ladder in ladders {
        writeln!(w, r#"<h3>Tones of {}</h3><div class="t">"#, ladder.base)?;
        for tone in &ladder.tones {
            writeln!(
                w,
                r#"<div class="s" style="background:{hex};color:{text}">{label}<small>{hex}</small></div>"#,
                hex = tone.hex,
                text = tone_text(tone)?,
                label = tone.label,
            )?;
        }
        writeln!(w, "</div>")?;
    }
    w.flush()?;
    Ok(path.to_path_buf())
}
