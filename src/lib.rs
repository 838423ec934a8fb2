//! bitfont: pixel-sheet bitmap fonts → polygonal font outlines.
//!
//! Traces binary glyph bitmaps into closed, axis-aligned contours in font
//! units. Pixels touching only at a corner are traced as one shape, so
//! diagonal strokes come out as a single outline without seams.
//!
//! # Example
//!
//! ```
//! use bitfont::{build_glyph, Bitmap, CharEntry, FontConfig, GlyphSource, Weight};
//!
//! let entry = CharEntry {
//!     code_point: '.',
//!     source: GlyphSource::Bitmap {
//!         bitmap: Bitmap::from_rows(&[[1]]),
//!         x_offset: 0,
//!         height: 8,
//!         ascent: 7,
//!     },
//! };
//! let (glyph, _stats) = build_glyph(&entry, &FontConfig::default(), Weight::Regular);
//! assert_eq!(glyph.contours[0].points, vec![(0, 896), (128, 896), (128, 768), (0, 768)]);
//! ```

#![forbid(unsafe_code)]

mod bitmap;
mod config;
mod geom;
mod glyph;
mod metrics;

pub mod error;
pub mod output;
pub mod provider;
pub mod vectorize;

// Re-export kurbo so downstream users get the same version
// returned by Contour::to_bez_path.
pub use kurbo;

pub use bitmap::{embolden, extract, load_texture, Bitmap, Extracted, Extraction, PixelSource, RawRgba, Region};
pub use config::{Charset, FontConfig, Weight};
pub use error::BitfontError;
pub use glyph::{build_glyph, build_glyphs, CharEntry, Contour, ContourType, Glyph, GlyphSource};
pub use metrics::Mapping;
pub use vectorize::{trace, Trace, TraceStats};

use std::time::Instant;

use log::info;

/// Full pipeline: font definitions → sorted, built glyphs.
pub fn build_font(config: &FontConfig, charset: Charset, weight: Weight) -> Result<Vec<Glyph>, BitfontError> {
    let t_start = Instant::now();

    // ── Load ──────────────────────────────────────────────
    let entries = provider::FontLoader::new(config, charset).load_all()?;
    if entries.is_empty() {
        return Err(BitfontError::NoGlyphs);
    }
    info!(
        "Load        {} characters ({:?} charset)  ({}ms)",
        entries.len(),
        charset,
        t_start.elapsed().as_millis()
    );

    // ── Trace ─────────────────────────────────────────────
    let t_trace = Instant::now();
    let glyphs = build_glyphs(&entries, config, weight);
    let contours: usize = glyphs.iter().map(|g| g.contours.len()).sum();
    let points: usize = glyphs
        .iter()
        .flat_map(|g| &g.contours)
        .map(|c| c.points.len())
        .sum();
    info!(
        "Trace       {} glyphs \u{2192} {} contours \u{00b7} {} points ({:?})  ({}ms)",
        glyphs.len(),
        contours,
        points,
        weight,
        t_trace.elapsed().as_millis()
    );

    Ok(glyphs)
}
