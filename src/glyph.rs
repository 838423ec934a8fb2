//! Per-glyph build: bitmap → mapped font-unit contours + advance.

use kurbo::BezPath;
use log::{debug, warn};
use rayon::prelude::*;

use crate::bitmap::{embolden, Bitmap};
use crate::config::{FontConfig, Weight};
use crate::geom::{polygon_path, signed_area};
use crate::metrics::{self, Mapping};
use crate::vectorize::{self, TraceStats};

/// What a character is drawn from.
#[derive(Debug, Clone, PartialEq)]
pub enum GlyphSource {
    /// A cropped sheet cell.
    Bitmap {
        bitmap: Bitmap,
        /// Crop offset inside the sheet cell, in pixels.
        x_offset: u32,
        /// Sheet cell height of the provider.
        height: u32,
        ascent: i32,
    },
    /// Blank glyph with a fixed advance in pixels.
    Space { advance: f64 },
}

/// A loaded character waiting to be built.
#[derive(Debug, Clone, PartialEq)]
pub struct CharEntry {
    pub code_point: char,
    pub source: GlyphSource,
}

/// Whether a contour is an outer boundary or a hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContourType {
    Outer,
    Counter,
}

/// Closed polygon in font units; the last point joins the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    pub points: Vec<(i32, i32)>,
}

impl Contour {
    pub fn to_bez_path(&self) -> BezPath {
        polygon_path(&self.points)
    }

    /// Outer contours wind clockwise in font space (y-up), counters the other way.
    pub fn contour_type(&self) -> ContourType {
        if signed_area(&self.to_bez_path()) <= 0.0 {
            ContourType::Outer
        } else {
            ContourType::Counter
        }
    }
}

/// Finished glyph, ready for a font assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    pub code_point: char,
    pub contours: Vec<Contour>,
    /// Advance width in font units.
    pub advance_width: i32,
}

impl Glyph {
    /// PostScript-style glyph name, e.g. `uni41`.
    pub fn name(&self) -> String {
        format!("uni{:X}", self.code_point as u32)
    }
}

/// Build one glyph.
///
/// Providers as tall as a unifont page are drawn at half scale. Bold
/// widens bitmaps by one column and spaces by one pixel.
pub fn build_glyph(entry: &CharEntry, config: &FontConfig, weight: Weight) -> (Glyph, TraceStats) {
    match &entry.source {
        GlyphSource::Space { advance } => {
            let advance = if weight.is_bold() { advance + 1.0 } else { *advance };
            let glyph = Glyph {
                code_point: entry.code_point,
                contours: Vec::new(),
                advance_width: metrics::space_advance(advance, config.scale()),
            };
            (glyph, TraceStats::default())
        }
        GlyphSource::Bitmap {
            bitmap,
            x_offset,
            height,
            ascent,
        } => {
            let height_scale = if *height == config.unifont_height { 0.5 } else { 1.0 };
            let scale = config.scale() * height_scale;

            let bold;
            let bitmap = if weight.is_bold() {
                bold = embolden(bitmap);
                &bold
            } else {
                bitmap
            };

            let trace = vectorize::trace(bitmap);
            let mapping = Mapping {
                scale,
                ascent: *ascent,
                x_offset: *x_offset as i32,
            };
            let contours = trace
                .loops
                .iter()
                .map(|l| Contour {
                    points: mapping.map_loop(l),
                })
                .collect();

            let glyph = Glyph {
                code_point: entry.code_point,
                contours,
                advance_width: metrics::bitmap_advance(
                    *x_offset as i32,
                    bitmap.width() as i32,
                    scale,
                ),
            };
            (glyph, trace.stats)
        }
    }
}

/// Build a batch of glyphs in parallel.
///
/// The first entry for a code point wins; U+0000 is skipped. The result
/// is sorted by code point.
pub fn build_glyphs(entries: &[CharEntry], config: &FontConfig, weight: Weight) -> Vec<Glyph> {
    let mut seen = std::collections::HashSet::new();
    let unique: Vec<&CharEntry> = entries
        .iter()
        .filter(|e| e.code_point != '\0' && seen.insert(e.code_point))
        .collect();

    let built: Vec<(Glyph, TraceStats)> = unique
        .par_iter()
        .map(|entry| build_glyph(entry, config, weight))
        .collect();

    let mut glyphs = Vec::with_capacity(built.len());
    let mut malformed = 0;
    for (glyph, stats) in built {
        if stats.abandoned_loops > 0 {
            malformed += 1;
            warn!(
                "{}: {} open loop(s) abandoned while stitching",
                glyph.name(),
                stats.abandoned_loops
            );
        }
        debug!(
            "{}: {} components, {} edges, {} contours, width {}",
            glyph.name(),
            stats.components,
            stats.edges,
            glyph.contours.len(),
            glyph.advance_width
        );
        glyphs.push(glyph);
    }
    if malformed > 0 {
        warn!("{} glyph(s) with malformed components", malformed);
    }

    glyphs.sort_by_key(|g| g.code_point);
    glyphs
}
