//! Pixel space → font units, and advance width computation.

/// Placement of one glyph's pixel grid in font space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mapping {
    /// Font units per pixel.
    pub scale: f64,
    /// Pixel row distance from the top of the cell to the baseline.
    pub ascent: i32,
    /// Pixel column shift (the extraction crop offset).
    pub x_offset: i32,
}

impl Mapping {
    /// Map a pixel-corner point. Flips y around the ascent so that font
    /// coordinates grow upward from the baseline.
    pub fn point(&self, (x, y): (i32, i32)) -> (i32, i32) {
        let fx = (x + self.x_offset) as f64 * self.scale;
        let fy = (self.ascent - y) as f64 * self.scale;
        (round_half_up(fx), round_half_up(fy))
    }

    pub fn map_loop(&self, points: &[(i32, i32)]) -> Vec<(i32, i32)> {
        points.iter().map(|&p| self.point(p)).collect()
    }
}

/// Advance of a bitmap glyph: offset + visible width + one pixel of spacing.
pub fn bitmap_advance(x_offset: i32, visual_width: i32, scale: f64) -> i32 {
    round_half_up((x_offset + visual_width + 1) as f64 * scale)
}

/// Advance of a space glyph.
pub fn space_advance(advance: f64, scale: f64) -> i32 {
    round_half_up(advance * scale)
}

/// Round to nearest, halves toward +∞.
fn round_half_up(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}
