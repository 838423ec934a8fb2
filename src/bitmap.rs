use std::path::Path;

use image::{ImageReader, RgbaImage};

use crate::error::BitfontError;

/// Minimum alpha (exclusive) for a pixel to count as glyph content.
const ALPHA_THRESHOLD: u8 = 10;

/// Binary pixel grid, row-major. `true` = filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Bitmap {
    /// An all-empty bitmap.
    pub fn new(width: usize, height: usize) -> Self {
        Bitmap {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Build from rows of 0/1 values. Short rows are padded with empty cells.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Self {
        let width = rows.iter().map(|r| r.as_ref().len()).max().unwrap_or(0);
        let mut bitmap = Bitmap::new(width, rows.len());
        for (row, values) in rows.iter().enumerate() {
            for (col, &v) in values.as_ref().iter().enumerate() {
                bitmap.set(col, row, v != 0);
            }
        }
        bitmap
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True when the bitmap has no cells at all (zero width or height).
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at (col, row). Out-of-bounds = empty.
    pub fn get(&self, col: i32, row: i32) -> bool {
        if col < 0 || row < 0 || col as usize >= self.width || row as usize >= self.height {
            return false;
        }
        self.cells[row as usize * self.width + col as usize]
    }

    pub fn set(&mut self, col: usize, row: usize, filled: bool) {
        assert!(col < self.width && row < self.height, "cell ({col}, {row}) out of bounds");
        self.cells[row * self.width + col] = filled;
    }

    /// Number of filled cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Filled cells as (col, row), in row-major order.
    pub fn filled(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c)
            .map(move |(i, _)| ((i % self.width) as i32, (i / self.width) as i32))
    }
}

/// Decoded RGBA pixel buffer consumed by the extractor.
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// `[r, g, b, a]` at (x, y). Callers stay within bounds.
    fn rgba(&self, x: u32, y: u32) -> [u8; 4];
}

impl PixelSource for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        self.get_pixel(x, y).0
    }
}

/// Borrowed raw RGBA buffer: 4 bytes per pixel at `(y * width + x) * 4`.
#[derive(Debug, Clone, Copy)]
pub struct RawRgba<'a> {
    pub width: u32,
    pub height: u32,
    pub data: &'a [u8],
}

impl PixelSource for RawRgba<'_> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y as usize) * self.width as usize + x as usize) * 4;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2], self.data[idx + 3]]
    }
}

/// A rectangular cell of a texture sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Bitmap cropped out of a sheet cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub bitmap: Bitmap,
    /// Left column of the crop, relative to the region origin.
    pub x_offset: u32,
}

/// Extraction result. `Empty` means the cell has no content: skip the glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Empty,
    Glyph(Extracted),
}

/// Opaque enough and not pure black. Pure black is the sheet background.
fn is_content([r, g, b, a]: [u8; 4]) -> bool {
    a > ALPHA_THRESHOLD && !(r == 0 && g == 0 && b == 0)
}

/// Crop `region` of `source` to the horizontal extent of its content.
///
/// Only columns are trimmed; the bitmap keeps the full region height.
/// Parts of the region outside the source count as empty.
pub fn extract<S: PixelSource + ?Sized>(source: &S, region: Region) -> Extraction {
    let content = |px: u32, py: u32| -> bool {
        let (x, y) = (region.x + px, region.y + py);
        x < source.width() && y < source.height() && is_content(source.rgba(x, y))
    };

    let mut min_x = u32::MAX;
    let mut max_x = 0;
    for py in 0..region.height {
        for px in 0..region.width {
            if content(px, py) {
                min_x = min_x.min(px);
                max_x = max_x.max(px);
            }
        }
    }
    if min_x == u32::MAX {
        return Extraction::Empty;
    }

    let width = (max_x - min_x + 1) as usize;
    let mut bitmap = Bitmap::new(width, region.height as usize);
    for py in 0..region.height {
        for px in min_x..=max_x {
            if content(px, py) {
                bitmap.set((px - min_x) as usize, py as usize, true);
            }
        }
    }

    Extraction::Glyph(Extracted {
        bitmap,
        x_offset: min_x,
    })
}

/// Synthetic bold: smear every filled cell one column to the right.
///
/// The result is one column wider than the input.
pub fn embolden(bitmap: &Bitmap) -> Bitmap {
    if bitmap.height == 0 {
        return bitmap.clone();
    }
    let mut bold = Bitmap::new(bitmap.width + 1, bitmap.height);
    for row in 0..bitmap.height {
        for col in 0..bold.width {
            let (c, r) = (col as i32, row as i32);
            if bitmap.get(c, r) || bitmap.get(c - 1, r) {
                bold.set(col, row, true);
            }
        }
    }
    bold
}

/// Decode a texture sheet into RGBA.
pub fn load_texture(path: &Path) -> Result<RgbaImage, BitfontError> {
    let img = ImageReader::open(path)
        .map_err(|e| BitfontError::ImageLoad(format!("{}: {}", path.display(), e)))?
        .decode()
        .map_err(|e| BitfontError::ImageLoad(format!("{}: {}", path.display(), e)))?
        .into_rgba8();
    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const BLACK: [u8; 4] = [0, 0, 0, 255];
    const CLEAR: [u8; 4] = [255, 255, 255, 0];

    fn sheet(rows: &[&[[u8; 4]]]) -> RgbaImage {
        let h = rows.len() as u32;
        let w = rows[0].len() as u32;
        RgbaImage::from_fn(w, h, |x, y| Rgba(rows[y as usize][x as usize]))
    }

    #[test]
    fn extract_trims_columns_and_keeps_height() {
        let img = sheet(&[
            &[BLACK, CLEAR, WHITE, CLEAR],
            &[CLEAR, CLEAR, WHITE, WHITE],
            &[CLEAR, CLEAR, CLEAR, CLEAR],
        ]);
        let region = Region { x: 0, y: 0, width: 4, height: 3 };
        let Extraction::Glyph(out) = extract(&img, region) else {
            panic!("expected content");
        };
        assert_eq!(out.x_offset, 2);
        assert_eq!(out.bitmap, Bitmap::from_rows(&[[1, 0], [1, 1], [0, 0]]));
    }

    #[test]
    fn black_and_transparent_pixels_are_background() {
        let img = sheet(&[&[BLACK, CLEAR], &[[0, 0, 0, 0], [200, 0, 0, 10]]]);
        let region = Region { x: 0, y: 0, width: 2, height: 2 };
        assert_eq!(extract(&img, region), Extraction::Empty);
    }

    #[test]
    fn faint_alpha_above_threshold_counts() {
        let img = sheet(&[&[CLEAR, [10, 0, 0, 11]]]);
        let region = Region { x: 0, y: 0, width: 2, height: 1 };
        let Extraction::Glyph(out) = extract(&img, region) else {
            panic!("expected content");
        };
        assert_eq!(out.x_offset, 1);
        assert_eq!(out.bitmap.width(), 1);
    }

    #[test]
    fn region_past_sheet_edge_reads_empty() {
        let data = [WHITE, WHITE].concat();
        let raw = RawRgba { width: 2, height: 1, data: &data };
        let region = Region { x: 1, y: 0, width: 3, height: 2 };
        let Extraction::Glyph(out) = extract(&raw, region) else {
            panic!("expected content");
        };
        assert_eq!(out.x_offset, 0);
        assert_eq!(out.bitmap, Bitmap::from_rows(&[[1], [0]]));
    }

    #[test]
    fn embolden_widens_by_one_column() {
        let bitmap = Bitmap::from_rows(&[[1, 0, 1], [0, 1, 0]]);
        let bold = embolden(&bitmap);
        assert_eq!(bold.width(), 4);
        assert_eq!(bold, Bitmap::from_rows(&[[1, 1, 1, 1], [0, 1, 1, 0]]));
        for (col, row) in bitmap.filled() {
            assert!(bold.get(col, row) && bold.get(col + 1, row));
        }
    }

    #[test]
    fn embolden_twice_keeps_widening() {
        let bitmap = Bitmap::from_rows(&[[1]]);
        let twice = embolden(&embolden(&bitmap));
        assert_eq!(twice, Bitmap::from_rows(&[[1, 1, 1]]));
    }
}
