//! Font definition loading: provider JSON + texture sheets → [`CharEntry`] list.
//!
//! A definition is `{ "providers": [...] }`. Bitmap providers slice a
//! texture sheet into a grid of cells, space providers give blank glyphs a
//! fixed advance, and reference providers pull in another definition (or
//! the unifont pages). The first source to define a character wins.

use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use image::RgbaImage;
use log::{debug, info, warn};
use serde::Deserialize;

use crate::bitmap::{self, Extraction, Region};
use crate::config::{Charset, FontConfig};
use crate::error::BitfontError;
use crate::glyph::{CharEntry, GlyphSource};

/// Reference id that loads the unifont pages instead of a JSON file.
pub const UNIFONT_REFERENCE: &str = "minecraft:include/unifont";

/// Unifont page geometry: 16×16 tiles of 16×16 pixels.
const UNIFONT_TILE: u32 = 16;
const UNIFONT_GRID: u32 = 16;
const UNIFONT_PAGES: u32 = 256;

#[derive(Debug, Clone, Deserialize)]
pub struct FontDefinition {
    #[serde(default)]
    pub providers: Vec<Provider>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Provider {
    Bitmap {
        /// Namespaced texture id, e.g. `minecraft:font/ascii.png`.
        file: String,
        /// One string per sheet row, one character per cell.
        chars: Vec<String>,
        height: Option<u32>,
        ascent: Option<i32>,
    },
    Space {
        advances: BTreeMap<char, f64>,
    },
    Reference {
        id: String,
    },
    #[serde(other)]
    Unsupported,
}

/// Everything accumulated while walking definitions.
///
/// Threaded through each load step explicitly; nothing here is global.
#[derive(Debug, Default)]
pub struct LoadState {
    pub entries: Vec<CharEntry>,
    /// Code points already taken.
    pub seen: HashSet<char>,
    /// Definitions already entered, to cut reference cycles.
    visited: HashSet<String>,
}

impl LoadState {
    /// Record `entry` unless its code point is taken, filtered out, or U+0000.
    fn add(&mut self, entry: CharEntry, charset: Charset) -> bool {
        let c = entry.code_point;
        if c == '\0' || !charset.contains(c) || self.seen.contains(&c) {
            return false;
        }
        if let GlyphSource::Bitmap { bitmap, .. } = &entry.source {
            if bitmap.filled_count() == 0 {
                return false;
            }
        }
        self.seen.insert(c);
        self.entries.push(entry);
        true
    }
}

/// Loads definitions relative to the configured asset directories.
pub struct FontLoader<'a> {
    config: &'a FontConfig,
    charset: Charset,
}

impl<'a> FontLoader<'a> {
    pub fn new(config: &'a FontConfig, charset: Charset) -> Self {
        FontLoader { config, charset }
    }

    /// Load the root definition. Entries come back sorted by code point.
    pub fn load_all(&self) -> Result<Vec<CharEntry>, BitfontError> {
        let mut state = LoadState::default();
        self.load_reference(&self.config.root_font, &mut state)?;
        let mut entries = state.entries;
        entries.sort_by_key(|e| e.code_point);
        info!("Loaded {} characters", entries.len());
        Ok(entries)
    }

    /// Load a definition by id (`namespace:name` → `font_dir/name.json`).
    ///
    /// Missing files are skipped with a warning.
    pub fn load_reference(&self, id: &str, state: &mut LoadState) -> Result<(), BitfontError> {
        if !state.visited.insert(id.to_string()) {
            debug!("{} already loaded", id);
            return Ok(());
        }
        if id == UNIFONT_REFERENCE {
            self.load_unifont(state);
            return Ok(());
        }

        let path = self.definition_path(id);
        if !path.exists() {
            warn!("Definition not found: {} (id {})", path.display(), id);
            return Ok(());
        }
        let text = std::fs::read_to_string(&path).map_err(|source| BitfontError::Io {
            path: path.clone(),
            source,
        })?;
        let definition: FontDefinition =
            serde_json::from_str(&text).map_err(|source| BitfontError::Json { path, source })?;
        self.load_definition(&definition, state)
    }

    pub fn load_definition(
        &self,
        definition: &FontDefinition,
        state: &mut LoadState,
    ) -> Result<(), BitfontError> {
        for provider in &definition.providers {
            match provider {
                Provider::Bitmap {
                    file,
                    chars,
                    height,
                    ascent,
                } => {
                    let path = self.texture_path(file);
                    let Some(sheet) = open_texture(&path) else {
                        continue;
                    };
                    let height = height.unwrap_or(self.config.font_height);
                    let ascent = ascent.unwrap_or(self.config.default_ascent);
                    let added = load_sheet(&sheet, chars, height, ascent, self.charset, state);
                    debug!("{}: {} characters", path.display(), added);
                }
                Provider::Space { advances } => {
                    for (&c, &advance) in advances {
                        let entry = CharEntry {
                            code_point: c,
                            source: GlyphSource::Space { advance },
                        };
                        state.add(entry, self.charset);
                    }
                }
                Provider::Reference { id } => self.load_reference(id, state)?,
                Provider::Unsupported => debug!("skipping unsupported provider"),
            }
        }
        Ok(())
    }

    /// Load `unicode_page_XX.png` for every page present in the texture dir.
    fn load_unifont(&self, state: &mut LoadState) {
        for page in 0..UNIFONT_PAGES {
            let path = self
                .config
                .texture_dir
                .join(format!("unicode_page_{:02x}.png", page));
            if !path.exists() {
                continue;
            }
            let Some(sheet) = open_texture(&path) else {
                continue;
            };
            let mut added = 0;
            for cy in 0..UNIFONT_GRID {
                for cx in 0..UNIFONT_GRID {
                    let code = page * 256 + cy * UNIFONT_GRID + cx;
                    let Some(c) = char::from_u32(code) else {
                        continue;
                    };
                    if state.seen.contains(&c) {
                        continue;
                    }
                    let region = Region {
                        x: cx * UNIFONT_TILE,
                        y: cy * UNIFONT_TILE,
                        width: UNIFONT_TILE,
                        height: UNIFONT_TILE,
                    };
                    if let Extraction::Glyph(cell) = bitmap::extract(&sheet, region) {
                        let entry = CharEntry {
                            code_point: c,
                            source: GlyphSource::Bitmap {
                                bitmap: cell.bitmap,
                                x_offset: cell.x_offset,
                                height: self.config.unifont_height,
                                ascent: self.config.unifont_ascent,
                            },
                        };
                        if state.add(entry, self.charset) {
                            added += 1;
                        }
                    }
                }
            }
            debug!("unifont page {:02x}: {} characters", page, added);
        }
    }

    fn definition_path(&self, id: &str) -> PathBuf {
        let name = id.split_once(':').map_or(id, |(_, name)| name);
        self.config.font_dir.join(format!("{}.json", name))
    }

    fn texture_path(&self, file: &str) -> PathBuf {
        let name = file.split_once(':').map_or(file, |(_, name)| name);
        let name = name.strip_prefix("font/").unwrap_or(name);
        self.config.texture_dir.join(name)
    }
}

/// Decode a sheet, warning and returning `None` if it is missing or broken.
fn open_texture(path: &std::path::Path) -> Option<RgbaImage> {
    if !path.exists() {
        warn!("Texture not found: {}", path.display());
        return None;
    }
    match bitmap::load_texture(path) {
        Ok(img) => Some(img),
        Err(e) => {
            warn!("{}", e);
            None
        }
    }
}

/// Slice a sheet into `chars`-shaped cells and add every non-empty one.
///
/// Returns how many characters were added.
fn load_sheet(
    sheet: &RgbaImage,
    chars: &[String],
    height: u32,
    ascent: i32,
    charset: Charset,
    state: &mut LoadState,
) -> usize {
    let rows = chars.len() as u32;
    let cols = chars.first().map_or(0, |row| row.chars().count()) as u32;
    if rows == 0 || cols == 0 {
        return 0;
    }
    let (w, h) = sheet.dimensions();
    let cell_w = w / cols;
    let cell_h = h / rows;

    let mut added = 0;
    for (y, row) in chars.iter().enumerate() {
        for (x, c) in row.chars().enumerate() {
            if c == '\0' {
                continue;
            }
            let region = Region {
                x: x as u32 * cell_w,
                y: y as u32 * cell_h,
                width: cell_w,
                height: cell_h,
            };
            let Extraction::Glyph(cell) = bitmap::extract(sheet, region) else {
                continue;
            };
            let entry = CharEntry {
                code_point: c,
                source: GlyphSource::Bitmap {
                    bitmap: cell.bitmap,
                    x_offset: cell.x_offset,
                    height,
                    ascent,
                },
            };
            if state.add(entry, charset) {
                added += 1;
            }
        }
    }
    added
}
