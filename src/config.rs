use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::BitfontError;

/// Characters kept by [`Charset::Vi`].
const VI_CHARSET: &str = concat!(
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
    "ÀÁÂÃĂẠẢẤẦẨẪẬẮẰẲẴẶÈÉÊẸẺẼẾỀỂỄỆÌÍỊỈĨÒÓÔÕƠỌỎỐỒỔỖỘỚỜỞỠỢÙÚƯỤỦỨỪỬỮỰỲÝỴỶỸ",
    "àáâãăạảấầẩẫậắằẳẵặèéêẹẻẽếềểễệìíịỉĩòóôõơọỏốồổỗộớờởỡợùúưụủứừửữựỳýỵỷỹ",
    "Đđ«»“”‚‛„‟‗•…№–—·™®©",
    "\u{0300}\u{0301}\u{0303}\u{0309}\u{0323}!@#$%^&*()_+-=[]{}|;:'\",.<>/?\\ ",
);

/// All build parameters in one struct.
///
/// Every field has a default, so a JSON config file only needs the
/// values it changes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    // -- Font units --
    /// Font units per em.
    pub units_per_em: u32,
    /// Source pixels per em. `units_per_em / pixel_size` is the base scale.
    pub pixel_size: u32,
    pub family_name: String,
    /// Base name of the output files.
    pub file_stem: String,

    // -- Provider defaults --
    /// Cell height assumed for bitmap providers without `height`.
    pub font_height: u32,
    /// Cell height of unifont pages. Providers this tall are drawn at half scale.
    pub unifont_height: u32,
    pub unifont_ascent: i32,
    /// Ascent for bitmap providers without `ascent`.
    pub default_ascent: i32,

    // -- Paths --
    /// Directory holding font definition JSON files.
    pub font_dir: PathBuf,
    /// Directory holding texture sheets.
    pub texture_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Definition loaded first.
    pub root_font: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            units_per_em: 1024,
            pixel_size: 8,
            family_name: "Minecraft Custom".to_string(),
            file_stem: "MinecraftFont".to_string(),
            font_height: 8,
            unifont_height: 16,
            unifont_ascent: 15,
            default_ascent: 7,
            font_dir: PathBuf::from("assets/font"),
            texture_dir: PathBuf::from("assets/texture"),
            output_dir: PathBuf::from("dist"),
            root_font: "minecraft:default".to_string(),
        }
    }
}

impl FontConfig {
    /// Read a config from a JSON file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, BitfontError> {
        let text = std::fs::read_to_string(path).map_err(|source| BitfontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| BitfontError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Font units per source pixel.
    pub fn scale(&self) -> f64 {
        self.units_per_em as f64 / self.pixel_size as f64
    }
}

/// Which characters end up in the font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    /// Everything the providers define.
    #[default]
    Full,
    /// Vietnamese subset.
    Vi,
}

impl Charset {
    pub fn contains(&self, c: char) -> bool {
        match self {
            Charset::Full => true,
            Charset::Vi => VI_CHARSET.contains(c),
        }
    }

    /// Suffix used in output file names (`None` for the full set).
    pub fn file_suffix(&self) -> Option<&'static str> {
        match self {
            Charset::Full => None,
            Charset::Vi => Some("VI"),
        }
    }
}

/// Font weight being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weight {
    #[default]
    Regular,
    /// Synthetic bold: bitmaps widened by one column.
    Bold,
}

impl Weight {
    pub fn is_bold(&self) -> bool {
        matches!(self, Weight::Bold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scale_is_128() {
        assert_eq!(FontConfig::default().scale(), 128.0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: FontConfig =
            serde_json::from_str(r#"{ "units_per_em": 2048, "family_name": "Pixel" }"#).unwrap();
        assert_eq!(config.scale(), 256.0);
        assert_eq!(config.family_name, "Pixel");
        assert_eq!(config.unifont_ascent, 15);
    }

    #[test]
    fn vi_charset_filters() {
        assert!(Charset::Vi.contains('ệ'));
        assert!(Charset::Vi.contains(' '));
        assert!(!Charset::Vi.contains('Ж'));
        assert!(Charset::Full.contains('Ж'));
    }
}
