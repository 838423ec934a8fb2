use std::path::PathBuf;

use bitfont::{Charset, FontConfig, Weight};
use clap::{Parser, ValueEnum};
use log::info;

#[derive(Parser)]
#[command(name = "bitfont", about = "Pixel-sheet bitmap font to polygonal font outlines")]
struct Cli {
    /// Characters to include
    #[arg(long, value_enum, default_value = "full")]
    charset: CharsetArg,

    /// Font weight to build
    #[arg(long, value_enum, default_value = "regular")]
    weight: WeightArg,

    /// JSON config file (fields not given keep their defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory of font definition JSON files
    #[arg(long)]
    font_dir: Option<PathBuf>,

    /// Directory of texture sheets
    #[arg(long)]
    texture_dir: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write a UFO font source
    #[cfg(feature = "ufo")]
    #[arg(long)]
    ufo: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum CharsetArg {
    /// Every character the providers define
    Full,
    /// Vietnamese subset
    Vi,
}

#[derive(Clone, Copy, ValueEnum)]
enum WeightArg {
    Regular,
    Bold,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => FontConfig::from_file(path)?,
        None => FontConfig::default(),
    };
    if let Some(dir) = cli.font_dir {
        config.font_dir = dir;
    }
    if let Some(dir) = cli.texture_dir {
        config.texture_dir = dir;
    }
    if let Some(dir) = cli.output {
        config.output_dir = dir;
    }
    let charset = match cli.charset {
        CharsetArg::Full => Charset::Full,
        CharsetArg::Vi => Charset::Vi,
    };
    let weight = match cli.weight {
        WeightArg::Regular => Weight::Regular,
        WeightArg::Bold => Weight::Bold,
    };

    // MinecraftFont[_VI][_Bold]
    let mut stem = config.file_stem.clone();
    if let Some(suffix) = charset.file_suffix() {
        stem.push('_');
        stem.push_str(suffix);
    }
    if weight.is_bold() {
        stem.push_str("_Bold");
    }

    let glyphs = bitfont::build_font(&config, charset, weight)?;

    std::fs::create_dir_all(&config.output_dir)?;
    let svg_path = config.output_dir.join(format!("{}.svg", stem));
    std::fs::write(&svg_path, bitfont::output::svg::font_document(&glyphs, &config, weight))?;
    info!("\u{2713} {}", svg_path.display());

    #[cfg(feature = "ufo")]
    if cli.ufo {
        let ufo_path = config.output_dir.join(format!("{}.ufo", stem));
        bitfont::output::ufo::write_font(&glyphs, &ufo_path)?;
        info!("\u{2713} {}", ufo_path.display());
    }

    Ok(())
}
