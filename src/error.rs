use std::path::PathBuf;

use thiserror::Error;

/// Errors from the loading and output layers.
///
/// The tracing pipeline itself never fails; empty or malformed input
/// degrades to empty or partial glyphs.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BitfontError {
    #[error("failed to load image: {0}")]
    ImageLoad(String),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no glyphs loaded")]
    NoGlyphs,

    #[error("empty contour")]
    EmptyContour,

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[cfg(feature = "ufo")]
    #[error("norad write error: {0}")]
    NoradWrite(#[from] norad::error::FontWriteError),
}
