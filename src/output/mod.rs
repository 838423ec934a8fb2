//! Font assemblers: turn built glyphs into font source files.

pub mod svg;

#[cfg(feature = "ufo")]
pub mod ufo;
