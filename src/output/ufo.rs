//! UFO output via norad.

use std::path::Path;

use kurbo::{BezPath, PathEl};
use norad::{Contour, ContourPoint, Font, PointType};

use crate::error::BitfontError;
use crate::glyph::Glyph;

/// Convert a built glyph to a `norad::Glyph`.
pub fn to_glyph(glyph: &Glyph) -> Result<norad::Glyph, BitfontError> {
    let mut out = norad::Glyph::new(&glyph.name());
    out.width = glyph.advance_width as f64;
    out.codepoints.insert(glyph.code_point);

    for contour in &glyph.contours {
        out.contours.push(to_contour(&contour.to_bez_path())?);
    }
    Ok(out)
}

/// Convert a closed polyline `BezPath` to a `norad::Contour`.
///
/// UFO contours are cyclic: the MoveTo point becomes the first `line`
/// point and the closing segment is implicit.
pub fn to_contour(path: &BezPath) -> Result<Contour, BitfontError> {
    let elements = path.elements();
    let first = match elements.first() {
        Some(PathEl::MoveTo(p)) => *p,
        Some(_) => return Err(BitfontError::InvalidPath("path must start with MoveTo".into())),
        None => return Err(BitfontError::EmptyContour),
    };

    let mut points = vec![line_point(first)];
    for el in elements.iter().skip(1) {
        match *el {
            PathEl::LineTo(p) => points.push(line_point(p)),
            PathEl::ClosePath => {}
            PathEl::MoveTo(_) => {
                return Err(BitfontError::InvalidPath("unexpected MoveTo mid-path".into()))
            }
            PathEl::QuadTo(..) | PathEl::CurveTo(..) => {
                return Err(BitfontError::InvalidPath("outlines are polygonal".into()))
            }
        }
    }

    Ok(Contour::new(points, None))
}

fn line_point(p: kurbo::Point) -> ContourPoint {
    ContourPoint::new(p.x, p.y, PointType::Line, false, None, None)
}

/// Write `glyphs` into a fresh UFO at `path`, replacing any existing one.
pub fn write_font(glyphs: &[Glyph], path: &Path) -> Result<(), BitfontError> {
    let mut font = Font::new();
    for glyph in glyphs {
        font.default_layer_mut().insert_glyph(to_glyph(glyph)?);
    }
    font.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::Contour as GlyphContour;

    #[test]
    fn glyph_carries_width_codepoint_and_contours() {
        let glyph = Glyph {
            code_point: 'A',
            contours: vec![GlyphContour {
                points: vec![(0, 896), (256, 896), (256, 640), (0, 640)],
            }],
            advance_width: 384,
        };
        let out = to_glyph(&glyph).unwrap();
        assert_eq!(out.width, 384.0);
        assert!(out.codepoints.contains('A'));
        assert_eq!(out.contours.len(), 1);
        let points = &out.contours[0].points;
        assert_eq!(points.len(), 4);
        assert!(points.iter().all(|p| p.typ == PointType::Line));
        assert_eq!((points[0].x, points[0].y), (0.0, 896.0));
    }

    #[test]
    fn empty_path_is_rejected() {
        assert!(matches!(to_contour(&BezPath::new()), Err(BitfontError::EmptyContour)));
    }

    #[test]
    fn writes_ufo_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Test.ufo");
        let glyph = Glyph {
            code_point: ' ',
            contours: vec![],
            advance_width: 512,
        };
        write_font(&[glyph], &path).unwrap();
        assert!(path.join("glyphs").join("contents.plist").exists());
    }
}
