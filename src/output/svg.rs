//! SVG font output.

use std::fmt::Write;

use crate::config::{FontConfig, Weight};
use crate::glyph::Glyph;

/// SVG path data for a glyph: one `M … L … Z` run per contour.
pub fn path_data(glyph: &Glyph) -> String {
    let mut parts = Vec::with_capacity(glyph.contours.len());
    for contour in &glyph.contours {
        let Some(&(x0, y0)) = contour.points.first() else {
            continue;
        };
        let mut d = format!("M{} {} ", x0, y0);
        let rest: Vec<String> = contour.points[1..]
            .iter()
            .map(|(x, y)| format!("L{} {}", x, y))
            .collect();
        d.push_str(&rest.join(" "));
        d.push('Z');
        parts.push(d);
    }
    parts.join(" ")
}

/// A complete SVG font document holding `glyphs` in order.
pub fn font_document(glyphs: &[Glyph], config: &FontConfig, weight: Weight) -> String {
    let default_advance = (8.0 * config.scale()).round() as i64;
    let (id_suffix, font_weight) = match weight {
        Weight::Regular => ("", "normal"),
        Weight::Bold => ("Bold", "bold"),
    };

    let mut glyphs_xml = String::new();
    for glyph in glyphs {
        let d = path_data(glyph);
        let hex = format!("{:X}", glyph.code_point as u32);
        // Writing to a String cannot fail.
        let _ = if d.is_empty() {
            writeln!(
                glyphs_xml,
                r#"      <glyph glyph-name="{}" unicode="&#x{};" horiz-adv-x="{}" />"#,
                glyph.name(),
                hex,
                glyph.advance_width
            )
        } else {
            writeln!(
                glyphs_xml,
                r#"      <glyph glyph-name="{}" unicode="&#x{};" d="{}" horiz-adv-x="{}" />"#,
                glyph.name(),
                hex,
                d,
                glyph.advance_width
            )
        };
    }

    format!(
        r#"<?xml version="1.0" standalone="no"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<svg xmlns="http://www.w3.org/2000/svg">
  <defs>
    <font id="{stem}{id_suffix}" horiz-adv-x="{default_advance}">
      <font-face font-family="{family}" font-weight="{font_weight}" units-per-em="{upem}" ascent="{upem}" descent="0" />
      <glyph glyph-name=".notdef" horiz-adv-x="{default_advance}" />
{glyphs_xml}    </font>
  </defs>
</svg>
"#,
        stem = config.file_stem,
        family = config.family_name,
        upem = config.units_per_em,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::Contour;

    fn square() -> Glyph {
        Glyph {
            code_point: 'A',
            contours: vec![
                Contour {
                    points: vec![(0, 896), (256, 896), (256, 640), (0, 640)],
                },
                Contour {
                    points: vec![(512, 0), (640, 0), (640, 128)],
                },
            ],
            advance_width: 384,
        }
    }

    #[test]
    fn path_data_joins_contours() {
        assert_eq!(
            path_data(&square()),
            "M0 896 L256 896 L256 640 L0 640Z M512 0 L640 0 L640 128Z"
        );
    }

    #[test]
    fn document_lists_glyphs() {
        let space = Glyph {
            code_point: ' ',
            contours: vec![],
            advance_width: 512,
        };
        let doc = font_document(&[space, square()], &FontConfig::default(), Weight::Bold);
        assert!(doc.contains(r#"<font id="MinecraftFontBold" horiz-adv-x="1024">"#));
        assert!(doc.contains(r#"font-weight="bold" units-per-em="1024""#));
        assert!(doc.contains(r#"<glyph glyph-name="uni20" unicode="&#x20;" horiz-adv-x="512" />"#));
        assert!(doc.contains(r#"glyph-name="uni41" unicode="&#x41;" d="M0 896 "#));
    }
}
