//! Glyph source over TrueType / OpenType font data.

use lithotype_geometry::{Path, PathBuilder, Point2D};

use crate::{GlyphId, GlyphSource, TextError, TextResult};

/// A [`GlyphSource`] reading a parsed `ttf-parser` face.
pub struct TtfGlyphSource<'a> {
    face: ttf_parser::Face<'a>,
}

impl<'a> TtfGlyphSource<'a> {
    /// Parse face `index` of a font file or collection.
    pub fn parse(data: &'a [u8], index: u32) -> TextResult<Self> {
        let face = ttf_parser::Face::parse(data, index).map_err(|err| TextError::FontParse {
            message: err.to_string(),
        })?;
        Ok(Self { face })
    }

    pub fn face(&self) -> &ttf_parser::Face<'a> {
        &self.face
    }
}

/// Collects outline callbacks into path commands.
struct OutlineCollector {
    builder: PathBuilder,
}

impl ttf_parser::OutlineBuilder for OutlineCollector {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(point(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(point(x, y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(point(x1, y1), point(x, y));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder
            .cubic_to(point(x1, y1), point(x2, y2), point(x, y));
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

fn point(x: f32, y: f32) -> Point2D {
    Point2D::new(x as f64, y as f64)
}

impl GlyphSource for TtfGlyphSource<'_> {
    fn units_per_em(&self) -> f64 {
        self.face.units_per_em() as f64
    }

    fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        self.face.glyph_index(ch).map(|id| GlyphId(id.0))
    }

    fn glyph_outline(&self, glyph: GlyphId) -> TextResult<Path> {
        if glyph.0 >= self.face.number_of_glyphs() {
            return Err(TextError::Outline {
                glyph,
                message: format!("font has {} glyphs", self.face.number_of_glyphs()),
            });
        }

        let mut collector = OutlineCollector {
            builder: PathBuilder::new(),
        };
        // No bounding box means a blank glyph, such as a space.
        let _ = self
            .face
            .outline_glyph(ttf_parser::GlyphId(glyph.0), &mut collector);
        Ok(collector.builder.build())
    }

    fn advance_width(&self, glyph: GlyphId) -> f64 {
        self.face
            .glyph_hor_advance(ttf_parser::GlyphId(glyph.0))
            .unwrap_or(0) as f64
    }

    fn kerning(&self, left: GlyphId, right: GlyphId) -> f64 {
        let Some(kern) = self.face.tables().kern else {
            return 0.0;
        };
        kern.subtables
            .into_iter()
            .filter(|subtable| subtable.horizontal && !subtable.variable)
            .find_map(|subtable| {
                subtable.glyphs_kerning(ttf_parser::GlyphId(left.0), ttf_parser::GlyphId(right.0))
            })
            .unwrap_or(0) as f64
    }
}
