//! The glyph source seam.
//!
//! A glyph source answers the questions a font file answers: which glyph draws
//! a character, what its outline is, and how far the pen advances. Binary font
//! parsing lives behind this trait, never in the layout code.

use std::fmt;

use lithotype_geometry::Path;

use crate::TextResult;

/// Index of a glyph within its font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlyphId(pub u16);

impl fmt::Display for GlyphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outline and metric lookup for one font. All values are in font design units.
pub trait GlyphSource {
    /// Design units per em.
    fn units_per_em(&self) -> f64;

    /// Glyph drawing `ch`, if the font has one.
    fn glyph_id(&self, ch: char) -> Option<GlyphId>;

    /// Outline of `glyph` as path commands. Empty for blank glyphs.
    fn glyph_outline(&self, glyph: GlyphId) -> TextResult<Path>;

    /// Horizontal advance of `glyph`.
    fn advance_width(&self, glyph: GlyphId) -> f64;

    /// Kerning adjustment between two consecutive glyphs.
    fn kerning(&self, _left: GlyphId, _right: GlyphId) -> f64 {
        0.0
    }
}

impl<G: GlyphSource + ?Sized> GlyphSource for Box<G> {
    fn units_per_em(&self) -> f64 {
        (**self).units_per_em()
    }

    fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        (**self).glyph_id(ch)
    }

    fn glyph_outline(&self, glyph: GlyphId) -> TextResult<Path> {
        (**self).glyph_outline(glyph)
    }

    fn advance_width(&self, glyph: GlyphId) -> f64 {
        (**self).advance_width(glyph)
    }

    fn kerning(&self, left: GlyphId, right: GlyphId) -> f64 {
        (**self).kerning(left, right)
    }
}
