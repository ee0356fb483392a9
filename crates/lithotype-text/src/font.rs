//! Fonts: glyph shape caching and single-line layout.

use std::sync::Arc;

use lithotype_core::alloc::HashMap;
use lithotype_core::profiling::profile_function;
use lithotype_geometry::{ConverterOptions, GlyphPathConverter, Shape, ShapeId, Transform};

use crate::{GlyphId, GlyphSource, TextError};

/// A named glyph source with a per-glyph shape cache.
///
/// Glyph shapes are converted once, in em units, and then retransformed for
/// every occurrence. The shape identity of glyph `g` is `"{name}-{g}"`, so all
/// occurrences of a glyph share their geometry downstream.
pub struct Font<G> {
    name: Arc<str>,
    source: G,
    converter: GlyphPathConverter,
    shapes: HashMap<GlyphId, Shape>,
}

impl<G: GlyphSource> Font<G> {
    pub fn new(name: impl Into<Arc<str>>, source: G) -> Self {
        Self {
            name: name.into(),
            source,
            converter: GlyphPathConverter::default(),
            shapes: HashMap::new(),
        }
    }

    /// Use different flattening options. Drops every cached shape.
    pub fn with_converter_options(mut self, options: ConverterOptions) -> Self {
        self.converter = GlyphPathConverter::new(options);
        self.shapes.clear();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &G {
        &self.source
    }

    /// Number of glyph shapes converted so far.
    pub fn cached_glyphs(&self) -> usize {
        self.shapes.len()
    }

    /// Identity of a glyph's shape.
    pub fn shape_id(&self, glyph: GlyphId) -> ShapeId {
        ShapeId::new(format!("{}-{}", self.name, glyph))
    }

    /// Shape of `glyph` in glyph-local em units, converted on first use.
    ///
    /// An unreadable outline yields an empty shape; the glyph still advances
    /// the pen.
    pub fn glyph_shape(&mut self, glyph: GlyphId) -> Shape {
        if let Some(shape) = self.shapes.get(&glyph) {
            return shape.clone();
        }

        let id = self.shape_id(glyph);
        let shape = match self.source.glyph_outline(glyph) {
            Ok(path) => self.converter.convert(&id, &path, &Transform::IDENTITY),
            Err(err) => {
                tracing::warn!(font = %self.name, glyph = glyph.0, "{}", err);
                Shape::empty()
            }
        };
        self.shapes.insert(glyph, shape.clone());
        shape
    }

    /// Lay out one line of text.
    ///
    /// Glyph `i` is placed at pen position `x_i` (design units, kerning
    /// applied before placing) and scaled by `1 / units_per_em`. The glyphs
    /// are grouped under `transform`. Characters without a glyph are skipped.
    pub fn shape_for_text(&mut self, text: &str, transform: Transform) -> Shape {
        profile_function!();

        let units_per_em = self.source.units_per_em();
        let scale = if units_per_em > 0.0 {
            1.0 / units_per_em
        } else {
            1.0
        };

        let mut x = 0.0;
        let mut previous: Option<GlyphId> = None;
        let mut shapes = Vec::with_capacity(text.len());

        for ch in text.chars() {
            let Some(glyph) = self.source.glyph_id(ch) else {
                tracing::warn!(font = %self.name, "{}", TextError::GlyphNotFound { ch });
                continue;
            };

            if let Some(previous) = previous {
                x += self.source.kerning(previous, glyph);
            }

            let shape = self.glyph_shape(glyph);
            let placed = shape
                .transform()
                .concat(&Transform::new(x * scale, 0.0, 0.0, scale));
            shapes.push(shape.with_transform(placed));

            x += self.source.advance_width(glyph);
            previous = Some(glyph);
        }

        Shape::group(shapes).with_transform(transform)
    }

    /// Advance of `text` in em units, kerning included.
    pub fn measure(&self, text: &str) -> f64 {
        let mut x = 0.0;
        let mut previous: Option<GlyphId> = None;
        for glyph in text.chars().filter_map(|ch| self.source.glyph_id(ch)) {
            if let Some(previous) = previous {
                x += self.source.kerning(previous, glyph);
            }
            x += self.source.advance_width(glyph);
            previous = Some(glyph);
        }

        let units_per_em = self.source.units_per_em();
        if units_per_em > 0.0 { x / units_per_em } else { x }
    }
}
