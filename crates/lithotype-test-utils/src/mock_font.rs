//! In-memory glyph source for testing.
//!
//! The glyphs are hand-authored in a 1000 units-per-em design space and
//! cover the nesting cases glyph conversion has to resolve.

use lithotype_geometry::{Path, PathBuilder, Point2D};
use lithotype_text::{GlyphId, GlyphSource, TextError, TextResult};
use parking_lot::Mutex;

/// Characters the mock font can draw, with their glyph ids.
///
/// | char | glyph | outline |
/// |---|---|---|
/// | `O` | 1 | outer rectangle with one hole |
/// | `=` | 2 | two disjoint bars |
/// | `i` | 3 | stem and a separate dot |
/// | `8` | 4 | outer, hole, and an island inside the hole |
/// | `T` | 5 | one concave contour |
/// | `D` | 6 | curved outer contour with a curved hole |
/// | ` ` | 7 | no contours |
/// | `#` | 8 | unreadable outline |
pub const MOCK_GLYPHS: [(char, u16); 8] = [
    ('O', 1),
    ('=', 2),
    ('i', 3),
    ('8', 4),
    ('T', 5),
    ('D', 6),
    (' ', 7),
    ('#', 8),
];

/// Mock implementation of [`GlyphSource`].
///
/// Records every outline request so tests can check that glyph shapes are
/// converted once per glyph.
pub struct MockGlyphSource {
    outline_requests: Mutex<Vec<GlyphId>>,
}

impl MockGlyphSource {
    pub fn new() -> Self {
        Self {
            outline_requests: Mutex::new(Vec::new()),
        }
    }

    /// Get a copy of all outline requests.
    pub fn outline_requests(&self) -> Vec<GlyphId> {
        self.outline_requests.lock().clone()
    }

    /// Count outline requests for one glyph.
    pub fn count_outline_requests(&self, glyph: GlyphId) -> usize {
        self.outline_requests
            .lock()
            .iter()
            .filter(|&&requested| requested == glyph)
            .count()
    }

    /// Clear recorded requests.
    pub fn clear_requests(&self) {
        self.outline_requests.lock().clear();
    }

    /// Outline of a mock glyph, without recording the request.
    pub fn outline(glyph: GlyphId) -> Option<Path> {
        let mut builder = PathBuilder::new();
        match glyph.0 {
            1 => {
                rect(&mut builder, 0.0, 0.0, 600.0, 700.0);
                rect(&mut builder, 150.0, 150.0, 300.0, 400.0);
            }
            2 => {
                rect(&mut builder, 0.0, 200.0, 500.0, 100.0);
                rect(&mut builder, 0.0, 400.0, 500.0, 100.0);
            }
            3 => {
                rect(&mut builder, 0.0, 0.0, 100.0, 500.0);
                rect(&mut builder, 0.0, 600.0, 100.0, 100.0);
            }
            4 => {
                rect(&mut builder, 0.0, 0.0, 600.0, 700.0);
                // Drawn clockwise, unlike the others; nesting must not care.
                builder.polygon(&[
                    Point2D::new(100.0, 100.0),
                    Point2D::new(100.0, 600.0),
                    Point2D::new(500.0, 600.0),
                    Point2D::new(500.0, 100.0),
                ]);
                rect(&mut builder, 200.0, 200.0, 200.0, 300.0);
            }
            5 => {
                builder.polygon(&[
                    Point2D::new(250.0, 0.0),
                    Point2D::new(350.0, 0.0),
                    Point2D::new(350.0, 600.0),
                    Point2D::new(600.0, 600.0),
                    Point2D::new(600.0, 700.0),
                    Point2D::new(0.0, 700.0),
                    Point2D::new(0.0, 600.0),
                    Point2D::new(250.0, 600.0),
                ]);
            }
            6 => {
                builder
                    .move_to(Point2D::new(0.0, 0.0))
                    .line_to(Point2D::new(300.0, 0.0))
                    .cubic_to(
                        Point2D::new(500.0, 0.0),
                        Point2D::new(600.0, 200.0),
                        Point2D::new(600.0, 350.0),
                    )
                    .cubic_to(
                        Point2D::new(600.0, 500.0),
                        Point2D::new(500.0, 700.0),
                        Point2D::new(300.0, 700.0),
                    )
                    .line_to(Point2D::new(0.0, 700.0))
                    .close();
                builder
                    .move_to(Point2D::new(120.0, 120.0))
                    .line_to(Point2D::new(300.0, 120.0))
                    .quad_to(Point2D::new(480.0, 120.0), Point2D::new(480.0, 350.0))
                    .quad_to(Point2D::new(480.0, 580.0), Point2D::new(300.0, 580.0))
                    .line_to(Point2D::new(120.0, 580.0))
                    .close();
            }
            7 => {}
            _ => return None,
        }
        Some(builder.build())
    }
}

fn rect(builder: &mut PathBuilder, x: f64, y: f64, width: f64, height: f64) {
    builder.rect(Point2D::new(x, y), Point2D::new(width, height));
}

impl Default for MockGlyphSource {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphSource for MockGlyphSource {
    fn units_per_em(&self) -> f64 {
        1000.0
    }

    fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        MOCK_GLYPHS
            .iter()
            .find(|&&(c, _)| c == ch)
            .map(|&(_, id)| GlyphId(id))
    }

    fn glyph_outline(&self, glyph: GlyphId) -> TextResult<Path> {
        self.outline_requests.lock().push(glyph);
        Self::outline(glyph).ok_or_else(|| TextError::Outline {
            glyph,
            message: "no outline in mock font".to_string(),
        })
    }

    fn advance_width(&self, glyph: GlyphId) -> f64 {
        match glyph.0 {
            2 => 550.0,
            3 => 200.0,
            5 => 600.0,
            7 => 250.0,
            _ => 650.0,
        }
    }

    fn kerning(&self, left: GlyphId, right: GlyphId) -> f64 {
        match (left.0, right.0) {
            (5, 1) => -60.0,
            (5, 3) => -30.0,
            _ => 0.0,
        }
    }
}
