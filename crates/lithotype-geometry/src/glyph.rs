//! Glyph outline to shape conversion.
//!
//! A glyph path is flattened into contours, the contours are nested by
//! geometric containment and area, and each solid region becomes one
//! [`PolygonWithHoles`]. The raw winding of a contour is never used to decide
//! whether it is solid or a hole; font tools disagree on it.

use lithotype_core::profiling::profile_function;

use crate::{
    CubicBezier, Path, PathCommand, Point2D, Polygon2D, PolygonWithHoles, QuadraticBezier, Shape,
    ShapeId, Transform,
};

/// Flattening parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConverterOptions {
    /// Samples taken along every quadratic or cubic segment.
    pub curve_samples: usize,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self { curve_samples: 10 }
    }
}

/// Turns glyph paths into shapes.
#[derive(Debug, Clone, Default)]
pub struct GlyphPathConverter {
    options: ConverterOptions,
}

impl GlyphPathConverter {
    pub fn new(options: ConverterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConverterOptions {
        &self.options
    }

    /// Flatten `path` into closed contours, each point mapped through the
    /// scale and translation of `placement`.
    ///
    /// Every `MoveTo` starts a contour. Consecutive duplicate points are
    /// dropped, as is a closing point equal to the first one.
    pub fn flatten(&self, path: &Path, placement: &Transform) -> Vec<Vec<Point2D>> {
        let samples = self.options.curve_samples.max(1);
        let mut contours = Vec::new();
        let mut current: Vec<Point2D> = Vec::new();
        let mut pen = Point2D::ZERO;
        let mut start = Point2D::ZERO;
        let mut open = false;

        fn push(points: &mut Vec<Point2D>, p: Point2D) {
            if points.last() != Some(&p) {
                points.push(p);
            }
        }

        fn finish(contours: &mut Vec<Vec<Point2D>>, points: &mut Vec<Point2D>) {
            let mut points = std::mem::take(points);
            if points.len() > 1 && points.first() == points.last() {
                points.pop();
            }
            if !points.is_empty() {
                contours.push(points);
            }
        }

        for cmd in path.commands() {
            // Drawing after a close without a move continues from the contour start.
            if !open && !matches!(cmd, PathCommand::MoveTo(_) | PathCommand::Close) {
                push(&mut current, start);
                open = true;
            }

            match *cmd {
                PathCommand::MoveTo(to) => {
                    finish(&mut contours, &mut current);
                    push(&mut current, to);
                    pen = to;
                    start = to;
                    open = true;
                }
                PathCommand::LineTo(to) => {
                    push(&mut current, to);
                    pen = to;
                }
                PathCommand::QuadTo { control, to } => {
                    for p in QuadraticBezier::new(pen, control, to).sample_points(samples) {
                        push(&mut current, p);
                    }
                    pen = to;
                }
                PathCommand::CubicTo {
                    control1,
                    control2,
                    to,
                } => {
                    for p in CubicBezier::new(pen, control1, control2, to).sample_points(samples) {
                        push(&mut current, p);
                    }
                    pen = to;
                }
                PathCommand::Close => {
                    finish(&mut contours, &mut current);
                    pen = start;
                    open = false;
                }
            }
        }
        finish(&mut contours, &mut current);

        let offset = Point2D::new(placement.tx, placement.ty);
        for contour in &mut contours {
            for p in contour.iter_mut() {
                *p = *p * placement.scale + offset;
            }
        }
        contours
    }

    /// Convert a glyph path into a shape.
    ///
    /// The result is `Empty` when no contour encloses anything, the single
    /// polygon when there is one solid region, and a group otherwise. Region
    /// `n` gets the id `"{id}/{n}"`. Malformed contours are skipped.
    pub fn convert(&self, id: &ShapeId, path: &Path, placement: &Transform) -> Shape {
        profile_function!();

        let mut polygons = Vec::new();
        for (index, contour) in self.flatten(path, placement).into_iter().enumerate() {
            match Polygon2D::new(contour) {
                Ok(polygon) => polygons.push(polygon),
                Err(err) => {
                    tracing::warn!(shape = %id, contour = index, "Skipping malformed contour: {}", err);
                }
            }
        }

        let mut regions = ContourTree::nest(polygons).assemble();
        tracing::trace!(shape = %id, regions = regions.len(), "Converted glyph path");

        match regions.len() {
            0 => Shape::empty(),
            1 => match regions.pop() {
                Some(region) => Shape::polygon(id.child(0), region),
                None => Shape::empty(),
            },
            _ => Shape::group(
                regions
                    .into_iter()
                    .enumerate()
                    .map(|(n, region)| Shape::polygon(id.child(n), region))
                    .collect(),
            ),
        }
    }
}

struct ContourNode {
    polygon: Polygon2D,
    children: Vec<usize>,
}

/// Contours nested by containment. Nodes are sorted by descending area.
struct ContourTree {
    nodes: Vec<ContourNode>,
    roots: Vec<usize>,
}

impl ContourTree {
    /// Each contour's parent is the nearest larger contour that intersects it
    /// (overlapping bounds and at least one shared vertex inside). Contours
    /// without one are roots.
    fn nest(mut polygons: Vec<Polygon2D>) -> Self {
        polygons.sort_by(|a, b| b.area().total_cmp(&a.area()));

        let mut nodes: Vec<ContourNode> = Vec::with_capacity(polygons.len());
        let mut roots = Vec::new();
        for polygon in polygons {
            let index = nodes.len();
            // Scan from the nearest (smallest) larger contour outward.
            let parent = nodes
                .iter()
                .rposition(|node| node.polygon.intersects_poly(&polygon));
            match parent {
                Some(parent) => nodes[parent].children.push(index),
                None => roots.push(index),
            }
            nodes.push(ContourNode {
                polygon,
                children: Vec::new(),
            });
        }

        Self { nodes, roots }
    }

    /// One region per root and per island inside a hole, in depth-first order.
    fn assemble(&self) -> Vec<PolygonWithHoles> {
        let mut out = Vec::with_capacity(self.roots.len());
        for &root in &self.roots {
            self.assemble_region(root, &mut out);
        }
        out
    }

    fn assemble_region(&self, index: usize, out: &mut Vec<PolygonWithHoles>) {
        let node = &self.nodes[index];
        let holes = node
            .children
            .iter()
            .map(|&hole| self.nodes[hole].polygon.clone())
            .collect();
        out.push(PolygonWithHoles::new(node.polygon.clone(), holes));

        for &hole in &node.children {
            for &island in &self.nodes[hole].children {
                self.assemble_region(island, out);
            }
        }
    }
}
