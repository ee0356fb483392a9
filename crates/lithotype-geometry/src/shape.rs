//! The shape tree.
//!
//! A [`Shape`] is an immutable, cheaply clonable tree: leaves hold resolved
//! glyph geometry behind an `Arc`, groups hold child shapes, and every node
//! carries a local [`Transform`]. Retransforming a shape shares the geometry.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use crate::{Polygon2D, Transform};

/// Stable identity of a piece of glyph geometry, independent of position.
///
/// Two occurrences of the same glyph share an id, so they can share one
/// template mesh and recycle each other's render instances.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(Arc<str>);

impl ShapeId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Id of the `index`-th resolved piece of this shape: `"{self}/{index}"`.
    pub fn child(&self, index: usize) -> Self {
        Self(format!("{}/{}", self.0, index).into())
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ShapeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ShapeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ShapeId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

/// One solid region with the holes cut directly out of it.
///
/// The positive polygon is kept clockwise and every hole counter-clockwise.
/// Islands inside a hole are separate `PolygonWithHoles` values.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonWithHoles {
    positive: Polygon2D,
    holes: Vec<Polygon2D>,
}

impl PolygonWithHoles {
    /// Build from a solid outline and its holes, normalizing winding.
    pub fn new(positive: Polygon2D, holes: Vec<Polygon2D>) -> Self {
        Self {
            positive: positive.make_cw(),
            holes: holes.iter().map(Polygon2D::make_ccw).collect(),
        }
    }

    pub fn positive(&self) -> &Polygon2D {
        &self.positive
    }

    pub fn holes(&self) -> &[Polygon2D] {
        &self.holes
    }

    /// Total number of outline points, holes included.
    pub fn point_count(&self) -> usize {
        self.positive.len() + self.holes.iter().map(Polygon2D::len).sum::<usize>()
    }

    /// Filled area: the positive area minus the holes.
    pub fn area(&self) -> f64 {
        self.positive.area() - self.holes.iter().map(Polygon2D::area).sum::<f64>()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    /// Nothing to draw, e.g. a space.
    Empty,
    /// A resolved solid region with its identity.
    Polygon {
        id: ShapeId,
        geometry: Arc<PolygonWithHoles>,
    },
    /// Child shapes. Order is only relevant for stable iteration.
    Group(Arc<[Shape]>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    transform: Transform,
    kind: ShapeKind,
}

impl Default for Shape {
    fn default() -> Self {
        Self::empty()
    }
}

impl Shape {
    pub fn empty() -> Self {
        Self {
            transform: Transform::IDENTITY,
            kind: ShapeKind::Empty,
        }
    }

    pub fn polygon(id: impl Into<ShapeId>, geometry: PolygonWithHoles) -> Self {
        Self {
            transform: Transform::IDENTITY,
            kind: ShapeKind::Polygon {
                id: id.into(),
                geometry: Arc::new(geometry),
            },
        }
    }

    pub fn group(children: Vec<Shape>) -> Self {
        Self {
            transform: Transform::IDENTITY,
            kind: ShapeKind::Group(children.into()),
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.kind, ShapeKind::Empty)
    }

    /// Same geometry under a different local transform.
    pub fn with_transform(&self, transform: Transform) -> Self {
        Self {
            transform,
            kind: self.kind.clone(),
        }
    }

    /// Number of polygon leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        match &self.kind {
            ShapeKind::Empty => 0,
            ShapeKind::Polygon { .. } => 1,
            ShapeKind::Group(children) => children.iter().map(Shape::leaf_count).sum(),
        }
    }

    /// Flatten the tree into its polygon leaves, each with the transform
    /// composed from `incoming` down to the leaf.
    pub fn placements(&self, incoming: &Transform) -> Vec<Placement> {
        let mut out = Vec::with_capacity(self.leaf_count());
        self.collect_placements(incoming, &mut out);
        out
    }

    fn collect_placements(&self, incoming: &Transform, out: &mut Vec<Placement>) {
        let transform = incoming.concat(&self.transform);
        match &self.kind {
            ShapeKind::Empty => {}
            ShapeKind::Polygon { id, geometry } => out.push(Placement {
                id: id.clone(),
                transform,
                geometry: Arc::clone(geometry),
            }),
            ShapeKind::Group(children) => {
                for child in children.iter() {
                    child.collect_placements(&transform, out);
                }
            }
        }
    }
}

/// A polygon leaf of a shape tree, positioned in the tree's root space.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub id: ShapeId,
    pub transform: Transform,
    pub geometry: Arc<PolygonWithHoles>,
}
