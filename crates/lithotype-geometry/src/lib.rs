//! Lithotype Geometry - glyph outlines to extruded meshes
//!
//! This crate provides:
//! - 2D primitives: points, lines, segments, rectangles and polygons
//! - Polygon inset with self-intersection repair
//! - Glyph path flattening and contour nesting into solid regions with holes
//! - The shape tree and per-identity placements
//! - Extruded mesh construction over a pluggable triangulator
//!
//! # Example
//!
//! ```
//! use lithotype_geometry::*;
//!
//! let path = PathBuilder::new()
//!     .rect(Point2D::new(0.0, 0.0), Point2D::new(10.0, 10.0))
//!     .rect(Point2D::new(3.0, 3.0), Point2D::new(4.0, 4.0))
//!     .build();
//!
//! let shape = GlyphPathConverter::default().convert(
//!     &ShapeId::from("O"),
//!     &path,
//!     &Transform::IDENTITY,
//! );
//!
//! let meshes = shape.create_meshes(&MeshOptions::new(1.0), &Transform::IDENTITY, &EarcutTriangulator);
//! assert_eq!(meshes.len(), 1);
//! ```

// Core primitives
mod error;
mod line;
mod polygon;
mod rect;
mod transform;
mod vector;

// Outlines
mod curve;
mod glyph;
mod path;

// Shapes and meshes
mod mesh;
mod shape;
mod tessellator;
mod vertex;

// Re-exports
pub use error::*;
pub use line::*;
pub use polygon::*;
pub use rect::*;
pub use transform::*;
pub use vector::{Point2D, Vec2D, Vec2DExt};

pub use curve::*;
pub use glyph::*;
pub use path::*;

pub use mesh::*;
pub use shape::*;
pub use tessellator::*;
pub use vertex::*;
