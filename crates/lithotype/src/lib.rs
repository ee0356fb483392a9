//! Lithotype - extruded 3D text
//!
//! Lithotype turns font glyph outlines into extruded meshes and keeps a
//! renderer's instances in step with changing text:
//!
//! - **Geometry**: outline flattening, contour nesting, polygon insetting and
//!   mesh extrusion ([`geometry`])
//! - **Text**: glyph sources, glyph shape caching and paragraph flowing
//!   ([`text`])
//! - **Scene**: master meshes and instance recycling behind a render sink
//!   ([`scene`])
//!
//! # Quick Start
//!
//! ```ignore
//! use lithotype::prelude::*;
//!
//! let mut session = SessionBuilder::new("Sans", my_glyph_source)
//!     .config(Config::default())
//!     .build();
//!
//! // Every text change is one reflow.
//! let stats = session.reflow("Hello world", &my_sink);
//! ```
//!
//! # Architecture
//!
//! A [`Session`] owns every long-lived cache: converted glyph shapes, one
//! master mesh per shape identity, and the pool of detached instances.
//! A reflow flows the text into lines, lays out each line into glyph
//! placements and reconciles the placements against the previous frame.

pub mod session;

pub use lithotype_core as core;
pub use lithotype_geometry as geometry;
pub use lithotype_scene as scene;
pub use lithotype_text as text;

pub use lithotype_core::config::Config;
pub use session::{ReflowStats, Session, SessionBuilder};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::session::{ReflowStats, Session, SessionBuilder};

    pub use lithotype_core::config::{Config, ExtrusionConfig, LayoutConfig, ProfilingMode};

    pub use lithotype_geometry::{
        EarcutTriangulator, Mesh3D, MeshOptions, Path, PathBuilder, PathCommand, Point2D,
        Polygon2D, PolygonWithHoles, Shape, ShapeId, Transform, Triangulator,
    };

    pub use lithotype_scene::{LiveInstance, ReconcileStats, Reconciler, RenderSink};

    pub use lithotype_text::{Font, GlyphId, GlyphSource, TextError, TextResult};
}
