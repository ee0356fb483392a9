//! Test utilities for Lithotype.
//!
//! This crate provides testing infrastructure for the Lithotype crates:
//! polygon fixtures, a render sink that records what reconciliation does to
//! it, and an in-memory font.
//!
//! # Overview
//!
//! - [`fixtures`] - Polygon builders shared by geometry tests
//! - `MockRenderSink` - Records every [`RenderSink`](lithotype_scene::RenderSink)
//!   call (requires `mock` feature)
//! - `MockGlyphSource` - Hand-authored glyph outlines with kerning (requires
//!   `mock` feature)
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use lithotype_geometry::{Mesh3D, ShapeId, Transform};
//! use lithotype_scene::RenderSink;
//! use lithotype_test_utils::MockRenderSink;
//!
//! let sink = MockRenderSink::new();
//! let id = ShapeId::from("Mock-1/0");
//!
//! sink.create_master(&id, &Mesh3D::new());
//! let instance = sink.create_instance(&id);
//! sink.place(&instance, &Transform::translate(1.0, 2.0, 0.0));
//!
//! assert_eq!(sink.count_instance_creates(), 1);
//! assert_eq!(sink.visible_count(), 1);
//! # }
//! ```
//!
//! # Design Philosophy
//!
//! Mock implementations use `Mutex` for interior mutability, so the `&self`
//! trait methods can record calls. Instances carry a serial number unique
//! within their sink, which lets tests assert that an instance survived a
//! reflow as the same object.

pub mod fixtures;
#[cfg(feature = "mock")]
pub mod mock_font;
#[cfg(feature = "mock")]
pub mod mock_sink;

#[cfg(feature = "mock")]
pub use mock_font::*;
#[cfg(feature = "mock")]
pub use mock_sink::*;
