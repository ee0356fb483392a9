//! Lithotype Scene - render instance reconciliation
//!
//! Every reflow produces a list of glyph [`Placement`](lithotype_geometry::Placement)s.
//! A [`Reconciler`] maps them onto render instances driven through a
//! [`RenderSink`], building one master mesh per shape identity and
//! recycling instances between frames instead of recreating them.

mod cache;
mod reconcile;
mod sink;

pub use cache::*;
pub use reconcile::*;
pub use sink::*;
