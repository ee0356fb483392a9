//! Lithotype Text - glyph shapes and text layout
//!
//! This crate provides:
//! - [`GlyphSource`], the seam to font data (outlines, advances, kerning)
//! - [`Font`], a per-glyph shape cache with single-line layout
//! - [`flow_text`], paragraph flowing with greedy word wrap
//! - `TtfGlyphSource`, a glyph source over `ttf-parser` (feature `ttf`)

mod error;
mod font;
mod layout;
mod source;
#[cfg(feature = "ttf")]
mod ttf;

pub use error::*;
pub use font::*;
pub use layout::*;
pub use source::*;
#[cfg(feature = "ttf")]
pub use ttf::*;
