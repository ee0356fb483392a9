//! Optimized collection types for lithotype.
//!
//! Caches keyed by shape identity or glyph id are hit once per glyph occurrence on
//! every reflow, so they use AHash instead of SipHash.

// Re-export optimized hash collections
pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

/// Type alias for the standard HashMap with AHash for better performance.
pub type AHashMap<K, V> = ahash::AHashMap<K, V>;

/// Type alias for the standard HashSet with AHash for better performance.
pub type AHashSet<T> = ahash::AHashSet<T>;
