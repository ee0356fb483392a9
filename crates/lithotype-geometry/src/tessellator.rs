//! Polygon triangulation.
//!
//! Face triangulation is delegated to a [`Triangulator`]. The mesh builder
//! prepares its input (one flat coordinate array, outer ring first, then every
//! hole) and interprets the returned index triples.

use crate::{GeometryError, GeometryResult};

/// Ear-clipping style triangulation of a polygon with holes.
pub trait Triangulator {
    /// Triangulate `coords`, a flat `[x0, y0, x1, y1, ...]` array.
    ///
    /// `hole_starts` holds the vertex index (not the coordinate index) where
    /// each hole ring begins. The result is a flat list of index triples into
    /// the vertex list.
    fn triangulate(&self, coords: &[f64], hole_starts: &[usize]) -> GeometryResult<Vec<usize>>;
}

/// [`Triangulator`] backed by `earcutr`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EarcutTriangulator;

impl Triangulator for EarcutTriangulator {
    fn triangulate(&self, coords: &[f64], hole_starts: &[usize]) -> GeometryResult<Vec<usize>> {
        let indices = earcutr::earcut(coords, hole_starts, 2).map_err(|_| {
            GeometryError::Triangulation {
                message: format!(
                    "ear clipping failed for {} vertices, {} holes",
                    coords.len() / 2,
                    hole_starts.len()
                ),
            }
        })?;

        if indices.len() % 3 != 0 {
            return Err(GeometryError::Triangulation {
                message: format!("index count {} is not a multiple of 3", indices.len()),
            });
        }
        Ok(indices)
    }
}

impl<T: Triangulator + ?Sized> Triangulator for &T {
    fn triangulate(&self, coords: &[f64], hole_starts: &[usize]) -> GeometryResult<Vec<usize>> {
        (**self).triangulate(coords, hole_starts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle() {
        let indices = EarcutTriangulator
            .triangulate(&[0.0, 0.0, 1.0, 0.0, 0.0, 1.0], &[])
            .unwrap();
        assert_eq!(indices.len(), 3);
        let mut sorted = indices.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2]);
    }

    #[test]
    fn test_square_with_hole() {
        #[rustfmt::skip]
        let coords = [
            0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0,
            3.0, 3.0, 3.0, 7.0, 7.0, 7.0, 7.0, 3.0,
        ];
        let indices = EarcutTriangulator.triangulate(&coords, &[4]).unwrap();

        // A ring with one hole: n + 2h - 2 = 8 triangles
        assert_eq!(indices.len(), 8 * 3);
        assert!(indices.iter().all(|&i| i < 8));
    }

    #[test]
    fn test_degenerate_input() {
        // Colinear points enclose nothing
        let indices = EarcutTriangulator
            .triangulate(&[0.0, 0.0, 1.0, 0.0, 2.0, 0.0], &[])
            .unwrap_or_default();
        assert!(indices.is_empty());
    }
}
