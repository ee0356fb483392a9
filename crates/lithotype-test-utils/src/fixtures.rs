//! Polygon fixtures.

use std::f64::consts::TAU;

use lithotype_geometry::{Point2D, Polygon2D};

/// Axis-aligned square with its lower-left corner at `(x, y)`,
/// counter-clockwise with y up.
pub fn square(x: f64, y: f64, size: f64) -> Polygon2D {
    rect(x, y, size, size)
}

/// Axis-aligned rectangle, counter-clockwise with y up.
pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Polygon2D {
    polygon(&[
        (x, y),
        (x + width, y),
        (x + width, y + height),
        (x, y + height),
    ])
}

/// Regular polygon around the origin, counter-clockwise with y up.
pub fn regular_polygon(sides: usize, radius: f64) -> Polygon2D {
    let sides = sides.max(3);
    let points: Vec<Point2D> = (0..sides)
        .map(|i| {
            let angle = TAU * i as f64 / sides as f64;
            Point2D::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect();
    match Polygon2D::new(points) {
        Ok(polygon) => polygon,
        Err(err) => panic!("regular polygon fixture: {err}"),
    }
}

/// Polygon from coordinate pairs. Panics with fewer than three points.
pub fn polygon(points: &[(f64, f64)]) -> Polygon2D {
    let points: Vec<Point2D> = points.iter().map(|&(x, y)| Point2D::new(x, y)).collect();
    match Polygon2D::new(points) {
        Ok(polygon) => polygon,
        Err(err) => panic!("polygon fixture: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_winding() {
        assert!(!square(0.0, 0.0, 1.0).is_clockwise());
        assert!((rect(0.0, 0.0, 2.0, 3.0).area() - 6.0).abs() < 1e-12);
        let hexagon = regular_polygon(6, 1.0);
        assert_eq!(hexagon.len(), 6);
        assert!(!hexagon.is_clockwise());
    }
}
