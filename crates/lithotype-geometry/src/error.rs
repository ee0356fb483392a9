//! Error types for the geometry pipeline.

use std::fmt;

/// Why a piece of geometry was rejected at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidGeometryReason {
    /// A polygon needs at least three points.
    TooFewPoints {
        /// Number of points that were supplied.
        count: usize,
    },
    /// A segment whose endpoints coincide.
    ZeroLengthSegment,
}

/// Errors that can occur while building or processing geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Geometry that cannot be represented (degenerate polygon or segment).
    InvalidGeometry {
        /// What was wrong with the input.
        reason: InvalidGeometryReason,
    },

    /// The triangulation primitive could not process a face.
    Triangulation {
        /// Description reported by the triangulator.
        message: String,
    },
}

impl GeometryError {
    pub(crate) fn too_few_points(count: usize) -> Self {
        GeometryError::InvalidGeometry {
            reason: InvalidGeometryReason::TooFewPoints { count },
        }
    }

    pub(crate) fn zero_length_segment() -> Self {
        GeometryError::InvalidGeometry {
            reason: InvalidGeometryReason::ZeroLengthSegment,
        }
    }

    /// Check whether this error reports invalid input geometry.
    pub fn is_invalid_geometry(&self) -> bool {
        matches!(self, GeometryError::InvalidGeometry { .. })
    }
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::InvalidGeometry { reason } => match reason {
                InvalidGeometryReason::TooFewPoints { count } => {
                    write!(f, "Invalid geometry: polygon needs at least 3 points, got {}", count)
                }
                InvalidGeometryReason::ZeroLengthSegment => {
                    write!(f, "Invalid geometry: zero-length segment")
                }
            },
            GeometryError::Triangulation { message } => {
                write!(f, "Triangulation failed: {}", message)
            }
        }
    }
}

impl std::error::Error for GeometryError {}

/// Result type alias for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_too_few_points() {
        let err = GeometryError::too_few_points(2);
        assert!(err.is_invalid_geometry());
        assert_eq!(
            err.to_string(),
            "Invalid geometry: polygon needs at least 3 points, got 2"
        );
    }

    #[test]
    fn test_triangulation_is_not_invalid_geometry() {
        let err = GeometryError::Triangulation {
            message: "no ears".to_string(),
        };
        assert!(!err.is_invalid_geometry());
    }
}
