//! Path primitives for glyph outlines.
//!
//! A path is a sequence of drawing commands in font design units, as produced
//! by a glyph source.

use crate::{Point2D, Rect2D};

/// A command in a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Move to a new position without drawing. Starts a new contour.
    MoveTo(Point2D),
    /// Draw a line to a position.
    LineTo(Point2D),
    /// Draw a quadratic Bezier curve.
    QuadTo {
        /// Control point
        control: Point2D,
        /// End point
        to: Point2D,
    },
    /// Draw a cubic Bezier curve.
    CubicTo {
        /// First control point
        control1: Point2D,
        /// Second control point
        control2: Point2D,
        /// End point
        to: Point2D,
    },
    /// Close the current contour. The pen returns to the contour start.
    Close,
}

impl PathCommand {
    /// End point of the command, if it moves the pen explicitly.
    pub fn end_point(&self) -> Option<Point2D> {
        match *self {
            PathCommand::MoveTo(to)
            | PathCommand::LineTo(to)
            | PathCommand::QuadTo { to, .. }
            | PathCommand::CubicTo { to, .. } => Some(to),
            PathCommand::Close => None,
        }
    }
}

/// A 2D path consisting of drawing commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    /// Create a new empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a path from a list of commands.
    pub fn from_commands(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    /// Get the commands in this path.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Get the number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Number of contours, counting every `MoveTo`.
    pub fn contour_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, PathCommand::MoveTo(_)))
            .count()
    }

    /// Conservative bounding box: control points are included.
    pub fn bounds(&self) -> Option<Rect2D> {
        let mut points = Vec::with_capacity(self.commands.len() * 2);
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(to) | PathCommand::LineTo(to) => points.push(to),
                PathCommand::QuadTo { control, to } => points.extend([control, to]),
                PathCommand::CubicTo {
                    control1,
                    control2,
                    to,
                } => points.extend([control1, control2, to]),
                PathCommand::Close => {}
            }
        }
        Rect2D::from_points(&points)
    }
}

impl FromIterator<PathCommand> for Path {
    fn from_iter<I: IntoIterator<Item = PathCommand>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

/// Builder for constructing paths.
#[derive(Debug, Default)]
pub struct PathBuilder {
    commands: Vec<PathCommand>,
    current_pos: Point2D,
    subpath_start: Point2D,
}

impl PathBuilder {
    /// Create a new path builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to a new position without drawing.
    pub fn move_to(&mut self, to: Point2D) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(to));
        self.current_pos = to;
        self.subpath_start = to;
        self
    }

    /// Draw a line to a position.
    pub fn line_to(&mut self, to: Point2D) -> &mut Self {
        self.commands.push(PathCommand::LineTo(to));
        self.current_pos = to;
        self
    }

    /// Draw a quadratic Bezier curve.
    pub fn quad_to(&mut self, control: Point2D, to: Point2D) -> &mut Self {
        self.commands.push(PathCommand::QuadTo { control, to });
        self.current_pos = to;
        self
    }

    /// Draw a cubic Bezier curve.
    pub fn cubic_to(&mut self, control1: Point2D, control2: Point2D, to: Point2D) -> &mut Self {
        self.commands.push(PathCommand::CubicTo {
            control1,
            control2,
            to,
        });
        self.current_pos = to;
        self
    }

    /// Close the current sub-path.
    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self.current_pos = self.subpath_start;
        self
    }

    /// Add an axis-aligned rectangle, counter-clockwise in a y-up frame.
    pub fn rect(&mut self, position: Point2D, size: Point2D) -> &mut Self {
        self.move_to(position);
        self.line_to(position + Point2D::new(size.x, 0.0));
        self.line_to(position + size);
        self.line_to(position + Point2D::new(0.0, size.y));
        self.close()
    }

    /// Add a closed polygon.
    pub fn polygon(&mut self, points: &[Point2D]) -> &mut Self {
        let Some((&first, rest)) = points.split_first() else {
            return self;
        };

        self.move_to(first);
        for &point in rest {
            self.line_to(point);
        }
        self.close()
    }

    /// Get the current position.
    pub fn current_pos(&self) -> Point2D {
        self.current_pos
    }

    /// Build the path.
    pub fn build(&mut self) -> Path {
        Path {
            commands: std::mem::take(&mut self.commands),
        }
    }
}
