//! Closed polygons with cached derived properties.
//!
//! A [`Polygon2D`] is immutable once built. Area, bounds and the "no repeated
//! points" flag are computed lazily and cached; operations that derive a new
//! polygon decide per property whether the cached value still holds (reversal
//! negates the area, duplicate elimination keeps it) instead of recomputing.

use std::collections::VecDeque;
use std::sync::{Arc, OnceLock};

use lithotype_core::alloc::HashMap;
use lithotype_core::profiling::profile_function;

use crate::vector::point_key;
use crate::{GeometryError, GeometryResult, Line2D, Point2D, Rect2D, Segment2D, Vec2DExt};

/// Default cap on segment splits performed by [`Polygon2D::deintersect`].
pub const DEFAULT_SPLIT_LIMIT: usize = 512;

#[derive(Debug, Clone, Default)]
struct DerivedCache {
    signed_area: OnceLock<f64>,
    bounds: OnceLock<Rect2D>,
    no_repeated_points: OnceLock<bool>,
}

/// A closed contour of at least three points. The closing edge from the last
/// point back to the first is implied.
#[derive(Debug, Clone)]
pub struct Polygon2D {
    points: Arc<[Point2D]>,
    positive_y_is_up: bool,
    cache: DerivedCache,
}

impl PartialEq for Polygon2D {
    fn eq(&self, other: &Self) -> bool {
        self.positive_y_is_up == other.positive_y_is_up && self.points == other.points
    }
}

impl Polygon2D {
    /// Create a polygon in a y-up frame. Fails with `InvalidGeometry` below three points.
    pub fn new(points: impl Into<Arc<[Point2D]>>) -> GeometryResult<Self> {
        Self::with_orientation(points, true)
    }

    /// Create a polygon, stating whether positive y points up in its frame.
    ///
    /// The flag only changes how [`is_clockwise`](Self::is_clockwise) reads the
    /// signed area; every other property is frame independent.
    pub fn with_orientation(
        points: impl Into<Arc<[Point2D]>>,
        positive_y_is_up: bool,
    ) -> GeometryResult<Self> {
        let points = points.into();
        if points.len() < 3 {
            return Err(GeometryError::too_few_points(points.len()));
        }
        Ok(Self {
            points,
            positive_y_is_up,
            cache: DerivedCache::default(),
        })
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn positive_y_is_up(&self) -> bool {
        self.positive_y_is_up
    }

    /// Shoelace area, positive for counter-clockwise order in a y-up frame.
    pub fn signed_area(&self) -> f64 {
        *self.cache.signed_area.get_or_init(|| {
            let mut sum = 0.0;
            let mut last = self.points[self.points.len() - 1];
            for &pt in self.points.iter() {
                sum += last.x * pt.y - last.y * pt.x;
                last = pt;
            }
            sum / 2.0
        })
    }

    /// Enclosed area, never negative.
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Winding as seen in this polygon's frame (see [`positive_y_is_up`](Self::positive_y_is_up)).
    pub fn is_clockwise(&self) -> bool {
        if self.positive_y_is_up {
            self.signed_area() < 0.0
        } else {
            self.signed_area() > 0.0
        }
    }

    pub fn bounds(&self) -> Rect2D {
        *self.cache.bounds.get_or_init(|| {
            let first = self.points[0];
            self.points.iter().fold(
                Rect2D {
                    x1: first.x,
                    y1: first.y,
                    x2: first.x,
                    y2: first.y,
                },
                |r, p| Rect2D {
                    x1: r.x1.min(p.x),
                    y1: r.y1.min(p.y),
                    x2: r.x2.max(p.x),
                    y2: r.y2.max(p.y),
                },
            )
        })
    }

    /// Same polygon in the opposite direction.
    pub fn reversed(&self) -> Self {
        let points: Arc<[Point2D]> = self.points.iter().rev().copied().collect();
        let cache = DerivedCache::default();
        if let Some(area) = self.cache.signed_area.get() {
            let _ = cache.signed_area.set(-area);
        }
        if let Some(bounds) = self.cache.bounds.get() {
            let _ = cache.bounds.set(*bounds);
        }
        if let Some(flag) = self.cache.no_repeated_points.get() {
            let _ = cache.no_repeated_points.set(*flag);
        }
        Self {
            points,
            positive_y_is_up: self.positive_y_is_up,
            cache,
        }
    }

    pub fn make_cw(&self) -> Self {
        if self.is_clockwise() {
            self.clone()
        } else {
            self.reversed()
        }
    }

    pub fn make_ccw(&self) -> Self {
        if self.is_clockwise() {
            self.reversed()
        } else {
            self.clone()
        }
    }

    /// Apply `f` to every point. Nothing cached survives.
    pub fn map(&self, f: impl FnMut(Point2D) -> Point2D) -> Self {
        Self {
            points: self.points.iter().copied().map(f).collect(),
            positive_y_is_up: self.positive_y_is_up,
            cache: DerivedCache::default(),
        }
    }

    /// Copy of this polygon tagged with a different frame orientation.
    pub fn with_positive_y_is_up(&self, positive_y_is_up: bool) -> Self {
        Self {
            points: self.points.clone(),
            positive_y_is_up,
            cache: DerivedCache::default(),
        }
    }

    /// Drop every point equal to its successor (exact comparison).
    ///
    /// Fails with `InvalidGeometry` if fewer than three distinct points remain.
    pub fn eliminate_repeated_points(&self) -> GeometryResult<Self> {
        if self.cache.no_repeated_points.get() == Some(&true) {
            return Ok(self.clone());
        }

        let n = self.points.len();
        let unique: Vec<Point2D> = (0..n)
            .filter(|&i| self.points[i] != self.points[(i + 1) % n])
            .map(|i| self.points[i])
            .collect();

        if unique.len() == n {
            let _ = self.cache.no_repeated_points.set(true);
            return Ok(self.clone());
        }

        let poly = Self::with_orientation(unique, self.positive_y_is_up)?;
        // Zero-length edges add nothing to the shoelace sum or the bounds.
        if let Some(area) = self.cache.signed_area.get() {
            let _ = poly.cache.signed_area.set(*area);
        }
        if let Some(bounds) = self.cache.bounds.get() {
            let _ = poly.cache.bounds.set(*bounds);
        }
        let _ = poly.cache.no_repeated_points.set(true);
        Ok(poly)
    }

    /// Point-in-polygon test by crossing number. Points on an edge or vertex
    /// count as inside.
    pub fn contains(&self, point: Point2D) -> bool {
        if !self.bounds().contains_point(point) {
            return false;
        }

        let n = self.points.len();
        let mut inside = false;
        for i in 0..n {
            let a = self.points[(i + n - 1) % n];
            let b = self.points[i];

            if orientation(a, b, point) == Orientation::Colinear && on_segment(a, point, b) {
                return true;
            }

            // Half-open rule: a vertex exactly at the ray height is counted for
            // one of its two edges only, and horizontal edges never count.
            if (a.y > point.y) != (b.y > point.y) {
                let x_cross = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if point.x < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Bounding boxes overlap and at least one vertex of `other` lies inside `self`.
    pub fn intersects_poly(&self, other: &Polygon2D) -> bool {
        self.bounds().intersects(&other.bounds())
            && other.points.iter().any(|&p| self.contains(p))
    }

    /// `other`'s bounding box lies within ours and every vertex of `other` is inside `self`.
    pub fn contains_poly(&self, other: &Polygon2D) -> bool {
        self.bounds().contains(&other.bounds()) && other.points.iter().all(|&p| self.contains(p))
    }

    /// Offset every edge by `distance` towards the filled side and join
    /// consecutive offset edges at their intersection.
    ///
    /// Exact for convex polygons. Concave or sharp vertices, or a distance large
    /// relative to local feature size, produce a self-crossing result; see
    /// [`inset`](Self::inset) for the repaired version. Vertices whose adjacent
    /// edges are parallel are omitted.
    pub fn inset_simple(&self, distance: f64) -> GeometryResult<Self> {
        if distance == 0.0 {
            return Ok(self.clone());
        }

        let poly = self.eliminate_repeated_points()?;
        // Interior lies to the right of each edge for negative shoelace order.
        let d = if poly.signed_area() < 0.0 {
            distance
        } else {
            -distance
        };

        let offset_line = |p0: Point2D, p1: Point2D| {
            let v = p0.vector_to(p1);
            Line2D::new(p0 + v.right90().unit() * d, v)
        };

        let pts = poly.points();
        let n = pts.len();
        let mut inset = Vec::with_capacity(n);
        let mut omitted = 0usize;
        for i in 0..n {
            let p0 = pts[(i + n - 1) % n];
            let p1 = pts[i];
            let p2 = pts[(i + 1) % n];

            match offset_line(p0, p1).intersection(&offset_line(p1, p2)) {
                Some(p) => inset.push(p),
                None => omitted += 1,
            }
        }

        if omitted > 0 {
            tracing::debug!(omitted, points = n, "Inset omitted vertices with parallel edges");
        }

        Self::with_orientation(inset, self.positive_y_is_up)
    }

    /// Split a self-crossing polygon into simple loops, with the default split cap.
    pub fn deintersect(&self) -> Vec<Self> {
        self.deintersect_with_limit(DEFAULT_SPLIT_LIMIT)
    }

    /// Split every pair of crossing edges at their intersection, then cut each
    /// closed sub-loop (a stretch of the outline returning to an earlier point)
    /// out as its own polygon.
    ///
    /// Returns `[self]` when nothing was cut. After `split_limit` splits the
    /// repair stops and the loops found so far are returned.
    pub fn deintersect_with_limit(&self, split_limit: usize) -> Vec<Self> {
        profile_function!();

        let Ok(clean) = self.eliminate_repeated_points() else {
            return vec![self.clone()];
        };
        let Ok(segments) = Segment2D::closed_loop(clean.points()) else {
            return vec![self.clone()];
        };

        let mut ring = SegmentRing::new(segments);
        let splits = ring.split_crossings(split_limit);
        if splits >= split_limit {
            tracing::warn!(
                splits,
                points = self.len(),
                "Deintersect hit its split limit, returning partial result"
            );
        }

        let (main, loops) = cut_loops(ring.points());
        if loops.is_empty() {
            return vec![self.clone()];
        }

        std::iter::once(main)
            .chain(loops)
            .filter_map(|pts| match Self::with_orientation(pts, self.positive_y_is_up) {
                Ok(poly) => Some(poly),
                Err(err) => {
                    tracing::trace!("Dropping degenerate loop: {}", err);
                    None
                }
            })
            .collect()
    }

    /// Inset by `distance` and repair the result, keeping only pieces with the
    /// original winding and a non-zero area.
    pub fn inset(&self, distance: f64) -> Vec<Self> {
        profile_function!();

        let clockwise = self.is_clockwise();
        let simple = match self.inset_simple(distance) {
            Ok(poly) => poly,
            Err(err) => {
                tracing::warn!(points = self.len(), "Inset failed: {}", err);
                return Vec::new();
            }
        };

        simple
            .deintersect()
            .into_iter()
            .filter(|poly| poly.is_clockwise() == clockwise && poly.area() > 0.0)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    Colinear,
    Clockwise,
    CounterClockwise,
}

fn orientation(a: Point2D, b: Point2D, c: Point2D) -> Orientation {
    let cross = (b - a).perp_dot(c - a);
    if cross == 0.0 {
        Orientation::Colinear
    } else if cross > 0.0 {
        Orientation::CounterClockwise
    } else {
        Orientation::Clockwise
    }
}

/// For colinear `a`, `p`, `b`: whether `p` lies between `a` and `b`.
fn on_segment(a: Point2D, p: Point2D, b: Point2D) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Segment parameters closer than this to 0 or 1 are treated as endpoints.
const ENDPOINT_TOLERANCE: f64 = 1e-9;

fn is_interior(t: f64) -> bool {
    t > ENDPOINT_TOLERANCE && t < 1.0 - ENDPOINT_TOLERANCE
}

/// A closed chain of segments stored in an arena with prev/next links, so
/// splitting a segment never shifts the identity of any other segment.
struct SegmentRing {
    segments: Vec<Segment2D>,
    next: Vec<usize>,
    prev: Vec<usize>,
    alive: Vec<bool>,
    head: usize,
}

impl SegmentRing {
    fn new(segments: Vec<Segment2D>) -> Self {
        let n = segments.len();
        Self {
            segments,
            next: (0..n).map(|i| (i + 1) % n).collect(),
            prev: (0..n).map(|i| (i + n - 1) % n).collect(),
            alive: vec![true; n],
            head: 0,
        }
    }

    fn adjacent(&self, a: usize, b: usize) -> bool {
        self.next[a] == b || self.next[b] == a
    }

    /// Replace segment `idx` by two pieces meeting at `point`.
    fn split(&mut self, idx: usize, point: Point2D) -> Option<(usize, usize)> {
        let (first, second) = self.segments[idx].split_at_point(point)?;

        let ia = self.segments.len();
        let ib = ia + 1;
        let (before, after) = (self.prev[idx], self.next[idx]);

        self.segments.extend([first, second]);
        self.alive.extend([true, true]);
        self.next.extend([ib, after]);
        self.prev.extend([before, ia]);
        self.next[before] = ia;
        self.prev[after] = ib;
        self.alive[idx] = false;
        if self.head == idx {
            self.head = ia;
        }
        Some((ia, ib))
    }

    /// Work-list pass: every segment is checked against all live, non-adjacent
    /// segments; a crossing splits the crossing segments and queues the pieces.
    /// Returns the number of crossings split.
    fn split_crossings(&mut self, split_limit: usize) -> usize {
        let mut queue: VecDeque<usize> = (0..self.segments.len()).collect();
        let mut splits = 0;

        while let Some(a) = queue.pop_front() {
            if !self.alive[a] {
                continue;
            }
            if splits >= split_limit {
                break;
            }

            let seg_a = self.segments[a];
            let mut crossing = None;
            for b in 0..self.segments.len() {
                if b == a || !self.alive[b] || self.adjacent(a, b) {
                    continue;
                }
                let seg_b = self.segments[b];
                let Some((t, s)) = seg_a.intersection_ts(&seg_b) else {
                    continue;
                };

                // Parameters within tolerance of 0 or 1 count as endpoint hits:
                // two pieces of an earlier split meet at a shared vertex, which
                // must not be split again at a near-duplicate point.
                let interior_a = is_interior(t);
                let interior_b = is_interior(s);
                if !interior_a && !interior_b {
                    continue;
                }

                // Reuse an existing endpoint when there is one so both sides of
                // the crossing share a bit-identical vertex.
                let point = if !interior_a {
                    if t < 0.5 { seg_a.start() } else { seg_a.end() }
                } else if !interior_b {
                    if s < 0.5 { seg_b.start() } else { seg_b.end() }
                } else {
                    seg_a.point_at(t)
                };

                let split_a = if interior_a { self.split(a, point) } else { None };
                let split_b = if interior_b { self.split(b, point) } else { None };
                if split_a.is_none() && split_b.is_none() {
                    continue;
                }
                crossing = Some((split_a, split_b));
                break;
            }

            match crossing {
                Some((split_a, split_b)) => {
                    splits += 1;
                    for (first, second) in split_a.into_iter().chain(split_b) {
                        queue.push_back(first);
                        queue.push_back(second);
                    }
                    if self.alive[a] {
                        queue.push_front(a);
                    }
                }
                None => {
                    // No crossing with any live segment: settled.
                }
            }
        }

        splits
    }

    /// Start point of every live segment, in ring order from the head.
    fn points(&self) -> Vec<Point2D> {
        let live = self.alive.iter().filter(|&&a| a).count();
        let mut points = Vec::with_capacity(live);
        let mut idx = self.head;
        for _ in 0..live {
            points.push(self.segments[idx].start());
            idx = self.next[idx];
            if idx == self.head {
                break;
            }
        }
        points
    }
}

/// Walk the outline and cut out every stretch that returns to a point already
/// visited. Returns the remaining outline and the cut loops in discovery order.
fn cut_loops(points: Vec<Point2D>) -> (Vec<Point2D>, Vec<Vec<Point2D>>) {
    let mut stack: Vec<Point2D> = Vec::with_capacity(points.len());
    let mut seen: HashMap<(u64, u64), usize> = HashMap::new();
    let mut loops = Vec::new();

    for p in points {
        let key = point_key(p);
        if let Some(&k) = seen.get(&key) {
            let mut sub: Vec<Point2D> = stack.drain(k + 1..).collect();
            for q in &sub {
                seen.remove(&point_key(*q));
            }
            sub.push(p);
            loops.push(sub);
        } else {
            seen.insert(key, stack.len());
            stack.push(p);
        }
    }

    (stack, loops)
}
