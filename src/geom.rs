use std::cmp::Ordering;

use malachite::Rational;
use serde::{Deserialize, Serialize};

use crate::num::{Coord, Orientation};

/// A 2D point. Points are ordered by `x` and then by `y`, matching the
/// northwest-to-southeast sweep direction of the pruning scan.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Point<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

impl<T> Point<T> {
    pub fn new(x: T, y: T) -> Self {
        Point { x, y }
    }
}

impl<T> From<(T, T)> for Point<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

impl<T: Coord> Point<T> {
    /// Compares by `x`, breaking ties by `y`. The point that compares smaller
    /// is the more "northwest" of the two.
    pub fn nwse_cmp(&self, other: &Self) -> Ordering {
        self.x
            .total_cmp(other.x)
            .then_with(|| self.y.total_cmp(other.y))
    }

    pub fn to_f64(&self) -> Point<f64> {
        Point::new(self.x.to_f64(), self.y.to_f64())
    }

    pub fn to_exact(&self) -> Point<Rational> {
        Point {
            x: self.x.to_exact(),
            y: self.y.to_exact(),
        }
    }
}

/// A segment as the caller built it, with its original `a -> b` orientation
/// preserved.
///
/// The engine never mutates endpoints; the derived northwest/southeast
/// endpoints are recomputed on every access rather than cached, so there is
/// no stale-cache hazard if the caller rebuilds a segment.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment<T> {
    pub a: Point<T>,
    pub b: Point<T>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Segment<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} -- {:?}", self.a, self.b)
    }
}

impl<T: Coord> Segment<T> {
    pub fn new(a: impl Into<Point<T>>, b: impl Into<Point<T>>) -> Self {
        Segment {
            a: a.into(),
            b: b.into(),
        }
    }

    /// The endpoint that compares first under [`Point::nwse_cmp`].
    pub fn nw(&self) -> Point<T> {
        match self.a.nwse_cmp(&self.b) {
            Ordering::Greater => self.b,
            _ => self.a,
        }
    }

    /// The endpoint that compares last under [`Point::nwse_cmp`].
    pub fn se(&self) -> Point<T> {
        match self.a.nwse_cmp(&self.b) {
            Ordering::Greater => self.a,
            _ => self.b,
        }
    }
}

/// A segment prepared for the intersection engine: `start` is northwest of
/// `end` (when built through [`OrderedSegment::new`]), and `idx` remembers
/// the position of the segment in the caller's original array.
///
/// The ordering is applied once, at construction. There is deliberately no
/// way to move an endpoint afterward.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderedSegment<T: Coord> {
    pub start: Point<T>,
    pub end: Point<T>,
    pub idx: usize,
}

impl<T: Coord> std::fmt::Debug for OrderedSegment<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s_{} {:?} -- {:?}", self.idx, self.start, self.end)
    }
}

impl<T: Coord> OrderedSegment<T> {
    /// Builds an ordered segment, swapping the endpoints into northwest order
    /// if necessary.
    pub fn new(a: impl Into<Point<T>>, b: impl Into<Point<T>>, idx: usize) -> Self {
        let (a, b) = (a.into(), b.into());
        let (start, end) = match a.nwse_cmp(&b) {
            Ordering::Greater => (b, a),
            _ => (a, b),
        };
        OrderedSegment { start, end, idx }
    }

    /// Builds a segment from endpoints that are either already in northwest
    /// order, or whose order doesn't matter (the brute path never looks at
    /// it). Skips the comparison.
    pub fn assume_ordered(start: impl Into<Point<T>>, end: impl Into<Point<T>>, idx: usize) -> Self {
        OrderedSegment {
            start: start.into(),
            end: end.into(),
            idx,
        }
    }

    pub fn from_segment(seg: &Segment<T>, idx: usize) -> Self {
        Self::new(seg.a, seg.b, idx)
    }

    /// The sort order of the pruning scan: by northwest endpoint.
    pub fn nwse_cmp(&self, other: &Self) -> Ordering {
        self.start.nwse_cmp(&other.start)
    }

    /// True if this segment lies entirely northwest of `other`: even its
    /// southeast end comes before `other` begins.
    pub fn is_northwest_of(&self, other: &Self) -> bool {
        self.end.nwse_cmp(&other.start) == Ordering::Less
    }

    /// True if this segment lies entirely southeast of `other`.
    pub fn is_southeast_of(&self, other: &Self) -> bool {
        self.start.nwse_cmp(&other.end) == Ordering::Greater
    }

    /// The boundary test: do the two closed segments meet?
    ///
    /// Shared endpoints count as an intersection; collinear overlaps do not.
    /// Callers wanting a different boundary policy can swap this out through
    /// the `_with` engine entry points.
    pub fn intersects(&self, other: &Self) -> bool {
        let (a, b) = (self.start, self.end);
        let (c, d) = (other.start, other.end);

        let xa = T::orient2d(a, b, c);
        let xb = T::orient2d(a, b, d);

        // Either an overlapping collinear pair or no crossing at all; the
        // line-crossing computation has no single point to report either way.
        if xa == Orientation::Collinear && xb == Orientation::Collinear {
            return false;
        }

        let xc = T::orient2d(c, d, a);
        let xd = T::orient2d(c, d, b);

        xa != xb && xc != xd
    }

    /// Where the infinite lines through the two segments cross. Pair with
    /// [`OrderedSegment::intersects`] to get the segment intersection point.
    pub fn cross_point(&self, other: &Self) -> Option<Point<f64>> {
        T::line_cross(self.start, self.end, other.start, other.end)
    }
}

/// Exact crossing of the infinite lines through `a -> b` and `c -> d`,
/// computed in rational arithmetic. `None` means the lines are parallel.
///
/// This is the reference the floating-point and integer paths are checked
/// against; it is far too slow for bulk use.
pub fn exact_line_cross(
    a: &Point<Rational>,
    b: &Point<Rational>,
    c: &Point<Rational>,
    d: &Point<Rational>,
) -> Option<Point<Rational>> {
    let d1x = &b.x - &a.x;
    let d1y = &b.y - &a.y;
    let d2x = &d.x - &c.x;
    let d2y = &d.y - &c.y;

    let denom = &d1x * &d2y - &d1y * &d2x;
    if denom == 0 {
        return None;
    }

    let t = ((&c.x - &a.x) * &d2y - (&c.y - &a.y) * &d2x) / denom;
    Some(Point {
        x: &a.x + &t * d1x,
        y: &a.y + t * d1y,
    })
}
