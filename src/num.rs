//! A thin abstraction over the two coordinate types we support.

use std::cmp::Ordering;

use malachite::Rational;
use ordered_float::OrderedFloat;

use crate::geom::Point;

/// The result of the orientation predicate: the turn direction of the
/// triangle `a`, `b`, `c`.
///
/// Only equality between orientations matters to the intersection test, so
/// callers should not rely on which winding we call "counterclockwise" --
/// the host's y-axis may point either way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Clockwise,
    Collinear,
    CounterClockwise,
}

/// A trait for abstracting over the properties we need from coordinate types.
///
/// This is implemented for `f64` (general-purpose; preserves whatever
/// precision the caller had) and `i32` (exact predicates; intended for
/// pixel-snapped coordinates).
pub trait Coord:
    Sized + Copy + PartialEq + PartialOrd + std::fmt::Debug + serde::Serialize + 'static
{
    /// A total order on coordinates, used as the sort key for the pruning
    /// scan. For `f64` this is the `ordered-float` order, so a buffer
    /// containing NaNs sorts deterministically instead of panicking.
    fn total_cmp(self, other: Self) -> Ordering;

    /// The orientation of `c` relative to the directed line `a -> b`.
    fn orient2d(a: Point<Self>, b: Point<Self>, c: Point<Self>) -> Orientation;

    /// The crossing of the infinite lines through `a -> b` and `c -> d`, or
    /// `None` if the lines are parallel (including collinear overlaps).
    ///
    /// The result is always an `f64` point: for `i32` inputs the quotient is
    /// computed exactly in wide integers and only the final division rounds.
    fn line_cross(
        a: Point<Self>,
        b: Point<Self>,
        c: Point<Self>,
        d: Point<Self>,
    ) -> Option<Point<f64>>;

    fn to_f64(self) -> f64;

    /// Converts back from `f64`, rounding to the nearest representable value.
    /// This is where the `i32` result buffers lose fractional crossings.
    fn from_f64(x: f64) -> Self;

    /// An array index encoded as a coordinate, for the index slots of result
    /// buffers. Lossless for any segment count a flat buffer can hold.
    fn from_index(idx: usize) -> Self;

    /// Decodes an index slot written by [`Coord::from_index`].
    fn index(self) -> usize;

    fn to_exact(self) -> Rational;
}

impl Coord for f64 {
    fn total_cmp(self, other: Self) -> Ordering {
        OrderedFloat(self).cmp(&OrderedFloat(other))
    }

    fn orient2d(a: Point<Self>, b: Point<Self>, c: Point<Self>) -> Orientation {
        let coord = |p: Point<f64>| robust::Coord { x: p.x, y: p.y };
        let det = robust::orient2d(coord(a), coord(b), coord(c));
        if det > 0.0 {
            Orientation::CounterClockwise
        } else if det < 0.0 {
            Orientation::Clockwise
        } else {
            Orientation::Collinear
        }
    }

    fn line_cross(
        a: Point<Self>,
        b: Point<Self>,
        c: Point<Self>,
        d: Point<Self>,
    ) -> Option<Point<f64>> {
        let d1x = b.x - a.x;
        let d1y = b.y - a.y;
        let d2x = d.x - c.x;
        let d2y = d.y - c.y;

        let x_dnm = d1y * d2x - d2y * d1x;
        if x_dnm == 0.0 {
            return None;
        }
        let y_dnm = d1x * d2y - d2x * d1y;
        if y_dnm == 0.0 {
            return None;
        }

        let x_num = a.x * d1y * d2x - c.x * d2y * d1x + c.y * d1x * d2x - a.y * d1x * d2x;
        let y_num = a.y * d1x * d2y - c.y * d2x * d1y + c.x * d1y * d2y - a.x * d1y * d2y;

        Some(Point::new(x_num / x_dnm, y_num / y_dnm))
    }

    fn to_f64(self) -> f64 {
        self
    }

    fn from_f64(x: f64) -> Self {
        x
    }

    fn from_index(idx: usize) -> Self {
        idx as f64
    }

    fn index(self) -> usize {
        self as usize
    }

    fn to_exact(self) -> Rational {
        self.try_into().unwrap()
    }
}

impl Coord for i32 {
    fn total_cmp(self, other: Self) -> Ordering {
        self.cmp(&other)
    }

    fn orient2d(a: Point<Self>, b: Point<Self>, c: Point<Self>) -> Orientation {
        // Coordinate differences don't fit in i32 and their products don't
        // fit in i64, so widen all the way up front.
        let (ax, ay) = (i128::from(a.x), i128::from(a.y));
        let (bx, by) = (i128::from(b.x), i128::from(b.y));
        let (cx, cy) = (i128::from(c.x), i128::from(c.y));

        let det = (bx - ax) * (cy - ay) - (by - ay) * (cx - ax);
        match det.cmp(&0) {
            Ordering::Greater => Orientation::CounterClockwise,
            Ordering::Less => Orientation::Clockwise,
            Ordering::Equal => Orientation::Collinear,
        }
    }

    fn line_cross(
        a: Point<Self>,
        b: Point<Self>,
        c: Point<Self>,
        d: Point<Self>,
    ) -> Option<Point<f64>> {
        let (ax, ay) = (i128::from(a.x), i128::from(a.y));
        let (bx, by) = (i128::from(b.x), i128::from(b.y));
        let (cx, cy) = (i128::from(c.x), i128::from(c.y));
        let (dx, dy) = (i128::from(d.x), i128::from(d.y));

        let d1x = bx - ax;
        let d1y = by - ay;
        let d2x = dx - cx;
        let d2y = dy - cy;

        let x_dnm = d1y * d2x - d2y * d1x;
        if x_dnm == 0 {
            return None;
        }
        let y_dnm = d1x * d2y - d2x * d1y;
        if y_dnm == 0 {
            return None;
        }

        let x_num = ax * d1y * d2x - cx * d2y * d1x + cy * d1x * d2x - ay * d1x * d2x;
        let y_num = ay * d1x * d2y - cy * d2x * d1y + cx * d1y * d2y - ax * d1y * d2y;

        // Split into an exact integer quotient plus a small fractional part
        // so the conversion to f64 only rounds once.
        let x = (x_num.div_euclid(x_dnm) as f64) + (x_num.rem_euclid(x_dnm) as f64 / x_dnm as f64);
        let y = (y_num.div_euclid(y_dnm) as f64) + (y_num.rem_euclid(y_dnm) as f64 / y_dnm as f64);

        Some(Point::new(x, y))
    }

    fn to_f64(self) -> f64 {
        self.into()
    }

    fn from_f64(x: f64) -> Self {
        x.round() as i32
    }

    fn from_index(idx: usize) -> Self {
        idx as i32
    }

    fn index(self) -> usize {
        self as usize
    }

    fn to_exact(self) -> Rational {
        Rational::from(self)
    }
}
