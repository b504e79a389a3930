use serde::{Deserialize, Serialize};

use crate::geom::Point;

/// A reported segment crossing.
///
/// `i` and `j` are positions in the caller's original array (never post-sort
/// positions). For the self-tests (`single`) `i < j` always holds; for the
/// cross-tests (`double`) `i` indexes the first array and `j` the second, and
/// mirrored pairs are reported separately.
///
/// This is the one record shape that crosses the accelerated-backend
/// boundary. The engine-level entry points (`*_with`) accept a report closure
/// for callers that want a different shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Intersection {
    pub point: Point<f64>,
    pub i: usize,
    pub j: usize,
}

impl Intersection {
    pub fn new(point: Point<f64>, i: usize, j: usize) -> Self {
        Intersection { point, i, j }
    }
}
