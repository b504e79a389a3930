//! Exhaustive all-pairs intersection testing.
//!
//! No pruning at all: every candidate pair is handed to the test closure.
//! This is the baseline the sorted scan is checked against, and it wins for
//! small inputs where sorting overhead dominates.

use crate::geom::{OrderedSegment, Point};
use crate::num::Coord;
use crate::report::Intersection;

/// The default pair test: the orientation-based boundary check followed by
/// the line-crossing computation. Shared endpoints report; collinear
/// overlaps do not.
pub fn default_test<T: Coord>(
    s1: &OrderedSegment<T>,
    s2: &OrderedSegment<T>,
) -> Option<Point<f64>> {
    if !s1.intersects(s2) {
        return None;
    }
    s1.cross_point(s2)
}

/// Tests every unordered pair in `segments`, reporting each crossing once
/// with `i < j`. O(n²) tests.
pub fn single<T: Coord>(segments: &[OrderedSegment<T>]) -> Vec<Intersection> {
    single_with(segments, default_test, |point, i, j, _, _| {
        Intersection::new(point, i, j)
    })
}

/// Like [`single`], with an injectable pair test and report factory.
pub fn single_with<T, Test, Report, R>(
    segments: &[OrderedSegment<T>],
    mut test: Test,
    mut report: Report,
) -> Vec<R>
where
    T: Coord,
    Test: FnMut(&OrderedSegment<T>, &OrderedSegment<T>) -> Option<Point<f64>>,
    Report: FnMut(Point<f64>, usize, usize, &OrderedSegment<T>, &OrderedSegment<T>) -> R,
{
    let mut results = Vec::new();
    for (i, si) in segments.iter().enumerate() {
        // Pairs with earlier segments were already tested.
        for (j, sj) in segments.iter().enumerate().skip(i + 1) {
            if let Some(ix) = test(si, sj) {
                results.push(report(ix, i, j, si, sj));
            }
        }
    }
    results
}

/// Tests the full cross product of the two arrays: every `(i, j)` with
/// `i` in the first array and `j` in the second. No deduplication happens,
/// even if both arguments are the same array.
pub fn double<T: Coord>(
    segments1: &[OrderedSegment<T>],
    segments2: &[OrderedSegment<T>],
) -> Vec<Intersection> {
    double_with(segments1, segments2, default_test, |point, i, j, _, _| {
        Intersection::new(point, i, j)
    })
}

/// Like [`double`], with an injectable pair test and report factory.
pub fn double_with<T, Test, Report, R>(
    segments1: &[OrderedSegment<T>],
    segments2: &[OrderedSegment<T>],
    mut test: Test,
    mut report: Report,
) -> Vec<R>
where
    T: Coord,
    Test: FnMut(&OrderedSegment<T>, &OrderedSegment<T>) -> Option<Point<f64>>,
    Report: FnMut(Point<f64>, usize, usize, &OrderedSegment<T>, &OrderedSegment<T>) -> R,
{
    let mut results = Vec::new();
    for (i, si) in segments1.iter().enumerate() {
        for (j, sj) in segments2.iter().enumerate() {
            if let Some(ix) = test(si, sj) {
                results.push(report(ix, i, j, si, sj));
            }
        }
    }
    results
}
