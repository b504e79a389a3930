//! The sorted pruning scan.
//!
//! Segments are sorted by their northwest endpoint; the inner loop then skips
//! candidates that end before the current segment begins and stops at the
//! first candidate that begins after the current segment ends. This is an
//! interval-overlap filter over x, not a true sweep line: if every segment
//! spans the whole x range it degrades to the brute O(n²) scan, but
//! well-distributed inputs only pay for the pairs whose x-intervals overlap.
//!
//! Two documented in-place side effects: unless the caller asserts
//! `already_sorted`, each segment's `idx` is overwritten with its original
//! position and the slice is reordered. Results always carry original
//! positions.

use crate::brute::default_test;
use crate::geom::{OrderedSegment, Point};
use crate::num::Coord;
use crate::report::Intersection;

fn reindex_and_sort<T: Coord>(segments: &mut [OrderedSegment<T>]) {
    for (idx, s) in segments.iter_mut().enumerate() {
        s.idx = idx;
    }
    segments.sort_unstable_by(|a, b| a.nwse_cmp(b));
}

/// Finds all crossings within one array. Reported indices are the original
/// positions, normalized so `i < j`.
///
/// With `already_sorted` the caller asserts the slice is already ascending by
/// northwest endpoint *and* that each `idx` is correct; the engine does not
/// verify this, and a wrong assertion silently under-reports.
pub fn single<T: Coord>(
    segments: &mut [OrderedSegment<T>],
    already_sorted: bool,
) -> Vec<Intersection> {
    single_with(segments, already_sorted, default_test, |point, i, j, _, _| {
        Intersection::new(point, i, j)
    })
}

/// Like [`single`], with an injectable pair test and report factory.
pub fn single_with<T, Test, Report, R>(
    segments: &mut [OrderedSegment<T>],
    already_sorted: bool,
    mut test: Test,
    mut report: Report,
) -> Vec<R>
where
    T: Coord,
    Test: FnMut(&OrderedSegment<T>, &OrderedSegment<T>) -> Option<Point<f64>>,
    Report: FnMut(Point<f64>, usize, usize, &OrderedSegment<T>, &OrderedSegment<T>) -> R,
{
    if !already_sorted {
        reindex_and_sort(segments);
    }
    let segments = &*segments;

    let mut results = Vec::new();
    for (i, si) in segments.iter().enumerate() {
        for sj in &segments[(i + 1)..] {
            // Candidate ends before si begins; later candidates may still
            // reach si, so keep scanning.
            if sj.is_northwest_of(si) {
                continue;
            }

            // Candidate begins after si ends. The array is sorted by start,
            // so every later candidate does too.
            if sj.is_southeast_of(si) {
                break;
            }

            if let Some(ix) = test(si, sj) {
                let (i, j, s1, s2) = if si.idx <= sj.idx {
                    (si.idx, sj.idx, si, sj)
                } else {
                    (sj.idx, si.idx, sj, si)
                };
                results.push(report(ix, i, j, s1, s2));
            }
        }
    }
    results
}

/// Finds all crossings between two arrays, pruning with the same skip/break
/// rules. Both arrays are re-indexed and sorted in place unless
/// `already_sorted`. `i` indexes the first array and `j` the second; passing
/// the same segments as both arrays therefore reports each crossing twice,
/// once per orientation.
pub fn double<T: Coord>(
    segments1: &mut [OrderedSegment<T>],
    segments2: &mut [OrderedSegment<T>],
    already_sorted: bool,
) -> Vec<Intersection> {
    double_with(
        segments1,
        segments2,
        already_sorted,
        default_test,
        |point, i, j, _, _| Intersection::new(point, i, j),
    )
}

/// Like [`double`], with an injectable pair test and report factory.
pub fn double_with<T, Test, Report, R>(
    segments1: &mut [OrderedSegment<T>],
    segments2: &mut [OrderedSegment<T>],
    already_sorted: bool,
    mut test: Test,
    mut report: Report,
) -> Vec<R>
where
    T: Coord,
    Test: FnMut(&OrderedSegment<T>, &OrderedSegment<T>) -> Option<Point<f64>>,
    Report: FnMut(Point<f64>, usize, usize, &OrderedSegment<T>, &OrderedSegment<T>) -> R,
{
    if !already_sorted {
        reindex_and_sort(segments1);
        reindex_and_sort(segments2);
    }
    let segments1 = &*segments1;
    let segments2 = &*segments2;

    let mut results = Vec::new();
    for si in segments1 {
        for sj in segments2 {
            if sj.is_northwest_of(si) {
                continue;
            }
            if sj.is_southeast_of(si) {
                break;
            }
            if let Some(ix) = test(si, sj) {
                results.push(report(ix, si.idx, sj.idx, si, sj));
            }
        }
    }
    results
}
