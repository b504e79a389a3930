//! The accelerated-backend contract: flat-buffer entry points plus the
//! marshalling that gets segment arrays across that boundary.
//!
//! The backend knows nothing about [`Segment`](crate::geom::Segment) values;
//! it consumes flat, stride-4 coordinate buffers and produces flat, stride-4
//! result records, in whichever of the two numeric domains (`f64` or `i32`)
//! the caller picked. The functions in this module do the copy-based
//! marshalling: pack the caller's segments, invoke a [`buffer`] entry point,
//! unpack the records. [`zero_copy`] is the copy-free variant for the one
//! combination hot enough to deserve it.
//!
//! Choosing `i32` for fractional coordinates silently truncates; that is the
//! caller's tradeoff to make, not a condition the backend detects.

pub mod buffer;
pub mod zero_copy;

use log::debug;
use thiserror::Error;

use crate::geom::Segment;
use crate::num::Coord;
use crate::report::Intersection;

pub use zero_copy::ZeroCopyScan;

/// The numeric domain of a backend call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumericDomain {
    /// Full input precision; the general-purpose choice.
    F64,
    /// Exact integer predicates; for pre-quantized (pixel-snapped)
    /// coordinates only.
    I32,
}

/// Errors from the backend surface.
///
/// There are deliberately few of these: malformed buffers and wrong sort
/// assertions are contract violations that produce garbage results rather
/// than errors, and an empty result is not an error at all.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The zero-copy path only exists for the single-array `f64` sorted
    /// scan. There is no silent fallback to the copy path.
    #[error("zero-copy scan is not implemented for int32 buffers")]
    ZeroCopyInt32,
    /// See [`BackendError::ZeroCopyInt32`].
    #[error("zero-copy scan is not implemented for dual-array mode")]
    ZeroCopyDouble,
}

fn pack_unordered<T: Coord>(segments: &[Segment<T>]) -> Vec<T> {
    let mut buf = Vec::with_capacity(segments.len() * buffer::SEGMENT_STRIDE);
    for s in segments {
        buf.extend_from_slice(&[s.a.x, s.a.y, s.b.x, s.b.y]);
    }
    buf
}

fn pack_ordered<T: Coord>(segments: &[Segment<T>]) -> Vec<T> {
    let mut buf = Vec::with_capacity(segments.len() * buffer::SEGMENT_STRIDE);
    for s in segments {
        let (nw, se) = (s.nw(), s.se());
        buf.extend_from_slice(&[nw.x, nw.y, se.x, se.y]);
    }
    buf
}

/// Brute scan of one segment array through the flat-buffer boundary.
pub fn brute_single<T: Coord>(segments: &[Segment<T>]) -> Vec<Intersection> {
    let coords = pack_unordered(segments);
    let results = buffer::brute(&coords);
    debug!(
        "backend brute_single: {} segments, {} crossings",
        segments.len(),
        results.len() / buffer::RESULT_STRIDE
    );
    buffer::unpack_results(&results)
}

/// Brute scan of every pair across two arrays.
pub fn brute_double<T: Coord>(
    segments1: &[Segment<T>],
    segments2: &[Segment<T>],
) -> Vec<Intersection> {
    let coords1 = pack_unordered(segments1);
    let coords2 = pack_unordered(segments2);
    buffer::unpack_results(&buffer::brute_double(&coords1, &coords2))
}

/// Sorted pruning scan of one array. Segments are packed in northwest order
/// so the backend can prune without re-deriving it.
pub fn sort_single<T: Coord>(segments: &[Segment<T>]) -> Vec<Intersection> {
    let coords = pack_ordered(segments);
    let results = buffer::sort(&coords, true, false);
    debug!(
        "backend sort_single: {} segments, {} crossings",
        segments.len(),
        results.len() / buffer::RESULT_STRIDE
    );
    buffer::unpack_results(&results)
}

/// Sorted pruning scan across two arrays.
pub fn sort_double<T: Coord>(
    segments1: &[Segment<T>],
    segments2: &[Segment<T>],
) -> Vec<Intersection> {
    let coords1 = pack_ordered(segments1);
    let coords2 = pack_ordered(segments2);
    buffer::unpack_results(&buffer::sort_double(&coords1, &coords2, true, false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{Point, Segment};
    use crate::num::tests::Reasonable;
    use proptest::prelude::*;

    fn scenario<T: Coord>(make: impl Fn(f64) -> T) -> Vec<Segment<T>> {
        let seg = |ax, ay, bx, by| {
            Segment::new(
                Point::new(make(ax), make(ay)),
                Point::new(make(bx), make(by)),
            )
        };
        vec![
            seg(2300.0, 1900.0, 4200.0, 1900.0),
            seg(2387.0, 1350.0, 2500.0, 2100.0),
            seg(2500.0, 2100.0, 2900.0, 2100.0),
        ]
    }

    fn pairs(ixs: &[Intersection]) -> Vec<(usize, usize)> {
        let mut out: Vec<_> = ixs.iter().map(|ix| (ix.i, ix.j)).collect();
        out.sort_unstable();
        out
    }

    #[test]
    fn all_copy_paths_agree_on_the_scenario() {
        let f = scenario(|x| x);
        let i = scenario(|x| x as i32);

        let expected = vec![(0, 1), (1, 2)];
        assert_eq!(pairs(&brute_single(&f)), expected);
        assert_eq!(pairs(&sort_single(&f)), expected);
        assert_eq!(pairs(&brute_single(&i)), expected);
        assert_eq!(pairs(&sort_single(&i)), expected);

        let expected_double = vec![(0, 1), (1, 0), (1, 2), (2, 1)];
        assert_eq!(pairs(&brute_double(&f, &f)), expected_double);
        assert_eq!(pairs(&sort_double(&f, &f)), expected_double);
        assert_eq!(pairs(&brute_double(&i, &i)), expected_double);
        assert_eq!(pairs(&sort_double(&i, &i)), expected_double);
    }

    #[test]
    fn f64_results_preserve_fractional_crossings() {
        let ixs = sort_single(&scenario(|x| x));
        assert!((ixs[0].point.x - 2469.866666666667).abs() < 1e-9);
        assert_eq!(ixs[0].point.y, 1900.0);
    }

    #[test]
    fn i32_results_round_fractional_crossings() {
        // The documented precision tradeoff of the integer domain.
        let ixs = sort_single(&scenario(|x| x as i32));
        assert_eq!(ixs[0].point, Point::new(2470.0, 1900.0));
        assert_eq!(ixs[1].point, Point::new(2500.0, 2100.0));
    }

    proptest! {
        // For integer-valued coordinates the two numeric domains must report
        // exactly the same pairs.
        #[test]
        fn f64_and_i32_backends_report_identical_pairs(
            segments in proptest::collection::vec(Segment::<i32>::reasonable(), 0..30),
        ) {
            let as_f64: Vec<Segment<f64>> = segments
                .iter()
                .map(|s| Segment::new(
                    Point::new(s.a.x as f64, s.a.y as f64),
                    Point::new(s.b.x as f64, s.b.y as f64),
                ))
                .collect();
            prop_assert_eq!(pairs(&brute_single(&as_f64)), pairs(&brute_single(&segments)));
            prop_assert_eq!(pairs(&sort_single(&as_f64)), pairs(&sort_single(&segments)));
        }
    }
}
