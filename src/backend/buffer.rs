//! The four flat-buffer entry points and the buffer layout they share.
//!
//! Segment buffers are stride-4: `(a.x, a.y, b.x, b.y)` per segment, or
//! `(nw.x, nw.y, se.x, se.y)` when the caller packed in ordered mode. Result
//! buffers are stride-4 as well: `(point.x, point.y, i, j)`, in the same
//! scalar type as the input; index slots round-trip losslessly through
//! either scalar. A trailing partial record in an input buffer is a caller
//! error and is ignored.

use log::trace;

use crate::geom::{OrderedSegment, Point};
use crate::num::Coord;
use crate::report::Intersection;
use crate::{brute as brute_engine, scan as scan_engine};

/// Slots per segment record.
pub const SEGMENT_STRIDE: usize = 4;
/// Slots per result record.
pub const RESULT_STRIDE: usize = 4;

/// Rebuilds engine segments from a flat buffer, tagging each with its
/// buffer position. `reorder` re-derives northwest order; skip it when the
/// buffer was packed ordered or when order doesn't matter (brute).
fn unpack_segments<T: Coord>(coords: &[T], reorder: bool) -> Vec<OrderedSegment<T>> {
    let mut segments = Vec::with_capacity(coords.len() / SEGMENT_STRIDE);
    for (idx, rec) in coords.chunks_exact(SEGMENT_STRIDE).enumerate() {
        let a = Point::new(rec[0], rec[1]);
        let b = Point::new(rec[2], rec[3]);
        segments.push(if reorder {
            OrderedSegment::new(a, b, idx)
        } else {
            OrderedSegment::assume_ordered(a, b, idx)
        });
    }
    segments
}

fn pack_results<T: Coord>(ixs: &[Intersection]) -> Vec<T> {
    let mut buf = Vec::with_capacity(ixs.len() * RESULT_STRIDE);
    for ix in ixs {
        buf.push(T::from_f64(ix.point.x));
        buf.push(T::from_f64(ix.point.y));
        buf.push(T::from_index(ix.i));
        buf.push(T::from_index(ix.j));
    }
    buf
}

/// Reconstructs intersection records from a result buffer.
pub fn unpack_results<T: Coord>(buf: &[T]) -> Vec<Intersection> {
    buf.chunks_exact(RESULT_STRIDE)
        .map(|rec| {
            Intersection::new(
                Point::new(rec[0].to_f64(), rec[1].to_f64()),
                rec[2].index(),
                rec[3].index(),
            )
        })
        .collect()
}

/// Brute scan over one flat segment buffer.
pub fn brute<T: Coord>(coords: &[T]) -> Vec<T> {
    let segments = unpack_segments(coords, false);
    trace!("buffer brute: {} segments", segments.len());
    pack_results(&brute_engine::single(&segments))
}

/// Brute scan over every pair across two flat segment buffers.
pub fn brute_double<T: Coord>(coords1: &[T], coords2: &[T]) -> Vec<T> {
    let segments1 = unpack_segments(coords1, false);
    let segments2 = unpack_segments(coords2, false);
    pack_results(&brute_engine::double(&segments1, &segments2))
}

/// Sorted pruning scan over one flat segment buffer.
///
/// `ordered` asserts each record is already `(nw, se)`; otherwise the order
/// is re-derived here. `already_sorted` additionally asserts the records are
/// ascending by northwest endpoint, skipping the internal sort — wrongly
/// asserting either is a caller error that silently under-reports.
pub fn sort<T: Coord>(coords: &[T], ordered: bool, already_sorted: bool) -> Vec<T> {
    let mut segments = unpack_segments(coords, !ordered);
    trace!(
        "buffer sort: {} segments, ordered={ordered}, already_sorted={already_sorted}",
        segments.len()
    );
    pack_results(&scan_engine::single(&mut segments, already_sorted))
}

/// Sorted pruning scan across two flat segment buffers.
pub fn sort_double<T: Coord>(
    coords1: &[T],
    coords2: &[T],
    ordered: bool,
    already_sorted: bool,
) -> Vec<T> {
    let mut segments1 = unpack_segments(coords1, !ordered);
    let mut segments2 = unpack_segments(coords2, !ordered);
    pack_results(&scan_engine::double(
        &mut segments1,
        &mut segments2,
        already_sorted,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    // The reference scenario, packed as raw buffers.
    const COORDS_I32: [i32; 12] = [
        2300, 1900, 4200, 1900, // s0
        2387, 1350, 2500, 2100, // s1
        2500, 2100, 2900, 2100, // s2
    ];

    fn coords_f64() -> Vec<f64> {
        COORDS_I32.iter().map(|&c| c as f64).collect()
    }

    #[test]
    fn brute_f64_buffer_round_trip() {
        let out = brute(&coords_f64());
        assert_eq!(out.len(), 2 * RESULT_STRIDE);
        // First record: crossing of s0 and s1.
        assert!((out[0] - 2469.866666666667).abs() < 1e-9);
        assert_eq!(out[1], 1900.0);
        assert_eq!((out[2], out[3]), (0.0, 1.0));
        // Second record: shared endpoint of s1 and s2.
        assert_eq!(&out[4..], &[2500.0, 2100.0, 1.0, 2.0]);
    }

    #[test]
    fn brute_i32_buffer_rounds_the_crossing() {
        let out = brute(&COORDS_I32[..]);
        assert_eq!(out, vec![2470, 1900, 0, 1, 2500, 2100, 1, 2]);
    }

    #[test]
    fn sort_unordered_buffer_reorders_internally() {
        // Pack s0 with endpoints reversed; ordered=false must still find
        // both crossings.
        let mut coords = coords_f64();
        coords.swap(0, 2);
        coords.swap(1, 3);
        let out = sort(&coords, false, false);
        assert_eq!(out.len(), 2 * RESULT_STRIDE);
        assert_eq!((out[2], out[3]), (0.0, 1.0));
        assert_eq!((out[6], out[7]), (1.0, 2.0));
    }

    #[test]
    fn sort_matches_brute_on_the_scenario() {
        let brute_out = brute(&coords_f64());
        let sort_out = sort(&coords_f64(), true, false);
        assert_eq!(brute_out, sort_out);
    }

    #[test]
    fn sort_double_i32_reports_mirrors() {
        let out = sort_double(&COORDS_I32[..], &COORDS_I32[..], true, false);
        let mut pairs: Vec<_> = out
            .chunks_exact(RESULT_STRIDE)
            .map(|rec| (rec[2], rec[3]))
            .collect();
        pairs.sort_unstable();
        assert_eq!(pairs, vec![(0, 1), (1, 0), (1, 2), (2, 1)]);
    }

    #[test]
    fn empty_buffer_yields_empty_results() {
        assert!(brute::<f64>(&[]).is_empty());
        assert!(sort::<i32>(&[], true, false).is_empty());
    }

    #[test]
    fn unpack_results_reconstructs_records() {
        let ixs = unpack_results(&[2500.0f64, 2100.0, 1.0, 2.0]);
        assert_eq!(ixs.len(), 1);
        assert_eq!(ixs[0].point, Point::new(2500.0, 2100.0));
        assert_eq!((ixs[0].i, ixs[0].j), (1, 2));
    }
}
