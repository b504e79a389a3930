//! End-to-end agreement between every path through the crate: the two
//! engines, the copy-based backend in both numeric domains, and the
//! zero-copy scan. All of them must report the same crossing pairs for the
//! same input.

use proptest::prelude::*;

use crossings::{backend, brute, scan, NumericDomain, OrderedSegment, Point, Segment, ZeroCopyScan};

/// Integer-valued segments on a canvas-sized grid, so the `i32` domain is
/// exact and the `f64` domain has nothing to round.
fn grid_segments() -> impl Strategy<Value = Vec<Segment<i32>>> {
    let point = (0..2048i32, 0..2048i32).prop_map(Point::from);
    let segment = (point.clone(), point).prop_map(|(a, b)| Segment { a, b });
    proptest::collection::vec(segment, 0..30)
}

fn to_f64(segments: &[Segment<i32>]) -> Vec<Segment<f64>> {
    segments
        .iter()
        .map(|s| {
            Segment::new(
                Point::new(f64::from(s.a.x), f64::from(s.a.y)),
                Point::new(f64::from(s.b.x), f64::from(s.b.y)),
            )
        })
        .collect()
}

fn ordered<T: crossings::Coord>(segments: &[Segment<T>]) -> Vec<OrderedSegment<T>> {
    segments
        .iter()
        .enumerate()
        .map(|(idx, s)| OrderedSegment::from_segment(s, idx))
        .collect()
}

fn pairs(ixs: &[crossings::Intersection]) -> Vec<(usize, usize)> {
    let mut out: Vec<_> = ixs.iter().map(|ix| (ix.i, ix.j)).collect();
    out.sort_unstable();
    out
}

fn zero_copy_pairs(segments: &[Segment<f64>]) -> Vec<(usize, usize)> {
    let mut zc = ZeroCopyScan::request(NumericDomain::F64, false, segments.len())
        .expect("single-array f64 is the supported combination");
    for (idx, s) in segments.iter().enumerate() {
        zc.write_segment(idx, s, idx);
    }
    zc.run(false);
    pairs(&zc.unpack())
}

proptest! {
    #[test]
    fn every_path_reports_the_same_pairs(segments in grid_segments()) {
        let as_f64 = to_f64(&segments);

        let reference = pairs(&brute::single(&ordered(&as_f64)));

        let mut sortable = ordered(&as_f64);
        prop_assert_eq!(pairs(&scan::single(&mut sortable, false)), reference.clone());

        prop_assert_eq!(pairs(&backend::brute_single(&as_f64)), reference.clone());
        prop_assert_eq!(pairs(&backend::sort_single(&as_f64)), reference.clone());
        prop_assert_eq!(pairs(&backend::brute_single(&segments)), reference.clone());
        prop_assert_eq!(pairs(&backend::sort_single(&segments)), reference.clone());
        prop_assert_eq!(zero_copy_pairs(&as_f64), reference);
    }

    #[test]
    fn double_paths_agree_and_cover_the_cross_product(
        segments1 in grid_segments(),
        segments2 in grid_segments(),
    ) {
        let f1 = to_f64(&segments1);
        let f2 = to_f64(&segments2);

        let reference = pairs(&brute::double(&ordered(&f1), &ordered(&f2)));

        let mut sortable1 = ordered(&f1);
        let mut sortable2 = ordered(&f2);
        prop_assert_eq!(
            pairs(&scan::double(&mut sortable1, &mut sortable2, false)),
            reference.clone()
        );
        prop_assert_eq!(pairs(&backend::brute_double(&f1, &f2)), reference.clone());
        prop_assert_eq!(pairs(&backend::sort_double(&f1, &f2)), reference.clone());
        prop_assert_eq!(pairs(&backend::sort_double(&segments1, &segments2)), reference);
    }

    #[test]
    fn repeated_runs_from_fresh_arrays_are_deterministic(segments in grid_segments()) {
        let as_f64 = to_f64(&segments);
        let mut first_input = ordered(&as_f64);
        let mut second_input = ordered(&as_f64);
        let first = scan::single(&mut first_input, false);
        let second = scan::single(&mut second_input, false);
        prop_assert_eq!(first, second);
    }
}
