//! The zero-copy variant of the sorted scan.
//!
//! Instead of packing a separate coordinate buffer, the caller asks the
//! backend for memory sized for its segments and writes them straight into
//! it through a bounds-checked view. Results land in a second backend-owned
//! region laid out as a one-slot count header followed by stride-4 records;
//! the read-back view is sized from the header, so a zero count never
//! exposes the uninitialized remainder of the region.
//!
//! Only the single-array, `f64`, sorted combination is implemented. The
//! dual-array and `i32` combinations fail fast at request time; they do not
//! fall back to the copy path.

use log::debug;

use crate::backend::{BackendError, NumericDomain};
use crate::geom::{OrderedSegment, Point, Segment};
use crate::num::Coord;
use crate::report::Intersection;
use crate::scan;

/// Slots per segment in the input region: four coordinates plus the
/// original-index slot, which survives the internal sort.
pub const SEGMENT_SLOTS: usize = 5;
/// Slots per record in the result region.
pub const RESULT_STRIDE: usize = 4;
/// Slots before the first result record.
pub const COUNT_HEADER_SLOTS: usize = 1;

/// Backend-owned memory for one zero-copy sorted scan.
///
/// Lifecycle: [`request`](ZeroCopyScan::request) the memory, fill the
/// [`segments_mut`](ZeroCopyScan::segments_mut) view (or use
/// [`write_segment`](ZeroCopyScan::write_segment)), [`run`](ZeroCopyScan::run),
/// then read [`results`](ZeroCopyScan::results) or
/// [`unpack`](ZeroCopyScan::unpack). The regions stay owned by the scan
/// value; callers only ever see bounded views into them.
#[derive(Debug)]
pub struct ZeroCopyScan {
    coords: Vec<f64>,
    results: Vec<f64>,
    count: usize,
}

impl ZeroCopyScan {
    /// Requests backend memory for `count` segments.
    ///
    /// Fails fast for the unsupported combinations: `i32` buffers and
    /// dual-array mode.
    pub fn request(
        domain: NumericDomain,
        double: bool,
        count: usize,
    ) -> Result<Self, BackendError> {
        match (domain, double) {
            (NumericDomain::I32, _) => Err(BackendError::ZeroCopyInt32),
            (NumericDomain::F64, true) => Err(BackendError::ZeroCopyDouble),
            (NumericDomain::F64, false) => Ok(ZeroCopyScan {
                coords: vec![0.0; count * SEGMENT_SLOTS],
                results: Vec::new(),
                count,
            }),
        }
    }

    pub fn segment_count(&self) -> usize {
        self.count
    }

    /// The writable view over the input region: `count` records of
    /// [`SEGMENT_SLOTS`] slots, `(nw.x, nw.y, se.x, se.y, idx)` each.
    pub fn segments_mut(&mut self) -> &mut [f64] {
        &mut self.coords
    }

    /// Writes one segment record. `slot` is the record position; the
    /// segment's endpoints are put in northwest order and `idx` should be
    /// its position in the caller's original array.
    ///
    /// # Panics
    /// Panics if `slot` is out of range, like any slice write.
    pub fn write_segment(&mut self, slot: usize, segment: &Segment<f64>, idx: usize) {
        let (nw, se) = (segment.nw(), segment.se());
        let base = slot * SEGMENT_SLOTS;
        self.coords[base..base + SEGMENT_SLOTS].copy_from_slice(&[
            nw.x,
            nw.y,
            se.x,
            se.y,
            f64::from_index(idx),
        ]);
    }

    /// Runs the sorted scan over the written segments.
    ///
    /// Endpoint order within each record is trusted as written. With
    /// `already_sorted` the records are additionally trusted to be ascending
    /// by northwest endpoint; otherwise they are sorted here (the index
    /// slots travel with their records). Returns the number of crossings,
    /// which is also what the result header will read.
    pub fn run(&mut self, already_sorted: bool) -> usize {
        let mut segments: Vec<OrderedSegment<f64>> = self
            .coords
            .chunks_exact(SEGMENT_SLOTS)
            .map(|rec| {
                OrderedSegment::assume_ordered(
                    Point::new(rec[0], rec[1]),
                    Point::new(rec[2], rec[3]),
                    rec[4].index(),
                )
            })
            .collect();
        if !already_sorted {
            segments.sort_unstable_by(|a, b| a.nwse_cmp(b));
        }

        // The index slots are authoritative, so run with already_sorted
        // asserted; re-indexing here would clobber them.
        let ixs = scan::single(&mut segments, true);
        debug!(
            "zero-copy sort: {} segments, {} crossings",
            self.count,
            ixs.len()
        );

        let mut results = Vec::with_capacity(COUNT_HEADER_SLOTS + ixs.len() * RESULT_STRIDE);
        results.push(ixs.len() as f64);
        for ix in &ixs {
            results.extend_from_slice(&[
                ix.point.x,
                ix.point.y,
                f64::from_index(ix.i),
                f64::from_index(ix.j),
            ]);
        }
        self.results = results;
        ixs.len()
    }

    /// The result records, sized from the count header. Empty before
    /// [`run`](ZeroCopyScan::run), and empty without touching the rest of
    /// the region when the header reads zero.
    pub fn results(&self) -> &[f64] {
        match self.results.first() {
            None => &[],
            Some(&header) if header == 0.0 => &[],
            Some(&header) => {
                let len = header as usize * RESULT_STRIDE;
                &self.results[COUNT_HEADER_SLOTS..COUNT_HEADER_SLOTS + len]
            }
        }
    }

    /// Reconstructs intersection records from the result region.
    pub fn unpack(&self) -> Vec<Intersection> {
        self.results()
            .chunks_exact(RESULT_STRIDE)
            .map(|rec| {
                Intersection::new(Point::new(rec[0], rec[1]), rec[2].index(), rec[3].index())
            })
            .collect()
    }
}
