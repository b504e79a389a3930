//! Pairwise line-segment crossing detection.
//!
//! Given one or two arrays of 2D segments, report every intersecting pair
//! with its crossing point and the segments' positions in the caller's
//! original arrays. Two engines share one pair test:
//!
//! - [`brute`]: the exhaustive O(n²) scan, in single-array and dual-array
//!   modes.
//! - [`scan`]: the sorted pruning scan — sort by northwest endpoint, then
//!   skip candidates that end too early and stop at the first that starts
//!   too late. Same results, far fewer pair tests on distributed inputs.
//!
//! Both engines run in either of two numeric domains: `f64` (keeps the
//! caller's precision) or `i32` (exact predicates for pixel-snapped
//! coordinates). The [`backend`] module is the flat-buffer contract for
//! feeding segments through an accelerated boundary, including a zero-copy
//! variant for the sorted `f64` case.
//!
//! Everything is synchronous and stateless between calls; the one mutation
//! the engine performs is the documented in-place sort/re-index of the
//! sorted scan's input.

pub mod backend;
pub mod brute;
pub mod geom;
pub mod num;
pub mod report;
pub mod scan;

pub use backend::{BackendError, NumericDomain, ZeroCopyScan};
pub use geom::{OrderedSegment, Point, Segment};
pub use num::{Coord, Orientation};
pub use report::Intersection;
