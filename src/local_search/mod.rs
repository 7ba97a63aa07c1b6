//! Local search operators for improving tours.
//!
//! - [`two_opt`] — Segment-reversal 2-opt, first improvement within a pass

mod two_opt;

pub(crate) use two_opt::improve_cities;
pub use two_opt::{is_two_opt_optimal, two_opt};
