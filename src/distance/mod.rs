//! Distance formulas, the oracle abstraction, and the triangular cache.
//!
//! - [`Metric`] — TSPLIB formula chosen from an edge-weight-type tag
//! - [`DistanceOracle`] — pairwise distance over 1-based city ids
//! - [`CoordinateOracle`] — distances computed from instance coordinates
//! - [`DistanceMatrix`] — precomputed upper-triangle cache

mod matrix;
mod metric;
mod oracle;

pub use matrix::DistanceMatrix;
pub use metric::{select_distance, Metric, GEO_RADIUS_KM};
pub use oracle::{tour_length, CoordinateOracle, DistanceOracle};
