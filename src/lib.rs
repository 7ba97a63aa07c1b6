//! # u-tsp
//!
//! Symmetric traveling salesman optimization over TSPLIB coordinate
//! instances: exact enumeration for small instances, constructive
//! heuristics, 2-opt local search, and genetic algorithms.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Node, Instance, Tour)
//! - [`distance`] — TSPLIB metrics, the [`DistanceOracle`](distance::DistanceOracle) trait, triangular distance matrix
//! - [`constructive`] — Canonical, nearest-neighbor, and random-walk tours
//! - [`local_search`] — 2-opt improvement
//! - [`exact`] — Full enumeration with a dimension guard and pause checkpoint
//! - [`ga`] — Genetic algorithm with OX or DPX + 2-opt (memetic)
//! - [`io`] — TSPLIB parser and result lines
//! - [`error`] — Error type shared by every module

pub mod constructive;
pub mod distance;
pub mod error;
pub mod exact;
pub mod ga;
pub mod io;
pub mod local_search;
pub mod models;

pub use error::{TspError, TspResult};
