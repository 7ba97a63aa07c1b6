//! Exact search by full enumeration.
//!
//! - [`exact_search`] — Best and worst closed tours over any [`DistanceOracle`](crate::distance::DistanceOracle)
//! - [`exhaustive_search`] — Same enumeration over an arbitrary cost function
//! - [`ExactConfig`] — Dimension guard with explicit override
//! - [`PauseToken`] / [`PauseHandler`] — Cooperative pause checkpoint

mod pause;
mod permutation;
mod search;

pub use pause::{ExactProgress, Pause, PauseHandler, PauseToken};
pub use permutation::next_permutation;
pub use search::{
    exact_search, exact_search_guarded, exhaustive_search, ExactConfig, ExactResult,
    DEFAULT_MAX_DIMENSION,
};
