//! Exhaustive enumeration of visiting orders.
//!
//! Every ordering of `1..=n` is visited with [`next_permutation`], starting
//! from the identity. No city is fixed, so rotations and reflections of the
//! same cycle are evaluated separately; the search is `O(n · n!)` and is only
//! practical for small instances (see [`ExactConfig`]).

use serde::{Deserialize, Serialize};

use super::pause::{ExactProgress, Pause};
use super::permutation::next_permutation;
use crate::distance::DistanceOracle;
use crate::error::{TspError, TspResult};
use crate::models::Tour;

/// Default dimension above which exact search needs an explicit override.
pub const DEFAULT_MAX_DIMENSION: usize = 12;

/// Guard policy for exact search.
///
/// # Examples
///
/// ```
/// use u_tsp::exact::ExactConfig;
///
/// let config = ExactConfig::default();
/// assert!(config.check(12).is_ok());
/// assert!(config.check(13).unwrap_err().is_refusal());
/// assert!(config.with_force(true).check(13).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExactConfig {
    /// Largest dimension enumerated without `force`.
    pub max_dimension: usize,
    /// Enumerate regardless of dimension.
    pub force: bool,
}

impl Default for ExactConfig {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            force: false,
        }
    }
}

impl ExactConfig {
    /// Sets the refusal threshold.
    pub fn with_max_dimension(mut self, max_dimension: usize) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    /// Sets the override flag.
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Returns [`TspError::PolicyRefusal`] if a search over `n` cities is not
    /// allowed under this policy.
    pub fn check(&self, n: usize) -> TspResult<()> {
        if n > self.max_dimension && !self.force {
            return Err(TspError::PolicyRefusal {
                dimension: n,
                limit: self.max_dimension,
            });
        }
        Ok(())
    }
}

/// Shortest and longest closed tours found by an exact search.
#[derive(Debug, Clone, PartialEq)]
pub struct ExactResult {
    /// First ordering with the minimum length.
    pub best: Tour,
    /// First ordering with the maximum length.
    pub worst: Tour,
    /// Number of orderings evaluated (`n!`).
    pub evaluated: u64,
}

/// Enumerates all orderings of `1..=n`, scoring each with `cost`.
///
/// Best and worst start at the identity and are replaced only on strict
/// improvement, so ties keep the lexicographically first ordering. When a
/// `pause` is supplied its token is polled after every ordering.
///
/// # Errors
///
/// - [`TspError::InvalidArgument`] if `n == 0`.
/// - [`TspError::Allocation`] if a working buffer cannot be reserved.
pub fn exhaustive_search<C>(
    n: usize,
    mut cost: C,
    mut pause: Option<Pause<'_>>,
) -> TspResult<ExactResult>
where
    C: FnMut(&[usize]) -> f64,
{
    if n == 0 {
        return Err(TspError::InvalidArgument("empty instance".into()));
    }

    let mut current = identity(n)?;
    let mut best = identity(n)?;
    let mut worst = identity(n)?;

    let mut best_length = cost(current.as_slice());
    let mut worst_length = best_length;
    let mut evaluated: u64 = 1;

    while next_permutation(&mut current) {
        let length = cost(current.as_slice());
        evaluated += 1;

        if length < best_length {
            best_length = length;
            best.copy_from_slice(&current);
            tracing::debug!(evaluated, length, "new best ordering");
        }
        if length > worst_length {
            worst_length = length;
            worst.copy_from_slice(&current);
        }

        if let Some(p) = pause.as_mut() {
            p.poll(|| ExactProgress {
                best_length,
                worst_length,
                evaluated,
            });
        }
    }

    tracing::info!(n, evaluated, best_length, worst_length, "exact search complete");

    let mut best = Tour::new(best);
    best.set_length(best_length);
    let mut worst = Tour::new(worst);
    worst.set_length(worst_length);
    Ok(ExactResult {
        best,
        worst,
        evaluated,
    })
}

/// Exact search over any distance oracle, scoring closed tours.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Instance;
/// use u_tsp::distance::CoordinateOracle;
/// use u_tsp::exact::exact_search;
///
/// let inst = Instance::from_coords("square", "EUC_2D", &[
///     (0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0),
/// ]);
/// let result = exact_search(&CoordinateOracle::for_instance(&inst), None).unwrap();
/// assert_eq!(result.best.length(), Some(40.0));
/// assert_eq!(result.evaluated, 24);
/// ```
pub fn exact_search<D: DistanceOracle + ?Sized>(
    oracle: &D,
    pause: Option<Pause<'_>>,
) -> TspResult<ExactResult> {
    exhaustive_search(
        oracle.dimension(),
        |cities| oracle.path_length(cities, true),
        pause,
    )
}

/// [`exact_search`] behind the [`ExactConfig`] guard.
///
/// # Errors
///
/// [`TspError::PolicyRefusal`] before any enumeration if the dimension is
/// above the threshold and `force` is off; otherwise as [`exhaustive_search`].
pub fn exact_search_guarded<D: DistanceOracle + ?Sized>(
    oracle: &D,
    config: &ExactConfig,
    pause: Option<Pause<'_>>,
) -> TspResult<ExactResult> {
    config.check(oracle.dimension())?;
    exact_search(oracle, pause)
}

fn identity(n: usize) -> TspResult<Vec<usize>> {
    let mut v = Vec::new();
    v.try_reserve_exact(n)
        .map_err(|_| TspError::Allocation {
            what: "exact search buffer",
        })?;
    v.extend(1..=n);
    Ok(v)
}
