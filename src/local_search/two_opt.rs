//! 2-opt improvement of a single tour.
//!
//! # Algorithm
//!
//! For each pair of edges (t[i], t[i+1]) and (t[k], t[k+1]) with
//! `0 ≤ i < n-2` and `i+2 ≤ k < n-1`, compare
//!
//! ```text
//! before = d(A, B) + d(C, D)      A = t[i], B = t[i+1]
//! after  = d(A, C) + d(B, D)      C = t[k], D = t[k+1]
//! ```
//!
//! If `after < before`, reverse the segment `t[i+1..=k]` and keep scanning
//! the same pass (first improvement within the pass). A full pass without
//! any reversal terminates the search.
//!
//! The return edge (t[n-1], t[0]) of a closed tour never takes part in a
//! move; it only counts toward the final length.
//!
//! # Complexity
//!
//! O(n²) per pass.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::distance::DistanceOracle;
use crate::error::{TspError, TspResult};
use crate::models::Tour;

/// Minimum gain for a reversal to count as an improvement.
const IMPROVEMENT_EPS: f64 = 1e-10;

/// Improves `tour` in place with 2-opt until no move in the neighborhood
/// shortens it, then caches and returns its length.
///
/// Open and closed tours are both accepted; the closed flag only affects the
/// reported length.
///
/// # Errors
///
/// [`TspError::InvalidArgument`] if the tour size differs from the oracle
/// dimension or the tour is not a permutation of `1..=N`.
///
/// # Examples
///
/// ```
/// use u_tsp::models::{Instance, Tour};
/// use u_tsp::distance::CoordinateOracle;
/// use u_tsp::local_search::two_opt;
///
/// let inst = Instance::from_coords("square", "EUC_2D", &[
///     (0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0),
/// ]);
/// let oracle = CoordinateOracle::for_instance(&inst);
///
/// // 1 → 3 → 2 → 4 crosses itself
/// let mut tour = Tour::new(vec![1, 3, 2, 4]);
/// let len = two_opt(&oracle, &mut tour).unwrap();
/// assert_eq!(len, 40.0);
/// assert_eq!(tour.length(), Some(40.0));
/// ```
pub fn two_opt<D: DistanceOracle + ?Sized>(oracle: &D, tour: &mut Tour) -> TspResult<f64> {
    let n = oracle.dimension();
    if tour.len() != n {
        return Err(TspError::InvalidArgument(format!(
            "tour has {} cities, instance has {}",
            tour.len(),
            n
        )));
    }
    if !tour.is_permutation() {
        return Err(TspError::InvalidArgument(format!(
            "tour {} is not a permutation of 1..={}",
            tour.compact(),
            n
        )));
    }

    let closed = tour.is_closed();
    let passes = improve_cities(oracle, tour.cities_mut());

    let length = oracle.path_length(tour.cities(), closed);
    tour.set_length(length);
    tracing::debug!(n, passes, length, "2-opt converged");
    Ok(length)
}

/// Runs 2-opt passes over a raw city slice until convergence.
///
/// Returns the number of passes performed (the last one made no change).
pub(crate) fn improve_cities<D: DistanceOracle + ?Sized>(oracle: &D, cities: &mut [usize]) -> usize {
    let n = cities.len();
    let mut passes = 0;
    if n < 4 {
        return passes;
    }

    let mut improved = true;
    while improved {
        improved = false;
        passes += 1;

        for i in 0..n - 2 {
            for k in i + 2..n - 1 {
                let delta = two_opt_delta(oracle, cities, i, k);
                if delta < -IMPROVEMENT_EPS {
                    cities[i + 1..=k].reverse();
                    improved = true;
                }
            }
        }
    }
    passes
}

/// Distance change from reversing `cities[i+1..=k]`.
fn two_opt_delta<D: DistanceOracle + ?Sized>(oracle: &D, cities: &[usize], i: usize, k: usize) -> f64 {
    let (a, b) = (cities[i], cities[i + 1]);
    let (c, d) = (cities[k], cities[k + 1]);

    let before = oracle.distance(a, b) + oracle.distance(c, d);
    let after = oracle.distance(a, c) + oracle.distance(b, d);

    after - before
}

/// Returns `true` if no move in the 2-opt neighborhood shortens `cities`.
pub fn is_two_opt_optimal<D: DistanceOracle + ?Sized>(oracle: &D, cities: &[usize]) -> bool {
    let n = cities.len();
    if n < 4 {
        return true;
    }
    (0..n - 2).all(|i| (i + 2..n - 1).all(|k| two_opt_delta(oracle, cities, i, k) >= -IMPROVEMENT_EPS))
}
