//! Nearest-neighbor constructive heuristic.
//!
//! Builds a tour greedily: starting from a given city, always move to the
//! nearest unvisited city. Ties go to the lowest city id.
//!
//! # Complexity
//!
//! O(n²) where n = number of cities.
//!
//! # Reference
//!
//! This is the simplest constructive heuristic for the TSP. Tours are
//! typically 20-25% above optimal, which makes it a fast baseline and a
//! reasonable starting point for 2-opt.

use crate::distance::DistanceOracle;
use crate::error::{TspError, TspResult};
use crate::models::Tour;

/// Fills `tour` with a nearest-neighbor ordering from `start`, caches and
/// returns its length (the return edge counts only if the tour is closed).
///
/// A `start` outside `1..=N` falls back to city 1.
///
/// # Errors
///
/// [`TspError::InvalidArgument`] if the instance is empty or the tour size
/// differs from the oracle dimension.
///
/// # Examples
///
/// ```
/// use u_tsp::models::{Instance, Tour};
/// use u_tsp::distance::CoordinateOracle;
/// use u_tsp::constructive::nearest_neighbor;
///
/// let inst = Instance::from_coords("line", "EUC_2D", &[
///     (0.0, 0.0), (3.0, 0.0), (1.0, 0.0), (2.0, 0.0),
/// ]);
/// let oracle = CoordinateOracle::for_instance(&inst);
/// let mut tour = Tour::canonical(4);
///
/// let len = nearest_neighbor(&oracle, &mut tour, 1).unwrap();
/// assert_eq!(tour.cities(), &[1, 3, 4, 2]);
/// assert_eq!(len, 6.0);
/// ```
pub fn nearest_neighbor<D: DistanceOracle + ?Sized>(
    oracle: &D,
    tour: &mut Tour,
    start: usize,
) -> TspResult<f64> {
    let n = oracle.dimension();
    if n == 0 {
        return Err(TspError::InvalidArgument("empty instance".into()));
    }
    if tour.len() != n {
        return Err(TspError::InvalidArgument(format!(
            "tour has {} cities, instance has {}",
            tour.len(),
            n
        )));
    }
    let start = if (1..=n).contains(&start) { start } else { 1 };

    let mut visited = vec![false; n + 1];
    let closed = tour.is_closed();
    let cities = tour.cities_mut();

    let mut current = start;
    cities[0] = current;
    visited[current] = true;

    let mut length = 0.0;
    for slot in cities.iter_mut().skip(1) {
        // n - 1 slots after the start, n - 1 unvisited cities
        let best = oracle.nearest(current, &mut (1..=n).filter(|&j| !visited[j]));
        let Some((next, d)) = best else {
            break;
        };
        *slot = next;
        visited[next] = true;
        length += d;
        current = next;
    }

    if closed && n > 1 {
        length += oracle.distance(current, start);
    }

    tour.set_length(length);
    Ok(length)
}
