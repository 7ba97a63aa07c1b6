//! Random walk tour construction.
//!
//! Starts from a uniformly random city and repeatedly moves to a uniformly
//! random unvisited city. The resulting order is a uniform random
//! permutation, drawn here with a Fisher-Yates shuffle.

use rand::Rng;

use crate::distance::DistanceOracle;
use crate::error::{TspError, TspResult};
use crate::models::Tour;

/// Fills `tour` with a random visiting order, caches and returns its length
/// (the return edge counts only if the tour is closed).
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
/// use u_tsp::constructive::random_walk;
///
/// let inst = Instance::from_coords("tri", "EUC_2D", &[(0.0, 0.0), (3.0, 0.0), (3.0, 4.0)]);
/// let oracle = CoordinateOracle::for_instance(&inst);
/// let mut tour = Tour::canonical(3);
/// let mut rng = u_numflow::random::create_rng(7);
///
/// // every closed tour over a triangle has the same perimeter
/// assert_eq!(random_walk(&oracle, &mut tour, &mut rng).unwrap(), 12.0);
/// assert!(tour.is_permutation());
/// ```
pub fn random_walk<D: DistanceOracle + ?Sized, R: Rng>(
    oracle: &D,
    tour: &mut Tour,
    rng: &mut R,
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

    let closed = tour.is_closed();
    let cities = tour.cities_mut();
    for (slot, id) in cities.iter_mut().zip(1..=n) {
        *slot = id;
    }
    u_numflow::random::shuffle(cities, rng);

    let length = oracle.path_length(tour.cities(), closed);
    tour.set_length(length);
    Ok(length)
}
