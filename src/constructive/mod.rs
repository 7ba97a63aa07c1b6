//! Constructive heuristics for building initial tours.
//!
//! - [`canonical_tour`] — Identity order `1..=N`
//! - [`nearest_neighbor`] — Greedy nearest-unvisited-city walk, O(n²)
//! - [`random_walk`] — Uniform random visiting order, O(n)

mod nearest_neighbor;
mod random_walk;

pub use nearest_neighbor::nearest_neighbor;
pub use random_walk::random_walk;

use crate::error::TspResult;
use crate::models::Tour;

/// The closed identity tour `1..=n`, length not yet computed.
///
/// # Errors
///
/// [`TspError::Allocation`](crate::error::TspError::Allocation) if the tour
/// cannot be reserved.
pub fn canonical_tour(n: usize) -> TspResult<Tour> {
    Tour::try_with_dimension(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{tour_length, CoordinateOracle};
    use crate::models::Instance;

    #[test]
    fn test_canonical_square() {
        let inst = Instance::from_coords(
            "square",
            "EUC_2D",
            &[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)],
        );
        let tour = canonical_tour(4).expect("alloc");
        assert_eq!(tour.cities(), &[1, 2, 3, 4]);
        assert!(tour.is_closed());
        assert_eq!(tour_length(&CoordinateOracle::for_instance(&inst), &tour), 40.0);
    }

    #[test]
    fn test_canonical_empty() {
        assert!(canonical_tour(0).expect("alloc").is_empty());
    }
}
