//! Distance oracle abstraction.
//!
//! Every engine is generic over [`DistanceOracle`], so the same search code
//! runs against raw coordinates ([`CoordinateOracle`]) or the precomputed
//! triangular cache ([`DistanceMatrix`](super::DistanceMatrix)).

use super::metric::{select_distance, Metric};
use crate::models::{Instance, Tour};

/// Pairwise distances over 1-based city ids.
pub trait DistanceOracle {
    /// Number of cities.
    fn dimension(&self) -> usize;

    /// Distance between cities `i` and `j` (1-based). Zero when `i == j`.
    fn distance(&self, i: usize, j: usize) -> f64;

    /// Returns the candidate nearest to `from` with its distance, first one
    /// on ties.
    ///
    /// Returns `None` if `candidates` is exhausted.
    fn nearest(
        &self,
        from: usize,
        candidates: &mut dyn Iterator<Item = usize>,
    ) -> Option<(usize, f64)> {
        candidates
            .map(|c| (c, self.distance(from, c)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Length of a city sequence, with the return edge when `closed` and
    /// more than one city.
    fn path_length(&self, cities: &[usize], closed: bool) -> f64 {
        if cities.is_empty() {
            return 0.0;
        }
        let mut total: f64 = cities
            .windows(2)
            .map(|w| self.distance(w[0], w[1]))
            .sum();
        if closed && cities.len() > 1 {
            total += self.distance(cities[cities.len() - 1], cities[0]);
        }
        total
    }
}

/// Computes a tour's total length, respecting its closed flag.
///
/// # Examples
///
/// ```
/// use u_tsp::models::{Instance, Tour};
/// use u_tsp::distance::{tour_length, CoordinateOracle};
///
/// let inst = Instance::from_coords("square", "EUC_2D", &[
///     (0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0),
/// ]);
/// let oracle = CoordinateOracle::for_instance(&inst);
/// assert_eq!(tour_length(&oracle, &Tour::canonical(4)), 40.0);
/// assert_eq!(tour_length(&oracle, &Tour::open(vec![1, 2, 3, 4])), 30.0);
/// ```
pub fn tour_length<D: DistanceOracle + ?Sized>(oracle: &D, tour: &Tour) -> f64 {
    oracle.path_length(tour.cities(), tour.is_closed())
}

/// Distances computed on demand from instance coordinates.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateOracle<'a> {
    instance: &'a Instance,
    metric: Metric,
}

impl<'a> CoordinateOracle<'a> {
    /// Pairs an instance with an explicit formula.
    pub fn new(instance: &'a Instance, metric: Metric) -> Self {
        Self { instance, metric }
    }

    /// Pairs an instance with the formula named by its edge-weight-type tag.
    pub fn for_instance(instance: &'a Instance) -> Self {
        Self::new(instance, select_distance(instance))
    }

    /// The underlying instance.
    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    /// The formula in use.
    pub fn metric(&self) -> Metric {
        self.metric
    }
}

impl DistanceOracle for CoordinateOracle<'_> {
    fn dimension(&self) -> usize {
        self.instance.dimension()
    }

    fn distance(&self, i: usize, j: usize) -> f64 {
        if i == j {
            return 0.0;
        }
        self.metric
            .distance(self.instance.node(i), self.instance.node(j))
    }
}
