//! Tour type.

use serde::{Deserialize, Serialize};

use crate::error::{TspError, TspResult};

/// An ordered visiting sequence of city ids.
///
/// A closed tour adds the return edge from the last city to the first. The
/// cached length is `None` until an engine computes it.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Tour;
///
/// let tour = Tour::canonical(4);
/// assert_eq!(tour.cities(), &[1, 2, 3, 4]);
/// assert!(tour.is_closed());
/// assert_eq!(tour.length(), None);
/// assert!(tour.is_permutation());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    cities: Vec<usize>,
    closed: bool,
    length: Option<f64>,
}

impl Tour {
    /// Creates a closed tour from a city sequence.
    pub fn new(cities: Vec<usize>) -> Self {
        Self {
            cities,
            closed: true,
            length: None,
        }
    }

    /// Creates an open tour (no return edge).
    pub fn open(cities: Vec<usize>) -> Self {
        Self {
            cities,
            closed: false,
            length: None,
        }
    }

    /// The identity tour `1..=n`, closed.
    pub fn canonical(n: usize) -> Self {
        Self::new((1..=n).collect())
    }

    /// Allocates a closed tour of `n` slots, filled with the identity.
    ///
    /// Reports [`TspError::Allocation`] instead of aborting when the buffer
    /// cannot be reserved.
    pub fn try_with_dimension(n: usize) -> TspResult<Self> {
        let mut cities = Vec::new();
        cities
            .try_reserve_exact(n)
            .map_err(|_| TspError::Allocation { what: "tour" })?;
        cities.extend(1..=n);
        Ok(Self::new(cities))
    }

    /// City ids in visiting order.
    pub fn cities(&self) -> &[usize] {
        &self.cities
    }

    /// Mutable city sequence. Invalidates the cached length.
    pub fn cities_mut(&mut self) -> &mut [usize] {
        self.length = None;
        &mut self.cities
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Returns `true` if the tour has no cities.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Whether the return edge counts toward the length.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Sets the closed flag. Invalidates the cached length.
    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
        self.length = None;
    }

    /// Cached total length, if computed.
    pub fn length(&self) -> Option<f64> {
        self.length
    }

    /// Stores a computed length.
    pub fn set_length(&mut self, length: f64) {
        self.length = Some(length);
    }

    /// Returns `true` if the cities are exactly a permutation of `1..=len`.
    pub fn is_permutation(&self) -> bool {
        is_permutation(&self.cities)
    }

    /// Comma-separated city list without spaces, bracketed: `[1,2,3]`.
    pub fn compact(&self) -> String {
        let body: Vec<String> = self.cities.iter().map(|c| c.to_string()).collect();
        format!("[{}]", body.join(","))
    }
}

/// Checks that `cities` is a permutation of `1..=cities.len()`.
pub fn is_permutation(cities: &[usize]) -> bool {
    let n = cities.len();
    let mut seen = vec![false; n + 1];
    for &c in cities {
        if c == 0 || c > n || seen[c] {
            return false;
        }
        seen[c] = true;
    }
    true
}
