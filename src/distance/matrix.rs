//! Triangular distance matrix.

use super::oracle::DistanceOracle;
use crate::error::{TspError, TspResult};

/// A compact symmetric distance cache storing only the upper triangle.
///
/// Row `i` (0-based) holds the `N - 1 - i` distances from city `i + 1` to
/// cities `i + 2..=N`, laid out contiguously, so the whole cache is
/// `N(N-1)/2` values. Lookups are symmetric and the diagonal is zero.
///
/// Built once in O(N²) from any [`DistanceOracle`] and immutable afterwards;
/// it implements [`DistanceOracle`] itself, so every engine can run on it.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Instance;
/// use u_tsp::distance::{CoordinateOracle, DistanceMatrix, DistanceOracle};
///
/// let inst = Instance::from_coords("tri", "EUC_2D", &[(0.0, 0.0), (3.0, 4.0), (6.0, 8.0)]);
/// let dm = DistanceMatrix::build(&CoordinateOracle::for_instance(&inst)).unwrap();
/// assert_eq!(dm.get(1, 2), 5.0);
/// assert_eq!(dm.get(3, 1), 10.0);
/// assert_eq!(dm.get(2, 2), 0.0);
/// assert_eq!(dm.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Precomputes every pairwise distance of `oracle`.
    ///
    /// Returns [`TspError::Allocation`] if the triangle cannot be reserved.
    pub fn build<D: DistanceOracle + ?Sized>(oracle: &D) -> TspResult<Self> {
        let size = oracle.dimension();
        let entries = triangle_len(size);

        let mut data = Vec::new();
        data.try_reserve_exact(entries)
            .map_err(|_| TspError::Allocation {
                what: "distance matrix",
            })?;

        for i in 1..size {
            for j in (i + 1)..=size {
                data.push(oracle.distance(i, j));
            }
        }

        tracing::debug!(size, entries, "built triangular distance matrix");
        Ok(Self { data, size })
    }

    /// Distance between cities `i` and `j` (1-based), in either order.
    ///
    /// # Panics
    ///
    /// Panics if either id is outside `1..=size` (unless `i == j`).
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if i == j {
            return 0.0;
        }
        let (a, b) = if i < j { (i - 1, j - 1) } else { (j - 1, i - 1) };
        self.data[row_offset(self.size, a) + (b - a - 1)]
    }

    /// Number of cities covered.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of stored distances.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if no distances are stored (fewer than two cities).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl DistanceOracle for DistanceMatrix {
    fn dimension(&self) -> usize {
        self.size
    }

    fn distance(&self, i: usize, j: usize) -> f64 {
        self.get(i, j)
    }
}

fn triangle_len(size: usize) -> usize {
    size * size.saturating_sub(1) / 2
}

/// Index of the first entry of 0-based row `a`.
fn row_offset(size: usize, a: usize) -> usize {
    a * (size - 1) - a * a.saturating_sub(1) / 2
}
