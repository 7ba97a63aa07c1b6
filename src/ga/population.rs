//! Contiguous population arena.
//!
//! `size` permutation slots of `dimension` cities each live in one flat
//! buffer; slot `s` occupies `genes[s * dimension..(s + 1) * dimension]`.
//! Lengths are kept alongside and refreshed by [`Population::evaluate`].

use crate::distance::DistanceOracle;
use crate::error::{TspError, TspResult};

#[derive(Debug, Clone)]
pub(crate) struct Population {
    genes: Vec<usize>,
    lengths: Vec<f64>,
    size: usize,
    dimension: usize,
}

impl Population {
    /// Reserves an arena of `size` slots, each filled with zeros.
    pub(crate) fn try_new(size: usize, dimension: usize) -> TspResult<Self> {
        let total = size
            .checked_mul(dimension)
            .ok_or(TspError::Allocation { what: "population" })?;

        let mut genes = Vec::new();
        genes
            .try_reserve_exact(total)
            .map_err(|_| TspError::Allocation { what: "population" })?;
        genes.resize(total, 0);

        let mut lengths = Vec::new();
        lengths
            .try_reserve_exact(size)
            .map_err(|_| TspError::Allocation { what: "population" })?;
        lengths.resize(size, f64::INFINITY);

        Ok(Self {
            genes,
            lengths,
            size,
            dimension,
        })
    }

    pub(crate) fn slot(&self, s: usize) -> &[usize] {
        let start = s * self.dimension;
        &self.genes[start..start + self.dimension]
    }

    pub(crate) fn slot_mut(&mut self, s: usize) -> &mut [usize] {
        let start = s * self.dimension;
        &mut self.genes[start..start + self.dimension]
    }

    pub(crate) fn length(&self, s: usize) -> f64 {
        self.lengths[s]
    }

    pub(crate) fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    /// Overwrites slot `s` with `cities` and its known length.
    pub(crate) fn assign(&mut self, s: usize, cities: &[usize], length: f64) {
        self.slot_mut(s).copy_from_slice(cities);
        self.lengths[s] = length;
    }

    /// Recomputes every closed-tour length.
    pub(crate) fn evaluate<D: DistanceOracle + ?Sized>(&mut self, oracle: &D) {
        for s in 0..self.size {
            let start = s * self.dimension;
            let cities = &self.genes[start..start + self.dimension];
            self.lengths[s] = oracle.path_length(cities, true);
        }
    }

    /// First slot with the strictly smallest length.
    pub(crate) fn best_index(&self) -> usize {
        let mut best = 0;
        for s in 1..self.size {
            if self.lengths[s] < self.lengths[best] {
                best = s;
            }
        }
        best
    }

    /// First slot with the strictly largest length.
    pub(crate) fn worst_index(&self) -> usize {
        let mut worst = 0;
        for s in 1..self.size {
            if self.lengths[s] > self.lengths[worst] {
                worst = s;
            }
        }
        worst
    }

    /// Writes the slots of `self` into `dst` in ascending length order.
    ///
    /// Ranks with a selection sort, so equal lengths are ordered the way
    /// repeated min-and-swap leaves them.
    pub(crate) fn sort_into(&self, dst: &mut Population) {
        debug_assert_eq!(self.size, dst.size);
        debug_assert_eq!(self.dimension, dst.dimension);

        let mut order: Vec<usize> = (0..self.size).collect();
        for i in 0..self.size {
            let mut min = i;
            for j in i + 1..self.size {
                if self.lengths[order[j]] < self.lengths[order[min]] {
                    min = j;
                }
            }
            order.swap(i, min);
        }

        for (rank, &s) in order.iter().enumerate() {
            dst.assign(rank, self.slot(s), self.lengths[s]);
        }
    }
}
