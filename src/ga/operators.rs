//! Permutation operators for the tour GA.
//!
//! # Operators
//!
//! - **Crossover**: Order crossover (OX) and distance-preserving crossover
//!   (DPX)
//! - **Mutation**: Swap of two distinct positions
//! - **Selection**: Tournament with replacement over slot lengths
//!
//! # Reference
//!
//! Freisleben, B. & Merz, P. (1996). "A genetic local search algorithm for
//! solving symmetric and asymmetric traveling salesman problems",
//! *Proc. IEEE Int. Conf. on Evolutionary Computation*, 616-621.

use rand::Rng;
use u_metaheur::ga::{Individual, Selection};

use crate::distance::DistanceOracle;

/// Fills `dst` with a uniformly random permutation of `1..=dst.len()`.
pub fn random_permutation<R: Rng>(dst: &mut [usize], rng: &mut R) {
    for (slot, id) in dst.iter_mut().zip(1..) {
        *slot = id;
    }
    u_numflow::random::shuffle(dst, rng);
}

/// Order crossover (OX).
///
/// A random segment `[start, end]` of `p1` is copied to the same positions of
/// `child`. The remaining positions, starting right after `end` and wrapping,
/// receive the cities of `p2` in `p2`'s order, skipping those already placed.
///
/// # Examples
///
/// ```
/// use u_tsp::ga::order_crossover;
/// use u_tsp::models::is_permutation;
///
/// let p1 = [1, 2, 3, 4, 5, 6];
/// let p2 = [6, 4, 2, 1, 5, 3];
/// let mut child = [0; 6];
/// let mut rng = u_numflow::random::create_rng(11);
///
/// order_crossover(&p1, &p2, &mut child, &mut rng);
/// assert!(is_permutation(&child));
/// ```
pub fn order_crossover<R: Rng>(p1: &[usize], p2: &[usize], child: &mut [usize], rng: &mut R) {
    let n = p1.len();
    if n < 2 {
        child.copy_from_slice(p1);
        return;
    }

    let mut start = rng.random_range(0..n);
    let mut end = rng.random_range(0..n);
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }
    order_crossover_segment(p1, p2, child, start, end);
}

/// OX with a fixed segment `[start, end]`, `start <= end < n`.
pub(crate) fn order_crossover_segment(
    p1: &[usize],
    p2: &[usize],
    child: &mut [usize],
    start: usize,
    end: usize,
) {
    let n = p1.len();
    let mut placed = vec![false; n + 1];

    child[start..=end].copy_from_slice(&p1[start..=end]);
    for &c in &p1[start..=end] {
        placed[c] = true;
    }

    let mut pos = (end + 1) % n;
    for &c in p2 {
        if !placed[c] {
            child[pos] = c;
            placed[c] = true;
            pos = (pos + 1) % n;
        }
    }
}

/// Distance-preserving crossover (DPX).
///
/// Keeps every cyclic edge of `p1` that is also an edge of `p2`; the kept
/// edges form path fragments. The child walks from the first city (by id)
/// that starts a fragment, follows kept edges, and at each fragment end jumps
/// to the nearest unvisited fragment start. If no fragment start remains
/// while cities are still unplaced, the nearest unvisited city of any kind is
/// taken instead.
///
/// The child is not improved here; callers run 2-opt on it.
///
/// # Examples
///
/// ```
/// use u_tsp::models::{is_permutation, Instance};
/// use u_tsp::distance::CoordinateOracle;
/// use u_tsp::ga::dpx_crossover;
///
/// let inst = Instance::from_coords("hex", "EUC_2D", &[
///     (0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (20.0, 10.0), (10.0, 10.0), (0.0, 10.0),
/// ]);
/// let oracle = CoordinateOracle::for_instance(&inst);
/// let p1 = [1, 2, 3, 4, 5, 6];
/// let p2 = [1, 2, 3, 5, 4, 6];
/// let mut child = [0; 6];
///
/// dpx_crossover(&oracle, &p1, &p2, &mut child);
/// assert!(is_permutation(&child));
/// ```
pub fn dpx_crossover<D: DistanceOracle + ?Sized>(
    oracle: &D,
    p1: &[usize],
    p2: &[usize],
    child: &mut [usize],
) {
    let n = p1.len();
    if n < 2 {
        child.copy_from_slice(p1);
        return;
    }

    // p2 adjacency, indexed by city id
    let mut p2_prev = vec![0usize; n + 1];
    let mut p2_next = vec![0usize; n + 1];
    for i in 0..n {
        let u = p2[i];
        p2_next[u] = p2[(i + 1) % n];
        p2_prev[u] = p2[(i + n - 1) % n];
    }

    let mut next: Vec<Option<usize>> = vec![None; n + 1];
    let mut prev: Vec<Option<usize>> = vec![None; n + 1];
    for i in 0..n {
        let u = p1[i];
        let v = p1[(i + 1) % n];
        if p2_next[u] == v || p2_prev[u] == v {
            next[u] = Some(v);
            prev[v] = Some(u);
        }
    }

    let start = (1..=n).find(|&c| prev[c].is_none()).unwrap_or(p1[0]);

    let mut visited = vec![false; n + 1];
    let mut current = start;
    child[0] = current;
    visited[current] = true;

    for slot in child.iter_mut().skip(1) {
        let follow = next[current].filter(|&v| !visited[v]);
        let chosen = follow
            .or_else(|| {
                let heads = &mut (1..=n).filter(|&c| !visited[c] && prev[c].is_none());
                oracle.nearest(current, heads).map(|(c, _)| c)
            })
            .or_else(|| {
                let rest = &mut (1..=n).filter(|&c| !visited[c]);
                oracle.nearest(current, rest).map(|(c, _)| c)
            });

        // n - 1 unvisited cities remain for n - 1 slots
        let Some(c) = chosen else {
            break;
        };
        *slot = c;
        visited[c] = true;
        current = c;
    }
}

/// With probability `rate`, swaps two distinct random positions.
///
/// Returns whether a swap happened.
pub fn swap_mutation<R: Rng>(genes: &mut [usize], rate: f64, rng: &mut R) -> bool {
    let n = genes.len();
    if n < 2 || rng.random::<f64>() >= rate {
        return false;
    }
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    genes.swap(i, j);
    true
}

/// A population slot as seen by tournament selection: its tour length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SlotScore {
    length: f64,
}

impl SlotScore {
    pub(crate) fn new(length: f64) -> Self {
        Self { length }
    }
}

impl Individual for SlotScore {
    type Fitness = f64;

    fn fitness(&self) -> f64 {
        self.length
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.length = fitness;
    }
}

/// Picks one slot by tournament of size `k`, with replacement; the strictly
/// shortest contestant wins, the first drawn on ties.
pub(crate) fn tournament<R: Rng>(scores: &[SlotScore], k: usize, rng: &mut R) -> usize {
    Selection::Tournament(k).select(scores, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::CoordinateOracle;
    use crate::models::{is_permutation, Instance};
    use u_numflow::random::create_rng;

    fn ring(n: usize) -> Instance {
        let coords: Vec<(f64, f64)> = (0..n)
            .map(|i| {
                let a = i as f64 / n as f64 * std::f64::consts::TAU;
                (100.0 * a.cos(), 100.0 * a.sin())
            })
            .collect();
        Instance::from_coords("ring", "EUC_2D", &coords)
    }

    fn cyclic_edges(t: &[usize]) -> Vec<(usize, usize)> {
        let n = t.len();
        (0..n)
            .map(|i| {
                let (a, b) = (t[i], t[(i + 1) % n]);
                (a.min(b), a.max(b))
            })
            .collect()
    }

    #[test]
    fn test_random_permutation_valid() {
        let mut rng = create_rng(42);
        let mut buf = [0; 17];
        for _ in 0..10 {
            random_permutation(&mut buf, &mut rng);
            assert!(is_permutation(&buf));
        }
    }

    #[test]
    fn test_ox_fixed_segment() {
        let p1 = [1, 2, 3, 4, 5, 6, 7, 8];
        let p2 = [8, 6, 4, 2, 7, 5, 3, 1];
        let mut child = [0; 8];
        order_crossover_segment(&p1, &p2, &mut child, 2, 4);
        // segment 3,4,5 kept; fill from position 5 with 8,6,2,7,1
        assert_eq!(child, [7, 1, 3, 4, 5, 8, 6, 2]);
    }

    #[test]
    fn test_ox_full_segment_copies_parent() {
        let p1 = [3, 1, 2];
        let p2 = [1, 2, 3];
        let mut child = [0; 3];
        order_crossover_segment(&p1, &p2, &mut child, 0, 2);
        assert_eq!(child, p1);
    }

    #[test]
    fn test_ox_random_valid() {
        let mut rng = create_rng(5);
        let mut p1 = [0; 12];
        let mut p2 = [0; 12];
        let mut child = [0; 12];
        for _ in 0..50 {
            random_permutation(&mut p1, &mut rng);
            random_permutation(&mut p2, &mut rng);
            order_crossover(&p1, &p2, &mut child, &mut rng);
            assert!(is_permutation(&child));
        }
    }

    #[test]
    fn test_dpx_identical_parents() {
        let inst = ring(7);
        let o = CoordinateOracle::for_instance(&inst);
        let p = [3, 4, 5, 6, 7, 1, 2];
        let mut child = [0; 7];
        dpx_crossover(&o, &p, &p, &mut child);
        // every edge kept, no fragment start: walk from p1[0]
        assert_eq!(child, p);
    }

    #[test]
    fn test_dpx_preserves_common_edges() {
        let inst = ring(10);
        let o = CoordinateOracle::for_instance(&inst);
        let mut rng = create_rng(9);
        let mut p1 = [0; 10];
        let mut p2 = [0; 10];
        let mut child = [0; 10];
        for _ in 0..30 {
            random_permutation(&mut p1, &mut rng);
            random_permutation(&mut p2, &mut rng);
            dpx_crossover(&o, &p1, &p2, &mut child);
            assert!(is_permutation(&child));

            let e2 = cyclic_edges(&p2);
            let common: Vec<_> = cyclic_edges(&p1)
                .into_iter()
                .filter(|e| e2.contains(e))
                .collect();
            let ec = cyclic_edges(&child);
            for e in &common {
                assert!(ec.contains(e), "common edge {e:?} lost");
            }
        }
    }

    #[test]
    fn test_dpx_disjoint_parents_valid() {
        let inst = ring(6);
        let o = CoordinateOracle::for_instance(&inst);
        let p1 = [1, 2, 3, 4, 5, 6];
        let p2 = [1, 3, 5, 2, 6, 4];
        let mut child = [0; 6];
        dpx_crossover(&o, &p1, &p2, &mut child);
        assert!(is_permutation(&child));
        // no common edge: city 1 has no kept predecessor
        assert_eq!(child[0], 1);
    }

    #[test]
    fn test_swap_mutation_rates() {
        let mut rng = create_rng(1);
        let mut genes = [1, 2, 3, 4, 5];
        assert!(!swap_mutation(&mut genes, 0.0, &mut rng));
        assert_eq!(genes, [1, 2, 3, 4, 5]);

        assert!(swap_mutation(&mut genes, 1.0, &mut rng));
        assert!(is_permutation(&genes));
        let moved = genes.iter().zip(1..).filter(|&(g, i)| *g != i).count();
        assert_eq!(moved, 2);
    }

    #[test]
    fn test_swap_mutation_single_city() {
        let mut rng = create_rng(1);
        let mut genes = [1];
        assert!(!swap_mutation(&mut genes, 1.0, &mut rng));
    }

    #[test]
    fn test_tournament_picks_from_range() {
        let scores: Vec<SlotScore> = [5.0, 1.0, 3.0].iter().map(|&l| SlotScore::new(l)).collect();
        let mut rng = create_rng(3);
        for _ in 0..20 {
            assert!(tournament(&scores, 2, &mut rng) < 3);
        }
        // a tournament far larger than the population almost surely sees slot 1
        assert_eq!(tournament(&scores, 200, &mut rng), 1);
    }
}
