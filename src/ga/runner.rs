//! Generational GA loop over permutation tours.
//!
//! # Algorithm
//!
//! 1. Initialize `P` random permutations; the global best starts from slot 0
//! 2. Each generation:
//!    - Tournament selection with replacement, size `max(2, ⌊P/2⌋)`
//!    - Pairwise crossover (OX, or DPX followed by 2-opt on each child)
//!    - Swap mutation with probability `m`
//!    - Rank offspring by length; they become the population
//!    - Replace the last slot with a fresh random permutation
//!    - Record a new global best on strict improvement, then copy the global
//!      best over the generation's worst slot
//! 3. Stop after `G` generations

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::{Crossover, GaConfig};
use super::operators::{
    dpx_crossover, order_crossover, random_permutation, swap_mutation, tournament, SlotScore,
};
use super::population::Population;
use crate::distance::DistanceOracle;
use crate::error::{TspError, TspResult};
use crate::local_search::improve_cities;
use crate::models::Tour;

/// Result of a GA run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaResult {
    /// Best closed tour found, with its length cached.
    pub tour: Tour,
    /// Length of `tour`.
    pub length: f64,
    /// Generations executed.
    pub generations: usize,
    /// Global best length after each generation; `history[0]` is the
    /// initial population. Non-increasing.
    pub history: Vec<f64>,
}

/// Runs the GA with order crossover (OX), ignoring `config.crossover`.
///
/// # Errors
///
/// - [`TspError::InvalidArgument`] for an empty instance or invalid parameters.
/// - [`TspError::Allocation`] if the population arenas cannot be reserved.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Instance;
/// use u_tsp::distance::CoordinateOracle;
/// use u_tsp::ga::{genetic_algorithm, GaConfig};
///
/// let inst = Instance::from_coords("square", "EUC_2D", &[
///     (0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0),
/// ]);
/// let oracle = CoordinateOracle::for_instance(&inst);
/// let config = GaConfig::default()
///     .with_population_size(10)
///     .with_generations(50)
///     .with_seed(42);
///
/// let result = genetic_algorithm(&oracle, &config).unwrap();
/// assert!(result.tour.is_permutation());
/// assert_eq!(result.length, 40.0);
/// ```
pub fn genetic_algorithm<D: DistanceOracle + ?Sized>(
    oracle: &D,
    config: &GaConfig,
) -> TspResult<GaResult> {
    run(oracle, &config.clone().with_crossover(Crossover::Order))
}

/// Runs the memetic GA: DPX crossover with 2-opt on every child, ignoring
/// `config.crossover`.
///
/// # Errors
///
/// As [`genetic_algorithm`].
pub fn genetic_algorithm_dpx<D: DistanceOracle + ?Sized>(
    oracle: &D,
    config: &GaConfig,
) -> TspResult<GaResult> {
    run(oracle, &config.clone().with_crossover(Crossover::Dpx))
}

/// Runs the GA with the operator selected in `config`, seeding a fresh RNG
/// from `config.seed`.
pub fn run<D: DistanceOracle + ?Sized>(oracle: &D, config: &GaConfig) -> TspResult<GaResult> {
    let seed = config.seed.unwrap_or_else(rand::random);
    let mut rng = u_numflow::random::create_rng(seed);
    evolve(oracle, config, &mut rng)
}

/// Runs the GA with a caller-supplied RNG.
pub fn evolve<D: DistanceOracle + ?Sized, R: Rng>(
    oracle: &D,
    config: &GaConfig,
    rng: &mut R,
) -> TspResult<GaResult> {
    config.validate()?;
    let n = oracle.dimension();
    if n == 0 {
        return Err(TspError::InvalidArgument("empty instance".into()));
    }
    let p = config.population_size;
    let k = config.tournament_size();

    let mut population = Population::try_new(p, n)?;
    let mut selected = Population::try_new(p, n)?;
    let mut offspring = Population::try_new(p, n)?;
    let mut scores: Vec<SlotScore> = Vec::new();
    scores
        .try_reserve_exact(p)
        .map_err(|_| TspError::Allocation { what: "population" })?;
    let mut history = Vec::new();
    history
        .try_reserve_exact(config.generations.saturating_add(1))
        .map_err(|_| TspError::Allocation { what: "history" })?;

    for s in 0..p {
        random_permutation(population.slot_mut(s), rng);
    }
    population.evaluate(oracle);

    let mut best = population.slot(0).to_vec();
    let mut best_length = population.length(0);
    history.push(best_length);

    for generation in 1..=config.generations {
        scores.clear();
        scores.extend(population.lengths().iter().map(|&l| SlotScore::new(l)));
        for s in 0..p {
            let w = tournament(&scores, k, rng);
            selected.assign(s, population.slot(w), population.length(w));
        }

        for i in (0..p).step_by(2) {
            let next = if i + 1 < p { i + 1 } else { 0 };
            let (a, b) = (selected.slot(i), selected.slot(next));
            recombine(oracle, config.crossover, a, b, offspring.slot_mut(i), rng);
            if i + 1 < p {
                recombine(oracle, config.crossover, b, a, offspring.slot_mut(i + 1), rng);
            }
        }

        for s in 0..p {
            swap_mutation(offspring.slot_mut(s), config.mutation_rate, rng);
        }
        offspring.evaluate(oracle);

        offspring.sort_into(&mut population);
        random_permutation(population.slot_mut(p - 1), rng);
        population.evaluate(oracle);

        let gen_best = population.best_index();
        if population.length(gen_best) < best_length {
            best_length = population.length(gen_best);
            best.copy_from_slice(population.slot(gen_best));
            tracing::debug!(generation, best_length, "new global best");
        }
        let gen_worst = population.worst_index();
        population.assign(gen_worst, &best, best_length);

        history.push(best_length);
    }

    tracing::info!(
        n,
        population = p,
        generations = config.generations,
        crossover = config.crossover.as_str(),
        best_length,
        "genetic algorithm complete"
    );

    let mut tour = Tour::new(best);
    tour.set_length(best_length);
    Ok(GaResult {
        tour,
        length: best_length,
        generations: config.generations,
        history,
    })
}

fn recombine<D: DistanceOracle + ?Sized, R: Rng>(
    oracle: &D,
    crossover: Crossover,
    p1: &[usize],
    p2: &[usize],
    child: &mut [usize],
    rng: &mut R,
) {
    match crossover {
        Crossover::Order => order_crossover(p1, p2, child, rng),
        Crossover::Dpx => {
            dpx_crossover(oracle, p1, p2, child);
            improve_cities(oracle, child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{CoordinateOracle, DistanceMatrix};
    use crate::models::Instance;

    fn scattered(n: usize) -> Instance {
        // deterministic pseudo-random layout
        let coords: Vec<(f64, f64)> = (0..n)
            .map(|i| {
                let x = ((i * 7919) % 1000) as f64 / 10.0;
                let y = ((i * 104_729) % 1000) as f64 / 10.0;
                (x, y)
            })
            .collect();
        Instance::from_coords("scattered", "EUC_2D", &coords)
    }

    fn config() -> GaConfig {
        GaConfig::default()
            .with_population_size(20)
            .with_generations(60)
            .with_mutation_rate(0.2)
            .with_seed(7)
    }

    #[test]
    fn test_ox_result_valid() {
        let inst = scattered(15);
        let o = CoordinateOracle::for_instance(&inst);
        let result = genetic_algorithm(&o, &config()).expect("ga");
        assert!(result.tour.is_permutation());
        assert_eq!(result.tour.len(), 15);
        assert!((result.length - o.path_length(result.tour.cities(), true)).abs() < 1e-9);
        assert_eq!(result.tour.length(), Some(result.length));
    }

    #[test]
    fn test_history_non_increasing() {
        let inst = scattered(15);
        let o = CoordinateOracle::for_instance(&inst);
        for result in [
            genetic_algorithm(&o, &config()).expect("ox"),
            genetic_algorithm_dpx(&o, &config().with_generations(15)).expect("dpx"),
        ] {
            assert_eq!(result.history.len(), result.generations + 1);
            assert!(result.history.windows(2).all(|w| w[1] <= w[0]));
            assert_eq!(result.history.last().copied(), Some(result.length));
        }
    }

    #[test]
    fn test_seed_reproducible() {
        let inst = scattered(12);
        let o = CoordinateOracle::for_instance(&inst);
        let a = genetic_algorithm(&o, &config()).expect("a");
        let b = genetic_algorithm(&o, &config()).expect("b");
        assert_eq!(a.tour.cities(), b.tour.cities());
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn test_dpx_improves_over_initial() {
        let inst = scattered(20);
        let o = CoordinateOracle::for_instance(&inst);
        let result = genetic_algorithm_dpx(&o, &config().with_generations(5)).expect("dpx");
        assert!(result.tour.is_permutation());
        // every DPX child is 2-opt improved; a random start is not
        assert!(result.length < result.history[0]);
    }

    #[test]
    fn test_matrix_and_coordinates_agree() {
        let inst = scattered(10);
        let o = CoordinateOracle::for_instance(&inst);
        let dm = DistanceMatrix::build(&o).expect("build");
        let a = genetic_algorithm(&o, &config()).expect("coords");
        let b = genetic_algorithm(&dm, &config()).expect("matrix");
        assert_eq!(a.tour.cities(), b.tour.cities());
        assert_eq!(a.length, b.length);
    }

    #[test]
    fn test_single_individual_population() {
        let inst = scattered(6);
        let o = CoordinateOracle::for_instance(&inst);
        let cfg = config().with_population_size(1).with_generations(5);
        let result = genetic_algorithm(&o, &cfg).expect("ga");
        assert!(result.tour.is_permutation());
        assert_eq!(result.history.len(), 6);
    }

    #[test]
    fn test_odd_population() {
        let inst = scattered(9);
        let o = CoordinateOracle::for_instance(&inst);
        let cfg = config().with_population_size(7);
        let result = genetic_algorithm(&o, &cfg).expect("ga");
        assert!(result.tour.is_permutation());
    }

    #[test]
    fn test_single_city() {
        let inst = Instance::from_coords("one", "EUC_2D", &[(1.0, 1.0)]);
        let o = CoordinateOracle::for_instance(&inst);
        let result = genetic_algorithm_dpx(&o, &config().with_generations(3)).expect("ga");
        assert_eq!(result.tour.cities(), &[1]);
        assert_eq!(result.length, 0.0);
    }

    #[test]
    fn test_invalid_parameters() {
        let inst = scattered(5);
        let o = CoordinateOracle::for_instance(&inst);
        for cfg in [
            config().with_population_size(0),
            config().with_generations(0),
            config().with_mutation_rate(2.0),
        ] {
            assert!(matches!(
                genetic_algorithm(&o, &cfg),
                Err(TspError::InvalidArgument(_))
            ));
        }
    }
}
