//! GA configuration.
//!
//! [`GaConfig`] holds the parameters of the evolutionary loop.

use serde::{Deserialize, Serialize};

use crate::error::{TspError, TspResult};

/// Recombination operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Crossover {
    /// Order crossover (OX).
    #[default]
    Order,
    /// Distance-preserving crossover followed by 2-opt on every child.
    Dpx,
}

impl Crossover {
    /// Name used in result lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Order => "ga",
            Self::Dpx => "gadpx",
        }
    }
}

/// Configuration for the genetic algorithm.
///
/// # Defaults
///
/// ```
/// use u_tsp::ga::{Crossover, GaConfig};
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 30);
/// assert_eq!(config.generations, 1000);
/// assert_eq!(config.crossover, Crossover::Order);
/// assert!(config.validate().is_ok());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tsp::ga::{Crossover, GaConfig};
///
/// let config = GaConfig::default()
///     .with_population_size(50)
///     .with_generations(200)
///     .with_mutation_rate(0.05)
///     .with_crossover(Crossover::Dpx)
///     .with_seed(42);
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaConfig {
    /// Number of individuals per generation.
    pub population_size: usize,

    /// Number of generations to run.
    pub generations: usize,

    /// Probability of a swap mutation per offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Recombination operator.
    pub crossover: Crossover,

    /// Random seed for reproducibility. `None` draws one.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            generations: 1000,
            mutation_rate: 0.1,
            crossover: Crossover::Order,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the mutation rate. Not clamped; see [`validate`](Self::validate).
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the crossover operator.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the parameters.
    ///
    /// # Errors
    ///
    /// [`TspError::InvalidArgument`] if the population or generation count
    /// is zero, or the mutation rate lies outside `[0, 1]`.
    pub fn validate(&self) -> TspResult<()> {
        if self.population_size == 0 {
            return Err(TspError::InvalidArgument(
                "population_size must be at least 1".into(),
            ));
        }
        if self.generations == 0 {
            return Err(TspError::InvalidArgument(
                "generations must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(TspError::InvalidArgument(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        Ok(())
    }

    /// Tournament size used for parent selection: `max(2, ⌊P/2⌋)`.
    pub fn tournament_size(&self) -> usize {
        (self.population_size / 2).max(2)
    }
}
