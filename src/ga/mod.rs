//! Genetic algorithm for tours.
//!
//! - [`GaConfig`] — Population size, generations, mutation rate, operator, seed
//! - [`genetic_algorithm`] — Order crossover (OX) GA
//! - [`genetic_algorithm_dpx`] — Memetic GA: DPX crossover + 2-opt on every child
//! - [`order_crossover`], [`dpx_crossover`], [`swap_mutation`] — Permutation operators

mod config;
mod operators;
mod population;
mod runner;

pub use config::{Crossover, GaConfig};
pub use operators::{dpx_crossover, order_crossover, random_permutation, swap_mutation};
pub use runner::{evolve, genetic_algorithm, genetic_algorithm_dpx, run, GaResult};
