//! Genetic algorithm over weekly schedules.
//!
//! # Encoding
//!
//! A [`Schedule`](crate::models::Schedule) is the individual: one gene
//! ([`Session`](crate::models::Session)) per slot of the week. Fitness is
//! maximized and bounded to `[0, 100]`.
//!
//! # Operators
//!
//! - **Selection**: binary tournament
//! - **Crossover**: per-slot uniform crossover biased toward the fitter parent
//! - **Mutation**: per-slot reset to empty or to a random meeting
//! - **Elitism**: one ranked schedule copied unchanged per generation
//!
//! # Submodules
//!
//! - [`population`]: one generation and its fittest member
//! - [`evolution`]: the generational engine

pub mod evolution;
pub mod population;

pub use evolution::{ElitePolicy, GeneticAlgorithm};
pub use population::Population;
