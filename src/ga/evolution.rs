//! Generational evolution: elitism, mutation, crossover and tournament
//! selection.
//!
//! # Generation pipeline
//!
//! 1. Sort the current population, fittest first.
//! 2. Copy the elite (see [`ElitePolicy`]) into the next population.
//! 3. **Mutation phase**: mutate the less fit half of the current
//!    population in place.
//! 4. **Selection phase**: fill the next population with children of
//!    tournament-selected parents drawn from the *mutated* population.
//!
//! Phase 3 always completes before phase 4 reads the population.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Population;
use crate::config::SchedulerConfig;
use crate::error::SchedulerError;
use crate::models::{Catalog, Schedule, Session};

/// Which ranked schedule is carried over unchanged each generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElitePolicy {
    /// Second-ranked schedule. The fittest schedule itself is not
    /// copied and may not survive into the next generation.
    #[default]
    RunnerUp,
    /// Top-ranked schedule.
    Fittest,
}

impl ElitePolicy {
    /// Zero-based rank of the carried-over schedule.
    pub fn rank(self) -> usize {
        match self {
            ElitePolicy::RunnerUp => 1,
            ElitePolicy::Fittest => 0,
        }
    }
}

/// Evolves populations of schedules for one catalog.
///
/// All randomness comes from the injected `rng`; seed it for reproducible
/// runs.
///
/// # Tie-breaking
/// Both tournament selection and crossover compare with strict `<`, so on
/// equal fitness the first-compared schedule wins.
pub struct GeneticAlgorithm<'a, R> {
    catalog: &'a Catalog,
    population_size: usize,
    mutation_rate: f64,
    crossover_rate: f64,
    elite_policy: ElitePolicy,
    rng: R,
}

impl<'a, R: Rng> GeneticAlgorithm<'a, R> {
    /// Creates an engine from a validated configuration.
    pub fn new(
        catalog: &'a Catalog,
        config: &SchedulerConfig,
        rng: R,
    ) -> Result<Self, SchedulerError> {
        config.validate()?;
        Ok(Self {
            catalog,
            population_size: config.population_size,
            mutation_rate: config.mutation_rate,
            crossover_rate: config.crossover_rate,
            elite_policy: config.elite_policy,
            rng,
        })
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Seeds a random population of the configured size.
    pub fn initial_population(&mut self) -> Result<Population, SchedulerError> {
        Population::random(self.catalog, self.population_size, &mut self.rng)
    }

    /// Produces the next generation.
    ///
    /// The old population is consumed: its less fit half is mutated before
    /// parents are drawn from it.
    ///
    /// # Errors
    /// [`SchedulerError::PopulationSize`] if `population` does not hold the
    /// configured number of schedules.
    pub fn evolve(&mut self, mut population: Population) -> Result<Population, SchedulerError> {
        let expected = self.population_size;
        if population.len() != expected {
            return Err(SchedulerError::PopulationSize {
                expected,
                actual: population.len(),
            });
        }

        population.sort_by_fitness_desc();

        let mut next = Population::new();
        let elite = population
            .get(self.elite_policy.rank())
            .cloned()
            .ok_or(SchedulerError::PopulationSize {
                expected,
                actual: population.len(),
            })?;
        debug!(fitness = elite.fitness(), policy = ?self.elite_policy, "elite carried over");
        next.add(elite);

        let mutated = self.mutate_lower_half(&mut population)?;
        debug!(mutated, "mutation phase done");

        for _ in 1..expected {
            let child = {
                let s1 = self.select(&population)?;
                let s2 = self.select(&population)?;
                self.crossover(s1, s2)?
            };
            next.add(child);
        }

        next.find_fittest();
        debug!(fittest = next.fittest_score(), size = next.len(), "selection phase done");
        Ok(next)
    }

    /// Mutates the less fit half of a sorted population in place.
    ///
    /// Returns how many schedules were visited.
    pub fn mutate_lower_half(
        &mut self,
        population: &mut Population,
    ) -> Result<usize, SchedulerError> {
        let len = population.len();
        for i in len / 2..len {
            if let Some(schedule) = population.get_mut(i) {
                self.mutate(schedule)?;
            }
        }
        Ok(len - len / 2)
    }

    /// Mutates a schedule in place and recomputes its fitness once.
    ///
    /// Each slot mutates with the mutation rate, becoming empty or a fresh
    /// random meeting with equal odds.
    pub fn mutate(&mut self, schedule: &mut Schedule) -> Result<(), SchedulerError> {
        for i in 0..schedule.len() {
            if self.rng.random_bool(self.mutation_rate) {
                let session = if self.rng.random_bool(0.5) {
                    Session::Empty
                } else {
                    Session::random(self.catalog, &mut self.rng)
                };
                schedule.set_session(i, session)?;
            }
        }
        schedule.compute_fitness(self.catalog)?;
        Ok(())
    }

    /// Builds a child slot by slot from two parents.
    ///
    /// Each slot comes from the less fit parent with the crossover rate,
    /// otherwise from the fitter one. `s1` counts as fitter on a tie.
    pub fn crossover(&mut self, s1: &Schedule, s2: &Schedule) -> Result<Schedule, SchedulerError> {
        let (fitter, less_fit) = if s1.fitness() < s2.fitness() {
            (s2, s1)
        } else {
            (s1, s2)
        };

        let mut child = Schedule::empty(fitter.len());
        for i in 0..child.len() {
            let source = if self.rng.random_bool(self.crossover_rate) {
                less_fit
            } else {
                fitter
            };
            child.set_session(i, *source.session(i)?)?;
        }
        child.compute_fitness(self.catalog)?;
        Ok(child)
    }

    /// Picks the fitter of two uniformly drawn schedules (with replacement).
    ///
    /// The first draw wins ties. Returns `None` for an empty population.
    pub fn tournament_selection<'p>(&mut self, population: &'p Population) -> Option<&'p Schedule> {
        if population.is_empty() {
            return None;
        }
        let mut best: Option<&Schedule> = None;
        for _ in 0..2 {
            let candidate = population.get(self.rng.random_range(0..population.len()))?;
            if best.is_none_or(|b| b.fitness() < candidate.fitness()) {
                best = Some(candidate);
            }
        }
        best
    }

    fn select<'p>(&mut self, population: &'p Population) -> Result<&'p Schedule, SchedulerError> {
        self.tournament_selection(population)
            .ok_or(SchedulerError::PopulationSize {
                expected: self.population_size,
                actual: 0,
            })
    }
}
