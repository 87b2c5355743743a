//! Generational driver.
//!
//! Seeds a random population, evolves it for the configured number of
//! generations and returns the fittest schedule of the last one.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::config::SchedulerConfig;
use crate::error::SchedulerError;
use crate::ga::GeneticAlgorithm;
use crate::models::{Catalog, FitnessBreakdown, Schedule};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Outcome of a run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Fittest schedule of the final generation.
    pub best: Schedule,
    /// Score breakdown of `best`.
    pub breakdown: FitnessBreakdown,
    /// Fittest score per generation, the initial population first.
    pub history: Vec<u32>,
}

/// Runs the genetic algorithm over one catalog.
///
/// # Example
/// ```
/// use tutor_schedule::config::SchedulerConfig;
/// use tutor_schedule::models::{Catalog, WeekLayout};
/// use tutor_schedule::scheduler::Scheduler;
///
/// let catalog = Catalog::builder(WeekLayout::new(2, 1, 36))
///     .with_room("R", [0, 1])
///     .with_tutor("T", 5, [0, 1])
///     .with_supervisor("S", 5, [0, 1])
///     .build()
///     .unwrap();
/// let config = SchedulerConfig::default()
///     .with_layout(*catalog.layout())
///     .with_generations(5)
///     .with_seed(42);
///
/// let report = Scheduler::new(catalog, config).unwrap().run().unwrap();
/// assert_eq!(report.history.len(), 6);
/// assert!(report.best.fitness() <= 100);
/// ```
#[derive(Debug, Clone)]
pub struct Scheduler {
    catalog: Catalog,
    config: SchedulerConfig,
}

impl Scheduler {
    /// Creates a driver after checking the configuration against the catalog.
    pub fn new(catalog: Catalog, config: SchedulerConfig) -> Result<Self, SchedulerError> {
        config.validate()?;
        if config.layout() != *catalog.layout() {
            return Err(SchedulerError::InvalidConfig(vec![ValidationError::new(
                ValidationErrorKind::InvalidLayout,
                format!(
                    "Configured week {:?} differs from catalog week {:?}",
                    config.layout(),
                    catalog.layout()
                ),
            )]));
        }
        Ok(Self { catalog, config })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Runs with a [`SmallRng`] seeded from the configuration, or from OS
    /// entropy when no seed is set.
    pub fn run(&self) -> Result<RunReport, SchedulerError> {
        match self.config.seed {
            Some(seed) => self.run_with(SmallRng::seed_from_u64(seed)),
            None => self.run_with(SmallRng::from_os_rng()),
        }
    }

    /// Runs with the given random source.
    pub fn run_with<R: Rng>(&self, rng: R) -> Result<RunReport, SchedulerError> {
        let mut ga = GeneticAlgorithm::new(&self.catalog, &self.config, rng)?;
        let mut population = ga.initial_population()?;
        let mut history = Vec::with_capacity(self.config.generations + 1);

        for generation in 0..self.config.generations {
            info!(generation, fittest = population.fittest_score(), "generation");
            history.push(population.fittest_score());
            population = ga.evolve(population)?;
        }
        info!(
            generation = self.config.generations,
            fittest = population.fittest_score(),
            "generation"
        );
        history.push(population.fittest_score());

        let best = population
            .fittest()
            .or_else(|| population.get(0))
            .cloned()
            .ok_or(SchedulerError::PopulationSize {
                expected: self.config.population_size,
                actual: 0,
            })?;
        let breakdown = best.evaluate(&self.catalog)?;

        Ok(RunReport {
            best,
            breakdown,
            history,
        })
    }
}
