//! Run configuration.
//!
//! Every tunable of a run lives in one immutable [`SchedulerConfig`] that is
//! handed to the catalog builder (through [`SchedulerConfig::layout`]) and
//! to the genetic algorithm.
//!
//! # Example
//! ```
//! use tutor_schedule::config::SchedulerConfig;
//!
//! let config = SchedulerConfig::from_toml_str("generations = 50\nseed = 7").unwrap();
//! assert_eq!(config.generations, 50);
//! assert_eq!(config.population_size, 20);
//! assert_eq!(config.seed, Some(7));
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::SchedulerError;
use crate::ga::ElitePolicy;
use crate::models::WeekLayout;
use crate::validation::validate_config;

/// Tunables of one optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Schedules per generation (default: 20).
    pub population_size: usize,
    /// Generations to evolve (default: 20).
    pub generations: usize,
    /// Slots per day (default: 10).
    pub hours_per_day: usize,
    /// Days per week (default: 5).
    pub days_per_week: usize,
    /// Sessions a schedule may hold before the cap score drops (default: 36).
    pub weekly_hour_cap: usize,
    /// Per-slot mutation probability (default: 0.1).
    pub mutation_rate: f64,
    /// Per-slot probability of inheriting from the less fit parent (default: 0.3).
    pub crossover_rate: f64,
    /// Which ranked schedule is carried over unchanged.
    pub elite_policy: ElitePolicy,
    /// RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            generations: 20,
            hours_per_day: 10,
            days_per_week: 5,
            weekly_hour_cap: 36,
            mutation_rate: 0.1,
            crossover_rate: 0.3,
            elite_policy: ElitePolicy::default(),
            seed: None,
        }
    }
}

impl SchedulerConfig {
    /// Parses a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, SchedulerError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SchedulerError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks the configuration.
    ///
    /// # Errors
    /// [`SchedulerError::InvalidConfig`] with every detected problem.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        validate_config(self).map_err(SchedulerError::InvalidConfig)
    }

    /// Week layout described by this configuration.
    pub fn layout(&self) -> WeekLayout {
        WeekLayout::new(self.hours_per_day, self.days_per_week, self.weekly_hour_cap)
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the generation count.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the week shape.
    pub fn with_layout(mut self, layout: WeekLayout) -> Self {
        self.hours_per_day = layout.hours_per_day;
        self.days_per_week = layout.days_per_week;
        self.weekly_hour_cap = layout.weekly_hour_cap;
        self
    }

    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    pub fn with_elite_policy(mut self, policy: ElitePolicy) -> Self {
        self.elite_policy = policy;
        self
    }

    /// Fixes the RNG seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
