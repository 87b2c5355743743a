//! Weekly tutoring timetables built by a genetic algorithm.
//!
//! Assigns a room, a tutor and a supervisor to each slot of the week,
//! rewarding placements inside everyone's availability and weekly hour
//! loads that stay under each person's limit.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Resource`, `Catalog`, `Session`, `Schedule`
//! - **`ga`**: `Population` and the generational `GeneticAlgorithm`
//! - **`scheduler`**: Run driver (`Scheduler`) and `ScheduleKpi`
//! - **`config`**: `SchedulerConfig`, the immutable run configuration
//! - **`ingest`**: Line-record parsing into a `Catalog`
//! - **`render`**: Text table and HTML views of a schedule
//! - **`validation`**: Catalog and configuration integrity checks
//!
//! # Flow
//!
//! ```text
//! ingest -> Catalog -> Population::random -> GeneticAlgorithm::evolve (xN) -> fittest -> render
//! ```

pub mod config;
pub mod error;
pub mod ga;
pub mod ingest;
pub mod models;
pub mod render;
pub mod scheduler;
pub mod validation;

pub use error::SchedulerError;
