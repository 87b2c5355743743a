//! Timetabling domain models.
//!
//! Provides the catalog of resources the optimizer draws from and the
//! genome it evolves.
//!
//! # Domain Mappings
//!
//! | Model | Genetic algorithm | Timetable |
//! |-------|-------------------|-----------|
//! | Catalog | Problem instance | Staff and room availability |
//! | Session | Gene | One slot's meeting |
//! | Schedule | Individual | One week |

mod catalog;
mod resource;
mod schedule;
mod session;

pub use catalog::{Catalog, CatalogBuilder, CatalogEntry, WeekLayout};
pub use resource::{Resource, ResourceId, Role};
pub use schedule::{FitnessBreakdown, Schedule, RANDOM_FILL_PROBABILITY};
pub use session::{Meeting, Session};
