//! Run driver and KPI evaluation.
//!
//! `Scheduler` runs the genetic algorithm for a fixed number of generations
//! and reports the winning schedule. `ScheduleKpi` breaks a schedule down
//! into per-person hours and availability figures.

mod kpi;
mod runner;

pub use kpi::{PersonHours, ScheduleKpi};
pub use runner::{RunReport, Scheduler};
