//! Input validation for timetabling runs.
//!
//! Checks structural integrity of the catalog and the run configuration
//! before the optimizer starts. Detects:
//! - Duplicate resource names within a role
//! - Roles without any resource
//! - Availability slots outside the week
//! - Degenerate week layouts
//! - Rates outside `[0, 1]` and populations too small to evolve
//!
//! All problems are collected rather than stopping at the first.

use std::collections::HashSet;

use crate::config::SchedulerConfig;
use crate::models::{CatalogEntry, Role, WeekLayout};

/// Most days a week layout may have.
pub const MAX_DAYS_PER_WEEK: usize = 7;

/// Most slots a single day may have.
pub const MAX_HOURS_PER_DAY: usize = 24;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two resources of one role share a name.
    DuplicateName,
    /// A role has no resources.
    EmptyRole,
    /// An availability slot lies outside the week.
    SlotOutOfRange,
    /// The week has no slots, too many days or too many hours per day.
    InvalidLayout,
    /// A probability lies outside `[0, 1]`.
    InvalidRate,
    /// The population cannot carry an elite plus offspring.
    InvalidPopulation,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the shape of a week on its own.
pub fn validate_layout(layout: &WeekLayout) -> ValidationResult {
    let mut errors = Vec::new();
    check_layout(layout, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_layout(layout: &WeekLayout, errors: &mut Vec<ValidationError>) {
    if layout.hours_per_day == 0 || layout.days_per_week == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidLayout,
            format!(
                "Week of {} days x {} hours has no slots",
                layout.days_per_week, layout.hours_per_day
            ),
        ));
    }
    if layout.days_per_week > MAX_DAYS_PER_WEEK {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidLayout,
            format!(
                "Week of {} days exceeds {MAX_DAYS_PER_WEEK}",
                layout.days_per_week
            ),
        ));
    }
    if layout.hours_per_day > MAX_HOURS_PER_DAY {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidLayout,
            format!(
                "Day of {} hours exceeds {MAX_HOURS_PER_DAY}",
                layout.hours_per_day
            ),
        ));
    }
    if layout.hours_per_day.checked_mul(layout.days_per_week).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidLayout,
            format!(
                "Week of {} days x {} hours overflows the slot count",
                layout.days_per_week, layout.hours_per_day
            ),
        ));
    }
}

/// Validates catalog entries against a week layout.
///
/// Checks:
/// 1. The layout has at least one slot, at most 7 days and at most 24
///    hours per day
/// 2. Every role has at least one resource
/// 3. No two resources of one role share a name
/// 4. Every availability slot lies in `0..slot_count`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_catalog(layout: &WeekLayout, entries: &[CatalogEntry]) -> ValidationResult {
    let mut errors = Vec::new();
    check_layout(layout, &mut errors);

    for role in Role::ALL {
        if !entries.iter().any(|e| e.resource.role == role) {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyRole,
                format!("No {role} in catalog"),
            ));
        }
    }

    let mut names = HashSet::new();
    for entry in entries {
        let r = &entry.resource;
        if !names.insert((r.role, r.name.as_str())) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate {} name: {}", r.role, r.name),
            ));
        }
    }

    let slot_count = layout.slot_count();
    for entry in entries {
        for &slot in &entry.slots {
            if slot >= slot_count {
                errors.push(ValidationError::new(
                    ValidationErrorKind::SlotOutOfRange,
                    format!(
                        "{} '{}' lists slot {slot}, outside 0..{slot_count}",
                        entry.resource.role, entry.resource.name
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a run configuration.
///
/// Checks:
/// 1. The derived week layout is valid
/// 2. Population size is at least 2 (elite plus one offspring)
/// 3. Mutation and crossover rates lie in `[0, 1]`
pub fn validate_config(config: &SchedulerConfig) -> ValidationResult {
    let mut errors = Vec::new();
    check_layout(&config.layout(), &mut errors);

    if config.population_size < 2 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidPopulation,
            format!("Population size {} < 2", config.population_size),
        ));
    }

    for (name, rate) in [
        ("Mutation", config.mutation_rate),
        ("Crossover", config.crossover_rate),
    ] {
        if !(0.0..=1.0).contains(&rate) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidRate,
                format!("{name} rate {rate} outside [0, 1]"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
