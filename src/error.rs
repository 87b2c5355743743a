//! Error type shared by ingestion, validation and the GA core.

use thiserror::Error;

use crate::models::Role;
use crate::validation::ValidationError;

/// Errors raised while loading a catalog or running the optimizer.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// A record line could not be parsed.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number within its source.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// A record listed a slot outside the week.
    #[error("{role} '{name}' lists slot {slot}, outside 0..{slot_count}")]
    SlotOutOfRange {
        role: Role,
        name: String,
        slot: usize,
        slot_count: usize,
    },

    /// Catalog failed validation.
    #[error("invalid catalog: {}", summarize(.0))]
    InvalidCatalog(Vec<ValidationError>),

    /// Configuration failed validation.
    #[error("invalid configuration: {}", summarize(.0))]
    InvalidConfig(Vec<ValidationError>),

    /// A session references a resource the catalog does not know.
    #[error("{role} #{index} is not in the catalog")]
    UnknownResource { role: Role, index: usize },

    /// Slot access outside `0..len`.
    #[error("slot {index} is outside 0..{len}")]
    SlotIndex { index: usize, len: usize },

    /// A schedule does not hold one session per slot of the week.
    #[error("schedule has {actual} slots, the week has {expected}")]
    ScheduleLength { expected: usize, actual: usize },

    /// Some but not all of room, tutor and supervisor were given.
    #[error("a session assigns either all of room, tutor and supervisor or none of them")]
    PartialSession,

    /// The population handed to the engine has the wrong size.
    #[error("population holds {actual} schedules, expected {expected}")]
    PopulationSize { expected: usize, actual: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_validation_errors_are_joined() {
        let err = SchedulerError::InvalidConfig(vec![
            ValidationError::new(
                ValidationErrorKind::InvalidRate,
                "mutation rate 2 outside [0, 1]",
            ),
            ValidationError::new(ValidationErrorKind::InvalidPopulation, "population size 1 < 2"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid configuration: mutation rate 2 outside [0, 1]; population size 1 < 2"
        );
    }

    #[test]
    fn test_slot_out_of_range_message() {
        let err = SchedulerError::SlotOutOfRange {
            role: Role::Tutor,
            name: "Ana".into(),
            slot: 50,
            slot_count: 50,
        };
        assert_eq!(err.to_string(), "tutor 'Ana' lists slot 50, outside 0..50");
    }

    #[test]
    fn test_schedule_length_message() {
        let err = SchedulerError::ScheduleLength {
            expected: 50,
            actual: 49,
        };
        assert_eq!(err.to_string(), "schedule has 49 slots, the week has 50");
    }
}
