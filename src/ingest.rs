//! Line-record ingestion into a [`Catalog`].
//!
//! # Record formats
//!
//! | Source | Line |
//! |--------|------|
//! | Supervisors, tutors | `name, maxHours, slot slot ...` |
//! | Rooms | `name, slot slot ...` |
//!
//! Blank lines are skipped and fields are trimmed. The slot list may be
//! empty or missing, meaning the resource is never available. Any
//! malformed line or slot outside the week rejects the whole input.

use std::path::Path;

use tracing::debug;

use crate::error::SchedulerError;
use crate::models::{Catalog, Resource, Role, WeekLayout};
use crate::validation::validate_layout;

/// Supervisor records file within a data directory.
pub const SUPERVISOR_FILE: &str = "SupervisorData.txt";
/// Tutor records file within a data directory.
pub const TUTOR_FILE: &str = "TutorData.txt";
/// Room records file within a data directory.
pub const ROOM_FILE: &str = "RoomData.txt";

/// A parsed supervisor or tutor line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRecord {
    pub name: String,
    pub max_hours: u32,
    pub slots: Vec<usize>,
}

/// A parsed room line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomRecord {
    pub name: String,
    pub slots: Vec<usize>,
}

fn parse_error(line: usize, message: impl Into<String>) -> SchedulerError {
    SchedulerError::Parse {
        line,
        message: message.into(),
    }
}

fn parse_name(field: Option<&str>, line: usize) -> Result<String, SchedulerError> {
    match field.map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(parse_error(line, "missing name")),
    }
}

fn parse_slots(field: Option<&str>, line: usize) -> Result<Vec<usize>, SchedulerError> {
    field
        .unwrap_or_default()
        .split_whitespace()
        .map(|token| {
            token
                .parse::<usize>()
                .map_err(|_| parse_error(line, format!("invalid slot index '{token}'")))
        })
        .collect()
}

fn reject_extra(field: Option<&str>, line: usize) -> Result<(), SchedulerError> {
    match field {
        Some(extra) => Err(parse_error(line, format!("unexpected field '{}'", extra.trim()))),
        None => Ok(()),
    }
}

/// Parses `name, maxHours, slot slot ...`.
pub fn parse_person_line(text: &str, line: usize) -> Result<PersonRecord, SchedulerError> {
    let mut fields = text.split(',');
    let name = parse_name(fields.next(), line)?;
    let hours = fields
        .next()
        .map(str::trim)
        .ok_or_else(|| parse_error(line, format!("missing max hours for '{name}'")))?;
    let max_hours = hours
        .parse::<u32>()
        .map_err(|_| parse_error(line, format!("invalid max hours '{hours}' for '{name}'")))?;
    let slots = parse_slots(fields.next(), line)?;
    reject_extra(fields.next(), line)?;

    Ok(PersonRecord {
        name,
        max_hours,
        slots,
    })
}

/// Parses `name, slot slot ...`.
pub fn parse_room_line(text: &str, line: usize) -> Result<RoomRecord, SchedulerError> {
    let mut fields = text.split(',');
    let name = parse_name(fields.next(), line)?;
    let slots = parse_slots(fields.next(), line)?;
    reject_extra(fields.next(), line)?;

    Ok(RoomRecord { name, slots })
}

/// Non-blank lines with their 1-based numbers.
fn records(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .filter(|(_, l)| !l.trim().is_empty())
}

fn check_slots(
    role: Role,
    name: &str,
    slots: &[usize],
    layout: &WeekLayout,
) -> Result<(), SchedulerError> {
    let slot_count = layout.slot_count();
    match slots.iter().find(|&&s| s >= slot_count) {
        Some(&slot) => Err(SchedulerError::SlotOutOfRange {
            role,
            name: name.to_string(),
            slot,
            slot_count,
        }),
        None => Ok(()),
    }
}

fn with_source(role: Role, err: SchedulerError) -> SchedulerError {
    match err {
        SchedulerError::Parse { line, message } => SchedulerError::Parse {
            line,
            message: format!("{role} records: {message}"),
        },
        other => other,
    }
}

/// Builds a catalog from the three record texts.
///
/// The layout is validated before any record is read.
pub fn load_catalog(
    supervisors: &str,
    tutors: &str,
    rooms: &str,
    layout: WeekLayout,
) -> Result<Catalog, SchedulerError> {
    validate_layout(&layout).map_err(SchedulerError::InvalidCatalog)?;
    let mut builder = Catalog::builder(layout);

    for (role, text) in [(Role::Supervisor, supervisors), (Role::Tutor, tutors)] {
        for (line, record) in records(text) {
            let r = parse_person_line(record, line).map_err(|e| with_source(role, e))?;
            check_slots(role, &r.name, &r.slots, &layout)?;
            let resource = match role {
                Role::Supervisor => Resource::supervisor(r.name, r.max_hours),
                _ => Resource::tutor(r.name, r.max_hours),
            };
            builder.add(resource, r.slots);
        }
    }

    for (line, record) in records(rooms) {
        let r = parse_room_line(record, line).map_err(|e| with_source(Role::Room, e))?;
        check_slots(Role::Room, &r.name, &r.slots, &layout)?;
        builder.add(Resource::room(r.name), r.slots);
    }

    let catalog = builder.build()?;
    debug!(
        supervisors = catalog.supervisors().len(),
        tutors = catalog.tutors().len(),
        rooms = catalog.rooms().len(),
        slots = catalog.slot_count(),
        "catalog loaded"
    );
    Ok(catalog)
}

/// Reads [`SUPERVISOR_FILE`], [`TUTOR_FILE`] and [`ROOM_FILE`] from `dir`.
pub fn read_catalog_dir(
    dir: impl AsRef<Path>,
    layout: WeekLayout,
) -> Result<Catalog, SchedulerError> {
    let dir = dir.as_ref();
    let supervisors = std::fs::read_to_string(dir.join(SUPERVISOR_FILE))?;
    let tutors = std::fs::read_to_string(dir.join(TUTOR_FILE))?;
    let rooms = std::fs::read_to_string(dir.join(ROOM_FILE))?;
    load_catalog(&supervisors, &tutors, &rooms, layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResourceId;

    const SUPERVISORS: &str = "Dana, 20, 0 1 2 10 11\nEmil, 15, 20 21 22\n";
    const TUTORS: &str = "Ana, 10, 0 1 10\n\nBen, 6, 2 11 20 21\n";
    const ROOMS: &str = "B-104, 0 1 2 3\nLab, 10 11 20 21 22\n";

    #[test]
    fn test_parse_person_line() {
        let r = parse_person_line(" Ana , 10,  0 1   10 ", 1).unwrap();
        assert_eq!(r.name, "Ana");
        assert_eq!(r.max_hours, 10);
        assert_eq!(r.slots, vec![0, 1, 10]);

        let r = parse_person_line("Ana, 10", 1).unwrap();
        assert!(r.slots.is_empty());
    }

    #[test]
    fn test_parse_room_line() {
        let r = parse_room_line("Lab, 3 4", 2).unwrap();
        assert_eq!(r, RoomRecord { name: "Lab".into(), slots: vec![3, 4] });
    }

    #[test]
    fn test_malformed_lines() {
        assert!(matches!(
            parse_person_line("Ana", 3),
            Err(SchedulerError::Parse { line: 3, .. })
        ));
        assert!(parse_person_line("Ana, ten, 1", 1).is_err());
        assert!(parse_person_line("Ana, -1, 1", 1).is_err());
        assert!(parse_person_line(", 10, 1", 1).is_err());
        assert!(parse_person_line("Ana, 10, 1 x", 1).is_err());
        assert!(parse_person_line("Ana, 10, 1, 2", 1).is_err());
        assert!(parse_room_line("Lab, 1, 2", 1).is_err());
    }

    #[test]
    fn test_load_catalog() {
        let c = load_catalog(SUPERVISORS, TUTORS, ROOMS, WeekLayout::default()).unwrap();
        assert_eq!(c.supervisors().len(), 2);
        assert_eq!(c.tutors().len(), 2);
        assert_eq!(c.rooms().len(), 2);
        assert_eq!(c.tutors()[1].max_weekly_hours, Some(6));
        assert_eq!(c.eligible_names(Role::Tutor, 1), vec!["Ana"]);
        assert_eq!(c.eligible_names(Role::Room, 10), vec!["Lab"]);
        assert!(c.is_available(Role::Supervisor, 21, ResourceId(1)));
    }

    #[test]
    fn test_line_numbers_count_blank_lines() {
        let tutors = "Ana, 10, 0\n\nBen, x, 1\n";
        let err = load_catalog(SUPERVISORS, tutors, ROOMS, WeekLayout::default()).unwrap_err();
        match err {
            SchedulerError::Parse { line, message } => {
                assert_eq!(line, 3);
                assert!(message.starts_with("tutor records"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_out_of_range_slot_is_rejected() {
        let rooms = "Lab, 49 50\n";
        let err = load_catalog(SUPERVISORS, TUTORS, rooms, WeekLayout::default()).unwrap_err();
        assert!(matches!(
            err,
            SchedulerError::SlotOutOfRange { role: Role::Room, slot: 50, .. }
        ));
    }

    #[test]
    fn test_missing_role_is_rejected() {
        let err = load_catalog(SUPERVISORS, "", ROOMS, WeekLayout::default()).unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidCatalog(_)));
    }

    #[test]
    fn test_oversized_layout_is_rejected_before_parsing() {
        let layout = WeekLayout::new(usize::MAX / 2, 5, 36);
        let err = load_catalog(SUPERVISORS, TUTORS, ROOMS, layout).unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidCatalog(_)));
    }

    #[test]
    fn test_missing_directory() {
        let err = read_catalog_dir("/nonexistent/tutor-data", WeekLayout::default()).unwrap_err();
        assert!(matches!(err, SchedulerError::Io(_)));
    }
}
