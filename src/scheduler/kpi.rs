//! Timetable quality metrics (KPIs).
//!
//! Reports what a fitness score hides: who works how many hours, how many
//! placements fall outside availability, and how close the week is to the
//! session cap.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Sessions | Slots holding a meeting |
//! | Availability Rate | matches / (3 * sessions) |
//! | Over Limit | People with hours >= their weekly maximum |
//! | Idle | People with no hours |
//! | Cap Headroom | weekly cap - sessions (negative when over) |

use serde::Serialize;

use crate::error::SchedulerError;
use crate::models::{Catalog, Role, Schedule};

/// Hours one person works in a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonHours {
    pub name: String,
    pub role: Role,
    pub hours: u32,
    pub max_hours: u32,
}

/// Timetable performance indicators.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleKpi {
    /// Slots holding a meeting.
    pub sessions: usize,
    /// Slots left empty.
    pub empty_slots: usize,
    /// Fraction of placements inside availability (0.0..1.0).
    pub availability_rate: f64,
    /// Hours per supervisor, then per tutor, in catalog order.
    pub hours_by_person: Vec<PersonHours>,
    /// People at or above their weekly maximum.
    pub over_limit: usize,
    /// People without any session.
    pub idle: usize,
    /// Sessions left before the weekly cap (negative when over).
    pub cap_headroom: i64,
}

impl ScheduleKpi {
    /// Computes KPIs for a schedule.
    pub fn calculate(schedule: &Schedule, catalog: &Catalog) -> Result<Self, SchedulerError> {
        schedule.check_length(catalog)?;
        let mut hours_by_person: Vec<PersonHours> = [Role::Supervisor, Role::Tutor]
            .into_iter()
            .flat_map(|role| catalog.resources(role).iter())
            .map(|r| PersonHours {
                name: r.name.clone(),
                role: r.role,
                hours: 0,
                max_hours: r.hour_limit(),
            })
            .collect();
        let tutor_offset = catalog.supervisors().len();

        let mut sessions = 0;
        let mut matches = 0;
        for (slot, session) in schedule.sessions().iter().enumerate() {
            let Some(m) = session.as_meeting() else {
                continue;
            };
            sessions += 1;
            for (role, id) in [
                (Role::Supervisor, m.supervisor),
                (Role::Tutor, m.tutor),
                (Role::Room, m.room),
            ] {
                catalog.resource(role, id)?;
                if catalog.is_available(role, slot, id) {
                    matches += 1;
                }
            }
            hours_by_person[m.supervisor.index()].hours += 1;
            hours_by_person[tutor_offset + m.tutor.index()].hours += 1;
        }

        let availability_rate = if sessions == 0 {
            0.0
        } else {
            matches as f64 / (sessions * 3) as f64
        };
        let over_limit = hours_by_person.iter().filter(|p| p.hours >= p.max_hours).count();
        let idle = hours_by_person.iter().filter(|p| p.hours == 0).count();

        Ok(Self {
            sessions,
            empty_slots: schedule.len() - sessions,
            availability_rate,
            hours_by_person,
            over_limit,
            idle,
            cap_headroom: catalog.layout().weekly_hour_cap as i64 - sessions as i64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ResourceId, Session, WeekLayout};

    fn catalog() -> Catalog {
        Catalog::builder(WeekLayout::new(4, 1, 3))
            .with_room("R", [0, 1, 2, 3])
            .with_tutor("Ana", 2, [0, 1])
            .with_tutor("Ben", 4, [2, 3])
            .with_supervisor("Sam", 10, [0])
            .build()
            .unwrap()
    }

    #[test]
    fn test_kpi_calculation() {
        let c = catalog();
        let ana = Session::meeting(ResourceId(0), ResourceId(0), ResourceId(0));
        let s = Schedule::from_sessions(vec![ana, ana, Session::Empty, Session::Empty]);
        let kpi = ScheduleKpi::calculate(&s, &c).unwrap();

        assert_eq!(kpi.sessions, 2);
        assert_eq!(kpi.empty_slots, 2);
        // slot 0: 3 matches, slot 1: tutor + room
        assert!((kpi.availability_rate - 5.0 / 6.0).abs() < 1e-10);
        assert_eq!(kpi.hours_by_person[0].name, "Sam");
        assert_eq!(kpi.hours_by_person[0].hours, 2);
        assert_eq!(kpi.hours_by_person[1].hours, 2);
        assert_eq!(kpi.hours_by_person[2].hours, 0);
        assert_eq!(kpi.over_limit, 1); // Ana at the limit
        assert_eq!(kpi.idle, 1); // Ben
        assert_eq!(kpi.cap_headroom, 1);
    }

    #[test]
    fn test_empty_schedule_kpi() {
        let kpi = ScheduleKpi::calculate(&Schedule::empty(4), &catalog()).unwrap();
        assert_eq!(kpi.sessions, 0);
        assert_eq!(kpi.availability_rate, 0.0);
        assert_eq!(kpi.idle, 3);
    }

    #[test]
    fn test_stale_reference_fails() {
        let mut s = Schedule::empty(4);
        s.set_session(2, Session::meeting(ResourceId(0), ResourceId(7), ResourceId(0)))
            .unwrap();
        assert!(matches!(
            ScheduleKpi::calculate(&s, &catalog()),
            Err(SchedulerError::UnknownResource { role: Role::Tutor, index: 7 })
        ));
        assert!(matches!(
            ScheduleKpi::calculate(&Schedule::empty(3), &catalog()),
            Err(SchedulerError::ScheduleLength { expected: 4, actual: 3 })
        ));
    }
}
