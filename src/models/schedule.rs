//! Schedule (genome) model and fitness function.
//!
//! A schedule holds one [`Session`] per slot of the week. Its fitness is an
//! integer in `[0, 100]` averaging three scores:
//!
//! | Score | Definition |
//! |-------|-----------|
//! | Availability | % of (tutor, supervisor, room) placements inside the resource's availability |
//! | Hours compliance | % of people with `0 < hours < max_weekly_hours` |
//! | Cap | 100 unless the schedule holds more sessions than the weekly cap |
//!
//! Fitness is cached and only recomputed by [`Schedule::compute_fitness`].

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::trace;

use super::{Catalog, ResourceId, Role, Session};
use crate::error::SchedulerError;

/// Probability that a slot of a random schedule receives a meeting.
pub const RANDOM_FILL_PROBABILITY: f64 = 0.8;

/// Intermediate figures of a fitness evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FitnessBreakdown {
    /// Non-empty sessions.
    pub sessions: usize,
    /// Availability matches (at most 3 per session).
    pub matches: usize,
    /// `100 * matches / (3 * sessions)`, 0 without sessions.
    pub availability: u32,
    /// `100 * compliant / people`, 0 without people.
    pub hours_compliance: u32,
    /// 100 within the weekly cap, 0 above it.
    pub cap_score: u32,
    /// Mean of the three scores.
    pub fitness: u32,
}

/// One candidate week: a session per slot and a cached fitness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    sessions: Vec<Session>,
    fitness: u32,
}

/// Hours accumulated per person during one evaluation.
struct HourLedger {
    supervisors: Vec<u32>,
    tutors: Vec<u32>,
}

impl HourLedger {
    fn new(catalog: &Catalog) -> Self {
        Self {
            supervisors: vec![0; catalog.supervisors().len()],
            tutors: vec![0; catalog.tutors().len()],
        }
    }

    fn book(&mut self, role: Role, id: ResourceId) -> Result<(), SchedulerError> {
        let hours = match role {
            Role::Supervisor => &mut self.supervisors,
            Role::Tutor => &mut self.tutors,
            Role::Room => return Ok(()),
        };
        let slot = hours
            .get_mut(id.index())
            .ok_or(SchedulerError::UnknownResource {
                role,
                index: id.index(),
            })?;
        *slot += 1;
        Ok(())
    }

    fn compliant(&self, catalog: &Catalog) -> usize {
        let supervisors = catalog
            .supervisors()
            .iter()
            .zip(&self.supervisors)
            .filter(|&(r, &h)| r.is_hours_compliant(h))
            .count();
        let tutors = catalog
            .tutors()
            .iter()
            .zip(&self.tutors)
            .filter(|&(r, &h)| r.is_hours_compliant(h))
            .count();
        supervisors + tutors
    }
}

impl Schedule {
    /// Creates a schedule of `len` empty slots with fitness 0.
    pub fn empty(len: usize) -> Self {
        Self {
            sessions: vec![Session::Empty; len],
            fitness: 0,
        }
    }

    /// Creates a schedule from sessions without evaluating it.
    pub fn from_sessions(sessions: Vec<Session>) -> Self {
        Self {
            sessions,
            fitness: 0,
        }
    }

    /// Creates a random schedule and evaluates it.
    ///
    /// Each slot receives a random meeting with probability
    /// [`RANDOM_FILL_PROBABILITY`] while fewer than `weekly_hour_cap` slots
    /// are filled; otherwise it stays empty.
    pub fn random<R: Rng>(catalog: &Catalog, rng: &mut R) -> Result<Self, SchedulerError> {
        let cap = catalog.layout().weekly_hour_cap;
        let mut filled = 0;
        let mut sessions = Vec::with_capacity(catalog.slot_count());
        for _ in 0..catalog.slot_count() {
            if rng.random_bool(RANDOM_FILL_PROBABILITY) && filled < cap {
                filled += 1;
                sessions.push(Session::random(catalog, rng));
            } else {
                sessions.push(Session::Empty);
            }
        }

        let mut schedule = Self::from_sessions(sessions);
        schedule.compute_fitness(catalog)?;
        Ok(schedule)
    }

    /// Creates a schedule for the catalog, random or empty.
    pub fn create<R: Rng>(
        catalog: &Catalog,
        randomize: bool,
        rng: &mut R,
    ) -> Result<Self, SchedulerError> {
        if randomize {
            Self::random(catalog, rng)
        } else {
            Ok(Self::empty(catalog.slot_count()))
        }
    }

    /// Cached fitness from the last [`compute_fitness`](Self::compute_fitness).
    #[inline]
    pub fn fitness(&self) -> u32 {
        self.fitness
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Number of slots holding a meeting.
    pub fn session_count(&self) -> usize {
        self.sessions.iter().filter(|s| !s.is_empty()).count()
    }

    /// Session at `index`.
    pub fn session(&self, index: usize) -> Result<&Session, SchedulerError> {
        self.sessions.get(index).ok_or(SchedulerError::SlotIndex {
            index,
            len: self.sessions.len(),
        })
    }

    /// Replaces the session at `index`. Fitness is not recomputed.
    pub fn set_session(&mut self, index: usize, session: Session) -> Result<(), SchedulerError> {
        let len = self.sessions.len();
        let slot = self
            .sessions
            .get_mut(index)
            .ok_or(SchedulerError::SlotIndex { index, len })?;
        *slot = session;
        Ok(())
    }

    /// Checks that the schedule holds exactly one session per catalog slot.
    pub fn check_length(&self, catalog: &Catalog) -> Result<(), SchedulerError> {
        if self.len() != catalog.slot_count() {
            return Err(SchedulerError::ScheduleLength {
                expected: catalog.slot_count(),
                actual: self.len(),
            });
        }
        Ok(())
    }

    /// Scores the schedule against the catalog without touching the cache.
    ///
    /// # Errors
    /// [`SchedulerError::ScheduleLength`] if the schedule does not cover the
    /// catalog's week slot for slot, [`SchedulerError::UnknownResource`] if
    /// a meeting references a resource the catalog does not hold.
    pub fn evaluate(&self, catalog: &Catalog) -> Result<FitnessBreakdown, SchedulerError> {
        self.check_length(catalog)?;
        let mut ledger = HourLedger::new(catalog);
        let mut sessions = 0;
        let mut matches = 0;

        for (slot, session) in self.sessions.iter().enumerate() {
            let Some(m) = session.as_meeting() else {
                continue;
            };
            sessions += 1;
            catalog.resource(Role::Room, m.room)?;
            ledger.book(Role::Tutor, m.tutor)?;
            ledger.book(Role::Supervisor, m.supervisor)?;

            matches += [
                (Role::Tutor, m.tutor),
                (Role::Supervisor, m.supervisor),
                (Role::Room, m.room),
            ]
            .into_iter()
            .filter(|&(role, id)| catalog.is_available(role, slot, id))
            .count();
        }

        let availability = if sessions == 0 {
            0
        } else {
            (100 * matches / (sessions * 3)) as u32
        };
        let people = catalog.people_count();
        let hours_compliance = if people == 0 {
            0
        } else {
            (100 * ledger.compliant(catalog) / people) as u32
        };
        let cap_score = if sessions > catalog.layout().weekly_hour_cap {
            0
        } else {
            100
        };
        let fitness = (availability + hours_compliance + cap_score) / 3;

        trace!(
            sessions,
            matches,
            availability,
            hours_compliance,
            cap_score,
            fitness,
            "evaluated schedule"
        );

        Ok(FitnessBreakdown {
            sessions,
            matches,
            availability,
            hours_compliance,
            cap_score,
            fitness,
        })
    }

    /// Recomputes and caches the fitness.
    pub fn compute_fitness(&mut self, catalog: &Catalog) -> Result<u32, SchedulerError> {
        self.fitness = self.evaluate(catalog)?.fitness;
        Ok(self.fitness)
    }

    /// Orders by fitness, higher first. Equal fitness compares equal.
    pub fn cmp_by_fitness_desc(&self, other: &Self) -> Ordering {
        other.fitness.cmp(&self.fitness)
    }
}
