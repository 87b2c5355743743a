//! Session (gene) model.
//!
//! A session is what one slot of a schedule holds: either nothing, or a
//! meeting of one room, one tutor and one supervisor. Partially filled
//! sessions cannot be represented.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Catalog, ResourceId, Role};
use crate::error::SchedulerError;

/// A fully staffed meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Meeting {
    pub room: ResourceId,
    pub tutor: ResourceId,
    pub supervisor: ResourceId,
}

/// One slot's assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Session {
    /// No meeting in this slot.
    #[default]
    Empty,
    /// A meeting is scheduled.
    Meeting(Meeting),
}

impl Session {
    /// Creates a meeting session.
    pub fn meeting(room: ResourceId, tutor: ResourceId, supervisor: ResourceId) -> Self {
        Session::Meeting(Meeting {
            room,
            tutor,
            supervisor,
        })
    }

    /// Creates a session from optional parts.
    ///
    /// All three present gives a meeting, none gives [`Session::Empty`].
    ///
    /// # Errors
    /// [`SchedulerError::PartialSession`] for any other combination.
    pub fn explicit(
        room: Option<ResourceId>,
        tutor: Option<ResourceId>,
        supervisor: Option<ResourceId>,
    ) -> Result<Self, SchedulerError> {
        match (room, tutor, supervisor) {
            (Some(room), Some(tutor), Some(supervisor)) => {
                Ok(Self::meeting(room, tutor, supervisor))
            }
            (None, None, None) => Ok(Session::Empty),
            _ => Err(SchedulerError::PartialSession),
        }
    }

    /// Draws a room, a tutor and a supervisor independently and uniformly.
    ///
    /// A validated catalog holds at least one resource per role.
    pub fn random<R: Rng>(catalog: &Catalog, rng: &mut R) -> Self {
        let mut draw = |role: Role| ResourceId(rng.random_range(0..catalog.resources(role).len()));
        let room = draw(Role::Room);
        let tutor = draw(Role::Tutor);
        let supervisor = draw(Role::Supervisor);
        Self::meeting(room, tutor, supervisor)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Session::Empty)
    }

    pub fn as_meeting(&self) -> Option<&Meeting> {
        match self {
            Session::Meeting(m) => Some(m),
            Session::Empty => None,
        }
    }

    pub fn room(&self) -> Option<ResourceId> {
        self.as_meeting().map(|m| m.room)
    }

    pub fn tutor(&self) -> Option<ResourceId> {
        self.as_meeting().map(|m| m.tutor)
    }

    pub fn supervisor(&self) -> Option<ResourceId> {
        self.as_meeting().map(|m| m.supervisor)
    }

    /// Resource filling `role`, if this is a meeting.
    pub fn get(&self, role: Role) -> Option<ResourceId> {
        match role {
            Role::Room => self.room(),
            Role::Tutor => self.tutor(),
            Role::Supervisor => self.supervisor(),
        }
    }

    /// Replaces the resource filling `role`.
    ///
    /// # Errors
    /// [`SchedulerError::PartialSession`] on an empty session, which has no
    /// role to fill; the session stays empty.
    pub fn set(&mut self, role: Role, id: ResourceId) -> Result<(), SchedulerError> {
        let Session::Meeting(m) = self else {
            return Err(SchedulerError::PartialSession);
        };
        match role {
            Role::Room => m.room = id,
            Role::Tutor => m.tutor = id,
            Role::Supervisor => m.supervisor = id,
        }
        Ok(())
    }

    /// `"<room> <tutor> <supervisor>"`, or `None` for an empty session.
    ///
    /// # Errors
    /// [`SchedulerError::UnknownResource`] if an id is not in the catalog.
    pub fn label(&self, catalog: &Catalog) -> Result<Option<String>, SchedulerError> {
        let Some(m) = self.as_meeting() else {
            return Ok(None);
        };
        Ok(Some(format!(
            "{} {} {}",
            catalog.resource(Role::Room, m.room)?.name,
            catalog.resource(Role::Tutor, m.tutor)?.name,
            catalog.resource(Role::Supervisor, m.supervisor)?.name,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeekLayout;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn catalog() -> Catalog {
        Catalog::builder(WeekLayout::new(2, 1, 36))
            .with_room("R1", [0])
            .with_room("R2", [1])
            .with_tutor("Ana", 5, [0, 1])
            .with_supervisor("Sam", 5, [0, 1])
            .with_supervisor("Kim", 5, [1])
            .build()
            .unwrap()
    }

    #[test]
    fn test_explicit_construction() {
        let id = ResourceId(0);
        assert_eq!(Session::explicit(None, None, None).unwrap(), Session::Empty);
        assert_eq!(
            Session::explicit(Some(id), Some(id), Some(id)).unwrap(),
            Session::meeting(id, id, id)
        );
        assert!(matches!(
            Session::explicit(Some(id), None, Some(id)),
            Err(SchedulerError::PartialSession)
        ));
    }

    #[test]
    fn test_random_session_uses_catalog_ids() {
        let c = catalog();
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..100 {
            let s = Session::random(&c, &mut rng);
            let m = s.as_meeting().unwrap();
            assert!(m.room.index() < 2);
            assert_eq!(m.tutor, ResourceId(0));
            assert!(m.supervisor.index() < 2);
        }
    }

    #[test]
    fn test_accessors() {
        let mut s = Session::meeting(ResourceId(1), ResourceId(0), ResourceId(0));
        assert_eq!(s.room(), Some(ResourceId(1)));
        s.set(Role::Supervisor, ResourceId(1)).unwrap();
        assert_eq!(s.get(Role::Supervisor), Some(ResourceId(1)));
        assert_eq!(s.room(), Some(ResourceId(1)));

        let mut e = Session::Empty;
        assert!(matches!(
            e.set(Role::Room, ResourceId(1)),
            Err(SchedulerError::PartialSession)
        ));
        assert!(e.is_empty());
        assert_eq!(e.tutor(), None);
    }

    #[test]
    fn test_label() {
        let c = catalog();
        let s = Session::meeting(ResourceId(1), ResourceId(0), ResourceId(1));
        assert_eq!(s.label(&c).unwrap().as_deref(), Some("R2 Ana Kim"));
        assert_eq!(Session::Empty.label(&c).unwrap(), None);

        let stale = Session::meeting(ResourceId(0), ResourceId(4), ResourceId(0));
        assert!(stale.label(&c).is_err());
    }
}
