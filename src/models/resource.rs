//! Resource model.
//!
//! Resources are the people and places a session needs: one room, one
//! tutor and one supervisor. Tutors and supervisors carry a weekly hour
//! limit; rooms do not.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a resource is used for within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Supervisor,
    Tutor,
    Room,
}

impl Role {
    /// All roles, in catalog order.
    pub const ALL: [Role; 3] = [Role::Supervisor, Role::Tutor, Role::Room];

    /// Whether resources of this role have a weekly hour limit.
    pub fn has_hour_limit(self) -> bool {
        !matches!(self, Role::Room)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Role::Supervisor => "supervisor",
            Role::Tutor => "tutor",
            Role::Room => "room",
        };
        f.write_str(label)
    }
}

/// Position of a resource within its role's list in the catalog.
///
/// Ids are only meaningful together with a [`Role`]; tutor #0 and room #0
/// are unrelated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceId(pub usize);

impl ResourceId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A room, tutor or supervisor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Name, unique within the role.
    pub name: String,
    /// What this resource does in a session.
    pub role: Role,
    /// Weekly hour limit. `None` for rooms.
    pub max_weekly_hours: Option<u32>,
}

impl Resource {
    /// Creates a supervisor with a weekly hour limit.
    pub fn supervisor(name: impl Into<String>, max_weekly_hours: u32) -> Self {
        Self {
            name: name.into(),
            role: Role::Supervisor,
            max_weekly_hours: Some(max_weekly_hours),
        }
    }

    /// Creates a tutor with a weekly hour limit.
    pub fn tutor(name: impl Into<String>, max_weekly_hours: u32) -> Self {
        Self {
            name: name.into(),
            role: Role::Tutor,
            max_weekly_hours: Some(max_weekly_hours),
        }
    }

    /// Creates a room.
    pub fn room(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: Role::Room,
            max_weekly_hours: None,
        }
    }

    /// Weekly hour limit, 0 for rooms.
    pub fn hour_limit(&self) -> u32 {
        self.max_weekly_hours.unwrap_or(0)
    }

    /// Whether `hours` scheduled this week count as compliant.
    ///
    /// Compliant means the person works at all and stays strictly below
    /// their limit.
    pub fn is_hours_compliant(&self, hours: u32) -> bool {
        hours > 0 && hours < self.hour_limit()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max_weekly_hours {
            Some(max) => write!(f, "{} ({}, max {} h)", self.name, self.role, max),
            None => write!(f, "{} ({})", self.name, self.role),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_constructors() {
        let s = Resource::supervisor("Dana", 12);
        assert_eq!(s.role, Role::Supervisor);
        assert_eq!(s.max_weekly_hours, Some(12));

        let t = Resource::tutor("Eli", 8);
        assert_eq!(t.role, Role::Tutor);
        assert_eq!(t.hour_limit(), 8);

        let r = Resource::room("B-104");
        assert_eq!(r.role, Role::Room);
        assert_eq!(r.max_weekly_hours, None);
        assert!(!r.role.has_hour_limit());
    }

    #[test]
    fn test_hours_compliance_is_strict() {
        let t = Resource::tutor("Eli", 5);
        assert!(!t.is_hours_compliant(0));
        assert!(t.is_hours_compliant(1));
        assert!(t.is_hours_compliant(4));
        assert!(!t.is_hours_compliant(5));
        assert!(!t.is_hours_compliant(6));
    }

    #[test]
    fn test_display() {
        assert_eq!(Resource::tutor("Eli", 5).to_string(), "Eli (tutor, max 5 h)");
        assert_eq!(Resource::room("B-104").to_string(), "B-104 (room)");
    }
}
