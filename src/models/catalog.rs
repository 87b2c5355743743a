//! Resource catalog and weekly slot layout.
//!
//! The catalog is the read-only input of the optimizer: every known room,
//! tutor and supervisor plus, for each slot of the week, which of them are
//! available. Resources are addressed by [`ResourceId`] (index within
//! their role), and availability is stored as per-slot id sets.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Resource, ResourceId, Role};
use crate::error::SchedulerError;
use crate::validation::validate_catalog;

/// Shape of the scheduling week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekLayout {
    /// Slots per day.
    pub hours_per_day: usize,
    /// Days per week.
    pub days_per_week: usize,
    /// Most sessions a schedule may hold before it is penalized.
    pub weekly_hour_cap: usize,
}

impl Default for WeekLayout {
    fn default() -> Self {
        Self {
            hours_per_day: 10,
            days_per_week: 5,
            weekly_hour_cap: 36,
        }
    }
}

impl WeekLayout {
    pub fn new(hours_per_day: usize, days_per_week: usize, weekly_hour_cap: usize) -> Self {
        Self {
            hours_per_day,
            days_per_week,
            weekly_hour_cap,
        }
    }

    /// Number of slots in the week (schedule length).
    ///
    /// Saturates for layouts that fail validation.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.hours_per_day.saturating_mul(self.days_per_week)
    }

    /// Day (0-based) a slot falls on.
    #[inline]
    pub fn day_of(&self, slot: usize) -> usize {
        slot / self.hours_per_day
    }

    /// Hour within its day (0-based) a slot falls on.
    #[inline]
    pub fn hour_of(&self, slot: usize) -> usize {
        slot % self.hours_per_day
    }

    /// Slot index for a day and hour.
    #[inline]
    pub fn slot_at(&self, day: usize, hour: usize) -> usize {
        day * self.hours_per_day + hour
    }
}

/// A resource together with the slots it is available in.
///
/// Builder input; slots are checked against the layout when the catalog
/// is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub resource: Resource,
    pub slots: Vec<usize>,
}

/// Immutable view of all resources and their weekly availability.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    layout: WeekLayout,
    supervisors: Vec<Resource>,
    tutors: Vec<Resource>,
    rooms: Vec<Resource>,
    supervisor_availability: Vec<BTreeSet<ResourceId>>,
    tutor_availability: Vec<BTreeSet<ResourceId>>,
    room_availability: Vec<BTreeSet<ResourceId>>,
}

impl Catalog {
    /// Starts a catalog for the given week layout.
    pub fn builder(layout: WeekLayout) -> CatalogBuilder {
        CatalogBuilder::new(layout)
    }

    pub fn layout(&self) -> &WeekLayout {
        &self.layout
    }

    /// Schedule length for this catalog.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.layout.slot_count()
    }

    pub fn supervisors(&self) -> &[Resource] {
        &self.supervisors
    }

    pub fn tutors(&self) -> &[Resource] {
        &self.tutors
    }

    pub fn rooms(&self) -> &[Resource] {
        &self.rooms
    }

    /// All resources of a role, in id order.
    pub fn resources(&self, role: Role) -> &[Resource] {
        match role {
            Role::Supervisor => &self.supervisors,
            Role::Tutor => &self.tutors,
            Role::Room => &self.rooms,
        }
    }

    /// Looks up a resource, failing on ids the catalog does not hold.
    pub fn resource(&self, role: Role, id: ResourceId) -> Result<&Resource, SchedulerError> {
        self.resources(role)
            .get(id.index())
            .ok_or(SchedulerError::UnknownResource {
                role,
                index: id.index(),
            })
    }

    /// Finds a resource id by name.
    pub fn find(&self, role: Role, name: &str) -> Option<ResourceId> {
        self.resources(role)
            .iter()
            .position(|r| r.name == name)
            .map(ResourceId)
    }

    /// Per-slot availability table for a role.
    pub fn availability(&self, role: Role) -> &[BTreeSet<ResourceId>] {
        match role {
            Role::Supervisor => &self.supervisor_availability,
            Role::Tutor => &self.tutor_availability,
            Role::Room => &self.room_availability,
        }
    }

    /// Whether a resource is listed as available in a slot.
    ///
    /// Slots outside the week are never available.
    pub fn is_available(&self, role: Role, slot: usize, id: ResourceId) -> bool {
        self.availability(role)
            .get(slot)
            .is_some_and(|ids| ids.contains(&id))
    }

    /// Names of the resources available in a slot.
    pub fn eligible_names(&self, role: Role, slot: usize) -> Vec<&str> {
        let resources = self.resources(role);
        self.availability(role)
            .get(slot)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| resources.get(id.index()))
                    .map(|r| r.name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of people (supervisors and tutors) with hour limits.
    pub fn people_count(&self) -> usize {
        self.supervisors.len() + self.tutors.len()
    }
}

/// Collects resources and builds a validated [`Catalog`].
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    layout: WeekLayout,
    entries: Vec<CatalogEntry>,
}

impl CatalogBuilder {
    pub fn new(layout: WeekLayout) -> Self {
        Self {
            layout,
            entries: Vec::new(),
        }
    }

    /// Adds a resource with its available slots.
    pub fn add(&mut self, resource: Resource, slots: impl IntoIterator<Item = usize>) -> &mut Self {
        self.entries.push(CatalogEntry {
            resource,
            slots: slots.into_iter().collect(),
        });
        self
    }

    /// Adds a supervisor.
    pub fn with_supervisor(
        mut self,
        name: impl Into<String>,
        max_hours: u32,
        slots: impl IntoIterator<Item = usize>,
    ) -> Self {
        self.add(Resource::supervisor(name, max_hours), slots);
        self
    }

    /// Adds a tutor.
    pub fn with_tutor(
        mut self,
        name: impl Into<String>,
        max_hours: u32,
        slots: impl IntoIterator<Item = usize>,
    ) -> Self {
        self.add(Resource::tutor(name, max_hours), slots);
        self
    }

    /// Adds a room.
    pub fn with_room(
        mut self,
        name: impl Into<String>,
        slots: impl IntoIterator<Item = usize>,
    ) -> Self {
        self.add(Resource::room(name), slots);
        self
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Validates the collected entries and builds the catalog.
    ///
    /// # Errors
    /// [`SchedulerError::InvalidCatalog`] with every detected problem.
    pub fn build(self) -> Result<Catalog, SchedulerError> {
        validate_catalog(&self.layout, &self.entries).map_err(SchedulerError::InvalidCatalog)?;

        let slot_count = self.layout.slot_count();
        let mut catalog = Catalog {
            layout: self.layout,
            supervisors: Vec::new(),
            tutors: Vec::new(),
            rooms: Vec::new(),
            supervisor_availability: vec![BTreeSet::new(); slot_count],
            tutor_availability: vec![BTreeSet::new(); slot_count],
            room_availability: vec![BTreeSet::new(); slot_count],
        };

        for entry in self.entries {
            let role = entry.resource.role;
            let (list, table) = match role {
                Role::Supervisor => (
                    &mut catalog.supervisors,
                    &mut catalog.supervisor_availability,
                ),
                Role::Tutor => (&mut catalog.tutors, &mut catalog.tutor_availability),
                Role::Room => (&mut catalog.rooms, &mut catalog.room_availability),
            };
            let id = ResourceId(list.len());
            list.push(entry.resource);
            for slot in entry.slots {
                table[slot].insert(id);
            }
        }

        Ok(catalog)
    }
}
