// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use crate::appointment::Appointment;
use crate::classification::Classification;
use crate::types::{AllocatableId, AppointmentId, ReservationId};

/// A booking: a set of appointments and the resources allocated to them.
///
/// A resource without a restriction entry is allocated to every appointment.
/// A restriction entry is never empty.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub classification: Classification,

    #[serde(default)]
    appointments: Vec<Appointment>,

    #[serde(default)]
    allocatables: Vec<AllocatableId>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    restrictions: BTreeMap<AllocatableId, Vec<AppointmentId>>,
}

impl Reservation {
    pub fn new(id: impl Into<ReservationId>, classification: Classification) -> Self {
        Self {
            id: id.into(),
            classification,
            appointments: Vec::new(),
            allocatables: Vec::new(),
            restrictions: BTreeMap::new(),
        }
    }

    pub fn with_appointment(mut self, appointment: Appointment) -> Self {
        self.appointments.push(appointment);
        self
    }

    pub fn name(&self) -> &str {
        self.classification.name()
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn appointment(&self, id: &AppointmentId) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == *id)
    }

    pub fn allocatables(&self) -> &[AllocatableId] {
        &self.allocatables
    }

    pub fn has_allocated(&self, id: &AllocatableId) -> bool {
        self.allocatables.contains(id)
    }

    /// Appointments the resource is allocated to, in reservation order. Empty
    /// if the resource is not allocated at all.
    pub fn appointments_for(&self, id: &AllocatableId) -> Vec<&Appointment> {
        if !self.has_allocated(id) {
            return Vec::new();
        }

        match self.restrictions.get(id) {
            Some(restriction) => self
                .appointments
                .iter()
                .filter(|a| restriction.contains(&a.id))
                .collect(),
            None => self.appointments.iter().collect(),
        }
    }

    /// Allocates the resource to every appointment. No-op if already allocated.
    pub fn add_allocatable(&mut self, id: AllocatableId) {
        if !self.has_allocated(&id) {
            self.allocatables.push(id);
        }
    }

    /// Removes the allocation together with its restriction.
    pub fn remove_allocatable(&mut self, id: &AllocatableId) {
        self.allocatables.retain(|a| a != id);
        self.restrictions.remove(id);
    }

    /// Restricts the resource to the given appointments. `None`, an empty
    /// list, or a list naming every appointment lifts the restriction.
    /// Ids that are not appointments of this reservation are dropped.
    pub fn set_restriction(&mut self, id: &AllocatableId, appointments: Option<&[AppointmentId]>) {
        let restriction: Vec<AppointmentId> = appointments
            .unwrap_or_default()
            .iter()
            .filter(|a| self.appointment(a).is_some())
            .cloned()
            .collect();

        if restriction.is_empty() || self.covers_all(&restriction) {
            self.restrictions.remove(id);
        } else {
            self.restrictions.insert(id.clone(), restriction);
        }
    }

    /// The restriction entry, `None` when the resource is unrestricted.
    pub fn restriction(&self, id: &AllocatableId) -> Option<&[AppointmentId]> {
        self.restrictions.get(id).map(Vec::as_slice)
    }

    fn covers_all(&self, restriction: &[AppointmentId]) -> bool {
        self.appointments.iter().all(|a| restriction.contains(&a.id))
    }
}
