// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Restricting an allocated resource to a subset of a reservation's
//! appointments, keeping only the appointments the user may book it for.

use std::collections::HashSet;
use std::fmt;

use crate::allocatable::Allocatable;
use crate::appointment::Appointment;
use crate::facade::{ClientFacade, FacadeError};
use crate::reservation::Reservation;
use crate::types::{AllocatableId, AppointmentId};
use crate::user::User;

/// Appointments checked in the assignment dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: HashSet<AppointmentId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// The initial dialog selection: the appointments the resource is
    /// currently allocated to, or nothing if it is not allocated.
    pub fn assigned(reservation: &Reservation, allocatable: &AllocatableId) -> Self {
        Self {
            selected: reservation
                .appointments_for(allocatable)
                .into_iter()
                .map(|a| a.id.clone())
                .collect(),
        }
    }

    pub fn is_selected(&self, id: &AppointmentId) -> bool {
        self.selected.contains(id)
    }

    pub fn select(&mut self, id: AppointmentId) {
        self.selected.insert(id);
    }

    pub fn deselect(&mut self, id: &AppointmentId) {
        self.selected.remove(id);
    }

    /// Flips the selection state and returns the new one.
    pub fn toggle(&mut self, id: &AppointmentId) -> bool {
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.clone());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

impl<I: Into<AppointmentId>> FromIterator<I> for Selection {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        Self {
            selected: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Outcome of an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Selected appointments the user may book the resource for, in
    /// reservation order.
    pub accepted: Vec<AppointmentId>,

    /// Selected appointments the user may not book the resource for. They
    /// have been removed from the selection.
    pub rejected: Vec<AppointmentId>,

    /// Number of appointments of the reservation.
    pub total: usize,
}

impl Assignment {
    /// The restriction handed to the reservation, `None` if unrestricted.
    pub fn restriction(&self) -> Option<&[AppointmentId]> {
        if self.accepted.len() == self.total {
            None
        } else {
            Some(&self.accepted)
        }
    }

    pub fn notice(&self) -> Option<Notice> {
        let rejected = self.rejected.len();
        if rejected == self.total {
            Some(Notice::NoPermissionAtAll)
        } else if rejected > 0 {
            Some(Notice::NoPermissionFor {
                rejected,
                total: self.total,
            })
        } else {
            None
        }
    }
}

/// A non-blocking message telling the user some appointments were refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    NoPermissionAtAll,
    NoPermissionFor { rejected: usize, total: usize },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NoPermissionAtAll => {
                write!(f, "You have no permission to allocate this resource")
            }
            Notice::NoPermissionFor { rejected, total } => {
                write!(f, "No permission for {rejected} of {total} appointments")
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssignError {
    #[error("Failed to look up the current user: {0}")]
    UserLookup(#[source] FacadeError),
}

/// Restricts `allocatable` to the selected appointments `can_allocate`
/// accepts. Rejected appointments are deselected.
///
/// The predicate is called once per selected appointment. If it fails, the
/// reservation and the selection are left untouched.
pub fn assign_appointments<F, E>(
    reservation: &mut Reservation,
    allocatable: &AllocatableId,
    selection: &mut Selection,
    mut can_allocate: F,
) -> Result<Assignment, E>
where
    F: FnMut(&Appointment) -> Result<bool, E>,
{
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();
    for appointment in reservation.appointments() {
        if !selection.is_selected(&appointment.id) {
            continue;
        }

        if can_allocate(appointment)? {
            accepted.push(appointment.id.clone());
        } else {
            rejected.push(appointment.id.clone());
        }
    }

    for id in &rejected {
        selection.deselect(id);
    }

    let assignment = Assignment {
        accepted,
        rejected,
        total: reservation.appointments().len(),
    };
    reservation.set_restriction(allocatable, assignment.restriction());
    tracing::debug!(
        allocatable = %allocatable,
        accepted = assignment.accepted.len(),
        rejected = assignment.rejected.len(),
        "appointments assigned"
    );
    Ok(assignment)
}

/// [`assign_appointments`] judged by the permissions of `allocatable` for
/// the facade's user on the facade's today.
///
/// The user is looked up once, before the first permission check.
pub fn assign_with_facade(
    reservation: &mut Reservation,
    allocatable: &Allocatable,
    selection: &mut Selection,
    facade: &dyn ClientFacade,
) -> Result<Assignment, AssignError> {
    let today = facade.today();
    let mut user: Option<User> = None;
    assign_appointments(reservation, &allocatable.id, selection, |appointment| {
        if user.is_none() {
            user = Some(facade.user().map_err(AssignError::UserLookup)?);
        }
        Ok(user.as_ref().is_some_and(|user| {
            allocatable.can_allocate(user, appointment.start, appointment.max_end(), today)
        }))
    })
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;
    use crate::classification::Classification;

    fn dt(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, d)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn reservation(ids: &[&str]) -> Reservation {
        let mut r = Reservation::new("res", Classification::new("event"));
        for (i, id) in ids.iter().enumerate() {
            r = r.with_appointment(Appointment::new(*id, dt(20 + i as u32), dt(20 + i as u32)));
        }
        r.add_allocatable("room".into());
        r
    }

    fn permit(ids: &'static [&'static str]) -> impl FnMut(&Appointment) -> Result<bool, Infallible> {
        move |a| Ok(ids.contains(&a.id.as_str()))
    }

    #[test]
    fn test_partial_permission() {
        let room = AllocatableId::from("room");
        let mut r = reservation(&["A", "B", "C"]);
        let mut selection: Selection = ["A", "C"].into_iter().collect();

        let out = assign_appointments(&mut r, &room, &mut selection, permit(&["A"])).unwrap();

        assert_eq!(out.accepted, vec![AppointmentId::from("A")]);
        assert_eq!(out.rejected, vec![AppointmentId::from("C")]);
        assert!(!selection.is_selected(&"C".into()));
        assert!(selection.is_selected(&"A".into()));
        assert_eq!(r.restriction(&room), Some(&[AppointmentId::from("A")][..]));
        assert_eq!(
            out.notice(),
            Some(Notice::NoPermissionFor {
                rejected: 1,
                total: 3
            })
        );
        assert_eq!(
            out.notice().unwrap().to_string(),
            "No permission for 1 of 3 appointments"
        );
    }

    #[test]
    fn test_everything_selected_and_permitted_is_unrestricted() {
        let room = AllocatableId::from("room");
        let mut r = reservation(&["A", "B"]);
        r.set_restriction(&room, Some(&["A".into()]));
        let mut selection: Selection = ["A", "B"].into_iter().collect();

        let out = assign_appointments(&mut r, &room, &mut selection, permit(&["A", "B"])).unwrap();

        assert_eq!(out.restriction(), None);
        assert_eq!(r.restriction(&room), None);
        assert_eq!(out.notice(), None);
    }

    #[test]
    fn test_nothing_permitted() {
        let room = AllocatableId::from("room");

        let mut r = reservation(&["A", "B"]);
        let mut selection: Selection = ["A", "B"].into_iter().collect();
        let out = assign_appointments(&mut r, &room, &mut selection, permit(&[])).unwrap();
        assert_eq!(out.rejected.len(), 2);
        assert_eq!(out.restriction(), Some(&[][..]));
        assert_eq!(out.notice(), Some(Notice::NoPermissionAtAll));
        assert!(selection.is_empty());

        let mut r = reservation(&["A", "B", "C"]);
        let mut selection: Selection = ["B"].into_iter().collect();
        let out = assign_appointments(&mut r, &room, &mut selection, permit(&[])).unwrap();
        assert_eq!(out.rejected.len(), 1);
        assert_eq!(
            out.notice(),
            Some(Notice::NoPermissionFor {
                rejected: 1,
                total: 3
            })
        );
    }

    #[test]
    fn test_reservation_without_appointments() {
        let room = AllocatableId::from("room");
        let mut r = reservation(&[]);
        let mut selection = Selection::new();

        let out = assign_appointments(&mut r, &room, &mut selection, permit(&[])).unwrap();

        assert_eq!(out.total, 0);
        assert!(out.rejected.is_empty());
        assert_eq!(out.restriction(), None);
        assert_eq!(out.notice(), Some(Notice::NoPermissionAtAll));
    }

    #[test]
    fn test_predicate_called_once_per_selected_appointment() {
        let room = AllocatableId::from("room");
        let mut r = reservation(&["A", "B", "C", "D"]);
        let mut selection: Selection = ["B", "D"].into_iter().collect();

        let mut seen = Vec::new();
        assign_appointments(&mut r, &room, &mut selection, |a| {
            seen.push(a.id.clone());
            Ok::<_, Infallible>(true)
        })
        .unwrap();

        assert_eq!(seen, vec![AppointmentId::from("B"), AppointmentId::from("D")]);
    }

    #[test]
    fn test_idempotent() {
        let room = AllocatableId::from("room");
        let mut r = reservation(&["A", "B", "C"]);
        let mut selection: Selection = ["A", "B"].into_iter().collect();

        let first = assign_appointments(&mut r, &room, &mut selection, permit(&["A"])).unwrap();
        let state = r.clone();
        let mut again: Selection = ["A", "B"].into_iter().collect();
        let second = assign_appointments(&mut r, &room, &mut again, permit(&["A"])).unwrap();

        assert_eq!(first, second);
        assert_eq!(r, state);
    }

    #[test]
    fn test_failing_predicate_leaves_state_untouched() {
        let room = AllocatableId::from("room");
        let mut r = reservation(&["A", "B"]);
        r.set_restriction(&room, Some(&["B".into()]));
        let before = r.clone();
        let mut selection: Selection = ["A"].into_iter().collect();

        let out = assign_appointments(&mut r, &room, &mut selection, |_| Err("offline"));

        assert_eq!(out, Err("offline"));
        assert_eq!(r, before);
        assert!(selection.is_selected(&"A".into()));
    }

    #[test]
    fn test_assigned_selection() {
        let room = AllocatableId::from("room");
        let mut r = reservation(&["A", "B", "C"]);
        r.set_restriction(&room, Some(&["B".into()]));
        let selection = Selection::assigned(&r, &room);
        assert_eq!(selection.len(), 1);
        assert!(selection.is_selected(&"B".into()));

        let selection = Selection::assigned(&r, &"projector".into());
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle() {
        let mut selection = Selection::new();
        assert!(selection.toggle(&"A".into()));
        assert!(!selection.toggle(&"A".into()));
        assert!(selection.is_empty());
    }
}
