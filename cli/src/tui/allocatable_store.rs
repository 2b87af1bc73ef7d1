// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc, sync::Arc};

use raplamobile_core::{
    Allocatable, AllocatableId, AppointmentId, ClientFacade, Reservation, Selection,
    assign_with_facade,
};

use crate::tui::dispatcher::{Action, Dispatcher};

/// State of the allocatable details screen.
pub struct AllocatableStore {
    pub reservation: Reservation,
    pub category: String,

    /// Allocatables of the category, sorted by name.
    pub rows: Vec<Allocatable>,
    pub dialog: Option<Dialog>,

    /// Non-blocking message shown in the status line.
    pub status: Option<Status>,

    /// Whether the reservation has been changed
    pub dirty: bool,

    /// Whether the user submit the changes
    pub submit: bool,

    needs_refresh: bool,
    facade: Arc<dyn ClientFacade>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    /// Actions on a checked row.
    ContextMenu(AllocatableId),
    ConfirmUndoBooking(AllocatableId),
    AssignAppointments {
        allocatable: AllocatableId,
        selection: Selection,
        cursor: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Notice(String),
    Error(String),
}

impl AllocatableStore {
    pub fn new(facade: Arc<dyn ClientFacade>, reservation: Reservation, category: String) -> Self {
        Self {
            reservation,
            category,
            rows: Vec::new(),
            dialog: None,
            status: None,
            dirty: false,
            submit: false,
            needs_refresh: false,
            facade,
        }
    }

    /// A row is checked, and its box disabled, once the resource is booked.
    pub fn is_checked(&self, id: &AllocatableId) -> bool {
        self.reservation.has_allocated(id)
    }

    /// Returns whether the list should be reloaded, clearing the request.
    pub fn take_refresh(&mut self) -> bool {
        std::mem::take(&mut self.needs_refresh)
    }

    pub fn register_to(that: Rc<RefCell<Self>>, dispatcher: &mut Dispatcher) {
        let callback = Rc::new(RefCell::new(move |action: &Action| {
            that.borrow_mut().apply(action);
        }));
        dispatcher.register(callback);
    }

    fn apply(&mut self, action: &Action) {
        match action {
            Action::AllocatablesLoaded(rows) => self.rows = rows.clone(),
            Action::Refresh => self.needs_refresh = true,
            Action::ToggleAllocatable(id) => self.toggle(id),
            Action::ActivateAllocatable(id) => {
                if self.is_checked(id) {
                    self.open_assign_dialog(id.clone());
                }
            }
            Action::OpenContextMenu(id) => {
                if self.is_checked(id) {
                    self.dialog = Some(Dialog::ContextMenu(id.clone()));
                }
            }
            Action::RequestUndoBooking(id) => {
                if self.is_checked(id) {
                    self.dialog = Some(Dialog::ConfirmUndoBooking(id.clone()));
                }
            }
            Action::ToggleAppointment(id) => {
                if let Some(Dialog::AssignAppointments { selection, .. }) = &mut self.dialog {
                    selection.toggle(id);
                }
            }
            Action::MoveDialogCursor(offset) => self.move_dialog_cursor(*offset),
            Action::ConfirmDialog => self.confirm_dialog(),
            Action::CancelDialog => self.dialog = None,
            Action::SubmitChanges => self.submit = true,
            Action::UpdateAttribute(..) => {}
        }
    }

    fn toggle(&mut self, id: &AllocatableId) {
        // a checked box is disabled, undoing goes through the context menu
        if self.is_checked(id) {
            return;
        }

        tracing::debug!(allocatable = %id, "booking allocatable");
        self.reservation.add_allocatable(id.clone());
        self.dirty = true;
        self.status = None;
        self.open_assign_dialog(id.clone());
    }

    fn open_assign_dialog(&mut self, allocatable: AllocatableId) {
        let selection = Selection::assigned(&self.reservation, &allocatable);
        self.dialog = Some(Dialog::AssignAppointments {
            allocatable,
            selection,
            cursor: 0,
        });
    }

    fn move_dialog_cursor(&mut self, offset: isize) {
        let len = self.reservation.appointments().len();
        match &mut self.dialog {
            Some(Dialog::AssignAppointments { cursor, .. }) if len > 0 => {
                *cursor = cursor.saturating_add_signed(offset).min(len - 1);
            }
            _ => {}
        }
    }

    fn confirm_dialog(&mut self) {
        match self.dialog.take() {
            Some(Dialog::ContextMenu(id)) => {
                self.dialog = Some(Dialog::ConfirmUndoBooking(id));
            }
            Some(Dialog::ConfirmUndoBooking(id)) => {
                tracing::debug!(allocatable = %id, "undoing booking");
                self.reservation.remove_allocatable(&id);
                self.dirty = true;
                self.status = None;
                self.needs_refresh = true;
            }
            Some(Dialog::AssignAppointments {
                allocatable,
                mut selection,
                ..
            }) => self.assign(&allocatable, &mut selection),
            None => {}
        }
    }

    fn assign(&mut self, id: &AllocatableId, selection: &mut Selection) {
        let Some(allocatable) = self.rows.iter().find(|a| &a.id == id) else {
            tracing::warn!(allocatable = %id, "allocatable is not listed");
            return;
        };

        match assign_with_facade(
            &mut self.reservation,
            allocatable,
            selection,
            self.facade.as_ref(),
        ) {
            Ok(assignment) => {
                self.dirty = true;
                self.needs_refresh = true;
                self.status = assignment
                    .notice()
                    .map(|notice| Status::Notice(notice.to_string()));
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to assign appointments");
                self.status = Some(Status::Error(e.to_string()));
            }
        }
    }

    /// The appointment under the cursor of the assignment dialog.
    pub fn dialog_appointment(&self) -> Option<&AppointmentId> {
        match &self.dialog {
            Some(Dialog::AssignAppointments { cursor, .. }) => self
                .reservation
                .appointments()
                .get(*cursor)
                .map(|a| &a.id),
            _ => None,
        }
    }
}
