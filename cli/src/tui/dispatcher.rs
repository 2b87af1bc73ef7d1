// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use raplamobile_core::{Allocatable, AllocatableId, AppointmentId};

type Callback = Rc<RefCell<dyn FnMut(&Action)>>;

pub struct Dispatcher {
    subscribers: Vec<Callback>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    pub fn register(&mut self, callback: Callback) {
        self.subscribers.push(callback);
    }

    pub fn dispatch(&mut self, action: Action) {
        tracing::trace!(?action, "dispatching");
        for sub in &self.subscribers {
            (sub.borrow_mut())(&action);
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    /// The background loader delivered the rows of the list.
    AllocatablesLoaded(Vec<Allocatable>),
    /// Reload the list.
    Refresh,

    /// Check the box of an unchecked resource, booking it.
    ToggleAllocatable(AllocatableId),
    /// Enter on a row.
    ActivateAllocatable(AllocatableId),
    OpenContextMenu(AllocatableId),
    RequestUndoBooking(AllocatableId),

    ToggleAppointment(AppointmentId),
    MoveDialogCursor(isize),
    ConfirmDialog,
    CancelDialog,

    UpdateAttribute(String, String),

    SubmitChanges,
}
