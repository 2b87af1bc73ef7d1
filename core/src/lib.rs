// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod allocatable;
mod appointment;
mod attribute;
mod classification;
mod config;
mod context;
mod facade;
mod memory;
mod permission;
mod reservation;
mod restriction;
mod types;
mod user;

pub use crate::allocatable::Allocatable;
pub use crate::appointment::{Appointment, Repeating, RepeatingEnd, RepeatingKind};
pub use crate::attribute::{
    Attribute, AttributeError, AttributeType, AttributeValue, accepts_char, default_value,
    format_value, parse_value,
};
pub use crate::classification::{
    Classification, ClassificationFilter, DynamicType, FilterRule, NAME_ATTRIBUTE,
};
pub use crate::config::{APP_NAME, Config};
pub use crate::context::RaplaContext;
pub use crate::facade::{ClientFacade, FacadeError, allocatables_of_type};
pub use crate::memory::{Dataset, InMemoryFacade};
pub use crate::permission::{AccessLevel, Permission};
pub use crate::reservation::Reservation;
pub use crate::restriction::{
    AssignError, Assignment, Notice, Selection, assign_appointments, assign_with_facade,
};
pub use crate::types::{AllocatableId, AppointmentId, ReservationId, UserId};
pub use crate::user::User;
