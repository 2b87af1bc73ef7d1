// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Custom assertion helpers for integration tests.

use raplamobile_core::{AllocatableId, Reservation};

/// Asserts that the resource is allocated to exactly the given appointments,
/// in reservation order.
///
/// # Panics
///
/// Panics if the resource is not allocated or allocated to other appointments.
pub fn assert_allocated_to(reservation: &Reservation, allocatable: &str, expected: &[&str]) {
    let id = AllocatableId::from(allocatable);
    assert!(
        reservation.has_allocated(&id),
        "{allocatable} is not allocated"
    );
    let actual: Vec<_> = reservation
        .appointments_for(&id)
        .iter()
        .map(|a| a.id.as_str())
        .collect();
    assert_eq!(actual, expected, "Appointments of {allocatable} mismatch");
}

/// Asserts that the resource has no restriction entry.
///
/// # Panics
///
/// Panics if the reservation restricts the resource.
pub fn assert_unrestricted(reservation: &Reservation, allocatable: &str) {
    let id = AllocatableId::from(allocatable);
    assert_eq!(
        reservation.restriction(&id),
        None,
        "{allocatable} should not be restricted"
    );
}
