// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Booking workflows: allocate a resource, restrict it to the appointments
//! the user may book it for, and undo the booking.

use raplamobile_core::{
    AllocatableId, AppointmentId, AssignError, ClientFacade, FacadeError, Notice, Selection,
    assign_with_facade,
};

use crate::common::{assert_allocated_to, assert_unrestricted, test_facade};

#[tokio::test]
async fn booking_permitted_everywhere_is_unrestricted() {
    // Arrange
    let facade = test_facade(Some("bob"));
    let mut reservation = facade.reservation(&"res".into()).await.unwrap();
    let aula = facade.allocatable(&"aula".into()).await.unwrap();

    // Act
    reservation.add_allocatable(aula.id.clone());
    let mut selection = Selection::assigned(&reservation, &aula.id);
    let out = assign_with_facade(&mut reservation, &aula, &mut selection, &facade).unwrap();

    // Assert
    assert_eq!(out.notice(), None);
    assert_unrestricted(&reservation, "aula");
    assert_allocated_to(&reservation, "aula", &["A", "B", "C"]);
}

#[tokio::test]
async fn booking_limited_by_advance_days() {
    // Arrange - lab may be booked by staff at most 7 days ahead
    let facade = test_facade(Some("alice"));
    let mut reservation = facade.reservation(&"res".into()).await.unwrap();
    let lab = facade.allocatable(&"lab".into()).await.unwrap();
    reservation.add_allocatable(lab.id.clone());

    // Act
    let mut selection = Selection::assigned(&reservation, &lab.id);
    let out = assign_with_facade(&mut reservation, &lab, &mut selection, &facade).unwrap();

    // Assert - B is too far ahead, C repeats forever
    assert_eq!(out.accepted, vec![AppointmentId::from("A")]);
    assert_eq!(
        out.rejected,
        vec![AppointmentId::from("B"), AppointmentId::from("C")]
    );
    assert_eq!(
        out.notice(),
        Some(Notice::NoPermissionFor {
            rejected: 2,
            total: 3
        })
    );
    assert_allocated_to(&reservation, "lab", &["A"]);
    assert!(!selection.is_selected(&"B".into()));
}

#[tokio::test]
async fn booking_outside_group_is_refused() {
    // Arrange - bob is not a member of staff
    let facade = test_facade(Some("bob"));
    let mut reservation = facade.reservation(&"res".into()).await.unwrap();
    let lab = facade.allocatable(&"lab".into()).await.unwrap();
    reservation.add_allocatable(lab.id.clone());

    // Act
    let mut selection = Selection::assigned(&reservation, &lab.id);
    let out = assign_with_facade(&mut reservation, &lab, &mut selection, &facade).unwrap();

    // Assert - an empty restriction leaves the booking unrestricted
    assert_eq!(out.notice(), Some(Notice::NoPermissionAtAll));
    assert_eq!(out.restriction(), Some(&[][..]));
    assert!(selection.is_empty());
    assert_unrestricted(&reservation, "lab");
}

#[tokio::test]
async fn admin_may_book_read_only_resource() {
    let facade = test_facade(Some("root"));
    let mut reservation = facade.reservation(&"res".into()).await.unwrap();
    let vault = facade.allocatable(&"vault".into()).await.unwrap();
    reservation.add_allocatable(vault.id.clone());

    let mut selection = Selection::assigned(&reservation, &vault.id);
    let out = assign_with_facade(&mut reservation, &vault, &mut selection, &facade).unwrap();

    assert_eq!(out.notice(), None);
    assert_unrestricted(&reservation, "vault");
}

#[tokio::test]
async fn assignment_without_login_fails_untouched() {
    // Arrange
    let facade = test_facade(None);
    let mut reservation = facade.reservation(&"res".into()).await.unwrap();
    let aula = facade.allocatable(&"aula".into()).await.unwrap();
    reservation.add_allocatable(aula.id.clone());
    reservation.set_restriction(&aula.id, Some(&["B".into()]));
    let before = reservation.clone();

    // Act
    let mut selection: Selection = ["A", "B"].into_iter().collect();
    let result = assign_with_facade(&mut reservation, &aula, &mut selection, &facade);

    // Assert
    assert!(matches!(
        result,
        Err(AssignError::UserLookup(FacadeError::NotAuthenticated))
    ));
    assert_eq!(reservation, before);
    assert_eq!(selection.len(), 2);
}

#[tokio::test]
async fn assignment_without_selection_skips_user_lookup() {
    let facade = test_facade(None);
    let mut reservation = facade.reservation(&"res".into()).await.unwrap();
    let aula = facade.allocatable(&"aula".into()).await.unwrap();
    reservation.add_allocatable(aula.id.clone());

    let mut selection = Selection::new();
    let out = assign_with_facade(&mut reservation, &aula, &mut selection, &facade).unwrap();

    assert!(out.accepted.is_empty());
    assert_eq!(out.notice(), None);
    assert_unrestricted(&reservation, "aula");
}

#[tokio::test]
async fn undo_booking_clears_restriction_and_is_stored() {
    // Arrange
    let facade = test_facade(Some("alice"));
    let mut reservation = facade.reservation(&"res".into()).await.unwrap();
    let lab = AllocatableId::from("lab");
    reservation.add_allocatable(lab.clone());
    reservation.set_restriction(&lab, Some(&["A".into()]));
    facade.store_reservation(reservation.clone()).await.unwrap();

    // Act
    reservation.remove_allocatable(&lab);
    facade.store_reservation(reservation).await.unwrap();

    // Assert
    let stored = facade.reservation(&"res".into()).await.unwrap();
    assert!(!stored.has_allocated(&lab));
    assert_eq!(stored.restriction(&lab), None);
}
