// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration-driven workflows: opening a context from a data file and
//! writing stored reservations back to it.

use std::path::PathBuf;

use raplamobile_core::{
    AllocatableId, ClientFacade, FacadeError, InMemoryFacade, RaplaContext, Selection,
    assign_with_facade,
};

use crate::common::{
    assert_allocated_to, setup_data_file, test_config, test_dataset, test_today,
};

#[tokio::test]
async fn context_opens_data_file_and_logs_in() {
    // Arrange
    let dirs = setup_data_file(&test_dataset()).await.unwrap();

    // Act
    let context = RaplaContext::open(test_config(&dirs.data_path, Some("alice")))
        .await
        .unwrap();

    // Assert
    let facade = context.facade();
    assert_eq!(facade.user().unwrap().username, "alice");
    assert_eq!(facade.today(), test_today());
    assert_eq!(facade.reservations().await.unwrap().len(), 1);
}

#[tokio::test]
async fn context_with_unknown_user_fails() {
    let dirs = setup_data_file(&test_dataset()).await.unwrap();
    let result = RaplaContext::open(test_config(&dirs.data_path, Some("mallory"))).await;
    let err = result.unwrap_err().to_string();
    assert!(err.contains("mallory"), "unexpected error: {err}");
}

#[tokio::test]
async fn context_with_missing_file_fails() {
    let config = test_config(&PathBuf::from("/nonexistent/rapla.json"), None);
    let err = RaplaContext::open(config).await.unwrap_err().to_string();
    assert!(err.contains("/nonexistent/rapla.json"), "unexpected error: {err}");
}

#[tokio::test]
async fn stored_reservation_is_written_back() {
    // Arrange
    let dirs = setup_data_file(&test_dataset()).await.unwrap();
    let context = RaplaContext::open(test_config(&dirs.data_path, Some("alice")))
        .await
        .unwrap();
    let facade = context.facade();
    let mut reservation = facade.reservation(&"res".into()).await.unwrap();
    let lab = facade.allocatable(&"lab".into()).await.unwrap();

    // Act
    reservation.add_allocatable(lab.id.clone());
    let mut selection = Selection::assigned(&reservation, &lab.id);
    assign_with_facade(&mut reservation, &lab, &mut selection, facade).unwrap();
    facade.store_reservation(reservation).await.unwrap();

    // Assert - a fresh facade sees the restriction
    let reopened = InMemoryFacade::open(&dirs.data_path).await.unwrap();
    let stored = reopened.reservation(&"res".into()).await.unwrap();
    assert_allocated_to(&stored, "lab", &["A"]);
    assert_eq!(
        stored.restriction(&AllocatableId::from("lab")),
        Some(&["A".into()][..])
    );
}

#[tokio::test]
async fn malformed_data_file_is_a_data_error() {
    let dirs = setup_data_file(&test_dataset()).await.unwrap();
    tokio::fs::write(&dirs.data_path, "{ not json").await.unwrap();

    let result = InMemoryFacade::open(&dirs.data_path).await;
    assert!(matches!(result, Err(FacadeError::Data(_))));
}
