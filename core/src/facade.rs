// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::allocatable::Allocatable;
use crate::classification::{ClassificationFilter, DynamicType};
use crate::reservation::Reservation;
use crate::types::{AllocatableId, ReservationId};
use crate::user::User;

/// Errors raised by a [`ClientFacade`].
#[derive(Debug, thiserror::Error)]
pub enum FacadeError {
    #[error("No user is logged in")]
    NotAuthenticated,

    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("Unknown dynamic type: {0}")]
    UnknownDynamicType(String),

    #[error("Unknown allocatable: {0}")]
    UnknownAllocatable(AllocatableId),

    #[error("Unknown reservation: {0}")]
    UnknownReservation(ReservationId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Data error: {0}")]
    Data(#[source] Box<dyn Error + Send + Sync>),
}

impl From<serde_json::Error> for FacadeError {
    fn from(err: serde_json::Error) -> Self {
        FacadeError::Data(Box::new(err))
    }
}

/// The client side of the scheduling server.
#[async_trait]
pub trait ClientFacade: Send + Sync {
    /// The authenticated user.
    fn user(&self) -> Result<User, FacadeError>;

    /// The date permissions are judged against.
    fn today(&self) -> NaiveDate;

    async fn dynamic_type(&self, key: &str) -> Result<DynamicType, FacadeError>;

    async fn dynamic_types(&self) -> Result<Vec<DynamicType>, FacadeError>;

    /// Allocatables matching any of the filters, every one if `filters` is empty.
    async fn allocatables(
        &self,
        filters: &[ClassificationFilter],
    ) -> Result<Vec<Allocatable>, FacadeError>;

    async fn allocatable(&self, id: &AllocatableId) -> Result<Allocatable, FacadeError>;

    async fn reservation(&self, id: &ReservationId) -> Result<Reservation, FacadeError>;

    async fn reservations(&self) -> Result<Vec<Reservation>, FacadeError>;

    async fn store_reservation(&self, reservation: Reservation) -> Result<(), FacadeError>;
}

/// The allocatables of the dynamic type `key`, sorted by name.
pub async fn allocatables_of_type(
    facade: &dyn ClientFacade,
    key: &str,
) -> Result<Vec<Allocatable>, FacadeError> {
    let dynamic_type = facade.dynamic_type(key).await?;
    let filter = dynamic_type.new_classification_filter();
    let mut allocatables = facade.allocatables(&[filter]).await?;
    allocatables.sort_by(|a, b| a.name().cmp(b.name()));
    Ok(allocatables)
}
