// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use tokio::{fs, sync::RwLock};

use crate::allocatable::Allocatable;
use crate::classification::{ClassificationFilter, DynamicType};
use crate::facade::{ClientFacade, FacadeError};
use crate::reservation::Reservation;
use crate::types::{AllocatableId, ReservationId};
use crate::user::User;

/// Everything the in-memory facade knows, as stored in its JSON data file.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub users: Vec<User>,

    #[serde(default)]
    pub dynamic_types: Vec<DynamicType>,

    #[serde(default)]
    pub allocatables: Vec<Allocatable>,

    #[serde(default)]
    pub reservations: Vec<Reservation>,
}

/// A [`ClientFacade`] serving a [`Dataset`] held in memory.
///
/// When opened from a file, stored reservations are written back to it.
#[derive(Debug)]
pub struct InMemoryFacade {
    data: RwLock<Dataset>,
    user: Option<User>,
    today: NaiveDate,
    path: Option<PathBuf>,
}

impl InMemoryFacade {
    pub fn new(data: Dataset) -> Self {
        Self {
            data: RwLock::new(data),
            user: None,
            today: Local::now().date_naive(),
            path: None,
        }
    }

    /// Loads the dataset from a JSON file.
    pub async fn open(path: &Path) -> Result<Self, FacadeError> {
        tracing::debug!(path = %path.display(), "loading dataset");
        let content = fs::read_to_string(path).await?;
        let data: Dataset = serde_json::from_str(&content)?;
        Ok(Self {
            path: Some(path.to_owned()),
            ..Self::new(data)
        })
    }

    /// Overrides the date permissions are judged against.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Authenticates as the user with the given login name.
    pub fn login(&mut self, username: &str) -> Result<(), FacadeError> {
        let user = self
            .data
            .get_mut()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned()
            .ok_or_else(|| FacadeError::UnknownUser(username.to_owned()))?;

        tracing::debug!(username, "logged in");
        self.user = Some(user);
        Ok(())
    }

    pub async fn snapshot(&self) -> Dataset {
        self.data.read().await.clone()
    }

    pub async fn write_to(&self, path: &Path) -> Result<(), FacadeError> {
        let content = serde_json::to_string_pretty(&*self.data.read().await)?;
        fs::write(path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl ClientFacade for InMemoryFacade {
    fn user(&self) -> Result<User, FacadeError> {
        self.user.clone().ok_or(FacadeError::NotAuthenticated)
    }

    fn today(&self) -> NaiveDate {
        self.today
    }

    async fn dynamic_type(&self, key: &str) -> Result<DynamicType, FacadeError> {
        self.data
            .read()
            .await
            .dynamic_types
            .iter()
            .find(|t| t.key == key)
            .cloned()
            .ok_or_else(|| FacadeError::UnknownDynamicType(key.to_owned()))
    }

    async fn dynamic_types(&self) -> Result<Vec<DynamicType>, FacadeError> {
        Ok(self.data.read().await.dynamic_types.clone())
    }

    async fn allocatables(
        &self,
        filters: &[ClassificationFilter],
    ) -> Result<Vec<Allocatable>, FacadeError> {
        let data = self.data.read().await;
        Ok(data
            .allocatables
            .iter()
            .filter(|a| filters.is_empty() || filters.iter().any(|f| f.matches(&a.classification)))
            .cloned()
            .collect())
    }

    async fn allocatable(&self, id: &AllocatableId) -> Result<Allocatable, FacadeError> {
        self.data
            .read()
            .await
            .allocatables
            .iter()
            .find(|a| a.id == *id)
            .cloned()
            .ok_or_else(|| FacadeError::UnknownAllocatable(id.clone()))
    }

    async fn reservation(&self, id: &ReservationId) -> Result<Reservation, FacadeError> {
        self.data
            .read()
            .await
            .reservations
            .iter()
            .find(|r| r.id == *id)
            .cloned()
            .ok_or_else(|| FacadeError::UnknownReservation(id.clone()))
    }

    async fn reservations(&self) -> Result<Vec<Reservation>, FacadeError> {
        Ok(self.data.read().await.reservations.clone())
    }

    async fn store_reservation(&self, reservation: Reservation) -> Result<(), FacadeError> {
        tracing::debug!(id = %reservation.id, "storing reservation");
        {
            let mut data = self.data.write().await;
            match data.reservations.iter_mut().find(|r| r.id == reservation.id) {
                Some(slot) => *slot = reservation,
                None => data.reservations.push(reservation),
            }
        }

        if let Some(path) = &self.path {
            self.write_to(path).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributeValue;
    use crate::classification::{Classification, NAME_ATTRIBUTE};

    fn dataset() -> Dataset {
        let room = |id: &str, name: &str| {
            Allocatable::new(
                id,
                Classification::new("room").with(NAME_ATTRIBUTE, AttributeValue::String(name.into())),
            )
        };
        Dataset {
            users: vec![User::new("u1", "alice")],
            dynamic_types: vec![DynamicType {
                key: "room".into(),
                name: None,
                attributes: Vec::new(),
            }],
            allocatables: vec![
                room("r1", "Lab"),
                room("r2", "Aula"),
                Allocatable::new("d1", Classification::new("device")),
            ],
            reservations: vec![Reservation::new("res", Classification::new("event"))],
        }
    }

    #[tokio::test]
    async fn test_user_requires_login() {
        let mut facade = InMemoryFacade::new(dataset());
        assert!(matches!(facade.user(), Err(FacadeError::NotAuthenticated)));

        assert!(matches!(
            facade.login("bob"),
            Err(FacadeError::UnknownUser(name)) if name == "bob"
        ));

        facade.login("alice").unwrap();
        assert_eq!(facade.user().unwrap().id.as_str(), "u1");
    }

    #[tokio::test]
    async fn test_allocatables_filtered_by_type() {
        let facade = InMemoryFacade::new(dataset());
        let rooms = crate::facade::allocatables_of_type(&facade, "room").await.unwrap();
        let names: Vec<_> = rooms.iter().map(Allocatable::name).collect();
        assert_eq!(names, vec!["Aula", "Lab"]);

        assert_eq!(facade.allocatables(&[]).await.unwrap().len(), 3);
        assert!(matches!(
            facade.dynamic_type("car").await,
            Err(FacadeError::UnknownDynamicType(_))
        ));
    }

    #[tokio::test]
    async fn test_store_reservation_replaces_by_id() {
        let facade = InMemoryFacade::new(dataset());
        let mut res = facade.reservation(&"res".into()).await.unwrap();
        res.add_allocatable("r1".into());
        facade.store_reservation(res).await.unwrap();
        facade
            .store_reservation(Reservation::new("new", Classification::new("event")))
            .await
            .unwrap();

        let all = facade.reservations().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].has_allocated(&"r1".into()));
    }
}
