// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{NaiveDate, NaiveDateTime};

use crate::classification::Classification;
use crate::permission::{AccessLevel, Permission};
use crate::types::AllocatableId;
use crate::user::User;

/// A bookable resource such as a room, a device or a person.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Allocatable {
    pub id: AllocatableId,
    pub classification: Classification,

    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl Allocatable {
    pub fn new(id: impl Into<AllocatableId>, classification: Classification) -> Self {
        Self {
            id: id.into(),
            classification,
            permissions: Vec::new(),
        }
    }

    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.permissions.push(permission);
        self
    }

    pub fn name(&self) -> &str {
        self.classification.name()
    }

    /// Whether `user` may book this resource for an appointment running from
    /// `start` to `end` (`None` = never ends), judged on `today`.
    pub fn can_allocate(
        &self,
        user: &User,
        start: NaiveDateTime,
        end: Option<NaiveDateTime>,
        today: NaiveDate,
    ) -> bool {
        if user.admin {
            return true;
        }

        self.permissions.iter().any(|p| {
            p.access >= AccessLevel::Allocate
                && p.affects_user(user)
                && p.covers(start, end, today)
        })
    }
}
