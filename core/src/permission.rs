// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{Days, NaiveDate, NaiveDateTime};

use crate::types::UserId;
use crate::user::User;

/// What a permission grants, ordered from least to most.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    Deny,

    #[default]
    Read,

    /// May book the resource.
    Allocate,

    /// May book the resource even if it is already booked.
    AllocateConflicts,

    Admin,
}

/// Grants an access level on a resource to a user, a group, or everyone,
/// optionally bounded in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Permission {
    /// Only this user is affected.
    #[serde(default)]
    pub user: Option<UserId>,

    /// Only members of this group are affected.
    #[serde(default)]
    pub group: Option<String>,

    #[serde(default)]
    pub access: AccessLevel,

    /// First day an appointment may start on.
    #[serde(default)]
    pub start: Option<NaiveDate>,

    /// Last day an appointment may end on.
    #[serde(default)]
    pub end: Option<NaiveDate>,

    /// Appointments must start at least this many days after today.
    #[serde(default)]
    pub min_advance: Option<u32>,

    /// Appointments must end at most this many days after today.
    #[serde(default)]
    pub max_advance: Option<u32>,
}

impl Permission {
    /// A permission granting `access` to everyone without time bounds.
    pub fn everyone(access: AccessLevel) -> Self {
        Self {
            access,
            ..Default::default()
        }
    }

    pub fn for_user(user: impl Into<UserId>, access: AccessLevel) -> Self {
        Self {
            user: Some(user.into()),
            access,
            ..Default::default()
        }
    }

    pub fn for_group(group: impl Into<String>, access: AccessLevel) -> Self {
        Self {
            group: Some(group.into()),
            access,
            ..Default::default()
        }
    }

    pub fn affects_user(&self, user: &User) -> bool {
        match (&self.user, &self.group) {
            (None, None) => true,
            (Some(id), _) if *id == user.id => true,
            (_, Some(group)) if user.is_member_of(group) => true,
            _ => false,
        }
    }

    /// Whether an appointment from `start` to `end` lies within the bounds of
    /// this permission. An unbounded `end` never satisfies an upper bound.
    pub fn covers(&self, start: NaiveDateTime, end: Option<NaiveDateTime>, today: NaiveDate) -> bool {
        if let Some(first) = self.start
            && start.date() < first
        {
            return false;
        }

        if let Some(last) = self.end {
            match end {
                Some(end) if end.date() <= last => {}
                _ => return false,
            }
        }

        if let Some(days) = self.min_advance {
            match today.checked_add_days(Days::new(days.into())) {
                Some(earliest) if start.date() >= earliest => {}
                _ => return false,
            }
        }

        if let Some(days) = self.max_advance {
            let latest = today.checked_add_days(Days::new(days.into()));
            match (end, latest) {
                (Some(end), Some(latest)) if end.date() <= latest => {}
                _ => return false,
            }
        }

        true
    }
}
