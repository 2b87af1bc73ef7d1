// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::types::UserId;

/// A user account of the scheduling system.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct User {
    pub id: UserId,

    /// Login name.
    pub username: String,

    /// Display name.
    #[serde(default)]
    pub name: Option<String>,

    /// Administrators may allocate every resource.
    #[serde(default)]
    pub admin: bool,

    /// Keys of the groups the user belongs to.
    #[serde(default)]
    pub groups: Vec<String>,
}

impl User {
    pub fn new(id: impl Into<UserId>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            name: None,
            admin: false,
            groups: Vec::new(),
        }
    }

    pub fn is_member_of(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }
}
