// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.
//!
//! The sample dataset describes one reservation with three appointments and
//! three rooms with different permissions:
//!
//! - `aula`: everyone may allocate it.
//! - `lab`: the `staff` group may allocate it up to 7 days ahead.
//! - `vault`: everyone may only read it.

use std::path::Path;

use chrono::{Days, NaiveDate, NaiveDateTime};
use raplamobile_core::{
    AccessLevel, Allocatable, Appointment, Attribute, AttributeType, AttributeValue,
    Classification, Config, Dataset, DynamicType, InMemoryFacade, NAME_ATTRIBUTE, Permission,
    Repeating, RepeatingEnd, RepeatingKind, Reservation, User,
};

/// The date every test judges permissions against.
#[must_use]
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
}

/// A datetime `days` after [`test_today`] at the given hour.
#[must_use]
pub fn days_ahead(days: u64, hour: u32) -> NaiveDateTime {
    test_today()
        .checked_add_days(Days::new(days))
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .expect("valid datetime")
}

fn room(id: &str, name: &str, permission: Permission) -> Allocatable {
    let classification = Classification::new("room")
        .with(NAME_ATTRIBUTE, AttributeValue::String(name.into()))
        .with("seats", AttributeValue::Int(20));
    Allocatable::new(id, classification).with_permission(permission)
}

/// The reservation of the sample dataset: `A` tomorrow, `B` in ten days and
/// `C` weekly forever, starting in two days.
#[must_use]
pub fn test_reservation() -> Reservation {
    let classification = Classification::new("event")
        .with(NAME_ATTRIBUTE, AttributeValue::String("Lecture".into()));
    Reservation::new("res", classification)
        .with_appointment(Appointment::new("A", days_ahead(1, 9), days_ahead(1, 11)))
        .with_appointment(Appointment::new("B", days_ahead(10, 9), days_ahead(10, 11)))
        .with_appointment(
            Appointment::new("C", days_ahead(2, 14), days_ahead(2, 16)).with_repeating(Repeating {
                kind: RepeatingKind::Weekly,
                interval: 1,
                end: RepeatingEnd::Forever,
            }),
        )
}

/// Creates the sample dataset.
#[must_use]
pub fn test_dataset() -> Dataset {
    let mut alice = User::new("u1", "alice");
    alice.groups.push("staff".into());
    let mut root = User::new("u0", "root");
    root.admin = true;

    let mut name = Attribute::new(NAME_ATTRIBUTE, AttributeType::String);
    name.name = Some("Name".into());

    Dataset {
        users: vec![alice, root, User::new("u2", "bob")],
        dynamic_types: vec![
            DynamicType {
                key: "room".into(),
                name: Some("Rooms".into()),
                attributes: vec![name.clone(), Attribute::new("seats", AttributeType::Int)],
            },
            DynamicType {
                key: "event".into(),
                name: Some("Events".into()),
                attributes: vec![name],
            },
        ],
        allocatables: vec![
            room("vault", "Vault", Permission::everyone(AccessLevel::Read)),
            room(
                "lab",
                "Lab",
                Permission {
                    max_advance: Some(7),
                    ..Permission::for_group("staff", AccessLevel::Allocate)
                },
            ),
            room("aula", "Aula", Permission::everyone(AccessLevel::Allocate)),
        ],
        reservations: vec![test_reservation()],
    }
}

/// Creates an in-memory facade over the sample dataset, optionally logged in.
#[must_use]
pub fn test_facade(username: Option<&str>) -> InMemoryFacade {
    let mut facade = InMemoryFacade::new(test_dataset()).with_today(test_today());
    if let Some(username) = username {
        facade.login(username).expect("user exists in the sample dataset");
    }
    facade
}

/// Creates a test configuration pointing at the given data file.
#[must_use]
pub fn test_config(data_path: &Path, username: Option<&str>) -> Config {
    Config {
        data_path: data_path.to_owned(),
        username: username.map(str::to_owned),
        today: Some(test_today()),
    }
}
