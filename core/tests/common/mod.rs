// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - Test data factories (fixtures)
//! - Custom assertion helpers
//! - Temporary data files with auto-cleanup

mod assertions;
mod fixtures;
mod temp_dir;

#[allow(unused_imports)]
pub use assertions::{assert_allocated_to, assert_unrestricted};
#[allow(unused_imports)]
pub use fixtures::{
    days_ahead, test_config, test_dataset, test_facade, test_reservation, test_today,
};
#[allow(unused_imports)]
pub use temp_dir::{TempDirs, setup_data_file};
