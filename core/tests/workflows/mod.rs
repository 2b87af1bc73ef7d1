// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end workflow tests for the raplamobile-core crate.
//!
//! These tests drive the in-memory facade, the restriction calculator and the
//! context together, the way the client does.

mod booking_lifecycle;
mod config_driven;
