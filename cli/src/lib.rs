// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod allocatable_formatter;
mod appointment_formatter;
mod cli;
mod cmd_allocatable;
mod cmd_booking;
mod cmd_reservation;
mod config;
mod reservation_formatter;
mod table;
mod tui;
mod util;

pub use crate::cli::{Cli, Commands, run};
pub use crate::config::Config;
