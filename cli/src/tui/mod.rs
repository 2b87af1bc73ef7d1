// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod allocatable_details;
mod allocatable_store;
mod app;
mod component;
mod component_dialog;
mod component_form;
mod component_page;
mod dispatcher;
mod loader;
mod reservation_editor;
mod reservation_store;

pub use app::{book_allocatables, edit_classification};
