// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::tui::component_form::{AttributeField, Form};
use crate::tui::component_page::SinglePage;
use crate::tui::reservation_store::ReservationStore;

pub type ReservationEditor =
    SinglePage<ReservationStore, Form<ReservationStore, AttributeField<ReservationStore>>>;

pub fn new_reservation_editor(title: String, store: &ReservationStore) -> ReservationEditor {
    let fields = store
        .attributes
        .iter()
        .cloned()
        .map(AttributeField::new)
        .collect();

    SinglePage::new(title, Form::new(fields)).with_instructions(vec![
        ("Prev", "<Up>"),
        ("Next", "<Down>"),
        ("Save", "<Enter>"),
        ("Exit", "<Esc>"),
    ])
}
