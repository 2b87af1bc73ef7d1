// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Flex;
use ratatui::prelude::*;
use ratatui::symbols::border;
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};
use raplamobile_core::AllocatableId;

use crate::tui::allocatable_store::{AllocatableStore, Dialog};
use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::util::{format_repeating, format_time_range};

const ASSIGN_HINT: &str =
    "If no appointment is selected, the allocatable will be assigned to all appointments.";

/// The modal dialogs of the allocatable screen, drawn over the list.
pub struct DialogView;

impl DialogView {
    pub fn new() -> Self {
        Self
    }

    fn render_assign(&self, store: &AllocatableStore, area: Rect, buf: &mut Buffer) {
        let Some(Dialog::AssignAppointments {
            selection, cursor, ..
        }) = &store.dialog
        else {
            return;
        };

        let mut lines: Vec<Line> = store
            .reservation
            .appointments()
            .iter()
            .enumerate()
            .map(|(i, appointment)| {
                let check = if selection.is_selected(&appointment.id) { "[x]" } else { "[ ]" };
                let repeating = format_repeating(appointment);
                let mut line = Line::from(vec![
                    Span::raw(format!("{check} ")),
                    Span::raw(format_time_range(appointment)),
                    Span::raw(" "),
                    repeating.dark_gray(),
                ]);
                if i == *cursor {
                    line = line.reversed();
                }
                line
            })
            .collect();
        lines.push(Line::default());
        lines.push(ASSIGN_HINT.italic().into());

        let height = lines.len() as u16 + 2;
        let popup = popup_area(area, height);
        let block = dialog_block("Assign appointments", " Toggle <Space> OK <Enter> Cancel <Esc> ");
        Clear.render(popup, buf);
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block)
            .render(popup, buf);
    }

    fn render_menu(&self, name: &str, area: Rect, buf: &mut Buffer) {
        let popup = popup_area(area, 3);
        let block = dialog_block(name, " Select <Enter> Cancel <Esc> ");
        Clear.render(popup, buf);
        Paragraph::new(Line::from("Undo booking").reversed())
            .block(block)
            .render(popup, buf);
    }

    fn render_confirm(&self, name: &str, area: Rect, buf: &mut Buffer) {
        let popup = popup_area(area, 3);
        let block = dialog_block("Undo booking", " Yes <Enter> No <Esc> ");
        Clear.render(popup, buf);
        Paragraph::new(format!("Remove {name} from the reservation?"))
            .block(block)
            .render(popup, buf);
    }
}

impl Component<AllocatableStore> for DialogView {
    fn render(&self, store: &RefCell<AllocatableStore>, area: Rect, buf: &mut Buffer) {
        let store = store.borrow();
        match &store.dialog {
            None => {}
            Some(Dialog::AssignAppointments { .. }) => self.render_assign(&store, area, buf),
            Some(Dialog::ContextMenu(id)) => self.render_menu(name_of(&store, id), area, buf),
            Some(Dialog::ConfirmUndoBooking(id)) => {
                self.render_confirm(name_of(&store, id), area, buf)
            }
        }
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<AllocatableStore>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        let (is_assign, appointment) = {
            let store = store.borrow();
            let is_assign = match &store.dialog {
                None => return None,
                Some(dialog) => matches!(dialog, Dialog::AssignAppointments { .. }),
            };
            (is_assign, store.dialog_appointment().cloned())
        };

        match (event.code, is_assign) {
            (KeyCode::Enter, _) | (KeyCode::Char('y'), false) => {
                dispatcher.dispatch(Action::ConfirmDialog);
            }
            (KeyCode::Esc, _) | (KeyCode::Char('n'), false) => {
                dispatcher.dispatch(Action::CancelDialog);
            }
            (KeyCode::Up | KeyCode::Char('k'), true) => {
                dispatcher.dispatch(Action::MoveDialogCursor(-1));
            }
            (KeyCode::Down | KeyCode::Char('j'), true) => {
                dispatcher.dispatch(Action::MoveDialogCursor(1));
            }
            (KeyCode::Char(' '), true) => {
                if let Some(id) = appointment {
                    dispatcher.dispatch(Action::ToggleAppointment(id));
                }
            }
            _ => {}
        }

        // modal: nothing reaches the list while a dialog is open
        Some(Message::Handled)
    }
}

fn name_of<'a>(store: &'a AllocatableStore, id: &'a AllocatableId) -> &'a str {
    store
        .rows
        .iter()
        .find(|a| &a.id == id)
        .map(|a| a.name())
        .filter(|name| !name.is_empty())
        .unwrap_or(id.as_str())
}

fn dialog_block<'a>(title: &'a str, instructions: &'a str) -> Block<'a> {
    Block::bordered()
        .border_set(border::ROUNDED)
        .title(Line::from(format!(" {title} ").bold()).centered())
        .title_bottom(Line::from(instructions.blue()).centered())
}

fn popup_area(area: Rect, height: u16) -> Rect {
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::horizontal([Constraint::Percentage(70)])
        .flex(Flex::Center)
        .areas(area);
    area
}
