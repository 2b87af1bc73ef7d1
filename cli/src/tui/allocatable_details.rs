// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use raplamobile_core::AllocatableId;

use crate::tui::allocatable_store::{AllocatableStore, Status};
use crate::tui::component::{Component, Message};
use crate::tui::component_dialog::DialogView;
use crate::tui::dispatcher::{Action, Dispatcher};

/// Check-box list of the allocatables of one category.
pub struct AllocatableDetails {
    cursor: usize,
    dialog: DialogView,
}

impl AllocatableDetails {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            dialog: DialogView::new(),
        }
    }

    fn layout(&self) -> Layout {
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).horizontal_margin(1)
    }

    fn current(&self, store: &AllocatableStore) -> Option<AllocatableId> {
        let cursor = self.cursor.min(store.rows.len().saturating_sub(1));
        store.rows.get(cursor).map(|a| a.id.clone())
    }

    fn render_rows(&self, store: &AllocatableStore, area: Rect, buf: &mut Buffer) {
        if store.rows.is_empty() {
            let text = format!("No allocatables of category {}", store.category);
            Paragraph::new(text.dark_gray()).render(area, buf);
            return;
        }

        let cursor = self.cursor.min(store.rows.len() - 1);
        let offset = cursor.saturating_sub((area.height as usize).saturating_sub(1));
        let lines: Vec<Line> = store
            .rows
            .iter()
            .enumerate()
            .skip(offset)
            .take(area.height as usize)
            .map(|(i, allocatable)| {
                let checked = store.is_checked(&allocatable.id);
                let check = match checked {
                    true => "[x]".dark_gray(),
                    false => "[ ]".into(),
                };
                let mut line = Line::from(vec![check, " ".into(), allocatable.name().into()]);
                if i == cursor {
                    line = line.reversed();
                }
                line
            })
            .collect();
        Paragraph::new(lines).render(area, buf);
    }

    fn render_status(&self, store: &AllocatableStore, area: Rect, buf: &mut Buffer) {
        let line = match &store.status {
            Some(Status::Notice(text)) => text.as_str().yellow(),
            Some(Status::Error(text)) => text.as_str().red(),
            None => return,
        };
        Paragraph::new(line).render(area, buf);
    }
}

impl Component<AllocatableStore> for AllocatableDetails {
    fn render(&self, store: &RefCell<AllocatableStore>, area: Rect, buf: &mut Buffer) {
        let [list, status] = self.layout().areas(area);
        {
            let store = store.borrow();
            self.render_rows(&store, list, buf);
            self.render_status(&store, status, buf);
        }
        self.dialog.render(store, area, buf);
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<AllocatableStore>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        if let Some(msg) = self.dialog.on_key(dispatcher, store, area, event) {
            return Some(msg);
        }

        let (len, current) = {
            let store = store.borrow();
            (store.rows.len(), self.current(&store))
        };

        match event.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.min(len.saturating_sub(1)).saturating_sub(1);
                Some(Message::Handled)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor = (self.cursor + 1).min(len.saturating_sub(1));
                Some(Message::Handled)
            }
            KeyCode::Char(' ') => {
                if let Some(id) = current {
                    dispatcher.dispatch(Action::ToggleAllocatable(id));
                }
                Some(Message::Handled)
            }
            KeyCode::Enter => {
                if let Some(id) = current {
                    dispatcher.dispatch(Action::ActivateAllocatable(id));
                }
                Some(Message::Handled)
            }
            KeyCode::Char('m') => {
                if let Some(id) = current {
                    dispatcher.dispatch(Action::OpenContextMenu(id));
                }
                Some(Message::Handled)
            }
            KeyCode::Char('r') => {
                dispatcher.dispatch(Action::Refresh);
                Some(Message::Handled)
            }
            KeyCode::Char('q') => {
                dispatcher.dispatch(Action::SubmitChanges);
                Some(Message::Exit)
            }
            _ => None,
        }
    }
}
