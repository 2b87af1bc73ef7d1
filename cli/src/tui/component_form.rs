// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};
use raplamobile_core::{Attribute, AttributeType, accepts_char};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::util::{
    byte_index_of_grapheme, byte_range_of_grapheme_at, grapheme_count, unicode_width_of_graphemes,
};

pub struct Form<S, C: FormItem<S>> {
    items: Vec<C>,
    item_index: usize,
    _phantom: std::marker::PhantomData<S>,
}

impl<S, C: FormItem<S>> Form<S, C> {
    pub fn new(items: Vec<C>) -> Self {
        Self {
            items,
            item_index: 0,
            _phantom: std::marker::PhantomData,
        }
    }

    fn layout(&self, store: &RefCell<S>) -> Layout {
        Layout::vertical(self.items.iter().map(|item| match item.item_state(store) {
            FormItemState::Invisible => Constraint::Max(0),
            _ => Constraint::Max(3),
        }))
        .margin(1)
    }

    fn navigate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>, offset: isize) {
        if let Some(a) = self.items.get_mut(self.item_index) {
            a.deactivate(dispatcher, store);
        }

        // skip invisible items
        let len = self.items.len();
        let mut new_index = self.item_index;
        let mut steps = offset.unsigned_abs();
        while steps > 0 {
            new_index = match offset > 0 {
                true => (new_index + 1) % len,
                false => (new_index + len - 1) % len,
            };

            if let Some(item) = self.items.get(new_index)
                && item_is_visible(item, store)
            {
                steps -= 1;
            } else if new_index == self.item_index {
                break;
            }
        }
        self.item_index = new_index;

        if let Some(a) = self.items.get_mut(self.item_index) {
            a.activate(dispatcher, store);
        }
    }
}

impl<S, C: FormItem<S>> Component<S> for Form<S, C> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        let areas = self.layout(store).split(area);
        let mut is_last = true;
        // reverse order to draw the last item first
        for (item, area) in self.items.iter().zip(areas.iter()).rev() {
            if item_is_visible(item, store) {
                item_render(is_last, item, store, *area, buf);
                item.render(store, item_inner(*area), buf);
                is_last = false;
            }
        }
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        self.items
            .iter()
            .zip(self.layout(store).split(area).iter())
            .take(self.item_index + 1)
            .last()
            .and_then(|(comp, area)| comp.get_cursor_position(store, *area))
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        let areas = self.layout(store).split(area);
        if let Some((comp, subarea)) = self
            .items
            .iter_mut()
            .zip(areas.iter())
            .take(self.item_index + 1)
            .last()
            && let Some(msg) = comp.on_key(dispatcher, store, *subarea, event)
        {
            return Some(msg);
        };

        match event.code {
            KeyCode::Up | KeyCode::BackTab if self.item_index > 0 => {
                self.navigate(dispatcher, store, -1);
                Some(Message::CursorUpdated)
            }
            KeyCode::Down | KeyCode::Tab if self.item_index + 1 < self.items.len() => {
                self.navigate(dispatcher, store, 1);
                Some(Message::CursorUpdated)
            }
            KeyCode::Enter => {
                dispatcher.dispatch(Action::SubmitChanges);
                Some(Message::Exit)
            }
            _ => None,
        }
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        if let Some(item) = self.items.get_mut(self.item_index) {
            item.activate(dispatcher, store);
        }
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        if let Some(item) = self.items.get_mut(self.item_index) {
            item.deactivate(dispatcher, store);
        }
    }
}

pub trait FormItem<S>: Component<S> {
    fn item_title(&self, store: &RefCell<S>) -> &str;
    fn item_state(&self, store: &RefCell<S>) -> FormItemState;
}

pub enum FormItemState {
    Active,
    Inactive,
    Invisible,
}

/// Stores holding the text of typed attributes, keyed by attribute key.
pub trait AttributeStoreLike {
    fn attribute_text(&self, key: &str) -> String;
}

/// A form item editing one attribute, its behavior picked by the type tag.
///
/// Text-like types (string, int, date) are edited in place and filtered with
/// [`accepts_char`]. Booleans and categories are picked from a row of options
/// with `<Left>`/`<Right>`.
#[derive(Debug)]
pub struct AttributeField<S> {
    attribute: Attribute,
    options: Vec<String>,
    active: bool,
    character_index: usize,
    _phantom: std::marker::PhantomData<S>,
}

impl<S: AttributeStoreLike> AttributeField<S> {
    pub fn new(attribute: Attribute) -> Self {
        let options = match attribute.kind {
            AttributeType::Boolean => vec!["yes".to_owned(), "no".to_owned()],
            AttributeType::Category => attribute.categories.clone(),
            _ => Vec::new(),
        };
        Self {
            attribute,
            options,
            active: false,
            character_index: 0,
            _phantom: std::marker::PhantomData,
        }
    }

    fn is_choice(&self) -> bool {
        matches!(
            self.attribute.kind,
            AttributeType::Boolean | AttributeType::Category
        )
    }

    fn text(&self, store: &RefCell<S>) -> String {
        store.borrow().attribute_text(&self.attribute.key)
    }

    fn set(&self, dispatcher: &mut Dispatcher, value: String) {
        dispatcher.dispatch(Action::UpdateAttribute(self.attribute.key.clone(), value));
    }

    fn selected(&self, store: &RefCell<S>) -> Option<usize> {
        let v = self.text(store);
        self.options.iter().position(|o| *o == v)
    }

    /// Column offset of each option label, `[x] ` included.
    fn option_offsets(&self) -> Vec<u16> {
        let mut x = 0;
        self.options
            .iter()
            .map(|o| {
                let offset = x;
                x += 4 + o.width() as u16 + 2;
                offset
            })
            .collect()
    }

    fn on_choice_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        event: KeyEvent,
    ) -> Option<Message> {
        let len = self.options.len();
        if len == 0 {
            return None;
        }

        let index = match (event.code, self.selected(store)) {
            (KeyCode::Left, Some(i)) => (i + len - 1) % len,
            (KeyCode::Right | KeyCode::Char(' '), Some(i)) => (i + 1) % len,
            (KeyCode::Left, None) => len - 1,
            (KeyCode::Right | KeyCode::Char(' '), None) => 0,
            _ => return None,
        };
        let value = self.options[index].clone();
        self.set(dispatcher, value);
        Some(Message::CursorUpdated)
    }

    fn on_text_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        event: KeyEvent,
    ) -> Option<Message> {
        use KeyCode::*;
        let mut v = self.text(store);
        match event.code {
            Left if self.character_index > 0 => self.character_index -= 1,
            Right if self.character_index < grapheme_count(&v) => self.character_index += 1,
            Backspace if self.character_index > 0 => {
                if let Some(range) = byte_range_of_grapheme_at(&v, self.character_index - 1) {
                    v.replace_range(range, "");
                    self.set(dispatcher, v);
                    self.character_index -= 1;
                }
            }
            Char(c) => {
                if !accepts_char(self.attribute.kind, &v, self.character_index, c) {
                    return Some(Message::Handled);
                }
                v.insert(byte_index_of_grapheme(&v, self.character_index), c);
                // a combining mark joins the cluster before the cursor
                self.character_index = (self.character_index + 1).min(grapheme_count(&v));
                self.set(dispatcher, v);
            }
            Left | Right | Backspace => {}
            _ => return None,
        };

        Some(Message::CursorUpdated)
    }
}

impl<S: AttributeStoreLike> Component<S> for AttributeField<S> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        if !self.is_choice() {
            Paragraph::new(self.text(store)).render(area, buf);
            return;
        }

        let selected = self.selected(store);
        let spans: Vec<Span> = self
            .options
            .iter()
            .enumerate()
            .map(|(i, o)| {
                let icon = if selected == Some(i) { 'x' } else { ' ' };
                Span::raw(format!("[{icon}] {o}  "))
            })
            .collect();
        Paragraph::new(Line::from(spans)).render(area, buf);
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        if !self.active {
            return None;
        }

        let inner = item_inner(area);
        if self.is_choice() {
            let offsets = self.option_offsets();
            let x = self
                .selected(store)
                .and_then(|i| offsets.get(i).copied())
                .unwrap_or_default();
            return Some((inner.x + x + 1, inner.y));
        }

        let v = self.text(store);
        let width = unicode_width_of_graphemes(&v, self.character_index);
        Some((inner.x + width as u16, inner.y))
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        if !self.active {
            return None;
        }

        match self.is_choice() {
            true => self.on_choice_key(dispatcher, store, event),
            false => self.on_text_key(dispatcher, store, event),
        }
    }

    fn activate(&mut self, _dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.active = true;
        self.character_index = grapheme_count(&self.text(store));
    }

    fn deactivate(&mut self, _dispatcher: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = false;
        self.character_index = 0;
    }
}

impl<S: AttributeStoreLike> FormItem<S> for AttributeField<S> {
    fn item_title(&self, _store: &RefCell<S>) -> &str {
        self.attribute.label()
    }

    fn item_state(&self, _store: &RefCell<S>) -> FormItemState {
        if self.active {
            FormItemState::Active
        } else {
            FormItemState::Inactive
        }
    }
}

const S_STEP_ACTIVE: &str = "◆";
const S_STEP_INACTIVE: &str = "◇";
const S_SIDER_CONNECTOR: &str = "│";
const S_SIDER_BOTTOM: &str = "└";

fn item_render<S>(
    is_last: bool,
    item: &impl FormItem<S>,
    store: &RefCell<S>,
    area: Rect,
    buf: &mut Buffer,
) {
    let (color, symbol) = match item.item_state(store) {
        FormItemState::Active => (Color::Blue, S_STEP_ACTIVE),
        FormItemState::Inactive => (Color::Gray, S_STEP_INACTIVE),
        FormItemState::Invisible => return,
    };

    let area_title = Rect::new(area.x + 2, area.y, area.width.saturating_sub(2), 1);
    Clear.render(area_title, buf);
    Paragraph::new(item.item_title(store))
        .bold()
        .fg(color)
        .render(area_title, buf);

    if let Some(c) = buf.cell_mut((area.x, area.y)) {
        c.set_symbol(symbol);
        c.set_fg(color);
    }

    for y in 1..area.height.saturating_sub(1) {
        if let Some(c) = buf.cell_mut((area.x, area.y + y)) {
            c.set_symbol(S_SIDER_CONNECTOR);
            c.set_fg(color);
        }
    }

    if let Some(c) = buf.cell_mut((area.x, area.y + area.height.saturating_sub(1))) {
        let symbol = if is_last {
            S_SIDER_BOTTOM
        } else {
            S_SIDER_CONNECTOR
        };
        c.set_symbol(symbol);
        c.set_fg(color);
    }
}

fn item_inner(area: Rect) -> Rect {
    Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

fn item_is_visible<S>(item: &impl FormItem<S>, store: &RefCell<S>) -> bool {
    !matches!(item.item_state(store), FormItemState::Invisible)
}
