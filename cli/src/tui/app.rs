// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, error::Error, rc::Rc, time::Duration};

use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use raplamobile_core::{Classification, DynamicType, RaplaContext, Reservation};

use crate::tui::allocatable_details::AllocatableDetails;
use crate::tui::allocatable_store::AllocatableStore;
use crate::tui::component::{Component, Message};
use crate::tui::component_page::SinglePage;
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::loader::AllocatableLoader;
use crate::tui::reservation_editor::new_reservation_editor;
use crate::tui::reservation_store::ReservationStore;

const TICK: Duration = Duration::from_millis(100);

/// Opens the allocatable screen for `reservation` on the given category.
///
/// Returns the changed reservation when the user leaves with `q`, `None` when
/// nothing changed or the user discarded with `<Esc>`.
pub fn book_allocatables(
    ctx: &RaplaContext,
    reservation: Reservation,
    category: &str,
) -> Result<Option<Reservation>, Box<dyn Error>> {
    let title = format!("{} · {category}", reservation.name());
    let store = AllocatableStore::new(ctx.shared_facade(), reservation, category.to_owned());
    let store = Rc::new(RefCell::new(store));

    let mut loader = AllocatableLoader::new();
    loader.start(ctx.shared_facade(), category.to_owned());

    let mut terminal = ratatui::init();
    let result = {
        let mut dispatcher = Dispatcher::new();
        AllocatableStore::register_to(store.clone(), &mut dispatcher);
        let mut page = SinglePage::new(title, AllocatableDetails::new()).with_instructions(vec![
            ("Book", "<Space>"),
            ("Assign", "<Enter>"),
            ("Menu", "<m>"),
            ("Refresh", "<r>"),
            ("Save", "<q>"),
            ("Discard", "<Esc>"),
        ]);

        run_loop(&mut terminal, &*store, &mut dispatcher, &mut page, |dispatcher| {
            if let Some(rows) = loader.poll() {
                dispatcher.dispatch(Action::AllocatablesLoaded(rows));
            }
            if store.borrow_mut().take_refresh() {
                loader.start(ctx.shared_facade(), category.to_owned());
            }
        })
    }; // release dispatcher and page here to avoid borrow conflicts
    loader.cancel();
    ratatui::restore();
    result?;

    let store = Rc::try_unwrap(store)
        .map_err(|_| "Store still has references")?
        .into_inner();
    match (store.submit, store.dirty) {
        (true, true) => Ok(Some(store.reservation)),
        (true, false) => Ok(None),
        (false, _) => {
            tracing::info!("User canceled the booking, changes discarded");
            Ok(None)
        }
    }
}

/// Opens the attribute editor for a classification of `dynamic_type`.
///
/// Returns the edited classification, `None` when the user canceled.
pub fn edit_classification(
    title: String,
    dynamic_type: &DynamicType,
    classification: &Classification,
) -> Result<Option<Classification>, Box<dyn Error>> {
    let store = ReservationStore::new(dynamic_type, classification);
    let mut page = new_reservation_editor(title, &store);
    let store = Rc::new(RefCell::new(store));

    let mut terminal = ratatui::init();
    let result = {
        let mut dispatcher = Dispatcher::new();
        ReservationStore::register_to(store.clone(), &mut dispatcher);
        page.activate(&mut dispatcher, &*store);
        run_loop(&mut terminal, &*store, &mut dispatcher, &mut page, |_| {})
    };
    ratatui::restore();
    result?;

    let store = Rc::try_unwrap(store)
        .map_err(|_| "Store still has references")?
        .into_inner();
    match store.submit {
        true => store.submit_classification().map(Some),
        false => Ok(None),
    }
}

fn run_loop<S, C: Component<S>>(
    terminal: &mut DefaultTerminal,
    store: &RefCell<S>,
    dispatcher: &mut Dispatcher,
    page: &mut C,
    mut tick: impl FnMut(&mut Dispatcher),
) -> Result<(), Box<dyn Error>> {
    loop {
        tick(dispatcher);

        let frame = terminal.draw(|frame| {
            let area = frame.area();
            page.render(store, area, frame.buffer_mut());
            if let Some(position) = page.get_cursor_position(store, area) {
                frame.set_cursor_position(position);
            }
        })?;
        let area = frame.area;

        if !event::poll(TICK)? {
            continue;
        }
        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && let Some(Message::Exit) = page.on_key(dispatcher, store, area, key)
        {
            return Ok(());
        }
    }
}
