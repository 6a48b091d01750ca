//! Full-screen rendering and key handling against a TestBackend.

use std::sync::Arc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use super::common::fixtures::{dhaka, london, test_instant, tokyo};
use super::common::terminal::{buffer_contains, create_test_terminal_sized, line_of};
use worldtimez::data::{MemoryStorage, PreferenceStore, Storage, ThemeMode, TimezoneStore};
use worldtimez::time::ReferenceInstant;
use worldtimez::ui::{draw, Action, AppEvent, AppState};
use worldtimez::{App, Config, EntryList, TzdbDirectory};

fn state_with(entries: EntryList) -> AppState {
    let mut state = AppState::new(entries, ThemeMode::Dark, &Config::default());
    state.reference = ReferenceInstant::at(test_instant());
    state
}

fn key(code: KeyCode) -> AppEvent {
    AppEvent::Input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
}

#[test]
fn test_rows_show_local_time_offset_and_date() {
    let state = state_with(EntryList::new().add(london()).add(dhaka()));
    let config = Config::default();
    let mut terminal = create_test_terminal_sized(110, 16);

    terminal.draw(|f| draw(f, &state, &config)).unwrap();
    let buffer = terminal.backend().buffer();

    assert!(buffer_contains(buffer, "Mon, Jul 15 12:00 UTC"));
    assert!(buffer_contains(buffer, "United Kingdom/London (UTC+01:00)"));
    assert!(buffer_contains(buffer, "1:00 PM  Mon, Jul 15"));
    assert!(buffer_contains(buffer, "Bangladesh/Dhaka (UTC+06:00)"));
    assert!(buffer_contains(buffer, "6:00 PM  Mon, Jul 15"));

    let london_line = line_of(buffer, "London (UTC").unwrap();
    let dhaka_line = line_of(buffer, "Dhaka (UTC").unwrap();
    assert!(london_line < dhaka_line);

    // Slot strip under the heading, neighbours of the selected slot included
    assert!(buffer_contains(buffer, "12:30 PM"));
    assert!(buffer_contains(buffer, "1:30 PM"));
}

#[test]
fn test_twenty_four_hour_clock() {
    let state = state_with(EntryList::new().add(dhaka()));
    let config = Config::from_toml_str("[display]\nclock = \"24h\"\n").unwrap();
    let mut terminal = create_test_terminal_sized(100, 10);

    terminal.draw(|f| draw(f, &state, &config)).unwrap();
    let buffer = terminal.backend().buffer();

    assert!(buffer_contains(buffer, "18:00  Mon, Jul 15"));
    assert!(buffer_contains(buffer, "17:30"));
}

#[test]
fn test_empty_list_shows_hint() {
    let state = state_with(EntryList::new());
    let config = Config::default();
    let mut terminal = create_test_terminal_sized(80, 12);

    terminal.draw(|f| draw(f, &state, &config)).unwrap();
    let buffer = terminal.backend().buffer();
    assert!(buffer_contains(buffer, "No locations tracked yet."));
    assert!(buffer_contains(buffer, "Press a to add one."));
}

#[test]
fn test_empty_hint_follows_rebound_key() {
    let state = state_with(EntryList::new());
    let config = Config::from_toml_str("[keys.rows]
\"+\" = \"open_picker\"\n").unwrap();
    let mut terminal = create_test_terminal_sized(80, 12);

    terminal.draw(|f| draw(f, &state, &config)).unwrap();
    assert!(buffer_contains(
        terminal.backend().buffer(),
        "Press + to add one."
    ));
}

#[test]
fn test_goto_dialog_overlays_rows() {
    let mut state = state_with(EntryList::new().add(dhaka()));
    state.dispatch(Action::OpenGoTo);
    state.type_char('x');
    state.dispatch(Action::ConfirmGoTo);

    let config = Config::default();
    let mut terminal = create_test_terminal_sized(100, 20);
    terminal.draw(|f| draw(f, &state, &config)).unwrap();
    let buffer = terminal.backend().buffer();

    assert!(buffer_contains(buffer, "Go to (Asia/Dhaka)"));
    assert!(buffer_contains(buffer, "Not a date or time: x"));
    assert!(buffer_contains(buffer, "<CR> go"));
}

#[test]
fn test_picker_overlays_rows() {
    let mut state = state_with(EntryList::new().add(london()));
    state.dispatch(Action::OpenPicker);
    for c in "tok".chars() {
        state.type_char(c);
    }
    state.apply_search_results("tok", vec![tokyo()]);

    let config = Config::default();
    let mut terminal = create_test_terminal_sized(100, 24);
    terminal.draw(|f| draw(f, &state, &config)).unwrap();
    let buffer = terminal.backend().buffer();

    assert!(buffer_contains(buffer, "Add location"));
    assert!(buffer_contains(buffer, "tok"));
    assert!(buffer_contains(buffer, "Japan/Tokyo"));
    assert!(buffer_contains(buffer, "<Esc> cancel"));
}

#[test]
fn test_small_terminal_does_not_panic() {
    let state = state_with(EntryList::new().add(london()).add(dhaka()));
    let config = Config::default();
    let mut terminal = create_test_terminal_sized(20, 4);
    terminal.draw(|f| draw(f, &state, &config)).unwrap();
}

#[test]
fn test_key_presses_persist_through_effects() {
    let memory = MemoryStorage::new();
    TimezoneStore::new(&memory).save(&EntryList::new().add(london()).add(dhaka()));
    PreferenceStore::new(&memory).set_theme(ThemeMode::Dark);

    let mut app = App::new(
        Config::default(),
        Storage::Memory(memory.clone()),
        Arc::new(TzdbDirectory::new()),
    );
    assert_eq!(app.state().entries().len(), 2);

    // Move Dhaka above London
    app.handle_app_event(key(KeyCode::Char('j')));
    app.handle_app_event(AppEvent::Input(Event::Key(KeyEvent::new(
        KeyCode::Up,
        KeyModifiers::SHIFT,
    ))));
    let stored = TimezoneStore::new(&memory).load();
    let order: Vec<&str> = stored.iter().map(|e| e.zone_id.as_str()).collect();
    assert_eq!(order, vec!["Asia/Dhaka", "Europe/London"]);

    // Delete the focused row (still Dhaka)
    app.handle_app_event(key(KeyCode::Char('d')));
    assert_eq!(
        TimezoneStore::new(&memory).load(),
        EntryList::new().add(london())
    );

    app.handle_app_event(key(KeyCode::Char('t')));
    assert_eq!(
        PreferenceStore::new(&memory).theme(ThemeMode::Dark),
        ThemeMode::Light
    );

    // Jump to a typed moment, read in the focused row's zone (London)
    app.handle_app_event(key(KeyCode::Char('g')));
    for c in "2024-12-25 09:30".chars() {
        app.handle_app_event(key(KeyCode::Char(c)));
    }
    app.handle_app_event(key(KeyCode::Enter));
    assert_eq!(
        app.state().reference.instant(),
        "2024-12-25T09:30:00Z".parse::<chrono::DateTime<chrono::Utc>>().unwrap()
    );

    app.handle_app_event(key(KeyCode::Char('q')));
    assert!(app.state().should_quit);
}
