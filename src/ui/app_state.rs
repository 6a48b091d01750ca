//! UI state and the reducer that applies actions to it.
//!
//! `dispatch` is the only writer of the entry list. It never touches storage
//! or the terminal; anything that must happen outside is returned as an
//! [`Effect`] for the caller to run.

use crate::config::Config;
use crate::data::ThemeMode;
use crate::entries::{AmbientZone, EntryList, TimezoneEntry};
use crate::time::{parse_local_datetime, ReferenceInstant, SlotWindow};
use crate::ui::action::Action;
use crate::ui::components::{GoToState, TextInputState, TimezonePickerState};
use crate::ui::effect::Effect;
use crate::ui::events::InputMode;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Zone for the go-to box when no row is focused
const FALLBACK_GOTO_ZONE: &str = "Etc/UTC";

pub struct AppState {
    pub reference: ReferenceInstant,
    entries: EntryList,
    /// Identity key of the focused row; survives reorders and removals of
    /// other rows
    focused: Option<String>,
    pub input_mode: InputMode,
    pub picker: TimezonePickerState,
    pub goto: GoToState,
    pub theme: ThemeMode,
    pub should_quit: bool,
    slot_window: SlotWindow,
    /// Zone to reseed from when the last row is deleted; detected at that
    /// moment when unset
    ambient: Option<AmbientZone>,
}

impl AppState {
    pub fn new(entries: EntryList, theme: ThemeMode, config: &Config) -> Self {
        let focused = entries.get(0).map(TimezoneEntry::identity_key);
        Self {
            reference: ReferenceInstant::now(),
            entries,
            focused,
            input_mode: InputMode::Normal,
            picker: TimezonePickerState::new(config.search_limit),
            goto: GoToState::default(),
            theme,
            should_quit: false,
            slot_window: config.slot_window,
            ambient: None,
        }
    }

    /// Reseed from `ambient` instead of detecting the local zone.
    pub fn with_ambient(mut self, ambient: AmbientZone) -> Self {
        self.ambient = Some(ambient);
        self
    }

    pub fn entries(&self) -> &EntryList {
        &self.entries
    }

    pub fn slot_window(&self) -> SlotWindow {
        self.slot_window
    }

    pub fn focused_key(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.focused
            .as_deref()
            .and_then(|key| self.entries.position(key))
    }

    fn focus_index(&mut self, index: usize) {
        self.focused = self.entries.get(index).map(TimezoneEntry::identity_key);
    }

    /// Replace the list through one of its consuming operations.
    fn update_entries(&mut self, f: impl FnOnce(EntryList) -> EntryList) -> bool {
        let before = self.entries.clone();
        self.entries = f(std::mem::take(&mut self.entries));
        self.entries != before
    }

    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        let step = self.slot_window.step_minutes;
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::ToggleTheme => {
                self.theme = self.theme.toggled();
                return vec![Effect::SaveTheme(self.theme)];
            }

            Action::PrevSlot => self.reference.shift(-step),
            Action::NextSlot => self.reference.shift(step),
            Action::PrevDay => self.reference.shift(-MINUTES_PER_DAY),
            Action::NextDay => self.reference.shift(MINUTES_PER_DAY),
            Action::ResetToNow => self.reference.reset_to_now(),
            Action::OpenGoTo => {
                let zone = self
                    .focused_index()
                    .and_then(|index| self.entries.get(index))
                    .map_or(FALLBACK_GOTO_ZONE, |entry| entry.zone_id.as_str())
                    .to_string();
                self.goto.show(zone);
                self.input_mode = InputMode::GoTo;
            }
            Action::CloseGoTo => self.close_goto(),
            Action::ConfirmGoTo => self.confirm_goto(),

            Action::FocusPrev => match self.focused_index() {
                Some(index) => self.focus_index(index.saturating_sub(1)),
                None => self.focus_index(0),
            },
            Action::FocusNext => match self.focused_index() {
                Some(index) if index + 1 < self.entries.len() => self.focus_index(index + 1),
                Some(_) => {}
                None => self.focus_index(0),
            },
            Action::MoveEntryUp => return self.move_focused(-1),
            Action::MoveEntryDown => return self.move_focused(1),
            Action::DeleteEntry => return self.delete_focused(),

            Action::OpenPicker => {
                self.picker.show();
                self.input_mode = InputMode::Picking;
                return vec![self.search_effect()];
            }
            Action::ClosePicker => self.close_picker(),
            Action::PickerConfirm => return self.confirm_pick(),
            Action::PickerPrev => self.picker.list.select_prev(),
            Action::PickerNext => self.picker.list.select_next(),
            Action::PickerPageUp => self.picker.list.page_up(),
            Action::PickerPageDown => self.picker.list.page_down(),

            Action::Backspace => return self.edit_input(TextInputState::delete_char),
            Action::DeleteWordBack => return self.edit_input(TextInputState::delete_word),
            Action::MoveCursorLeft => {
                if let Some(input) = self.active_input() {
                    input.move_left();
                }
            }
            Action::MoveCursorRight => {
                if let Some(input) = self.active_input() {
                    input.move_right();
                }
            }
        }
        Vec::new()
    }

    /// A typed character while the picker or the go-to box is open.
    pub fn type_char(&mut self, c: char) -> Vec<Effect> {
        self.edit_input(|input| input.insert_char(c))
    }

    fn active_input(&mut self) -> Option<&mut TextInputState> {
        match self.input_mode {
            InputMode::Picking => Some(&mut self.picker.list.search),
            InputMode::GoTo => Some(&mut self.goto.input),
            InputMode::Normal => None,
        }
    }

    /// Change the open input's text; a new picker query starts a search.
    fn edit_input(&mut self, edit: impl FnOnce(&mut TextInputState)) -> Vec<Effect> {
        match self.input_mode {
            InputMode::Picking => {
                edit(&mut self.picker.list.search);
                self.query_changed()
            }
            InputMode::GoTo => {
                edit(&mut self.goto.input);
                self.goto.error = None;
                Vec::new()
            }
            InputMode::Normal => Vec::new(),
        }
    }

    fn close_goto(&mut self) {
        self.goto.hide();
        self.input_mode = InputMode::Normal;
    }

    /// Select the typed moment, or keep the box open with the reason it was rejected.
    fn confirm_goto(&mut self) {
        let parsed = parse_local_datetime(
            self.goto.input.value(),
            self.goto.zone_id(),
            self.reference.instant(),
        );
        match parsed {
            Ok(instant) => {
                self.reference.select(instant);
                self.close_goto();
            }
            Err(e) => {
                tracing::debug!(input = %self.goto.input.value(), error = %e, "Rejected go-to input");
                self.goto.error = Some(e.to_string());
            }
        }
    }

    /// Accept results only for the query currently in the box.
    pub fn apply_search_results(&mut self, query: &str, results: Vec<TimezoneEntry>) {
        if self.picker.is_visible() && self.picker.query() == query {
            self.picker.list.set_items(results);
        } else {
            tracing::trace!(query = %query, "Dropping stale search results");
        }
    }

    fn search_effect(&self) -> Effect {
        Effect::Search {
            query: self.picker.query().to_string(),
        }
    }

    fn query_changed(&mut self) -> Vec<Effect> {
        if self.picker.is_visible() {
            vec![self.search_effect()]
        } else {
            Vec::new()
        }
    }

    fn close_picker(&mut self) {
        self.picker.hide();
        self.input_mode = InputMode::Normal;
    }

    fn confirm_pick(&mut self) -> Vec<Effect> {
        if !self.picker.is_visible() {
            return Vec::new();
        }
        let Some(entry) = self.picker.list.selected_item().cloned() else {
            return Vec::new();
        };
        self.close_picker();

        let key = entry.identity_key();
        let changed = self.update_entries(|list| list.add(entry));
        self.focused = Some(key);
        if changed {
            vec![Effect::SaveEntries]
        } else {
            Vec::new()
        }
    }

    fn move_focused(&mut self, delta: isize) -> Vec<Effect> {
        let (Some(key), Some(index)) = (self.focused.clone(), self.focused_index()) else {
            return Vec::new();
        };
        let Some(target) = index
            .checked_add_signed(delta)
            .and_then(|target| self.entries.get(target))
            .map(TimezoneEntry::identity_key)
        else {
            return Vec::new();
        };

        if self.update_entries(|list| list.reorder(&key, &target)) {
            vec![Effect::SaveEntries]
        } else {
            Vec::new()
        }
    }

    fn delete_focused(&mut self) -> Vec<Effect> {
        let Some(index) = self.focused_index() else {
            return Vec::new();
        };
        let Some(entry) = self.entries.get(index).cloned() else {
            return Vec::new();
        };

        let ambient = self.ambient.clone();
        let changed = self.update_entries(|list| {
            let list = list.remove(&entry);
            match (&ambient, list.is_empty()) {
                (Some(ambient), true) => EntryList::seed_default_from(ambient),
                _ => list.ensure_seeded(),
            }
        });
        // Keep focus at the same position, or the new last row
        self.focus_index(index.min(self.entries.len().saturating_sub(1)));
        if changed {
            vec![Effect::SaveEntries]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn entry(zone: &str, city: &str) -> TimezoneEntry {
        TimezoneEntry::new(zone, city, zone.split('/').next().unwrap_or_default())
    }

    fn state() -> AppState {
        let entries = EntryList::new()
            .add(entry("Asia/Dhaka", "Dhaka"))
            .add(entry("Europe/London", "London"))
            .add(entry("America/New_York", "New York"));
        let mut state = AppState::new(entries, ThemeMode::Dark, &Config::default());
        state.reference = ReferenceInstant::at(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
        state
    }

    fn zones(state: &AppState) -> Vec<&str> {
        state.entries().iter().map(|e| e.zone_id.as_str()).collect()
    }

    #[test]
    fn test_focus_starts_on_first_row() {
        let state = state();
        assert_eq!(state.focused_key(), Some("Asia/Dhaka_Dhaka"));
        assert_eq!(state.focused_index(), Some(0));
    }

    #[test]
    fn test_slot_and_day_navigation() {
        let mut state = state();
        let start = state.reference.instant();

        assert!(state.dispatch(Action::NextSlot).is_empty());
        assert_eq!(state.reference.instant(), start + chrono::Duration::minutes(30));

        state.dispatch(Action::PrevDay);
        assert_eq!(
            state.reference.instant(),
            start + chrono::Duration::minutes(30) - chrono::Duration::days(1)
        );

        state.dispatch(Action::ResetToNow);
        assert!((Utc::now() - state.reference.instant()).num_seconds().abs() < 5);
    }

    #[test]
    fn test_move_keeps_focus_on_moved_entry() {
        let mut state = state();
        state.dispatch(Action::FocusNext);
        state.dispatch(Action::FocusNext);
        assert_eq!(state.focused_index(), Some(2));

        let effects = state.dispatch(Action::MoveEntryUp);
        assert_eq!(effects, vec![Effect::SaveEntries]);
        assert_eq!(
            zones(&state),
            vec!["Asia/Dhaka", "America/New_York", "Europe/London"]
        );
        assert_eq!(state.focused_index(), Some(1));
    }

    #[test]
    fn test_move_past_edges_is_noop() {
        let mut state = state();
        assert!(state.dispatch(Action::MoveEntryUp).is_empty());
        state.dispatch(Action::FocusNext);
        state.dispatch(Action::FocusNext);
        state.dispatch(Action::FocusNext);
        assert_eq!(state.focused_index(), Some(2));
        assert!(state.dispatch(Action::MoveEntryDown).is_empty());
    }

    fn tokyo_ambient() -> AmbientZone {
        AmbientZone {
            name: "Asia/Tokyo".to_string(),
            offset_minutes: 540,
        }
    }

    #[test]
    fn test_delete_moves_focus_to_neighbour() {
        let mut state = state().with_ambient(tokyo_ambient());
        state.dispatch(Action::FocusNext);
        state.dispatch(Action::FocusNext);

        assert_eq!(state.dispatch(Action::DeleteEntry), vec![Effect::SaveEntries]);
        assert_eq!(zones(&state), vec!["Asia/Dhaka", "Europe/London"]);
        assert_eq!(state.focused_key(), Some("Europe/London_London"));

        state.dispatch(Action::DeleteEntry);
        assert_eq!(zones(&state), vec!["Asia/Dhaka"]);
        assert_eq!(state.focused_key(), Some("Asia/Dhaka_Dhaka"));
    }

    #[test]
    fn test_deleting_last_row_reseeds_local_zone() {
        let entries = EntryList::new().add(entry("Asia/Dhaka", "Dhaka"));
        let mut state =
            AppState::new(entries, ThemeMode::Dark, &Config::default()).with_ambient(tokyo_ambient());

        assert_eq!(state.dispatch(Action::DeleteEntry), vec![Effect::SaveEntries]);
        assert_eq!(zones(&state), vec!["Asia/Tokyo"]);
        assert_eq!(state.entries().as_slice()[0].utc_offset_minutes, 540);
        assert_eq!(state.focused_key(), Some("Asia/Tokyo_Tokyo"));

        // Deleting the seed brings the same entry back; nothing new to save
        assert!(state.dispatch(Action::DeleteEntry).is_empty());
        assert_eq!(zones(&state), vec!["Asia/Tokyo"]);
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            state.type_char(c);
        }
    }

    #[test]
    fn test_goto_selects_typed_time_in_focused_zone() {
        let mut state = state();
        state.dispatch(Action::FocusNext);
        state.dispatch(Action::OpenGoTo);
        assert_eq!(state.input_mode, InputMode::GoTo);
        assert_eq!(state.goto.zone_id(), "Europe/London");

        type_text(&mut state, "2024-12-25 09:30");
        assert!(state.dispatch(Action::ConfirmGoTo).is_empty());

        assert_eq!(
            state.reference.instant(),
            Utc.with_ymd_and_hms(2024, 12, 25, 9, 30, 0).unwrap()
        );
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(!state.goto.is_visible());
    }

    #[test]
    fn test_goto_keeps_box_open_on_bad_input() {
        let mut state = state();
        let before = state.reference.instant();
        state.dispatch(Action::OpenGoTo);
        assert_eq!(state.goto.zone_id(), "Asia/Dhaka");

        type_text(&mut state, "noon");
        state.dispatch(Action::ConfirmGoTo);
        assert_eq!(state.reference.instant(), before);
        assert!(state.goto.is_visible());
        assert_eq!(state.goto.error.as_deref(), Some("Not a date or time: noon"));

        // Editing clears the error; a bare time keeps the current local date
        for _ in 0..4 {
            state.dispatch(Action::Backspace);
        }
        assert_eq!(state.goto.error, None);
        type_text(&mut state, "20:00");
        state.dispatch(Action::ConfirmGoTo);
        // 20:00 on Mar 1 in Dhaka
        assert_eq!(
            state.reference.instant(),
            Utc.with_ymd_and_hms(2024, 3, 1, 14, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_goto_cancel_leaves_reference() {
        let mut state = state();
        let before = state.reference.instant();
        state.dispatch(Action::OpenGoTo);
        type_text(&mut state, "2030-01-01");
        state.dispatch(Action::CloseGoTo);
        assert_eq!(state.reference.instant(), before);
        assert_eq!(state.input_mode, InputMode::Normal);
        // Typing outside an input does nothing
        assert!(state.type_char('x').is_empty());
    }

    #[test]
    fn test_toggle_theme_saves_preference() {
        let mut state = state();
        assert_eq!(
            state.dispatch(Action::ToggleTheme),
            vec![Effect::SaveTheme(ThemeMode::Light)]
        );
        assert_eq!(state.theme, ThemeMode::Light);
    }

    #[test]
    fn test_picker_flow_adds_and_focuses() {
        let mut state = state();
        let effects = state.dispatch(Action::OpenPicker);
        assert_eq!(state.input_mode, InputMode::Picking);
        assert_eq!(
            effects,
            vec![Effect::Search {
                query: String::new()
            }]
        );

        let effects: Vec<Effect> = "tok".chars().flat_map(|c| state.type_char(c)).collect();
        assert_eq!(
            effects.last(),
            Some(&Effect::Search {
                query: "tok".to_string()
            })
        );

        state.apply_search_results("tok", vec![entry("Asia/Tokyo", "Tokyo")]);
        assert_eq!(state.dispatch(Action::PickerConfirm), vec![Effect::SaveEntries]);
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(zones(&state).last(), Some(&"Asia/Tokyo"));
        assert_eq!(state.focused_key(), Some("Asia/Tokyo_Tokyo"));
    }

    #[test]
    fn test_picking_tracked_entry_does_not_save() {
        let mut state = state();
        state.dispatch(Action::OpenPicker);
        state.apply_search_results("", vec![entry("Europe/London", "London")]);

        assert!(state.dispatch(Action::PickerConfirm).is_empty());
        assert_eq!(state.entries().len(), 3);
        assert_eq!(state.focused_key(), Some("Europe/London_London"));
    }

    #[test]
    fn test_stale_results_are_dropped() {
        let mut state = state();
        state.dispatch(Action::OpenPicker);
        state.type_char('p');
        state.type_char('a');

        state.apply_search_results("p", vec![entry("Europe/Prague", "Prague")]);
        assert!(state.picker.list.items().is_empty());

        state.apply_search_results("pa", vec![entry("Europe/Paris", "Paris")]);
        assert_eq!(state.picker.list.items().len(), 1);
    }

    #[test]
    fn test_typing_ignored_when_picker_closed() {
        let mut state = state();
        assert!(state.type_char('x').is_empty());
        assert!(state.dispatch(Action::Backspace).is_empty());
        assert!(state.dispatch(Action::PickerConfirm).is_empty());
    }

    #[test]
    fn test_close_picker_keeps_list() {
        let mut state = state();
        state.dispatch(Action::OpenPicker);
        state.apply_search_results("", vec![entry("Asia/Tokyo", "Tokyo")]);
        state.dispatch(Action::ClosePicker);
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.entries().len(), 3);
    }
}
