//! Actions that can be triggered by keybindings
//!
//! Each action is a single, atomic operation on the UI state. Typed
//! characters in the picker or the go-to box are not actions; they go
//! straight to the input.

use serde::{Deserialize, Serialize};

/// All mappable UI actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // ========== Global ==========
    /// Quit the application
    Quit,
    /// Switch between light and dark palettes
    ToggleTheme,

    // ========== Reference instant ==========
    /// Select the slot one step earlier
    PrevSlot,
    /// Select the slot one step later
    NextSlot,
    /// Move the reference back 24 hours
    PrevDay,
    /// Move the reference forward 24 hours
    NextDay,
    /// Return to the current instant
    ResetToNow,
    /// Type a date and time to select
    OpenGoTo,
    CloseGoTo,
    /// Select the typed date and time
    ConfirmGoTo,

    // ========== Rows ==========
    FocusPrev,
    FocusNext,
    /// Swap the focused row with the one above
    MoveEntryUp,
    /// Swap the focused row with the one below
    MoveEntryDown,
    /// Remove the focused row
    DeleteEntry,

    // ========== Picker ==========
    OpenPicker,
    ClosePicker,
    PickerPrev,
    PickerNext,
    PickerPageUp,
    PickerPageDown,
    /// Add the highlighted candidate
    PickerConfirm,

    // ========== Text editing (picker query, go-to box) ==========
    Backspace,
    DeleteWordBack,
    MoveCursorLeft,
    MoveCursorRight,
}

impl Action {
    /// Short description shown in the footer hints
    pub fn description(&self) -> &'static str {
        match self {
            Action::Quit => "quit",
            Action::ToggleTheme => "theme",
            Action::PrevSlot => "earlier",
            Action::NextSlot => "later",
            Action::PrevDay => "prev day",
            Action::NextDay => "next day",
            Action::ResetToNow => "now",
            Action::OpenGoTo => "go to",
            Action::CloseGoTo => "cancel",
            Action::ConfirmGoTo => "go",
            Action::FocusPrev | Action::FocusNext => "focus",
            Action::MoveEntryUp => "move up",
            Action::MoveEntryDown => "move down",
            Action::DeleteEntry => "delete",
            Action::OpenPicker => "add",
            Action::ClosePicker => "cancel",
            Action::PickerPrev | Action::PickerNext => "select",
            Action::PickerPageUp | Action::PickerPageDown => "page",
            Action::PickerConfirm => "add",
            Action::Backspace => "backspace",
            Action::DeleteWordBack => "delete word",
            Action::MoveCursorLeft | Action::MoveCursorRight => "cursor",
        }
    }
}
