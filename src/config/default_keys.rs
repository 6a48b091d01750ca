//! Built-in keybindings, used unless the config file overrides them.

use super::keys::{KeyContext, KeybindingConfig};
use crate::ui::action::Action;

fn bind(config: &mut KeybindingConfig, context: KeyContext, key: &str, action: Action) {
    if let Ok(combo) = key.parse() {
        config.bind(context, combo, action);
    }
}

pub fn default_keybindings() -> KeybindingConfig {
    let mut config = KeybindingConfig::new();

    // ========== Global ==========
    bind(&mut config, KeyContext::Global, "C-c", Action::Quit);

    // ========== Rows ==========
    let rows = KeyContext::Rows;
    bind(&mut config, rows, "q", Action::Quit);
    bind(&mut config, rows, "<Left>", Action::PrevSlot);
    bind(&mut config, rows, "h", Action::PrevSlot);
    bind(&mut config, rows, "<Right>", Action::NextSlot);
    bind(&mut config, rows, "l", Action::NextSlot);
    bind(&mut config, rows, "[", Action::PrevDay);
    bind(&mut config, rows, "]", Action::NextDay);
    bind(&mut config, rows, "n", Action::ResetToNow);
    bind(&mut config, rows, "g", Action::OpenGoTo);
    bind(&mut config, rows, "<Up>", Action::FocusPrev);
    bind(&mut config, rows, "k", Action::FocusPrev);
    bind(&mut config, rows, "<Down>", Action::FocusNext);
    bind(&mut config, rows, "j", Action::FocusNext);
    bind(&mut config, rows, "S-<Up>", Action::MoveEntryUp);
    bind(&mut config, rows, "K", Action::MoveEntryUp);
    bind(&mut config, rows, "S-<Down>", Action::MoveEntryDown);
    bind(&mut config, rows, "J", Action::MoveEntryDown);
    bind(&mut config, rows, "d", Action::DeleteEntry);
    bind(&mut config, rows, "<Del>", Action::DeleteEntry);
    bind(&mut config, rows, "a", Action::OpenPicker);
    bind(&mut config, rows, "t", Action::ToggleTheme);

    // ========== Picker ==========
    let picker = KeyContext::Picker;
    bind(&mut config, picker, "<Esc>", Action::ClosePicker);
    bind(&mut config, picker, "<CR>", Action::PickerConfirm);
    bind(&mut config, picker, "<Up>", Action::PickerPrev);
    bind(&mut config, picker, "C-p", Action::PickerPrev);
    bind(&mut config, picker, "<Down>", Action::PickerNext);
    bind(&mut config, picker, "C-n", Action::PickerNext);
    bind(&mut config, picker, "<PageUp>", Action::PickerPageUp);
    bind(&mut config, picker, "<PageDown>", Action::PickerPageDown);
    bind(&mut config, picker, "<BS>", Action::Backspace);
    bind(&mut config, picker, "C-w", Action::DeleteWordBack);
    bind(&mut config, picker, "<Left>", Action::MoveCursorLeft);
    bind(&mut config, picker, "<Right>", Action::MoveCursorRight);

    // ========== Go to ==========
    let goto = KeyContext::GoTo;
    bind(&mut config, goto, "<Esc>", Action::CloseGoTo);
    bind(&mut config, goto, "<CR>", Action::ConfirmGoTo);
    bind(&mut config, goto, "<BS>", Action::Backspace);
    bind(&mut config, goto, "C-w", Action::DeleteWordBack);
    bind(&mut config, goto, "<Left>", Action::MoveCursorLeft);
    bind(&mut config, goto, "<Right>", Action::MoveCursorRight);

    config
}
