mod goto_dialog;
mod key_hints;
mod searchable_list;
mod text_input;
pub mod theme;
mod timezone_picker;
mod timezone_row;

pub use goto_dialog::{GoToDialog, GoToState};
pub use key_hints::{key_for, render_key_hints};
pub use searchable_list::SearchableListState;
pub use text_input::TextInputState;
pub use theme::Palette;
pub use timezone_picker::{TimezonePicker, TimezonePickerState};
pub use timezone_row::{visible_slot_range, TimezoneRow};
