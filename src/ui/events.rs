use crate::entries::TimezoneEntry;

/// Application-level events
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Terminal input event
    Input(crossterm::event::Event),

    /// Directory search finished. `query` is the text it ran for, so results
    /// for a query the user has since edited can be dropped.
    SearchResults {
        query: String,
        results: Vec<TimezoneEntry>,
    },
}

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Browsing rows
    #[default]
    Normal,
    /// The add-location picker is open
    Picking,
    /// Typing a date and time to jump to
    GoTo,
}
