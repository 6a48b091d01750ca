use crate::data::ThemeMode;

/// Side effects that should be executed outside the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Persist the current entry list
    SaveEntries,
    /// Persist the theme preference
    SaveTheme(ThemeMode),
    /// Query the directory for picker candidates
    Search { query: String },
}
