//! Theme preference, stored separately from the entry list.

use serde::Deserialize;

use super::storage::StorageBackend;

/// Storage key of the theme preference.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// The host terminal's colour scheme, read from `COLORFGBG`.
    pub fn ambient() -> Self {
        std::env::var("COLORFGBG")
            .ok()
            .and_then(|value| Self::from_colorfgbg(&value))
            .unwrap_or_default()
    }

    /// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`); backgrounds 7 and
    /// 9-15 are light.
    fn from_colorfgbg(value: &str) -> Option<Self> {
        let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
        Some(if bg == 7 || (9..=15).contains(&bg) {
            ThemeMode::Light
        } else {
            ThemeMode::Dark
        })
    }
}

/// Reads and writes the theme preference through a [`StorageBackend`].
#[derive(Debug, Clone)]
pub struct PreferenceStore<B> {
    backend: B,
}

impl<B: StorageBackend> PreferenceStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Stored theme, or `fallback` when none (or an unknown value) is stored.
    pub fn theme(&self, fallback: ThemeMode) -> ThemeMode {
        match self.backend.get(THEME_KEY) {
            Ok(Some(value)) => ThemeMode::parse(&value).unwrap_or_else(|| {
                tracing::debug!(%value, "Ignoring unknown stored theme");
                fallback
            }),
            Ok(None) => fallback,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read theme preference");
                fallback
            }
        }
    }

    pub fn set_theme(&self, mode: ThemeMode) {
        if let Err(e) = self.backend.set(THEME_KEY, mode.as_str()) {
            tracing::warn!(error = %e, "Failed to save theme preference");
        }
    }
}
