use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::default_keys::default_keybindings;
use super::keys::{KeyContext, KeybindingConfig};
use crate::data::ThemeMode;
use crate::time::{ClockFormat, SlotWindow};
use crate::ui::action::Action;
use crate::util::paths::config_path;

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Shape of the per-location slot strip
    pub slot_window: SlotWindow,
    /// Wall clock style for all time labels
    pub clock: ClockFormat,
    /// Theme used while no preference has been stored
    pub theme_default: ThemeDefault,
    /// Maximum directory candidates shown while adding
    pub search_limit: usize,
    /// Defaults with any `[keys.*]` overrides applied
    pub keybindings: KeybindingConfig,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeDefault {
    /// Follow the terminal's colour scheme
    #[default]
    Auto,
    Light,
    Dark,
}

impl ThemeDefault {
    pub fn resolve(self) -> ThemeMode {
        match self {
            ThemeDefault::Auto => ThemeMode::ambient(),
            ThemeDefault::Light => ThemeMode::Light,
            ThemeDefault::Dark => ThemeMode::Dark,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            slot_window: SlotWindow::default(),
            clock: ClockFormat::TwelveHour,
            theme_default: ThemeDefault::Auto,
            search_limit: 12,
            keybindings: default_keybindings(),
        }
    }
}

/// TOML representation of slot configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlSlotsConfig {
    pub window: Option<usize>,
    pub step_minutes: Option<i64>,
    pub center: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlDisplayConfig {
    pub clock: Option<ClockFormat>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlThemeConfig {
    pub default: Option<ThemeDefault>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlSearchConfig {
    pub limit: Option<usize>,
}

/// `[keys.<context>]` tables: key notation -> action name
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlKeybindings {
    pub global: Option<HashMap<String, Action>>,
    pub rows: Option<HashMap<String, Action>>,
    pub picker: Option<HashMap<String, Action>>,
    pub goto: Option<HashMap<String, Action>>,
}

impl TomlKeybindings {
    fn to_keybinding_config(&self) -> KeybindingConfig {
        let mut config = KeybindingConfig::new();
        let tables = [
            (KeyContext::Global, &self.global),
            (KeyContext::Rows, &self.rows),
            (KeyContext::Picker, &self.picker),
            (KeyContext::GoTo, &self.goto),
        ];
        for (context, bindings) in tables {
            if let Some(bindings) = bindings {
                config.bind_all(context, bindings);
            }
        }
        config
    }
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub slots: Option<TomlSlotsConfig>,
    pub display: Option<TomlDisplayConfig>,
    pub theme: Option<TomlThemeConfig>,
    pub search: Option<TomlSearchConfig>,
    pub keys: Option<TomlKeybindings>,
}

impl Config {
    /// Load configuration from file, merging with defaults
    pub fn load() -> Self {
        Self::load_from(&config_path(), true)
    }

    /// Like [`load`](Self::load), but never writes the example file.
    pub fn load_read_only() -> Self {
        Self::load_from(&config_path(), false)
    }

    fn load_from(config_file: &Path, create_missing: bool) -> Self {
        // Create example config on first run
        if create_missing && !config_file.exists() {
            Self::create_default_config(config_file);
        }

        match fs::read_to_string(config_file) {
            Ok(contents) => Self::from_toml_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(
                    path = %config_file.display(),
                    error = %e,
                    "Ignoring unreadable config file"
                );
                Config::default()
            }),
            Err(e) => {
                tracing::debug!(
                    path = %config_file.display(),
                    error = %e,
                    "No config file, using defaults"
                );
                Config::default()
            }
        }
    }

    /// Parse a config document and merge it over the defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        let toml_config = toml::from_str::<TomlConfig>(contents)?;
        Ok(Config::default().merge(toml_config))
    }

    fn merge(mut self, toml_config: TomlConfig) -> Self {
        if let Some(slots) = toml_config.slots {
            let defaults = self.slot_window;
            let window = SlotWindow::new(
                slots.window.unwrap_or(defaults.size),
                slots.step_minutes.unwrap_or(defaults.step_minutes),
                slots.center.unwrap_or_else(|| {
                    // Keep the selected slot centred when only the size changes
                    slots.window.map(|w| w / 2).unwrap_or(defaults.center)
                }),
            );
            if window.is_valid() {
                self.slot_window = window;
            } else {
                tracing::warn!(
                    size = window.size,
                    step_minutes = window.step_minutes,
                    center = window.center,
                    "Invalid slot window in config, using defaults"
                );
            }
        }

        if let Some(clock) = toml_config.display.and_then(|d| d.clock) {
            self.clock = clock;
        }

        if let Some(default) = toml_config.theme.and_then(|t| t.default) {
            self.theme_default = default;
        }

        if let Some(limit) = toml_config.search.and_then(|s| s.limit) {
            self.search_limit = limit.max(1);
        }

        if let Some(keys) = toml_config.keys {
            self.keybindings.merge(keys.to_keybinding_config());
        }

        self
    }

    /// Create the default config file from the bundled example
    fn create_default_config(path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!(error = %e, "Failed to create config directory");
                return;
            }
        }

        if let Err(e) = fs::write(path, EXAMPLE_CONFIG) {
            tracing::warn!(error = %e, "Failed to write default config");
        }
    }
}
