//! Runtime-switchable light/dark palette for TUI colors.
//!
//! Rendering reads the palette through the accessor functions; toggling
//! swaps it and takes effect on the next frame.

use std::sync::OnceLock;

use parking_lot::RwLock;
use ratatui::style::Color;

use crate::data::ThemeMode;

/// Semantic colors used by every component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub mode: ThemeMode,

    /// Main app background
    pub bg_base: Color,
    /// Entry rows
    pub bg_surface: Color,
    /// Picker dialog
    pub bg_elevated: Color,
    /// Selected slot / focused candidate
    pub bg_highlight: Color,

    pub text_bright: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    /// Focus, selection
    pub accent_primary: Color,
    /// Offsets and dates
    pub accent_secondary: Color,
    pub accent_warning: Color,

    pub border_default: Color,
    pub border_focused: Color,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            bg_base: Color::Rgb(18, 18, 18),
            bg_surface: Color::Rgb(30, 30, 30),
            bg_elevated: Color::Rgb(40, 40, 44),
            bg_highlight: Color::Rgb(33, 150, 243),
            text_bright: Color::Rgb(250, 250, 250),
            text_primary: Color::Rgb(224, 224, 224),
            text_secondary: Color::Rgb(170, 170, 170),
            text_muted: Color::Rgb(120, 120, 120),
            accent_primary: Color::Rgb(33, 150, 243),
            accent_secondary: Color::Rgb(33, 203, 243),
            accent_warning: Color::Rgb(255, 183, 77),
            border_default: Color::Rgb(60, 60, 60),
            border_focused: Color::Rgb(33, 150, 243),
        }
    }

    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            bg_base: Color::Rgb(245, 245, 245),
            bg_surface: Color::Rgb(255, 255, 255),
            bg_elevated: Color::Rgb(250, 250, 252),
            bg_highlight: Color::Rgb(33, 150, 243),
            text_bright: Color::Rgb(0, 0, 0),
            text_primary: Color::Rgb(33, 33, 33),
            text_secondary: Color::Rgb(97, 97, 97),
            text_muted: Color::Rgb(140, 140, 140),
            accent_primary: Color::Rgb(21, 101, 192),
            accent_secondary: Color::Rgb(0, 131, 143),
            accent_warning: Color::Rgb(230, 81, 0),
            border_default: Color::Rgb(210, 210, 210),
            border_focused: Color::Rgb(21, 101, 192),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }
}

static PALETTE: OnceLock<RwLock<Palette>> = OnceLock::new();

fn palette_lock() -> &'static RwLock<Palette> {
    PALETTE.get_or_init(|| RwLock::new(Palette::dark()))
}

/// Apply the palette for `mode`. Takes effect on the next render.
pub fn set_mode(mode: ThemeMode) {
    *palette_lock().write() = Palette::for_mode(mode);
    tracing::debug!(mode = mode.as_str(), "Theme applied");
}

/// Snapshot of the current palette.
pub fn palette() -> Palette {
    palette_lock().read().clone()
}

pub fn current_mode() -> ThemeMode {
    palette_lock().read().mode
}
