//! Keybinding types and vim-style key notation parsing
//!
//! Bindings are written as `"C-x"`, `"S-<Up>"`, `"<CR>"` and so on, in the
//! config file as well as in the built-in defaults.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

use crate::ui::action::Action;
use crate::ui::events::InputMode;

/// A key combination (key code + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Normalize a terminal key event into the form produced by parsing.
    ///
    /// Uppercase letters become lowercase + SHIFT so `"G"` matches Shift+g.
    pub fn from_key_event(event: &KeyEvent) -> Self {
        match event.code {
            KeyCode::Char(c) if c.is_ascii_uppercase() => Self {
                code: KeyCode::Char(c.to_ascii_lowercase()),
                modifiers: event.modifiers | KeyModifiers::SHIFT,
            },
            // Shift is implied by the character itself for punctuation
            KeyCode::Char(c) if !c.is_ascii_alphanumeric() => Self {
                code: event.code,
                modifiers: event.modifiers - KeyModifiers::SHIFT,
            },
            _ => Self {
                code: event.code,
                modifiers: event.modifiers,
            },
        }
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("C".into());
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("M".into());
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("S".into());
        }

        let key = match self.code {
            KeyCode::Char(' ') => "<Space>".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "<CR>".to_string(),
            KeyCode::Esc => "<Esc>".to_string(),
            KeyCode::Tab => "<Tab>".to_string(),
            KeyCode::Backspace => "<BS>".to_string(),
            KeyCode::Delete => "<Del>".to_string(),
            KeyCode::Up => "<Up>".to_string(),
            KeyCode::Down => "<Down>".to_string(),
            KeyCode::Left => "<Left>".to_string(),
            KeyCode::Right => "<Right>".to_string(),
            KeyCode::PageUp => "<PageUp>".to_string(),
            KeyCode::PageDown => "<PageDown>".to_string(),
            KeyCode::Home => "<Home>".to_string(),
            KeyCode::End => "<End>".to_string(),
            KeyCode::F(n) => format!("<F{n}>"),
            other => format!("{other:?}"),
        };
        parts.push(key);
        write!(f, "{}", parts.join("-"))
    }
}

/// Which group of bindings applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyContext {
    /// Fallback for every mode
    Global,
    /// Browsing the tracked rows
    Rows,
    /// Typing into the add-location picker
    Picker,
    /// Typing into the go-to box
    GoTo,
}

impl KeyContext {
    pub fn from_input_mode(mode: InputMode) -> Self {
        match mode {
            InputMode::Normal => KeyContext::Rows,
            InputMode::Picking => KeyContext::Picker,
            InputMode::GoTo => KeyContext::GoTo,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeybindingConfig {
    pub global: HashMap<KeyCombo, Action>,
    pub context: HashMap<KeyContext, HashMap<KeyCombo, Action>>,
}

impl KeybindingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context bindings win over global ones.
    pub fn get_action(&self, key: &KeyCombo, context: KeyContext) -> Option<Action> {
        self.context
            .get(&context)
            .and_then(|bindings| bindings.get(key))
            .or_else(|| self.global.get(key))
            .copied()
    }

    pub fn bind(&mut self, context: KeyContext, key: KeyCombo, action: Action) {
        match context {
            KeyContext::Global => {
                self.global.insert(key, action);
            }
            _ => {
                self.context.entry(context).or_default().insert(key, action);
            }
        }
    }

    /// Layer user bindings on top of these.
    pub fn merge(&mut self, other: KeybindingConfig) {
        self.global.extend(other.global);
        for (ctx, bindings) in other.context {
            self.context.entry(ctx).or_default().extend(bindings);
        }
    }

    /// Add bindings from one `[keys.<context>]` table of the config file.
    ///
    /// Unparseable notations are skipped with a warning so one typo does not
    /// discard the rest of the table.
    pub fn bind_all(&mut self, context: KeyContext, bindings: &HashMap<String, Action>) {
        for (notation, action) in bindings {
            match notation.parse::<KeyCombo>() {
                Ok(combo) => self.bind(context, combo, *action),
                Err(e) => {
                    tracing::warn!(key = %notation, error = %e, "Ignoring keybinding");
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("empty key notation")]
    Empty,
    #[error("no key specified")]
    NoKey,
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error("invalid modifier: {0}")]
    InvalidModifier(String),
}

/// Parse vim-style notation: `C-`, `M-`, `S-` modifiers followed by a single
/// character or a bracketed name such as `<CR>`, `<Up>`, `<Space>`, `<F5>`.
/// Modifiers may also sit inside the brackets (`<S-Up>`).
pub fn parse_key_notation(s: &str) -> Result<KeyCombo, KeyParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(KeyParseError::Empty);
    }

    let (mut modifiers, rest) = split_modifiers(s)?;

    let code = if rest.len() > 2 && rest.starts_with('<') && rest.ends_with('>') {
        let (inner_mods, name) = split_modifiers(&rest[1..rest.len() - 1])?;
        modifiers |= inner_mods;
        special_key(name)?
    } else {
        let mut chars = rest.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                if c.is_ascii_uppercase() {
                    modifiers |= KeyModifiers::SHIFT;
                }
                KeyCode::Char(c.to_ascii_lowercase())
            }
            (None, _) => return Err(KeyParseError::NoKey),
            _ => special_key(rest)?,
        }
    };

    Ok(KeyCombo::new(code, modifiers))
}

/// Peel `X-` prefixes off the front. A trailing `-` (the minus key) or a
/// lone letter is left for the caller.
fn split_modifiers(s: &str) -> Result<(KeyModifiers, &str), KeyParseError> {
    let mut modifiers = KeyModifiers::NONE;
    let mut rest = s;
    while rest.len() > 2 && rest.as_bytes()[1] == b'-' {
        match &rest[..1] {
            "C" => modifiers |= KeyModifiers::CONTROL,
            "M" => modifiers |= KeyModifiers::ALT,
            "S" => modifiers |= KeyModifiers::SHIFT,
            "<" => break,
            other => return Err(KeyParseError::InvalidModifier(other.to_string())),
        }
        rest = &rest[2..];
    }
    Ok((modifiers, rest))
}

fn special_key(name: &str) -> Result<KeyCode, KeyParseError> {
    let code = match name.to_ascii_uppercase().as_str() {
        "CR" | "ENTER" | "RETURN" => KeyCode::Enter,
        "ESC" | "ESCAPE" => KeyCode::Esc,
        "TAB" => KeyCode::Tab,
        "BS" | "BACKSPACE" => KeyCode::Backspace,
        "DEL" | "DELETE" => KeyCode::Delete,
        "UP" => KeyCode::Up,
        "DOWN" => KeyCode::Down,
        "LEFT" => KeyCode::Left,
        "RIGHT" => KeyCode::Right,
        "PAGEUP" | "PGUP" => KeyCode::PageUp,
        "PAGEDOWN" | "PGDN" => KeyCode::PageDown,
        "HOME" => KeyCode::Home,
        "END" => KeyCode::End,
        "SPACE" => KeyCode::Char(' '),
        f if f.len() > 1 && f.starts_with('F') => match f[1..].parse::<u8>() {
            Ok(n @ 1..=12) => KeyCode::F(n),
            _ => return Err(KeyParseError::InvalidKey(name.to_string())),
        },
        _ => return Err(KeyParseError::InvalidKey(name.to_string())),
    };
    Ok(code)
}

impl FromStr for KeyCombo {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_key_notation(s)
    }
}
