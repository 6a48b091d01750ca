//! Footer listing the keys for the current mode.
//!
//! Keys are looked up in the active keybinding config, so remapped bindings
//! show up as remapped.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::theme::Palette;
use crate::config::{KeyCombo, KeyContext, KeybindingConfig};
use crate::ui::action::Action;

const ROW_HINTS: &[Action] = &[
    Action::PrevSlot,
    Action::NextSlot,
    Action::PrevDay,
    Action::NextDay,
    Action::ResetToNow,
    Action::OpenGoTo,
    Action::OpenPicker,
    Action::DeleteEntry,
    Action::MoveEntryUp,
    Action::MoveEntryDown,
    Action::ToggleTheme,
    Action::Quit,
];

const PICKER_HINTS: &[Action] = &[
    Action::PickerNext,
    Action::PickerConfirm,
    Action::ClosePicker,
];

const GOTO_HINTS: &[Action] = &[Action::ConfirmGoTo, Action::CloseGoTo];

/// Shortest notation bound to `action` in `context`, falling back to global.
pub fn key_for(config: &KeybindingConfig, action: Action, context: KeyContext) -> Option<String> {
    let shortest = |bindings: &std::collections::HashMap<KeyCombo, Action>| {
        bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(combo, _)| combo.to_string())
            .min_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
    };
    config
        .context
        .get(&context)
        .and_then(shortest)
        .or_else(|| shortest(&config.global))
}

pub fn render_key_hints(
    area: Rect,
    buf: &mut Buffer,
    config: &KeybindingConfig,
    context: KeyContext,
    palette: &Palette,
) {
    let actions = match context {
        KeyContext::Picker => PICKER_HINTS,
        KeyContext::GoTo => GOTO_HINTS,
        KeyContext::Rows | KeyContext::Global => ROW_HINTS,
    };

    let mut spans = vec![Span::raw(" ")];
    for action in actions {
        let Some(key) = key_for(config, *action, context) else {
            continue;
        };
        if spans.len() > 1 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            key,
            Style::default().fg(palette.accent_primary),
        ));
        spans.push(Span::styled(
            format!(" {}", action.description()),
            Style::default().fg(palette.text_muted),
        ));
    }

    Paragraph::new(Line::from(spans))
        .style(Style::default().bg(palette.bg_base))
        .render(area, buf);
}
