//! "Go to" dialog: type a date and time to select as the reference.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use super::theme::Palette;
use super::TextInputState;

/// Input plus the zone the typed wall clock time is read in
#[derive(Debug, Default)]
pub struct GoToState {
    visible: bool,
    zone_id: String,
    pub input: TextInputState,
    /// Why the last submission was rejected
    pub error: Option<String>,
}

impl GoToState {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn zone_id(&self) -> &str {
        &self.zone_id
    }

    pub fn show(&mut self, zone_id: impl Into<String>) {
        self.visible = true;
        self.zone_id = zone_id.into();
        self.input.clear();
        self.error = None;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

pub struct GoToDialog<'a> {
    palette: &'a Palette,
}

impl<'a> GoToDialog<'a> {
    const WIDTH: u16 = 56;
    const HEIGHT: u16 = 6;

    pub fn new(palette: &'a Palette) -> Self {
        Self { palette }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, state: &GoToState) {
        if !state.is_visible() {
            return;
        }
        let p = self.palette;

        let width = Self::WIDTH.min(area.width.saturating_sub(4));
        let height = Self::HEIGHT.min(area.height.saturating_sub(2));
        let dialog_area = Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        };

        Clear.render(dialog_area, buf);
        let block = Block::default()
            .title(format!(" Go to ({}) ", state.zone_id()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.border_focused))
            .style(Style::default().bg(p.bg_elevated));
        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);

        let [input_area, message_area, _, help_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

        state.input.render_with_placeholder(
            input_area,
            buf,
            Style::default().fg(p.text_bright),
            "YYYY-MM-DD HH:MM, HH:MM or YYYY-MM-DD",
            Style::default().fg(p.text_muted),
        );

        if let Some(error) = &state.error {
            Paragraph::new(error.as_str())
                .style(Style::default().fg(p.accent_warning))
                .render(message_area, buf);
        }

        Paragraph::new(Line::from(vec![
            Span::styled("Enter", Style::default().fg(p.accent_primary)),
            Span::styled(" go  ", Style::default().fg(p.text_muted)),
            Span::styled("Esc", Style::default().fg(p.accent_primary)),
            Span::styled(" cancel", Style::default().fg(p.text_muted)),
        ]))
        .alignment(Alignment::Center)
        .render(help_area, buf);
    }
}
