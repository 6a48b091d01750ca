//! Add-location dialog: a query box over directory candidates.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use super::theme::Palette;
use super::SearchableListState;
use crate::entries::TimezoneEntry;
use crate::time::format_utc_offset;

pub struct TimezonePickerState {
    visible: bool,
    pub list: SearchableListState<TimezoneEntry>,
}

impl TimezonePickerState {
    pub fn new(max_visible: usize) -> Self {
        Self {
            visible: false,
            list: SearchableListState::new(max_visible),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Open with an empty query and no candidates.
    pub fn show(&mut self) {
        self.visible = true;
        self.list.search.clear();
        self.list.set_items(Vec::new());
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn query(&self) -> &str {
        self.list.search.value()
    }
}

pub struct TimezonePicker<'a> {
    palette: &'a Palette,
}

impl<'a> TimezonePicker<'a> {
    const WIDTH: u16 = 64;

    pub fn new(palette: &'a Palette) -> Self {
        Self { palette }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, state: &TimezonePickerState) {
        if !state.is_visible() {
            return;
        }
        let p = self.palette;

        // query + divider + candidates + instructions + borders
        let height = state.list.max_visible() as u16 + 5;
        let dialog_width = Self::WIDTH.min(area.width.saturating_sub(4));
        let dialog_height = height.min(area.height.saturating_sub(2));
        let dialog_area = Rect {
            x: area.x + area.width.saturating_sub(dialog_width) / 2,
            y: area.y + area.height.saturating_sub(dialog_height) / 2,
            width: dialog_width,
            height: dialog_height,
        };

        Clear.render(dialog_area, buf);
        let block = Block::default()
            .title(" Add location ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.border_focused))
            .style(Style::default().bg(p.bg_elevated));
        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

        state.list.search.render_with_placeholder(
            chunks[0],
            buf,
            Style::default().fg(p.text_bright),
            "Type a city, country or zone...",
            Style::default().fg(p.text_muted),
        );

        Paragraph::new("─".repeat(chunks[1].width as usize))
            .style(Style::default().fg(p.border_default))
            .render(chunks[1], buf);

        self.render_candidates(chunks[2], buf, state);

        Paragraph::new(Line::from(vec![
            Span::styled("↑↓", Style::default().fg(p.accent_primary)),
            Span::styled(" select  ", Style::default().fg(p.text_muted)),
            Span::styled("Enter", Style::default().fg(p.accent_primary)),
            Span::styled(" add  ", Style::default().fg(p.text_muted)),
            Span::styled("Esc", Style::default().fg(p.accent_primary)),
            Span::styled(" cancel", Style::default().fg(p.text_muted)),
        ]))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);
    }

    fn render_candidates(&self, area: Rect, buf: &mut Buffer, state: &TimezonePickerState) {
        let p = self.palette;
        if state.list.items().is_empty() {
            let message = if state.query().is_empty() {
                "Start typing to search"
            } else {
                "No matches"
            };
            Paragraph::new(message)
                .style(Style::default().fg(p.text_muted))
                .alignment(Alignment::Center)
                .render(area, buf);
            return;
        }

        let lines: Vec<Line> = state
            .list
            .visible()
            .map(|(index, entry)| {
                let selected = index == state.list.selected();
                let name_style = if selected {
                    Style::default()
                        .fg(p.text_bright)
                        .bg(p.bg_highlight)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(p.text_primary)
                };
                Line::from(vec![
                    Span::styled(
                        if selected { "▶ " } else { "  " },
                        Style::default().fg(p.accent_primary),
                    ),
                    Span::styled(entry.location_label(), name_style),
                    Span::styled(
                        format!("  {}  {}", entry.zone_id, format_utc_offset(entry.utc_offset_minutes)),
                        Style::default().fg(p.text_secondary),
                    ),
                ])
            })
            .collect();

        Paragraph::new(lines).render(area, buf);
    }
}
