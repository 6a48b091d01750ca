//! One tracked location: heading, date, and the slot strip.

use std::ops::Range;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use super::theme::Palette;
use crate::entries::TimezoneEntry;
use crate::time::{selected_index, ClockFormat, LocalTimeInfo, TimeSlot};

pub struct TimezoneRow<'a> {
    entry: &'a TimezoneEntry,
    info: &'a LocalTimeInfo,
    slots: &'a [TimeSlot],
    clock: ClockFormat,
    focused: bool,
    palette: &'a Palette,
}

impl<'a> TimezoneRow<'a> {
    /// Rows are drawn in a bordered box around two lines of content
    pub const HEIGHT: u16 = 4;

    const SLOT_GAP: u16 = 1;

    pub fn new(
        entry: &'a TimezoneEntry,
        info: &'a LocalTimeInfo,
        slots: &'a [TimeSlot],
        palette: &'a Palette,
    ) -> Self {
        Self {
            entry,
            info,
            slots,
            clock: ClockFormat::default(),
            focused: false,
            palette,
        }
    }

    pub fn clock(mut self, clock: ClockFormat) -> Self {
        self.clock = clock;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let p = self.palette;
        let border = if self.focused {
            p.border_focused
        } else {
            p.border_default
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(p.bg_surface));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        self.render_heading(lines[0], buf);
        self.render_slots(lines[1], buf);
    }

    fn render_heading(&self, area: Rect, buf: &mut Buffer) {
        let p = self.palette;
        let handle = if self.focused { "⠿ " } else { "  " };
        let title_style = if self.focused {
            Style::default()
                .fg(p.text_bright)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(p.text_primary)
        };

        let left = Line::from(vec![
            Span::styled(handle, Style::default().fg(p.accent_primary)),
            Span::styled(self.entry.location_label(), title_style),
            Span::raw(" "),
            Span::styled(
                format!("({})", self.info.offset_label()),
                Style::default().fg(p.text_secondary),
            ),
        ]);
        Paragraph::new(left).render(area, buf);

        let right = format!(
            "{}  {}",
            self.info.time_label(self.clock),
            self.info.date_label
        );
        let width = (right.width() as u16).min(area.width);
        let right_area = Rect {
            x: area.x + area.width - width,
            width,
            ..area
        };
        Paragraph::new(Span::styled(
            right,
            Style::default()
                .fg(p.accent_secondary)
                .add_modifier(Modifier::BOLD),
        ))
        .render(right_area, buf);
    }

    fn render_slots(&self, area: Rect, buf: &mut Buffer) {
        let p = self.palette;
        let Some(selected) = selected_index(self.slots) else {
            return;
        };

        let labels: Vec<String> = self.slots.iter().map(|s| s.label(self.clock)).collect();
        let cell_width = labels.iter().map(|l| l.width()).max().unwrap_or(0) as u16 + 2;
        let fit = (area.width / (cell_width + Self::SLOT_GAP)).max(1) as usize;

        let mut spans = Vec::new();
        for index in visible_slot_range(self.slots.len(), selected, fit) {
            let slot = &self.slots[index];
            let style = if slot.is_selected {
                Style::default()
                    .fg(p.text_bright)
                    .bg(p.bg_highlight)
                    .add_modifier(Modifier::BOLD)
            } else if slot.hour == 0 && slot.minute == 0 {
                // Midnight marks a date change in the strip
                Style::default().fg(p.accent_warning)
            } else {
                Style::default().fg(p.text_muted)
            };
            spans.push(Span::styled(
                format!("{:^width$}", labels[index], width = cell_width as usize),
                style,
            ));
            spans.push(Span::raw(" ".repeat(Self::SLOT_GAP as usize)));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

/// Indices of the `fit` slots to show, keeping `selected` as close to the
/// middle as the ends of the window allow.
pub fn visible_slot_range(len: usize, selected: usize, fit: usize) -> Range<usize> {
    if len <= fit {
        return 0..len;
    }
    let start = selected.saturating_sub(fit / 2).min(len - fit);
    start..start + fit
}
