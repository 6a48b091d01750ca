use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use crate::config::{Config, KeyCombo, KeyContext};
use crate::data::{PreferenceStore, Storage, TimezoneStore};
use crate::entries::Directory;
use crate::time::{generate_slots, localize};
use crate::ui::action::Action;
use crate::ui::app_state::AppState;
use crate::ui::components::{
    key_for, render_key_hints, theme, GoToDialog, TimezonePicker, TimezoneRow,
};
use crate::ui::effect::Effect;
use crate::ui::events::AppEvent;
use crate::ui::terminal_guard::TerminalGuard;

/// Composition root for the interactive view
pub struct App {
    config: Config,
    state: AppState,
    storage: Storage,
    directory: Arc<dyn Directory>,
    /// Event channel sender
    event_tx: mpsc::UnboundedSender<AppEvent>,
    /// Event channel receiver
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl App {
    /// Load (or seed) the entry list and theme from `storage`.
    pub fn new(config: Config, storage: Storage, directory: Arc<dyn Directory>) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let entries = TimezoneStore::new(&storage).load_or_seed();
        let mode = PreferenceStore::new(&storage).theme(config.theme_default.resolve());
        theme::set_mode(mode);

        let state = AppState::new(entries, mode, &config);
        Self {
            config,
            state,
            storage,
            directory,
            event_tx,
            event_rx,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut guard = TerminalGuard::enter()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.clear()?;

        let result = self.event_loop(&mut terminal).await;

        guard.cleanup()?;
        terminal.show_cursor()?;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            terminal.draw(|f| draw(f, &self.state, &self.config))?;

            tokio::select! {
                _ = tokio::time::sleep(Duration::from_millis(16)) => {
                    if event::poll(Duration::from_millis(0))? {
                        self.handle_app_event(AppEvent::Input(event::read()?));
                    }
                }

                Some(event) = self.event_rx.recv() => {
                    self.handle_app_event(event);
                }
            }

            if self.state.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Feed one event through the reducer and run its effects.
    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(Event::Key(key)) => self.handle_key_event(key),
            AppEvent::Input(_) => {}
            AppEvent::SearchResults { query, results } => {
                self.state.apply_search_results(&query, results);
            }
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let context = KeyContext::from_input_mode(self.state.input_mode);
        let combo = KeyCombo::from_key_event(&key);
        let effects = match self.config.keybindings.get_action(&combo, context) {
            Some(action) => {
                tracing::trace!(?action, key = %combo, "Dispatching action");
                self.state.dispatch(action)
            }
            None => match key.code {
                KeyCode::Char(c)
                    if matches!(context, KeyContext::Picker | KeyContext::GoTo)
                        && !key
                            .modifiers
                            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    self.state.type_char(c)
                }
                _ => Vec::new(),
            },
        };
        self.execute(effects);
    }

    fn execute(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SaveEntries => {
                    TimezoneStore::new(&self.storage).save(self.state.entries());
                }
                Effect::SaveTheme(mode) => {
                    theme::set_mode(mode);
                    PreferenceStore::new(&self.storage).set_theme(mode);
                }
                Effect::Search { query } => self.spawn_search(query),
            }
        }
    }

    /// Directory lookups run off the UI loop; results come back as events.
    fn spawn_search(&self, query: String) {
        let directory = Arc::clone(&self.directory);
        let event_tx = self.event_tx.clone();
        let limit = self.config.search_limit;
        tokio::task::spawn_blocking(move || {
            let results = directory.search(&query, limit);
            if event_tx
                .send(AppEvent::SearchResults { query, results })
                .is_err()
            {
                tracing::debug!("Search finished after the app closed");
            }
        });
    }
}

/// Draw the whole view for `state`. Used by the event loop and by tests
/// with a `TestBackend`.
pub fn draw(f: &mut Frame, state: &AppState, config: &Config) {
    let palette = theme::palette();
    let area = f.area();
    let buf = f.buffer_mut();

    Block::default()
        .style(Style::default().bg(palette.bg_base))
        .render(area, buf);

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(1),    // Rows
        Constraint::Length(1), // Footer
    ])
    .split(area);

    draw_header(chunks[0], buf, state, &palette);
    draw_rows(chunks[1], buf, state, config, &palette);
    render_key_hints(
        chunks[2],
        buf,
        &config.keybindings,
        KeyContext::from_input_mode(state.input_mode),
        &palette,
    );

    TimezonePicker::new(&palette).render(area, buf, &state.picker);
    GoToDialog::new(&palette).render(area, buf, &state.goto);
}

fn draw_header(
    area: Rect,
    buf: &mut Buffer,
    state: &AppState,
    palette: &theme::Palette,
) {
    let selected = state
        .reference
        .instant()
        .format("%a, %b %-d %H:%M UTC ")
        .to_string();
    let [title_area, selected_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(selected.len() as u16)])
            .areas(area);

    Paragraph::new(Span::styled(
        " worldtimez",
        Style::default()
            .fg(palette.accent_primary)
            .add_modifier(Modifier::BOLD),
    ))
    .render(title_area, buf);

    Paragraph::new(Span::styled(
        selected,
        Style::default().fg(palette.text_secondary),
    ))
    .alignment(Alignment::Right)
    .render(selected_area, buf);
}

fn draw_rows(
    area: Rect,
    buf: &mut Buffer,
    state: &AppState,
    config: &Config,
    palette: &theme::Palette,
) {
    let reference = state.reference.instant();

    // Entries whose zone no longer resolves are left out of this pass
    let rows: Vec<_> = state
        .entries()
        .iter()
        .filter_map(|entry| match localize(reference, &entry.zone_id) {
            Ok(info) => Some((entry, info)),
            Err(e) => {
                tracing::debug!(zone = %entry.zone_id, error = %e, "Not rendering entry");
                None
            }
        })
        .collect();

    if rows.is_empty() {
        let mut lines = vec![
            Line::raw(""),
            Line::styled(
                "No locations tracked yet.",
                Style::default().fg(palette.text_secondary),
            ),
        ];
        if let Some(key) = key_for(&config.keybindings, Action::OpenPicker, KeyContext::Rows) {
            lines.push(Line::styled(
                format!("Press {key} to add one."),
                Style::default().fg(palette.text_muted),
            ));
        }
        Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(area, buf);
        return;
    }

    let capacity = (area.height / TimezoneRow::HEIGHT) as usize;
    if capacity == 0 {
        return;
    }
    let focused_key = state.focused_key();
    let focused = rows
        .iter()
        .position(|(entry, _)| Some(entry.identity_key().as_str()) == focused_key)
        .unwrap_or(0);
    // Scroll just enough to keep the focused row on screen
    let first = (focused + 1).saturating_sub(capacity);

    for (slot, (entry, info)) in rows.iter().skip(first).take(capacity).enumerate() {
        let row_area = Rect {
            y: area.y + slot as u16 * TimezoneRow::HEIGHT,
            height: TimezoneRow::HEIGHT,
            ..area
        };
        let slots = generate_slots(reference, &entry.zone_id, config.slot_window);
        TimezoneRow::new(entry, info, &slots, palette)
            .clock(config.clock)
            .focused(Some(entry.identity_key().as_str()) == focused_key)
            .render(row_area, buf);
    }
}
