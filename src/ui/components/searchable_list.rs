//! Shared state for a query box over a scrollable result list.

use super::TextInputState;

#[derive(Debug, Clone)]
pub struct SearchableListState<T> {
    /// Query input
    pub search: TextInputState,
    /// Results for the most recent query
    items: Vec<T>,
    /// Currently selected index in `items`
    selected: usize,
    /// Maximum visible items in the list
    max_visible: usize,
    /// Scroll offset for the list
    scroll_offset: usize,
}

impl<T> SearchableListState<T> {
    pub fn new(max_visible: usize) -> Self {
        Self {
            search: TextInputState::new(),
            items: Vec::new(),
            selected: 0,
            max_visible: max_visible.max(1),
            scroll_offset: 0,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn max_visible(&self) -> usize {
        self.max_visible
    }

    /// Replace the results; selection returns to the top.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.selected = 0;
        self.scroll_offset = 0;
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    /// Items currently in view, paired with their index.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.items
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(self.max_visible)
    }

    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            if self.selected < self.scroll_offset {
                self.scroll_offset = self.selected;
            }
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
            if self.selected >= self.scroll_offset + self.max_visible {
                self.scroll_offset = self.selected + 1 - self.max_visible;
            }
        }
    }

    /// Page up (move up by visible count).
    pub fn page_up(&mut self) {
        self.selected = self.selected.saturating_sub(self.max_visible);
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        }
    }

    /// Page down (move down by visible count).
    pub fn page_down(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let max_idx = self.items.len() - 1;
        self.selected = (self.selected + self.max_visible).min(max_idx);
        if self.selected >= self.scroll_offset + self.max_visible {
            self.scroll_offset = self.selected + 1 - self.max_visible;
        }
    }
}
