//! Generic navigable list
//!
//! [`ListPanel`] is the one list component behind every feed-like panel.
//! It owns the full candidate set, the materialized prefix, the cursor and
//! (optionally) a [`Paginator`]. Leading slots are non-item rows placed
//! before the items (a search box, a comment input) that the cursor can
//! still land on.

use std::ops::Range;

use crate::core::{Cursor, Navigable, PanelId, Paginator};

use super::{Panel, PanelTuning};

pub struct ListPanel<T> {
    id: PanelId,
    /// Everything fetched from the backend
    source: Vec<T>,
    /// `source` after the active filter
    candidates: Vec<T>,
    /// Materialized prefix of `candidates`
    items: Vec<T>,
    leading: usize,
    row_height: usize,
    cursor: Cursor,
    paginator: Option<Paginator>,
    load_proximity: usize,
    scroll_threshold: usize,
}

impl<T: Clone> ListPanel<T> {
    /// A list showing every item at once
    pub fn new(id: PanelId, items: Vec<T>, tuning: &PanelTuning) -> Self {
        Self::build(id, items, None, tuning)
    }

    /// A list materialized in batches of `tuning.batch_size`
    pub fn paginated(id: PanelId, source: Vec<T>, tuning: &PanelTuning) -> Self {
        let paginator = Paginator::new(source.len(), tuning.batch_size);
        Self::build(id, source, Some(paginator), tuning)
    }

    fn build(id: PanelId, source: Vec<T>, paginator: Option<Paginator>, tuning: &PanelTuning) -> Self {
        let shown = paginator.as_ref().map_or(source.len(), Paginator::displayed);
        let items = source[..shown].to_vec();
        let mut panel = Self {
            id,
            candidates: source.clone(),
            source,
            items,
            leading: 0,
            row_height: 1,
            cursor: Cursor::new(id).with_steps(tuning.steps),
            paginator,
            load_proximity: tuning.load_proximity,
            scroll_threshold: tuning.scroll_threshold,
        };
        panel.cursor.reset(panel.item_count());
        panel
    }

    /// Reserve `slots` rows before the first item
    pub fn with_leading(mut self, slots: usize) -> Self {
        self.leading = slots;
        self.cursor.reset(self.item_count());
        self
    }

    /// Terminal rows taken by one item
    pub fn with_row_height(mut self, rows: usize) -> Self {
        self.row_height = rows.max(1);
        self
    }

    pub fn id(&self) -> PanelId {
        self.id
    }

    /// Materialized items
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn leading(&self) -> usize {
        self.leading
    }

    pub fn row_height(&self) -> usize {
        self.row_height
    }

    pub fn paginator(&self) -> Option<&Paginator> {
        self.paginator.as_ref()
    }

    /// Size of the filtered candidate set
    pub fn total(&self) -> usize {
        self.candidates.len()
    }

    /// Index into `items()` under the cursor, if the cursor is on an item
    pub fn selected_index(&self) -> Option<usize> {
        self.cursor.index()?.checked_sub(self.leading)
    }

    pub fn selected(&self) -> Option<&T> {
        self.items.get(self.selected_index()?)
    }

    /// Leading slot under the cursor, if any
    pub fn slot(&self) -> Option<usize> {
        self.cursor.index().filter(|&i| i < self.leading)
    }

    /// Apply `update` to every copy of the items matching `pred`
    pub fn update_where(&mut self, pred: impl Fn(&T) -> bool, update: impl Fn(&mut T)) -> bool {
        let mut hit = false;
        for item in self
            .source
            .iter_mut()
            .chain(self.candidates.iter_mut())
            .chain(self.items.iter_mut())
        {
            if pred(item) {
                update(item);
                hit = true;
            }
        }
        hit
    }

    /// Rebuild from the subset of the source matching `pred`.
    ///
    /// Destructive: materialized items are discarded, the paginator is reset
    /// to the filtered count and the cursor returns to slot 0.
    pub fn apply_filter(&mut self, pred: impl Fn(&T) -> bool) {
        self.candidates = self.source.iter().filter(|item| pred(item)).cloned().collect();
        let shown = match self.paginator.as_mut() {
            Some(pager) => {
                pager.reset(self.candidates.len());
                pager.displayed()
            }
            None => self.candidates.len(),
        };
        self.items = self.candidates[..shown].to_vec();
        self.cursor.reset(self.item_count());
        tracing::debug!(
            panel = %self.id,
            matched = self.candidates.len(),
            displayed = shown,
            "filter applied"
        );
    }

    /// Replace the source wholesale (cursor back to slot 0)
    pub fn replace_all(&mut self, source: Vec<T>) {
        self.source = source;
        self.apply_filter(|_| true);
    }

    /// Append one item after the initial fetch
    pub fn push(&mut self, item: T) {
        self.source.push(item.clone());
        self.candidates.push(item.clone());
        match self.paginator.as_mut() {
            Some(pager) => {
                pager.grow(1);
                if self.items.len() < pager.displayed() {
                    self.items.push(item);
                }
            }
            None => self.items.push(item),
        }
        self.cursor.sync_len(self.item_count());
    }

    /// Materialize the next batch. Only the new range is appended.
    pub fn load_more(&mut self) -> bool {
        let Some(pager) = self.paginator.as_mut() else {
            return false;
        };
        let Some(range) = pager.load_more() else {
            return false;
        };
        if let Some(batch) = self.candidates.get(range.clone()) {
            self.items.extend_from_slice(batch);
        }
        pager.finish();
        tracing::debug!(
            panel = %self.id,
            loaded = range.len(),
            displayed = self.items.len(),
            "loaded next batch"
        );
        true
    }

    /// Scroll the viewport by `delta` slots without moving the cursor,
    /// loading more when the bottom comes close.
    pub fn scroll(&mut self, delta: isize) {
        let len = self.item_count();
        let hidden = self.cursor.scroll_viewport(delta, len);
        let near_end = self
            .paginator
            .as_ref()
            .is_some_and(|p| p.near_scroll_end(hidden, self.scroll_threshold));
        if near_end {
            self.load_more();
        }
    }

    /// Fit the viewport to `rows` terminal rows
    pub fn set_viewport_rows(&mut self, rows: usize) {
        self.cursor.set_viewport_height(rows / self.row_height);
    }

    /// Slot indices inside the viewport
    pub fn visible_slots(&self) -> Range<usize> {
        let top = self.cursor.viewport_top();
        let end = (top + self.cursor.viewport_height()).min(self.item_count());
        top.min(end)..end
    }
}

impl<T: Clone> Navigable for ListPanel<T> {
    fn item_count(&self) -> usize {
        self.leading + self.items.len()
    }

    fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    fn cursor_moved(&mut self) {
        let Some(index) = self.selected_index() else {
            return;
        };
        let near_edge = self
            .paginator
            .as_ref()
            .is_some_and(|p| p.near_loaded_edge(index, self.load_proximity));
        if near_edge {
            self.load_more();
        }
    }
}

impl<T: Clone> Panel for ListPanel<T> {
    fn id(&self) -> PanelId {
        self.id
    }

    fn navigable(&mut self) -> Option<&mut dyn Navigable> {
        Some(self)
    }

    fn scroll(&mut self, delta: isize) {
        ListPanel::scroll(self, delta);
    }
}
