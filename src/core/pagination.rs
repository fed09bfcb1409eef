//! Lazy-load controller for long feeds

use std::ops::Range;

/// Items materialized per batch
pub const DEFAULT_BATCH_SIZE: usize = 20;
/// Cursor distance from the last loaded item that triggers a load
pub const DEFAULT_LOAD_PROXIMITY: usize = 5;
/// Hidden items below the viewport that trigger a load on scroll
pub const DEFAULT_SCROLL_THRESHOLD: usize = 3;

/// Tracks how much of a candidate set is materialized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    total: usize,
    displayed: usize,
    batch: usize,
    in_flight: bool,
}

impl Paginator {
    pub fn new(total: usize, batch: usize) -> Self {
        let batch = batch.max(1);
        Self {
            total,
            displayed: batch.min(total),
            batch,
            in_flight: false,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn displayed(&self) -> usize {
        self.displayed
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub fn has_more(&self) -> bool {
        self.displayed < self.total
    }

    /// Expose the next batch.
    ///
    /// Returns the newly exposed range and marks a load in flight, or `None`
    /// if a load is already in flight or nothing is left. Call
    /// [`Paginator::finish`] once the range has been appended.
    pub fn load_more(&mut self) -> Option<Range<usize>> {
        if self.in_flight {
            tracing::debug!("load_more dropped: already in flight");
            return None;
        }
        let step = self.batch.min(self.total - self.displayed);
        if step == 0 {
            return None;
        }
        self.in_flight = true;
        let start = self.displayed;
        self.displayed += step;
        Some(start..self.displayed)
    }

    /// Release the in-flight guard
    pub fn finish(&mut self) {
        self.in_flight = false;
    }

    /// Record candidates appended after the initial fetch. They stay hidden
    /// until the next batch unless everything was already displayed.
    pub fn grow(&mut self, added: usize) {
        let complete = !self.has_more();
        self.total += added;
        if complete {
            self.displayed = self.total;
        }
    }

    /// Destructive reset after the candidate set changed (search/filter)
    pub fn reset(&mut self, total: usize) {
        self.total = total;
        self.displayed = self.batch.min(total);
        self.in_flight = false;
    }

    /// Cursor-proximity trigger: `index` is within `proximity` of the last
    /// materialized item.
    pub fn near_loaded_edge(&self, index: usize, proximity: usize) -> bool {
        self.has_more() && index + proximity + 1 >= self.displayed
    }

    /// Scroll-position trigger: fewer than `threshold` items remain hidden
    /// below the viewport.
    pub fn near_scroll_end(&self, hidden_below: usize, threshold: usize) -> bool {
        self.has_more() && hidden_below < threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_more_sequence_clamps() {
        let mut p = Paginator::new(45, 20);
        let mut seen = vec![p.displayed()];
        for _ in 0..3 {
            p.load_more();
            p.finish();
            seen.push(p.displayed());
        }
        assert_eq!(seen, vec![20, 40, 45, 45]);
    }

    #[test]
    fn test_load_more_returns_new_range_only() {
        let mut p = Paginator::new(45, 20);
        assert_eq!(p.load_more(), Some(20..40));
        p.finish();
        assert_eq!(p.load_more(), Some(40..45));
        p.finish();
        assert_eq!(p.load_more(), None);
        assert!(!p.is_loading());
    }

    #[test]
    fn test_in_flight_guard_drops_reentrant_call() {
        let mut p = Paginator::new(100, 20);
        assert!(p.load_more().is_some());
        assert_eq!(p.load_more(), None);
        assert_eq!(p.displayed(), 40);
        p.finish();
        assert!(p.load_more().is_some());
    }

    #[test]
    fn test_reset_uses_filtered_count() {
        let mut p = Paginator::new(100, 20);
        p.load_more();
        p.reset(7);
        assert_eq!(p.displayed(), 7);
        assert!(!p.is_loading());
        p.reset(64);
        assert_eq!(p.displayed(), 20);
    }

    #[test]
    fn test_grow() {
        let mut p = Paginator::new(3, 20);
        p.grow(1);
        assert_eq!(p.displayed(), 4);
        let mut p = Paginator::new(30, 20);
        p.grow(1);
        assert_eq!((p.displayed(), p.total()), (20, 31));
    }

    #[test]
    fn test_small_total() {
        let p = Paginator::new(3, 20);
        assert_eq!(p.displayed(), 3);
        assert!(!p.has_more());
        assert!(!p.near_loaded_edge(2, 5));
    }

    #[test]
    fn test_near_loaded_edge() {
        let p = Paginator::new(50, 20);
        assert!(!p.near_loaded_edge(13, 5));
        assert!(p.near_loaded_edge(14, 5));
        assert!(p.near_loaded_edge(19, 5));
    }

    #[test]
    fn test_near_scroll_end() {
        let p = Paginator::new(50, 20);
        assert!(p.near_scroll_end(2, 3));
        assert!(!p.near_scroll_end(3, 3));
    }
}
