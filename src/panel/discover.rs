//! Discover feed with its search box

use std::time::Instant;

use crate::backend::Post;
use crate::core::{Cursor, Debouncer, Navigable, PanelId};

use super::{ListPanel, Panel, PanelTuning, TextInput, POST_ROWS};

/// Slot 0 is the search box, posts follow
pub struct DiscoverPanel {
    feed: ListPanel<Post>,
    search: TextInput,
    debounce: Debouncer,
    applied: String,
}

impl DiscoverPanel {
    pub fn new(posts: Vec<Post>, tuning: &PanelTuning) -> Self {
        Self {
            feed: ListPanel::paginated(PanelId::DiscoverFeed, posts, tuning)
                .with_leading(1)
                .with_row_height(POST_ROWS),
            search: TextInput::new("Search posts, people, tags..."),
            debounce: Debouncer::new(tuning.search_debounce),
            applied: String::new(),
        }
    }

    pub fn feed(&self) -> &ListPanel<Post> {
        &self.feed
    }

    pub fn feed_mut(&mut self) -> &mut ListPanel<Post> {
        &mut self.feed
    }

    pub fn search(&self) -> &TextInput {
        &self.search
    }

    /// Query currently filtering the feed
    pub fn applied_query(&self) -> &str {
        &self.applied
    }

    pub fn on_search_box(&self) -> bool {
        self.feed.slot() == Some(0)
    }

    /// The search text changed; (re)start the debounce
    pub fn search_edited(&mut self, now: Instant) {
        self.debounce.restart(now);
    }

    /// Enter in the search box: filter now and move to the first result
    pub fn submit_search(&mut self) {
        self.debounce.cancel();
        self.apply_search();
        self.feed.move_to(1);
    }

    /// Esc from the search box
    pub fn leave_search_box(&mut self) {
        self.feed.move_to(1);
    }

    pub fn tick(&mut self, now: Instant) {
        if self.debounce.fire_if_due(now) {
            self.apply_search();
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    fn apply_search(&mut self) {
        let needle = self.search.text().trim().to_lowercase();
        self.feed.apply_filter(|post| post.matches(&needle));
        self.applied = needle;
    }
}

impl Navigable for DiscoverPanel {
    fn item_count(&self) -> usize {
        self.feed.item_count()
    }

    fn cursor(&self) -> &Cursor {
        self.feed.cursor()
    }

    fn cursor_mut(&mut self) -> &mut Cursor {
        self.feed.cursor_mut()
    }

    fn cursor_moved(&mut self) {
        self.feed.cursor_moved();
    }
}

impl Panel for DiscoverPanel {
    fn id(&self) -> PanelId {
        PanelId::DiscoverFeed
    }

    fn navigable(&mut self) -> Option<&mut dyn Navigable> {
        Some(self)
    }

    fn text_input(&mut self) -> Option<&mut TextInput> {
        Some(&mut self.search)
    }

    fn scroll(&mut self, delta: isize) {
        self.feed.scroll(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Backend, FakeBackend};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::time::Duration;

    fn panel() -> DiscoverPanel {
        let mut backend = FakeBackend::new().with_generated_discover(60);
        let posts = backend.discover(100).unwrap();
        DiscoverPanel::new(posts, &PanelTuning::default())
    }

    fn type_text(panel: &mut DiscoverPanel, text: &str, now: Instant) {
        for c in text.chars() {
            let key = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
            if let Some(input) = panel.text_input() {
                input.apply_key(key);
            }
            panel.search_edited(now);
        }
    }

    #[test]
    fn test_starts_on_search_box() {
        let p = panel();
        assert!(p.on_search_box());
        assert_eq!(p.feed().items().len(), 20);
    }

    #[test]
    fn test_debounce_applies_latest_query_once() {
        let mut p = panel();
        let t0 = Instant::now();
        type_text(&mut p, "user3", t0);
        p.tick(t0 + Duration::from_millis(100));
        assert_eq!(p.applied_query(), "");
        p.tick(t0 + Duration::from_millis(300));
        assert_eq!(p.applied_query(), "user3");
        assert!(p.deadline().is_none());
        let total = p.feed().total();
        assert_eq!(p.feed().items().len(), total.min(20));
        assert!(p.feed().items().iter().all(|post| post.author == "user3"));
        assert!(p.on_search_box());
    }

    #[test]
    fn test_restart_does_not_stack() {
        let mut p = panel();
        let t0 = Instant::now();
        type_text(&mut p, "u", t0);
        type_text(&mut p, "s", t0 + Duration::from_millis(250));
        p.tick(t0 + Duration::from_millis(320));
        assert_eq!(p.applied_query(), "");
        p.tick(t0 + Duration::from_millis(560));
        assert_eq!(p.applied_query(), "us");
    }

    #[test]
    fn test_submit_moves_to_first_result() {
        let mut p = panel();
        type_text(&mut p, "user1", Instant::now());
        p.submit_search();
        assert!(p.deadline().is_none());
        assert_eq!(p.cursor().index(), Some(1));
        assert_eq!(p.feed().selected().map(|post| post.author.as_str()), Some("user1"));
    }

    #[test]
    fn test_no_matches_keeps_search_box() {
        let mut p = panel();
        type_text(&mut p, "zzzz", Instant::now());
        p.submit_search();
        assert_eq!(p.feed().items().len(), 0);
        assert_eq!(p.cursor().index(), Some(0));
    }
}
