//! Integration tests for tuitter
//!
//! These tests drive the application object with synthetic key events and
//! the in-memory backend. Time is passed in explicitly, so chord windows,
//! debounce and settle delays are deterministic.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use proptest::prelude::*;
use tempfile::TempDir;
use tuitter::app::{App, Config};
use tuitter::backend::{Backend, FakeBackend};
use tuitter::core::{AppMode, PanelId, ScreenName};
use tuitter::drafts::DraftStore;
use tuitter::handler::MouseAction;
use tuitter::screens::ScreenView;

/// Helper to create a KeyEvent
fn key_event(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn press(app: &mut App, code: KeyCode, now: Instant) {
    app.handle_key(key_event(code), now);
}

fn type_text(app: &mut App, text: &str, now: Instant) {
    for c in text.chars() {
        press(app, KeyCode::Char(c), now);
    }
}

fn test_config(dir: &TempDir) -> Config {
    Config {
        drafts_path: dir.path().join("drafts.json"),
        fetch_limit: 200,
        ..Config::default()
    }
}

fn build_app(dir: &TempDir, backend: impl Backend + 'static) -> (App, Instant) {
    let mut app = App::new(Box::new(backend), &test_config(dir));
    app.set_content_rows(40);
    let now = settle(&mut app, Instant::now());
    (app, now)
}

/// Land the pending focus and let the switch guard expire
fn settle(app: &mut App, now: Instant) -> Instant {
    app.after_render(now);
    let later = now + Duration::from_secs(1);
    app.tick(later);
    later
}

fn cursor_index(app: &mut App, panel: PanelId) -> Option<usize> {
    app.cursor_of(panel).and_then(|cursor| cursor.index())
}

fn discover_displayed(app: &App) -> usize {
    match app.view() {
        ScreenView::Discover(discover) => discover
            .feed()
            .paginator()
            .map_or(0, |pager| pager.displayed()),
        _ => panic!("discover is not mounted"),
    }
}

fn open_discover(app: &mut App, now: Instant) -> Instant {
    press(app, KeyCode::Char('2'), now);
    assert_eq!(app.current_screen(), ScreenName::Discover);
    settle(app, now)
}

// =============================================================================
// Command Mode Isolation
// =============================================================================

mod command_mode_tests {
    use super::*;

    fn command_key() -> impl Strategy<Value = KeyCode> {
        prop_oneof![
            proptest::char::range('a', 'z').prop_map(KeyCode::Char),
            proptest::char::range('0', '9').prop_map(KeyCode::Char),
            Just(KeyCode::Char('G')),
            Just(KeyCode::Up),
            Just(KeyCode::Down),
            Just(KeyCode::Left),
            Just(KeyCode::Right),
            Just(KeyCode::Tab),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn keys_in_command_mode_never_move_the_cursor(
            keys in proptest::collection::vec(command_key(), 10)
        ) {
            let dir = TempDir::new().unwrap();
            let (mut app, now) = build_app(&dir, FakeBackend::new());
            press(&mut app, KeyCode::Char('j'), now);
            let before = cursor_index(&mut app, PanelId::TimelineFeed);
            let mounts = app.mount_count();

            press(&mut app, KeyCode::Char(':'), now);
            for key in keys {
                press(&mut app, key, now);
            }

            prop_assert_eq!(app.mode(), AppMode::Command);
            prop_assert_eq!(cursor_index(&mut app, PanelId::TimelineFeed), before);
            prop_assert_eq!(app.current_screen(), ScreenName::Timeline);
            prop_assert_eq!(app.mount_count(), mounts);
        }
    }

    #[test]
    fn test_escape_leaves_command_mode_without_running() {
        let dir = TempDir::new().unwrap();
        let (mut app, now) = build_app(&dir, FakeBackend::new());
        type_text(&mut app, ":q", now);
        press(&mut app, KeyCode::Esc, now);
        assert_eq!(app.mode(), AppMode::Normal);
        assert!(!app.should_quit());
    }

    #[test]
    fn test_unknown_command_is_ignored() {
        let dir = TempDir::new().unwrap();
        let (mut app, now) = build_app(&dir, FakeBackend::new());
        type_text(&mut app, ":nosuchthing", now);
        press(&mut app, KeyCode::Enter, now);
        assert_eq!(app.mode(), AppMode::Normal);
        assert_eq!(app.current_screen(), ScreenName::Timeline);
    }
}

// =============================================================================
// Screen Switching
// =============================================================================

mod switch_tests {
    use super::*;

    #[test]
    fn test_second_switch_inside_guard_is_dropped() {
        let dir = TempDir::new().unwrap();
        let (mut app, now) = build_app(&dir, FakeBackend::new());
        let mounts = app.mount_count();

        press(&mut app, KeyCode::Char('2'), now);
        press(&mut app, KeyCode::Char('3'), now);

        assert_eq!(app.current_screen(), ScreenName::Discover);
        assert_eq!(app.mount_count(), mounts + 1);
    }

    #[test]
    fn test_switch_allowed_after_settle() {
        let dir = TempDir::new().unwrap();
        let (mut app, now) = build_app(&dir, FakeBackend::new());
        let now = open_discover(&mut app, now);
        press(&mut app, KeyCode::Char('3'), now);
        assert_eq!(app.current_screen(), ScreenName::Notifications);
    }

    #[test]
    fn test_focus_lands_after_render() {
        let dir = TempDir::new().unwrap();
        let (mut app, now) = build_app(&dir, FakeBackend::new());
        press(&mut app, KeyCode::Char('4'), now);
        assert_eq!(app.current_screen(), ScreenName::Messages);
        assert_ne!(app.focus(), PanelId::Chat);

        app.after_render(now);
        assert_eq!(app.focus(), PanelId::Chat);
        assert_eq!(cursor_index(&mut app, PanelId::Chat), Some(0));
    }

    #[test]
    fn test_switch_resets_insert_mode() {
        let dir = TempDir::new().unwrap();
        let (mut app, now) = build_app(&dir, FakeBackend::new());
        let now = open_discover(&mut app, now);
        press(&mut app, KeyCode::Char('i'), now);
        assert_eq!(app.mode(), AppMode::Insert);

        assert!(app.switch_to("timeline", Default::default()));
        assert_eq!(app.mode(), AppMode::Normal);
    }

    #[test]
    fn test_unknown_screen_name_is_ignored() {
        let dir = TempDir::new().unwrap();
        let (mut app, _) = build_app(&dir, FakeBackend::new());
        assert!(!app.switch_to("nowhere", Default::default()));
        assert_eq!(app.current_screen(), ScreenName::Timeline);
    }
}

// =============================================================================
// Chord Timing
// =============================================================================

mod chord_tests {
    use super::*;

    #[test]
    fn test_gg_inside_window_goes_to_top() {
        let dir = TempDir::new().unwrap();
        let (mut app, now) = build_app(&dir, FakeBackend::new());
        type_text(&mut app, "jj", now);
        assert_eq!(cursor_index(&mut app, PanelId::TimelineFeed), Some(2));

        press(&mut app, KeyCode::Char('g'), now);
        press(&mut app, KeyCode::Char('g'), now + Duration::from_millis(100));
        assert_eq!(cursor_index(&mut app, PanelId::TimelineFeed), Some(0));
    }

    #[test]
    fn test_slow_gg_does_nothing() {
        let dir = TempDir::new().unwrap();
        let (mut app, now) = build_app(&dir, FakeBackend::new());
        type_text(&mut app, "jj", now);

        press(&mut app, KeyCode::Char('g'), now);
        press(&mut app, KeyCode::Char('g'), now + Duration::from_millis(600));
        assert_eq!(cursor_index(&mut app, PanelId::TimelineFeed), Some(2));
    }

    #[test]
    fn test_stale_g_opens_a_new_window() {
        let dir = TempDir::new().unwrap();
        let (mut app, now) = build_app(&dir, FakeBackend::new());
        type_text(&mut app, "jj", now);
        press(&mut app, KeyCode::Char('g'), now);
        press(&mut app, KeyCode::Char('g'), now + Duration::from_millis(600));
        press(&mut app, KeyCode::Char('g'), now + Duration::from_millis(700));
        assert_eq!(cursor_index(&mut app, PanelId::TimelineFeed), Some(0));
    }
}

// =============================================================================
// Pagination and Search
// =============================================================================

mod pagination_tests {
    use super::*;

    fn big_discover(dir: &TempDir) -> (App, Instant) {
        let (mut app, now) = build_app(dir, FakeBackend::new().with_generated_discover(60));
        let now = open_discover(&mut app, now);
        (app, now)
    }

    #[test]
    fn test_first_batch_only() {
        let dir = TempDir::new().unwrap();
        let (app, _) = big_discover(&dir);
        assert_eq!(discover_displayed(&app), 20);
    }

    #[test]
    fn test_cursor_near_edge_loads_next_batch() {
        let dir = TempDir::new().unwrap();
        let (mut app, now) = big_discover(&dir);
        for _ in 0..20 {
            press(&mut app, KeyCode::Char('j'), now);
        }
        assert_eq!(discover_displayed(&app), 40);
    }

    #[test]
    fn test_bottom_materializes_everything() {
        let dir = TempDir::new().unwrap();
        let (mut app, now) = big_discover(&dir);
        // Each jump to the bottom exposes one more batch
        for _ in 0..5 {
            press(&mut app, KeyCode::Char('G'), now);
        }
        let total = match app.view() {
            ScreenView::Discover(discover) => discover.feed().total(),
            _ => unreachable!(),
        };
        assert_eq!(discover_displayed(&app), total);
        assert_eq!(
            cursor_index(&mut app, PanelId::DiscoverFeed),
            Some(total)
        );
    }

    #[test]
    fn test_mouse_wheel_loads_near_bottom() {
        let dir = TempDir::new().unwrap();
        let (mut app, _) = big_discover(&dir);
        let before = cursor_index(&mut app, PanelId::DiscoverFeed);
        for _ in 0..10 {
            app.handle_mouse(MouseAction::ScrollDown(3));
        }
        assert!(discover_displayed(&app) > 20);
        // The wheel moves the viewport, not the cursor
        assert_eq!(cursor_index(&mut app, PanelId::DiscoverFeed), before);
    }

    #[test]
    fn test_search_is_a_destructive_reset() {
        let dir = TempDir::new().unwrap();
        let (mut app, now) = big_discover(&dir);
        press(&mut app, KeyCode::Char('G'), now);
        assert!(discover_displayed(&app) > 20);

        press(&mut app, KeyCode::Char('g'), now);
        press(&mut app, KeyCode::Char('g'), now);
        press(&mut app, KeyCode::Char('i'), now);
        type_text(&mut app, "number 1", now);
        press(&mut app, KeyCode::Enter, now);

        // g1 and g10..g19
        assert_eq!(discover_displayed(&app), 11);
        match app.view() {
            ScreenView::Discover(discover) => {
                assert_eq!(discover.feed().items().len(), 11);
                assert_eq!(discover.applied_query(), "number 1");
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_search_debounce_restarts_per_keystroke() {
        let dir = TempDir::new().unwrap();
        let (mut app, now) = big_discover(&dir);
        press(&mut app, KeyCode::Char('i'), now);
        type_text(&mut app, "number", now);
        let later = now + Duration::from_millis(200);
        type_text(&mut app, " 1", later);

        // 300ms after the first keys, but only 200ms after the last
        app.tick(now + Duration::from_millis(400));
        assert_eq!(discover_displayed(&app), 20);

        app.tick(later + Duration::from_millis(301));
        assert_eq!(discover_displayed(&app), 11);
        assert_eq!(cursor_index(&mut app, PanelId::DiscoverFeed), Some(0));
    }
}

// =============================================================================
// Drafts
// =============================================================================

mod draft_tests {
    use super::*;

    #[test]
    fn test_delete_command_targets_storage_index() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let store = DraftStore::new(&config.drafts_path, config.max_drafts);
        for content in ["one", "two", "three"] {
            store.save(content, Vec::new()).unwrap();
        }

        let (mut app, now) = build_app(&dir, FakeBackend::new());
        type_text(&mut app, ":x2", now);
        press(&mut app, KeyCode::Enter, now);
        assert_eq!(app.pending_draft_deletion(), Some(1));

        // Cancel is the default choice
        press(&mut app, KeyCode::Enter, now);
        assert_eq!(app.pending_draft_deletion(), None);
        assert_eq!(app.drafts().len(), 3);
    }

    #[test]
    fn test_missing_draft_reports_status() {
        let dir = TempDir::new().unwrap();
        let (mut app, now) = build_app(&dir, FakeBackend::new());
        type_text(&mut app, ":o4", now);
        press(&mut app, KeyCode::Enter, now);
        assert_eq!(app.state().message(), Some("Draft 4 not found"));
        assert!(app.overlay().is_none());
    }
}

// =============================================================================
// Backend Failures
// =============================================================================

mod backend_failure_tests {
    use super::*;
    use tuitter::backend::{
        Comment, Conversation, Message, Notification, Post, User, UserSettings,
    };
    use tuitter::error::{Result, TuitterError};

    /// Fixture store whose selected calls fail
    #[derive(Default)]
    struct FailingBackend {
        inner: FakeBackend,
        fail_feeds: bool,
        fail_toggles: bool,
    }

    fn unavailable() -> TuitterError {
        TuitterError::backend("service unavailable")
    }

    impl Backend for FailingBackend {
        fn current_user(&mut self) -> Result<User> {
            self.inner.current_user()
        }
        fn timeline(&mut self, limit: usize) -> Result<Vec<Post>> {
            if self.fail_feeds {
                return Err(unavailable());
            }
            self.inner.timeline(limit)
        }
        fn discover(&mut self, limit: usize) -> Result<Vec<Post>> {
            if self.fail_feeds {
                return Err(unavailable());
            }
            self.inner.discover(limit)
        }
        fn conversations(&mut self) -> Result<Vec<Conversation>> {
            self.inner.conversations()
        }
        fn messages(&mut self, conversation_id: &str) -> Result<Vec<Message>> {
            self.inner.messages(conversation_id)
        }
        fn send_message(&mut self, conversation_id: &str, content: &str) -> Result<Message> {
            self.inner.send_message(conversation_id, content)
        }
        fn notifications(&mut self, unread_only: bool) -> Result<Vec<Notification>> {
            self.inner.notifications(unread_only)
        }
        fn mark_notification_read(&mut self, notification_id: &str) -> Result<()> {
            self.inner.mark_notification_read(notification_id)
        }
        fn settings(&mut self) -> Result<UserSettings> {
            self.inner.settings()
        }
        fn update_settings(&mut self, settings: &UserSettings) -> Result<()> {
            self.inner.update_settings(settings)
        }
        fn create_post(&mut self, content: &str) -> Result<Post> {
            self.inner.create_post(content)
        }
        fn toggle_like(&mut self, post_id: &str) -> Result<()> {
            if self.fail_toggles {
                return Err(unavailable());
            }
            self.inner.toggle_like(post_id)
        }
        fn toggle_repost(&mut self, post_id: &str) -> Result<()> {
            if self.fail_toggles {
                return Err(unavailable());
            }
            self.inner.toggle_repost(post_id)
        }
        fn comments(&mut self, post_id: &str) -> Result<Vec<Comment>> {
            self.inner.comments(post_id)
        }
        fn add_comment(&mut self, post_id: &str, text: &str) -> Result<Comment> {
            self.inner.add_comment(post_id, text)
        }
        fn name(&self) -> &'static str {
            "failing"
        }
    }

    fn timeline_items(app: &App) -> Vec<Post> {
        match app.view() {
            ScreenView::Timeline(list) => list.items().to_vec(),
            _ => panic!("timeline is not mounted"),
        }
    }

    #[test]
    fn test_failed_mount_shows_empty_list_and_status() {
        let dir = TempDir::new().unwrap();
        let backend = FailingBackend {
            fail_feeds: true,
            ..FailingBackend::default()
        };
        let (mut app, _now) = build_app(&dir, backend);

        assert!(timeline_items(&app).is_empty());
        assert_eq!(cursor_index(&mut app, PanelId::TimelineFeed), None);
        let message = app.state().message().unwrap_or_default();
        assert!(message.starts_with("Failed to load timeline"), "{}", message);
    }

    #[test]
    fn test_failed_like_and_repost_leave_list_untouched() {
        let dir = TempDir::new().unwrap();
        let backend = FailingBackend {
            fail_toggles: true,
            ..FailingBackend::default()
        };
        let (mut app, now) = build_app(&dir, backend);
        let before = timeline_items(&app);
        assert!(!before.is_empty());

        type_text(&mut app, ":l", now);
        press(&mut app, KeyCode::Enter, now);
        assert_eq!(timeline_items(&app), before);
        assert!(app
            .state()
            .message()
            .is_some_and(|m| m.starts_with("Failed to like post")));

        type_text(&mut app, ":rt", now);
        press(&mut app, KeyCode::Enter, now);
        assert_eq!(timeline_items(&app), before);
        assert!(app
            .state()
            .message()
            .is_some_and(|m| m.starts_with("Failed to repost")));
    }
}
