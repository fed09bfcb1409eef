//! Tests for action handlers

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tempfile::TempDir;

use crate::app::{App, Config, Overlay};
use crate::backend::FakeBackend;
use crate::core::{AppMode, PanelId, ScreenName};
use crate::panel::{DialogFocus, NewPostButton};
use crate::screens::ScreenView;

use super::ActionResult;

fn create_test_app(dir: &TempDir) -> (App, Instant) {
    let config = Config {
        drafts_path: dir.path().join("drafts.json"),
        ..Config::default()
    };
    let mut app = App::new(Box::new(FakeBackend::new()), &config);
    app.set_content_rows(40);
    let now = settle(&mut app, Instant::now());
    (app, now)
}

/// Land the pending focus request and release the switch guard
fn settle(app: &mut App, now: Instant) -> Instant {
    app.after_render(now);
    let later = now + Duration::from_secs(1);
    app.tick(later);
    later
}

fn code(app: &mut App, code: KeyCode, now: Instant) -> ActionResult {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), now)
}

fn chars(app: &mut App, text: &str, now: Instant) {
    for c in text.chars() {
        code(app, KeyCode::Char(c), now);
    }
}

/// Open the command line, type `text` and press Enter
fn command(app: &mut App, text: &str, now: Instant) -> ActionResult {
    chars(app, text, now);
    code(app, KeyCode::Enter, now)
}

fn timeline_index(app: &mut App) -> Option<usize> {
    app.cursor_of(PanelId::TimelineFeed)
        .and_then(|cursor| cursor.index())
}

#[test]
fn test_command_mode_swallows_navigation_keys() {
    let dir = TempDir::new().unwrap();
    let (mut app, now) = create_test_app(&dir);
    code(&mut app, KeyCode::Char('j'), now);
    assert_eq!(timeline_index(&mut app), Some(1));

    code(&mut app, KeyCode::Char(':'), now);
    assert_eq!(app.mode(), AppMode::Command);
    chars(&mut app, "jjGk", now);
    code(&mut app, KeyCode::Down, now);
    assert_eq!(timeline_index(&mut app), Some(1));
    assert_eq!(app.state().mode.buffer().as_str(), ":jjGk");

    code(&mut app, KeyCode::Esc, now);
    assert_eq!(app.mode(), AppMode::Normal);
    assert!(app.state().mode.buffer().is_empty());
}

#[test]
fn test_backspace_keeps_seed_and_command_mode() {
    let dir = TempDir::new().unwrap();
    let (mut app, now) = create_test_app(&dir);
    chars(&mut app, ":x", now);
    code(&mut app, KeyCode::Backspace, now);
    code(&mut app, KeyCode::Backspace, now);
    assert_eq!(app.mode(), AppMode::Command);
    assert_eq!(app.state().mode.buffer().as_str(), ":");

    // Still captured by the command line, not the timeline
    code(&mut app, KeyCode::Char('j'), now);
    assert_eq!(timeline_index(&mut app), Some(0));
    assert_eq!(app.state().mode.buffer().as_str(), ":j");
}

#[test]
fn test_drafts_shortcut_in_lowercase() {
    let dir = TempDir::new().unwrap();
    let (mut app, now) = create_test_app(&dir);
    command(&mut app, ":d", now);
    assert_eq!(app.current_screen(), ScreenName::Drafts);
}

#[test]
fn test_unmatched_command_is_ignored() {
    let dir = TempDir::new().unwrap();
    let (mut app, now) = create_test_app(&dir);
    assert_eq!(command(&mut app, ":frobnicate", now), ActionResult::Continue);
    assert_eq!(app.mode(), AppMode::Normal);
    assert_eq!(app.current_screen(), ScreenName::Timeline);
}

#[test]
fn test_quit_key_and_command() {
    let dir = TempDir::new().unwrap();
    let (mut app, now) = create_test_app(&dir);
    assert_eq!(command(&mut app, ":q", now), ActionResult::Quit(0));
    assert!(app.should_quit());

    let (mut app, now) = create_test_app(&dir);
    assert_eq!(code(&mut app, KeyCode::Char('q'), now), ActionResult::Quit(0));
}

#[test]
fn test_switch_updates_chrome() {
    let dir = TempDir::new().unwrap();
    let (mut app, now) = create_test_app(&dir);
    command(&mut app, ":2", now);
    assert_eq!(app.state().chrome.header, "tuitter [discover] @yourname");
    assert!(app.state().chrome.footer.contains("[/] Search"));
}

#[test]
fn test_typing_on_search_box_filters_after_debounce() {
    let dir = TempDir::new().unwrap();
    let (mut app, now) = create_test_app(&dir);
    code(&mut app, KeyCode::Char('2'), now);
    let now = settle(&mut app, now);

    // 'r' has no binding, so it starts insert mode on the search box
    code(&mut app, KeyCode::Char('r'), now);
    assert_eq!(app.mode(), AppMode::Insert);
    chars(&mut app, "ust", now);
    let ScreenView::Discover(discover) = app.view() else {
        panic!("expected discover");
    };
    assert_eq!(discover.search().text(), "rust");
    assert_eq!(discover.applied_query(), "");

    let fired = app.next_deadline().unwrap();
    app.tick(fired);
    let ScreenView::Discover(discover) = app.view() else {
        panic!("expected discover");
    };
    assert_eq!(discover.applied_query(), "rust");
    assert!(discover.feed().items().iter().all(|p| p.matches("rust")));
    assert!(discover.on_search_box());
}

#[test]
fn test_enter_in_search_applies_and_moves_to_first_post() {
    let dir = TempDir::new().unwrap();
    let (mut app, now) = create_test_app(&dir);
    code(&mut app, KeyCode::Char('2'), now);
    let now = settle(&mut app, now);

    code(&mut app, KeyCode::Char('i'), now);
    chars(&mut app, "vim", now);
    code(&mut app, KeyCode::Enter, now);
    assert_eq!(app.mode(), AppMode::Normal);
    assert_eq!(app.cursor_of(PanelId::DiscoverFeed).unwrap().index(), Some(1));
    let ScreenView::Discover(discover) = app.view() else {
        panic!("expected discover");
    };
    assert_eq!(discover.applied_query(), "vim");
    assert_eq!(discover.deadline(), None);
}

#[test]
fn test_comments_overlay_open_and_close() {
    let dir = TempDir::new().unwrap();
    let (mut app, now) = create_test_app(&dir);
    code(&mut app, KeyCode::Enter, now);
    assert!(matches!(app.overlay(), Some(Overlay::Comments(_))));
    assert_eq!(app.focus(), PanelId::Comments);

    code(&mut app, KeyCode::Char('q'), now);
    assert!(app.overlay().is_none());
    assert_eq!(app.focus(), PanelId::TimelineFeed);
    assert!(!app.should_quit());
}

#[test]
fn test_posting_a_comment() {
    let dir = TempDir::new().unwrap();
    let (mut app, now) = create_test_app(&dir);
    command(&mut app, ":c", now);
    let before = match app.overlay() {
        Some(Overlay::Comments(panel)) => panel.post().comments,
        _ => panic!("expected comments"),
    };

    code(&mut app, KeyCode::Char('i'), now);
    assert_eq!(app.mode(), AppMode::Insert);
    chars(&mut app, "nice", now);
    code(&mut app, KeyCode::Enter, now);

    assert_eq!(app.mode(), AppMode::Normal);
    let Some(Overlay::Comments(panel)) = app.overlay() else {
        panic!("expected comments");
    };
    assert_eq!(panel.post().comments, before + 1);
    assert!(panel.comments().items().iter().any(|c| c.text == "nice"));
    assert_eq!(app.state().message(), Some("Comment posted"));
}

#[test]
fn test_like_updates_post_in_place() {
    let dir = TempDir::new().unwrap();
    let (mut app, now) = create_test_app(&dir);
    code(&mut app, KeyCode::Char('j'), now);
    let ScreenView::Timeline(feed) = app.view() else {
        panic!("expected timeline");
    };
    let likes = feed.items()[1].likes;
    assert!(!feed.items()[1].liked_by_user);

    command(&mut app, ":l", now);
    let ScreenView::Timeline(feed) = app.view() else {
        panic!("expected timeline");
    };
    assert!(feed.items()[1].liked_by_user);
    assert_eq!(feed.items()[1].likes, likes + 1);
    assert_eq!(app.state().message(), Some("Post liked!"));
    assert_eq!(timeline_index(&mut app), Some(1));
}

#[test]
fn test_repost_prepends_and_remounts_timeline() {
    let dir = TempDir::new().unwrap();
    let (mut app, now) = create_test_app(&dir);
    code(&mut app, KeyCode::Char('j'), now);
    let mounts = app.mount_count();
    command(&mut app, ":rt", now);

    assert_eq!(app.mount_count(), mounts + 1);
    let ScreenView::Timeline(feed) = app.view() else {
        panic!("expected timeline");
    };
    let first = &feed.items()[0];
    assert_eq!(first.reposted_by.as_deref(), Some("yourname"));
    assert!(first.reposted_by_user);
}

#[test]
fn test_empty_post_is_rejected() {
    let dir = TempDir::new().unwrap();
    let (mut app, now) = create_test_app(&dir);
    command(&mut app, ":n", now);
    assert_eq!(app.mode(), AppMode::Insert);
    code(&mut app, KeyCode::Esc, now);
    code(&mut app, KeyCode::Enter, now);
    assert_eq!(app.state().message(), Some("Post cannot be empty"));
    assert!(matches!(app.overlay(), Some(Overlay::NewPost(_))));
}

#[test]
fn test_publish_new_post() {
    let dir = TempDir::new().unwrap();
    let (mut app, now) = create_test_app(&dir);
    command(&mut app, ":n", now);
    chars(&mut app, "hello tuitter", now);
    code(&mut app, KeyCode::Esc, now);
    let Some(Overlay::NewPost(dialog)) = app.overlay() else {
        panic!("expected dialog");
    };
    assert_eq!(dialog.focus(), DialogFocus::Button(NewPostButton::Post));

    code(&mut app, KeyCode::Enter, now);
    assert!(app.overlay().is_none());
    let ScreenView::Timeline(feed) = app.view() else {
        panic!("expected timeline");
    };
    assert_eq!(feed.items()[0].content, "hello tuitter");
}

#[test]
fn test_save_draft_from_dialog() {
    let dir = TempDir::new().unwrap();
    let (mut app, now) = create_test_app(&dir);
    command(&mut app, ":n", now);
    chars(&mut app, "for later", now);
    code(&mut app, KeyCode::Esc, now);
    code(&mut app, KeyCode::Char('l'), now);
    code(&mut app, KeyCode::Enter, now);

    assert!(app.overlay().is_none());
    assert_eq!(app.drafts().len(), 1);
    assert_eq!(app.drafts().get(0).unwrap().content, "for later");
}

#[test]
fn test_delete_draft_command_confirms_first() {
    let dir = TempDir::new().unwrap();
    let (mut app, now) = create_test_app(&dir);
    for text in ["one", "two", "three"] {
        app.drafts().save(text, Vec::new()).unwrap();
    }

    command(&mut app, ":x2", now);
    assert_eq!(app.pending_draft_deletion(), Some(1));
    assert_eq!(app.drafts().len(), 3);

    // Cancel is preselected
    code(&mut app, KeyCode::Enter, now);
    assert_eq!(app.drafts().len(), 3);

    command(&mut app, ":x2", now);
    code(&mut app, KeyCode::Char('h'), now);
    code(&mut app, KeyCode::Enter, now);
    assert_eq!(app.pending_draft_deletion(), None);
    let left: Vec<String> = (0..2).filter_map(|i| app.drafts().get(i)).map(|d| d.content).collect();
    assert_eq!(left, vec!["one", "three"]);
}

#[test]
fn test_missing_draft_reports() {
    let dir = TempDir::new().unwrap();
    let (mut app, now) = create_test_app(&dir);
    command(&mut app, ":o4", now);
    assert!(app.overlay().is_none());
    assert_eq!(app.state().message(), Some("Draft 4 not found"));
}

#[test]
fn test_open_draft_prefills_and_publish_removes_it() {
    let dir = TempDir::new().unwrap();
    let (mut app, now) = create_test_app(&dir);
    app.drafts().save("draft body", Vec::new()).unwrap();

    command(&mut app, ":o1", now);
    let Some(Overlay::NewPost(dialog)) = app.overlay() else {
        panic!("expected dialog");
    };
    assert_eq!(dialog.content(), "draft body");
    assert_eq!(dialog.draft_index(), Some(0));

    code(&mut app, KeyCode::Esc, now);
    code(&mut app, KeyCode::Enter, now);
    assert!(app.drafts().is_empty());
}

#[test]
fn test_settings_toggle_persists() {
    let dir = TempDir::new().unwrap();
    let (mut app, now) = create_test_app(&dir);
    code(&mut app, KeyCode::Char('5'), now);
    let now = settle(&mut app, now);
    let ScreenView::Settings(panel) = app.view() else {
        panic!("expected settings");
    };
    let before = panel.settings().email_notifications;

    code(&mut app, KeyCode::Enter, now);
    let ScreenView::Settings(panel) = app.view() else {
        panic!("expected settings");
    };
    assert_eq!(panel.settings().email_notifications, !before);
    assert_eq!(app.state().message(), Some("Settings saved"));
}

#[test]
fn test_open_conversation_focuses_chat() {
    let dir = TempDir::new().unwrap();
    let (mut app, now) = create_test_app(&dir);
    code(&mut app, KeyCode::Char('4'), now);
    let now = settle(&mut app, now);
    assert_eq!(app.focus(), PanelId::Chat);

    code(&mut app, KeyCode::Char('6'), now);
    assert_eq!(app.focus(), PanelId::Conversations);
    code(&mut app, KeyCode::Char('j'), now);
    code(&mut app, KeyCode::Enter, now);
    assert_eq!(app.focus(), PanelId::Chat);
    let ScreenView::Messages(view) = app.view() else {
        panic!("expected messages");
    };
    assert_eq!(view.chat.partner(), Some("charlie"));
    assert!(view.conversations.items().iter().all(|c| c.username != "charlie" || !c.unread));
}

#[test]
fn test_send_message_stays_in_insert() {
    let dir = TempDir::new().unwrap();
    let (mut app, now) = create_test_app(&dir);
    code(&mut app, KeyCode::Char('4'), now);
    let now = settle(&mut app, now);

    command(&mut app, ":n", now);
    assert_eq!(app.mode(), AppMode::Insert);
    chars(&mut app, "hey", now);
    code(&mut app, KeyCode::Enter, now);
    assert_eq!(app.mode(), AppMode::Insert);
    let ScreenView::Messages(view) = app.view() else {
        panic!("expected messages");
    };
    let last = view.chat.messages().items().last().unwrap();
    assert_eq!(last.content, "hey");
    assert!(view.chat.input().text().is_empty());
}

#[test]
fn test_view_author_opens_user_profile() {
    let dir = TempDir::new().unwrap();
    let (mut app, now) = create_test_app(&dir);
    // First timeline post is our own
    command(&mut app, ":u", now);
    assert_eq!(app.current_screen(), ScreenName::Profile);

    let now = settle(&mut app, now);
    code(&mut app, KeyCode::Char('1'), now);
    let now = settle(&mut app, now);
    code(&mut app, KeyCode::Char('j'), now);
    command(&mut app, ":u", now);
    assert_eq!(app.current_screen(), ScreenName::UserProfile);
    assert!(app.state().chrome.header.starts_with("tuitter [@"));
}

#[test]
fn test_mouse_wheel_scrolls_without_moving_cursor() {
    let dir = TempDir::new().unwrap();
    let (mut app, _) = create_test_app(&dir);
    app.set_content_rows(8);
    app.handle_mouse(crate::handler::MouseAction::ScrollDown(3));
    let cursor = app.cursor_of(PanelId::TimelineFeed).unwrap();
    assert_eq!(cursor.index(), Some(0));
}
