//! Action execution handler
//!
//! This module applies routed keys and parsed commands to the [`App`],
//! translating them into panel updates, backend calls and screen switches.
//! Every failure ends in a status message or a no-op; nothing here panics
//! or returns an error to the event loop.

pub mod command;
mod input;
mod navigation;
mod overlay;

pub use command::execute_command;

use std::time::Instant;

use crossterm::event::KeyEvent;

use crate::app::{exit_code, App};
use crate::core::{Navigable, PanelId, ScreenParams};
use crate::handler::command::parse_command;
use crate::handler::key::{
    handle_command_key, handle_insert_key, handle_normal_key, printable, CommandKey, InsertKey,
    KeyAction,
};
use crate::panel::DraftAction;
use crate::screens::ScreenView;

/// Result of action execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    /// Continue the event loop
    Continue,
    /// Quit with the given exit code
    Quit(i32),
}

pub(crate) fn quit(app: &mut App) -> ActionResult {
    app.state.should_quit = true;
    ActionResult::Quit(exit_code::SUCCESS)
}

/// Command mode: every key lands in the command line, never in a panel
pub fn handle_command_mode(app: &mut App, key: KeyEvent, _now: Instant) -> ActionResult {
    match handle_command_key(key) {
        CommandKey::Push(c) => app.state.mode.push_char(c),
        CommandKey::Backspace => app.state.mode.backspace(),
        CommandKey::Cancel => app.state.mode.cancel(),
        CommandKey::Commit => {
            if let Some(text) = app.state.mode.commit() {
                match parse_command(&text) {
                    Some(cmd) => return execute_command(app, cmd),
                    None => tracing::debug!(input = %text, "unmatched command ignored"),
                }
            }
        }
        CommandKey::Ignore => {}
    }
    ActionResult::Continue
}

/// Insert mode: keys edit the focused text field
pub fn handle_insert_mode(app: &mut App, key: KeyEvent, now: Instant) -> ActionResult {
    let multiline = app
        .focused_panel()
        .and_then(|panel| panel.text_input())
        .map(|field| field.is_multiline());
    let Some(multiline) = multiline else {
        // Focus moved away from the field
        app.state.mode.exit_insert();
        return ActionResult::Continue;
    };
    match handle_insert_key(key, multiline) {
        InsertKey::Cancel => input::cancel(app),
        InsertKey::Submit => input::submit(app),
        InsertKey::Edit => input::edit(app, key, now),
    }
    ActionResult::Continue
}

/// Normal mode: resolve the key through the keymap and apply it
pub fn handle_normal_mode(app: &mut App, key: KeyEvent, now: Instant) -> ActionResult {
    let action = handle_normal_key(&app.registry, key);

    // Unbound printable keys on the search box start typing there
    if action == KeyAction::None && printable(&key).is_some() && on_search_box(app) {
        if app.state.mode.enter_insert() {
            input::edit(app, key, now);
        }
        return ActionResult::Continue;
    }

    if app.overlay.is_some() {
        return overlay::handle(app, action, now);
    }
    handle_action(app, action, now)
}

/// Apply a normal-mode action to the mounted screen
pub fn handle_action(app: &mut App, action: KeyAction, now: Instant) -> ActionResult {
    match action {
        KeyAction::None => {}
        KeyAction::Quit => return quit(app),
        KeyAction::Nav(verb) => navigation::apply(app, verb),
        KeyAction::ChordTop => navigation::chord_top(app, now),
        KeyAction::Left => select_draft_action(app, DraftAction::Open),
        KeyAction::Right => select_draft_action(app, DraftAction::Delete),
        KeyAction::EnterInsert => enter_insert(app),
        KeyAction::StartCommand(seed) => {
            app.state.mode.enter_command(seed);
        }
        KeyAction::Show(name) => {
            app.switch_to(name.as_str(), ScreenParams::default());
        }
        KeyAction::FocusMain => {
            let primary = app.current_screen().primary_panel();
            app.focus_panel(primary);
        }
        KeyAction::FocusConversations => {
            app.focus_panel(PanelId::Conversations);
        }
        KeyAction::Activate => activate(app),
        KeyAction::Back => {
            if on_search_box(app) {
                if let ScreenView::Discover(discover) = &mut app.view {
                    discover.leave_search_box();
                }
            }
        }
    }
    ActionResult::Continue
}

fn on_search_box(app: &App) -> bool {
    app.overlay.is_none()
        && app.state.focus == PanelId::DiscoverFeed
        && matches!(&app.view, ScreenView::Discover(discover) if discover.on_search_box())
}

fn select_draft_action(app: &mut App, action: DraftAction) {
    if app.state.focus != PanelId::Drafts {
        return;
    }
    if let ScreenView::Drafts(drafts) = &mut app.view {
        drafts.select_action(action);
    }
}

/// `i`: start typing in the focused panel's field, if it has one
fn enter_insert(app: &mut App) {
    let has_field = app
        .focused_panel()
        .is_some_and(|panel| panel.text_input().is_some());
    if !has_field {
        return;
    }
    if let ScreenView::Discover(discover) = &mut app.view {
        if app.state.focus == PanelId::DiscoverFeed {
            discover.feed_mut().move_to_top();
        }
    }
    app.state.mode.enter_insert();
}

fn activate(app: &mut App) {
    match app.state.focus {
        PanelId::DiscoverFeed if on_search_box(app) => {
            app.state.mode.enter_insert();
        }
        PanelId::TimelineFeed | PanelId::DiscoverFeed | PanelId::Profile | PanelId::UserProfile => {
            command::open_comments(app);
        }
        PanelId::Notifications => mark_notification_read(app),
        PanelId::Conversations => open_conversation(app),
        PanelId::Chat => {
            app.state.mode.enter_insert();
        }
        PanelId::Settings => toggle_setting(app),
        PanelId::Drafts => {
            let selection = match &app.view {
                ScreenView::Drafts(drafts) => drafts.activate(),
                _ => None,
            };
            match selection {
                Some((DraftAction::Open, index)) => command::open_draft(app, index),
                Some((DraftAction::Delete, index)) => command::confirm_draft_deletion(app, index),
                None => {}
            }
        }
        _ => {}
    }
}

fn mark_notification_read(app: &mut App) {
    let ScreenView::Notifications(list) = &mut app.view else {
        return;
    };
    let Some(id) = list.selected().filter(|n| !n.read).map(|n| n.id.clone()) else {
        return;
    };
    match app.backend.mark_notification_read(&id) {
        Ok(()) => {
            list.update_where(|n| n.id == id, |n| n.read = true);
        }
        Err(e) => {
            tracing::warn!(notification = %id, error = %e, "mark read failed");
            app.state.set_message(format!("Failed to mark notification read: {}", e));
        }
    }
}

fn open_conversation(app: &mut App) {
    let ScreenView::Messages(view) = &mut app.view else {
        return;
    };
    let Some(conversation) = view.selected_conversation().cloned() else {
        return;
    };
    match app.backend.messages(&conversation.id) {
        Ok(messages) => {
            view.chat
                .open(&conversation.id, &conversation.username, messages);
            view.conversation_updated(&conversation.id, None);
            app.state.focus = PanelId::Chat;
            tracing::debug!(conversation = %conversation.id, "conversation opened");
        }
        Err(e) => {
            tracing::warn!(conversation = %conversation.id, error = %e, "cannot load messages");
            app.state.set_message(format!("Failed to load messages: {}", e));
        }
    }
}

fn toggle_setting(app: &mut App) {
    let ScreenView::Settings(panel) = &mut app.view else {
        return;
    };
    let previous = panel.settings().clone();
    let Some(updated) = panel.toggle_selected().cloned() else {
        return;
    };
    match app.backend.update_settings(&updated) {
        Ok(()) => app.state.set_message("Settings saved"),
        Err(e) => {
            tracing::warn!(error = %e, "settings update refused");
            panel.revert(previous);
            app.state.set_message(format!("Failed to save settings: {}", e));
        }
    }
}

#[cfg(test)]
mod tests;
