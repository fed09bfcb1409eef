//! Insert-mode handlers
//!
//! Editing, submitting and leaving the focused text field.

use std::time::Instant;

use crossterm::event::KeyEvent;

use crate::app::{App, Overlay};
use crate::core::PanelId;
use crate::screens::ScreenView;

/// Deliver an editing key to the focused field
pub fn edit(app: &mut App, key: KeyEvent, now: Instant) {
    let changed = app
        .focused_panel()
        .and_then(|panel| panel.text_input())
        .is_some_and(|field| field.apply_key(key));
    if !changed || app.overlay.is_some() {
        return;
    }
    if let ScreenView::Discover(discover) = &mut app.view {
        if app.state.focus == PanelId::DiscoverFeed {
            discover.search_edited(now);
        }
    }
}

/// Esc: back to normal mode
pub fn cancel(app: &mut App) {
    app.state.mode.exit_insert();
    match app.overlay.as_mut() {
        Some(Overlay::NewPost(dialog)) => dialog.focus_buttons(),
        Some(_) => {}
        None => {
            if let ScreenView::Discover(discover) = &mut app.view {
                if app.state.focus == PanelId::DiscoverFeed && discover.on_search_box() {
                    discover.leave_search_box();
                }
            }
        }
    }
}

/// Enter on a single-line field
pub fn submit(app: &mut App) {
    if matches!(app.overlay, Some(Overlay::Comments(_))) {
        post_comment(app);
        return;
    }
    match app.state.focus {
        PanelId::DiscoverFeed => {
            if let ScreenView::Discover(discover) = &mut app.view {
                discover.submit_search();
                tracing::debug!(query = discover.applied_query(), "search submitted");
            }
            app.state.mode.exit_insert();
        }
        PanelId::Chat => send_message(app),
        _ => {
            app.state.mode.exit_insert();
        }
    }
}

/// Send the chat input; stays in insert mode for the next message
fn send_message(app: &mut App) {
    let ScreenView::Messages(view) = &mut app.view else {
        return;
    };
    let Some((conversation_id, text)) = view.chat.take_draft() else {
        return;
    };
    match app.backend.send_message(&conversation_id, &text) {
        Ok(message) => {
            view.chat.append(message);
            view.conversation_updated(&conversation_id, Some(&text));
            tracing::debug!(conversation = %conversation_id, "message sent");
        }
        Err(e) => {
            tracing::warn!(conversation = %conversation_id, error = %e, "send failed");
            app.state.set_message(format!("Failed to send message: {}", e));
        }
    }
}

fn post_comment(app: &mut App) {
    let Some(Overlay::Comments(panel)) = app.overlay.as_mut() else {
        return;
    };
    let Some(text) = panel.take_draft() else {
        app.state.mode.exit_insert();
        return;
    };
    let post_id = panel.post().id.clone();
    if let Err(e) = app.backend.add_comment(&post_id, &text) {
        tracing::warn!(post = %post_id, error = %e, "comment failed");
        app.state.set_message(format!("Failed to post comment: {}", e));
        return;
    }

    match app.backend.comments(&post_id) {
        Ok(comments) => panel.refresh(comments),
        Err(e) => {
            tracing::warn!(post = %post_id, error = %e, "cannot reload comments");
            panel.post_mut().comments += 1;
        }
    }
    app.view.update_post(&post_id, |post| post.comments += 1);
    app.state.mode.exit_insert();
    app.state.set_message("Comment posted");
}
