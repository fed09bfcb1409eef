//! Command-line execution
//!
//! Runs a parsed [`Command`] against the app. Commands that need a target
//! (like, repost, comments, author) act on the post under the cursor and
//! do nothing when there is none.

use crate::app::{App, Overlay};
use crate::backend::Post;
use crate::core::{PanelId, ScreenName, ScreenParams};
use crate::handler::command::Command;
use crate::panel::{
    CommentsPanel, DeleteChoice, DeleteDraftDialog, DraftsPanel, NewPostButton, NewPostDialog,
};
use crate::screens::ScreenView;

use super::{quit, ActionResult};

/// Execute a parsed command
pub fn execute_command(app: &mut App, command: Command) -> ActionResult {
    tracing::debug!(?command, "executing command");
    match command {
        Command::Screen(name) => switch(app, name, ScreenParams::default()),
        Command::Quit => return quit(app),
        Command::Profile => switch(app, ScreenName::Profile, ScreenParams::default()),
        Command::Drafts => switch(app, ScreenName::Drafts, ScreenParams::default()),
        Command::New => new_item(app),
        Command::Like => like(app),
        Command::Repost => repost(app),
        Command::Comments => open_comments(app),
        Command::ViewAuthor => view_author(app),
        Command::Message => message_author(app),
        Command::OpenDraft(index) => open_draft(app, index),
        Command::DeleteDraft(index) => confirm_draft_deletion(app, index),
    }
    ActionResult::Continue
}

fn switch(app: &mut App, name: ScreenName, params: ScreenParams) {
    app.switch_to(name.as_str(), params);
}

/// Post under the cursor, or the post whose comments are open
fn focused_post(app: &App) -> Option<Post> {
    match &app.overlay {
        Some(Overlay::Comments(panel)) => Some(panel.post().clone()),
        Some(_) => None,
        None => app.view.focused_post(app.state.focus).cloned(),
    }
}

/// `:n` - message input on the messages screen, compose dialog elsewhere
fn new_item(app: &mut App) {
    if app.current_screen() == ScreenName::Messages {
        app.close_overlay();
        if app.focus_panel(PanelId::Chat) {
            app.state.mode.enter_insert();
        }
        return;
    }
    open_compose(app, NewPostDialog::new());
}

fn open_compose(app: &mut App, dialog: NewPostDialog) {
    app.close_overlay();
    app.open_overlay(Overlay::NewPost(dialog));
    app.state.mode.enter_insert();
}

/// Apply `update` to every visible copy of the post
fn update_everywhere(app: &mut App, post_id: &str, update: fn(&mut Post)) {
    app.view.update_post(post_id, update);
    if let Some(Overlay::Comments(panel)) = app.overlay.as_mut() {
        if panel.post().id == post_id {
            update(panel.post_mut());
        }
    }
}

fn like(app: &mut App) {
    let Some(post) = focused_post(app) else {
        return;
    };
    match app.backend.toggle_like(&post.id) {
        Ok(()) => {
            update_everywhere(app, &post.id, Post::toggle_like);
            let msg = if post.liked_by_user {
                "Like removed"
            } else {
                "Post liked!"
            };
            app.state.set_message(msg);
        }
        Err(e) => {
            tracing::warn!(post = %post.id, error = %e, "like failed");
            app.state.set_message(format!("Failed to like post: {}", e));
        }
    }
}

fn repost(app: &mut App) {
    let Some(post) = focused_post(app) else {
        return;
    };
    if let Err(e) = app.backend.toggle_repost(&post.id) {
        tracing::warn!(post = %post.id, error = %e, "repost failed");
        app.state.set_message(format!("Failed to repost: {}", e));
        return;
    }
    update_everywhere(app, &post.id, Post::toggle_repost);
    app.reposts.retain(|p| p.id != post.id);
    if post.reposted_by_user {
        app.state.set_message("Repost removed");
    } else {
        let mut entry = post;
        entry.toggle_repost();
        entry.reposted_by = Some(app.me.username.clone());
        app.reposts.insert(0, entry);
        app.state.set_message("Reposted!");
    }
    if app.current_screen() == ScreenName::Timeline && app.overlay.is_none() {
        switch(app, ScreenName::Timeline, ScreenParams::reload());
    }
}

/// `:c` or Enter on a post
pub fn open_comments(app: &mut App) {
    if app.overlay.is_some() {
        return;
    }
    let Some(post) = app.view.focused_post(app.state.focus).cloned() else {
        return;
    };
    let comments = match app.backend.comments(&post.id) {
        Ok(comments) => comments,
        Err(e) => {
            tracing::warn!(post = %post.id, error = %e, "cannot load comments");
            app.state.set_message(format!("Failed to load comments: {}", e));
            Vec::new()
        }
    };
    let panel = CommentsPanel::new(post, comments, &app.tuning);
    app.open_overlay(Overlay::Comments(panel));
}

/// `:u` - the focused post's author
fn view_author(app: &mut App) {
    let Some(post) = focused_post(app) else {
        return;
    };
    app.close_overlay();
    if post.author == app.me.username {
        switch(app, ScreenName::Profile, ScreenParams::default());
    } else {
        switch(app, ScreenName::UserProfile, ScreenParams::user(post.author));
    }
}

/// `:m` - DM the focused post's author or the viewed user
fn message_author(app: &mut App) {
    let target = match (&app.view, focused_post(app)) {
        (_, Some(post)) => Some(post.author),
        (ScreenView::UserProfile(profile), None) => Some(profile.user().username.clone()),
        _ => None,
    };
    let Some(username) = target else {
        return;
    };
    if username == app.me.username {
        app.state.set_message("Cannot message yourself");
        return;
    }
    app.close_overlay();
    switch(app, ScreenName::Messages, ScreenParams::user(username));
}

/// `:o<N>` or Open on the drafts screen
pub fn open_draft(app: &mut App, index: usize) {
    match app.drafts.get(index) {
        Some(draft) => open_compose(app, NewPostDialog::from_draft(index, &draft.content)),
        None => app
            .state
            .set_message(format!("Draft {} not found", index + 1)),
    }
}

/// `:x<N>` or Delete on the drafts screen: ask first
pub fn confirm_draft_deletion(app: &mut App, index: usize) {
    match app.drafts.get(index) {
        Some(draft) => {
            app.close_overlay();
            app.open_overlay(Overlay::DeleteDraft(DeleteDraftDialog::new(
                index,
                &draft.content,
            )));
        }
        None => app
            .state
            .set_message(format!("Draft {} not found", index + 1)),
    }
}

/// Enter in the delete dialog
pub fn finish_draft_deletion(app: &mut App) {
    let Some(Overlay::DeleteDraft(dialog)) = app.overlay.as_ref() else {
        return;
    };
    let (choice, index) = (dialog.choice(), dialog.index());
    app.close_overlay();
    if choice != DeleteChoice::Yes {
        return;
    }
    match app.drafts.delete(index) {
        Ok(_) => {
            app.state.set_message("Draft deleted");
            refresh_drafts(app);
        }
        Err(e) => {
            tracing::warn!(index, error = %e, "draft delete failed");
            app.state.set_message(format!("Failed to delete draft: {}", e));
        }
    }
}

/// Enter on a compose dialog button
pub fn press_new_post_button(app: &mut App, button: NewPostButton) {
    let Some(Overlay::NewPost(dialog)) = app.overlay.as_ref() else {
        return;
    };
    let content = dialog.content().to_string();
    let draft_index = dialog.draft_index();
    match button {
        NewPostButton::Post => publish(app, &content, draft_index),
        NewPostButton::Save => save_draft(app, &content, draft_index),
        NewPostButton::Cancel => app.close_overlay(),
    }
}

fn publish(app: &mut App, content: &str, draft_index: Option<usize>) {
    if content.is_empty() {
        app.state.set_message("Post cannot be empty");
        return;
    }
    match app.backend.create_post(content) {
        Ok(post) => {
            tracing::info!(post = %post.id, "post published");
            if let Some(index) = draft_index {
                if let Err(e) = app.drafts.delete(index) {
                    tracing::warn!(index, error = %e, "published draft not removed");
                }
            }
            app.close_overlay();
            app.state.set_message("Posted!");
            if app.current_screen() == ScreenName::Drafts {
                refresh_drafts(app);
            } else {
                switch(app, ScreenName::Timeline, ScreenParams::reload());
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "publish failed");
            app.state.set_message(format!("Failed to post: {}", e));
        }
    }
}

/// Store the dialog text; an opened draft is replaced by its new version
fn save_draft(app: &mut App, content: &str, draft_index: Option<usize>) {
    if content.is_empty() {
        app.state.set_message("Nothing to save");
        return;
    }
    if let Some(index) = draft_index {
        if let Err(e) = app.drafts.delete(index) {
            tracing::warn!(index, error = %e, "old draft not removed");
        }
    }
    match app.drafts.save(content, Vec::new()) {
        Ok(()) => {
            app.close_overlay();
            app.state.set_message("Draft saved");
            refresh_drafts(app);
        }
        Err(e) => {
            tracing::warn!(error = %e, "draft save failed");
            app.state.set_message(format!("Failed to save draft: {}", e));
        }
    }
}

/// Rebuild the drafts list in place if it is on screen
fn refresh_drafts(app: &mut App) {
    let ScreenView::Drafts(old) = &app.view else {
        return;
    };
    let action = old.action();
    let mut panel = DraftsPanel::new(app.drafts.load(), &app.tuning);
    panel.select_action(action);
    app.replace_view(ScreenView::Drafts(panel));
}
