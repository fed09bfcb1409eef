//! Normal-mode keys while a modal layer is open

use std::time::Instant;

use crate::app::{App, Overlay};
use crate::core::{ScreenParams, Verb};
use crate::handler::key::KeyAction;
use crate::panel::{CommentSlot, DeleteChoice, DialogFocus};

use super::{command, navigation, ActionResult};

pub fn handle(app: &mut App, action: KeyAction, now: Instant) -> ActionResult {
    // Shared by every overlay
    match action {
        KeyAction::Quit | KeyAction::Back => {
            app.close_overlay();
            return ActionResult::Continue;
        }
        KeyAction::Show(name) => {
            app.close_overlay();
            app.switch_to(name.as_str(), ScreenParams::default());
            return ActionResult::Continue;
        }
        KeyAction::StartCommand(seed) => {
            app.state.mode.enter_command(seed);
            return ActionResult::Continue;
        }
        _ => {}
    }

    match app.overlay.as_mut() {
        Some(Overlay::Comments(panel)) => match action {
            KeyAction::Nav(verb) => navigation::apply(app, verb),
            KeyAction::ChordTop => navigation::chord_top(app, now),
            KeyAction::EnterInsert => {
                panel.focus_input();
                app.state.mode.enter_insert();
            }
            KeyAction::Activate if panel.slot() == Some(CommentSlot::Input) => {
                app.state.mode.enter_insert();
            }
            _ => {}
        },
        Some(Overlay::NewPost(dialog)) => match action {
            KeyAction::Left | KeyAction::Nav(Verb::Up) => dialog.move_button(-1),
            KeyAction::Right | KeyAction::Nav(Verb::Down) => dialog.move_button(1),
            KeyAction::EnterInsert => {
                dialog.focus_body();
                app.state.mode.enter_insert();
            }
            KeyAction::Activate => match dialog.focus() {
                DialogFocus::Button(button) => command::press_new_post_button(app, button),
                DialogFocus::Body => {
                    app.state.mode.enter_insert();
                }
            },
            _ => {}
        },
        Some(Overlay::DeleteDraft(dialog)) => match action {
            KeyAction::Left => dialog.choose(DeleteChoice::Yes),
            KeyAction::Right => dialog.choose(DeleteChoice::Cancel),
            KeyAction::Activate => command::finish_draft_deletion(app),
            _ => {}
        },
        None => {}
    }
    ActionResult::Continue
}
