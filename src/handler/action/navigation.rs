//! Navigation action handlers
//!
//! Verbs go to the focused panel's [`Navigable`] capability; panels without
//! it ignore them.

use std::time::Instant;

use crate::app::App;
use crate::core::{ChordOutcome, Verb};

/// Apply a cursor verb to the focused panel
pub fn apply(app: &mut App, verb: Verb) {
    if let Some(nav) = app.focused_panel().and_then(|panel| panel.navigable()) {
        nav.apply(verb);
    }
}

/// One press of "g"; the second press inside the window jumps to the top
pub fn chord_top(app: &mut App, now: Instant) {
    let panel = app.state.focus;
    if app.chord.press(panel, now) == ChordOutcome::Fired {
        tracing::debug!(%panel, "chord gg fired");
        apply(app, Verb::Top);
    }
}
