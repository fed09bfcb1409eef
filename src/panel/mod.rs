//! Panels - the focusable components inside a screen

mod comments;
mod dialog;
mod discover;
mod drafts;
mod input;
mod list;
mod messages;
mod profile;
mod settings;

pub use comments::{CommentSlot, CommentsPanel};
pub use dialog::{DeleteChoice, DeleteDraftDialog, DialogFocus, NewPostButton, NewPostDialog};
pub use discover::DiscoverPanel;
pub use drafts::{DraftAction, DraftRow, DraftsPanel};
pub use input::TextInput;
pub use list::ListPanel;
pub use messages::{ChatPanel, MessagesView};
pub use profile::ProfilePanel;
pub use settings::{SettingKind, SettingRow, SettingsPanel};

use std::time::Duration;

use crate::core::pagination::{DEFAULT_BATCH_SIZE, DEFAULT_LOAD_PROXIMITY, DEFAULT_SCROLL_THRESHOLD};
use crate::core::timer::DEFAULT_DEBOUNCE;
use crate::core::{NavSteps, Navigable, PanelId};

/// Rows per post in a feed (author line, body, counters, spacer)
pub const POST_ROWS: usize = 4;

/// A focusable component.
///
/// Capabilities are all-or-nothing: a panel either hands out a full
/// [`Navigable`] or none, and either owns a text field or not.
pub trait Panel {
    fn id(&self) -> PanelId;

    fn navigable(&mut self) -> Option<&mut dyn Navigable> {
        None
    }

    fn text_input(&mut self) -> Option<&mut TextInput> {
        None
    }

    /// Mouse-wheel scroll of the viewport by `delta` items
    fn scroll(&mut self, _delta: isize) {}
}

/// Knobs shared by every list panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelTuning {
    pub steps: NavSteps,
    pub batch_size: usize,
    pub load_proximity: usize,
    pub scroll_threshold: usize,
    pub search_debounce: Duration,
}

impl Default for PanelTuning {
    fn default() -> Self {
        Self {
            steps: NavSteps::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            load_proximity: DEFAULT_LOAD_PROXIMITY,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            search_debounce: DEFAULT_DEBOUNCE,
        }
    }
}
