//! Input mode definitions and the mode controller

use std::fmt;

/// Global input mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppMode {
    /// Vim verbs drive the focused panel
    #[default]
    Normal,
    /// Keys are delivered to the focused text field
    Insert,
    /// Keys are captured by the command line
    Command,
}

impl AppMode {
    /// Short label for the command bar
    pub fn label(&self) -> &'static str {
        match self {
            AppMode::Normal => "NORMAL",
            AppMode::Insert => "INSERT",
            AppMode::Command => "COMMAND",
        }
    }
}

/// Identity of a focusable panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    TimelineFeed,
    DiscoverFeed,
    Notifications,
    Conversations,
    Chat,
    Settings,
    Profile,
    Drafts,
    UserProfile,
    Comments,
    NewPost,
    DeleteDraft,
}

impl PanelId {
    pub fn as_str(&self) -> &'static str {
        match self {
            PanelId::TimelineFeed => "timeline-feed",
            PanelId::DiscoverFeed => "discover-feed",
            PanelId::Notifications => "notifications-feed",
            PanelId::Conversations => "conversations",
            PanelId::Chat => "chat",
            PanelId::Settings => "settings-panel",
            PanelId::Profile => "profile-panel",
            PanelId::Drafts => "drafts-panel",
            PanelId::UserProfile => "user-profile-panel",
            PanelId::Comments => "comments",
            PanelId::NewPost => "new-post",
            PanelId::DeleteDraft => "delete-draft",
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command-line text, valid only while in [`AppMode::Command`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandBuffer {
    text: String,
}

impl CommandBuffer {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn clear(&mut self) {
        self.text.clear();
    }
}

/// Owns the current [`AppMode`] and the command buffer.
///
/// Every transition goes through this type; panels only ever read the mode.
#[derive(Debug, Default)]
pub struct ModeController {
    mode: AppMode,
    buffer: CommandBuffer,
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn buffer(&self) -> &CommandBuffer {
        &self.buffer
    }

    pub fn is_command(&self) -> bool {
        self.mode == AppMode::Command
    }

    pub fn is_insert(&self) -> bool {
        self.mode == AppMode::Insert
    }

    /// Normal -> Insert. Returns false from any other mode.
    pub fn enter_insert(&mut self) -> bool {
        if self.mode != AppMode::Normal {
            return false;
        }
        self.mode = AppMode::Insert;
        true
    }

    /// Insert -> Normal
    pub fn exit_insert(&mut self) -> bool {
        if self.mode != AppMode::Insert {
            return false;
        }
        self.mode = AppMode::Normal;
        true
    }

    /// Normal -> Command, seeding the buffer with the trigger character
    pub fn enter_command(&mut self, seed: char) -> bool {
        if self.mode != AppMode::Normal {
            return false;
        }
        self.buffer.clear();
        self.buffer.text.push(seed);
        self.mode = AppMode::Command;
        true
    }

    pub fn push_char(&mut self, c: char) {
        if self.is_command() {
            self.buffer.text.push(c);
        }
    }

    /// Remove the last character, never the seed
    pub fn backspace(&mut self) {
        if self.is_command() && self.buffer.text.chars().count() > 1 {
            self.buffer.text.pop();
        }
    }

    /// Command -> Normal, discarding the buffer
    pub fn cancel(&mut self) {
        if self.is_command() {
            self.buffer.clear();
            self.mode = AppMode::Normal;
        }
    }

    /// Command -> Normal, handing back the buffer text for parsing.
    /// The buffer is cleared whether or not the text parses.
    pub fn commit(&mut self) -> Option<String> {
        if !self.is_command() {
            return None;
        }
        let text = std::mem::take(&mut self.buffer.text);
        self.mode = AppMode::Normal;
        Some(text)
    }

    /// Drop back to Normal from whatever mode is active
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.mode = AppMode::Normal;
    }
}
