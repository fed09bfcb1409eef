//! Application state management

use std::time::{Duration, Instant};

use super::{AppMode, ModeController, PanelId, ScreenName, ScreenParams, StatusLine};

/// Header, footer and navigation highlight for the mounted screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chrome {
    pub header: String,
    pub footer: String,
    pub active_nav: ScreenName,
}

impl Chrome {
    pub fn for_screen(
        screen: ScreenName,
        params: &ScreenParams,
        me: &str,
        footer: &str,
    ) -> Self {
        let label = match (screen, params.username.as_deref()) {
            (ScreenName::UserProfile, Some(user)) => format!("@{}", user),
            (ScreenName::Messages, Some(user)) => format!("dm:@{}", user),
            _ => screen.as_str().to_string(),
        };
        Self {
            header: format!("tuitter [{}] @{}", label, me),
            footer: footer.to_string(),
            active_nav: screen.nav_highlight(),
        }
    }
}

/// Main application state
pub struct AppState {
    /// Mode controller (normal / insert / command)
    pub mode: ModeController,
    /// Panel receiving keys
    pub focus: PanelId,
    /// Status message with auto-clear
    pub status: StatusLine,
    /// Header/footer/nav
    pub chrome: Chrome,
    /// Exit flag
    pub should_quit: bool,
}

impl AppState {
    pub fn new(status_ttl: Duration) -> Self {
        Self {
            mode: ModeController::new(),
            focus: ScreenName::Timeline.primary_panel(),
            status: StatusLine::new(status_ttl),
            chrome: Chrome::for_screen(
                ScreenName::Timeline,
                &ScreenParams::default(),
                "",
                "",
            ),
            should_quit: false,
        }
    }

    pub fn app_mode(&self) -> AppMode {
        self.mode.mode()
    }

    /// Set status message
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.status.set(msg, Instant::now());
    }

    /// Clear status message
    pub fn clear_message(&mut self) {
        self.status.clear();
    }

    pub fn message(&self) -> Option<&str> {
        self.status.message()
    }
}
