//! Settings list

use crate::backend::UserSettings;
use crate::core::{Navigable, PanelId};

use super::{ListPanel, Panel, PanelTuning};

/// What a settings row controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    EmailNotifications,
    ShowOnlineStatus,
    PrivateAccount,
    GitHub,
    GitLab,
    Google,
    Discord,
}

impl SettingKind {
    const ALL: [SettingKind; 7] = [
        SettingKind::EmailNotifications,
        SettingKind::ShowOnlineStatus,
        SettingKind::PrivateAccount,
        SettingKind::GitHub,
        SettingKind::GitLab,
        SettingKind::Google,
        SettingKind::Discord,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SettingKind::EmailNotifications => "Email notifications",
            SettingKind::ShowOnlineStatus => "Show online status",
            SettingKind::PrivateAccount => "Private account",
            SettingKind::GitHub => "GitHub",
            SettingKind::GitLab => "GitLab",
            SettingKind::Google => "Google",
            SettingKind::Discord => "Discord",
        }
    }

    /// OAuth connection rows are display-only
    pub fn is_toggle(&self) -> bool {
        matches!(
            self,
            SettingKind::EmailNotifications | SettingKind::ShowOnlineStatus | SettingKind::PrivateAccount
        )
    }

    fn value(&self, settings: &UserSettings) -> bool {
        match self {
            SettingKind::EmailNotifications => settings.email_notifications,
            SettingKind::ShowOnlineStatus => settings.show_online_status,
            SettingKind::PrivateAccount => settings.private_account,
            SettingKind::GitHub => settings.github_connected,
            SettingKind::GitLab => settings.gitlab_connected,
            SettingKind::Google => settings.google_connected,
            SettingKind::Discord => settings.discord_connected,
        }
    }

    fn flip(&self, settings: &mut UserSettings) {
        match self {
            SettingKind::EmailNotifications => {
                settings.email_notifications = !settings.email_notifications
            }
            SettingKind::ShowOnlineStatus => {
                settings.show_online_status = !settings.show_online_status
            }
            SettingKind::PrivateAccount => settings.private_account = !settings.private_account,
            _ => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingRow {
    pub kind: SettingKind,
    pub enabled: bool,
}

pub struct SettingsPanel {
    settings: UserSettings,
    rows: ListPanel<SettingRow>,
}

impl SettingsPanel {
    pub fn new(settings: UserSettings, tuning: &PanelTuning) -> Self {
        let rows = ListPanel::new(PanelId::Settings, build_rows(&settings), tuning);
        Self { settings, rows }
    }

    pub fn settings(&self) -> &UserSettings {
        &self.settings
    }

    pub fn rows(&self) -> &ListPanel<SettingRow> {
        &self.rows
    }

    pub fn set_viewport_rows(&mut self, rows: usize) {
        self.rows.set_viewport_rows(rows);
    }

    /// Flip the preference under the cursor. Returns the updated settings
    /// for persisting, or `None` on a display-only row.
    pub fn toggle_selected(&mut self) -> Option<&UserSettings> {
        let kind = self.rows.selected()?.kind;
        if !kind.is_toggle() {
            return None;
        }
        kind.flip(&mut self.settings);
        let enabled = kind.value(&self.settings);
        self.rows.update_where(|row| row.kind == kind, |row| row.enabled = enabled);
        Some(&self.settings)
    }

    /// Undo a toggle the backend refused
    pub fn revert(&mut self, previous: UserSettings) {
        self.rows
            .update_where(|_| true, |row| row.enabled = row.kind.value(&previous));
        self.settings = previous;
    }
}

fn build_rows(settings: &UserSettings) -> Vec<SettingRow> {
    SettingKind::ALL
        .into_iter()
        .map(|kind| SettingRow {
            kind,
            enabled: kind.value(settings),
        })
        .collect()
}

impl Panel for SettingsPanel {
    fn id(&self) -> PanelId {
        PanelId::Settings
    }

    fn navigable(&mut self) -> Option<&mut dyn Navigable> {
        Some(&mut self.rows)
    }

    fn scroll(&mut self, delta: isize) {
        self.rows.scroll(delta);
    }
}
