//! The owning application object
//!
//! [`App`] holds every piece of mutable UI state: the mode controller, the
//! focus, the chord recognizer, the switch guard and the mounted screen.
//! Panels never see it; they are handed out one at a time through
//! [`App::focused_panel`].

use std::time::Instant;

use crossterm::event::KeyEvent;

use super::config::Config;
use crate::backend::{Backend, Post, User};
use crate::core::timer::earliest;
use crate::core::{
    AppMode, AppState, ChordRecognizer, Chrome, Cursor, PanelId, ScreenName, ScreenParams,
    ScreenSwitcher,
};
use crate::drafts::DraftStore;
use crate::handler::action::{self, ActionResult};
use crate::handler::{key_event_to_string, route_for, KeyBindingRegistry, MouseAction};
use crate::panel::{CommentsPanel, DeleteDraftDialog, NewPostDialog, Panel, PanelTuning};
use crate::screens::{descriptor, MountContext, ScreenView};

/// Modal layer drawn over the screen. Keys go here while it is open.
pub enum Overlay {
    Comments(CommentsPanel),
    NewPost(NewPostDialog),
    DeleteDraft(DeleteDraftDialog),
}

impl Overlay {
    pub fn panel_id(&self) -> PanelId {
        match self {
            Overlay::Comments(_) => PanelId::Comments,
            Overlay::NewPost(_) => PanelId::NewPost,
            Overlay::DeleteDraft(_) => PanelId::DeleteDraft,
        }
    }

    pub fn panel_mut(&mut self) -> &mut dyn Panel {
        match self {
            Overlay::Comments(panel) => panel,
            Overlay::NewPost(dialog) => dialog,
            Overlay::DeleteDraft(dialog) => dialog,
        }
    }
}

pub struct App {
    pub(crate) state: AppState,
    pub(crate) backend: Box<dyn Backend>,
    pub(crate) drafts: DraftStore,
    pub(crate) registry: KeyBindingRegistry,
    pub(crate) chord: ChordRecognizer,
    pub(crate) switcher: ScreenSwitcher,
    pub(crate) view: ScreenView,
    pub(crate) overlay: Option<Overlay>,
    focus_before_overlay: Option<PanelId>,
    pub(crate) tuning: PanelTuning,
    fetch_limit: usize,
    pub(crate) me: User,
    /// Posts reposted this session, newest first
    pub(crate) reposts: Vec<Post>,
    content_rows: usize,
}

impl App {
    /// Build the app with the default keymap and mount the timeline
    pub fn new(backend: Box<dyn Backend>, config: &Config) -> Self {
        Self::with_registry(backend, config, KeyBindingRegistry::new())
    }

    pub fn with_registry(
        mut backend: Box<dyn Backend>,
        config: &Config,
        registry: KeyBindingRegistry,
    ) -> Self {
        let me = backend.current_user().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "cannot fetch current user");
            User::named("me")
        });
        let drafts = DraftStore::new(&config.drafts_path, config.max_drafts);
        let params = ScreenParams::default();
        let (view, failures) = {
            let mut ctx = MountContext::new(backend.as_mut(), &drafts, &params, &config.tuning, &me)
                .with_fetch_limit(config.fetch_limit);
            let view = (descriptor(ScreenName::Timeline).factory)(&mut ctx);
            (view, ctx.failures().to_vec())
        };

        let mut switcher = ScreenSwitcher::new(ScreenName::Timeline, config.switch_settle);
        switcher.begin_initial();
        switcher.mounted(ScreenName::Timeline, params.clone());

        let mut state = AppState::new(config.status_ttl);
        state.chrome = Chrome::for_screen(
            ScreenName::Timeline,
            &params,
            &me.username,
            descriptor(ScreenName::Timeline).footer_hint,
        );
        if let Some(first) = failures.first() {
            state.set_message(first.clone());
        }
        tracing::info!(backend = backend.name(), user = %me.username, "app started");

        Self {
            state,
            backend,
            drafts,
            registry,
            chord: ChordRecognizer::new(config.chord_window),
            switcher,
            view,
            overlay: None,
            focus_before_overlay: None,
            tuning: config.tuning,
            fetch_limit: config.fetch_limit,
            me,
            reposts: Vec::new(),
            content_rows: 0,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> &ScreenView {
        &self.view
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn mode(&self) -> AppMode {
        self.state.app_mode()
    }

    pub fn focus(&self) -> PanelId {
        self.state.focus
    }

    pub fn me(&self) -> &User {
        &self.me
    }

    pub fn drafts(&self) -> &DraftStore {
        &self.drafts
    }

    pub fn current_screen(&self) -> ScreenName {
        self.switcher.current()
    }

    pub fn is_switching(&self) -> bool {
        self.switcher.is_switching()
    }

    pub fn mount_count(&self) -> u64 {
        self.switcher.mount_count()
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit
    }

    /// Storage index awaiting confirmation in the delete dialog
    pub fn pending_draft_deletion(&self) -> Option<usize> {
        match &self.overlay {
            Some(Overlay::DeleteDraft(dialog)) => Some(dialog.index()),
            _ => None,
        }
    }

    /// Snapshot of a panel's cursor, if that panel is mounted and navigable
    pub fn cursor_of(&mut self, id: PanelId) -> Option<Cursor> {
        let panel = match self.overlay.as_mut() {
            Some(overlay) if overlay.panel_id() == id => overlay.panel_mut(),
            _ => self.view.panel_mut(id)?,
        };
        panel.navigable().map(|nav| nav.cursor().clone())
    }

    /// Panel receiving keys: the overlay if one is open, else the focused
    /// panel of the screen
    pub fn focused_panel(&mut self) -> Option<&mut dyn Panel> {
        match self.overlay.as_mut() {
            Some(overlay) => Some(overlay.panel_mut()),
            None => self.view.panel_mut(self.state.focus),
        }
    }

    /// Request a screen switch. Returns whether the switch happened.
    ///
    /// Dropped while another switch is settling, for an unknown name, or for
    /// the current screen without params.
    pub fn switch_to(&mut self, name: &str, params: ScreenParams) -> bool {
        let target = match self.switcher.begin(name, &params) {
            Ok(target) => target,
            Err(reason) => {
                tracing::debug!(screen = name, ?reason, "switch rejected");
                return false;
            }
        };
        self.close_overlay();
        self.state.mode.reset();
        self.chord.forget(self.state.focus);
        self.mount(target, params);
        true
    }

    fn mount(&mut self, target: ScreenName, params: ScreenParams) {
        let entry = descriptor(target);
        let failures = {
            let mut ctx = MountContext::new(
                self.backend.as_mut(),
                &self.drafts,
                &params,
                &self.tuning,
                &self.me,
            )
            .with_fetch_limit(self.fetch_limit)
            .with_reposts(&self.reposts);
            self.view = (entry.factory)(&mut ctx);
            ctx.failures().to_vec()
        };
        self.view.set_viewport_rows(self.content_rows);
        self.state.chrome =
            Chrome::for_screen(target, &params, &self.me.username, entry.footer_hint);
        self.switcher.mounted(target, params);
        if let Some(first) = failures.first() {
            self.state.set_message(first.clone());
        }
        tracing::info!(screen = %target, mounts = self.switcher.mount_count(), "screen mounted");
    }

    /// Run after every draw: land a pending mount's focus request
    pub fn after_render(&mut self, now: Instant) {
        let Some(panel) = self.switcher.take_focus_request(now) else {
            return;
        };
        self.state.focus = panel;
        if let Some(nav) = self.view.panel_mut(panel).and_then(|p| p.navigable()) {
            let len = nav.item_count();
            nav.cursor_mut().reset(len);
        }
        tracing::debug!(%panel, "focus landed");
    }

    /// Fire any timers that are due
    pub fn tick(&mut self, now: Instant) {
        self.switcher.tick(now);
        self.view.tick(now);
        self.state.status.tick(now);
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        earliest([
            self.switcher.deadline(),
            self.view.deadline(),
            self.state.status.deadline(),
        ])
    }

    /// Rows available to the screen body, from the last layout
    pub fn set_content_rows(&mut self, rows: usize) {
        if rows != self.content_rows {
            self.content_rows = rows;
            self.view.set_viewport_rows(rows);
            if let Some(Overlay::Comments(panel)) = self.overlay.as_mut() {
                panel.set_viewport_rows(rows);
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> ActionResult {
        let mode = self.state.app_mode();
        tracing::trace!(route = route_for(mode), key = %key_event_to_string(&key), "key");
        match mode {
            AppMode::Command => action::handle_command_mode(self, key, now),
            AppMode::Insert => action::handle_insert_mode(self, key, now),
            AppMode::Normal => action::handle_normal_mode(self, key, now),
        }
    }

    pub fn handle_mouse(&mut self, action: MouseAction) {
        let delta = match action {
            MouseAction::ScrollUp(n) => -(n as isize),
            MouseAction::ScrollDown(n) => n as isize,
            MouseAction::None => return,
        };
        if let Some(panel) = self.focused_panel() {
            panel.scroll(delta);
        }
    }

    /// Open a modal layer and move focus onto it
    pub(crate) fn open_overlay(&mut self, mut overlay: Overlay) {
        if let Overlay::Comments(panel) = &mut overlay {
            panel.set_viewport_rows(self.content_rows);
        }
        if self.overlay.is_none() {
            self.focus_before_overlay = Some(self.state.focus);
        }
        self.state.focus = overlay.panel_id();
        self.overlay = Some(overlay);
    }

    /// Close the modal layer and give focus back
    pub(crate) fn close_overlay(&mut self) {
        if let Some(overlay) = self.overlay.take() {
            self.chord.forget(overlay.panel_id());
            if let Some(previous) = self.focus_before_overlay.take() {
                self.state.focus = previous;
            }
            self.state.mode.reset();
        }
    }

    /// Swap the mounted view for a rebuilt one of the same screen
    pub(crate) fn replace_view(&mut self, view: ScreenView) {
        self.view = view;
        self.view.set_viewport_rows(self.content_rows);
    }

    /// Move focus within the mounted screen
    pub(crate) fn focus_panel(&mut self, id: PanelId) -> bool {
        if self.overlay.is_some() || self.view.panel_mut(id).is_none() {
            return false;
        }
        self.state.focus = id;
        true
    }
}
