//! Frame layout for the event loop

use ratatui::prelude::*;

use crate::app::{App, Overlay};
use crate::core::{AppMode, AppState};
use crate::render::{
    render_footer, render_header, render_nav, render_overlay, render_screen, render_status_bar,
};
use crate::screens::ScreenView;

/// Rows taken by the header, nav bar, status bar and footer
const CHROME_ROWS: u16 = 4;

/// Context for rendering a frame
pub struct RenderContext<'a> {
    pub state: &'a AppState,
    pub view: &'a ScreenView,
    pub overlay: Option<&'a Overlay>,
}

impl<'a> RenderContext<'a> {
    pub fn new(app: &'a App) -> Self {
        Self {
            state: app.state(),
            view: app.view(),
            overlay: app.overlay(),
        }
    }
}

/// Rows inside the screen body's border for a terminal `height` rows tall
pub fn content_rows(height: u16) -> usize {
    height.saturating_sub(CHROME_ROWS + 2) as usize
}

/// Render a complete frame
pub fn render_frame(frame: &mut Frame, ctx: RenderContext) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let insert = ctx.state.app_mode() == AppMode::Insert;
    // With an overlay open no screen panel is drawn as focused
    let focus = match ctx.overlay {
        Some(overlay) => overlay.panel_id(),
        None => ctx.state.focus,
    };

    render_header(frame, ctx.state, chunks[0]);
    render_nav(frame, ctx.state, chunks[1]);
    render_screen(frame, ctx.view, focus, insert && ctx.overlay.is_none(), chunks[2]);
    render_status_bar(frame, ctx.state, chunks[3]);
    render_footer(frame, ctx.state, chunks[4]);

    if let Some(overlay) = ctx.overlay {
        render_overlay(frame, overlay, insert);
    }
}
