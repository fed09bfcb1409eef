//! Header, navigation bar, command bar and footer

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::{AppMode, AppState, ScreenName};

use super::theme;

/// Entries of the top navigation bar, with their key
const NAV: [(char, ScreenName); 7] = [
    ('1', ScreenName::Timeline),
    ('2', ScreenName::Discover),
    ('3', ScreenName::Notifications),
    ('4', ScreenName::Messages),
    ('5', ScreenName::Settings),
    ('p', ScreenName::Profile),
    ('d', ScreenName::Drafts),
];

pub fn render_header(frame: &mut Frame, state: &AppState, area: Rect) {
    let header = Paragraph::new(Line::from(Span::styled(
        state.chrome.header.as_str(),
        theme::accent(),
    )));
    frame.render_widget(header, area);
}

/// Render the navigation bar, highlighting the active screen
pub fn render_nav(frame: &mut Frame, state: &AppState, area: Rect) {
    let mut spans = Vec::new();
    for (i, (key, screen)) in NAV.iter().enumerate() {
        let label = format!(" [{}] {} ", key, screen.as_str());
        if *screen == state.chrome.active_nav {
            spans.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(label, Style::default().fg(Color::Gray)));
        }
        if i < NAV.len() - 1 {
            spans.push(Span::styled("|", theme::dim()));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Mode indicator and command line on the left, status message on the right
pub fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let mode = state.app_mode();
    let left = match mode {
        AppMode::Command => Line::from(vec![
            Span::styled(format!(" {} ", mode.label()), mode_style(mode)),
            Span::raw(" "),
            Span::raw(state.mode.buffer().as_str()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]),
        _ => Line::from(Span::styled(format!(" {} ", mode.label()), mode_style(mode))),
    };
    frame.render_widget(Paragraph::new(left), chunks[0]);

    if let Some(message) = state.message() {
        let right = Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(Color::Yellow),
        )))
        .alignment(ratatui::layout::Alignment::Right);
        frame.render_widget(right, chunks[1]);
    }
}

fn mode_style(mode: AppMode) -> Style {
    let bg = match mode {
        AppMode::Normal => Color::Blue,
        AppMode::Insert => Color::Green,
        AppMode::Command => Color::Magenta,
    };
    Style::default()
        .fg(Color::Black)
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}

pub fn render_footer(frame: &mut Frame, state: &AppState, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        state.chrome.footer.as_str(),
        theme::dim(),
    )));
    frame.render_widget(footer, area);
}
