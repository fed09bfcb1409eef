//! Shared styles

use ratatui::style::{Color, Modifier, Style};

pub fn accent() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

pub fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Row under the cursor
pub fn selected() -> Style {
    Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
}

/// Border of a panel, highlighted while it has focus
pub fn border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    }
}

pub fn liked() -> Style {
    Style::default().fg(Color::Red)
}

pub fn reposted() -> Style {
    Style::default().fg(Color::Green)
}

pub fn unread() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}
