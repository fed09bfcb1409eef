//! Modal overlays drawn over the screen

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, Paragraph, Wrap},
    Frame,
};

use crate::app::Overlay;
use crate::backend::Comment;
use crate::panel::{
    CommentSlot, CommentsPanel, DeleteChoice, DeleteDraftDialog, DialogFocus, NewPostButton,
    NewPostDialog,
};

use super::feed::{panel_block, place_cursor, post_lines, render_input, visible_items, INPUT_ROWS};
use super::theme;

/// Render the open overlay, if any
pub fn render_overlay(frame: &mut Frame, overlay: &Overlay, insert: bool) {
    match overlay {
        Overlay::Comments(panel) => draw_comments(frame, panel, insert),
        Overlay::NewPost(dialog) => draw_new_post(frame, dialog, insert),
        Overlay::DeleteDraft(dialog) => draw_delete_draft(frame, dialog),
    }
}

fn comment_lines(comment: &Comment) -> Vec<Line<'_>> {
    vec![
        Line::from(Span::styled(format!("@{}", comment.user), theme::accent())),
        Line::from(comment.text.as_str()),
    ]
}

fn draw_comments(frame: &mut Frame, panel: &CommentsPanel, insert: bool) {
    let area = centered_rect(70, frame.area().height.saturating_mul(4) / 5, frame.area());
    frame.render_widget(Clear, area);

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border(true))
        .title(" Comments (q to close) ");
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(INPUT_ROWS),
            Constraint::Min(0),
        ])
        .split(inner);

    let slot = panel.slot();
    let post = Paragraph::new(post_lines(panel.post()))
        .block(panel_block(" Post ", slot == Some(CommentSlot::Post)));
    frame.render_widget(post, rows[0]);

    let on_input = slot == Some(CommentSlot::Input);
    render_input(
        frame,
        panel.input(),
        " Reply ",
        on_input,
        on_input && insert,
        rows[1],
    );

    let list = panel.comments();
    let block = panel_block(format!(" {} comments ", list.items().len()), false);
    if list.items().is_empty() {
        frame.render_widget(
            Paragraph::new("No comments yet").style(theme::dim()).block(block),
            rows[2],
        );
    } else {
        frame.render_widget(List::new(visible_items(list, comment_lines)).block(block), rows[2]);
    }
}

fn draw_new_post(frame: &mut Frame, dialog: &NewPostDialog, insert: bool) {
    let area = centered_rect(60, 12, frame.area());
    frame.render_widget(Clear, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let title = match dialog.draft_index() {
        Some(index) => format!(" Edit draft #{} ", index + 1),
        None => " New Post ".to_string(),
    };
    let on_body = dialog.focus() == DialogFocus::Body;
    let body = if dialog.content().is_empty() {
        Paragraph::new(Span::styled(dialog.body().placeholder(), theme::dim()))
    } else {
        Paragraph::new(dialog.content())
    };
    frame.render_widget(
        body.wrap(Wrap { trim: false })
            .block(panel_block(title, on_body)),
        rows[0],
    );
    if on_body && insert {
        place_cursor(frame, dialog.body(), rows[0]);
    }

    let mut spans = vec![Span::raw(" ")];
    for button in NewPostButton::ALL {
        let focused = dialog.focus() == DialogFocus::Button(button);
        spans.push(button_span(button.label(), focused));
        spans.push(Span::raw("  "));
    }
    let buttons = Paragraph::new(Line::from(spans))
        .block(panel_block(" Esc: buttons  i: edit ", !on_body));
    frame.render_widget(buttons, rows[1]);
}

fn draw_delete_draft(frame: &mut Frame, dialog: &DeleteDraftDialog) {
    let area = centered_rect(50, 7, frame.area());
    let content = vec![
        Line::from(Span::styled(
            format!("Delete draft #{}?", dialog.index() + 1),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(dialog.preview(), theme::dim())),
        Line::from(""),
        Line::from(vec![
            button_span("Yes", dialog.choice() == DeleteChoice::Yes),
            Span::raw("  "),
            button_span("Cancel", dialog.choice() == DeleteChoice::Cancel),
        ]),
    ];
    let popup = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Confirm "),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

fn button_span(label: &str, focused: bool) -> Span<'static> {
    let text = format!("[ {} ]", label);
    if focused {
        Span::styled(
            text,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::raw(text)
    }
}

/// Rect of `height` rows and `percent_x` width, centered in `area`
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
