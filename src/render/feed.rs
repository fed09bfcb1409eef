//! Screen bodies: feeds, lists and the profile card

use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::backend::{Conversation, Message, Notification, Post, User};
use crate::core::{Navigable, PanelId};
use crate::panel::{
    ChatPanel, DiscoverPanel, DraftAction, DraftRow, DraftsPanel, ListPanel, MessagesView,
    ProfilePanel, SettingRow, SettingsPanel, TextInput,
};
use crate::screens::ScreenView;

use super::theme;

/// Height of the profile card above a profile's posts
pub const PROFILE_CARD_ROWS: u16 = 6;
/// Height of a bordered single-line input
pub const INPUT_ROWS: u16 = 3;

/// Render the mounted screen into `area`.
///
/// `insert` places the terminal cursor in the focused text field.
pub fn render_screen(frame: &mut Frame, view: &ScreenView, focus: PanelId, insert: bool, area: Rect) {
    match view {
        ScreenView::Timeline(list) => render_posts(
            frame,
            list,
            " Timeline ",
            focus == PanelId::TimelineFeed,
            area,
        ),
        ScreenView::Discover(discover) => render_discover(frame, discover, focus, insert, area),
        ScreenView::Notifications(list) => render_notifications(frame, list, focus, area),
        ScreenView::Messages(view) => render_messages(frame, view, focus, insert, area),
        ScreenView::Settings(settings) => render_settings(frame, settings, focus, area),
        ScreenView::Profile(profile) => {
            render_profile(frame, profile, focus == PanelId::Profile, area)
        }
        ScreenView::UserProfile(profile) => {
            render_profile(frame, profile, focus == PanelId::UserProfile, area)
        }
        ScreenView::Drafts(drafts) => render_drafts(frame, drafts, focus, area),
    }
}

pub fn panel_block(title: impl Into<Line<'static>>, focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border(focused))
        .title(title)
}

/// List items for the item slots inside the viewport; leading slots are
/// drawn by the caller
pub fn visible_items<'a, T: Clone>(
    list: &'a ListPanel<T>,
    row: impl Fn(&'a T) -> Vec<Line<'a>>,
) -> Vec<ListItem<'a>> {
    let leading = list.leading();
    list.visible_slots()
        .filter(|&slot| slot >= leading)
        .filter_map(|slot| {
            let item = list.items().get(slot - leading)?;
            let entry = ListItem::new(row(item));
            Some(if list.cursor().is_at(slot) {
                entry.style(theme::selected())
            } else {
                entry
            })
        })
        .collect()
}

pub fn post_lines(post: &Post) -> Vec<Line<'_>> {
    let mut head = vec![
        Span::styled(format!("@{}", post.author), theme::accent()),
        Span::styled(
            format!("  {}", post.timestamp.format("%b %d %H:%M")),
            theme::dim(),
        ),
    ];
    if let Some(by) = &post.reposted_by {
        head.push(Span::styled(
            format!("  \u{21bb} reposted by @{}", by),
            theme::reposted(),
        ));
    }

    let like_style = if post.liked_by_user {
        theme::liked()
    } else {
        theme::dim()
    };
    let repost_style = if post.reposted_by_user {
        theme::reposted()
    } else {
        theme::dim()
    };
    let counters = Line::from(vec![
        Span::styled(format!("\u{2665} {}", post.likes), like_style),
        Span::raw("   "),
        Span::styled(format!("\u{21bb} {}", post.reposts), repost_style),
        Span::raw("   "),
        Span::styled(format!("\u{1f4ac} {}", post.comments), theme::dim()),
    ]);

    vec![
        Line::from(head),
        Line::from(post.content.lines().next().unwrap_or("")),
        counters,
        Line::from(""),
    ]
}

fn render_posts(frame: &mut Frame, list: &ListPanel<Post>, title: &str, focused: bool, area: Rect) {
    let title = match list.paginator() {
        Some(pager) if pager.has_more() => {
            format!("{}({}/{}) ", title, pager.displayed(), pager.total())
        }
        _ => title.to_string(),
    };
    let block = panel_block(title, focused);
    if list.items().is_empty() {
        frame.render_widget(Paragraph::new("No posts").style(theme::dim()).block(block), area);
        return;
    }
    frame.render_widget(List::new(visible_items(list, post_lines)).block(block), area);
}

/// Draw a bordered text field; `active` puts the terminal cursor in it
pub fn render_input(frame: &mut Frame, input: &TextInput, title: &str, focused: bool, active: bool, area: Rect) {
    let content = if input.text().is_empty() {
        Line::from(Span::styled(input.placeholder(), theme::dim()))
    } else {
        Line::from(input.text())
    };
    let widget = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .block(panel_block(title.to_string(), focused));
    frame.render_widget(widget, area);
    if active {
        place_cursor(frame, input, area);
    }
}

/// Terminal cursor at the field's edit position, ignoring soft wraps
pub fn place_cursor(frame: &mut Frame, input: &TextInput, area: Rect) {
    let before = input.text().get(..input.cursor()).unwrap_or("");
    let row = before.matches('\n').count() as u16;
    let col = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) as u16;
    let x = (area.x + 1 + col).min(area.right().saturating_sub(2));
    let y = (area.y + 1 + row).min(area.bottom().saturating_sub(2));
    frame.set_cursor_position(Position::new(x, y));
}

fn render_discover(frame: &mut Frame, discover: &DiscoverPanel, focus: PanelId, insert: bool, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(INPUT_ROWS), Constraint::Min(0)])
        .split(area);

    let focused = focus == PanelId::DiscoverFeed;
    let on_box = discover.on_search_box();
    render_input(
        frame,
        discover.search(),
        " Search ",
        focused && on_box,
        focused && on_box && insert,
        chunks[0],
    );

    let title = match discover.applied_query() {
        "" => " Discover ".to_string(),
        query => format!(" Results for \"{}\" ", query),
    };
    render_posts(frame, discover.feed(), &title, focused && !on_box, chunks[1]);
}

fn notification_lines(n: &Notification) -> Vec<Line<'_>> {
    let verb = match n.kind.as_str() {
        "like" => "liked your post",
        "repost" => "reposted your post",
        "follow" => "followed you",
        "comment" => "commented on your post",
        "mention" => "mentioned you",
        _ => "interacted with you",
    };
    let (marker, style) = if n.read {
        ("  ", Style::default())
    } else {
        ("\u{25cf} ", theme::unread())
    };
    vec![
        Line::from(vec![
            Span::styled(marker, style),
            Span::styled(format!("@{}", n.actor), theme::accent()),
            Span::raw(format!(" {}", verb)),
            Span::styled(
                format!("  {}", n.timestamp.format("%b %d %H:%M")),
                theme::dim(),
            ),
        ]),
        Line::from(Span::styled(format!("  {}", n.content), theme::dim())),
    ]
}

fn render_notifications(frame: &mut Frame, list: &ListPanel<Notification>, focus: PanelId, area: Rect) {
    let unread = list.items().iter().filter(|n| !n.read).count();
    let block = panel_block(
        format!(" Notifications ({} unread) ", unread),
        focus == PanelId::Notifications,
    );
    frame.render_widget(
        List::new(visible_items(list, notification_lines)).block(block),
        area,
    );
}

fn conversation_lines(c: &Conversation) -> Vec<Line<'_>> {
    let name_style = if c.unread {
        theme::unread()
    } else {
        theme::accent()
    };
    vec![
        Line::from(Span::styled(format!("@{}", c.username), name_style)),
        Line::from(Span::styled(c.last_message.as_str(), theme::dim())),
    ]
}

fn message_lines(m: &Message) -> Vec<Line<'_>> {
    vec![
        Line::from(vec![
            Span::styled(format!("@{}", m.sender), theme::accent()),
            Span::styled(format!("  {}", m.timestamp.format("%H:%M")), theme::dim()),
        ]),
        Line::from(m.content.as_str()),
    ]
}

fn render_messages(frame: &mut Frame, view: &MessagesView, focus: PanelId, insert: bool, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    let conversations = List::new(visible_items(&view.conversations, conversation_lines))
        .block(panel_block(" Conversations ", focus == PanelId::Conversations));
    frame.render_widget(conversations, columns[0]);

    render_chat(frame, &view.chat, focus == PanelId::Chat, insert, columns[1]);
}

fn render_chat(frame: &mut Frame, chat: &ChatPanel, focused: bool, insert: bool, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(INPUT_ROWS)])
        .split(area);

    let title = match chat.partner() {
        Some(partner) => format!(" @{} ", partner),
        None => " Chat ".to_string(),
    };
    let block = panel_block(title, focused && !insert);
    if chat.conversation_id().is_none() {
        frame.render_widget(
            Paragraph::new("No conversation selected").style(theme::dim()).block(block),
            rows[0],
        );
    } else {
        frame.render_widget(List::new(visible_items(chat.messages(), message_lines)).block(block), rows[0]);
    }
    render_input(frame, chat.input(), " Message ", focused && insert, focused && insert, rows[1]);
}

fn setting_lines(row: &SettingRow) -> Vec<Line<'static>> {
    let line = if row.kind.is_toggle() {
        let mark = if row.enabled { "[x]" } else { "[ ]" };
        Line::from(format!("{} {}", mark, row.kind.label()))
    } else {
        let status = if row.enabled {
            Span::styled("connected", theme::reposted())
        } else {
            Span::styled("not connected", theme::dim())
        };
        Line::from(vec![Span::raw(format!("    {}: ", row.kind.label())), status])
    };
    vec![line]
}

fn render_settings(frame: &mut Frame, settings: &SettingsPanel, focus: PanelId, area: Rect) {
    let account = settings.settings();
    let title = format!(" Settings @{} ", account.username);
    let list = List::new(visible_items(settings.rows(), |row| setting_lines(row)))
        .block(panel_block(title, focus == PanelId::Settings));
    frame.render_widget(list, area);
}

fn profile_card(user: &User) -> Vec<Line<'_>> {
    vec![
        Line::from(Span::styled(
            user.display_name.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(format!("@{}", user.username), theme::accent())),
        Line::from(user.bio.as_str()),
        Line::from(Span::styled(
            format!(
                "{} posts   {} followers   {} following",
                user.posts_count, user.followers, user.following
            ),
            theme::dim(),
        )),
    ]
}

fn render_profile(frame: &mut Frame, profile: &ProfilePanel, focused: bool, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(PROFILE_CARD_ROWS), Constraint::Min(0)])
        .split(area);

    let card = Paragraph::new(profile_card(profile.user()))
        .wrap(Wrap { trim: true })
        .block(panel_block(" Profile ", false));
    frame.render_widget(card, chunks[0]);
    render_posts(frame, profile.posts(), " Posts ", focused, chunks[1]);
}

fn draft_lines(row: &DraftRow) -> Vec<Line<'_>> {
    vec![
        Line::from(vec![
            Span::styled(format!("#{}", row.storage_index + 1), theme::accent()),
            Span::styled(
                format!("  {}", row.draft.timestamp.format("%b %d %H:%M")),
                theme::dim(),
            ),
        ]),
        Line::from(row.draft.content.lines().next().unwrap_or("")),
        Line::from(""),
    ]
}

fn render_drafts(frame: &mut Frame, drafts: &DraftsPanel, focus: PanelId, area: Rect) {
    let action = |which: DraftAction, label: &'static str| {
        if drafts.action() == which {
            Span::styled(label, theme::selected())
        } else {
            Span::styled(label, theme::dim())
        }
    };
    let title = Line::from(vec![
        Span::raw(" Drafts  "),
        action(DraftAction::Open, "[Open]"),
        Span::raw(" "),
        action(DraftAction::Delete, "[Delete]"),
        Span::raw(" "),
    ]);
    let block = panel_block(title, focus == PanelId::Drafts);
    if drafts.rows().items().is_empty() {
        frame.render_widget(Paragraph::new("No drafts").style(theme::dim()).block(block), area);
        return;
    }
    frame.render_widget(List::new(visible_items(drafts.rows(), draft_lines)).block(block), area);
}
