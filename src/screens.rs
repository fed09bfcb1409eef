//! Screen registry and mounted screen views
//!
//! Every screen is described once in [`SCREENS`]. Mounting runs the
//! descriptor's factory, which fetches what it needs from the backend and
//! builds the panel tree. A failed fetch mounts the screen empty and
//! reports the failure; it never leaves a half-built list behind.

use std::collections::HashSet;
use std::time::Instant;

use crate::backend::{Backend, Notification, Post, User, UserSettings};
use crate::core::{PanelId, ScreenName, ScreenParams};
use crate::drafts::DraftStore;
use crate::error::Result;
use crate::panel::{
    DiscoverPanel, DraftsPanel, ListPanel, MessagesView, Panel, PanelTuning, ProfilePanel,
    SettingsPanel, POST_ROWS,
};

/// Static description of one screen
pub struct ScreenDescriptor {
    pub name: ScreenName,
    pub footer_hint: &'static str,
    pub factory: fn(&mut MountContext<'_>) -> ScreenView,
}

/// Registry, in [`ScreenName::ALL`] order
pub static SCREENS: [ScreenDescriptor; 8] = [
    ScreenDescriptor {
        name: ScreenName::Timeline,
        footer_hint: "[1-5] Screens [p] Profile [d] Drafts [j/k] Navigate [:n] New Post [:q] Quit",
        factory: mount_timeline,
    },
    ScreenDescriptor {
        name: ScreenName::Discover,
        footer_hint: "[1-5] Screens [p] Profile [d] Drafts [j/k] Navigate [/] Search [:n] New Post [:q] Quit",
        factory: mount_discover,
    },
    ScreenDescriptor {
        name: ScreenName::Notifications,
        footer_hint: "[1-5] Screens [p] Profile [d] Drafts [j/k] Navigate [:q] Quit",
        factory: mount_notifications,
    },
    ScreenDescriptor {
        name: ScreenName::Messages,
        footer_hint: "[0] Chat [6] Messages [1-5] Screens [p] Profile [d] Drafts [j/k] Navigate [:n] New Message [:q] Quit",
        factory: mount_messages,
    },
    ScreenDescriptor {
        name: ScreenName::Settings,
        footer_hint: "[1-5] Screens [p] Profile [d] Drafts [j/k] Navigate [:q] Quit",
        factory: mount_settings,
    },
    ScreenDescriptor {
        name: ScreenName::Profile,
        footer_hint: "[1-5] Screens [d] Drafts [j/k] Navigate [:q] Quit",
        factory: mount_profile,
    },
    ScreenDescriptor {
        name: ScreenName::Drafts,
        footer_hint: "[1-5] Screens [p] Profile [j/k] Navigate [h/l] Select [Enter] Execute [:q] Quit",
        factory: mount_drafts,
    },
    ScreenDescriptor {
        name: ScreenName::UserProfile,
        footer_hint: "[1-5] Screens [p] Profile [d] Drafts [:m] Message [:q] Quit",
        factory: mount_user_profile,
    },
];

pub fn descriptor(name: ScreenName) -> &'static ScreenDescriptor {
    &SCREENS[name as usize]
}

/// What a factory may use while building a screen
pub struct MountContext<'a> {
    pub backend: &'a mut dyn Backend,
    pub drafts: &'a DraftStore,
    pub params: &'a ScreenParams,
    pub tuning: &'a PanelTuning,
    pub fetch_limit: usize,
    pub me: &'a User,
    /// Posts reposted this session, newest first
    pub reposts: &'a [Post],
    failures: Vec<String>,
}

impl<'a> MountContext<'a> {
    pub fn new(
        backend: &'a mut dyn Backend,
        drafts: &'a DraftStore,
        params: &'a ScreenParams,
        tuning: &'a PanelTuning,
        me: &'a User,
    ) -> Self {
        Self {
            backend,
            drafts,
            params,
            tuning,
            fetch_limit: 50,
            me,
            reposts: &[],
            failures: Vec::new(),
        }
    }

    pub fn with_fetch_limit(mut self, limit: usize) -> Self {
        self.fetch_limit = limit;
        self
    }

    pub fn with_reposts(mut self, reposts: &'a [Post]) -> Self {
        self.reposts = reposts;
        self
    }

    /// Fetch failures recorded during the mount
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    fn or_empty<T: Default>(&mut self, what: &str, result: Result<T>) -> T {
        result.unwrap_or_else(|e| {
            tracing::warn!(what, error = %e, "fetch failed, mounting empty");
            self.failures.push(format!("Failed to load {}: {}", what, e));
            T::default()
        })
    }

    /// Timeline and discover posts written by `username`
    fn posts_by(&mut self, username: &str) -> Vec<Post> {
        let limit = self.fetch_limit;
        let timeline = self.backend.timeline(limit);
        let timeline = self.or_empty("timeline", timeline);
        let discover = self.backend.discover(limit);
        let discover = self.or_empty("discover", discover);
        let mut seen = HashSet::new();
        timeline
            .into_iter()
            .chain(discover)
            .filter(|p| p.author == username && seen.insert(p.id.clone()))
            .collect()
    }
}

fn mount_timeline(ctx: &mut MountContext<'_>) -> ScreenView {
    let fetched = ctx.backend.timeline(ctx.fetch_limit);
    let mut posts = ctx.reposts.to_vec();
    posts.extend(ctx.or_empty("timeline", fetched));
    ScreenView::Timeline(
        ListPanel::paginated(PanelId::TimelineFeed, posts, ctx.tuning).with_row_height(POST_ROWS),
    )
}

fn mount_discover(ctx: &mut MountContext<'_>) -> ScreenView {
    let fetched = ctx.backend.discover(ctx.fetch_limit);
    let posts = ctx.or_empty("discover", fetched);
    ScreenView::Discover(DiscoverPanel::new(posts, ctx.tuning))
}

fn mount_notifications(ctx: &mut MountContext<'_>) -> ScreenView {
    let fetched = ctx.backend.notifications(false);
    let notifications = ctx.or_empty("notifications", fetched);
    ScreenView::Notifications(
        ListPanel::new(PanelId::Notifications, notifications, ctx.tuning).with_row_height(2),
    )
}

fn mount_messages(ctx: &mut MountContext<'_>) -> ScreenView {
    let fetched = ctx.backend.conversations();
    let conversations = ctx.or_empty("conversations", fetched);
    let mut view = MessagesView::new(conversations, ctx.tuning);

    // A DM request opens that user's conversation, otherwise the first one
    let target = match ctx.params.username.as_deref() {
        Some(user) => Some(
            view.conversations
                .items()
                .iter()
                .find(|c| c.username == user)
                .map(|c| (c.id.clone(), c.username.clone()))
                .unwrap_or_else(|| (format!("dm-{}", user), user.to_string())),
        ),
        None => view
            .selected_conversation()
            .map(|c| (c.id.clone(), c.username.clone())),
    };
    if let Some((id, partner)) = target {
        let known = view.conversations.items().iter().any(|c| c.id == id);
        let messages = if known {
            let fetched = ctx.backend.messages(&id);
            ctx.or_empty("messages", fetched)
        } else {
            Vec::new()
        };
        view.chat.open(&id, &partner, messages);
    }
    ScreenView::Messages(view)
}

fn mount_settings(ctx: &mut MountContext<'_>) -> ScreenView {
    let fetched = ctx.backend.settings();
    let mut settings: UserSettings = ctx.or_empty("settings", fetched);
    if settings.username.is_empty() {
        settings.username = ctx.me.username.clone();
        settings.display_name = ctx.me.display_name.clone();
    }
    ScreenView::Settings(SettingsPanel::new(settings, ctx.tuning))
}

fn mount_profile(ctx: &mut MountContext<'_>) -> ScreenView {
    let user = ctx
        .backend
        .current_user()
        .unwrap_or_else(|_| ctx.me.clone());
    let posts = ctx.posts_by(&user.username);
    ScreenView::Profile(ProfilePanel::new(PanelId::Profile, user, posts, ctx.tuning))
}

fn mount_user_profile(ctx: &mut MountContext<'_>) -> ScreenView {
    let username = ctx
        .params
        .username
        .clone()
        .unwrap_or_else(|| ctx.me.username.clone());
    let posts = ctx.posts_by(&username);
    let mut user = User::named(&username);
    user.posts_count = posts.len() as u64;
    ScreenView::UserProfile(ProfilePanel::new(PanelId::UserProfile, user, posts, ctx.tuning))
}

fn mount_drafts(ctx: &mut MountContext<'_>) -> ScreenView {
    ScreenView::Drafts(DraftsPanel::new(ctx.drafts.load(), ctx.tuning))
}

/// The mounted component tree of the current screen
pub enum ScreenView {
    Timeline(ListPanel<Post>),
    Discover(DiscoverPanel),
    Notifications(ListPanel<Notification>),
    Messages(MessagesView),
    Settings(SettingsPanel),
    Profile(ProfilePanel),
    Drafts(DraftsPanel),
    UserProfile(ProfilePanel),
}

impl ScreenView {
    pub fn name(&self) -> ScreenName {
        match self {
            ScreenView::Timeline(_) => ScreenName::Timeline,
            ScreenView::Discover(_) => ScreenName::Discover,
            ScreenView::Notifications(_) => ScreenName::Notifications,
            ScreenView::Messages(_) => ScreenName::Messages,
            ScreenView::Settings(_) => ScreenName::Settings,
            ScreenView::Profile(_) => ScreenName::Profile,
            ScreenView::Drafts(_) => ScreenName::Drafts,
            ScreenView::UserProfile(_) => ScreenName::UserProfile,
        }
    }

    /// The panel `id`, if this screen has it
    pub fn panel_mut(&mut self, id: PanelId) -> Option<&mut dyn Panel> {
        let panel: &mut dyn Panel = match (self, id) {
            (ScreenView::Timeline(list), PanelId::TimelineFeed) => list,
            (ScreenView::Discover(discover), PanelId::DiscoverFeed) => discover,
            (ScreenView::Notifications(list), PanelId::Notifications) => list,
            (ScreenView::Messages(view), PanelId::Conversations) => &mut view.conversations,
            (ScreenView::Messages(view), PanelId::Chat) => &mut view.chat,
            (ScreenView::Settings(settings), PanelId::Settings) => settings,
            (ScreenView::Profile(profile), PanelId::Profile) => profile,
            (ScreenView::UserProfile(profile), PanelId::UserProfile) => profile,
            (ScreenView::Drafts(drafts), PanelId::Drafts) => drafts,
            _ => return None,
        };
        Some(panel)
    }

    /// Post under the cursor of the focused panel
    pub fn focused_post(&self, focus: PanelId) -> Option<&Post> {
        match self {
            ScreenView::Timeline(list) if focus == PanelId::TimelineFeed => list.selected(),
            ScreenView::Discover(discover) if focus == PanelId::DiscoverFeed => {
                discover.feed().selected()
            }
            ScreenView::Profile(profile) | ScreenView::UserProfile(profile) => {
                profile.posts().selected()
            }
            _ => None,
        }
    }

    /// Apply `update` to every copy of post `post_id` on this screen
    pub fn update_post(&mut self, post_id: &str, update: impl Fn(&mut Post)) {
        let matches = |p: &Post| p.id == post_id;
        match self {
            ScreenView::Timeline(list) => {
                list.update_where(matches, update);
            }
            ScreenView::Discover(discover) => {
                discover.feed_mut().update_where(matches, update);
            }
            ScreenView::Profile(profile) | ScreenView::UserProfile(profile) => {
                profile.posts_mut().update_where(matches, update);
            }
            _ => {}
        }
    }

    pub fn tick(&mut self, now: Instant) {
        if let ScreenView::Discover(discover) = self {
            discover.tick(now);
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self {
            ScreenView::Discover(discover) => discover.deadline(),
            _ => None,
        }
    }

    /// Fit every list to `rows` terminal rows
    pub fn set_viewport_rows(&mut self, rows: usize) {
        match self {
            ScreenView::Timeline(list) => list.set_viewport_rows(rows),
            ScreenView::Discover(discover) => discover.feed_mut().set_viewport_rows(rows.saturating_sub(3)),
            ScreenView::Notifications(list) => list.set_viewport_rows(rows),
            ScreenView::Messages(view) => {
                view.conversations.set_viewport_rows(rows);
                view.chat.set_viewport_rows(rows.saturating_sub(3));
            }
            ScreenView::Settings(settings) => settings.set_viewport_rows(rows),
            ScreenView::Profile(profile) | ScreenView::UserProfile(profile) => {
                profile.posts_mut().set_viewport_rows(rows.saturating_sub(6))
            }
            ScreenView::Drafts(drafts) => drafts.set_viewport_rows(rows),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::FakeBackend;
    use crate::core::Navigable;
    use tempfile::TempDir;

    fn mount(name: ScreenName, params: ScreenParams) -> ScreenView {
        let temp = TempDir::new().unwrap();
        let drafts = DraftStore::new(temp.path().join("drafts.json"), 5);
        let mut backend = FakeBackend::new();
        let me = backend.current_user().unwrap();
        let tuning = PanelTuning::default();
        let mut ctx = MountContext::new(&mut backend, &drafts, &params, &tuning, &me);
        (descriptor(name).factory)(&mut ctx)
    }

    #[test]
    fn test_registry_order_matches_names() {
        for name in ScreenName::ALL {
            assert_eq!(descriptor(name).name, name);
            assert!(!descriptor(name).footer_hint.is_empty());
        }
    }

    #[test]
    fn test_every_screen_has_its_primary_panel() {
        for name in ScreenName::ALL {
            let mut view = mount(name, ScreenParams::default());
            assert_eq!(view.name(), name);
            assert!(
                view.panel_mut(name.primary_panel()).is_some(),
                "{} lacks its primary panel",
                name
            );
        }
    }

    #[test]
    fn test_dm_to_unknown_user_opens_empty_chat() {
        let view = mount(ScreenName::Messages, ScreenParams::user("newbie"));
        let ScreenView::Messages(view) = view else {
            panic!("expected messages view");
        };
        assert_eq!(view.chat.conversation_id(), Some("dm-newbie"));
        assert!(view.chat.messages().items().is_empty());
    }

    #[test]
    fn test_dm_to_known_user_loads_conversation() {
        let view = mount(ScreenName::Messages, ScreenParams::user("alice"));
        let ScreenView::Messages(view) = view else {
            panic!("expected messages view");
        };
        assert_eq!(view.chat.conversation_id(), Some("c1"));
        assert!(!view.chat.messages().items().is_empty());
    }

    #[test]
    fn test_user_profile_lists_only_their_posts() {
        let view = mount(ScreenName::UserProfile, ScreenParams::user("alice"));
        let ScreenView::UserProfile(profile) = view else {
            panic!("expected user profile");
        };
        assert_eq!(profile.user().username, "alice");
        assert!(profile.posts().items().iter().all(|p| p.author == "alice"));
    }

    #[test]
    fn test_update_post_in_place() {
        let mut view = mount(ScreenName::Timeline, ScreenParams::default());
        view.update_post("2", |p| p.toggle_like());
        let ScreenView::Timeline(list) = &mut view else {
            panic!("expected timeline");
        };
        list.move_to(1);
        let post = list.selected().unwrap();
        assert_eq!(post.id, "2");
        assert!(post.liked_by_user);
    }

    #[test]
    fn test_focused_post_requires_matching_focus() {
        let view = mount(ScreenName::Timeline, ScreenParams::default());
        assert!(view.focused_post(PanelId::TimelineFeed).is_some());
        assert!(view.focused_post(PanelId::Chat).is_none());
    }
}
