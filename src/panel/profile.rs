//! Profile card with the user's posts

use crate::backend::{Post, User};
use crate::core::{Navigable, PanelId};

use super::{ListPanel, Panel, PanelTuning, POST_ROWS};

/// Used for both the own profile and other users' profiles
pub struct ProfilePanel {
    user: User,
    posts: ListPanel<Post>,
}

impl ProfilePanel {
    pub fn new(id: PanelId, user: User, posts: Vec<Post>, tuning: &PanelTuning) -> Self {
        Self {
            user,
            posts: ListPanel::paginated(id, posts, tuning).with_row_height(POST_ROWS),
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn posts(&self) -> &ListPanel<Post> {
        &self.posts
    }

    pub fn posts_mut(&mut self) -> &mut ListPanel<Post> {
        &mut self.posts
    }
}

impl Panel for ProfilePanel {
    fn id(&self) -> PanelId {
        self.posts.id()
    }

    fn navigable(&mut self) -> Option<&mut dyn Navigable> {
        Some(&mut self.posts)
    }

    fn scroll(&mut self, delta: isize) {
        self.posts.scroll(delta);
    }
}
