//! Comment overlay for a single post

use crate::backend::{Comment, Post};
use crate::core::{Navigable, PanelId};

use super::{ListPanel, Panel, PanelTuning, TextInput};

/// Non-comment rows at the top of the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentSlot {
    Post,
    Input,
}

const LEADING: usize = 2;

/// Slot 0 the post, slot 1 the input, then the comments
pub struct CommentsPanel {
    post: Post,
    comments: ListPanel<Comment>,
    input: TextInput,
}

impl CommentsPanel {
    pub fn new(post: Post, comments: Vec<Comment>, tuning: &PanelTuning) -> Self {
        Self {
            post,
            comments: ListPanel::new(PanelId::Comments, comments, tuning)
                .with_leading(LEADING)
                .with_row_height(2),
            input: TextInput::new("Write a comment..."),
        }
    }

    pub fn post(&self) -> &Post {
        &self.post
    }

    pub fn post_mut(&mut self) -> &mut Post {
        &mut self.post
    }

    pub fn comments(&self) -> &ListPanel<Comment> {
        &self.comments
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    pub fn slot(&self) -> Option<CommentSlot> {
        match self.comments.slot()? {
            0 => Some(CommentSlot::Post),
            _ => Some(CommentSlot::Input),
        }
    }

    /// Put the cursor on the input row
    pub fn focus_input(&mut self) {
        self.comments.move_to(1);
    }

    /// Take the typed comment, if any
    pub fn take_draft(&mut self) -> Option<String> {
        if self.input.is_blank() {
            return None;
        }
        Some(self.input.take())
    }

    pub fn set_viewport_rows(&mut self, rows: usize) {
        self.comments.set_viewport_rows(rows);
    }

    /// Reload after a comment was posted
    pub fn refresh(&mut self, comments: Vec<Comment>) {
        self.post.comments += 1;
        self.comments.replace_all(comments);
        self.comments.move_to(1);
    }
}

impl Panel for CommentsPanel {
    fn id(&self) -> PanelId {
        PanelId::Comments
    }

    fn navigable(&mut self) -> Option<&mut dyn Navigable> {
        Some(&mut self.comments)
    }

    fn text_input(&mut self) -> Option<&mut TextInput> {
        Some(&mut self.input)
    }

    fn scroll(&mut self, delta: isize) {
        self.comments.scroll(delta);
    }
}
