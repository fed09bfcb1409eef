//! Modal dialogs: compose a post, confirm a draft deletion

use crate::core::PanelId;

use super::{Panel, TextInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewPostButton {
    Post,
    Save,
    Cancel,
}

impl NewPostButton {
    pub const ALL: [NewPostButton; 3] = [NewPostButton::Post, NewPostButton::Save, NewPostButton::Cancel];

    pub fn label(&self) -> &'static str {
        match self {
            NewPostButton::Post => "Post",
            NewPostButton::Save => "Save",
            NewPostButton::Cancel => "Cancel",
        }
    }

    fn position(&self) -> usize {
        NewPostButton::ALL.iter().position(|b| b == self).unwrap_or(0)
    }
}

/// Where keys go inside the compose dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogFocus {
    Body,
    Button(NewPostButton),
}

/// Compose dialog
pub struct NewPostDialog {
    body: TextInput,
    focus: DialogFocus,
    /// Draft being edited; deleted once published
    draft_index: Option<usize>,
}

impl Default for NewPostDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl NewPostDialog {
    pub fn new() -> Self {
        Self {
            body: TextInput::new("What's happening?").multiline(),
            focus: DialogFocus::Body,
            draft_index: None,
        }
    }

    /// Pre-filled from a stored draft
    pub fn from_draft(index: usize, content: &str) -> Self {
        Self {
            body: TextInput::new("What's happening?").multiline().with_text(content),
            focus: DialogFocus::Body,
            draft_index: Some(index),
        }
    }

    pub fn body(&self) -> &TextInput {
        &self.body
    }

    pub fn focus(&self) -> DialogFocus {
        self.focus
    }

    pub fn draft_index(&self) -> Option<usize> {
        self.draft_index
    }

    pub fn focus_body(&mut self) {
        self.focus = DialogFocus::Body;
    }

    pub fn focus_buttons(&mut self) {
        self.focus = DialogFocus::Button(NewPostButton::Post);
    }

    /// Move along the button row, clamped at both ends
    pub fn move_button(&mut self, delta: isize) {
        let DialogFocus::Button(current) = self.focus else {
            return;
        };
        let last = NewPostButton::ALL.len() as isize - 1;
        let next = (current.position() as isize + delta).clamp(0, last) as usize;
        self.focus = DialogFocus::Button(NewPostButton::ALL[next]);
    }

    /// Trimmed post text
    pub fn content(&self) -> &str {
        self.body.text().trim()
    }
}

impl Panel for NewPostDialog {
    fn id(&self) -> PanelId {
        PanelId::NewPost
    }

    fn text_input(&mut self) -> Option<&mut TextInput> {
        Some(&mut self.body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteChoice {
    Yes,
    #[default]
    Cancel,
}

/// Confirmation before deleting a draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteDraftDialog {
    index: usize,
    preview: String,
    choice: DeleteChoice,
}

impl DeleteDraftDialog {
    /// `index` is the storage index of the draft
    pub fn new(index: usize, preview: &str) -> Self {
        Self {
            index,
            preview: preview.chars().take(60).collect(),
            choice: DeleteChoice::default(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn preview(&self) -> &str {
        &self.preview
    }

    pub fn choice(&self) -> DeleteChoice {
        self.choice
    }

    pub fn choose(&mut self, choice: DeleteChoice) {
        self.choice = choice;
    }
}

impl Panel for DeleteDraftDialog {
    fn id(&self) -> PanelId {
        PanelId::DeleteDraft
    }
}
