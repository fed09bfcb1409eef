//! Conversation list and chat view

use crate::backend::{Conversation, Message};
use crate::core::{Navigable, PanelId};

use super::{ListPanel, Panel, PanelTuning, TextInput};

/// One open conversation plus the message input
pub struct ChatPanel {
    conversation_id: Option<String>,
    partner: Option<String>,
    messages: ListPanel<Message>,
    input: TextInput,
}

impl ChatPanel {
    pub fn new(tuning: &PanelTuning) -> Self {
        Self {
            conversation_id: None,
            partner: None,
            messages: ListPanel::new(PanelId::Chat, Vec::new(), tuning).with_row_height(2),
            input: TextInput::new("Type a message..."),
        }
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    pub fn partner(&self) -> Option<&str> {
        self.partner.as_deref()
    }

    pub fn messages(&self) -> &ListPanel<Message> {
        &self.messages
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    /// Show `messages` for a conversation, latest in view
    pub fn open(&mut self, conversation_id: &str, partner: &str, messages: Vec<Message>) {
        self.conversation_id = Some(conversation_id.to_string());
        self.partner = Some(partner.to_string());
        self.messages.replace_all(messages);
        self.messages.move_to_bottom();
        self.input.clear();
    }

    pub fn set_viewport_rows(&mut self, rows: usize) {
        self.messages.set_viewport_rows(rows);
    }

    /// Append a message that was just sent
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
        self.messages.move_to_bottom();
    }

    /// Take the typed message, if there is one and a conversation is open
    pub fn take_draft(&mut self) -> Option<(String, String)> {
        if self.input.is_blank() {
            return None;
        }
        let id = self.conversation_id.clone()?;
        Some((id, self.input.take()))
    }
}

impl Panel for ChatPanel {
    fn id(&self) -> PanelId {
        PanelId::Chat
    }

    fn navigable(&mut self) -> Option<&mut dyn Navigable> {
        Some(&mut self.messages)
    }

    fn text_input(&mut self) -> Option<&mut TextInput> {
        Some(&mut self.input)
    }

    fn scroll(&mut self, delta: isize) {
        self.messages.scroll(delta);
    }
}

/// The messages screen: conversations on the left, chat on the right
pub struct MessagesView {
    pub conversations: ListPanel<Conversation>,
    pub chat: ChatPanel,
}

impl MessagesView {
    pub fn new(conversations: Vec<Conversation>, tuning: &PanelTuning) -> Self {
        Self {
            conversations: ListPanel::new(PanelId::Conversations, conversations, tuning)
                .with_row_height(2),
            chat: ChatPanel::new(tuning),
        }
    }

    pub fn selected_conversation(&self) -> Option<&Conversation> {
        self.conversations.selected()
    }

    /// Mark a conversation read and refresh its preview
    pub fn conversation_updated(&mut self, id: &str, preview: Option<&str>) {
        self.conversations.update_where(
            |c| c.id == id,
            |c| {
                c.unread = false;
                if let Some(text) = preview {
                    c.last_message = text.to_string();
                }
            },
        );
    }
}
