//! Editable text field

use crossterm::event::{KeyCode, KeyEvent};

use crate::handler::update_input_buffer;

/// A text buffer with a byte-offset cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    buffer: String,
    cursor: usize,
    multiline: bool,
    placeholder: &'static str,
}

impl TextInput {
    pub fn new(placeholder: &'static str) -> Self {
        Self {
            placeholder,
            ..Self::default()
        }
    }

    /// Enter inserts a newline instead of submitting
    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    pub fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn is_blank(&self) -> bool {
        self.buffer.trim().is_empty()
    }

    pub fn set_text(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.cursor = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Take the content, leaving the field empty
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.buffer)
    }

    /// Apply an editing key. Returns true if the buffer or cursor changed.
    pub fn apply_key(&mut self, key: KeyEvent) -> bool {
        if self.multiline && key.code == KeyCode::Enter {
            self.buffer.insert(self.cursor, '\n');
            self.cursor += 1;
            return true;
        }
        match update_input_buffer(key, &self.buffer, self.cursor) {
            Some((buffer, cursor)) => {
                self.buffer = buffer;
                self.cursor = cursor;
                true
            }
            None => false,
        }
    }
}
