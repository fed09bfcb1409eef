//! Keyboard event handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::keymap::KeyBindingRegistry;
use crate::core::{AppMode, ScreenName, Verb};

/// Actions that can result from a key press in normal mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// No action needed
    None,
    /// Quit the application (or close the open overlay)
    Quit,
    /// Cursor verb for the focused panel
    Nav(Verb),
    /// First or second half of the "gg" chord
    ChordTop,
    /// Panel-local left (button/action selection)
    Left,
    /// Panel-local right
    Right,
    /// Enter insert mode on the focused panel's text field
    EnterInsert,
    /// Open the command line seeded with the trigger character
    StartCommand(char),
    /// Switch to a screen
    Show(ScreenName),
    /// Focus the primary panel of the current screen
    FocusMain,
    /// Focus the conversation list (messages screen)
    FocusConversations,
    /// Activate the item under the cursor
    Activate,
    /// Back out of the current context
    Back,
}

/// Key routed while the command line is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKey {
    Push(char),
    Backspace,
    Commit,
    Cancel,
    Ignore,
}

/// Key routed while a text field owns input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertKey {
    /// Leave insert mode
    Cancel,
    /// Submit the field (single-line fields only)
    Submit,
    /// Edit the buffer
    Edit,
}

/// Resolve a normal-mode key through the binding registry
pub fn handle_normal_key(registry: &KeyBindingRegistry, key: KeyEvent) -> KeyAction {
    registry.lookup_normal(&key).unwrap_or(KeyAction::None)
}

/// Route a key in command mode. Nothing here ever reaches a panel.
pub fn handle_command_key(key: KeyEvent) -> CommandKey {
    match key.code {
        KeyCode::Esc => CommandKey::Cancel,
        KeyCode::Enter => CommandKey::Commit,
        KeyCode::Backspace => CommandKey::Backspace,
        KeyCode::Char(c) if !has_control(key) => CommandKey::Push(c),
        _ => CommandKey::Ignore,
    }
}

/// Route a key in insert mode
pub fn handle_insert_key(key: KeyEvent, multiline: bool) -> InsertKey {
    match key.code {
        KeyCode::Esc => InsertKey::Cancel,
        KeyCode::Enter if !multiline => InsertKey::Submit,
        _ => InsertKey::Edit,
    }
}

/// Which router a key goes through
pub fn route_for(mode: AppMode) -> &'static str {
    match mode {
        AppMode::Normal => "normal",
        AppMode::Insert => "insert",
        AppMode::Command => "command",
    }
}

/// Printable key without control/alt modifiers
pub fn printable(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c) if !has_control(*key) => Some(c),
        _ => None,
    }
}

fn has_control(key: KeyEvent) -> bool {
    key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

/// Update input buffer based on key event.
/// `cursor` is a byte offset on a char boundary.
/// Returns the new buffer content, or None if no change
pub fn update_input_buffer(key: KeyEvent, buffer: &str, cursor: usize) -> Option<(String, usize)> {
    match key.code {
        KeyCode::Char(c) if !has_control(key) => {
            let mut new_buffer = buffer.to_string();
            new_buffer.insert(cursor, c);
            Some((new_buffer, cursor + c.len_utf8()))
        }
        KeyCode::Backspace => {
            let prev = prev_boundary(buffer, cursor)?;
            let mut new_buffer = buffer.to_string();
            new_buffer.remove(prev);
            Some((new_buffer, prev))
        }
        KeyCode::Delete => {
            if cursor < buffer.len() {
                let mut new_buffer = buffer.to_string();
                new_buffer.remove(cursor);
                Some((new_buffer, cursor))
            } else {
                None
            }
        }
        KeyCode::Left => prev_boundary(buffer, cursor).map(|prev| (buffer.to_string(), prev)),
        KeyCode::Right => {
            let next = buffer[cursor..].chars().next()?;
            Some((buffer.to_string(), cursor + next.len_utf8()))
        }
        KeyCode::Home => {
            if cursor > 0 {
                Some((buffer.to_string(), 0))
            } else {
                None
            }
        }
        KeyCode::End => {
            if cursor < buffer.len() {
                Some((buffer.to_string(), buffer.len()))
            } else {
                None
            }
        }
        _ => None,
    }
}

fn prev_boundary(buffer: &str, cursor: usize) -> Option<usize> {
    buffer[..cursor].char_indices().next_back().map(|(i, _)| i)
}
