//! Keymap configuration and registry
//!
//! Loads key bindings from `~/.config/tuitter/keymap.toml`:
//!
//! ```toml
//! [normal]
//! "J" = "half_page_down"
//! "ctrl+n" = "show_notifications"
//! ```

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use super::key::KeyAction;
use crate::app::ConfigFile;
use crate::core::{Heading, ScreenName, Verb};

/// Keymap configuration file structure
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct KeymapFile {
    /// Key bindings for normal mode
    pub normal: HashMap<String, String>,
}

impl KeymapFile {
    /// Get the keymap file path (~/.config/tuitter/keymap.toml)
    pub fn keymap_path() -> Option<PathBuf> {
        ConfigFile::config_dir().map(|p| p.join("keymap.toml"))
    }

    /// Load keymap from file
    pub fn load() -> Self {
        Self::keymap_path()
            .and_then(|path| {
                if path.exists() {
                    fs::read_to_string(&path).ok()
                } else {
                    None
                }
            })
            .and_then(|content| match toml::from_str(&content) {
                Ok(keymap) => Some(keymap),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring unparsable keymap.toml");
                    None
                }
            })
            .unwrap_or_default()
    }
}

/// Key binding registry for dynamic key dispatch
pub struct KeyBindingRegistry {
    /// Normal mode bindings: key_str -> action_name
    normal: HashMap<String, String>,
}

impl Default for KeyBindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindingRegistry {
    /// Create a new registry with default bindings
    pub fn new() -> Self {
        let mut registry = Self {
            normal: HashMap::new(),
        };
        registry.load_defaults();
        registry
    }

    /// Load registry from keymap file, merging with defaults
    pub fn from_file() -> Self {
        Self::with_keymap(KeymapFile::load())
    }

    /// Merge user bindings over the defaults
    pub fn with_keymap(keymap: KeymapFile) -> Self {
        let mut registry = Self::new();
        for (key, action) in keymap.normal {
            if parse_normal_action(&action).is_none() {
                tracing::warn!(key, action, "unknown action in keymap.toml");
                continue;
            }
            registry.normal.insert(key, action);
        }
        registry
    }

    /// Load default key bindings
    fn load_defaults(&mut self) {
        let normal = &mut self.normal;
        normal.insert("q".to_string(), "quit".to_string());
        normal.insert("j".to_string(), "move_down".to_string());
        normal.insert("down".to_string(), "move_down".to_string());
        normal.insert("k".to_string(), "move_up".to_string());
        normal.insert("up".to_string(), "move_up".to_string());
        normal.insert("g".to_string(), "chord_top".to_string());
        normal.insert("G".to_string(), "move_to_bottom".to_string());
        normal.insert("ctrl+d".to_string(), "half_page_down".to_string());
        normal.insert("ctrl+u".to_string(), "half_page_up".to_string());
        normal.insert("w".to_string(), "word_forward".to_string());
        normal.insert("b".to_string(), "word_back".to_string());
        normal.insert("h".to_string(), "left".to_string());
        normal.insert("left".to_string(), "left".to_string());
        normal.insert("l".to_string(), "right".to_string());
        normal.insert("right".to_string(), "right".to_string());
        normal.insert("i".to_string(), "insert".to_string());
        normal.insert(":".to_string(), "command".to_string());
        normal.insert("/".to_string(), "command".to_string());
        normal.insert("1".to_string(), "show_timeline".to_string());
        normal.insert("2".to_string(), "show_discover".to_string());
        normal.insert("3".to_string(), "show_notifications".to_string());
        normal.insert("4".to_string(), "show_messages".to_string());
        normal.insert("5".to_string(), "show_settings".to_string());
        normal.insert("p".to_string(), "show_profile".to_string());
        normal.insert("d".to_string(), "show_drafts".to_string());
        normal.insert("0".to_string(), "focus_main".to_string());
        normal.insert("6".to_string(), "focus_conversations".to_string());
        normal.insert("enter".to_string(), "activate".to_string());
        normal.insert("esc".to_string(), "back".to_string());
    }

    /// Look up action for a key event in normal mode
    pub fn lookup_normal(&self, key: &KeyEvent) -> Option<KeyAction> {
        let key_str = key_event_to_string(key);
        let action = self.normal.get(&key_str)?;
        match parse_normal_action(action)? {
            // The command line is seeded with the key that opened it
            KeyAction::StartCommand(_) => match key.code {
                KeyCode::Char(c) => Some(KeyAction::StartCommand(c)),
                _ => Some(KeyAction::StartCommand(':')),
            },
            other => Some(other),
        }
    }
}

/// Convert a KeyEvent to a string representation
pub fn key_event_to_string(key: &KeyEvent) -> String {
    let mut parts = Vec::new();

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("ctrl");
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        parts.push("alt");
    }
    if key.modifiers.contains(KeyModifiers::SHIFT) {
        // Only add shift for non-character keys or when combined with ctrl/alt
        if !matches!(key.code, KeyCode::Char(_)) || !parts.is_empty() {
            parts.push("shift");
        }
    }

    let key_name = match key.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::F(n) => format!("f{}", n),
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::PageUp => "pageup".to_string(),
        KeyCode::PageDown => "pagedown".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::Delete => "delete".to_string(),
        KeyCode::Esc => "esc".to_string(),
        _ => return String::new(),
    };

    if parts.is_empty() {
        key_name
    } else {
        parts.push(&key_name);
        parts.join("+")
    }
}

/// Parse normal mode action string to KeyAction
fn parse_normal_action(action: &str) -> Option<KeyAction> {
    match action {
        "quit" => Some(KeyAction::Quit),
        "move_down" => Some(KeyAction::Nav(Verb::Down)),
        "move_up" => Some(KeyAction::Nav(Verb::Up)),
        "move_to_top" => Some(KeyAction::Nav(Verb::Top)),
        "move_to_bottom" => Some(KeyAction::Nav(Verb::Bottom)),
        "chord_top" => Some(KeyAction::ChordTop),
        "half_page_down" => Some(KeyAction::Nav(Verb::HalfPage(Heading::Down))),
        "half_page_up" => Some(KeyAction::Nav(Verb::HalfPage(Heading::Up))),
        "word_forward" => Some(KeyAction::Nav(Verb::Word(Heading::Down))),
        "word_back" => Some(KeyAction::Nav(Verb::Word(Heading::Up))),
        "left" => Some(KeyAction::Left),
        "right" => Some(KeyAction::Right),
        "insert" => Some(KeyAction::EnterInsert),
        "command" => Some(KeyAction::StartCommand(':')),
        "focus_main" => Some(KeyAction::FocusMain),
        "focus_conversations" => Some(KeyAction::FocusConversations),
        "activate" => Some(KeyAction::Activate),
        "back" => Some(KeyAction::Back),
        _ => action
            .strip_prefix("show_")
            .and_then(|name| name.parse::<ScreenName>().ok())
            .map(KeyAction::Show),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_event_to_string_simple() {
        let key = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::empty());
        assert_eq!(key_event_to_string(&key), "j");
    }

    #[test]
    fn test_key_event_to_string_uppercase() {
        let key = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(key_event_to_string(&key), "G");
    }

    #[test]
    fn test_key_event_to_string_ctrl() {
        let key = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(key_event_to_string(&key), "ctrl+d");
    }

    #[test]
    fn test_key_event_to_string_special() {
        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::empty());
        assert_eq!(key_event_to_string(&key), "enter");

        let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::empty());
        assert_eq!(key_event_to_string(&key), "esc");
    }

    #[test]
    fn test_default_registry() {
        let registry = KeyBindingRegistry::new();
        assert!(registry.normal.contains_key("j"));
        assert!(registry.normal.contains_key("ctrl+u"));
    }

    #[test]
    fn test_lookup_verbs() {
        let registry = KeyBindingRegistry::new();
        let key = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::empty());
        assert_eq!(registry.lookup_normal(&key), Some(KeyAction::Nav(Verb::Down)));
        let key = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(
            registry.lookup_normal(&key),
            Some(KeyAction::Nav(Verb::HalfPage(Heading::Up)))
        );
        let key = KeyEvent::new(KeyCode::Char('g'), KeyModifiers::empty());
        assert_eq!(registry.lookup_normal(&key), Some(KeyAction::ChordTop));
    }

    #[test]
    fn test_command_seeded_with_key() {
        let registry = KeyBindingRegistry::new();
        let key = KeyEvent::new(KeyCode::Char('/'), KeyModifiers::empty());
        assert_eq!(registry.lookup_normal(&key), Some(KeyAction::StartCommand('/')));
    }

    #[test]
    fn test_screen_bindings() {
        let registry = KeyBindingRegistry::new();
        let key = KeyEvent::new(KeyCode::Char('4'), KeyModifiers::empty());
        assert_eq!(
            registry.lookup_normal(&key),
            Some(KeyAction::Show(ScreenName::Messages))
        );
        let key = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::empty());
        assert_eq!(
            registry.lookup_normal(&key),
            Some(KeyAction::Show(ScreenName::Drafts))
        );
    }

    #[test]
    fn test_keymap_file_parse() {
        let toml_content = r#"
[normal]
"x" = "quit"
"ctrl+n" = "show_notifications"
"#;
        let keymap: KeymapFile = toml::from_str(toml_content).unwrap();
        assert_eq!(keymap.normal.get("x"), Some(&"quit".to_string()));
        let registry = KeyBindingRegistry::with_keymap(keymap);
        let key = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL);
        assert_eq!(
            registry.lookup_normal(&key),
            Some(KeyAction::Show(ScreenName::Notifications))
        );
    }

    #[test]
    fn test_unknown_user_action_skipped() {
        let mut keymap = KeymapFile::default();
        keymap.normal.insert("j".to_string(), "teleport".to_string());
        let registry = KeyBindingRegistry::with_keymap(keymap);
        let key = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::empty());
        assert_eq!(registry.lookup_normal(&key), Some(KeyAction::Nav(Verb::Down)));
    }
}
