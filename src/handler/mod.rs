//! Handler module - Input event handling

pub mod action;
pub mod command;
pub mod key;
pub mod keymap;
pub mod mouse;

pub use action::{handle_action, ActionResult};
pub use command::{parse_command, Command};
pub use key::{
    handle_command_key, handle_insert_key, handle_normal_key, printable, route_for,
    update_input_buffer, CommandKey, InsertKey, KeyAction,
};
pub use keymap::{key_event_to_string, KeyBindingRegistry, KeymapFile};
pub use mouse::{handle_mouse_event, MouseAction};
