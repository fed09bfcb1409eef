//! Mouse input handling
//!
//! Only the wheel is used: it scrolls the focused panel's viewport without
//! moving its cursor.

use crossterm::event::{MouseEvent, MouseEventKind};

/// Items scrolled per wheel notch
pub const WHEEL_STEP: usize = 3;

/// Actions triggered by mouse events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    None,
    ScrollUp(usize),
    ScrollDown(usize),
}

/// Process a mouse event and return the resulting action
pub fn handle_mouse_event(event: MouseEvent) -> MouseAction {
    match event.kind {
        MouseEventKind::ScrollUp => MouseAction::ScrollUp(WHEEL_STEP),
        MouseEventKind::ScrollDown => MouseAction::ScrollDown(WHEEL_STEP),
        _ => MouseAction::None,
    }
}
