//! Core module - Navigation engine, modes, and screen state

pub mod chord;
pub mod cursor;
pub mod mode;
pub mod pagination;
pub mod screen;
pub mod state;
pub mod timer;

pub use chord::{ChordOutcome, ChordRecognizer};
pub use cursor::{Cursor, Heading, NavSteps, Navigable, Verb};
pub use mode::{AppMode, CommandBuffer, ModeController, PanelId};
pub use pagination::Paginator;
pub use screen::{ScreenName, ScreenParams, ScreenSwitcher, SwitchPhase, SwitchRejected};
pub use state::{AppState, Chrome};
pub use timer::{Debouncer, StatusLine};
