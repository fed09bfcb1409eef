//! Render module - UI rendering

pub mod chrome;
pub mod feed;
pub mod popup;
pub mod theme;

pub use chrome::{render_footer, render_header, render_nav, render_status_bar};
pub use feed::render_screen;
pub use popup::render_overlay;
