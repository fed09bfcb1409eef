//! Application module
//!
//! This module contains the application object, configuration,
//! rendering and the event loop for tuitter.

mod config;
mod config_file;
mod controller;
mod event_loop;
mod render;

pub use config::{exit_code, BackendChoice, CliArgs, Config, BACKEND_TOKEN_ENV, BACKEND_URL_ENV};
pub use config_file::ConfigFile;
pub use controller::{App, Overlay};
pub use event_loop::run_app;
pub use render::{content_rows, render_frame, RenderContext};
