//! tuitter - A vim-style terminal social network client

use std::io::stdout;
use std::process::ExitCode;

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use tuitter::app::{exit_code, run_app, App, BackendChoice, Config};
use tuitter::backend::{Backend, FakeBackend, HttpBackend};
use tuitter::handler::KeyBindingRegistry;
use tuitter::logging;

fn main() -> ExitCode {
    // Parse config first to return INVALID exit code for argument errors
    let config = match Config::from_args() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(exit_code::INVALID as u8);
        }
    };

    // Logging is optional; the UI runs without it
    if let Some(path) = config.log_file.clone().or_else(logging::default_log_path) {
        if let Err(e) = logging::init(&path, &config.log_level) {
            eprintln!("Warning: logging disabled: {}", e);
        }
    }

    match run_with_config(config) {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            tracing::error!(error = %e, "fatal error");
            eprintln!("Error: {}", e);
            ExitCode::from(exit_code::ERROR as u8)
        }
    }
}

fn connect(choice: &BackendChoice) -> anyhow::Result<Box<dyn Backend>> {
    match choice {
        BackendChoice::Fake => {
            tracing::info!("using in-memory demo backend");
            Ok(Box::new(FakeBackend::new()))
        }
        BackendChoice::Http {
            url,
            token,
            timeout,
        } => {
            tracing::info!(%url, authenticated = token.is_some(), "using REST backend");
            Ok(Box::new(HttpBackend::new(url, token.clone(), *timeout)?))
        }
    }
}

fn run_with_config(config: Config) -> anyhow::Result<i32> {
    let backend = connect(&config.backend)?;
    let mut app = App::with_registry(backend, &config, KeyBindingRegistry::from_file());

    // Initialize terminal
    terminal::enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        cursor::Show
    )?;

    let code = result?;
    tracing::info!(code, "tuitter exiting");
    Ok(code)
}
