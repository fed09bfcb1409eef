//! Main event loop for the application

use std::io::Stdout;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::prelude::*;

use crate::app::exit_code;
use crate::handler::{handle_mouse_event, ActionResult};

use super::controller::App;
use super::render::{content_rows, render_frame, RenderContext};

/// Longest wait between frames when no timer is pending
const IDLE_POLL: Duration = Duration::from_millis(60);

/// Time until the next timer deadline, capped at [`IDLE_POLL`]
fn poll_timeout(deadline: Option<Instant>, now: Instant) -> Duration {
    deadline
        .map(|d| d.saturating_duration_since(now))
        .unwrap_or(IDLE_POLL)
        .min(IDLE_POLL)
}

/// Main event loop. Returns the exit code.
pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> anyhow::Result<i32> {
    loop {
        let size = terminal.size()?;
        app.set_content_rows(content_rows(size.height));

        terminal.draw(|frame| render_frame(frame, RenderContext::new(app)))?;
        app.after_render(Instant::now());

        let timeout = poll_timeout(app.next_deadline(), Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let ActionResult::Quit(code) = app.handle_key(key, Instant::now()) {
                        return Ok(code);
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(handle_mouse_event(mouse)),
                // Resize is picked up by the next frame
                _ => {}
            }
        }

        app.tick(Instant::now());
        if app.should_quit() {
            return Ok(exit_code::SUCCESS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_timeout_without_deadline_is_idle() {
        assert_eq!(poll_timeout(None, Instant::now()), IDLE_POLL);
    }

    #[test]
    fn test_poll_timeout_wakes_for_deadline() {
        let now = Instant::now();
        let timeout = poll_timeout(Some(now + Duration::from_millis(10)), now);
        assert_eq!(timeout, Duration::from_millis(10));
    }

    #[test]
    fn test_poll_timeout_past_deadline_is_zero() {
        let now = Instant::now();
        let timeout = poll_timeout(Some(now), now + Duration::from_millis(5));
        assert_eq!(timeout, Duration::ZERO);
    }

    #[test]
    fn test_poll_timeout_is_capped() {
        let now = Instant::now();
        let timeout = poll_timeout(Some(now + Duration::from_secs(3)), now);
        assert_eq!(timeout, IDLE_POLL);
    }
}
