//! Deadline-based timers driven by the event loop

use std::time::{Duration, Instant};

/// Default search debounce
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);
/// Default lifetime of a status message
pub const DEFAULT_STATUS_TTL: Duration = Duration::from_secs(3);

/// A single pending deadline. Restarting replaces it; timers never stack.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn restart(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns true exactly once when the deadline has passed
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(at) if now >= at => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Status line message with auto-clear
#[derive(Debug, Clone)]
pub struct StatusLine {
    message: Option<String>,
    expires: Option<Instant>,
    ttl: Duration,
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new(DEFAULT_STATUS_TTL)
    }
}

impl StatusLine {
    pub fn new(ttl: Duration) -> Self {
        Self {
            message: None,
            expires: None,
            ttl,
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn set(&mut self, msg: impl Into<String>, now: Instant) {
        self.message = Some(msg.into());
        self.expires = Some(now + self.ttl);
    }

    pub fn clear(&mut self) {
        self.message = None;
        self.expires = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.expires
    }

    pub fn tick(&mut self, now: Instant) {
        if self.expires.is_some_and(|at| now >= at) {
            self.clear();
        }
    }
}

/// Earliest of a set of optional deadlines
pub fn earliest(deadlines: impl IntoIterator<Item = Option<Instant>>) -> Option<Instant> {
    deadlines.into_iter().flatten().min()
}
