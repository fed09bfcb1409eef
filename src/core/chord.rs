//! Repeated-key chord detection ("gg")

use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::mode::PanelId;

/// Default window between the two presses of a chord
pub const DEFAULT_CHORD_WINDOW: Duration = Duration::from_millis(500);

/// Result of feeding one key press to the recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordOutcome {
    /// First press recorded, waiting for the second
    Pending,
    /// Second press landed inside the window
    Fired,
}

/// Tracks the last "g" press per panel.
///
/// State is keyed by panel so a press on one panel never completes a chord
/// started on another.
#[derive(Debug)]
pub struct ChordRecognizer {
    window: Duration,
    last_press: HashMap<PanelId, Instant>,
}

impl Default for ChordRecognizer {
    fn default() -> Self {
        Self::new(DEFAULT_CHORD_WINDOW)
    }
}

impl ChordRecognizer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_press: HashMap::new(),
        }
    }

    /// Feed a press on `panel` at `now`.
    ///
    /// A stale previous press is discarded and this press opens a new window.
    pub fn press(&mut self, panel: PanelId, now: Instant) -> ChordOutcome {
        match self.last_press.get(&panel) {
            Some(&at) if now.saturating_duration_since(at) < self.window => {
                self.last_press.remove(&panel);
                ChordOutcome::Fired
            }
            _ => {
                self.last_press.insert(panel, now);
                ChordOutcome::Pending
            }
        }
    }

    /// Whether `panel` has a press waiting for its partner
    pub fn is_pending(&self, panel: PanelId, now: Instant) -> bool {
        self.last_press
            .get(&panel)
            .is_some_and(|&at| now.saturating_duration_since(at) < self.window)
    }

    /// Drop chord state for a panel that is being unmounted
    pub fn forget(&mut self, panel: PanelId) {
        self.last_press.remove(&panel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_press_inside_window_fires() {
        let mut chord = ChordRecognizer::default();
        let t0 = Instant::now();
        assert_eq!(chord.press(PanelId::TimelineFeed, t0), ChordOutcome::Pending);
        assert_eq!(
            chord.press(PanelId::TimelineFeed, t0 + Duration::from_millis(200)),
            ChordOutcome::Fired
        );
        assert!(!chord.is_pending(PanelId::TimelineFeed, t0 + Duration::from_millis(210)));
    }

    #[test]
    fn test_stale_press_starts_new_window() {
        let mut chord = ChordRecognizer::default();
        let t0 = Instant::now();
        chord.press(PanelId::TimelineFeed, t0);
        let late = t0 + Duration::from_millis(700);
        assert_eq!(chord.press(PanelId::TimelineFeed, late), ChordOutcome::Pending);
        // The late press opened a fresh window
        assert_eq!(
            chord.press(PanelId::TimelineFeed, late + Duration::from_millis(100)),
            ChordOutcome::Fired
        );
    }

    #[test]
    fn test_chord_state_is_per_panel() {
        let mut chord = ChordRecognizer::default();
        let t0 = Instant::now();
        chord.press(PanelId::TimelineFeed, t0);
        assert_eq!(
            chord.press(PanelId::DiscoverFeed, t0 + Duration::from_millis(50)),
            ChordOutcome::Pending
        );
        assert_eq!(
            chord.press(PanelId::TimelineFeed, t0 + Duration::from_millis(100)),
            ChordOutcome::Fired
        );
    }

    #[test]
    fn test_third_press_after_fire_is_pending() {
        let mut chord = ChordRecognizer::default();
        let t0 = Instant::now();
        chord.press(PanelId::Drafts, t0);
        chord.press(PanelId::Drafts, t0 + Duration::from_millis(10));
        assert_eq!(
            chord.press(PanelId::Drafts, t0 + Duration::from_millis(20)),
            ChordOutcome::Pending
        );
    }

    #[test]
    fn test_forget_clears_pending() {
        let mut chord = ChordRecognizer::default();
        let t0 = Instant::now();
        chord.press(PanelId::Chat, t0);
        chord.forget(PanelId::Chat);
        assert_eq!(
            chord.press(PanelId::Chat, t0 + Duration::from_millis(10)),
            ChordOutcome::Pending
        );
    }
}
