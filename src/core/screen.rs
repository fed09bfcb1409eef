//! Screen names and the screen switch state machine

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use super::mode::PanelId;

/// Default guard hold after a mount, letting its focus request land
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Top-level, mutually exclusive views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenName {
    Timeline,
    Discover,
    Notifications,
    Messages,
    Settings,
    Profile,
    Drafts,
    UserProfile,
}

impl ScreenName {
    pub const ALL: [ScreenName; 8] = [
        ScreenName::Timeline,
        ScreenName::Discover,
        ScreenName::Notifications,
        ScreenName::Messages,
        ScreenName::Settings,
        ScreenName::Profile,
        ScreenName::Drafts,
        ScreenName::UserProfile,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenName::Timeline => "timeline",
            ScreenName::Discover => "discover",
            ScreenName::Notifications => "notifications",
            ScreenName::Messages => "messages",
            ScreenName::Settings => "settings",
            ScreenName::Profile => "profile",
            ScreenName::Drafts => "drafts",
            ScreenName::UserProfile => "user_profile",
        }
    }

    /// Screens reachable by number (`1`-`5`)
    pub fn from_number(n: u32) -> Option<Self> {
        match n {
            1 => Some(ScreenName::Timeline),
            2 => Some(ScreenName::Discover),
            3 => Some(ScreenName::Notifications),
            4 => Some(ScreenName::Messages),
            5 => Some(ScreenName::Settings),
            _ => None,
        }
    }

    /// Panel focused after this screen mounts
    pub fn primary_panel(&self) -> PanelId {
        match self {
            ScreenName::Timeline => PanelId::TimelineFeed,
            ScreenName::Discover => PanelId::DiscoverFeed,
            ScreenName::Notifications => PanelId::Notifications,
            ScreenName::Messages => PanelId::Chat,
            ScreenName::Settings => PanelId::Settings,
            ScreenName::Profile => PanelId::Profile,
            ScreenName::Drafts => PanelId::Drafts,
            ScreenName::UserProfile => PanelId::UserProfile,
        }
    }

    /// Entry highlighted in the top navigation bar
    pub fn nav_highlight(&self) -> ScreenName {
        match self {
            ScreenName::UserProfile => ScreenName::Discover,
            other => *other,
        }
    }
}

impl fmt::Display for ScreenName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScreenName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScreenName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| format!("unknown screen '{}'", s))
    }
}

/// Arguments passed to a screen factory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenParams {
    /// User for `user_profile`, or DM partner for `messages`
    pub username: Option<String>,
    /// Remount even when already on the requested screen
    pub reload: bool,
}

impl ScreenParams {
    pub fn user(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            reload: false,
        }
    }

    pub fn reload() -> Self {
        Self {
            username: None,
            reload: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_none() && !self.reload
    }
}

/// Phase of the switch guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchPhase {
    /// No switch in flight
    Idle,
    /// New screen mounted, focus request waiting for the next render
    AwaitingFocus,
    /// Focus landed; guard held until the settle deadline
    Settling { until: Instant },
}

/// Why a switch request was dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchRejected {
    InFlight,
    SameScreen,
    UnknownScreen(String),
}

/// Guards screen transitions.
///
/// The first request wins; requests arriving while the guard is held are
/// dropped, never queued.
#[derive(Debug)]
pub struct ScreenSwitcher {
    current: ScreenName,
    params: ScreenParams,
    phase: SwitchPhase,
    settle: Duration,
    mounts: u64,
}

impl ScreenSwitcher {
    pub fn new(initial: ScreenName, settle: Duration) -> Self {
        Self {
            current: initial,
            params: ScreenParams::default(),
            phase: SwitchPhase::Idle,
            settle,
            mounts: 0,
        }
    }

    pub fn current(&self) -> ScreenName {
        self.current
    }

    pub fn params(&self) -> &ScreenParams {
        &self.params
    }

    pub fn phase(&self) -> SwitchPhase {
        self.phase
    }

    pub fn is_switching(&self) -> bool {
        self.phase != SwitchPhase::Idle
    }

    /// Number of screens mounted so far
    pub fn mount_count(&self) -> u64 {
        self.mounts
    }

    /// Decide whether a switch to `name` may proceed, taking the guard if so
    pub fn begin(
        &mut self,
        name: &str,
        params: &ScreenParams,
    ) -> Result<ScreenName, SwitchRejected> {
        if self.is_switching() {
            return Err(SwitchRejected::InFlight);
        }
        let target = name
            .parse::<ScreenName>()
            .map_err(|_| SwitchRejected::UnknownScreen(name.to_string()))?;
        if target == self.current && params.is_empty() {
            return Err(SwitchRejected::SameScreen);
        }
        self.phase = SwitchPhase::AwaitingFocus;
        Ok(target)
    }

    /// Record the initial mount at startup. Takes the guard like a switch.
    pub fn begin_initial(&mut self) {
        self.phase = SwitchPhase::AwaitingFocus;
    }

    /// The new screen has been constructed and installed
    pub fn mounted(&mut self, name: ScreenName, params: ScreenParams) {
        self.current = name;
        self.params = params;
        self.mounts += 1;
    }

    /// After-render hook. Returns the panel to focus if a mount is waiting
    /// for it, and starts the settle delay.
    pub fn take_focus_request(&mut self, now: Instant) -> Option<PanelId> {
        if self.phase != SwitchPhase::AwaitingFocus {
            return None;
        }
        self.phase = SwitchPhase::Settling {
            until: now + self.settle,
        };
        Some(self.current.primary_panel())
    }

    /// Release the guard once the settle delay has elapsed
    pub fn tick(&mut self, now: Instant) {
        if let SwitchPhase::Settling { until } = self.phase {
            if now >= until {
                self.phase = SwitchPhase::Idle;
            }
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self.phase {
            SwitchPhase::Settling { until } => Some(until),
            _ => None,
        }
    }
}
