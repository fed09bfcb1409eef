//! Configuration file loading and parsing
//!
//! Loads configuration from `~/.config/tuitter/config.toml`

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::NavSteps;
use crate::panel::PanelTuning;

/// Main configuration file structure
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Backend selection
    pub backend: BackendConfig,
    /// Cursor and pagination tuning
    pub navigation: NavigationConfig,
    /// Feed fetch sizes
    pub feed: FeedConfig,
    /// Timer lengths
    pub timing: TimingConfig,
    /// Local draft storage
    pub drafts: DraftsConfig,
    /// Log file and level
    pub logging: LoggingConfig,
}

/// Backend settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// REST API base URL; the in-memory backend is used when unset
    pub url: Option<String>,
    /// Bearer token sent with every request
    pub token: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            timeout_secs: 5,
        }
    }
}

/// Navigation settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Window for the `gg` chord in milliseconds
    pub chord_timeout_ms: u64,
    /// Items moved by ctrl+d / ctrl+u
    pub half_page: usize,
    /// Items moved by w / b
    pub word: usize,
    /// Cursor distance from the loaded edge that loads the next batch
    pub load_proximity: usize,
    /// Hidden items below the viewport that load the next batch on scroll
    pub scroll_threshold: usize,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            chord_timeout_ms: 500,
            half_page: 5,
            word: 3,
            load_proximity: 5,
            scroll_threshold: 3,
        }
    }
}

/// Feed settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Items materialized per batch
    pub batch_size: usize,
    /// Posts requested from the backend per feed
    pub fetch_limit: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            batch_size: 20,
            fetch_limit: 50,
        }
    }
}

/// Timer settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub search_debounce_ms: u64,
    pub status_clear_ms: u64,
    /// Delay before another screen switch is accepted
    pub switch_settle_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: 300,
            status_clear_ms: 3000,
            switch_settle_ms: 100,
        }
    }
}

/// Draft storage settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DraftsConfig {
    /// Drafts file; `~/.tuitter_drafts.json` when unset
    pub path: Option<PathBuf>,
    pub max_drafts: usize,
}

impl Default for DraftsConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_drafts: crate::drafts::DEFAULT_MAX_DRAFTS,
        }
    }
}

/// Logging settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `TUITTER_LOG` is unset
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl ConfigFile {
    /// Get the config directory path (~/.config/tuitter)
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tuitter"))
    }

    /// Get the config file path (~/.config/tuitter/config.toml)
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.toml"))
    }

    /// Load configuration from the default location
    ///
    /// Returns default config if file doesn't exist or can't be parsed
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_or_default(&path),
            _ => Self::default(),
        }
    }

    /// Load from `path`, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
            Self::default()
        })
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ConfigFile = toml::from_str(&content)?;
        Ok(config)
    }

    /// Panel knobs derived from `[navigation]`, `[feed]` and `[timing]`
    pub fn tuning(&self) -> PanelTuning {
        PanelTuning {
            steps: NavSteps {
                word: self.navigation.word.max(1),
                half_page: self.navigation.half_page.max(1),
            },
            batch_size: self.feed.batch_size.max(1),
            load_proximity: self.navigation.load_proximity,
            scroll_threshold: self.navigation.scroll_threshold,
            search_debounce: Duration::from_millis(self.timing.search_debounce_ms),
        }
    }
}
