//! Local draft storage
//!
//! Drafts live in a JSON array sorted oldest first. The store is capped;
//! saving past the cap drops the oldest draft. Command-line indices
//! (`:o1`, `:x2`) address this storage order.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TuitterError};

pub const DEFAULT_MAX_DRAFTS: usize = 5;
const DRAFTS_FILE: &str = ".tuitter_drafts.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub content: String,
    #[serde(default)]
    pub attachments: Vec<String>,
    pub timestamp: DateTime<Local>,
}

/// JSON-file draft store
#[derive(Debug, Clone)]
pub struct DraftStore {
    path: PathBuf,
    max_drafts: usize,
}

impl DraftStore {
    pub fn new(path: impl Into<PathBuf>, max_drafts: usize) -> Self {
        Self {
            path: path.into(),
            max_drafts: max_drafts.max(1),
        }
    }

    /// `~/.tuitter_drafts.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(DRAFTS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All drafts, oldest first. A missing or unreadable file yields none.
    pub fn load(&self) -> Vec<Draft> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str::<Vec<Draft>>(&content) {
            Ok(mut drafts) => {
                drafts.sort_by_key(|d| d.timestamp);
                drafts
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable drafts file");
                Vec::new()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<Draft> {
        self.load().into_iter().nth(index)
    }

    /// Append a draft, dropping the oldest beyond the cap
    pub fn save(&self, content: &str, attachments: Vec<String>) -> Result<()> {
        let mut drafts = self.load();
        drafts.push(Draft {
            content: content.to_string(),
            attachments,
            timestamp: Local::now(),
        });
        if drafts.len() > self.max_drafts {
            let excess = drafts.len() - self.max_drafts;
            drafts.drain(..excess);
        }
        self.write(&drafts)
    }

    /// Delete by storage index (0-based, oldest first)
    pub fn delete(&self, index: usize) -> Result<Draft> {
        let mut drafts = self.load();
        if index >= drafts.len() {
            return Err(TuitterError::draft(
                &self.path,
                format!("no draft at index {}", index + 1),
            ));
        }
        let removed = drafts.remove(index);
        self.write(&drafts)?;
        Ok(removed)
    }

    fn write(&self, drafts: &[Draft]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(drafts)?)?;
        Ok(())
    }
}
