// src/config.rs
use anyhow::{Context as _, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const CONFIG_FILE: &str = ".vstat.toml";

/// Per-vault settings read from `.vstat.toml`.
///
/// Every field is optional in the file; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Show every enabled statistic at once instead of one focused item.
    pub display_individual_items: bool,
    pub show_notes: bool,
    pub show_attachments: bool,
    pub show_files: bool,
    pub show_links: bool,
    pub show_words: bool,
    pub show_size: bool,
    /// Milliseconds between backlog drains in watch mode.
    pub drain_interval_ms: u64,
    /// Extensions counted as notes, without the leading dot.
    pub note_extensions: Vec<String>,
    /// Directory names never entered.
    pub exclude: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display_individual_items: false,
            show_notes: false,
            show_attachments: false,
            show_files: false,
            show_links: false,
            show_words: false,
            show_size: false,
            drain_interval_ms: 2000,
            note_extensions: vec!["md".to_owned()],
            exclude: vec![".git".to_owned()],
        }
    }
}

impl Settings {
    /// Loads settings for the vault at `root`.
    ///
    /// An explicit path must exist. Otherwise `<root>/.vstat.toml` is read
    /// when present and defaults are used when it is not.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file cannot be read or parsed.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let path: PathBuf = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = root.join(CONFIG_FILE);
                if !path.is_file() {
                    debug!(root = %root.display(), "no settings file, using defaults");
                    return Ok(Self::default());
                }
                path
            }
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;
        let settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings: {}", path.display()))?;
        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    #[inline]
    #[must_use]
    pub const fn drain_interval(&self) -> Duration {
        Duration::from_millis(self.drain_interval_ms)
    }
}
