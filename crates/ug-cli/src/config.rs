//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use ug_core::{DEFAULT_ROW_HEIGHT, Locale, ViewMode};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the JSON Lines events file.
    pub events_path: PathBuf,

    /// Vertical distance per hour on the timeline.
    pub row_height: f64,

    /// Language for labels and day headers.
    pub locale: Locale,

    /// View used when `--view` is not given.
    pub default_view: ViewMode,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("events_path", &self.events_path)
            .field("row_height", &self.row_height)
            .field("locale", &self.locale)
            .field("default_view", &self.default_view.as_str())
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            events_path: data_dir.join("events.jsonl"),
            row_height: DEFAULT_ROW_HEIGHT,
            locale: Locale::default(),
            default_view: ViewMode::default(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (UG_*)
        figment = figment.merge(Env::prefixed("UG_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for ug.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("ug"))
}

/// Returns the platform-specific data directory for ug.
///
/// On Linux: `~/.local/share/ug`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("ug"))
}
