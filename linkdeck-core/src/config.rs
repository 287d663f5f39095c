//! src/config.rs
//! ============================================================================
//! # Config: Application Configuration Loader and Saver
//!
//! Manages the user-editable settings of linkdeck. Settings are stored as
//! TOML in the platform config directory resolved by
//! [`directories`](https://docs.rs/directories).
//!
//! ## Features
//! - XDG-compliant config discovery and writing (Linux, macOS, Windows)
//! - Defaults written on first run
//! - Async load/save on Tokio
//! - All user-facing copy (confirmation prompt, placeholders) is configurable
//!
//! ## Example
//! ```rust,ignore
//! let config = Config::load(None).await?;
//! config.save_to(&Config::config_path()?).await?;
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use tokio::fs as TokioFs;

use crate::error::{AppError, AppResult};
use crate::logging::LoggerConfig;

/// Placeholder substituted with the link description in the confirm prompt.
pub const DESCRIPTION_PLACEHOLDER: &str = "{description}";

/// App theme (color scheme) selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Default,

    Light,
}

/// User-facing copy. Every string the directory view can show on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Confirmation shown before opening a described link.
    /// `{description}` is replaced with the link's description.
    pub confirm_template: String,

    /// Shown while the link list is being fetched.
    pub loading: String,

    /// Shown when the link list parsed but holds no entries.
    pub no_links: String,

    /// Shown when the active filter matches nothing.
    pub no_matches: String,

    /// Shown when the link list could not be fetched or parsed.
    pub load_error: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            confirm_template: "{description}\n\nContinue?".to_string(),
            loading: "Loading links…".to_string(),
            no_links: "No links configured.".to_string(),
            no_matches: "No matching links found.".to_string(),
            load_error:
                "Error loading the link list. Check that the file exists and is well-formed."
                    .to_string(),
        }
    }
}

impl PromptConfig {
    /// Build the confirmation text for a gated link.
    pub fn confirm_message(&self, description: &str) -> String {
        if self.confirm_template.contains(DESCRIPTION_PLACEHOLDER) {
            self.confirm_template
                .replace(DESCRIPTION_PLACEHOLDER, description)
        } else {
            format!("{description}\n\n{}", self.confirm_template)
        }
    }
}

/// Main configuration struct for the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Link list location: a path relative to the working directory or an
    /// `http(s)://` URL.
    pub source: String,

    pub theme: Theme,

    /// Check icon sources in the background and hide the ones that fail.
    pub probe_icons: bool,

    /// How long transient notifications stay on screen.
    #[serde(with = "humantime_serde")]
    pub notification_timeout: Duration,

    pub prompts: PromptConfig,

    pub logging: LoggerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: "config.json".to_string(),
            theme: Theme::Default,
            probe_icons: true,
            notification_timeout: Duration::from_secs(4),
            prompts: PromptConfig::default(),
            logging: LoggerConfig::default(),
        }
    }
}

impl Config {
    /// Loads config from `path`, or from the platform config dir when `None`.
    ///
    /// A missing file is created with the defaults. The default location is
    /// `$XDG_CONFIG_HOME/linkdeck/config.toml` on Linux, or the equivalent on
    /// Windows/macOS.
    pub async fn load(path: Option<&Path>) -> AppResult<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };
        Self::load_from(&path).await
    }

    pub async fn load_from(path: &Path) -> AppResult<Self> {
        if path.exists() {
            info!("Loading config from {}", path.display());
            let text = TokioFs::read_to_string(path)
                .await
                .map_err(|e| AppError::config_io(path, e))?;
            let cfg: Self = toml::from_str(&text)?;

            Ok(cfg)
        } else {
            info!(
                "No config file found at {}, using default configuration. Creating it now.",
                path.display()
            );

            let default_config = Self::default();
            default_config.save_to(path).await?;

            Ok(default_config)
        }
    }

    pub async fn save_to(&self, path: &Path) -> AppResult<()> {
        info!("Saving config to {}", path.display());

        if let Some(parent) = path.parent() {
            TokioFs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::config_io(parent, e))?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        TokioFs::write(path, toml_str)
            .await
            .map_err(|e| AppError::config_io(path, e))?;

        Ok(())
    }

    /// Returns the canonical config file path using `directories::ProjectDirs`.
    pub fn config_path() -> AppResult<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the config directory (without filename).
    pub fn config_dir() -> AppResult<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("org", "linkdeck", "linkdeck").ok_or(AppError::NoConfigDir)?;
        Ok(proj_dirs.config_dir().to_path_buf())
    }
}
