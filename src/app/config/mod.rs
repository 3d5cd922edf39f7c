// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! The configuration is organized into logical sections:
//! - `[general]` - Language and theme mode
//! - `[service]` - Upload endpoint and artifact storage location
//! - `[processing]` - Artifact wait policy and preview failure handling
//! - `[notifications]` - Toast display duration
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass `--config-dir` on the command line
//! 3. Set `ICED_RESIZE_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use iced_resize::app::config;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Point the client at another endpoint
//! config.service.upload_url = Some("http://localhost:8080/upload".to_string());
//!
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::application::AwaitPolicy;
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Enums (shared between sections)
// =============================================================================

/// What happens to a run when one of its previews cannot be decoded.
///
/// The same policy applies to the original and the resized image.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PreviewFailurePolicy {
    /// Show a warning and keep going; dimensions are reported as unknown.
    #[default]
    Warn,
    /// End the run in the failed state.
    Abort,
}

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

/// Remote collaborators of the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceConfig {
    /// Multipart upload endpoint.
    #[serde(default = "default_upload_url", skip_serializing_if = "Option::is_none")]
    pub upload_url: Option<String>,

    /// Base URL under which `resized-<file_key>` artifacts appear.
    #[serde(
        default = "default_storage_base_url",
        skip_serializing_if = "Option::is_none"
    )]
    pub storage_base_url: Option<String>,

    /// User agent sent with every request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            upload_url: default_upload_url(),
            storage_base_url: default_storage_base_url(),
            user_agent: None,
        }
    }
}

/// Artifact wait policy and preview handling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcessingConfig {
    /// Delay before the first artifact fetch (seconds).
    #[serde(
        default = "default_settle_delay_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub settle_delay_secs: Option<u32>,

    /// Number of fetches attempted while the artifact is not there yet.
    #[serde(
        default = "default_max_fetch_attempts",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_fetch_attempts: Option<u32>,

    /// Initial delay between two fetches (milliseconds), doubled each time.
    #[serde(
        default = "default_retry_backoff_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub retry_backoff_ms: Option<u64>,

    /// Upper bound for the doubled delay (milliseconds).
    #[serde(
        default = "default_max_retry_backoff_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_retry_backoff_ms: Option<u64>,

    /// Policy for undecodable previews.
    #[serde(default)]
    pub preview_failure: PreviewFailurePolicy,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            settle_delay_secs: default_settle_delay_secs(),
            max_fetch_attempts: default_max_fetch_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
            max_retry_backoff_ms: default_max_retry_backoff_ms(),
            preview_failure: PreviewFailurePolicy::default(),
        }
    }
}

impl ProcessingConfig {
    /// Settling delay, clamped to the supported range.
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        let secs = self
            .settle_delay_secs
            .unwrap_or(DEFAULT_SETTLE_DELAY_SECS)
            .min(MAX_SETTLE_DELAY_SECS);
        Duration::from_secs(u64::from(secs))
    }

    /// Fetch attempts, clamped to the supported range.
    #[must_use]
    pub fn fetch_attempts(&self) -> u32 {
        self.max_fetch_attempts
            .unwrap_or(DEFAULT_MAX_FETCH_ATTEMPTS)
            .clamp(MIN_MAX_FETCH_ATTEMPTS, MAX_MAX_FETCH_ATTEMPTS)
    }

    /// Initial and maximum backoff, clamped and ordered.
    #[must_use]
    pub fn backoff_bounds(&self) -> (Duration, Duration) {
        let initial = self
            .retry_backoff_ms
            .unwrap_or(DEFAULT_RETRY_BACKOFF_MS)
            .clamp(MIN_RETRY_BACKOFF_MS, MAX_RETRY_BACKOFF_MS);
        let max = self
            .max_retry_backoff_ms
            .unwrap_or(DEFAULT_MAX_RETRY_BACKOFF_MS)
            .clamp(initial, MAX_RETRY_BACKOFF_MS);
        (Duration::from_millis(initial), Duration::from_millis(max))
    }

    /// Builds the artifact wait policy described by this section.
    #[must_use]
    pub fn await_policy(&self) -> AwaitPolicy {
        let (initial, max) = self.backoff_bounds();
        AwaitPolicy::new(self.settle_delay(), self.fetch_attempts(), initial, max)
    }
}

/// Toast notification settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationConfig {
    /// How long a toast stays on screen (seconds).
    #[serde(
        default = "default_notification_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub display_secs: Option<u32>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            display_secs: default_notification_secs(),
        }
    }
}

impl NotificationConfig {
    /// Display duration, clamped to the supported range.
    #[must_use]
    pub fn display_duration(&self) -> Duration {
        let secs = self
            .display_secs
            .unwrap_or(DEFAULT_NOTIFICATION_SECS)
            .clamp(MIN_NOTIFICATION_SECS, MAX_NOTIFICATION_SECS);
        Duration::from_secs(u64::from(secs))
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Upload endpoint and storage location.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Artifact wait policy.
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Toast settings.
    #[serde(default)]
    pub notifications: NotificationConfig,
}

impl Config {
    /// Upload endpoint, falling back to the default.
    #[must_use]
    pub fn upload_url(&self) -> &str {
        self.service
            .upload_url
            .as_deref()
            .unwrap_or(DEFAULT_UPLOAD_URL)
    }

    /// Storage base URL without trailing slash.
    #[must_use]
    pub fn storage_base_url(&self) -> &str {
        self.service
            .storage_base_url
            .as_deref()
            .unwrap_or(DEFAULT_STORAGE_BASE_URL)
            .trim_end_matches('/')
    }

    /// User agent, falling back to the crate name and version.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        self.service
            .user_agent
            .as_deref()
            .unwrap_or(DEFAULT_USER_AGENT)
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_upload_url() -> Option<String> {
    Some(DEFAULT_UPLOAD_URL.to_string())
}

fn default_storage_base_url() -> Option<String> {
    Some(DEFAULT_STORAGE_BASE_URL.to_string())
}

fn default_settle_delay_secs() -> Option<u32> {
    Some(DEFAULT_SETTLE_DELAY_SECS)
}

fn default_max_fetch_attempts() -> Option<u32> {
    Some(DEFAULT_MAX_FETCH_ATTEMPTS)
}

fn default_retry_backoff_ms() -> Option<u64> {
    Some(DEFAULT_RETRY_BACKOFF_MS)
}

fn default_max_retry_backoff_ms() -> Option<u64> {
    Some(DEFAULT_MAX_RETRY_BACKOFF_MS)
}

fn default_notification_secs() -> Option<u32> {
    Some(DEFAULT_NOTIFICATION_SECS)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable settings");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

/// Writes a default `settings.toml` when none exists yet, so the endpoints
/// can be edited by hand.
///
/// Returns `true` when a file was created.
pub fn write_default_if_missing(base_dir: Option<PathBuf>) -> Result<bool> {
    match get_config_path_with_override(base_dir) {
        Some(path) if !path.exists() => {
            save_to_path(&Config::default(), &path)?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

// =============================================================================
// Tests
// =============================================================================
