// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::domain::upload::{DownloadTarget, SelectedFile};
use crate::error::Error;
use crate::ui::notifications;
use crate::ui::uploader;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Uploader(uploader::Message),
    Notification(notifications::NotificationMessage),
    /// Open the native file picker.
    OpenFileDialog,
    /// Result from the open file dialog.
    OpenFileDialogResult(Option<PathBuf>),
    /// A file was dropped on the window.
    FileDropped(PathBuf),
    /// A picked or dropped file was read from disk.
    FileRead(Result<SelectedFile, Error>),
    /// Result from the save dialog of a download.
    DownloadDialogResult {
        path: Option<PathBuf>,
        target: DownloadTarget,
    },
    /// The resized image was written to disk.
    DownloadSaved(Result<PathBuf, Error>),
    Tick(Instant), // Periodic tick for notification auto-dismiss
}

/// Runtime flags passed in from the CLI or launcher to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional image path to preselect on startup.
    pub file_path: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `ICED_RESIZE_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Overrides `[service] upload_url`.
    pub upload_url: Option<String>,
    /// Overrides `[service] storage_base_url`.
    pub storage_url: Option<String>,
}
