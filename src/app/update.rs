// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Workflow effects become `Task`s here; the workflow itself never touches
//! dialogs, the filesystem or the network.

use super::{Message, SharedRunner};
use crate::domain::upload::{DownloadTarget, SelectedFile};
use crate::error::{Error, RunError};
use crate::media::sniff_mime_type;
use crate::ui::notifications::{self, Notification};
use crate::ui::uploader::{self, Effect, Job};
use iced::Task;
use std::path::{Path, PathBuf};

/// Extensions offered by the open dialog.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "bmp", "tif", "tiff", "ico",
];

/// Mutable application state needed by the handlers.
pub struct UpdateContext<'a> {
    pub uploader: &'a mut uploader::State,
    pub notifications: &'a mut notifications::Manager,
    pub runner: Option<&'a SharedRunner>,
}

/// Forwards a workflow message and schedules the resulting effects.
pub fn handle_uploader_message(
    ctx: &mut UpdateContext<'_>,
    message: uploader::Message,
) -> Task<Message> {
    let effects = ctx.uploader.handle(message, ctx.notifications);
    run_effects(ctx.runner, effects)
}

/// Turns workflow effects into tasks.
pub fn run_effects(runner: Option<&SharedRunner>, effects: Vec<Effect>) -> Task<Message> {
    Task::batch(effects.into_iter().map(|effect| match effect {
        Effect::Run(job) => match runner {
            Some(runner) => {
                let runner = SharedRunner::clone(runner);
                Task::perform(async move { runner.run(job).await }, Message::Uploader)
            }
            None => Task::done(Message::Uploader(unavailable_outcome(job))),
        },
        Effect::SaveDownload(target) => handle_save_dialog(target),
    }))
}

/// Outcome reported for a job when no HTTP client could be created.
pub fn unavailable_outcome(job: Job) -> uploader::Message {
    const NO_CLIENT: &str = "HTTP client unavailable";

    match job {
        Job::Upload { run, .. } => uploader::Message::Uploaded {
            run,
            result: Err(RunError::upload_rejected(Some(NO_CLIENT.to_string()))),
        },
        Job::AwaitArtifact { run, .. } => uploader::Message::ArtifactRetrieved {
            run,
            result: Err(RunError::ArtifactUnavailable {
                message: NO_CLIENT.to_string(),
            }),
        },
        Job::DecodePreview { run, target, .. } => uploader::Message::PreviewDecoded {
            run,
            target,
            result: Err(RunError::PreviewDecodeFailed {
                message: NO_CLIENT.to_string(),
            }),
        },
    }
}

/// Handles the open file dialog request.
pub fn handle_open_file_dialog(ctx: &UpdateContext<'_>) -> Task<Message> {
    if !ctx.uploader.processing().controls_enabled() {
        return Task::none();
    }

    Task::perform(
        async move {
            rfd::AsyncFileDialog::new()
                .add_filter("Images", IMAGE_EXTENSIONS)
                .pick_file()
                .await
                .map(|h| h.path().to_path_buf())
        },
        Message::OpenFileDialogResult,
    )
}

/// Reads a picked or dropped file, unless a run is in progress.
pub fn handle_file_path(ctx: &UpdateContext<'_>, path: PathBuf) -> Task<Message> {
    if !ctx.uploader.processing().controls_enabled() {
        tracing::debug!(path = %path.display(), "ignoring file while busy");
        return Task::none();
    }
    read_file(path)
}

/// Reads `path` into a [`SelectedFile`].
pub fn read_file(path: PathBuf) -> Task<Message> {
    Task::perform(load_selected_file(path), Message::FileRead)
}

/// Loads a file from disk and detects its MIME type.
pub async fn load_selected_file(path: PathBuf) -> Result<SelectedFile, Error> {
    let bytes = tokio::fs::read(&path).await?;
    let name = file_name(&path);
    let mime_type = sniff_mime_type(&bytes, &name);
    tracing::debug!(path = %path.display(), %mime_type, size = bytes.len(), "file read");
    Ok(SelectedFile::new(name, mime_type, bytes))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string())
}

/// Selects a file that was read, or reports why it could not be.
pub fn handle_file_read(
    ctx: &mut UpdateContext<'_>,
    result: Result<SelectedFile, Error>,
) -> Task<Message> {
    match result {
        Ok(file) => handle_uploader_message(ctx, uploader::Message::FileSelected(file)),
        Err(err) => {
            tracing::warn!(error = %err, "file could not be read");
            ctx.notifications.push(
                Notification::error("notification-file-read-error")
                    .with_arg("message", err.to_string()),
            );
            Task::none()
        }
    }
}

/// Asks where to save the resized image.
fn handle_save_dialog(target: DownloadTarget) -> Task<Message> {
    Task::perform(
        async move {
            let path = rfd::AsyncFileDialog::new()
                .set_file_name(&target.file_name)
                .save_file()
                .await
                .map(|h| h.path().to_path_buf());
            (path, target)
        },
        |(path, target)| Message::DownloadDialogResult { path, target },
    )
}

/// Writes the download once a destination was chosen.
pub fn handle_download_dialog_result(
    path: Option<PathBuf>,
    target: DownloadTarget,
) -> Task<Message> {
    let Some(path) = path else {
        // User cancelled the dialog
        return Task::none();
    };
    Task::perform(write_download(path, target), Message::DownloadSaved)
}

/// Writes the artifact bytes to `path`.
pub async fn write_download(path: PathBuf, target: DownloadTarget) -> Result<PathBuf, Error> {
    tokio::fs::write(&path, target.bytes.as_slice()).await?;
    tracing::info!(path = %path.display(), url = %target.url, "resized image saved");
    Ok(path)
}

pub fn handle_download_saved(
    ctx: &mut UpdateContext<'_>,
    result: Result<PathBuf, Error>,
) -> Task<Message> {
    let notification = match result {
        Ok(path) => Notification::success("notification-download-saved")
            .with_arg("path", path.display().to_string()),
        Err(err) => {
            tracing::warn!(error = %err, "resized image could not be saved");
            Notification::error("notification-download-failed").with_arg("message", err.to_string())
        }
    };
    ctx.notifications.push(notification);
    Task::none()
}
