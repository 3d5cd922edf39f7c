// SPDX-License-Identifier: MPL-2.0
//! Upload workflow: select, upload, await the resized artifact, display, download.
//!
//! This module follows the "state down, messages up" pattern. [`State::handle`]
//! never performs I/O; it returns [`Effect`]s that the window shell (or a test)
//! executes, feeding each outcome back as a [`Message`] tagged with the
//! [`RunId`] that requested it. Outcomes of a superseded run are discarded.
//!
//! # Run phases
//!
//! ```text
//! Idle -> Uploading -> AwaitingArtifact -> Displaying -> Ready
//!            |               |                 |
//!            +---------------+-----------------+--> Failed
//! ```
//!
//! Starting again from any phase supersedes the current run.

mod runner;
mod surfaces;

pub use runner::Runner;
pub use surfaces::Surfaces;

use crate::app::config::PreviewFailurePolicy;
use crate::domain::upload::{
    download_file_name, type_tag, ArtifactRef, DownloadTarget, RetrievedArtifact, RunId,
    SelectedFile, UploadResult,
};
use crate::error::RunError;
use crate::media::{DisplayMetadata, PreviewImage};
use crate::ui::metadata_panel::PanelTarget;
use crate::ui::notifications::{self, Notification};
use crate::ui::processing::{ProcessingState, STATUS_GENERATING, STATUS_UPLOADING};
use std::sync::Arc;

/// Message key of the notification shown once the resized image is ready.
pub const RESIZE_SUCCESS_KEY: &str = "notification-resize-success";

/// Where the current run stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    /// Nothing started yet.
    #[default]
    Idle,
    /// The selected file is being sent to the upload endpoint.
    Uploading,
    /// Upload accepted; waiting for the resized artifact in storage.
    AwaitingArtifact,
    /// Artifact retrieved; its preview is being decoded.
    Displaying,
    /// Everything shown; the artifact can be downloaded.
    Ready,
    /// The run stopped on this error.
    Failed(RunError),
}

impl Phase {
    /// Returns `true` while a run waits for an asynchronous outcome.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            Phase::Uploading | Phase::AwaitingArtifact | Phase::Displaying
        )
    }
}

/// Messages for the upload workflow.
#[derive(Debug, Clone)]
pub enum Message {
    // ═══════════════════════════════════════════════════════════════════════
    // USER INTENT
    // ═══════════════════════════════════════════════════════════════════════
    /// A file was picked or dropped on the window.
    FileSelected(SelectedFile),
    /// The start control was activated.
    StartRequested,
    /// The download control was activated.
    DownloadRequested,

    // ═══════════════════════════════════════════════════════════════════════
    // ASYNC OUTCOMES
    // ═══════════════════════════════════════════════════════════════════════
    Uploaded {
        run: RunId,
        result: Result<UploadResult, RunError>,
    },
    PreviewDecoded {
        run: RunId,
        target: PanelTarget,
        result: Result<PreviewImage, RunError>,
    },
    ArtifactRetrieved {
        run: RunId,
        result: Result<RetrievedArtifact, RunError>,
    },
}

/// Background work requested by the workflow.
#[derive(Debug, Clone)]
pub enum Job {
    Upload {
        run: RunId,
        file: SelectedFile,
    },
    DecodePreview {
        run: RunId,
        target: PanelTarget,
        bytes: Arc<Vec<u8>>,
    },
    AwaitArtifact {
        run: RunId,
        artifact: ArtifactRef,
    },
}

/// Effects produced by [`State::handle`].
#[derive(Debug, Clone)]
pub enum Effect {
    /// Run a job and feed its outcome back; see [`Runner`].
    Run(Job),
    /// Ask the user where to save the artifact and write it there.
    SaveDownload(DownloadTarget),
}

/// Data belonging to the run in progress.
#[derive(Debug, Clone)]
struct ActiveRun {
    id: RunId,
    file: SelectedFile,
    upload: Option<UploadResult>,
    artifact: Option<RetrievedArtifact>,
}

/// Upload workflow state.
#[derive(Debug, Clone)]
pub struct State {
    phase: Phase,
    next_run: RunId,
    selected: Option<SelectedFile>,
    active: Option<ActiveRun>,
    surfaces: Surfaces,
    processing: ProcessingState,
    storage_base_url: String,
    preview_failure: PreviewFailurePolicy,
}

impl State {
    /// Creates an idle workflow fetching artifacts below `storage_base_url`.
    #[must_use]
    pub fn new(storage_base_url: impl Into<String>, preview_failure: PreviewFailurePolicy) -> Self {
        Self {
            phase: Phase::Idle,
            next_run: RunId::first(),
            selected: None,
            active: None,
            surfaces: Surfaces::default(),
            processing: ProcessingState::default(),
            storage_base_url: storage_base_url.into(),
            preview_failure,
        }
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    /// Identity of the run whose outcomes are currently accepted.
    #[must_use]
    pub fn current_run(&self) -> Option<RunId> {
        self.active.as_ref().map(|run| run.id)
    }

    #[must_use]
    pub fn surfaces(&self) -> &Surfaces {
        &self.surfaces
    }

    #[must_use]
    pub fn processing(&self) -> &ProcessingState {
        &self.processing
    }

    /// Returns whether the download control is enabled.
    #[must_use]
    pub fn can_download(&self) -> bool {
        self.phase == Phase::Ready && self.surfaces.download.is_some()
    }

    /// Handle a workflow message.
    ///
    /// Notifications are pushed to `notifications`; work to perform is
    /// returned as effects.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(
        &mut self,
        msg: Message,
        notifications: &mut notifications::Manager,
    ) -> Vec<Effect> {
        match msg {
            // ═══════════════════════════════════════════════════════════════
            // USER INTENT HANDLERS
            // ═══════════════════════════════════════════════════════════════
            Message::FileSelected(file) => {
                tracing::info!(file = file.name(), size = file.size(), "file selected");
                self.selected = Some(file);
                Vec::new()
            }
            Message::StartRequested => self.start(notifications),
            Message::DownloadRequested => match &self.surfaces.download {
                Some(target) if self.phase == Phase::Ready => {
                    vec![Effect::SaveDownload(target.clone())]
                }
                _ => {
                    tracing::debug!(phase = ?self.phase, "download requested before ready");
                    Vec::new()
                }
            },

            // ═══════════════════════════════════════════════════════════════
            // ASYNC OUTCOME HANDLERS
            // ═══════════════════════════════════════════════════════════════
            Message::Uploaded { run, result } => {
                if !self.accepts(run, |phase| *phase == Phase::Uploading) {
                    return Vec::new();
                }
                match result {
                    Ok(upload) => self.on_uploaded(upload),
                    Err(err) => {
                        self.fail(err, notifications);
                        Vec::new()
                    }
                }
            }
            Message::ArtifactRetrieved { run, result } => {
                if !self.accepts(run, |phase| *phase == Phase::AwaitingArtifact) {
                    return Vec::new();
                }
                match result {
                    Ok(artifact) => self.on_artifact_retrieved(artifact),
                    Err(err) => {
                        self.fail(err, notifications);
                        Vec::new()
                    }
                }
            }
            Message::PreviewDecoded {
                run,
                target: PanelTarget::Original,
                result,
            } => {
                if self.accepts(run, |phase| {
                    !matches!(phase, Phase::Idle | Phase::Uploading)
                }) {
                    self.on_original_decoded(result, notifications);
                }
                Vec::new()
            }
            Message::PreviewDecoded {
                run,
                target: PanelTarget::Resized,
                result,
            } => {
                if self.accepts(run, |phase| *phase == Phase::Displaying) {
                    self.on_resized_decoded(result, notifications);
                }
                Vec::new()
            }
        }
    }

    fn start(&mut self, notifications: &mut notifications::Manager) -> Vec<Effect> {
        let Some(file) = self.selected.clone() else {
            tracing::warn!("start requested without a selected file");
            self.processing.set_busy(false, None);
            notifications.push(Notification::from_run_error(&RunError::NoFileSelected));
            return Vec::new();
        };

        if self.phase.is_in_flight() {
            tracing::info!(superseded = ?self.current_run(), "superseding in-flight run");
        }

        let run = self.next_run;
        self.next_run = run.next();
        tracing::info!(%run, file = file.name(), "starting upload run");

        self.surfaces.reset();
        self.active = Some(ActiveRun {
            id: run,
            file: file.clone(),
            upload: None,
            artifact: None,
        });
        self.phase = Phase::Uploading;
        self.processing.set_busy(true, Some(STATUS_UPLOADING));

        vec![Effect::Run(Job::Upload { run, file })]
    }

    fn on_uploaded(&mut self, upload: UploadResult) -> Vec<Effect> {
        let Some(active) = self.active.as_mut() else {
            return Vec::new();
        };
        let artifact = ArtifactRef::new(&self.storage_base_url, &upload.file_key);
        tracing::info!(run = %active.id, file_key = %upload.file_key, %artifact, "awaiting artifact");

        active.upload = Some(upload);
        self.phase = Phase::AwaitingArtifact;
        self.processing.set_busy(true, Some(STATUS_GENERATING));
        self.surfaces.resized_placeholder = true;

        vec![
            Effect::Run(Job::DecodePreview {
                run: active.id,
                target: PanelTarget::Original,
                bytes: active.file.bytes_arc(),
            }),
            Effect::Run(Job::AwaitArtifact {
                run: active.id,
                artifact,
            }),
        ]
    }

    fn on_artifact_retrieved(&mut self, artifact: RetrievedArtifact) -> Vec<Effect> {
        let Some(active) = self.active.as_mut() else {
            return Vec::new();
        };
        let bytes = artifact.bytes_arc();
        active.artifact = Some(artifact);
        self.phase = Phase::Displaying;

        vec![Effect::Run(Job::DecodePreview {
            run: active.id,
            target: PanelTarget::Resized,
            bytes,
        })]
    }

    fn on_original_decoded(
        &mut self,
        result: Result<PreviewImage, RunError>,
        notifications: &mut notifications::Manager,
    ) {
        let Some(active) = self.active.as_ref() else {
            return;
        };
        match result {
            Ok(preview) => {
                let metadata = DisplayMetadata::original(&active.file, Some(preview.dimensions()));
                self.surfaces.panels.render(PanelTarget::Original, &metadata);
                self.surfaces.original_preview = Some(preview);
            }
            Err(err) => {
                let metadata = DisplayMetadata::original(&active.file, None);
                self.surfaces.panels.render(PanelTarget::Original, &metadata);
                self.preview_failed(err, notifications);
            }
        }
    }

    fn on_resized_decoded(
        &mut self,
        result: Result<PreviewImage, RunError>,
        notifications: &mut notifications::Manager,
    ) {
        match result {
            Ok(preview) => self.finish(Some(preview), notifications),
            Err(err) => {
                self.preview_failed(err, notifications);
                if self.phase == Phase::Displaying {
                    self.finish(None, notifications);
                }
            }
        }
    }

    /// Applies the preview failure policy.
    ///
    /// Only an in-flight run can be aborted. Once the run failed, the failure
    /// notification stays on screen and the decode error is only logged.
    fn preview_failed(&mut self, err: RunError, notifications: &mut notifications::Manager) {
        if matches!(self.phase, Phase::Failed(_)) {
            tracing::debug!(error = %err, "preview failed after run already failed");
            return;
        }
        match self.preview_failure {
            PreviewFailurePolicy::Abort if self.phase.is_in_flight() => {
                self.fail(err, notifications);
            }
            PreviewFailurePolicy::Warn | PreviewFailurePolicy::Abort => {
                tracing::warn!(phase = ?self.phase, error = %err, "preview could not be decoded");
                notifications.push(Notification::from_run_error(&err));
            }
        }
    }

    /// Shows the resized artifact and makes it downloadable.
    fn finish(&mut self, preview: Option<PreviewImage>, notifications: &mut notifications::Manager) {
        let Some(active) = self.active.as_ref() else {
            return;
        };
        let (Some(upload), Some(artifact)) = (active.upload.as_ref(), active.artifact.as_ref())
        else {
            tracing::error!(run = %active.id, "displaying without upload result or artifact");
            return;
        };

        let decoded = preview.is_some();
        let metadata = DisplayMetadata::resized(
            &upload.file_key,
            artifact,
            preview.as_ref().map(PreviewImage::dimensions),
        );
        let artifact_ref = ArtifactRef::new(&self.storage_base_url, &upload.file_key);
        let target = DownloadTarget {
            url: artifact_ref.url().to_string(),
            file_name: download_file_name(&active.file, &type_tag(artifact.mime_type())),
            bytes: artifact.bytes_arc(),
        };
        tracing::info!(run = %active.id, file_name = %target.file_name, "resized image ready");

        self.surfaces.panels.render(PanelTarget::Resized, &metadata);
        self.surfaces.resized_placeholder = false;
        self.surfaces.resized_preview = preview;
        self.surfaces.download = Some(target);
        self.phase = Phase::Ready;
        self.processing.set_busy(false, None);

        // Keep the decode warning visible instead of replacing it
        if decoded {
            notifications.push(Notification::success(RESIZE_SUCCESS_KEY));
        }
    }

    fn fail(&mut self, err: RunError, notifications: &mut notifications::Manager) {
        tracing::warn!(run = ?self.current_run(), error = %err, "run failed");
        notifications.push(Notification::from_run_error(&err));
        self.surfaces.resized_placeholder = false;
        self.processing.set_busy(false, None);
        self.phase = Phase::Failed(err);
    }

    /// Returns `true` if an outcome of `run` may be applied in the current phase.
    fn accepts(&self, run: RunId, phase_ok: impl Fn(&Phase) -> bool) -> bool {
        let current = self.current_run();
        if current != Some(run) {
            tracing::debug!(%run, ?current, "discarding outcome of superseded run");
            return false;
        }
        if !phase_ok(&self.phase) {
            tracing::debug!(%run, phase = ?self.phase, "discarding outcome in unexpected phase");
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests;
