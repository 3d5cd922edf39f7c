// SPDX-License-Identifier: MPL-2.0
//! Executes workflow jobs against the transfer ports.

use super::{Effect, Job, Message, State};
use crate::application::port::{ArtifactSource, UploadService};
use crate::application::{await_artifact, AwaitPolicy};
use crate::domain::upload::DownloadTarget;
use crate::media::load_preview;
use crate::ui::notifications;
use std::collections::VecDeque;

/// Performs [`Job`]s and turns their outcomes into [`Message`]s.
#[derive(Debug)]
pub struct Runner<S> {
    service: S,
    policy: AwaitPolicy,
}

impl<S> Runner<S>
where
    S: UploadService + ArtifactSource,
{
    #[must_use]
    pub fn new(service: S, policy: AwaitPolicy) -> Self {
        Self { service, policy }
    }

    #[must_use]
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Runs one job to completion.
    pub async fn run(&self, job: Job) -> Message {
        match job {
            Job::Upload { run, file } => Message::Uploaded {
                run,
                result: self.service.upload(&file).await,
            },
            Job::DecodePreview { run, target, bytes } => Message::PreviewDecoded {
                run,
                target,
                result: load_preview(bytes).await,
            },
            Job::AwaitArtifact { run, artifact } => Message::ArtifactRetrieved {
                run,
                result: await_artifact(&self.service, &artifact, &self.policy).await,
            },
        }
    }

    /// Feeds `msg` to `state` and runs every resulting job, one at a time in
    /// request order, until the workflow settles.
    ///
    /// Save requests are not executed; they are returned to the caller.
    pub async fn run_to_completion(
        &self,
        state: &mut State,
        notifications: &mut notifications::Manager,
        msg: Message,
    ) -> Vec<DownloadTarget> {
        let mut saves = Vec::new();
        let mut pending: VecDeque<Effect> = state.handle(msg, notifications).into();

        while let Some(effect) = pending.pop_front() {
            match effect {
                Effect::Run(job) => {
                    let outcome = self.run(job).await;
                    pending.extend(state.handle(outcome, notifications));
                }
                Effect::SaveDownload(target) => saves.push(target),
            }
        }

        saves
    }
}
