// SPDX-License-Identifier: MPL-2.0

use super::*;
use crate::application::port::{ArtifactSource, FetchError, UploadService};
use crate::application::AwaitPolicy;
use crate::domain::upload::FileKey;
use crate::ui::notifications::{Manager, Severity};
use image_rs::{ImageBuffer, ImageFormat, Rgb};
use std::io::Cursor;
use std::sync::Mutex;
use std::time::Duration;

const STORAGE: &str = "https://bucket.test";

fn state() -> State {
    State::new(STORAGE, PreviewFailurePolicy::Warn)
}

fn cat_png() -> SelectedFile {
    SelectedFile::new("cat.png", "image/png", vec![0; 2048])
}

fn upload_ok(key: &str) -> Result<UploadResult, RunError> {
    Ok(UploadResult {
        file_key: FileKey::new(key).unwrap(),
        message: None,
    })
}

fn jpeg_artifact() -> RetrievedArtifact {
    RetrievedArtifact::new("image/jpeg", vec![0; 1024])
}

fn preview(width: u32, height: u32) -> PreviewImage {
    PreviewImage::from_rgba(width, height, vec![0; (width * height * 4) as usize])
}

/// Selects `cat.png`, starts a run and returns its id.
fn start_run(state: &mut State, notifications: &mut Manager) -> RunId {
    state.handle(Message::FileSelected(cat_png()), notifications);
    let effects = state.handle(Message::StartRequested, notifications);
    match effects.as_slice() {
        [Effect::Run(Job::Upload { run, file })] => {
            assert_eq!(file.name(), "cat.png");
            *run
        }
        other => panic!("expected a single upload job, got {other:?}"),
    }
}

/// Drives a run up to `Displaying` and returns its id.
fn run_until_displaying(state: &mut State, notifications: &mut Manager) -> RunId {
    let run = start_run(state, notifications);
    state.handle(
        Message::Uploaded {
            run,
            result: upload_ok("abc123"),
        },
        notifications,
    );
    state.handle(
        Message::PreviewDecoded {
            run,
            target: PanelTarget::Original,
            result: Ok(preview(640, 480)),
        },
        notifications,
    );
    state.handle(
        Message::ArtifactRetrieved {
            run,
            result: Ok(jpeg_artifact()),
        },
        notifications,
    );
    assert_eq!(state.phase(), &Phase::Displaying);
    run
}

fn current_key(notifications: &Manager) -> Option<&str> {
    notifications.current().map(Notification::message_key)
}

// ═══════════════════════════════════════════════════════════════════════════
// START
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn start_without_file_notifies_and_stays_idle() {
    let mut state = state();
    let mut notifications = Manager::default();

    let effects = state.handle(Message::StartRequested, &mut notifications);

    assert!(effects.is_empty());
    assert_eq!(state.phase(), &Phase::Idle);
    assert!(!state.processing().is_busy());
    let shown = notifications.current().expect("notification");
    assert_eq!(shown.message_key(), "notification-no-file-selected");
    assert_eq!(shown.severity(), Severity::Error);
}

#[test]
fn start_sets_busy_and_requests_upload() {
    let mut state = state();
    let mut notifications = Manager::default();

    let run = start_run(&mut state, &mut notifications);

    assert_eq!(state.current_run(), Some(run));
    assert_eq!(state.phase(), &Phase::Uploading);
    assert!(state.processing().is_busy());
    assert!(!state.processing().controls_enabled());
    assert_eq!(state.processing().status_key(), Some(STATUS_UPLOADING));
}

// ═══════════════════════════════════════════════════════════════════════════
// HAPPY PATH
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn accepted_upload_schedules_preview_and_artifact_wait() {
    let mut state = state();
    let mut notifications = Manager::default();
    let run = start_run(&mut state, &mut notifications);

    let effects = state.handle(
        Message::Uploaded {
            run,
            result: upload_ok("abc123"),
        },
        &mut notifications,
    );

    assert_eq!(state.phase(), &Phase::AwaitingArtifact);
    assert_eq!(state.processing().status_key(), Some(STATUS_GENERATING));
    assert!(state.surfaces().resized_placeholder);
    assert_eq!(effects.len(), 2);
    match &effects[0] {
        Effect::Run(Job::DecodePreview { target, bytes, .. }) => {
            assert_eq!(*target, PanelTarget::Original);
            assert_eq!(bytes.len(), 2048);
        }
        other => panic!("expected original preview decode, got {other:?}"),
    }
    match &effects[1] {
        Effect::Run(Job::AwaitArtifact { artifact, .. }) => {
            assert_eq!(artifact.url(), "https://bucket.test/resized-abc123");
        }
        other => panic!("expected artifact wait, got {other:?}"),
    }
}

#[test]
fn original_preview_renders_original_metadata() {
    let mut state = state();
    let mut notifications = Manager::default();
    let run = start_run(&mut state, &mut notifications);
    state.handle(
        Message::Uploaded {
            run,
            result: upload_ok("abc123"),
        },
        &mut notifications,
    );

    state.handle(
        Message::PreviewDecoded {
            run,
            target: PanelTarget::Original,
            result: Ok(preview(640, 480)),
        },
        &mut notifications,
    );

    assert!(state.surfaces().original_preview.is_some());
    assert_eq!(
        state.surfaces().panels.lines(PanelTarget::Original),
        vec![
            "File Name: cat.png",
            "File Size: 2.0 KB",
            "Dimensions: 640 x 480 px",
            "Type: PNG",
        ]
    );
    // Still waiting for the artifact
    assert!(state.processing().is_busy());
}

#[test]
fn resized_preview_completes_run() {
    let mut state = state();
    let mut notifications = Manager::default();
    let run = run_until_displaying(&mut state, &mut notifications);

    let effects = state.handle(
        Message::PreviewDecoded {
            run,
            target: PanelTarget::Resized,
            result: Ok(preview(320, 240)),
        },
        &mut notifications,
    );

    assert!(effects.is_empty());
    assert_eq!(state.phase(), &Phase::Ready);
    assert!(!state.processing().is_busy());
    assert!(!state.surfaces().resized_placeholder);
    assert!(state.surfaces().resized_preview.is_some());
    assert_eq!(
        state.surfaces().panels.lines(PanelTarget::Resized),
        vec![
            "File Key: abc123",
            "File Size: 1.0 KB",
            "Dimensions: 320 x 240 px",
            "Type: JPEG",
        ]
    );

    let download = state.surfaces().download.as_ref().expect("download target");
    assert_eq!(download.file_name, "resized-cat.jpeg");
    assert_eq!(download.url, "https://bucket.test/resized-abc123");
    assert_eq!(download.bytes.len(), 1024);
    assert!(state.can_download());

    assert_eq!(current_key(&notifications), Some(RESIZE_SUCCESS_KEY));
    assert_eq!(
        notifications.current().map(Notification::severity),
        Some(Severity::Success)
    );
}

#[test]
fn download_request_emits_save_only_when_ready() {
    let mut state = state();
    let mut notifications = Manager::default();

    assert!(state
        .handle(Message::DownloadRequested, &mut notifications)
        .is_empty());

    let run = run_until_displaying(&mut state, &mut notifications);
    assert!(state
        .handle(Message::DownloadRequested, &mut notifications)
        .is_empty());

    state.handle(
        Message::PreviewDecoded {
            run,
            target: PanelTarget::Resized,
            result: Ok(preview(10, 10)),
        },
        &mut notifications,
    );
    let effects = state.handle(Message::DownloadRequested, &mut notifications);
    match effects.as_slice() {
        [Effect::SaveDownload(target)] => assert_eq!(target.file_name, "resized-cat.jpeg"),
        other => panic!("expected save effect, got {other:?}"),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// FAILURES
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn rejected_upload_fails_run() {
    let mut state = state();
    let mut notifications = Manager::default();
    let run = start_run(&mut state, &mut notifications);

    let effects = state.handle(
        Message::Uploaded {
            run,
            result: Err(RunError::upload_rejected(Some("disk full".into()))),
        },
        &mut notifications,
    );

    assert!(effects.is_empty());
    assert_eq!(
        state.phase(),
        &Phase::Failed(RunError::UploadRejected {
            message: "disk full".into()
        })
    );
    assert!(!state.processing().is_busy());
    assert!(state.surfaces().is_clear());
    let shown = notifications.current().expect("notification");
    assert_eq!(shown.message_key(), "notification-upload-failed");
    assert_eq!(shown.arg("message"), Some("disk full"));
}

#[test]
fn missing_artifact_fails_run_and_keeps_original() {
    let mut state = state();
    let mut notifications = Manager::default();
    let run = start_run(&mut state, &mut notifications);
    state.handle(
        Message::Uploaded {
            run,
            result: upload_ok("abc123"),
        },
        &mut notifications,
    );
    state.handle(
        Message::PreviewDecoded {
            run,
            target: PanelTarget::Original,
            result: Ok(preview(4, 4)),
        },
        &mut notifications,
    );

    let effects = state.handle(
        Message::ArtifactRetrieved {
            run,
            result: Err(RunError::ArtifactUnavailable {
                message: "resized image not available (HTTP 404)".into(),
            }),
        },
        &mut notifications,
    );

    assert!(effects.is_empty());
    assert!(matches!(
        state.phase(),
        Phase::Failed(RunError::ArtifactUnavailable { .. })
    ));
    assert!(!state.surfaces().resized_placeholder);
    assert!(state.surfaces().original_preview.is_some());
    assert!(state.surfaces().download.is_none());
    assert!(!state.processing().is_busy());
    assert_eq!(
        current_key(&notifications),
        Some("notification-artifact-unavailable")
    );
}

#[test]
fn undecodable_resized_preview_warns_and_stays_downloadable() {
    let mut state = state();
    let mut notifications = Manager::default();
    let run = run_until_displaying(&mut state, &mut notifications);

    state.handle(
        Message::PreviewDecoded {
            run,
            target: PanelTarget::Resized,
            result: Err(RunError::PreviewDecodeFailed {
                message: "truncated".into(),
            }),
        },
        &mut notifications,
    );

    assert_eq!(state.phase(), &Phase::Ready);
    assert!(state.can_download());
    assert!(state.surfaces().resized_preview.is_none());
    assert_eq!(
        state.surfaces().panels.lines(PanelTarget::Resized)[2],
        "Dimensions: ? x ? px"
    );
    let shown = notifications.current().expect("warning");
    assert_eq!(shown.message_key(), "notification-preview-failed");
    assert_eq!(shown.arg("message"), Some("truncated"));
}

#[test]
fn undecodable_original_preview_warns_and_run_continues() {
    let mut state = state();
    let mut notifications = Manager::default();
    let run = start_run(&mut state, &mut notifications);
    state.handle(
        Message::Uploaded {
            run,
            result: upload_ok("abc123"),
        },
        &mut notifications,
    );

    state.handle(
        Message::PreviewDecoded {
            run,
            target: PanelTarget::Original,
            result: Err(RunError::PreviewDecodeFailed {
                message: "bad header".into(),
            }),
        },
        &mut notifications,
    );

    assert_eq!(state.phase(), &Phase::AwaitingArtifact);
    assert_eq!(
        state.surfaces().panels.lines(PanelTarget::Original)[2],
        "Dimensions: ? x ? px"
    );
    assert_eq!(current_key(&notifications), Some("notification-preview-failed"));
}

#[test]
fn abort_policy_fails_run_on_preview_error() {
    let mut state = State::new(STORAGE, PreviewFailurePolicy::Abort);
    let mut notifications = Manager::default();
    let run = start_run(&mut state, &mut notifications);
    state.handle(
        Message::Uploaded {
            run,
            result: upload_ok("abc123"),
        },
        &mut notifications,
    );

    state.handle(
        Message::PreviewDecoded {
            run,
            target: PanelTarget::Original,
            result: Err(RunError::PreviewDecodeFailed {
                message: "bad header".into(),
            }),
        },
        &mut notifications,
    );
    assert!(matches!(
        state.phase(),
        Phase::Failed(RunError::PreviewDecodeFailed { .. })
    ));
    assert!(!state.processing().is_busy());

    // The artifact wait still completes, but the run is over
    let effects = state.handle(
        Message::ArtifactRetrieved {
            run,
            result: Ok(jpeg_artifact()),
        },
        &mut notifications,
    );
    assert!(effects.is_empty());
    assert!(matches!(state.phase(), Phase::Failed(_)));
}

#[test]
fn late_original_preview_error_keeps_ready_run() {
    let mut state = State::new(STORAGE, PreviewFailurePolicy::Abort);
    let mut notifications = Manager::default();
    let run = start_run(&mut state, &mut notifications);
    state.handle(
        Message::Uploaded {
            run,
            result: upload_ok("abc123"),
        },
        &mut notifications,
    );
    state.handle(
        Message::ArtifactRetrieved {
            run,
            result: Ok(jpeg_artifact()),
        },
        &mut notifications,
    );
    state.handle(
        Message::PreviewDecoded {
            run,
            target: PanelTarget::Resized,
            result: Ok(preview(320, 240)),
        },
        &mut notifications,
    );
    assert_eq!(state.phase(), &Phase::Ready);

    state.handle(
        Message::PreviewDecoded {
            run,
            target: PanelTarget::Original,
            result: Err(RunError::PreviewDecodeFailed {
                message: "bad header".into(),
            }),
        },
        &mut notifications,
    );

    assert_eq!(state.phase(), &Phase::Ready);
    assert!(state.can_download());
    assert!(state.surfaces().resized_preview.is_some());
    assert!(!state.processing().is_busy());
    assert_eq!(
        state.surfaces().panels.lines(PanelTarget::Original)[2],
        "Dimensions: ? x ? px"
    );
}

#[test]
fn late_original_preview_error_keeps_failure_reason() {
    let mut state = state();
    let mut notifications = Manager::default();
    let run = start_run(&mut state, &mut notifications);
    state.handle(
        Message::Uploaded {
            run,
            result: upload_ok("abc123"),
        },
        &mut notifications,
    );
    state.handle(
        Message::ArtifactRetrieved {
            run,
            result: Err(RunError::ArtifactUnavailable {
                message: "HTTP status: 500".into(),
            }),
        },
        &mut notifications,
    );
    assert_eq!(
        current_key(&notifications),
        Some("notification-artifact-unavailable")
    );

    state.handle(
        Message::PreviewDecoded {
            run,
            target: PanelTarget::Original,
            result: Err(RunError::PreviewDecodeFailed {
                message: "bad header".into(),
            }),
        },
        &mut notifications,
    );

    assert!(matches!(
        state.phase(),
        Phase::Failed(RunError::ArtifactUnavailable { .. })
    ));
    let shown = notifications.current().expect("notification");
    assert_eq!(shown.message_key(), "notification-artifact-unavailable");
    assert_eq!(shown.arg("message"), Some("HTTP status: 500"));
}

// ═══════════════════════════════════════════════════════════════════════════
// SUPERSEDING
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn restart_after_ready_clears_surfaces() {
    let mut state = state();
    let mut notifications = Manager::default();
    let first = run_until_displaying(&mut state, &mut notifications);
    state.handle(
        Message::PreviewDecoded {
            run: first,
            target: PanelTarget::Resized,
            result: Ok(preview(8, 8)),
        },
        &mut notifications,
    );
    assert_eq!(state.phase(), &Phase::Ready);

    let effects = state.handle(Message::StartRequested, &mut notifications);

    assert!(matches!(effects.as_slice(), [Effect::Run(Job::Upload { .. })]));
    assert!(state.surfaces().is_clear());
    assert!(!state.can_download());
    assert_ne!(state.current_run(), Some(first));
    assert_eq!(state.phase(), &Phase::Uploading);
}

#[test]
fn outcome_of_superseded_run_is_discarded() {
    let mut state = state();
    let mut notifications = Manager::default();
    let first = start_run(&mut state, &mut notifications);
    let second = match state
        .handle(Message::StartRequested, &mut notifications)
        .as_slice()
    {
        [Effect::Run(Job::Upload { run, .. })] => *run,
        other => panic!("expected upload job, got {other:?}"),
    };
    assert_ne!(first, second);

    let effects = state.handle(
        Message::Uploaded {
            run: first,
            result: upload_ok("stale"),
        },
        &mut notifications,
    );
    assert!(effects.is_empty());
    assert_eq!(state.phase(), &Phase::Uploading);

    let effects = state.handle(
        Message::Uploaded {
            run: first,
            result: Err(RunError::upload_rejected(None)),
        },
        &mut notifications,
    );
    assert!(effects.is_empty());
    assert_eq!(state.phase(), &Phase::Uploading);
    assert!(notifications.current().is_none());
}

#[test]
fn superseding_mid_wait_ignores_late_artifact() {
    let mut state = state();
    let mut notifications = Manager::default();
    let first = start_run(&mut state, &mut notifications);
    state.handle(
        Message::Uploaded {
            run: first,
            result: upload_ok("old"),
        },
        &mut notifications,
    );
    state.handle(Message::StartRequested, &mut notifications);

    let effects = state.handle(
        Message::ArtifactRetrieved {
            run: first,
            result: Ok(jpeg_artifact()),
        },
        &mut notifications,
    );
    assert!(effects.is_empty());
    assert_eq!(state.phase(), &Phase::Uploading);
    assert!(state.surfaces().is_clear());
}

#[test]
fn duplicate_artifact_outcome_is_ignored() {
    let mut state = state();
    let mut notifications = Manager::default();
    let run = run_until_displaying(&mut state, &mut notifications);

    let effects = state.handle(
        Message::ArtifactRetrieved {
            run,
            result: Ok(jpeg_artifact()),
        },
        &mut notifications,
    );
    assert!(effects.is_empty());
    assert_eq!(state.phase(), &Phase::Displaying);
}

#[test]
fn selecting_a_file_mid_run_keeps_run_file() {
    let mut state = state();
    let mut notifications = Manager::default();
    let run = start_run(&mut state, &mut notifications);
    state.handle(
        Message::FileSelected(SelectedFile::new("dog.gif", "image/gif", vec![1; 10])),
        &mut notifications,
    );

    let effects = state.handle(
        Message::Uploaded {
            run,
            result: upload_ok("abc123"),
        },
        &mut notifications,
    );
    match &effects[0] {
        Effect::Run(Job::DecodePreview { bytes, .. }) => assert_eq!(bytes.len(), 2048),
        other => panic!("expected decode job, got {other:?}"),
    }
    assert_eq!(state.selected().map(SelectedFile::name), Some("dog.gif"));
}

// ═══════════════════════════════════════════════════════════════════════════
// RUNNER
// ═══════════════════════════════════════════════════════════════════════════

fn encode(format: ImageFormat, width: u32, height: u32) -> Vec<u8> {
    let img = ImageBuffer::from_pixel(width, height, Rgb([10u8, 120, 200]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format).expect("encode");
    out.into_inner()
}

/// In-memory resize service.
struct FakeService {
    upload: Result<UploadResult, RunError>,
    artifact: Result<RetrievedArtifact, FetchError>,
    uploaded: Mutex<Vec<String>>,
}

impl UploadService for FakeService {
    async fn upload(&self, file: &SelectedFile) -> Result<UploadResult, RunError> {
        self.uploaded.lock().unwrap().push(file.name().to_string());
        self.upload.clone()
    }
}

impl ArtifactSource for FakeService {
    async fn fetch(&self, _artifact: &ArtifactRef) -> Result<RetrievedArtifact, FetchError> {
        self.artifact.clone()
    }
}

fn fast_policy() -> AwaitPolicy {
    AwaitPolicy::new(Duration::ZERO, 2, Duration::from_millis(1), Duration::from_millis(1))
}

#[tokio::test]
async fn runner_drives_run_to_ready() {
    let service = FakeService {
        upload: upload_ok("abc123"),
        artifact: Ok(RetrievedArtifact::new(
            "image/jpeg",
            encode(ImageFormat::Jpeg, 32, 24),
        )),
        uploaded: Mutex::new(Vec::new()),
    };
    let runner = Runner::new(service, fast_policy());
    let mut state = state();
    let mut notifications = Manager::default();
    let png = encode(ImageFormat::Png, 64, 48);
    state.handle(
        Message::FileSelected(SelectedFile::new("cat.png", "image/png", png)),
        &mut notifications,
    );

    let saves = runner
        .run_to_completion(&mut state, &mut notifications, Message::StartRequested)
        .await;

    assert!(saves.is_empty());
    assert_eq!(state.phase(), &Phase::Ready);
    assert_eq!(
        state.surfaces().panels.lines(PanelTarget::Original)[2],
        "Dimensions: 64 x 48 px"
    );
    assert_eq!(
        state.surfaces().panels.lines(PanelTarget::Resized)[2],
        "Dimensions: 32 x 24 px"
    );
    assert_eq!(
        state.surfaces().download.as_ref().map(|d| d.file_name.as_str()),
        Some("resized-cat.jpeg")
    );

    let saves = runner
        .run_to_completion(&mut state, &mut notifications, Message::DownloadRequested)
        .await;
    assert_eq!(saves.len(), 1);
}

#[tokio::test]
async fn runner_reports_missing_artifact() {
    let service = FakeService {
        upload: upload_ok("abc123"),
        artifact: Err(FetchError::NotReady { status: 404 }),
        uploaded: Mutex::new(Vec::new()),
    };
    let runner = Runner::new(service, fast_policy());
    let mut state = state();
    let mut notifications = Manager::default();
    state.handle(Message::FileSelected(cat_png()), &mut notifications);

    runner
        .run_to_completion(&mut state, &mut notifications, Message::StartRequested)
        .await;

    assert!(matches!(
        state.phase(),
        Phase::Failed(RunError::ArtifactUnavailable { .. })
    ));
    // The 2048 zero bytes are not a decodable PNG
    assert_eq!(
        state.surfaces().panels.lines(PanelTarget::Original)[2],
        "Dimensions: ? x ? px"
    );
}

#[tokio::test]
async fn runner_without_file_sends_nothing() {
    let service = FakeService {
        upload: upload_ok("abc123"),
        artifact: Ok(jpeg_artifact()),
        uploaded: Mutex::new(Vec::new()),
    };
    let runner = Runner::new(service, fast_policy());
    let mut state = state();
    let mut notifications = Manager::default();

    runner
        .run_to_completion(&mut state, &mut notifications, Message::StartRequested)
        .await;

    assert_eq!(state.phase(), &Phase::Idle);
    assert!(runner.service().uploaded.lock().unwrap().is_empty());
}
