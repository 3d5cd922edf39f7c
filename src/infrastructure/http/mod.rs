// SPDX-License-Identifier: MPL-2.0
//! HTTP adapter for the upload endpoint and the artifact storage.
//!
//! The upload endpoint takes a multipart form with a single `file` field and
//! answers with JSON. Only a `200` carrying a `file_key` counts as success;
//! anything else becomes an upload rejection with the server's `message`.
//!
//! Storage answers `404` or `403` while the resized artifact has not been
//! written yet; both are reported as [`FetchError::NotReady`].

use crate::app::config::{Config, MAX_ARTIFACT_SIZE_BYTES};
use crate::application::port::{ArtifactSource, FetchError, UploadService};
use crate::domain::upload::{ArtifactRef, FileKey, RetrievedArtifact, SelectedFile, UploadResult};
use crate::error::{Result, RunError};
use crate::media::sniff_mime_type;
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::Deserialize;

/// Name of the multipart field carrying the image.
const UPLOAD_FIELD: &str = "file";

/// Body of an upload endpoint answer. Both fields are optional on the wire.
#[derive(Debug, Default, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    file_key: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Client for the resize service.
#[derive(Debug, Clone)]
pub struct HttpResizeClient {
    http: reqwest::Client,
    upload_url: String,
}

impl HttpResizeClient {
    /// Creates a client posting to `upload_url`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Http`] if the HTTP client cannot be
    /// initialized (for example when no TLS backend is available).
    pub fn new(upload_url: impl Into<String>, user_agent: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            http,
            upload_url: upload_url.into(),
        })
    }

    /// Creates a client from the `[service]` section of the configuration.
    ///
    /// # Errors
    ///
    /// See [`HttpResizeClient::new`].
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.upload_url(), config.user_agent())
    }

    #[must_use]
    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }
}

impl UploadService for HttpResizeClient {
    async fn upload(&self, file: &SelectedFile) -> std::result::Result<UploadResult, RunError> {
        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.mime_type())
            .map_err(|err| RunError::upload_rejected(Some(err.to_string())))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        tracing::info!(
            url = %self.upload_url,
            file = file.name(),
            size = file.size(),
            "uploading file"
        );

        let response = self
            .http
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "upload request failed");
                RunError::upload_rejected(Some(err.to_string()))
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| RunError::upload_rejected(Some(err.to_string())))?;

        interpret_upload_response(status, &body)
    }
}

impl ArtifactSource for HttpResizeClient {
    async fn fetch(
        &self,
        artifact: &ArtifactRef,
    ) -> std::result::Result<RetrievedArtifact, FetchError> {
        let response = self
            .http
            .get(artifact.url())
            .send()
            .await
            .map_err(|err| FetchError::Failed(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::FORBIDDEN {
            return Err(FetchError::NotReady {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::Failed(format!("HTTP status: {status}")));
        }

        if let Some(length) = response.content_length() {
            if length > MAX_ARTIFACT_SIZE_BYTES {
                return Err(too_large(length));
            }
        }

        let header_mime = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(image_mime_from_header);

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| FetchError::Failed(err.to_string()))?;
            let total = (bytes.len() + chunk.len()) as u64;
            if total > MAX_ARTIFACT_SIZE_BYTES {
                return Err(too_large(total));
            }
            bytes.extend_from_slice(&chunk);
        }

        let mime_type = header_mime.unwrap_or_else(|| sniff_mime_type(&bytes, artifact.url()));
        Ok(RetrievedArtifact::new(mime_type, bytes))
    }
}

fn too_large(size: u64) -> FetchError {
    FetchError::Failed(format!(
        "resized image too large ({size} bytes, limit {MAX_ARTIFACT_SIZE_BYTES})"
    ))
}

/// Maps an upload endpoint answer to the run outcome.
fn interpret_upload_response(
    status: StatusCode,
    body: &[u8],
) -> std::result::Result<UploadResult, RunError> {
    let parsed: UploadResponse = serde_json::from_slice(body).unwrap_or_else(|err| {
        tracing::debug!(%status, error = %err, "upload response is not JSON");
        UploadResponse::default()
    });

    if status != StatusCode::OK {
        tracing::warn!(%status, message = ?parsed.message, "upload rejected");
        return Err(RunError::upload_rejected(parsed.message));
    }

    match parsed.file_key.and_then(FileKey::new) {
        Some(file_key) => {
            tracing::info!(%file_key, "upload accepted");
            Ok(UploadResult {
                file_key,
                message: parsed.message,
            })
        }
        None => Err(RunError::upload_rejected(Some(
            "response did not include a file key".to_string(),
        ))),
    }
}

/// Returns the MIME essence of a `Content-Type` header if it names an image.
///
/// Buckets often store objects as `binary/octet-stream`; those answers are
/// sniffed from content instead.
fn image_mime_from_header(value: &str) -> Option<String> {
    let essence = value.split(';').next().unwrap_or_default().trim();
    essence
        .to_ascii_lowercase()
        .starts_with("image/")
        .then(|| essence.to_ascii_lowercase())
}
