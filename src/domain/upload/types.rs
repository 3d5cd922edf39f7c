// SPDX-License-Identifier: MPL-2.0
//! Core upload types for the domain layer.
//!
//! These types represent pure data without any presentation or transport
//! dependencies. Byte payloads are shared through `Arc` so that a file can
//! travel from the picker to the uploader and the preview decoder without
//! being copied at every hop.

use std::fmt;
use std::sync::Arc;

/// Prefix the resize worker puts in front of every stored artifact.
pub const ARTIFACT_PREFIX: &str = "resized-";

/// MIME type used when the content cannot be identified.
pub const UNKNOWN_MIME_TYPE: &str = "application/octet-stream";

// =============================================================================
// RunId
// =============================================================================

/// Identity of one upload run.
///
/// Every asynchronous result is tagged with the run that requested it, so a
/// result belonging to a superseded run can be recognized and discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunId(u64);

impl RunId {
    /// Returns the first run identity of a session.
    #[must_use]
    pub fn first() -> Self {
        Self(1)
    }

    /// Returns the identity following this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Returns the raw counter value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run-{}", self.0)
    }
}

// =============================================================================
// SelectedFile
// =============================================================================

/// The image chosen by the user, held in memory for the duration of a run.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    mime_type: String,
    bytes: Arc<Vec<u8>>,
}

impl SelectedFile {
    /// Creates a selected file from its display name, MIME type and content.
    #[must_use]
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: Arc::new(bytes),
        }
    }

    /// Returns the file name as picked by the user (no directory part).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the MIME type, e.g. `image/png`.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Returns the size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Returns the file content.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the shared file content.
    #[must_use]
    pub fn bytes_arc(&self) -> Arc<Vec<u8>> {
        Arc::clone(&self.bytes)
    }

    /// Returns the name up to the first `.`, which names downloaded artifacts.
    #[must_use]
    pub fn base_name(&self) -> &str {
        self.name.split('.').next().unwrap_or_default()
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

// =============================================================================
// FileKey / UploadResult
// =============================================================================

/// Opaque identifier assigned by the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileKey(String);

impl FileKey {
    /// Wraps a key returned by the server. Blank keys are rejected.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Successful answer of the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub file_key: FileKey,
    /// Optional informational text sent along with the key.
    pub message: Option<String>,
}

// =============================================================================
// ArtifactRef / RetrievedArtifact
// =============================================================================

/// Location of the resized artifact derived from a [`FileKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRef {
    url: String,
}

impl ArtifactRef {
    /// Builds `<storage_base_url>/resized-<file_key>`.
    #[must_use]
    pub fn new(storage_base_url: &str, file_key: &FileKey) -> Self {
        let base = storage_base_url.trim_end_matches('/');
        Self {
            url: format!("{base}/{ARTIFACT_PREFIX}{file_key}"),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for ArtifactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Resized artifact bytes together with their MIME type.
#[derive(Clone, PartialEq, Eq)]
pub struct RetrievedArtifact {
    mime_type: String,
    bytes: Arc<Vec<u8>>,
}

impl RetrievedArtifact {
    #[must_use]
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes: Arc::new(bytes),
        }
    }

    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn bytes_arc(&self) -> Arc<Vec<u8>> {
        Arc::clone(&self.bytes)
    }
}

impl fmt::Debug for RetrievedArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetrievedArtifact")
            .field("mime_type", &self.mime_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

// =============================================================================
// Dimensions / DownloadTarget
// =============================================================================

/// Pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// What the download control saves once a run is ready.
#[derive(Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    /// Storage URL of the artifact.
    pub url: String,
    /// Suggested file name, e.g. `resized-cat.jpeg`.
    pub file_name: String,
    pub bytes: Arc<Vec<u8>>,
}

impl fmt::Debug for DownloadTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadTarget")
            .field("url", &self.url)
            .field("file_name", &self.file_name)
            .field("size", &self.bytes.len())
            .finish()
    }
}

// =============================================================================
// Naming helpers
// =============================================================================

/// Returns the display tag of a MIME type: its subtype in upper case.
///
/// `image/jpeg` gives `JPEG`; parameters such as `; charset=...` are ignored.
#[must_use]
pub fn type_tag(mime_type: &str) -> String {
    let essence = mime_type.split(';').next().unwrap_or_default().trim();
    let subtype = essence.rsplit('/').next().unwrap_or(essence);
    subtype.to_uppercase()
}

/// Returns the suggested name of a downloaded artifact.
///
/// The original name is cut at its first `.` and the artifact's type tag,
/// lower-cased, becomes the extension: `cat.png` + `JPEG` gives
/// `resized-cat.jpeg`.
#[must_use]
pub fn download_file_name(original: &SelectedFile, artifact_type_tag: &str) -> String {
    format!(
        "{ARTIFACT_PREFIX}{}.{}",
        original.base_name(),
        artifact_type_tag.to_lowercase()
    )
}
