// SPDX-License-Identifier: MPL-2.0
//! Transfer port definitions.
//!
//! [`UploadService`] sends the selected file to the upload endpoint and
//! [`ArtifactSource`] fetches the resized artifact from storage. The HTTP
//! adapter lives in `infrastructure::http`; tests substitute in-memory fakes.

use crate::domain::upload::{ArtifactRef, RetrievedArtifact, SelectedFile, UploadResult};
use crate::error::RunError;
use std::fmt;
use std::future::Future;

// =============================================================================
// FetchError
// =============================================================================

/// Outcome of a single failed artifact fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The artifact does not exist yet; storage answered with this status.
    NotReady { status: u16 },

    /// The fetch failed for a reason retrying will not fix.
    Failed(String),
}

impl FetchError {
    /// Returns `true` if another attempt may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::NotReady { .. })
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::NotReady { status } => {
                write!(f, "resized image not available (HTTP {status})")
            }
            FetchError::Failed(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

// =============================================================================
// Traits
// =============================================================================

/// Port for sending a file to the upload endpoint.
pub trait UploadService: Send + Sync {
    /// Uploads `file` and returns the key the server assigned to it.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::UploadRejected`] when the server refuses the file,
    /// answers without a key, or cannot be reached.
    fn upload(
        &self,
        file: &SelectedFile,
    ) -> impl Future<Output = Result<UploadResult, RunError>> + Send;
}

/// Port for fetching a resized artifact once.
///
/// Retrying is the caller's job; see `application::artifact_wait`.
pub trait ArtifactSource: Send + Sync {
    /// Fetches the artifact at `artifact`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NotReady`] while the artifact is still being
    /// produced, [`FetchError::Failed`] for anything else.
    fn fetch(
        &self,
        artifact: &ArtifactRef,
    ) -> impl Future<Output = Result<RetrievedArtifact, FetchError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_display() {
        let err = FetchError::NotReady { status: 404 };
        assert_eq!(format!("{err}"), "resized image not available (HTTP 404)");

        let err = FetchError::Failed("connection reset".to_string());
        assert_eq!(format!("{err}"), "connection reset");
    }

    #[test]
    fn only_not_ready_is_retryable() {
        assert!(FetchError::NotReady { status: 403 }.is_retryable());
        assert!(!FetchError::Failed("boom".into()).is_retryable());
    }
}
