// SPDX-License-Identifier: MPL-2.0
//! Upload run domain types.

pub mod types;

pub use types::{
    download_file_name, type_tag, ArtifactRef, Dimensions, DownloadTarget, FileKey,
    RetrievedArtifact, RunId, SelectedFile, UploadResult, ARTIFACT_PREFIX, UNKNOWN_MIME_TYPE,
};
