// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Http(String),
}

/// Failures of a single upload run.
/// Each variant maps to a localized notification shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// The start action was triggered without a selected file.
    NoFileSelected,

    /// The upload endpoint refused the file or could not be reached.
    UploadRejected { message: String },

    /// The resized artifact could not be retrieved from storage.
    ArtifactUnavailable { message: String },

    /// A preview could not be decoded for display.
    PreviewDecodeFailed { message: String },
}

/// Fallback text when the upload endpoint gives no usable reason.
pub const GENERIC_SERVER_ERROR: &str = "Server error";

impl RunError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            RunError::NoFileSelected => "notification-no-file-selected",
            RunError::UploadRejected { .. } => "notification-upload-failed",
            RunError::ArtifactUnavailable { .. } => "notification-artifact-unavailable",
            RunError::PreviewDecodeFailed { .. } => "notification-preview-failed",
        }
    }

    /// Returns the human-readable detail carried by the error, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            RunError::NoFileSelected => None,
            RunError::UploadRejected { message }
            | RunError::ArtifactUnavailable { message }
            | RunError::PreviewDecodeFailed { message } => Some(message),
        }
    }

    /// Builds an upload rejection, falling back to the generic server message.
    pub fn upload_rejected(message: Option<String>) -> Self {
        let message = message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string());
        RunError::UploadRejected { message }
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::NoFileSelected => write!(f, "Please select an image file first"),
            RunError::UploadRejected { message } => write!(f, "Upload failed: {}", message),
            RunError::ArtifactUnavailable { message } => {
                write!(f, "Failed to retrieve resized image: {}", message)
            }
            RunError::PreviewDecodeFailed { message } => {
                write!(f, "Error loading image preview: {}", message)
            }
        }
    }
}

impl std::error::Error for RunError {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Http(e) => write!(f, "HTTP Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn upload_rejected_uses_server_message() {
        let err = RunError::upload_rejected(Some("disk full".into()));
        assert_eq!(
            err,
            RunError::UploadRejected {
                message: "disk full".into()
            }
        );
        assert_eq!(format!("{}", err), "Upload failed: disk full");
    }

    #[test]
    fn upload_rejected_falls_back_to_generic_message() {
        assert_eq!(
            RunError::upload_rejected(None).detail(),
            Some(GENERIC_SERVER_ERROR)
        );
        assert_eq!(
            RunError::upload_rejected(Some("   ".into())).detail(),
            Some(GENERIC_SERVER_ERROR)
        );
    }

    #[test]
    fn run_error_i18n_keys() {
        assert_eq!(
            RunError::NoFileSelected.i18n_key(),
            "notification-no-file-selected"
        );
        assert_eq!(
            RunError::ArtifactUnavailable {
                message: "404".into()
            }
            .i18n_key(),
            "notification-artifact-unavailable"
        );
        assert!(RunError::NoFileSelected.detail().is_none());
    }
}
