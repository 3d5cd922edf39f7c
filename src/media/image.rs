// SPDX-License-Identifier: MPL-2.0
//! Preview decoding for uploaded files and resized artifacts.
//!
//! Decoding runs on the blocking thread pool and completes exactly once,
//! either with a displayable [`PreviewImage`] or with
//! [`RunError::PreviewDecodeFailed`].

use crate::domain::upload::{Dimensions, UNKNOWN_MIME_TYPE};
use crate::error::RunError;
use iced::widget::image;
use image_rs::{GenericImageView, ImageFormat};
use std::path::Path;
use std::sync::Arc;

/// A decoded image ready to be shown in a preview surface.
#[derive(Debug, Clone)]
pub struct PreviewImage {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl PreviewImage {
    /// Creates a preview from RGBA pixels.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            handle: image::Handle::from_rgba(width, height, pixels),
            width,
            height,
        }
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }
}

/// Decodes encoded image bytes on the current thread.
///
/// # Errors
///
/// Returns [`RunError::PreviewDecodeFailed`] if the bytes are empty or not a
/// supported image.
pub fn decode_preview(bytes: &[u8]) -> Result<PreviewImage, RunError> {
    if bytes.is_empty() {
        return Err(RunError::PreviewDecodeFailed {
            message: "empty image data".to_string(),
        });
    }

    let decoded =
        image_rs::load_from_memory(bytes).map_err(|err| RunError::PreviewDecodeFailed {
            message: err.to_string(),
        })?;
    let (width, height) = decoded.dimensions();
    let pixels = decoded.to_rgba8().into_vec();

    Ok(PreviewImage::from_rgba(width, height, pixels))
}

/// Decodes a preview off the UI thread and waits for the outcome.
///
/// # Errors
///
/// Returns [`RunError::PreviewDecodeFailed`] if decoding fails or the decoder
/// task is lost before reporting.
pub async fn load_preview(bytes: Arc<Vec<u8>>) -> Result<PreviewImage, RunError> {
    tokio::task::spawn_blocking(move || decode_preview(&bytes))
        .await
        .map_err(|err| RunError::PreviewDecodeFailed {
            message: err.to_string(),
        })?
}

/// Identifies the MIME type of image bytes.
///
/// Content sniffing wins; the file extension is the fallback, and
/// `application/octet-stream` is used when neither is recognized.
#[must_use]
pub fn sniff_mime_type(bytes: &[u8], file_name: &str) -> String {
    image_rs::guess_format(bytes)
        .or_else(|_| ImageFormat::from_path(Path::new(file_name)))
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| UNKNOWN_MIME_TYPE.to_string())
}
