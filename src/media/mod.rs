// SPDX-License-Identifier: MPL-2.0
//! Image previews and the metadata shown next to them.

pub mod image;
pub mod metadata;

// Re-export commonly used types
pub use image::{decode_preview, load_preview, sniff_mime_type, PreviewImage};
pub use metadata::{format_dimensions, format_file_size, DisplayMetadata, MetadataLabel};
