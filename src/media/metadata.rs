// SPDX-License-Identifier: MPL-2.0
//! Display metadata for the original and resized images.
//!
//! Each preview panel shows an ordered list of labelled values. The order is
//! fixed per panel: the original panel leads with the file name, the resized
//! panel with the key assigned by the upload endpoint.

use crate::domain::upload::{type_tag, Dimensions, FileKey, RetrievedArtifact, SelectedFile};

/// Label of one metadata line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataLabel {
    FileName,
    FileKey,
    FileSize,
    Dimensions,
    Type,
}

impl MetadataLabel {
    /// English label text.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MetadataLabel::FileName => "File Name",
            MetadataLabel::FileKey => "File Key",
            MetadataLabel::FileSize => "File Size",
            MetadataLabel::Dimensions => "Dimensions",
            MetadataLabel::Type => "Type",
        }
    }

    /// Returns the i18n key of the label.
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            MetadataLabel::FileName => "metadata-file-name",
            MetadataLabel::FileKey => "metadata-file-key",
            MetadataLabel::FileSize => "metadata-file-size",
            MetadataLabel::Dimensions => "metadata-dimensions",
            MetadataLabel::Type => "metadata-type",
        }
    }
}

/// Ordered label/value pairs describing one image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayMetadata {
    entries: Vec<(MetadataLabel, String)>,
}

impl DisplayMetadata {
    /// Metadata of the file the user selected.
    #[must_use]
    pub fn original(file: &SelectedFile, dimensions: Option<Dimensions>) -> Self {
        Self {
            entries: vec![
                (MetadataLabel::FileName, file.name().to_string()),
                (MetadataLabel::FileSize, format_file_size(file.size())),
                (MetadataLabel::Dimensions, format_dimensions(dimensions)),
                (MetadataLabel::Type, type_tag(file.mime_type())),
            ],
        }
    }

    /// Metadata of the resized artifact.
    #[must_use]
    pub fn resized(
        file_key: &FileKey,
        artifact: &RetrievedArtifact,
        dimensions: Option<Dimensions>,
    ) -> Self {
        Self {
            entries: vec![
                (MetadataLabel::FileKey, file_key.to_string()),
                (MetadataLabel::FileSize, format_file_size(artifact.size())),
                (MetadataLabel::Dimensions, format_dimensions(dimensions)),
                (MetadataLabel::Type, type_tag(artifact.mime_type())),
            ],
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[(MetadataLabel, String)] {
        &self.entries
    }

    /// Returns the value shown for `label`, if the panel has that line.
    #[must_use]
    pub fn get(&self, label: MetadataLabel) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Formats a byte count as kilobytes with one decimal: `2048` gives `2.0 KB`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_file_size(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

/// Formats pixel dimensions as `W x H px`, or `? x ? px` when unknown.
#[must_use]
pub fn format_dimensions(dimensions: Option<Dimensions>) -> String {
    match dimensions {
        Some(d) => format!("{} x {} px", d.width, d.height),
        None => "? x ? px".to_string(),
    }
}
