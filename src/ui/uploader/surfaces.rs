// SPDX-License-Identifier: MPL-2.0
//! Display surfaces filled by a run: previews, metadata lists and the
//! download target.

use crate::domain::upload::DownloadTarget;
use crate::media::PreviewImage;
use crate::ui::metadata_panel::MetadataPanels;

/// Everything a run shows on screen.
#[derive(Debug, Clone, Default)]
pub struct Surfaces {
    pub original_preview: Option<PreviewImage>,
    pub resized_preview: Option<PreviewImage>,
    /// Shows the "Processing..." placeholder in the resized area.
    pub resized_placeholder: bool,
    pub panels: MetadataPanels,
    /// Set only once the run is ready.
    pub download: Option<DownloadTarget>,
}

impl Surfaces {
    /// Clears every surface.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` if nothing from a previous run is visible.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        use crate::ui::metadata_panel::PanelTarget;

        self.original_preview.is_none()
            && self.resized_preview.is_none()
            && !self.resized_placeholder
            && self.panels.entries(PanelTarget::Original).is_empty()
            && self.panels.entries(PanelTarget::Resized).is_empty()
            && self.download.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::upload::{Dimensions, SelectedFile};
    use crate::media::DisplayMetadata;
    use crate::ui::metadata_panel::PanelTarget;
    use std::sync::Arc;

    #[test]
    fn reset_clears_everything() {
        let mut surfaces = Surfaces {
            original_preview: Some(PreviewImage::from_rgba(1, 1, vec![0; 4])),
            resized_preview: None,
            resized_placeholder: true,
            panels: MetadataPanels::default(),
            download: Some(DownloadTarget {
                url: "u".into(),
                file_name: "resized-a.png".into(),
                bytes: Arc::new(vec![1]),
            }),
        };
        let file = SelectedFile::new("a.png", "image/png", vec![0; 10]);
        surfaces.panels.render(
            PanelTarget::Original,
            &DisplayMetadata::original(&file, Some(Dimensions::new(1, 1))),
        );
        assert!(!surfaces.is_clear());

        surfaces.reset();
        assert!(surfaces.is_clear());
    }
}
