// SPDX-License-Identifier: MPL-2.0
//! Metadata lists shown under the original and resized previews.
//!
//! Rendering a panel replaces its previous content entirely; lines never
//! accumulate across runs.

use crate::i18n::fluent::I18n;
use crate::media::metadata::{DisplayMetadata, MetadataLabel};
use crate::ui::design_tokens::{spacing, typography};
use iced::widget::{Column, Text};
use iced::{Element, Length};

/// Which panel a metadata list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelTarget {
    Original,
    Resized,
}

/// One rendered `label: value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEntry {
    pub label: MetadataLabel,
    pub value: String,
}

impl RenderedEntry {
    /// Returns the line with the English label, e.g. `File Size: 2.0 KB`.
    #[must_use]
    pub fn text(&self) -> String {
        format!("{}: {}", self.label.as_str(), self.value)
    }

    /// Returns the line with the label in the current locale.
    #[must_use]
    pub fn localized_text(&self, i18n: &I18n) -> String {
        format!("{}: {}", i18n.tr(self.label.i18n_key()), self.value)
    }
}

/// Content of both metadata panels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataPanels {
    original: Vec<RenderedEntry>,
    resized: Vec<RenderedEntry>,
}

impl MetadataPanels {
    /// Replaces the content of `target` with one line per metadata entry.
    pub fn render(&mut self, target: PanelTarget, metadata: &DisplayMetadata) {
        let lines = metadata
            .entries()
            .iter()
            .map(|(label, value)| RenderedEntry {
                label: *label,
                value: value.clone(),
            })
            .collect();
        *self.panel_mut(target) = lines;
    }

    #[must_use]
    pub fn entries(&self, target: PanelTarget) -> &[RenderedEntry] {
        match target {
            PanelTarget::Original => &self.original,
            PanelTarget::Resized => &self.resized,
        }
    }

    /// Returns the English lines of `target`, in display order.
    #[must_use]
    pub fn lines(&self, target: PanelTarget) -> Vec<String> {
        self.entries(target).iter().map(RenderedEntry::text).collect()
    }

    fn panel_mut(&mut self, target: PanelTarget) -> &mut Vec<RenderedEntry> {
        match target {
            PanelTarget::Original => &mut self.original,
            PanelTarget::Resized => &mut self.resized,
        }
    }
}

/// Renders the lines of one panel in the current locale.
pub fn view<'a, Message: 'a>(entries: &'a [RenderedEntry], i18n: &'a I18n) -> Element<'a, Message> {
    entries
        .iter()
        .fold(Column::new().spacing(spacing::XXS), |column, entry| {
            column.push(Text::new(entry.localized_text(i18n)).size(typography::BODY))
        })
        .width(Length::Fill)
        .into()
}
