// SPDX-License-Identifier: MPL-2.0
//! Busy indicator and interactive control gating.
//!
//! While busy, the file picker and the start button are disabled and a
//! status bar describes the running step.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use iced::widget::{Container, Text};
use iced::{Element, Length};

/// Status shown while uploading.
pub const STATUS_UPLOADING: &str = "status-uploading";

/// Status shown while the resized artifact is produced and fetched.
pub const STATUS_GENERATING: &str = "status-generating";

/// Whether the window is busy and which step it is working on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingState {
    busy: bool,
    status_key: Option<&'static str>,
}

impl ProcessingState {
    /// Sets the busy flag and the status message key.
    ///
    /// The status is dropped when `busy` is `false`. Returns `true` if the
    /// visible state changed; repeated calls with the same values are no-ops.
    pub fn set_busy(&mut self, busy: bool, status_key: Option<&'static str>) -> bool {
        let next = Self {
            busy,
            status_key: if busy { status_key } else { None },
        };
        if *self == next {
            return false;
        }
        tracing::debug!(busy, status = ?next.status_key, "processing state changed");
        *self = next;
        true
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    #[must_use]
    pub fn status_key(&self) -> Option<&'static str> {
        self.status_key
    }

    /// Returns whether interactive controls accept input.
    #[must_use]
    pub fn controls_enabled(&self) -> bool {
        !self.busy
    }
}

/// Renders the status bar, or nothing when idle.
pub fn view<'a, Message: 'a>(state: &ProcessingState, i18n: &I18n) -> Option<Element<'a, Message>> {
    let key = state.status_key().filter(|_| state.is_busy())?;
    Some(
        Container::new(Text::new(i18n.tr(key)).size(typography::BODY))
            .width(Length::Fill)
            .padding(spacing::XS)
            .style(styles::container::status_bar)
            .into(),
    )
}
