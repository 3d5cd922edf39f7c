// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! A single window: file controls, status bar, the original and resized
//! panels side by side, the download control and the toast overlay.

use super::Message;
use crate::i18n::fluent::I18n;
use crate::media::PreviewImage;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::metadata_panel::{self, PanelTarget};
use crate::ui::notifications::{self, Toast};
use crate::ui::processing;
use crate::ui::styles;
use crate::ui::uploader;
use iced::widget::{button, image, Column, Container, Row, Stack, Text};
use iced::{alignment, ContentFit, Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub uploader: &'a uploader::State,
    pub notifications: &'a notifications::Manager,
}

/// Renders the window.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let ViewContext {
        i18n,
        uploader,
        notifications,
    } = ctx;
    let surfaces = uploader.surfaces();

    let mut content = Column::new()
        .spacing(spacing::MD)
        .padding(spacing::LG)
        .push(Text::new(i18n.tr("app-heading")).size(typography::TITLE_LG))
        .push(view_controls(uploader, i18n));

    if let Some(status) = processing::view(uploader.processing(), i18n) {
        content = content.push(status);
    }

    let panels = Row::new()
        .spacing(spacing::MD)
        .push(view_panel(
            i18n.tr("panel-original"),
            surfaces.original_preview.as_ref(),
            false,
            metadata_panel::view(surfaces.panels.entries(PanelTarget::Original), i18n),
            i18n,
        ))
        .push(view_panel(
            i18n.tr("panel-resized"),
            surfaces.resized_preview.as_ref(),
            surfaces.resized_placeholder,
            metadata_panel::view(surfaces.panels.entries(PanelTarget::Resized), i18n),
            i18n,
        ));
    content = content.push(panels);

    if uploader.can_download() {
        content = content.push(
            button(Text::new(i18n.tr("button-download")).size(typography::BODY))
                .on_press(Message::Uploader(uploader::Message::DownloadRequested))
                .padding(spacing::SM)
                .style(styles::button::primary),
        );
    }

    let base = Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill);
    let overlay = Toast::view_overlay(notifications, i18n).map(Message::Notification);

    Stack::new().push(base).push(overlay).into()
}

fn view_controls<'a>(uploader: &'a uploader::State, i18n: &'a I18n) -> Element<'a, Message> {
    let enabled = uploader.processing().controls_enabled();
    let file_label = uploader
        .selected()
        .map_or_else(|| i18n.tr("file-none-selected"), |file| file.name().to_string());

    let choose = button(Text::new(i18n.tr("button-choose-file")).size(typography::BODY))
        .on_press_maybe(enabled.then_some(Message::OpenFileDialog))
        .padding(spacing::SM)
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .style(styles::button::secondary);
    let start = button(Text::new(i18n.tr("button-start")).size(typography::BODY))
        .on_press_maybe(enabled.then_some(Message::Uploader(uploader::Message::StartRequested)))
        .padding(spacing::SM)
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .style(styles::button::primary);

    let file_info = Column::new()
        .push(Text::new(file_label).size(typography::BODY))
        .push(Text::new(i18n.tr("drop-hint")).size(typography::CAPTION));

    Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(choose)
        .push(Container::new(file_info).width(Length::Fill))
        .push(start)
        .into()
}

fn view_panel<'a>(
    title: String,
    preview: Option<&'a PreviewImage>,
    processing: bool,
    metadata: Element<'a, Message>,
    i18n: &'a I18n,
) -> Element<'a, Message> {
    let image_area: Element<'a, Message> = match preview {
        Some(preview) => Container::new(
            image(preview.handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fixed(sizing::PREVIEW_HEIGHT))
        .into(),
        None => {
            let key = if processing {
                "resized-processing"
            } else {
                "preview-empty"
            };
            Container::new(Text::new(i18n.tr(key)).size(typography::BODY))
                .width(Length::Fill)
                .height(Length::Fixed(sizing::PREVIEW_HEIGHT))
                .align_x(alignment::Horizontal::Center)
                .align_y(alignment::Vertical::Center)
                .style(styles::container::placeholder)
                .into()
        }
    };

    Container::new(
        Column::new()
            .spacing(spacing::SM)
            .push(Text::new(title).size(typography::TITLE_SM))
            .push(image_area)
            .push(metadata),
    )
    .width(Length::Fill)
    .padding(spacing::MD)
    .style(styles::container::panel)
    .into()
}
