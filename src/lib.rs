// SPDX-License-Identifier: MPL-2.0
//! `iced_resize` is a desktop client for a remote image resize service.
//!
//! It uploads an image, waits for the resized artifact to appear in storage,
//! shows both images with their metadata and saves the result on request.
//! The UI is built with the Iced GUI framework and localized with Fluent.

#![doc(html_root_url = "https://docs.rs/iced_resize/0.1.0")]

pub mod app;
pub mod application;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod infrastructure;
pub mod media;
pub mod ui;
