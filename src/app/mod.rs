// SPDX-License-Identifier: MPL-2.0
//! Application root state and wiring between the upload workflow, the
//! notification manager and the HTTP client.
//!
//! The `App` struct owns the window-level state and translates messages into
//! side effects (dialogs, file reads, network jobs). The workflow rules live in
//! [`crate::ui::uploader`]; this module only routes.

pub mod config;
mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::i18n::fluent::I18n;
use crate::infrastructure::HttpResizeClient;
use crate::ui::notifications::{self, Notification};
use crate::ui::theming::ThemeMode;
use crate::ui::uploader::{self, Runner};
use config::Config;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Job runner shared by every task spawned from the window.
pub type SharedRunner = Arc<Runner<HttpResizeClient>>;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    theme_mode: ThemeMode,
    uploader: uploader::State,
    /// Toast notification manager for user feedback.
    notifications: notifications::Manager,
    /// `None` when the HTTP client could not be built.
    runner: Option<SharedRunner>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("phase", self.uploader.phase())
            .field("has_client", &self.runner.is_some())
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;
pub const WINDOW_DEFAULT_WIDTH: u32 = 900;
pub const MIN_WINDOW_HEIGHT: u32 = 560;
pub const MIN_WINDOW_WIDTH: u32 = 700;

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads the configuration, applies CLI overrides and optionally kicks off
    /// reading the file passed on the command line.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (mut config, config_warning) = config::load();
        if let Some(url) = flags.upload_url {
            config.service.upload_url = Some(url);
        }
        if let Some(url) = flags.storage_url {
            config.service.storage_base_url = Some(url);
        }

        let mut app = Self::from_config(&config, flags.lang);
        if let Some(key) = config_warning {
            app.notifications.push(Notification::neutral(key));
        }

        let task = match flags.file_path {
            Some(path) => update::read_file(PathBuf::from(path)),
            None => Task::none(),
        };
        (app, task)
    }

    /// Builds the application state from a loaded configuration.
    fn from_config(config: &Config, lang: Option<String>) -> Self {
        let mut notifications =
            notifications::Manager::new(config.notifications.display_duration());

        let runner = match HttpResizeClient::from_config(config) {
            Ok(client) => {
                tracing::info!(
                    upload_url = client.upload_url(),
                    storage = config.storage_base_url(),
                    "resize service configured"
                );
                Some(Arc::new(Runner::new(client, config.processing.await_policy())))
            }
            Err(err) => {
                tracing::error!(error = %err, "HTTP client could not be created");
                notifications.push(
                    Notification::error("notification-client-error")
                        .with_arg("message", err.to_string()),
                );
                None
            }
        };

        Self {
            i18n: I18n::new(lang, config),
            theme_mode: config.general.theme_mode,
            uploader: uploader::State::new(
                config.storage_base_url(),
                config.processing.preview_failure,
            ),
            notifications,
            runner,
        }
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        match self.uploader.selected() {
            Some(file) => format!("{} - {app_name}", file.name()),
            None => app_name,
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.to_iced_theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(self.notifications.has_notifications()),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            uploader: &mut self.uploader,
            notifications: &mut self.notifications,
            runner: self.runner.as_ref(),
        };

        match message {
            Message::Uploader(msg) => update::handle_uploader_message(&mut ctx, msg),
            Message::Notification(msg) => {
                ctx.notifications.handle_message(&msg);
                Task::none()
            }
            Message::OpenFileDialog => update::handle_open_file_dialog(&ctx),
            Message::OpenFileDialogResult(path) => match path {
                Some(path) => update::handle_file_path(&ctx, path),
                None => Task::none(),
            },
            Message::FileDropped(path) => update::handle_file_path(&ctx, path),
            Message::FileRead(result) => update::handle_file_read(&mut ctx, result),
            Message::DownloadDialogResult { path, target } => {
                update::handle_download_dialog_result(path, target)
            }
            Message::DownloadSaved(result) => update::handle_download_saved(&mut ctx, result),
            Message::Tick(now) => {
                ctx.notifications
                    .handle_message(&notifications::NotificationMessage::Tick(now));
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            uploader: &self.uploader,
            notifications: &self.notifications,
        })
    }
}
