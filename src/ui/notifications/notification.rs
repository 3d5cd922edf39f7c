// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` struct and `Severity` enum
//! used throughout the notification system.

use crate::error::RunError;
use crate::ui::design_tokens::palette;
use iced::Color;

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Severity level determines visual styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Plain information (blue accent).
    #[default]
    Neutral,
    /// Operation completed successfully (green accent).
    Success,
    /// Something went wrong (red accent).
    Error,
}

impl Severity {
    /// Returns the primary color for this severity level.
    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            Severity::Neutral => palette::INFO_500,
            Severity::Success => palette::SUCCESS_500,
            Severity::Error => palette::ERROR_500,
        }
    }

    /// Returns the glyph shown in front of the message.
    #[must_use]
    pub fn glyph(&self) -> &'static str {
        match self {
            Severity::Neutral => "i",
            Severity::Success => "✓",
            Severity::Error => "!",
        }
    }
}

/// A notification to be displayed to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Unique identifier for this notification.
    id: NotificationId,
    /// Severity level (determines color).
    severity: Severity,
    /// The i18n key for the notification message.
    message_key: String,
    /// Optional arguments for message interpolation.
    message_args: Vec<(String, String)>,
}

impl Notification {
    /// Creates a new notification with the given severity and message key.
    ///
    /// The `message_key` should be a valid i18n key that will be resolved
    /// at render time.
    pub fn new(severity: Severity, message_key: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            severity,
            message_key: message_key.into(),
            message_args: Vec::new(),
        }
    }

    /// Creates a neutral notification.
    pub fn neutral(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Neutral, message_key)
    }

    /// Creates a success notification.
    pub fn success(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Success, message_key)
    }

    /// Creates an error notification.
    pub fn error(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Error, message_key)
    }

    /// Creates the error notification describing a failed run.
    ///
    /// The error detail, if any, is passed as the `message` argument.
    pub fn from_run_error(err: &RunError) -> Self {
        let notification = Self::error(err.i18n_key());
        match err.detail() {
            Some(detail) => notification.with_arg("message", detail),
            None => notification,
        }
    }

    /// Adds an argument for message interpolation.
    ///
    /// Arguments are passed to the i18n system when resolving the message.
    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.message_args.push((key.into(), value.into()));
        self
    }

    /// Returns the notification's unique ID.
    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the severity level.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the i18n message key.
    #[must_use]
    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    /// Returns the message arguments for interpolation.
    #[must_use]
    pub fn message_args(&self) -> &[(String, String)] {
        &self.message_args
    }

    /// Returns the value of a message argument.
    #[must_use]
    pub fn arg(&self, key: &str) -> Option<&str> {
        self.message_args
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_ids_are_unique() {
        let n1 = Notification::success("test");
        let n2 = Notification::success("test");
        assert_ne!(n1.id(), n2.id());
    }

    #[test]
    fn severity_colors_are_distinct() {
        let neutral = Severity::Neutral.color();
        let success = Severity::Success.color();
        let error = Severity::Error.color();

        assert_ne!(neutral, success);
        assert_ne!(neutral, error);
        assert_ne!(success, error);
    }

    #[test]
    fn notification_builder_pattern_works() {
        let notification = Notification::error("test-error")
            .with_arg("filename", "test.png")
            .with_arg("size", "1024");

        assert_eq!(notification.severity(), Severity::Error);
        assert_eq!(notification.message_key(), "test-error");
        assert_eq!(notification.message_args().len(), 2);
        assert_eq!(notification.arg("size"), Some("1024"));
        assert_eq!(notification.arg("missing"), None);
    }

    #[test]
    fn notification_constructors_set_correct_severity() {
        assert_eq!(Notification::neutral("").severity(), Severity::Neutral);
        assert_eq!(Notification::success("").severity(), Severity::Success);
        assert_eq!(Notification::error("").severity(), Severity::Error);
    }

    #[test]
    fn run_error_notification_carries_detail() {
        let notification = Notification::from_run_error(&RunError::upload_rejected(Some(
            "disk full".into(),
        )));
        assert_eq!(notification.severity(), Severity::Error);
        assert_eq!(notification.message_key(), "notification-upload-failed");
        assert_eq!(notification.arg("message"), Some("disk full"));
    }

    #[test]
    fn no_file_notification_has_no_arguments() {
        let notification = Notification::from_run_error(&RunError::NoFileSelected);
        assert_eq!(notification.message_key(), "notification-no-file-selected");
        assert!(notification.message_args().is_empty());
    }
}
