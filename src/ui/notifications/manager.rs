// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `Manager` holds at most one visible notification. Pushing a new one
//! replaces the current one and restarts the display timer; a tick past the
//! display duration hides it.

use super::notification::{Notification, NotificationId, Severity};
use crate::app::config::DEFAULT_NOTIFICATION_SECS;
use std::time::{Duration, Instant};

/// Messages for notification state changes.
#[derive(Debug, Clone)]
pub enum Message {
    /// Dismiss a specific notification by ID.
    Dismiss(NotificationId),
    /// Tick for checking the auto-dismiss timer.
    Tick(Instant),
}

/// The notification on screen and when it was shown.
#[derive(Debug, Clone)]
struct Shown {
    notification: Notification,
    shown_at: Instant,
}

/// Manages the single visible notification.
#[derive(Debug)]
pub struct Manager {
    current: Option<Shown>,
    display_duration: Duration,
}

impl Default for Manager {
    fn default() -> Self {
        Self::new(Duration::from_secs(u64::from(DEFAULT_NOTIFICATION_SECS)))
    }
}

impl Manager {
    /// Creates an empty manager hiding notifications after `display_duration`.
    #[must_use]
    pub fn new(display_duration: Duration) -> Self {
        Self {
            current: None,
            display_duration,
        }
    }

    /// Shows `notification`, replacing whatever is on screen.
    pub fn push(&mut self, notification: Notification) {
        self.push_at(notification, Instant::now());
    }

    /// Shows `notification` as of `now`.
    pub fn push_at(&mut self, notification: Notification, now: Instant) {
        match notification.severity() {
            Severity::Error => tracing::warn!(
                key = notification.message_key(),
                args = ?notification.message_args(),
                "showing error notification"
            ),
            Severity::Neutral | Severity::Success => tracing::debug!(
                key = notification.message_key(),
                "showing notification"
            ),
        }
        self.current = Some(Shown {
            notification,
            shown_at: now,
        });
    }

    /// Dismisses a notification by its ID.
    ///
    /// Returns `true` if it was the visible one.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        if self
            .current
            .as_ref()
            .is_some_and(|shown| shown.notification.id() == id)
        {
            self.current = None;
            return true;
        }
        false
    }

    /// Hides the visible notification if it has been shown long enough.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Same as [`Manager::tick`] with an explicit clock reading.
    pub fn tick_at(&mut self, now: Instant) {
        if self.is_expired_at(now) {
            self.current = None;
        }
    }

    /// Returns whether the visible notification is due to disappear at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.current
            .as_ref()
            .is_some_and(|shown| now.saturating_duration_since(shown.shown_at) >= self.display_duration)
    }

    /// Handles a notification message.
    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => {
                self.dismiss(*id);
            }
            Message::Tick(now) => {
                self.tick_at(*now);
            }
        }
    }

    /// Returns the visible notification.
    #[must_use]
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref().map(|shown| &shown.notification)
    }

    /// Returns whether a notification is visible.
    #[must_use]
    pub fn has_notifications(&self) -> bool {
        self.current.is_some()
    }

    #[must_use]
    pub fn display_duration(&self) -> Duration {
        self.display_duration
    }

    /// Hides the visible notification.
    pub fn clear(&mut self) {
        self.current = None;
    }
}
