// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for user feedback.
//!
//! One notification is visible at a time. A newer notification replaces the
//! visible one and restarts its display timer.
//!
//! # Components
//!
//! - [`notification`] - Core `Notification` struct with severity levels
//! - [`manager`] - `Manager` for the display lifecycle
//! - [`toast`] - Toast widget component for rendering notifications
//!
//! # Usage
//!
//! ```ignore
//! use crate::ui::notifications::{Manager, Notification};
//!
//! let mut manager = Manager::default();
//! manager.push(Notification::success("notification-resize-success"));
//!
//! // In your view function, render the toast
//! let toast_overlay = Toast::view_overlay(&manager, &i18n).map(Message::Notification);
//! ```

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
