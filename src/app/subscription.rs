// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.

use super::Message;
use iced::{event, time, window, Subscription};
use std::time::Duration;

/// Interval of the notification auto-dismiss tick.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Routes files dropped on the window to the file selection.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, _window_id| {
        if let event::Event::Window(window::Event::FileDropped(path)) = event {
            return Some(Message::FileDropped(path));
        }
        None
    })
}

/// Creates a periodic tick subscription while a notification is visible.
pub fn create_tick_subscription(has_notifications: bool) -> Subscription<Message> {
    if has_notifications {
        time::every(TICK_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
