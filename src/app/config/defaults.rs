// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Service**: Upload endpoint and artifact storage location
//! - **Processing**: Artifact wait policy (settling delay, polling, backoff)
//! - **Notifications**: Toast auto-dismiss timing
//! - **Limits**: Payload size guards

// ==========================================================================
// Service Defaults
// ==========================================================================

/// Upload endpoint of the resize front-end server.
pub const DEFAULT_UPLOAD_URL: &str = "http://127.0.0.1:5000/upload";

/// Base URL of the bucket holding `resized-<file_key>` artifacts.
pub const DEFAULT_STORAGE_BASE_URL: &str = "https://sftirp-resized-990060747519.s3.amazonaws.com";

/// User agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("IcedResize/", env!("CARGO_PKG_VERSION"));

// ==========================================================================
// Processing Defaults
// ==========================================================================

/// Delay before the first artifact fetch (in seconds).
pub const DEFAULT_SETTLE_DELAY_SECS: u32 = 5;

/// Maximum settling delay (in seconds).
pub const MAX_SETTLE_DELAY_SECS: u32 = 120;

/// Default number of artifact fetch attempts.
pub const DEFAULT_MAX_FETCH_ATTEMPTS: u32 = 4;

/// Minimum number of artifact fetch attempts.
pub const MIN_MAX_FETCH_ATTEMPTS: u32 = 1;

/// Maximum number of artifact fetch attempts.
pub const MAX_MAX_FETCH_ATTEMPTS: u32 = 20;

/// Initial backoff between two fetch attempts (in milliseconds).
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 1_000;

/// Minimum backoff between two fetch attempts (in milliseconds).
pub const MIN_RETRY_BACKOFF_MS: u64 = 50;

/// Upper bound for the doubled backoff (in milliseconds).
pub const DEFAULT_MAX_RETRY_BACKOFF_MS: u64 = 8_000;

/// Hard ceiling for any configured backoff (in milliseconds).
pub const MAX_RETRY_BACKOFF_MS: u64 = 60_000;

// ==========================================================================
// Notification Defaults
// ==========================================================================

/// How long a toast stays visible (in seconds).
pub const DEFAULT_NOTIFICATION_SECS: u32 = 4;

/// Minimum toast display duration (in seconds).
pub const MIN_NOTIFICATION_SECS: u32 = 1;

/// Maximum toast display duration (in seconds).
pub const MAX_NOTIFICATION_SECS: u32 = 30;

// ==========================================================================
// Limits
// ==========================================================================

/// Largest artifact body accepted from storage (64 MB).
pub const MAX_ARTIFACT_SIZE_BYTES: u64 = 64 * 1024 * 1024;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_SETTLE_DELAY_SECS <= MAX_SETTLE_DELAY_SECS);

    assert!(MIN_MAX_FETCH_ATTEMPTS > 0);
    assert!(DEFAULT_MAX_FETCH_ATTEMPTS >= MIN_MAX_FETCH_ATTEMPTS);
    assert!(DEFAULT_MAX_FETCH_ATTEMPTS <= MAX_MAX_FETCH_ATTEMPTS);

    assert!(MIN_RETRY_BACKOFF_MS > 0);
    assert!(DEFAULT_RETRY_BACKOFF_MS >= MIN_RETRY_BACKOFF_MS);
    assert!(DEFAULT_MAX_RETRY_BACKOFF_MS >= DEFAULT_RETRY_BACKOFF_MS);
    assert!(MAX_RETRY_BACKOFF_MS >= DEFAULT_MAX_RETRY_BACKOFF_MS);

    assert!(MIN_NOTIFICATION_SECS > 0);
    assert!(DEFAULT_NOTIFICATION_SECS >= MIN_NOTIFICATION_SECS);
    assert!(DEFAULT_NOTIFICATION_SECS <= MAX_NOTIFICATION_SECS);
};
