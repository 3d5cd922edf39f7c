// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the application layer remains
//! independent of concrete implementations.
//!
//! # Available Ports
//!
//! - [`transfer`]: Uploading a file and fetching its resized artifact
//!
//! # Design Notes
//!
//! - All traits use domain types only (no `reqwest` types, no Iced handles)
//! - Returned futures are `Send` so callers can hand them to `Task::perform`
//! - Methods return `Result` with domain error types

pub mod transfer;

// Re-export main types for convenience
pub use transfer::{ArtifactSource, FetchError, UploadService};
