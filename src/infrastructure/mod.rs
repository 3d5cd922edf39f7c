// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`. These adapters wrap external dependencies like the
//! HTTP client.
//!
//! # Available Adapters
//!
//! - [`http`]: Upload endpoint and artifact storage over HTTP
//!   (implements [`UploadService`] and [`ArtifactSource`])
//!
//! [`UploadService`]: crate::application::port::UploadService
//! [`ArtifactSource`]: crate::application::port::ArtifactSource

pub mod http;

// Re-export main types for convenience
pub use http::HttpResizeClient;
