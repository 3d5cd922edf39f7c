// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`artifact_wait`]: Settling delay and polling policy for resized artifacts
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Presentation layer uses application layer services

pub mod artifact_wait;
pub mod port;

pub use artifact_wait::{await_artifact, AwaitPolicy};
