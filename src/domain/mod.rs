// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core upload workflow types with ZERO external dependencies.
//!
//! This module contains pure value objects describing one upload run:
//! the selected file, the key returned by the upload endpoint, the location
//! of the resized artifact and the artifact bytes once retrieved.
//! It has no dependencies on external crates (except `std`) so every rule
//! here can be tested without a window or a network.
//!
//! # Modules
//!
//! - [`upload`]: Upload run types ([`SelectedFile`](upload::SelectedFile),
//!   [`FileKey`](upload::FileKey), [`ArtifactRef`](upload::ArtifactRef),
//!   [`RetrievedArtifact`](upload::RetrievedArtifact), [`RunId`](upload::RunId))

pub mod upload;
