// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! This module organizes all UI-related code following a component-based architecture
//! with the Elm-style "state down, messages up" pattern.
//!
//! # Components
//!
//! - [`uploader`] - Upload workflow: run phases, effects and display surfaces
//! - [`metadata_panel`] - "Label: value" lists for the original and resized image
//! - [`processing`] - Busy flag, status bar and control gating
//! - [`notifications`] - Single toast notification with auto-dismiss
//!
//! # Shared Infrastructure
//!
//! - [`styles`] - Centralized styling (buttons, containers)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod design_tokens;
pub mod metadata_panel;
pub mod notifications;
pub mod processing;
pub mod styles;
pub mod theming;
pub mod uploader;
