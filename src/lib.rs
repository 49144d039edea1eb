// SPDX-License-Identifier: GPL-3.0-only

//! Shutter - a single-screen camera for the terminal
//!
//! This library provides the core functionality for the shutter application:
//! a capture screen with a live preview that takes still photos and saves
//! them to the photo library.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`app`]: Capture screen state machine and message handlers
//! - [`backends`]: Camera and media library providers
//! - [`terminal`]: Interactive terminal frontend
//! - [`config`]: User configuration handling
//! - [`storage`]: Photo encoding and file storage
//!
//! # Example
//!
//! ```ignore
//! // This is an interactive application, typically run via:
//! // shutter
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod storage;
pub mod terminal;

// Re-export commonly used types
pub use app::{AppModel, CaptureSettings, Command, Message, ScreenState};
pub use config::Config;
