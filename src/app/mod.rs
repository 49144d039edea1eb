// SPDX-License-Identifier: GPL-3.0-only

//! Main application module
//!
//! This module contains the capture-screen state machine and its message
//! handling. Rendering and effect execution live in the terminal runtime
//! and the CLI; everything here is pure state transition logic.
//!
//! # Architecture
//!
//! - `state`: Application state types (AppModel, Message, Command, etc.)
//! - `update`: Message dispatch
//! - `handlers`: Message handlers grouped by functional domain
//!
//! # Main Types
//!
//! - `AppModel`: Capture-screen state with permission and photo tracking
//! - `Message`: All user intents and effect completions
//! - `Command`: Side effects requested by the state machine

mod handlers;
pub mod state;
mod update;

// Re-export public API
pub use state::{
    AppModel, CaptureSettings, CapturedImage, Command, FlashMode, LensFacing, Message,
    PermissionStatus, ScreenState,
};
