// SPDX-License-Identifier: GPL-3.0-only

//! Camera backend abstraction
//!
//! This module provides the trait-based camera abstraction the capture
//! screen runs against. Two providers implement it:
//!
//! - `synthetic`: generated test patterns, used when no input file is given
//! - `file_source`: serves a still image loaded from disk
//!
//! Permission, preview, and capture all go through [`CameraCapability`] so
//! the state machine never touches a concrete provider.

pub mod file_source;
pub mod synthetic;
pub mod types;

pub use file_source::FileCamera;
pub use synthetic::SyntheticCamera;
pub use types::*;

use crate::app::state::{CaptureSettings, CapturedImage, PermissionStatus};
use crate::errors::CameraResult;
use futures::future::BoxFuture;
use std::sync::Arc;

/// Camera provider trait
///
/// All camera providers must implement this trait to provide:
/// - Permission resolution
/// - Live preview frames
/// - Single-frame photo capture
pub trait CameraCapability: Send + Sync {
    // ===== Permission =====

    /// Resolve the camera permission for this provider
    ///
    /// Called once at startup. The returned status is final for the life
    /// of the process; a provider never revokes a granted permission.
    fn request_permission(&self) -> BoxFuture<'static, PermissionStatus>;

    // ===== Preview =====

    /// Produce the current preview frame for the given settings
    ///
    /// Polled once per render tick. Returns `None` when the provider
    /// cannot produce a frame, for example when permission was denied.
    fn preview_frame(&self, settings: CaptureSettings) -> Option<Arc<CameraFrame>>;

    // ===== Capture =====

    /// Capture a single photo with the given settings
    ///
    /// Includes the exposure delay, so completion arrives noticeably after
    /// the shutter. The returned image carries the settings it was taken
    /// with and a ready-to-write JPEG encoding.
    ///
    /// # Returns
    /// * `Ok(CapturedImage)` - Frame captured and encoded successfully
    /// * `Err(CameraError)` - Capture failed
    fn capture(&self, settings: CaptureSettings)
    -> BoxFuture<'static, CameraResult<CapturedImage>>;
}
