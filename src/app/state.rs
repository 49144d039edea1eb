// SPDX-License-Identifier: GPL-3.0-only

//! Application state management

use crate::backends::camera::types::CameraFrame;
use crate::config::Config;
use crate::errors::{CameraError, PhotoError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

/// Resolution of an asynchronous permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionStatus {
    /// Not yet resolved
    #[default]
    Unknown,
    /// Access granted
    Granted,
    /// Access denied
    Denied,
}

impl PermissionStatus {
    /// Check if the request has resolved either way
    pub fn is_resolved(&self) -> bool {
        !matches!(self, PermissionStatus::Unknown)
    }

    /// Check if access was granted
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

/// Which physical lens is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LensFacing {
    /// Rear-facing lens
    #[default]
    Back,
    /// Front-facing (selfie) lens
    Front,
}

impl LensFacing {
    /// The other lens
    pub fn toggled(self) -> Self {
        match self {
            LensFacing::Back => LensFacing::Front,
            LensFacing::Front => LensFacing::Back,
        }
    }

    /// Display name for the status bar
    pub fn display_name(&self) -> &'static str {
        match self {
            LensFacing::Back => "Back",
            LensFacing::Front => "Front",
        }
    }
}

/// Flash mode applied to preview and captures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashMode {
    /// Flash disabled
    #[default]
    Off,
    /// Flash fires on capture and lifts the preview
    On,
}

impl FlashMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            FlashMode::Off => FlashMode::On,
            FlashMode::On => FlashMode::Off,
        }
    }

    /// Check if the flash is enabled
    pub fn is_on(&self) -> bool {
        matches!(self, FlashMode::On)
    }

    /// Display name for the status bar
    pub fn display_name(&self) -> &'static str {
        match self {
            FlashMode::Off => "Off",
            FlashMode::On => "On",
        }
    }
}

/// Capture settings in effect for the preview and the next still
///
/// Mutated only by explicit toggle intents; survives capture cycles
/// unchanged (discard and save do not reset it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CaptureSettings {
    pub facing: LensFacing,
    pub flash: FlashMode,
}

impl CaptureSettings {
    /// Flip the active lens
    pub fn toggle_facing(&mut self) {
        self.facing = self.facing.toggled();
    }

    /// Flip the flash mode
    pub fn toggle_flash(&mut self) {
        self.flash = self.flash.toggled();
    }
}

/// A captured still, held by the controller from the moment capture
/// succeeds until it is discarded or persisted.
///
/// Payloads are `Arc`-shared so clones are cheap: the persist command
/// carries a clone while the controller keeps its copy until the save
/// completion arrives. Identity is the `id`.
#[derive(Clone)]
pub struct CapturedImage {
    /// Unique identity of this capture
    pub id: Uuid,
    /// Full-resolution pixels for the preview screen
    pub frame: Arc<CameraFrame>,
    /// Encoded full-quality JPEG
    pub jpeg: Arc<[u8]>,
    /// Wall-clock capture time (used for the persisted filename)
    pub captured_at: chrono::DateTime<chrono::Local>,
    /// Settings that produced this still
    pub settings: CaptureSettings,
}

impl CapturedImage {
    /// Wrap a captured frame and its encoding into a fresh handle.
    pub fn new(frame: Arc<CameraFrame>, jpeg: Vec<u8>, settings: CaptureSettings) -> Self {
        Self {
            id: Uuid::new_v4(),
            frame,
            jpeg: Arc::from(jpeg),
            captured_at: chrono::Local::now(),
            settings,
        }
    }
}

impl std::fmt::Debug for CapturedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CapturedImage {{ id: {}, {}x{}, {} bytes }}",
            self.id,
            self.frame.width,
            self.frame.height,
            self.jpeg.len()
        )
    }
}

/// The screen presented to the user, derived from the model
///
/// Never stored: `AppModel::screen_state` computes it from the two
/// permission fields and whether a still is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// Permissions still resolving
    Loading,
    /// Either permission denied; dead end
    PermissionDenied,
    /// Live preview, shutter available
    Live,
    /// Holding a captured still, save/discard available
    Preview,
}

/// The capture screen controller's model.
///
/// Owns the permission results, the capture settings, and the held still;
/// all mutation happens in the message handlers.
pub struct AppModel {
    /// Configuration loaded at startup
    pub config: Config,
    /// Camera permission resolution (set once)
    pub camera_permission: PermissionStatus,
    /// Library permission resolution (set once)
    pub library_permission: PermissionStatus,
    /// Settings applied to the preview and the next capture
    pub settings: CaptureSettings,
    /// The held still, if any
    pub image: Option<CapturedImage>,
    /// Whether a capture is in flight
    pub is_capturing: bool,
    /// Whether a save is in flight
    pub is_saving: bool,
    /// One-line status surfaced in the status bar
    pub status: Option<String>,
    /// Photos saved this session
    pub photos_saved: u32,
}

impl AppModel {
    /// Build a model seeded from the configured defaults.
    pub fn new(config: Config) -> Self {
        let settings = config.initial_settings();
        Self {
            config,
            camera_permission: PermissionStatus::default(),
            library_permission: PermissionStatus::default(),
            settings,
            image: None,
            is_capturing: false,
            is_saving: false,
            status: None,
            photos_saved: 0,
        }
    }

    /// Derive the current screen from permissions and the held still.
    ///
    /// Invariants: `Preview` iff a still is held; `Live` iff both
    /// permissions granted and no still is held.
    pub fn screen_state(&self) -> ScreenState {
        if !self.camera_permission.is_resolved() || !self.library_permission.is_resolved() {
            return ScreenState::Loading;
        }
        if !self.camera_permission.is_granted() || !self.library_permission.is_granted() {
            return ScreenState::PermissionDenied;
        }
        if self.image.is_some() {
            ScreenState::Preview
        } else {
            ScreenState::Live
        }
    }
}

/// Messages driving the capture screen controller.
///
/// Messages are organized into logical groups:
/// - **Permission Resolution**: startup permission results
/// - **Live Intents**: flash/facing toggles and the shutter
/// - **Capture Completion**: result of an in-flight capture
/// - **Preview Intents**: save or discard the held still
/// - **Save Completion**: result of an in-flight persist
#[derive(Debug, Clone)]
pub enum Message {
    // ===== Permission Resolution =====
    /// Camera permission request resolved
    CameraPermission(PermissionStatus),
    /// Library permission request resolved
    LibraryPermission(PermissionStatus),

    // ===== Live Intents =====
    /// Flip the flash mode
    ToggleFlash,
    /// Flip the active lens
    ToggleFacing,
    /// Request a still capture with the current settings
    Shutter,

    // ===== Capture Completion =====
    /// An in-flight capture finished
    CaptureComplete(Result<CapturedImage, CameraError>),

    // ===== Preview Intents =====
    /// Drop the held still and return to the live view
    Discard,
    /// Persist the held still to the photo library
    Save,

    // ===== Save Completion =====
    /// An in-flight persist finished with the saved path
    SaveComplete(Result<PathBuf, PhotoError>),
}

/// Effects returned by `update` for the runtime to execute.
///
/// The controller performs no I/O itself: it emits commands, the runtime
/// resolves them against the capability providers and feeds each
/// completion back in as a message.
#[derive(Debug, Clone)]
pub enum Command {
    /// Resolve both permissions (two independent async requests)
    RequestPermissions,
    /// Capture a still with the given settings
    Capture(CaptureSettings),
    /// Persist a captured still to the library
    Persist(CapturedImage),
}
