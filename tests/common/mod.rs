// SPDX-License-Identifier: GPL-3.0-only

//! Test doubles for the capture screen integration tests
//!
//! Provides scripted camera and library providers plus a command runner
//! that resolves effects inline, the way the interactive runtime does.

use futures::future::BoxFuture;
use shutter::app::state::{
    CaptureSettings, CapturedImage, Command, Message, PermissionStatus,
};
use shutter::app::AppModel;
use shutter::backends::camera::types::{CameraFrame, PixelFormat};
use shutter::backends::camera::CameraCapability;
use shutter::backends::library::LibraryCapability;
use shutter::errors::{CameraError, CameraResult, PhotoError, PhotoResult};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// A solid mid-gray RGB frame of the given size.
pub fn solid_frame(width: u32, height: u32) -> CameraFrame {
    let data = vec![128u8; (width * height * 3) as usize];
    CameraFrame::new(width, height, PixelFormat::Rgb8, data)
}

/// A captured image over a solid frame with a placeholder JPEG payload.
pub fn make_image(width: u32, height: u32, settings: CaptureSettings) -> CapturedImage {
    // SOI + EOI is enough for tests that never decode the payload.
    let jpeg = vec![0xFF, 0xD8, 0xFF, 0xD9];
    CapturedImage::new(Arc::new(solid_frame(width, height)), jpeg, settings)
}

/// Resolve both permissions as granted, landing the model on live preview.
pub fn grant_permissions(model: &mut AppModel) {
    model.update(Message::CameraPermission(PermissionStatus::Granted));
    model.update(Message::LibraryPermission(PermissionStatus::Granted));
}

/// Camera double with a scripted permission and capture outcome.
pub struct MockCamera {
    permission: PermissionStatus,
    capture_error: Option<CameraError>,
    frame_width: u32,
    frame_height: u32,
}

impl MockCamera {
    pub fn granted() -> Self {
        Self {
            permission: PermissionStatus::Granted,
            capture_error: None,
            frame_width: 4,
            frame_height: 2,
        }
    }

    pub fn denied() -> Self {
        Self {
            permission: PermissionStatus::Denied,
            ..Self::granted()
        }
    }

    /// Make every capture fail with the given error.
    pub fn with_capture_error(mut self, error: CameraError) -> Self {
        self.capture_error = Some(error);
        self
    }
}

impl CameraCapability for MockCamera {
    fn request_permission(&self) -> BoxFuture<'static, PermissionStatus> {
        let status = self.permission;
        Box::pin(async move { status })
    }

    fn preview_frame(&self, _settings: CaptureSettings) -> Option<Arc<CameraFrame>> {
        if self.permission.is_granted() {
            Some(Arc::new(solid_frame(self.frame_width, self.frame_height)))
        } else {
            None
        }
    }

    fn capture(
        &self,
        settings: CaptureSettings,
    ) -> BoxFuture<'static, CameraResult<CapturedImage>> {
        let result = match &self.capture_error {
            Some(e) => Err(e.clone()),
            None => Ok(make_image(self.frame_width, self.frame_height, settings)),
        };
        Box::pin(async move { result })
    }
}

/// Library double that records the id of every photo persisted through it.
pub struct MockLibrary {
    permission: PermissionStatus,
    save_error: Option<PhotoError>,
    persisted: Arc<Mutex<Vec<Uuid>>>,
}

impl MockLibrary {
    pub fn granted() -> Self {
        Self {
            permission: PermissionStatus::Granted,
            save_error: None,
            persisted: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn denied() -> Self {
        Self {
            permission: PermissionStatus::Denied,
            ..Self::granted()
        }
    }

    /// Make every persist fail with the given error.
    pub fn with_save_error(mut self, error: PhotoError) -> Self {
        self.save_error = Some(error);
        self
    }

    /// Ids of every photo persisted through this double, in order.
    pub fn persisted_ids(&self) -> Vec<Uuid> {
        self.persisted.lock().unwrap().clone()
    }
}

impl LibraryCapability for MockLibrary {
    fn request_permission(&self) -> BoxFuture<'static, PermissionStatus> {
        let status = self.permission;
        Box::pin(async move { status })
    }

    fn persist(&self, image: CapturedImage) -> BoxFuture<'static, PhotoResult<PathBuf>> {
        let result = match &self.save_error {
            Some(e) => Err(e.clone()),
            None => {
                self.persisted.lock().unwrap().push(image.id);
                Ok(PathBuf::from(format!("/photos/IMG_{}.jpg", image.id.simple())))
            }
        };
        Box::pin(async move { result })
    }
}

/// Resolve commands against the doubles and feed each completion back into
/// the model, looping until no commands remain. Mock futures resolve
/// immediately, so a plain executor suffices.
pub fn run_commands(
    model: &mut AppModel,
    commands: Vec<Command>,
    camera: &dyn CameraCapability,
    library: &dyn LibraryCapability,
) {
    let mut pending = commands;
    while !pending.is_empty() {
        let mut next = Vec::new();
        for command in pending {
            match command {
                Command::RequestPermissions => {
                    let camera_status = futures::executor::block_on(camera.request_permission());
                    let library_status = futures::executor::block_on(library.request_permission());
                    next.extend(model.update(Message::CameraPermission(camera_status)));
                    next.extend(model.update(Message::LibraryPermission(library_status)));
                }
                Command::Capture(settings) => {
                    let result = futures::executor::block_on(camera.capture(settings));
                    next.extend(model.update(Message::CaptureComplete(result)));
                }
                Command::Persist(image) => {
                    let result = futures::executor::block_on(library.persist(image));
                    next.extend(model.update(Message::SaveComplete(result)));
                }
            }
        }
        pending = next;
    }
}
