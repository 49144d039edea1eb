// SPDX-License-Identifier: GPL-3.0-only

//! Media library backend
//!
//! Persists captured photos into the pictures directory. Permission is a
//! writability probe: if the photo directory cannot be created the library
//! permission resolves as denied and the app never reaches live preview.

use crate::app::state::{CapturedImage, PermissionStatus};
use crate::errors::{PhotoError, PhotoResult};
use crate::storage;
use futures::future::BoxFuture;
use std::path::PathBuf;
use tracing::warn;

/// Media library trait
///
/// The capture screen saves through this so tests can swap in a recording
/// double without touching the filesystem.
pub trait LibraryCapability: Send + Sync {
    // ===== Permission =====

    /// Resolve the media library permission.
    ///
    /// Called once at startup, like the camera permission.
    fn request_permission(&self) -> BoxFuture<'static, PermissionStatus>;

    // ===== Persistence =====

    /// Write a captured photo to the library.
    ///
    /// # Returns
    /// * `Ok(PathBuf)` - Where the photo landed
    /// * `Err(PhotoError)` - The photo was not written
    fn persist(&self, image: CapturedImage) -> BoxFuture<'static, PhotoResult<PathBuf>>;
}

/// Filesystem-backed media library.
pub struct MediaLibrary {
    photos_dir: PathBuf,
}

impl MediaLibrary {
    pub fn new(photos_dir: PathBuf) -> Self {
        Self { photos_dir }
    }
}

impl LibraryCapability for MediaLibrary {
    fn request_permission(&self) -> BoxFuture<'static, PermissionStatus> {
        let dir = self.photos_dir.clone();
        Box::pin(async move {
            let probe = tokio::task::spawn_blocking(move || storage::ensure_dir(&dir))
                .await
                .unwrap_or_else(|e| Err(std::io::Error::other(format!("Task join error: {e}"))));
            match probe {
                Ok(()) => PermissionStatus::Granted,
                Err(e) => {
                    warn!(error = %e, "Photo directory not writable, denying library access");
                    PermissionStatus::Denied
                }
            }
        })
    }

    fn persist(&self, image: CapturedImage) -> BoxFuture<'static, PhotoResult<PathBuf>> {
        let dir = self.photos_dir.clone();
        Box::pin(async move {
            tokio::task::spawn_blocking(move || storage::write_photo(&dir, &image))
                .await
                .unwrap_or_else(|e| Err(PhotoError::SaveFailed(format!("Task join error: {e}"))))
        })
    }
}
