// SPDX-License-Identifier: GPL-3.0-only

//! File-backed camera provider
//!
//! Serves a still image loaded from disk as every preview frame and every
//! capture. A missing or undecodable file resolves the camera permission
//! as denied, which exercises the permission-denied screen end to end.

use super::CameraCapability;
use super::types::{CameraFrame, PixelFormat};
use crate::app::state::{CaptureSettings, CapturedImage, LensFacing, PermissionStatus};
use crate::constants::{formats, photos, timing};
use crate::errors::{CameraError, CameraResult};
use crate::storage;
use futures::future::BoxFuture;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Camera provider that serves one still image from disk.
pub struct FileCamera {
    path: PathBuf,
    source: Option<Arc<CameraFrame>>,
    jpeg_quality: u8,
    mirror_front: bool,
}

impl FileCamera {
    /// Load the image at `path`.
    ///
    /// A failed load is not an error here; it surfaces later as a denied
    /// camera permission.
    pub fn new(path: &Path, jpeg_quality: u8, mirror_front: bool) -> Self {
        if let Some(ext) = path.extension().and_then(|e| e.to_str())
            && !photos::is_image_extension(ext)
        {
            warn!(path = %path.display(), "Unrecognized image extension, attempting to load anyway");
        }

        let source = match image::open(path) {
            Ok(img) => {
                let rgb = img.to_rgb8();
                let (width, height) = rgb.dimensions();
                info!(path = %path.display(), width, height, "Loaded camera input file");
                Some(Arc::new(CameraFrame::new(
                    width,
                    height,
                    PixelFormat::Rgb8,
                    rgb.into_raw(),
                )))
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to load camera input file");
                None
            }
        };

        Self {
            path: path.to_path_buf(),
            source,
            jpeg_quality,
            mirror_front,
        }
    }
}

impl CameraCapability for FileCamera {
    fn request_permission(&self) -> BoxFuture<'static, PermissionStatus> {
        let status = if self.source.is_some() {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        };
        Box::pin(async move { status })
    }

    fn preview_frame(&self, settings: CaptureSettings) -> Option<Arc<CameraFrame>> {
        let source = self.source.as_ref()?;
        Some(Arc::new(compose(source, settings, self.mirror_front)))
    }

    fn capture(
        &self,
        settings: CaptureSettings,
    ) -> BoxFuture<'static, CameraResult<CapturedImage>> {
        let source = self.source.clone();
        let path = self.path.clone();
        let quality = self.jpeg_quality;
        let mirror_front = self.mirror_front;
        Box::pin(async move {
            tokio::time::sleep(timing::EXPOSURE_DELAY).await;
            let Some(source) = source else {
                return Err(CameraError::SourceUnavailable(path.display().to_string()));
            };
            let frame = Arc::new(compose(&source, settings, mirror_front));
            let jpeg = storage::encode_jpeg(&frame, quality)
                .map_err(|e| CameraError::CaptureFailed(e.to_string()))?;
            Ok(CapturedImage::new(frame, jpeg, settings))
        })
    }
}

/// Apply the settings-dependent transforms to the source still.
///
/// The front lens is mirrored so it reads like a selfie; flash lifts the
/// brightness the same way the synthetic provider does.
fn compose(source: &CameraFrame, settings: CaptureSettings, mirror_front: bool) -> CameraFrame {
    let mut frame = if settings.facing == LensFacing::Front && mirror_front {
        mirror_horizontal(source)
    } else {
        source.clone()
    };
    if settings.flash.is_on() {
        frame = lift_brightness(&frame, formats::FLASH_LIFT);
    }
    frame
}

/// Horizontally mirrored copy of a frame.
fn mirror_horizontal(frame: &CameraFrame) -> CameraFrame {
    let bpp = frame.format.bytes_per_pixel();
    let width = frame.width as usize;
    let stride = frame.stride as usize;
    let mut out = Vec::with_capacity(width * frame.height as usize * bpp);
    for y in 0..frame.height as usize {
        let row = &frame.data[y * stride..y * stride + width * bpp];
        for x in (0..width).rev() {
            out.extend_from_slice(&row[x * bpp..(x + 1) * bpp]);
        }
    }
    CameraFrame::new(frame.width, frame.height, frame.format, out)
}

/// Copy of a frame with a saturating brightness lift on the color channels.
fn lift_brightness(frame: &CameraFrame, amount: u8) -> CameraFrame {
    let bpp = frame.format.bytes_per_pixel();
    let mut data = frame.data.to_vec();
    for px in data.chunks_mut(bpp) {
        // Alpha, when present, stays untouched.
        for byte in px.iter_mut().take(3) {
            *byte = byte.saturating_add(amount);
        }
    }
    CameraFrame::new(frame.width, frame.height, frame.format, data)
}
