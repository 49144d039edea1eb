// SPDX-License-Identifier: GPL-3.0-only

//! Synthetic camera provider
//!
//! Generates deterministic test patterns so the app runs without any camera
//! hardware. The back lens shows color bars with a sweeping scan line, the
//! front lens a diagonal gradient. Flash lifts the overall luminance.

use super::CameraCapability;
use super::types::{CameraFrame, PixelFormat};
use crate::app::state::{CaptureSettings, CapturedImage, LensFacing, PermissionStatus};
use crate::constants::{formats, timing};
use crate::errors::{CameraError, CameraResult};
use crate::storage;
use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::Instant;

/// Camera provider backed by generated test patterns.
///
/// Always grants permission and never fails a capture. The sweep line on
/// the back lens makes it obvious in the preview that frames are live.
pub struct SyntheticCamera {
    width: u32,
    height: u32,
    jpeg_quality: u8,
    started_at: Instant,
}

impl SyntheticCamera {
    pub fn new(jpeg_quality: u8) -> Self {
        Self {
            width: formats::SYNTHETIC_WIDTH,
            height: formats::SYNTHETIC_HEIGHT,
            jpeg_quality,
            started_at: Instant::now(),
        }
    }

    /// Override the frame dimensions.
    #[must_use]
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    fn render(&self, settings: CaptureSettings) -> CameraFrame {
        let elapsed_ms = self.started_at.elapsed().as_millis() as u64;
        render_pattern(self.width, self.height, settings, elapsed_ms)
    }
}

impl CameraCapability for SyntheticCamera {
    fn request_permission(&self) -> BoxFuture<'static, PermissionStatus> {
        Box::pin(async { PermissionStatus::Granted })
    }

    fn preview_frame(&self, settings: CaptureSettings) -> Option<Arc<CameraFrame>> {
        Some(Arc::new(self.render(settings)))
    }

    fn capture(
        &self,
        settings: CaptureSettings,
    ) -> BoxFuture<'static, CameraResult<CapturedImage>> {
        let width = self.width;
        let height = self.height;
        let quality = self.jpeg_quality;
        let elapsed_ms = self.started_at.elapsed().as_millis() as u64;
        Box::pin(async move {
            // Render after the exposure delay so the sweep line lands where
            // the preview shows it at completion time.
            tokio::time::sleep(timing::EXPOSURE_DELAY).await;
            let exposure_ms = timing::EXPOSURE_DELAY.as_millis() as u64;
            let frame = Arc::new(render_pattern(
                width,
                height,
                settings,
                elapsed_ms + exposure_ms,
            ));
            let jpeg = storage::encode_jpeg(&frame, quality)
                .map_err(|e| CameraError::CaptureFailed(e.to_string()))?;
            Ok(CapturedImage::new(frame, jpeg, settings))
        })
    }
}

/// Render one frame of the test pattern for the given settings.
fn render_pattern(
    width: u32,
    height: u32,
    settings: CaptureSettings,
    elapsed_ms: u64,
) -> CameraFrame {
    let mut data = vec![0u8; (width * height * 3) as usize];

    match settings.facing {
        LensFacing::Back => {
            fill_color_bars(&mut data, width, height);
            paint_sweep_line(&mut data, width, height, sweep_position(height, elapsed_ms));
        }
        LensFacing::Front => fill_gradient(&mut data, width, height),
    }

    if settings.flash.is_on() {
        lift_luminance(&mut data, formats::FLASH_LIFT);
    }

    CameraFrame::new(width, height, PixelFormat::Rgb8, data)
}

/// Row the sweep line occupies at the given time since startup.
fn sweep_position(height: u32, elapsed_ms: u64) -> u32 {
    let phase = elapsed_ms % timing::SWEEP_PERIOD_MS;
    ((phase * u64::from(height)) / timing::SWEEP_PERIOD_MS) as u32
}

/// Fill the frame with eight vertical color bars at studio swing levels.
fn fill_color_bars(data: &mut [u8], width: u32, height: u32) {
    // White, Yellow, Cyan, Green, Magenta, Red, Blue, Black
    let bars: [(u8, u8, u8); 8] = [
        (235, 235, 235),
        (235, 235, 16),
        (16, 235, 235),
        (16, 235, 16),
        (235, 16, 235),
        (235, 16, 16),
        (16, 16, 235),
        (16, 16, 16),
    ];

    let bar_width = (width / 8).max(1);

    for y in 0..height {
        for x in 0..width {
            let (r, g, b) = bars[((x / bar_width).min(7)) as usize];
            let offset = ((y * width + x) * 3) as usize;
            data[offset] = r;
            data[offset + 1] = g;
            data[offset + 2] = b;
        }
    }
}

/// Paint a full-width white line over the given row.
fn paint_sweep_line(data: &mut [u8], width: u32, height: u32, row: u32) {
    if row >= height {
        return;
    }
    let start = (row * width * 3) as usize;
    let end = start + (width * 3) as usize;
    for byte in &mut data[start..end] {
        *byte = 255;
    }
}

/// Fill the frame with a diagonal gradient (front lens pattern).
fn fill_gradient(data: &mut [u8], width: u32, height: u32) {
    for y in 0..height {
        for x in 0..width {
            let offset = ((y * width + x) * 3) as usize;
            data[offset] = ((x * 255) / width.max(1)) as u8;
            data[offset + 1] = ((y * 255) / height.max(1)) as u8;
            data[offset + 2] = 160;
        }
    }
}

/// Saturating brightness lift applied when flash is on.
fn lift_luminance(data: &mut [u8], lift: u8) {
    for byte in data.iter_mut() {
        *byte = byte.saturating_add(lift);
    }
}
