// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for camera capability providers

use std::sync::Arc;
use std::time::Instant;

/// Pixel format for camera frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// RGB - 24-bit, 3 bytes per pixel, no alpha (file sources)
    Rgb8,
    /// RGBA - 32-bit, 4 bytes per pixel (synthetic scenes)
    Rgba8,
}

impl PixelFormat {
    /// Bytes per pixel for this format
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }
}

/// A single frame produced by a camera provider
///
/// Pixel data is shared behind an `Arc` so frames can be handed between the
/// preview loop, a captured image, and the encoder without copying.
#[derive(Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    /// Tightly packed or padded pixel rows (see `stride`)
    pub data: Arc<[u8]>,
    /// Pixel format of the data
    pub format: PixelFormat,
    /// Row stride in bytes (width * bytes_per_pixel when tightly packed)
    pub stride: u32,
    /// When the provider produced this frame
    pub captured_at: Instant,
}

impl std::fmt::Debug for CameraFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CameraFrame {{ {}x{} {:?}, {} bytes }}",
            self.width,
            self.height,
            self.format,
            self.data.len()
        )
    }
}

impl CameraFrame {
    /// Build a tightly packed frame from owned pixel data.
    pub fn new(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Self {
        let stride = width * format.bytes_per_pixel() as u32;
        Self {
            width,
            height,
            data: Arc::from(data),
            format,
            stride,
            captured_at: Instant::now(),
        }
    }

    /// Sample one pixel as RGB. Returns `None` outside the frame bounds
    /// or when the row data is shorter than the stride promises.
    pub fn pixel_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = self.format.bytes_per_pixel();
        let offset = y as usize * self.stride as usize + x as usize * bpp;
        let px = self.data.get(offset..offset + bpp)?;
        Some((px[0], px[1], px[2]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_sampling_rgb8() {
        let data = vec![
            10, 20, 30, /* (1,0) */ 40, 50, 60, //
            70, 80, 90, /* (1,1) */ 100, 110, 120,
        ];
        let frame = CameraFrame::new(2, 2, PixelFormat::Rgb8, data);
        assert_eq!(frame.pixel_rgb(0, 0), Some((10, 20, 30)));
        assert_eq!(frame.pixel_rgb(1, 1), Some((100, 110, 120)));
        assert_eq!(frame.pixel_rgb(2, 0), None);
        assert_eq!(frame.pixel_rgb(0, 2), None);
    }

    #[test]
    fn test_pixel_sampling_rgba8() {
        let data = vec![1, 2, 3, 255, 4, 5, 6, 255];
        let frame = CameraFrame::new(2, 1, PixelFormat::Rgba8, data);
        assert_eq!(frame.stride, 8);
        assert_eq!(frame.pixel_rgb(1, 0), Some((4, 5, 6)));
    }
}
