// SPDX-License-Identifier: GPL-3.0-only

//! Photo storage
//!
//! Filesystem plumbing for the media library: resolving the pictures
//! directory, timestamped filenames with collision handling, and JPEG
//! encoding of raw camera frames.

use crate::app::state::CapturedImage;
use crate::backends::camera::types::{CameraFrame, PixelFormat};
use crate::constants::photos;
use crate::errors::PhotoResult;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Resolve the directory photos are saved into.
///
/// Uses the platform pictures directory when available, falling back to
/// `~/Pictures`, with the configured folder name appended.
pub fn photos_dir(save_folder: &str) -> PathBuf {
    let pictures = dirs::picture_dir().unwrap_or_else(|| {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join("Pictures")
    });
    pictures.join(save_folder)
}

/// Create the directory if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(dir)
}

/// Timestamped photo filename, without collision handling.
pub fn timestamp_filename(at: chrono::DateTime<chrono::Local>) -> String {
    format!(
        "{}{}.{}",
        photos::PHOTO_PREFIX,
        at.format(photos::TIMESTAMP_FORMAT),
        photos::PHOTO_EXTENSION
    )
}

/// Pick a free path under `dir` for a photo taken at `at`.
///
/// Appends `_1`, `_2`, ... when a photo from the same second is already
/// on disk.
pub fn unique_photo_path(dir: &Path, at: chrono::DateTime<chrono::Local>) -> PathBuf {
    let first = dir.join(timestamp_filename(at));
    if !first.exists() {
        return first;
    }

    let base = format!(
        "{}{}",
        photos::PHOTO_PREFIX,
        at.format(photos::TIMESTAMP_FORMAT)
    );

    let mut n = 1u32;
    loop {
        let candidate = dir.join(format!("{}_{}.{}", base, n, photos::PHOTO_EXTENSION));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

/// Encode a camera frame as JPEG at the given quality.
pub fn encode_jpeg(frame: &CameraFrame, quality: u8) -> PhotoResult<Vec<u8>> {
    let rgb = frame_to_rgb(frame);

    let mut buffer = Vec::new();
    let mut cursor = io::Cursor::new(&mut buffer);
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, quality);
    encoder.encode(
        &rgb,
        frame.width,
        frame.height,
        image::ExtendedColorType::Rgb8,
    )?;

    Ok(buffer)
}

/// Write a captured photo into `dir`, creating it if needed.
pub fn write_photo(dir: &Path, image: &CapturedImage) -> PhotoResult<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let path = unique_photo_path(dir, image.captured_at);
    info!(path = %path.display(), "Saving photo");
    std::fs::write(&path, image.jpeg.as_ref())?;
    Ok(path)
}

/// Tightly packed RGB bytes for a frame, dropping alpha when present.
fn frame_to_rgb(frame: &CameraFrame) -> Vec<u8> {
    let bpp = frame.format.bytes_per_pixel();
    let width = frame.width as usize;
    let stride = frame.stride as usize;

    let mut rgb = Vec::with_capacity(width * frame.height as usize * 3);
    for y in 0..frame.height as usize {
        let row = &frame.data[y * stride..y * stride + width * bpp];
        match frame.format {
            PixelFormat::Rgb8 => rgb.extend_from_slice(row),
            PixelFormat::Rgba8 => {
                for px in row.chunks_exact(bpp) {
                    rgb.extend_from_slice(&px[..3]);
                }
            }
        }
    }
    rgb
}
