// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// Timing constants
pub mod timing {
    use std::time::Duration;

    /// Terminal event poll interval (~60fps render loop)
    pub const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(16);

    /// Simulated exposure delay for synthetic captures
    pub const EXPOSURE_DELAY: Duration = Duration::from_millis(120);

    /// Period of the synthetic preview sweep animation
    pub const SWEEP_PERIOD_MS: u64 = 4_000;

    /// Bound on headless permission resolution before reporting Unknown
    pub const HEADLESS_PERMISSION_WAIT: Duration = Duration::from_secs(5);
}

/// Frame and encoding constants
pub mod formats {
    /// Synthetic camera frame width
    pub const SYNTHETIC_WIDTH: u32 = 640;

    /// Synthetic camera frame height
    pub const SYNTHETIC_HEIGHT: u32 = 480;

    /// JPEG quality used when the config carries an out-of-range value
    pub const DEFAULT_JPEG_QUALITY: u8 = 90;

    /// Luminance lift applied when flash is on (added per channel)
    pub const FLASH_LIFT: u8 = 48;
}

/// Application information utilities
pub mod app_info {
    /// Get the application version from build-time environment
    pub fn version() -> &'static str {
        env!("GIT_VERSION")
    }
}

/// Photo naming and location constants
pub mod photos {
    /// Folder under the Pictures directory where photos land
    pub const DEFAULT_SAVE_FOLDER: &str = "Camera";

    /// Filename prefix for saved photos
    pub const PHOTO_PREFIX: &str = "IMG_";

    /// Extension for saved photos
    pub const PHOTO_EXTENSION: &str = "jpg";

    /// Timestamp format embedded in photo filenames
    pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

    /// Image file extensions accepted as a file camera source
    pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

    /// Check if a file extension is a supported image source format
    pub fn is_image_extension(ext: &str) -> bool {
        IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_extensions() {
        assert!(photos::is_image_extension("jpg"));
        assert!(photos::is_image_extension("PNG"));
        assert!(!photos::is_image_extension("mp4"));
        assert!(!photos::is_image_extension(""));
    }
}
