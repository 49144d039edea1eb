// SPDX-License-Identifier: GPL-3.0-only

//! User configuration, stored as JSON in the platform config directory.

use crate::app::state::{CaptureSettings, FlashMode, LensFacing};
use crate::constants::{formats, photos};
use crate::errors::AppResult;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{error, info};

/// Directory name under the platform config dir
const CONFIG_DIR: &str = "shutter";

/// Config file name
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Lens active when the app starts
    pub default_facing: LensFacing,
    /// Flash mode when the app starts
    pub default_flash: FlashMode,
    /// Folder under the Pictures directory where photos are saved
    pub save_folder: String,
    /// Mirror the preview horizontally while the front lens is active
    pub mirror_front_preview: bool,
    /// JPEG quality for captured stills (1-100)
    pub jpeg_quality: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_facing: LensFacing::Back,
            default_flash: FlashMode::Off,
            save_folder: photos::DEFAULT_SAVE_FOLDER.to_string(),
            mirror_front_preview: true, // Default to mirrored (selfie mode)
            jpeg_quality: formats::DEFAULT_JPEG_QUALITY,
        }
    }
}

impl Config {
    /// Path of the config file, if a platform config directory exists
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load the config file, falling back to defaults when it is missing
    /// or unreadable. A parse error is logged and does not abort startup.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    info!(path = %path.display(), "Loaded config");
                    config
                }
                Err(e) => {
                    error!(path = %path.display(), error = %e, "Invalid config, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Write the config as pretty JSON, creating parent directories.
    pub fn save(&self) -> AppResult<()> {
        let Some(path) = Self::path() else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;
        Ok(())
    }

    /// Capture settings seeded from the configured defaults
    pub fn initial_settings(&self) -> CaptureSettings {
        CaptureSettings {
            facing: self.default_facing,
            flash: self.default_flash,
        }
    }

    /// JPEG quality clamped to the encoder's valid range
    pub fn effective_quality(&self) -> u8 {
        if (1..=100).contains(&self.jpeg_quality) {
            self.jpeg_quality
        } else {
            formats::DEFAULT_JPEG_QUALITY
        }
    }
}
