// SPDX-License-Identifier: GPL-3.0-only

//! Capture operation handlers
//!
//! Handles the live-screen intents (flash toggle, lens toggle, shutter)
//! and the completion of an in-flight capture.

use crate::app::state::{AppModel, CapturedImage, Command, ScreenState};
use crate::errors::CameraError;
use tracing::{debug, error, info, warn};

impl AppModel {
    // =========================================================================
    // Capture Operation Handlers
    // =========================================================================

    pub(crate) fn handle_toggle_flash(&mut self) -> Vec<Command> {
        if self.screen_state() != ScreenState::Live {
            debug!(screen = ?self.screen_state(), "Flash toggle outside live preview, ignoring");
            return Vec::new();
        }

        self.settings.toggle_flash();
        info!(flash = self.settings.flash.display_name(), "Flash toggled");
        Vec::new()
    }

    pub(crate) fn handle_toggle_facing(&mut self) -> Vec<Command> {
        if self.screen_state() != ScreenState::Live {
            debug!(screen = ?self.screen_state(), "Lens toggle outside live preview, ignoring");
            return Vec::new();
        }

        self.settings.toggle_facing();
        info!(
            facing = self.settings.facing.display_name(),
            "Lens facing toggled"
        );
        Vec::new()
    }

    pub(crate) fn handle_shutter(&mut self) -> Vec<Command> {
        if self.screen_state() != ScreenState::Live {
            debug!(screen = ?self.screen_state(), "Shutter outside live preview, ignoring");
            return Vec::new();
        }
        if self.is_capturing {
            debug!("Capture already in progress, ignoring shutter");
            return Vec::new();
        }

        info!(
            facing = self.settings.facing.display_name(),
            flash = self.settings.flash.display_name(),
            "Capturing photo..."
        );
        self.is_capturing = true;
        self.status = Some(String::from("Capturing..."));
        vec![Command::Capture(self.settings)]
    }

    pub(crate) fn handle_capture_complete(
        &mut self,
        result: Result<CapturedImage, CameraError>,
    ) -> Vec<Command> {
        self.is_capturing = false;

        match result {
            Ok(image) => {
                if self.image.is_some() {
                    // The shutter guard should make this unreachable; drop the
                    // incoming image rather than overwrite the one under review.
                    warn!(id = %image.id, "Capture completed while reviewing a photo, dropping it");
                    return Vec::new();
                }
                info!(
                    id = %image.id,
                    width = image.frame.width,
                    height = image.frame.height,
                    "Photo captured"
                );
                self.image = Some(image);
                self.status = None;
            }
            Err(e) => {
                error!(error = %e, "Capture failed");
                self.status = Some(format!("Capture failed: {e}"));
            }
        }
        Vec::new()
    }
}
