// SPDX-License-Identifier: GPL-3.0-only

//! Photo review handlers
//!
//! Handles the review-screen intents (save, discard) and the completion of
//! an in-flight save. The captured photo is held until it is either
//! persisted to the media library or explicitly discarded.

use crate::app::state::{AppModel, Command};
use crate::errors::PhotoError;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

impl AppModel {
    // =========================================================================
    // Photo Review Handlers
    // =========================================================================

    pub(crate) fn handle_discard(&mut self) -> Vec<Command> {
        if self.is_saving {
            debug!("Save in progress, ignoring discard");
            return Vec::new();
        }
        let Some(image) = self.image.take() else {
            debug!(screen = ?self.screen_state(), "Discard outside photo review, ignoring");
            return Vec::new();
        };

        info!(id = %image.id, "Photo discarded, returning to live preview");
        self.status = None;
        Vec::new()
    }

    pub(crate) fn handle_save(&mut self) -> Vec<Command> {
        if self.is_saving {
            debug!("Save already in progress, ignoring");
            return Vec::new();
        }
        let Some(image) = &self.image else {
            debug!(screen = ?self.screen_state(), "Save outside photo review, ignoring");
            return Vec::new();
        };

        info!(id = %image.id, "Saving photo to library...");
        self.is_saving = true;
        self.status = Some(String::from("Saving..."));
        vec![Command::Persist(image.clone())]
    }

    pub(crate) fn handle_save_complete(
        &mut self,
        result: Result<PathBuf, PhotoError>,
    ) -> Vec<Command> {
        self.is_saving = false;

        match result {
            Ok(path) => {
                if self.image.take().is_none() {
                    warn!(path = %path.display(), "Save completed without a photo under review");
                }
                self.photos_saved += 1;
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                info!(path = %path.display(), "Photo saved successfully");
                self.status = Some(format!("Saved {name}"));
            }
            Err(e) => {
                // Keep the photo on screen so the user can retry or discard.
                error!(error = %e, "Failed to save photo");
                self.status = Some(format!("Save failed: {e}"));
            }
        }
        Vec::new()
    }
}
