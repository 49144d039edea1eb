// SPDX-License-Identifier: GPL-3.0-only

//! Permission resolution handlers
//!
//! Handles the camera and media library permission responses that arrive
//! while the loading screen is up. Each permission resolves exactly once;
//! duplicate responses are ignored.

use crate::app::state::{AppModel, Command, PermissionStatus, ScreenState};
use tracing::{debug, info, warn};

impl AppModel {
    // =========================================================================
    // Permission Resolution Handlers
    // =========================================================================

    pub(crate) fn handle_camera_permission(&mut self, status: PermissionStatus) -> Vec<Command> {
        if self.camera_permission.is_resolved() {
            debug!(?status, "Camera permission already resolved, ignoring");
            return Vec::new();
        }
        if !status.is_resolved() {
            warn!("Camera permission response carried no decision, ignoring");
            return Vec::new();
        }

        self.camera_permission = status;
        if status.is_granted() {
            info!("Camera permission granted");
        } else {
            warn!("Camera permission denied");
        }

        self.log_screen_if_settled();
        Vec::new()
    }

    pub(crate) fn handle_library_permission(&mut self, status: PermissionStatus) -> Vec<Command> {
        if self.library_permission.is_resolved() {
            debug!(?status, "Library permission already resolved, ignoring");
            return Vec::new();
        }
        if !status.is_resolved() {
            warn!("Library permission response carried no decision, ignoring");
            return Vec::new();
        }

        self.library_permission = status;
        if status.is_granted() {
            info!("Media library permission granted");
        } else {
            warn!("Media library permission denied");
        }

        self.log_screen_if_settled();
        Vec::new()
    }

    /// Log the screen the app lands on once both permissions have resolved.
    fn log_screen_if_settled(&self) {
        if !self.camera_permission.is_resolved() || !self.library_permission.is_resolved() {
            return;
        }
        match self.screen_state() {
            ScreenState::Live => info!("Both permissions granted, live preview active"),
            ScreenState::PermissionDenied => {
                warn!(
                    camera = ?self.camera_permission,
                    library = ?self.library_permission,
                    "Permission denied, camera unavailable"
                );
            }
            other => debug!(screen = ?other, "Permissions settled"),
        }
    }
}
