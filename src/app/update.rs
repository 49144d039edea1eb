// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! This module handles all controller messages by routing them to focused
//! handler methods. The main `update()` function acts as a dispatcher; the
//! handlers are implemented in the `handlers` submodules organized by
//! concern.
//!
//! # Handler Modules
//!
//! - `handlers::permissions`: startup permission resolution
//! - `handlers::capture`: flash/facing toggles, shutter, capture completion
//! - `handlers::preview`: discard, save, save completion

use crate::app::state::{AppModel, Command, Message};

impl AppModel {
    /// Main message handler - routes messages to appropriate handler methods.
    ///
    /// Returns the effects the runtime must execute; an empty vector means
    /// the message was pure state mutation (or was ignored by a guard).
    pub fn update(&mut self, message: Message) -> Vec<Command> {
        match message {
            // ===== Permission Resolution =====
            Message::CameraPermission(status) => self.handle_camera_permission(status),
            Message::LibraryPermission(status) => self.handle_library_permission(status),

            // ===== Live Intents =====
            Message::ToggleFlash => self.handle_toggle_flash(),
            Message::ToggleFacing => self.handle_toggle_facing(),
            Message::Shutter => self.handle_shutter(),

            // ===== Capture Completion =====
            Message::CaptureComplete(result) => self.handle_capture_complete(result),

            // ===== Preview Intents =====
            Message::Discard => self.handle_discard(),
            Message::Save => self.handle_save(),

            // ===== Save Completion =====
            Message::SaveComplete(result) => self.handle_save_complete(result),
        }
    }
}
