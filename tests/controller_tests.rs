// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the capture screen controller
//!
//! Drives the state machine through `AppModel::update` the way the runtime
//! does: intents go in, commands come out, completions are fed back in.

mod common;

use shutter::app::state::{
    Command, FlashMode, LensFacing, Message, PermissionStatus, ScreenState,
};
use shutter::backends::camera::CameraCapability;
use shutter::errors::{CameraError, PhotoError};
use shutter::{AppModel, Config};
use std::path::PathBuf;
use uuid::Uuid;

/// A model with both permissions granted, sitting on live preview.
fn live_model() -> AppModel {
    let mut model = AppModel::new(Config::default());
    common::grant_permissions(&mut model);
    model
}

/// A model holding a captured photo, sitting on the review screen.
fn preview_model() -> (AppModel, Uuid) {
    let mut model = live_model();
    model.update(Message::Shutter);
    let image = common::make_image(4, 2, model.settings);
    let id = image.id;
    model.update(Message::CaptureComplete(Ok(image)));
    (model, id)
}

// ===== Permission gate =====

#[test]
fn test_loading_until_both_permissions_resolve() {
    let mut model = AppModel::new(Config::default());
    assert_eq!(model.screen_state(), ScreenState::Loading);

    // Intents are ignored while the gate is unresolved
    assert!(model.update(Message::Shutter).is_empty());
    assert!(model.update(Message::ToggleFlash).is_empty());
    assert_eq!(model.settings.flash, FlashMode::Off);

    // An unresolved response carries no decision and changes nothing
    model.update(Message::CameraPermission(PermissionStatus::Unknown));
    assert_eq!(model.screen_state(), ScreenState::Loading);

    model.update(Message::CameraPermission(PermissionStatus::Granted));
    assert_eq!(model.screen_state(), ScreenState::Loading);

    model.update(Message::LibraryPermission(PermissionStatus::Granted));
    assert_eq!(model.screen_state(), ScreenState::Live);
}

#[test]
fn test_denied_camera_is_dead_end() {
    let mut model = AppModel::new(Config::default());
    model.update(Message::CameraPermission(PermissionStatus::Denied));
    model.update(Message::LibraryPermission(PermissionStatus::Granted));
    assert_eq!(model.screen_state(), ScreenState::PermissionDenied);

    // Nothing gets through the gate
    assert!(model.update(Message::Shutter).is_empty());
    assert!(model.update(Message::ToggleFacing).is_empty());
    assert!(!model.is_capturing);
    assert_eq!(model.settings.facing, LensFacing::Back);
}

#[test]
fn test_denied_library_is_dead_end() {
    let mut model = AppModel::new(Config::default());
    model.update(Message::CameraPermission(PermissionStatus::Granted));
    model.update(Message::LibraryPermission(PermissionStatus::Denied));
    assert_eq!(model.screen_state(), ScreenState::PermissionDenied);
    assert!(model.update(Message::Shutter).is_empty());
}

#[test]
fn test_permission_resolution_is_final() {
    let mut model = live_model();

    // A late duplicate response must not flip a settled permission
    model.update(Message::CameraPermission(PermissionStatus::Denied));
    assert_eq!(model.camera_permission, PermissionStatus::Granted);
    assert_eq!(model.screen_state(), ScreenState::Live);
}

// ===== Live intents =====

#[test]
fn test_toggle_flash_roundtrip() {
    let mut model = live_model();
    assert_eq!(model.settings.flash, FlashMode::Off);

    assert!(model.update(Message::ToggleFlash).is_empty());
    assert_eq!(model.settings.flash, FlashMode::On);

    assert!(model.update(Message::ToggleFlash).is_empty());
    assert_eq!(model.settings.flash, FlashMode::Off);
}

#[test]
fn test_toggle_facing_roundtrip() {
    let mut model = live_model();
    assert_eq!(model.settings.facing, LensFacing::Back);

    model.update(Message::ToggleFacing);
    assert_eq!(model.settings.facing, LensFacing::Front);

    model.update(Message::ToggleFacing);
    assert_eq!(model.settings.facing, LensFacing::Back);
}

#[test]
fn test_shutter_snapshots_current_settings() {
    let mut model = live_model();
    model.update(Message::ToggleFlash);

    let commands = model.update(Message::Shutter);
    assert_eq!(commands.len(), 1);
    let Command::Capture(snapshot) = &commands[0] else {
        panic!("Shutter should emit a capture command");
    };
    assert_eq!(snapshot.flash, FlashMode::On);
    assert_eq!(snapshot.facing, LensFacing::Back);
    assert!(model.is_capturing);
    assert_eq!(model.status.as_deref(), Some("Capturing..."));
}

#[test]
fn test_second_shutter_ignored_while_capturing() {
    let mut model = live_model();
    assert_eq!(model.update(Message::Shutter).len(), 1);

    // Only one capture may be in flight
    assert!(model.update(Message::Shutter).is_empty());
    assert!(model.is_capturing);
}

#[test]
fn test_preview_intents_ignored_in_live() {
    let mut model = live_model();
    assert!(model.update(Message::Save).is_empty());
    assert!(model.update(Message::Discard).is_empty());
    assert_eq!(model.screen_state(), ScreenState::Live);
    assert!(!model.is_saving);
}

// ===== Capture completion =====

#[test]
fn test_capture_complete_enters_preview() {
    let mut model = live_model();
    model.update(Message::Shutter);

    let image = common::make_image(4, 2, model.settings);
    let id = image.id;
    model.update(Message::CaptureComplete(Ok(image)));

    assert_eq!(model.screen_state(), ScreenState::Preview);
    assert_eq!(model.image.as_ref().map(|image| image.id), Some(id));
    assert!(!model.is_capturing);
    assert_eq!(model.status, None);
}

#[test]
fn test_capture_failure_stays_live() {
    let mut model = live_model();
    model.update(Message::Shutter);

    let failure = CameraError::CaptureFailed(String::from("sensor timeout"));
    model.update(Message::CaptureComplete(Err(failure)));

    assert_eq!(model.screen_state(), ScreenState::Live);
    assert!(model.image.is_none());
    assert!(!model.is_capturing);
    let status = model.status.as_deref().unwrap_or("");
    assert!(status.contains("Capture failed"), "Got status: {status}");

    // The shutter is live again after a failure
    assert_eq!(model.update(Message::Shutter).len(), 1);
}

#[test]
fn test_stale_capture_result_dropped_in_preview() {
    let (mut model, held) = preview_model();

    // A straggler completion must not replace the photo under review
    let stale = common::make_image(4, 2, model.settings);
    model.update(Message::CaptureComplete(Ok(stale)));
    assert_eq!(model.image.as_ref().map(|image| image.id), Some(held));
}

#[test]
fn test_live_intents_ignored_in_preview() {
    let (mut model, _) = preview_model();

    assert!(model.update(Message::ToggleFlash).is_empty());
    assert!(model.update(Message::ToggleFacing).is_empty());
    assert!(model.update(Message::Shutter).is_empty());
    assert_eq!(model.settings.flash, FlashMode::Off);
    assert_eq!(model.settings.facing, LensFacing::Back);
    assert_eq!(model.screen_state(), ScreenState::Preview);
}

// ===== Photo review =====

#[test]
fn test_discard_returns_to_live_and_keeps_settings() {
    let mut model = live_model();
    model.update(Message::ToggleFlash);
    model.update(Message::ToggleFacing);
    model.update(Message::Shutter);
    model.update(Message::CaptureComplete(Ok(common::make_image(
        4,
        2,
        model.settings,
    ))));
    assert_eq!(model.screen_state(), ScreenState::Preview);

    model.update(Message::Discard);

    assert_eq!(model.screen_state(), ScreenState::Live);
    assert!(model.image.is_none());
    assert_eq!(model.settings.flash, FlashMode::On);
    assert_eq!(model.settings.facing, LensFacing::Front);
}

#[test]
fn test_save_persists_the_held_photo() {
    let (mut model, held) = preview_model();

    let commands = model.update(Message::Save);
    assert_eq!(commands.len(), 1);
    let Command::Persist(image) = &commands[0] else {
        panic!("Save should emit a persist command");
    };
    assert_eq!(image.id, held, "Persist must carry the photo under review");
    assert!(model.is_saving);
    assert_eq!(model.status.as_deref(), Some("Saving..."));

    model.update(Message::SaveComplete(Ok(PathBuf::from(
        "/photos/IMG_20250115_093000.jpg",
    ))));

    assert_eq!(model.screen_state(), ScreenState::Live);
    assert!(model.image.is_none());
    assert!(!model.is_saving);
    assert_eq!(model.photos_saved, 1);
    let status = model.status.as_deref().unwrap_or("");
    assert!(status.contains("Saved"), "Got status: {status}");
    assert!(status.contains("IMG_20250115_093000.jpg"));
}

#[test]
fn test_save_failure_keeps_photo_for_retry() {
    let (mut model, held) = preview_model();
    model.update(Message::Save);

    let failure = PhotoError::SaveFailed(String::from("disk full"));
    model.update(Message::SaveComplete(Err(failure)));

    // The photo stays on screen so the user can retry or discard
    assert_eq!(model.screen_state(), ScreenState::Preview);
    assert_eq!(model.image.as_ref().map(|image| image.id), Some(held));
    assert!(!model.is_saving);
    assert_eq!(model.photos_saved, 0);
    let status = model.status.as_deref().unwrap_or("");
    assert!(status.contains("Save failed"), "Got status: {status}");

    // Retrying emits a fresh persist for the same photo
    let commands = model.update(Message::Save);
    assert_eq!(commands.len(), 1);
    let Command::Persist(image) = &commands[0] else {
        panic!("Retry should emit a persist command");
    };
    assert_eq!(image.id, held);
}

#[test]
fn test_review_intents_ignored_while_saving() {
    let (mut model, held) = preview_model();
    assert_eq!(model.update(Message::Save).len(), 1);

    // Neither a duplicate save nor a discard may race the pending save
    assert!(model.update(Message::Save).is_empty());
    assert!(model.update(Message::Discard).is_empty());
    assert_eq!(model.image.as_ref().map(|image| image.id), Some(held));

    model.update(Message::SaveComplete(Ok(PathBuf::from("/photos/a.jpg"))));
    assert_eq!(model.photos_saved, 1);
    assert_eq!(model.screen_state(), ScreenState::Live);
}

// ===== Full sessions against the doubles =====

#[test]
fn test_full_session_capture_then_save() {
    let camera = common::MockCamera::granted();
    let library = common::MockLibrary::granted();
    let mut model = AppModel::new(Config::default());

    common::run_commands(
        &mut model,
        vec![Command::RequestPermissions],
        &camera,
        &library,
    );
    assert_eq!(model.screen_state(), ScreenState::Live);

    model.update(Message::ToggleFlash);
    let commands = model.update(Message::Shutter);
    common::run_commands(&mut model, commands, &camera, &library);
    assert_eq!(model.screen_state(), ScreenState::Preview);
    let held = model.image.as_ref().map(|image| image.id).unwrap();

    let commands = model.update(Message::Save);
    common::run_commands(&mut model, commands, &camera, &library);

    assert_eq!(model.screen_state(), ScreenState::Live);
    assert_eq!(model.photos_saved, 1);
    assert_eq!(library.persisted_ids(), vec![held]);
    assert_eq!(
        model.settings.flash,
        FlashMode::On,
        "Settings survive the capture cycle"
    );
}

#[test]
fn test_full_session_capture_then_discard() {
    let camera = common::MockCamera::granted();
    let library = common::MockLibrary::granted();
    let mut model = AppModel::new(Config::default());

    common::run_commands(
        &mut model,
        vec![Command::RequestPermissions],
        &camera,
        &library,
    );

    let commands = model.update(Message::Shutter);
    common::run_commands(&mut model, commands, &camera, &library);
    assert_eq!(model.screen_state(), ScreenState::Preview);

    model.update(Message::Discard);

    assert_eq!(model.screen_state(), ScreenState::Live);
    assert!(library.persisted_ids().is_empty());
    assert_eq!(model.photos_saved, 0);
}

#[test]
fn test_session_with_denied_camera() {
    let camera = common::MockCamera::denied();
    let library = common::MockLibrary::granted();
    let mut model = AppModel::new(Config::default());

    common::run_commands(
        &mut model,
        vec![Command::RequestPermissions],
        &camera,
        &library,
    );
    assert_eq!(model.screen_state(), ScreenState::PermissionDenied);
    assert!(camera.preview_frame(model.settings).is_none());
    assert!(model.update(Message::Shutter).is_empty());
}

#[test]
fn test_session_with_denied_library() {
    let camera = common::MockCamera::granted();
    let library = common::MockLibrary::denied();
    let mut model = AppModel::new(Config::default());

    common::run_commands(
        &mut model,
        vec![Command::RequestPermissions],
        &camera,
        &library,
    );
    assert_eq!(model.screen_state(), ScreenState::PermissionDenied);
}

#[test]
fn test_session_with_failing_capture() {
    let camera = common::MockCamera::granted().with_capture_error(CameraError::Busy);
    let library = common::MockLibrary::granted();
    let mut model = AppModel::new(Config::default());

    common::run_commands(
        &mut model,
        vec![Command::RequestPermissions],
        &camera,
        &library,
    );

    let commands = model.update(Message::Shutter);
    common::run_commands(&mut model, commands, &camera, &library);

    assert_eq!(model.screen_state(), ScreenState::Live);
    assert!(model.image.is_none());
    let status = model.status.as_deref().unwrap_or("");
    assert!(status.contains("Capture failed"), "Got status: {status}");
}

#[test]
fn test_session_with_failing_save() {
    let camera = common::MockCamera::granted();
    let library = common::MockLibrary::granted()
        .with_save_error(PhotoError::SaveFailed(String::from("read-only filesystem")));
    let mut model = AppModel::new(Config::default());

    common::run_commands(
        &mut model,
        vec![Command::RequestPermissions],
        &camera,
        &library,
    );

    let commands = model.update(Message::Shutter);
    common::run_commands(&mut model, commands, &camera, &library);
    let held = model.image.as_ref().map(|image| image.id).unwrap();

    let commands = model.update(Message::Save);
    common::run_commands(&mut model, commands, &camera, &library);

    // Failure leaves the photo under review and records nothing
    assert_eq!(model.screen_state(), ScreenState::Preview);
    assert_eq!(model.image.as_ref().map(|image| image.id), Some(held));
    assert!(library.persisted_ids().is_empty());
    assert_eq!(model.photos_saved, 0);
}
