// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for headless camera operations
//!
//! This module provides command-line functionality for:
//! - Taking a photo without the interactive screen
//! - Resolving and reporting permissions
//!
//! Both commands drive the same state machine the interactive screen
//! uses; effects are resolved inline on a local runtime instead of being
//! spawned behind an event loop.

use shutter::app::state::{AppModel, Command, FlashMode, LensFacing, Message, PermissionStatus};
use shutter::backends::camera::CameraCapability;
use shutter::backends::library::LibraryCapability;
use shutter::config::Config;
use shutter::constants::timing;
use shutter::errors::{CameraError, PhotoError};

use std::path::PathBuf;
use std::sync::Arc;

/// Parse a `--facing` argument.
pub fn parse_facing(value: &str) -> Result<LensFacing, String> {
    match value.to_ascii_lowercase().as_str() {
        "back" => Ok(LensFacing::Back),
        "front" => Ok(LensFacing::Front),
        other => Err(format!(
            "unknown facing '{}', expected 'back' or 'front'",
            other
        )),
    }
}

/// Take a single photo and save it, without the interactive screen
pub fn take_photo(
    camera: Arc<dyn CameraCapability>,
    library: Arc<dyn LibraryCapability>,
    config: &Config,
    output: Option<PathBuf>,
    facing: Option<LensFacing>,
    flash: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;

    let mut model = AppModel::new(config.clone());
    if let Some(facing) = facing {
        model.settings.facing = facing;
    }
    if flash {
        model.settings.flash = FlashMode::On;
    }

    // Resolve permissions up front; headless runs fail instead of sitting
    // on the loading screen.
    println!("Resolving permissions...");
    let (camera_status, library_status) = resolve_permissions(&rt, &camera, &library)?;
    model.update(Message::CameraPermission(camera_status));
    model.update(Message::LibraryPermission(library_status));

    if !camera_status.is_granted() {
        return Err(Box::new(CameraError::PermissionDenied));
    }
    if !library_status.is_granted() {
        return Err(Box::new(PhotoError::PermissionDenied));
    }

    // Press the shutter and run the resulting capture to completion.
    println!(
        "Capturing... ({} lens, flash {})",
        model.settings.facing.display_name(),
        model.settings.flash.display_name()
    );
    let Some(Command::Capture(settings)) = model.update(Message::Shutter).into_iter().next()
    else {
        return Err("Shutter unavailable".into());
    };

    let result = rt.block_on(camera.capture(settings));
    if let Err(e) = &result {
        return Err(format!("Capture failed: {e}").into());
    }
    model.update(Message::CaptureComplete(result));

    let Some(image) = &model.image else {
        return Err("Capture produced no photo".into());
    };
    println!("Captured {}x{}", image.frame.width, image.frame.height);

    // An explicit output path bypasses the library and writes directly.
    if let Some(path) = output {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, image.jpeg.as_ref())?;
        println!("Photo saved: {}", path.display());
        return Ok(());
    }

    let Some(Command::Persist(image)) = model.update(Message::Save).into_iter().next() else {
        return Err("Nothing to save".into());
    };
    let result = rt.block_on(library.persist(image));
    let saved = result.clone();
    model.update(Message::SaveComplete(result));

    let path = saved?;
    println!("Photo saved: {}", path.display());
    Ok(())
}

/// Resolve both permissions and report them
pub fn report_permissions(
    camera: Arc<dyn CameraCapability>,
    library: Arc<dyn LibraryCapability>,
) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    let (camera_status, library_status) = resolve_permissions(&rt, &camera, &library)?;

    println!("Camera:        {}", permission_label(camera_status));
    println!("Media library: {}", permission_label(library_status));

    if !camera_status.is_granted() || !library_status.is_granted() {
        return Err("permission denied".into());
    }
    Ok(())
}

/// Resolve both permissions with a headless timeout.
fn resolve_permissions(
    rt: &tokio::runtime::Runtime,
    camera: &Arc<dyn CameraCapability>,
    library: &Arc<dyn LibraryCapability>,
) -> Result<(PermissionStatus, PermissionStatus), Box<dyn std::error::Error>> {
    rt.block_on(async {
        tokio::time::timeout(
            timing::HEADLESS_PERMISSION_WAIT,
            futures::future::join(camera.request_permission(), library.request_permission()),
        )
        .await
    })
    .map_err(|_| "Timed out waiting for permission resolution".into())
}

fn permission_label(status: PermissionStatus) -> &'static str {
    match status {
        PermissionStatus::Granted => "granted",
        PermissionStatus::Denied => "denied",
        PermissionStatus::Unknown => "unresolved",
    }
}
