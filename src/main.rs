// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use shutter::app::LensFacing;
use shutter::backends::camera::{CameraCapability, FileCamera, SyntheticCamera};
use shutter::backends::library::{LibraryCapability, MediaLibrary};
use shutter::config::Config;
use shutter::storage;
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod cli;

#[derive(Parser)]
#[command(name = "shutter")]
#[command(about = "Single-screen terminal camera: live preview, capture, then save or discard")]
#[command(version = shutter::constants::app_info::version())]
#[command(subcommand_required = false)]
struct Cli {
    /// Serve camera frames from an image file instead of the synthetic pattern
    #[arg(long, global = true, value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a photo without the interactive screen
    Photo {
        /// Output file path (default: next free IMG_TIMESTAMP.jpg in the photo library)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Lens to use: 'back' or 'front'
        #[arg(long, value_parser = cli::parse_facing)]
        facing: Option<LensFacing>,

        /// Fire the flash
        #[arg(long)]
        flash: bool,
    },

    /// Resolve and report permissions, then exit
    Permissions,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=shutter=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    let config = Config::load();
    let camera = build_camera(cli.input.as_deref(), &config);
    let library: Arc<dyn LibraryCapability> =
        Arc::new(MediaLibrary::new(storage::photos_dir(&config.save_folder)));

    match cli.command {
        Some(Commands::Photo {
            output,
            facing,
            flash,
        }) => cli::take_photo(camera, library, &config, output, facing, flash),
        Some(Commands::Permissions) => cli::report_permissions(camera, library),
        None => shutter::terminal::run(camera, library, config).map_err(Into::into),
    }
}

/// Pick the camera provider for this invocation.
fn build_camera(input: Option<&Path>, config: &Config) -> Arc<dyn CameraCapability> {
    match input {
        Some(path) => Arc::new(FileCamera::new(
            path,
            config.effective_quality(),
            config.mirror_front_preview,
        )),
        None => Arc::new(SyntheticCamera::new(config.effective_quality())),
    }
}
