// SPDX-License-Identifier: GPL-3.0-only

//! Backend abstraction layer for camera input and photo output
//!
//! This module provides the provider implementations the capture screen
//! runs against:
//! - Camera frame sources (synthetic pattern or an image file on disk)
//! - Media library persistence into the pictures directory
//!
//! # Architecture
//!
//! The backend layer abstracts frame production and photo storage behind
//! traits, so the state machine sees the same API regardless of source:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  App Layer                  │
//! └────────────────────┬────────────────────────┘
//!                      │
//! ┌────────────────────┴────────────────────────┐
//! │              Backend Layer                  │
//! │  ┌──────────────────┐  ┌────────────────┐   │
//! │  │      Camera      │  │ Media Library  │   │
//! │  │ (synthetic/file) │  │  (filesystem)  │   │
//! │  └──────────────────┘  └────────────────┘   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`camera`]: Camera providers with permission, preview, and capture
//! - [`library`]: Photo persistence and the library permission probe

pub mod camera;
pub mod library;
