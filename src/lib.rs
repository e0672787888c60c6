// SPDX-License-Identifier: MPL-2.0
//! `lens_edit` is a non-destructive image transform engine.
//!
//! A [`editor::Session`] owns one source image, the current
//! [`editor::TransformState`] (scale, rotation, flips, brightness, contrast,
//! saturation) and a bounded linear undo history. Every state change
//! re-renders the display raster through the [`media::compositor`], and
//! exports re-render at full resolution before encoding to PNG, JPEG or WebP
//! and handing the bytes to a [`media::SaveSink`].
//!
//! ```no_run
//! use lens_edit::config::EditorConfig;
//! use lens_edit::editor::{Session, TransformPatch};
//! use lens_edit::media::DirectorySink;
//!
//! # fn main() -> lens_edit::error::Result<()> {
//! let mut session = Session::new(EditorConfig::default(), DirectorySink::new("out"));
//! session.load_path("photo.png")?;
//! session.update(&TransformPatch::rotation(15.0).with_brightness(120.0))?;
//! session.export_with_defaults()?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod editor;
pub mod error;
pub mod media;
