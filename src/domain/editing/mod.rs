// SPDX-License-Identifier: MPL-2.0
//! Editing domain types.
//!
//! This module provides pure domain types for image editing operations:
//! - [`Scale`]: Uniform scale multiplier
//! - [`RotationDegrees`]: Free rotation angle
//! - [`ColorPercent`]: Brightness/contrast/saturation percentage
//! - [`HistoryCapacity`]: Undo history bound
//! - [`ExportQuality`]: Lossy encoder quality

pub mod newtypes;

pub use newtypes::{
    color_bounds, history_bounds, quality_bounds, rotation_bounds, scale_bounds, ColorPercent,
    ExportQuality, HistoryCapacity, RotationDegrees, Scale,
};
