// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **History**: undo depth
//! - **Render**: debug grid overlay
//! - **Export**: format quality and filename prefix
//! - **Diagnostics**: activity log size

use crate::domain::diagnostics::log_capacity_bounds;
use crate::domain::editing::{history_bounds, quality_bounds};

// ==========================================================================
// History Defaults
// ==========================================================================

/// Default number of undo snapshots kept per session.
pub const DEFAULT_HISTORY_CAPACITY: usize = history_bounds::DEFAULT;

/// Minimum history capacity (the seeded default entry).
pub const MIN_HISTORY_CAPACITY: usize = history_bounds::MIN;

/// Maximum history capacity.
pub const MAX_HISTORY_CAPACITY: usize = history_bounds::MAX;

/// Whether identical consecutive states collapse into one entry.
pub const DEFAULT_HISTORY_DEDUPLICATE: bool = false;

// ==========================================================================
// Render Defaults
// ==========================================================================

/// Distance between debug grid lines, in output pixels.
pub const DEFAULT_GRID_SPACING: u32 = 50;

/// Minimum grid spacing.
pub const MIN_GRID_SPACING: u32 = 4;

/// Maximum grid spacing.
pub const MAX_GRID_SPACING: u32 = 1000;

// ==========================================================================
// Export Defaults
// ==========================================================================

/// Default lossy encoder quality, in (0, 1].
pub const DEFAULT_EXPORT_QUALITY: f32 = quality_bounds::DEFAULT;

/// Prefix of generated export filenames.
pub const DEFAULT_FILENAME_PREFIX: &str = "edited-image";

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of activity records kept per session.
pub const DEFAULT_ACTIVITY_LOG_CAPACITY: usize = log_capacity_bounds::DEFAULT;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_HISTORY_CAPACITY >= 1);
    assert!(DEFAULT_HISTORY_CAPACITY >= MIN_HISTORY_CAPACITY);
    assert!(DEFAULT_HISTORY_CAPACITY <= MAX_HISTORY_CAPACITY);

    assert!(MIN_GRID_SPACING > 0);
    assert!(DEFAULT_GRID_SPACING >= MIN_GRID_SPACING);
    assert!(DEFAULT_GRID_SPACING <= MAX_GRID_SPACING);

    assert!(DEFAULT_EXPORT_QUALITY > 0.0);
    assert!(DEFAULT_EXPORT_QUALITY <= 1.0);

    assert!(!DEFAULT_FILENAME_PREFIX.is_empty());

    assert!(DEFAULT_ACTIVITY_LOG_CAPACITY >= log_capacity_bounds::MIN);
    assert!(DEFAULT_ACTIVITY_LOG_CAPACITY <= log_capacity_bounds::MAX);
};
