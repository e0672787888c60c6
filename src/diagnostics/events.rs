// SPDX-License-Identifier: MPL-2.0
//! Activity record types.
//!
//! One [`ActivityRecord`] is captured for every session operation, whether it
//! succeeded, was a boundary no-op, or failed.

use serde::{Deserialize, Serialize};

use crate::editor::TransformState;
use crate::media::ExportFormat;

/// What happened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActivityKind {
    /// A source image was loaded.
    Loaded { width: u32, height: u32 },

    /// The image was discarded.
    Cleared,

    /// A partial update was merged.
    Updated { state: TransformState },

    /// All parameters went back to their defaults.
    Reset,

    /// Undo was requested; `applied` is false at the oldest entry.
    Undo { applied: bool },

    /// Redo was requested; `applied` is false at the newest entry.
    Redo { applied: bool },

    /// An export reached the sink.
    Exported {
        filename: String,
        format: ExportFormat,
        bytes: usize,
    },

    /// An operation returned an error.
    Failed {
        operation: String,
        /// Stable error key, see [`crate::error::Error::kind`].
        error: String,
    },
}

/// A timestamped [`ActivityKind`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityRecord {
    /// Unix milliseconds.
    pub timestamp: i64,
    #[serde(flatten)]
    pub kind: ActivityKind,
}

impl ActivityRecord {
    /// Stamps `kind` with the current time.
    #[must_use]
    pub fn now(kind: ActivityKind) -> Self {
        Self {
            timestamp: chrono::Utc::now().timestamp_millis(),
            kind,
        }
    }
}
