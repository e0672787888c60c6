// SPDX-License-Identifier: MPL-2.0
//! Diagnostics newtypes.

// =============================================================================
// Log Capacity Bounds
// =============================================================================

/// Activity log capacity bounds (number of records).
pub mod log_capacity_bounds {
    /// Minimum number of retained records.
    pub const MIN: usize = 16;
    /// Maximum number of retained records.
    pub const MAX: usize = 10_000;
    /// Default number of retained records.
    pub const DEFAULT: usize = 256;
}

// =============================================================================
// LogCapacity
// =============================================================================

/// Capacity of the activity log, always within 16–10000 records.
///
/// # Example
///
/// ```
/// use lens_edit::domain::diagnostics::LogCapacity;
///
/// assert_eq!(LogCapacity::new(1000).value(), 1000);
/// assert_eq!(LogCapacity::new(50_000).value(), 10_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogCapacity(usize);

impl LogCapacity {
    /// Creates a new capacity, clamping to the valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(log_capacity_bounds::MIN, log_capacity_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }

    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= log_capacity_bounds::MIN
    }

    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= log_capacity_bounds::MAX
    }
}

impl Default for LogCapacity {
    fn default() -> Self {
        Self(log_capacity_bounds::DEFAULT)
    }
}
