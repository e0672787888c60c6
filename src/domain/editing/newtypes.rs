// SPDX-License-Identifier: MPL-2.0
//! Editing newtypes.
//!
//! This module provides type-safe wrappers for editing values,
//! ensuring they are always within valid ranges.
//!
//! Non-finite input never escapes a constructor: `NaN` falls back to the
//! default and infinities clamp to the matching bound.

/// Clamps a float into `[min, max]`, mapping `NaN` to `default`.
fn clamp_finite(value: f32, min: f32, max: f32, default: f32) -> f32 {
    if value.is_nan() {
        default
    } else {
        value.clamp(min, max)
    }
}

// =============================================================================
// Scale Bounds
// =============================================================================

/// Uniform scale bounds (0.1x to 3.0x).
pub mod scale_bounds {
    /// Minimum scale factor.
    pub const MIN: f32 = 0.1;
    /// Maximum scale factor.
    pub const MAX: f32 = 3.0;
    /// Default scale factor.
    pub const DEFAULT: f32 = 1.0;
}

// =============================================================================
// Scale
// =============================================================================

/// Uniform scale multiplier, guaranteed to be within valid range (0.1–3.0).
///
/// # Example
///
/// ```
/// use lens_edit::domain::editing::Scale;
///
/// let scale = Scale::new(2.0);
/// assert_eq!(scale.apply_to_dimensions(800, 600), (1600, 1200));
///
/// // Values outside range are clamped
/// assert_eq!(Scale::new(10.0).value(), 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale(f32);

impl Scale {
    /// Creates a new scale, clamping the value to the valid range.
    #[must_use]
    pub fn new(factor: f32) -> Self {
        Self(clamp_finite(
            factor,
            scale_bounds::MIN,
            scale_bounds::MAX,
            scale_bounds::DEFAULT,
        ))
    }

    /// Returns the raw multiplier.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Applies the scale to the given dimensions.
    ///
    /// Fractional pixels are truncated, and both dimensions are at least 1 pixel.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn apply_to_dimensions(self, width: u32, height: u32) -> (u32, u32) {
        let factor = f64::from(self.0);
        // f64 keeps the product exact for every u32 dimension times a factor <= 3.0
        let scaled = |dimension: u32| -> u32 {
            let value = (f64::from(dimension) * factor).floor().max(1.0);
            if value > f64::from(u32::MAX) {
                u32::MAX
            } else {
                value as u32
            }
        };
        (scaled(width), scaled(height))
    }

    /// Returns whether the scale is at the minimum value.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= scale_bounds::MIN
    }

    /// Returns whether the scale is at the maximum value.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= scale_bounds::MAX
    }

    /// Returns whether the scale is exactly 1 (no scaling).
    #[must_use]
    pub fn is_identity(self) -> bool {
        (self.0 - scale_bounds::DEFAULT).abs() < f32::EPSILON
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self(scale_bounds::DEFAULT)
    }
}

// =============================================================================
// Rotation Bounds
// =============================================================================

/// Free rotation bounds (-180° to +180°).
pub mod rotation_bounds {
    /// Minimum rotation in degrees.
    pub const MIN: f32 = -180.0;
    /// Maximum rotation in degrees.
    pub const MAX: f32 = 180.0;
    /// Default rotation in degrees.
    pub const DEFAULT: f32 = 0.0;
}

// =============================================================================
// RotationDegrees
// =============================================================================

/// Free rotation angle in degrees, guaranteed to be within -180..=180.
///
/// Positive values rotate clockwise in screen space (y axis pointing down).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationDegrees(f32);

impl RotationDegrees {
    /// Creates a new rotation, clamping to the valid range.
    ///
    /// Values are clamped, not wrapped: 190° becomes 180°, not -170°.
    #[must_use]
    pub fn new(degrees: f32) -> Self {
        Self(clamp_finite(
            degrees,
            rotation_bounds::MIN,
            rotation_bounds::MAX,
            rotation_bounds::DEFAULT,
        ))
    }

    /// Returns the angle in degrees.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns the angle in radians.
    #[must_use]
    pub fn as_radians(self) -> f32 {
        self.0.to_radians()
    }

    /// Returns whether no rotation is applied.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    /// Returns whether the rotation is at the minimum value.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= rotation_bounds::MIN
    }

    /// Returns whether the rotation is at the maximum value.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= rotation_bounds::MAX
    }
}

// =============================================================================
// Color Adjustment Bounds
// =============================================================================

/// Color adjustment bounds (0% to 200%, 100% is neutral).
pub mod color_bounds {
    /// Minimum adjustment percentage.
    pub const MIN: f32 = 0.0;
    /// Maximum adjustment percentage.
    pub const MAX: f32 = 200.0;
    /// Neutral adjustment percentage.
    pub const DEFAULT: f32 = 100.0;
}

// =============================================================================
// ColorPercent
// =============================================================================

/// Brightness/contrast/saturation percentage, guaranteed to be within 0..=200.
///
/// A value of 100 leaves the image unchanged, 0 is the minimum (black for
/// brightness, flat gray for contrast, grayscale for saturation) and 200
/// doubles the effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPercent(f32);

impl ColorPercent {
    /// Creates a new percentage, clamping to the valid range.
    #[must_use]
    pub fn new(percent: f32) -> Self {
        Self(clamp_finite(
            percent,
            color_bounds::MIN,
            color_bounds::MAX,
            color_bounds::DEFAULT,
        ))
    }

    /// Returns the raw percentage.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns the percentage as a multiplier (100% → 1.0, 200% → 2.0).
    #[must_use]
    pub fn as_factor(self) -> f32 {
        self.0 / 100.0
    }

    /// Returns whether this represents no adjustment.
    #[must_use]
    pub fn is_neutral(self) -> bool {
        (self.0 - color_bounds::DEFAULT).abs() < f32::EPSILON
    }

    /// Returns whether the adjustment is at the minimum value.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= color_bounds::MIN
    }

    /// Returns whether the adjustment is at the maximum value.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= color_bounds::MAX
    }
}

impl Default for ColorPercent {
    fn default() -> Self {
        Self(color_bounds::DEFAULT)
    }
}

// =============================================================================
// History Capacity Bounds
// =============================================================================

/// Undo history capacity bounds (1 to 500 entries).
pub mod history_bounds {
    /// Minimum number of retained entries.
    pub const MIN: usize = 1;
    /// Maximum number of retained entries.
    pub const MAX: usize = 500;
    /// Default number of retained entries.
    pub const DEFAULT: usize = 20;
}

// =============================================================================
// HistoryCapacity
// =============================================================================

/// Maximum number of snapshots kept by the undo history.
///
/// ```
/// use lens_edit::domain::editing::HistoryCapacity;
///
/// assert_eq!(HistoryCapacity::default().value(), 20);
/// assert_eq!(HistoryCapacity::new(0).value(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryCapacity(usize);

impl HistoryCapacity {
    /// Creates a new capacity, clamping to the valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(history_bounds::MIN, history_bounds::MAX))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for HistoryCapacity {
    fn default() -> Self {
        Self(history_bounds::DEFAULT)
    }
}

// =============================================================================
// Export Quality Bounds
// =============================================================================

/// Lossy export quality bounds (0.01 to 1.0).
pub mod quality_bounds {
    /// Minimum quality.
    pub const MIN: f32 = 0.01;
    /// Maximum quality.
    pub const MAX: f32 = 1.0;
    /// Default quality.
    pub const DEFAULT: f32 = 0.92;
}

// =============================================================================
// ExportQuality
// =============================================================================

/// Encoder quality for lossy formats, guaranteed to be within (0, 1].
///
/// Ignored by lossless formats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportQuality(f32);

impl ExportQuality {
    /// Creates a new quality, clamping to the valid range.
    #[must_use]
    pub fn new(quality: f32) -> Self {
        Self(clamp_finite(
            quality,
            quality_bounds::MIN,
            quality_bounds::MAX,
            quality_bounds::DEFAULT,
        ))
    }

    /// Returns the raw quality.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns the quality on the 1..=100 scale used by encoders.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn as_percent(self) -> u8 {
        // Bounded to 1.0..=100.0 by construction
        (self.0 * 100.0).round().clamp(1.0, 100.0) as u8
    }
}

impl Default for ExportQuality {
    fn default() -> Self {
        Self(quality_bounds::DEFAULT)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scale tests
    // -------------------------------------------------------------------------

    #[test]
    fn scale_clamps() {
        assert!((Scale::new(0.01).value() - scale_bounds::MIN).abs() < f32::EPSILON);
        assert!((Scale::new(12.0).value() - scale_bounds::MAX).abs() < f32::EPSILON);
        assert!((Scale::new(1.5).value() - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn scale_accepts_minimum_inclusive() {
        let scale = Scale::new(0.1);
        assert!(scale.is_min());
        assert!((scale.value() - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn scale_nan_falls_back_to_default() {
        assert!(Scale::new(f32::NAN).is_identity());
        assert!(Scale::new(f32::INFINITY).is_max());
        assert!(Scale::new(f32::NEG_INFINITY).is_min());
    }

    #[test]
    fn scale_apply_dimensions() {
        assert_eq!(Scale::new(2.0).apply_to_dimensions(800, 600), (1600, 1200));
        assert_eq!(Scale::new(0.5).apply_to_dimensions(100, 50), (50, 25));
    }

    #[test]
    fn scale_dimensions_never_zero() {
        let (w, h) = Scale::new(0.1).apply_to_dimensions(5, 5);
        assert_eq!((w, h), (1, 1));
    }

    // -------------------------------------------------------------------------
    // RotationDegrees tests
    // -------------------------------------------------------------------------

    #[test]
    fn rotation_clamps_instead_of_wrapping() {
        assert_eq!(RotationDegrees::new(190.0).value(), 180.0);
        assert_eq!(RotationDegrees::new(-720.0).value(), -180.0);
        assert_eq!(RotationDegrees::new(45.0).value(), 45.0);
    }

    #[test]
    fn rotation_radians() {
        let rotation = RotationDegrees::new(180.0);
        assert!((rotation.as_radians() - std::f32::consts::PI).abs() < 1e-6);
        assert!(RotationDegrees::default().is_zero());
    }

    // -------------------------------------------------------------------------
    // ColorPercent tests
    // -------------------------------------------------------------------------

    #[test]
    fn color_percent_clamps() {
        assert_eq!(ColorPercent::new(250.0).value(), 200.0);
        assert_eq!(ColorPercent::new(-10.0).value(), 0.0);
        assert_eq!(ColorPercent::new(150.0).value(), 150.0);
    }

    #[test]
    fn color_percent_factor_and_neutral() {
        assert!(ColorPercent::default().is_neutral());
        assert!((ColorPercent::new(200.0).as_factor() - 2.0).abs() < f32::EPSILON);
        assert!(ColorPercent::new(0.0).is_min());
        assert!(ColorPercent::new(200.0).is_max());
        assert!(!ColorPercent::new(99.0).is_neutral());
    }

    // -------------------------------------------------------------------------
    // HistoryCapacity / ExportQuality tests
    // -------------------------------------------------------------------------

    #[test]
    fn history_capacity_clamps() {
        assert_eq!(HistoryCapacity::new(0).value(), history_bounds::MIN);
        assert_eq!(HistoryCapacity::new(10_000).value(), history_bounds::MAX);
        assert_eq!(HistoryCapacity::default().value(), 20);
    }

    #[test]
    fn export_quality_clamps_and_converts() {
        assert_eq!(ExportQuality::new(0.0).value(), quality_bounds::MIN);
        assert_eq!(ExportQuality::new(3.0).value(), quality_bounds::MAX);
        assert_eq!(ExportQuality::new(0.9).as_percent(), 90);
        assert_eq!(ExportQuality::new(0.0).as_percent(), 1);
        assert_eq!(ExportQuality::new(f32::NAN).value(), quality_bounds::DEFAULT);
    }
}
