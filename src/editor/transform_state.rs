// SPDX-License-Identifier: MPL-2.0
//! The immutable snapshot of every edit parameter, and partial updates to it.

use crate::domain::editing::{ColorPercent, RotationDegrees, Scale};
use serde::{Deserialize, Serialize};

/// Current set of edit parameters.
///
/// Every field is a clamping newtype, so a `TransformState` is always within
/// its domain no matter how it was built.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransformState {
    pub scale: Scale,
    pub rotation: RotationDegrees,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    pub brightness: ColorPercent,
    pub contrast: ColorPercent,
    pub saturation: ColorPercent,
}

impl TransformState {
    /// Returns a new state with `patch` merged in; unspecified fields are kept.
    #[must_use]
    pub fn apply(&self, patch: &TransformPatch) -> Self {
        Self {
            scale: patch.scale.map_or(self.scale, Scale::new),
            rotation: patch.rotation_degrees.map_or(self.rotation, RotationDegrees::new),
            flip_horizontal: patch.flip_horizontal.unwrap_or(self.flip_horizontal),
            flip_vertical: patch.flip_vertical.unwrap_or(self.flip_vertical),
            brightness: patch.brightness_percent.map_or(self.brightness, ColorPercent::new),
            contrast: patch.contrast_percent.map_or(self.contrast, ColorPercent::new),
            saturation: patch.saturation_percent.map_or(self.saturation, ColorPercent::new),
        }
    }

    /// Returns whether every field holds its default value.
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Returns whether any geometric transform (scale, rotation, flip) is active.
    #[must_use]
    pub fn has_geometry(&self) -> bool {
        !self.scale.is_identity()
            || !self.rotation.is_zero()
            || self.flip_horizontal
            || self.flip_vertical
    }

    /// Returns whether any color adjustment is active.
    #[must_use]
    pub fn has_color_adjustment(&self) -> bool {
        !self.brightness.is_neutral() || !self.contrast.is_neutral() || !self.saturation.is_neutral()
    }
}

/// Serialized form keeps plain numbers so config files and activity logs stay readable.
#[derive(Serialize, Deserialize)]
#[serde(default)]
struct RawTransformState {
    scale: f32,
    rotation_degrees: f32,
    flip_horizontal: bool,
    flip_vertical: bool,
    brightness_percent: f32,
    contrast_percent: f32,
    saturation_percent: f32,
}

impl Default for RawTransformState {
    fn default() -> Self {
        (&TransformState::default()).into()
    }
}

impl From<&TransformState> for RawTransformState {
    fn from(state: &TransformState) -> Self {
        Self {
            scale: state.scale.value(),
            rotation_degrees: state.rotation.value(),
            flip_horizontal: state.flip_horizontal,
            flip_vertical: state.flip_vertical,
            brightness_percent: state.brightness.value(),
            contrast_percent: state.contrast.value(),
            saturation_percent: state.saturation.value(),
        }
    }
}

impl Serialize for TransformState {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RawTransformState::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TransformState {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawTransformState::deserialize(deserializer)?;
        // Out-of-range values on disk are clamped like any other input
        Ok(Self {
            scale: Scale::new(raw.scale),
            rotation: RotationDegrees::new(raw.rotation_degrees),
            flip_horizontal: raw.flip_horizontal,
            flip_vertical: raw.flip_vertical,
            brightness: ColorPercent::new(raw.brightness_percent),
            contrast: ColorPercent::new(raw.contrast_percent),
            saturation: ColorPercent::new(raw.saturation_percent),
        })
    }
}

/// Partial update: `None` fields keep their current value.
///
/// Values are raw and unclamped; clamping happens in [`TransformState::apply`].
///
/// ```
/// use lens_edit::editor::{TransformPatch, TransformState};
///
/// let patch = TransformPatch::scale(2.0).with_brightness(250.0);
/// let state = TransformState::default().apply(&patch);
/// assert_eq!(state.scale.value(), 2.0);
/// assert_eq!(state.brightness.value(), 200.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransformPatch {
    pub scale: Option<f32>,
    pub rotation_degrees: Option<f32>,
    pub flip_horizontal: Option<bool>,
    pub flip_vertical: Option<bool>,
    pub brightness_percent: Option<f32>,
    pub contrast_percent: Option<f32>,
    pub saturation_percent: Option<f32>,
}

impl TransformPatch {
    #[must_use]
    pub fn scale(value: f32) -> Self {
        Self::default().with_scale(value)
    }

    #[must_use]
    pub fn rotation(degrees: f32) -> Self {
        Self::default().with_rotation(degrees)
    }

    #[must_use]
    pub fn brightness(percent: f32) -> Self {
        Self::default().with_brightness(percent)
    }

    #[must_use]
    pub fn contrast(percent: f32) -> Self {
        Self::default().with_contrast(percent)
    }

    #[must_use]
    pub fn saturation(percent: f32) -> Self {
        Self::default().with_saturation(percent)
    }

    #[must_use]
    pub fn with_scale(mut self, value: f32) -> Self {
        self.scale = Some(value);
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation_degrees = Some(degrees);
        self
    }

    #[must_use]
    pub fn with_flip_horizontal(mut self, flip: bool) -> Self {
        self.flip_horizontal = Some(flip);
        self
    }

    #[must_use]
    pub fn with_flip_vertical(mut self, flip: bool) -> Self {
        self.flip_vertical = Some(flip);
        self
    }

    #[must_use]
    pub fn with_brightness(mut self, percent: f32) -> Self {
        self.brightness_percent = Some(percent);
        self
    }

    #[must_use]
    pub fn with_contrast(mut self, percent: f32) -> Self {
        self.contrast_percent = Some(percent);
        self
    }

    #[must_use]
    pub fn with_saturation(mut self, percent: f32) -> Self {
        self.saturation_percent = Some(percent);
        self
    }

    /// Returns whether the patch sets no field at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
