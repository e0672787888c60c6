// SPDX-License-Identifier: MPL-2.0
//! Brightness, contrast and saturation as a single post-composition pass.
//!
//! The three adjustments follow the CSS filter functions `brightness()`,
//! `contrast()` and `saturate()`, applied in that order to un-premultiplied
//! channels, with each stage clamped to `[0, 1]` before the next. Alpha is
//! never modified.

use crate::editor::TransformState;
use tiny_skia::{ColorU8, Pixmap};

/// Rec. 709 luma weights used by the `saturate()` matrix.
const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

/// Color adjustment factors (1.0 = unchanged).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorFilter {
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
}

impl Default for ColorFilter {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            contrast: 1.0,
            saturation: 1.0,
        }
    }
}

impl From<&TransformState> for ColorFilter {
    fn from(state: &TransformState) -> Self {
        Self {
            brightness: state.brightness.as_factor(),
            contrast: state.contrast.as_factor(),
            saturation: state.saturation.as_factor(),
        }
    }
}

impl ColorFilter {
    /// Returns whether the filter leaves every pixel unchanged.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Filters one straight-alpha RGBA pixel.
    #[must_use]
    pub fn apply_to_rgba(&self, [r, g, b, a]: [u8; 4]) -> [u8; 4] {
        let mut rgb = [r, g, b].map(|channel| f32::from(channel) / 255.0);

        if (self.brightness - 1.0).abs() > f32::EPSILON {
            rgb = rgb.map(|c| (c * self.brightness).clamp(0.0, 1.0));
        }

        if (self.contrast - 1.0).abs() > f32::EPSILON {
            rgb = rgb.map(|c| ((c - 0.5) * self.contrast + 0.5).clamp(0.0, 1.0));
        }

        if (self.saturation - 1.0).abs() > f32::EPSILON {
            let s = self.saturation;
            let [r, g, b] = rgb;
            rgb = [
                (LUMA_R + (1.0 - LUMA_R) * s) * r
                    + (LUMA_G - LUMA_G * s) * g
                    + (LUMA_B - LUMA_B * s) * b,
                (LUMA_R - LUMA_R * s) * r
                    + (LUMA_G + (1.0 - LUMA_G) * s) * g
                    + (LUMA_B - LUMA_B * s) * b,
                (LUMA_R - LUMA_R * s) * r
                    + (LUMA_G - LUMA_G * s) * g
                    + (LUMA_B + (1.0 - LUMA_B) * s) * b,
            ]
            .map(|c| c.clamp(0.0, 1.0));
        }

        // Bounded to 0.0..=255.0 by the clamps above
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let [r, g, b] = rgb.map(|c| (c * 255.0).round() as u8);
        [r, g, b, a]
    }

    /// Filters a premultiplied pixmap in place.
    pub fn apply_to_pixmap(&self, pixmap: &mut Pixmap) {
        if self.is_identity() {
            return;
        }
        for pixel in pixmap.pixels_mut() {
            let alpha = pixel.alpha();
            if alpha == 0 {
                continue;
            }
            let straight = pixel.demultiply();
            let [r, g, b, a] = self.apply_to_rgba([
                straight.red(),
                straight.green(),
                straight.blue(),
                alpha,
            ]);
            *pixel = ColorU8::from_rgba(r, g, b, a).premultiply();
        }
    }
}
