// SPDX-License-Identifier: MPL-2.0
//! Raster compositor: re-renders a source image under a [`TransformState`].
//!
//! Rendering is a pure function of `(source, state, options)`. Geometry is
//! composed around the output center in a fixed order (translate to center,
//! rotate, flip, scale, draw the source centered at its natural size), then
//! the color filter runs over the composite, then the optional grid overlay
//! is stroked on top.
//!
//! The output is never smaller than the source: with `scale < 1` the canvas
//! keeps the source's natural size so the unscaled image always fits.

use crate::editor::TransformState;
use crate::error::{Error, Result};
use crate::media::color_filter::ColorFilter;
use crate::media::source::SourceImage;
use image_rs::{DynamicImage, RgbaImage};
use std::time::Instant;
use tiny_skia::{
    Color, FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform,
};

pub use crate::config::defaults::DEFAULT_GRID_SPACING;

/// Debug grid drawn over the finished raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridOverlay {
    pub spacing: u32,
    pub line_width: f32,
    /// Straight-alpha RGBA line color.
    pub color: [u8; 4],
}

impl Default for GridOverlay {
    fn default() -> Self {
        Self {
            spacing: DEFAULT_GRID_SPACING,
            line_width: 1.0,
            color: [255, 255, 255, 128],
        }
    }
}

/// Render-time switches that are not part of the edit history.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderOptions {
    pub grid: Option<GridOverlay>,
}

impl RenderOptions {
    #[must_use]
    pub fn with_grid(grid: GridOverlay) -> Self {
        Self { grid: Some(grid) }
    }
}

/// Freshly rendered pixels, straight alpha.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRaster {
    image: RgbaImage,
}

impl OutputRaster {
    fn from_pixmap(pixmap: &Pixmap) -> Self {
        let bytes: Vec<u8> = pixmap
            .pixels()
            .iter()
            .flat_map(|pixel| {
                let color = pixel.demultiply();
                [color.red(), color.green(), color.blue(), color.alpha()]
            })
            .collect();
        // Dimensions and length come from the same pixmap
        let image = RgbaImage::from_vec(pixmap.width(), pixmap.height(), bytes)
            .unwrap_or_else(|| RgbaImage::new(pixmap.width(), pixmap.height()));
        Self { image }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    #[must_use]
    pub fn pixels(&self) -> &RgbaImage {
        &self.image
    }

    #[must_use]
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    #[must_use]
    pub fn to_dynamic(&self) -> DynamicImage {
        DynamicImage::ImageRgba8(self.image.clone())
    }
}

/// Size of the output raster for a source of `(width, height)` under `state`.
#[must_use]
pub fn output_dimensions(width: u32, height: u32, state: &TransformState) -> (u32, u32) {
    let (scaled_width, scaled_height) = state.scale.apply_to_dimensions(width, height);
    (scaled_width.max(width), scaled_height.max(height))
}

/// Renders `source` under `state`, including the color filter and overlays.
///
/// # Errors
///
/// Returns [`Error::Render`] if the output raster cannot be allocated.
pub fn render(
    source: &SourceImage,
    state: &TransformState,
    options: &RenderOptions,
) -> Result<OutputRaster> {
    let started = Instant::now();

    let mut canvas = compose(source, state)?;
    ColorFilter::from(state).apply_to_pixmap(&mut canvas);
    if let Some(grid) = &options.grid {
        draw_grid(&mut canvas, grid);
    }
    let raster = OutputRaster::from_pixmap(&canvas);

    tracing::debug!(
        width = raster.width(),
        height = raster.height(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "rendered raster"
    );
    Ok(raster)
}

/// Renders only the geometric part of `state`, without color filter or overlays.
///
/// # Errors
///
/// Returns [`Error::Render`] if the output raster cannot be allocated.
pub fn compose_geometry(source: &SourceImage, state: &TransformState) -> Result<OutputRaster> {
    compose(source, state).map(|canvas| OutputRaster::from_pixmap(&canvas))
}

fn compose(source: &SourceImage, state: &TransformState) -> Result<Pixmap> {
    let (width, height) = output_dimensions(source.width(), source.height(), state);
    let mut canvas = Pixmap::new(width, height)
        .ok_or_else(|| Error::Render(format!("cannot allocate {width}x{height} raster")))?;
    canvas.fill(Color::TRANSPARENT);

    let paint = PixmapPaint {
        quality: sampling_quality(state),
        ..PixmapPaint::default()
    };
    canvas.draw_pixmap(
        0,
        0,
        source.pixmap().as_ref(),
        &paint,
        geometry_transform(width, height, source, state),
        None,
    );
    Ok(canvas)
}

/// Builds the canvas transform: center, rotate, flip, scale, then offset the
/// source so its center lands on the origin.
#[allow(clippy::cast_precision_loss)]
fn geometry_transform(
    width: u32,
    height: u32,
    source: &SourceImage,
    state: &TransformState,
) -> Transform {
    let mut transform = Transform::from_translate(width as f32 / 2.0, height as f32 / 2.0);

    if !state.rotation.is_zero() {
        // tiny-skia takes degrees; positive is clockwise with y pointing down
        transform = transform.pre_concat(Transform::from_rotate(state.rotation.value()));
    }

    if state.flip_horizontal || state.flip_vertical {
        let flip_x = if state.flip_horizontal { -1.0 } else { 1.0 };
        let flip_y = if state.flip_vertical { -1.0 } else { 1.0 };
        transform = transform.pre_concat(Transform::from_scale(flip_x, flip_y));
    }

    if !state.scale.is_identity() {
        let factor = state.scale.value();
        transform = transform.pre_concat(Transform::from_scale(factor, factor));
    }

    transform.pre_concat(Transform::from_translate(
        -(source.width() as f32) / 2.0,
        -(source.height() as f32) / 2.0,
    ))
}

/// Pixel-aligned results (flips only) sample exactly; anything that resamples
/// is filtered.
fn sampling_quality(state: &TransformState) -> FilterQuality {
    if state.rotation.is_zero() && state.scale.is_identity() {
        FilterQuality::Nearest
    } else {
        FilterQuality::Bilinear
    }
}

#[allow(clippy::cast_precision_loss)]
fn draw_grid(canvas: &mut Pixmap, grid: &GridOverlay) {
    if grid.spacing == 0 {
        return;
    }
    let (width, height) = (canvas.width(), canvas.height());
    let mut builder = PathBuilder::new();

    // Half-pixel offset keeps 1px lines on a single pixel column/row
    for x in (grid.spacing..width).step_by(grid.spacing as usize) {
        builder.move_to(x as f32 + 0.5, 0.0);
        builder.line_to(x as f32 + 0.5, height as f32);
    }
    for y in (grid.spacing..height).step_by(grid.spacing as usize) {
        builder.move_to(0.0, y as f32 + 0.5);
        builder.line_to(width as f32, y as f32 + 0.5);
    }

    let Some(path) = builder.finish() else {
        return;
    };
    let [r, g, b, a] = grid.color;
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = false;
    let stroke = Stroke {
        width: grid.line_width,
        ..Stroke::default()
    };
    canvas.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}
