// SPDX-License-Identifier: MPL-2.0
//! Encoding rendered rasters to compressed formats.
//!
//! Every export re-renders from the source at full resolution, so the encoded
//! bytes always match the requested state (color filter included) rather than
//! whatever preview happens to be on screen. Debug overlays are display-only
//! and never exported.

use crate::domain::editing::ExportQuality;
use crate::editor::TransformState;
use crate::error::{Error, Result};
use crate::media::compositor::{self, OutputRaster, RenderOptions};
use crate::media::sink::SaveSink;
use crate::media::source::SourceImage;
use image_rs::codecs::jpeg::JpegEncoder;
use image_rs::codecs::png::PngEncoder;
use image_rs::{ExtendedColorType, ImageEncoder, RgbImage};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use crate::config::defaults::DEFAULT_FILENAME_PREFIX;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// PNG format (lossless, quality ignored).
    #[default]
    Png,
    /// JPEG format (lossy, no alpha).
    Jpeg,
    /// WebP format (lossy, modern compression).
    WebP,
}

impl ExportFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpeg",
            ExportFormat::WebP => "webp",
        }
    }

    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
            ExportFormat::WebP => "image/webp",
        }
    }

    /// Returns whether encoding preserves every pixel exactly.
    #[must_use]
    pub fn is_lossless(self) -> bool {
        matches!(self, ExportFormat::Png)
    }

    /// Returns all supported formats.
    #[must_use]
    pub fn all() -> &'static [ExportFormat] {
        &[ExportFormat::Png, ExportFormat::Jpeg, ExportFormat::WebP]
    }

    /// Detects format from file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<ExportFormat> {
        match ext.to_lowercase().as_str() {
            "png" => Some(ExportFormat::Png),
            "jpg" | "jpeg" => Some(ExportFormat::Jpeg),
            "webp" => Some(ExportFormat::WebP),
            _ => None,
        }
    }

    /// Detects format from file path extension.
    pub fn from_path(path: &Path) -> Option<ExportFormat> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

/// Parameters of a single export.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExportRequest {
    pub format: ExportFormat,
    pub quality: ExportQuality,
    /// Used verbatim when set; otherwise a unique name is generated.
    pub filename: Option<String>,
}

impl ExportRequest {
    #[must_use]
    pub fn new(format: ExportFormat, quality: f32) -> Self {
        Self {
            format,
            quality: ExportQuality::new(quality),
            filename: None,
        }
    }

    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

/// An encoded image ready for a [`SaveSink`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedImage {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub format: ExportFormat,
    pub width: u32,
    pub height: u32,
}

/// Renders, encodes and hands results to a sink.
///
/// Keeps the last generated timestamp so generated filenames are strictly
/// increasing even when two exports land in the same millisecond.
#[derive(Debug, Clone)]
pub struct Exporter {
    prefix: String,
    last_stamp: i64,
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(DEFAULT_FILENAME_PREFIX)
    }
}

impl Exporter {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            last_stamp: 0,
        }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Renders `source` under `state`, encodes it and delivers it to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] or [`Error::Encode`] when producing the bytes
    /// fails (the sink is not called), or whatever error the sink reports.
    pub fn export<S: SaveSink + ?Sized>(
        &mut self,
        source: &SourceImage,
        state: &TransformState,
        request: &ExportRequest,
        sink: &mut S,
    ) -> Result<ExportedImage> {
        let raster = compositor::render(source, state, &RenderOptions::default())?;
        let bytes = encode(&raster, request.format, request.quality)?;
        let filename = match &request.filename {
            Some(name) => name.clone(),
            None => self.generate_filename(request.format),
        };

        let exported = ExportedImage {
            bytes,
            filename,
            format: request.format,
            width: raster.width(),
            height: raster.height(),
        };
        sink.save(&exported)?;

        tracing::info!(
            filename = %exported.filename,
            format = ?exported.format,
            bytes = exported.bytes.len(),
            "exported image"
        );
        Ok(exported)
    }

    /// Generates `{prefix}-{unix_millis}.{ext}`, never repeating a stamp.
    pub fn generate_filename(&mut self, format: ExportFormat) -> String {
        let now = chrono::Utc::now().timestamp_millis();
        let stamp = now.max(self.last_stamp + 1);
        self.last_stamp = stamp;
        format!("{}-{}.{}", self.prefix, stamp, format.extension())
    }
}

/// Encodes a raster in `format`.
///
/// # Errors
///
/// Returns [`Error::Encode`] if the encoder fails or produces no data.
pub fn encode(raster: &OutputRaster, format: ExportFormat, quality: ExportQuality) -> Result<Vec<u8>> {
    let encode_error = |message: String| Error::Encode { format, message };
    let (width, height) = raster.dimensions();
    let mut bytes = Vec::new();

    match format {
        ExportFormat::Png => {
            PngEncoder::new(&mut bytes)
                .write_image(raster.pixels().as_raw(), width, height, ExtendedColorType::Rgba8)
                .map_err(|e| encode_error(e.to_string()))?;
        }
        ExportFormat::Jpeg => {
            // JPEG has no alpha; composite onto black like a canvas does
            let rgb = flatten_on_black(raster);
            JpegEncoder::new_with_quality(&mut bytes, quality.as_percent())
                .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
                .map_err(|e| encode_error(e.to_string()))?;
        }
        ExportFormat::WebP => {
            let encoded = webp::Encoder::from_rgba(raster.pixels().as_raw(), width, height)
                .encode_simple(false, f32::from(quality.as_percent()))
                .map_err(|e| encode_error(format!("{e:?}")))?;
            bytes.extend_from_slice(&encoded);
        }
    }

    if bytes.is_empty() {
        return Err(encode_error("encoder produced no data".to_string()));
    }
    Ok(bytes)
}

fn flatten_on_black(raster: &OutputRaster) -> RgbImage {
    let source = raster.pixels();
    RgbImage::from_fn(source.width(), source.height(), |x, y| {
        let [r, g, b, a] = source.get_pixel(x, y).0;
        let alpha = u16::from(a);
        // (c * a + 127) / 255 stays within u8 for c, a <= 255
        #[allow(clippy::cast_possible_truncation)]
        let blend = |c: u8| ((u16::from(c) * alpha + 127) / 255) as u8;
        image_rs::Rgb([blend(r), blend(g), blend(b)])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::TransformPatch;
    use crate::media::sink::MemorySink;
    use image_rs::{DynamicImage, Rgba, RgbaImage};

    fn gradient_source(width: u32, height: u32) -> SourceImage {
        let image = RgbaImage::from_fn(width, height, |x, y| {
            #[allow(clippy::cast_possible_truncation)]
            Rgba([(x * 7 % 256) as u8, (y * 11 % 256) as u8, 90, 255])
        });
        SourceImage::from_dynamic(&DynamicImage::ImageRgba8(image)).expect("source")
    }

    #[test]
    fn export_format_extensions() {
        assert_eq!(ExportFormat::Png.extension(), "png");
        assert_eq!(ExportFormat::Jpeg.extension(), "jpeg");
        assert_eq!(ExportFormat::WebP.extension(), "webp");
        assert!(ExportFormat::Png.is_lossless());
        assert!(!ExportFormat::Jpeg.is_lossless());
    }

    #[test]
    fn export_format_from_extension() {
        assert_eq!(ExportFormat::from_extension("PNG"), Some(ExportFormat::Png));
        assert_eq!(ExportFormat::from_extension("jpg"), Some(ExportFormat::Jpeg));
        assert_eq!(ExportFormat::from_extension("webp"), Some(ExportFormat::WebP));
        assert_eq!(ExportFormat::from_extension("bmp"), None);
        assert_eq!(
            ExportFormat::from_path(Path::new("/tmp/out.jpeg")),
            Some(ExportFormat::Jpeg)
        );
    }

    #[test]
    fn export_format_default_is_png() {
        assert_eq!(ExportFormat::default(), ExportFormat::Png);
        assert_eq!(ExportFormat::all().len(), 3);
    }

    #[test]
    fn generated_filenames_are_unique_and_ordered() {
        let mut exporter = Exporter::new("shot");
        let first = exporter.generate_filename(ExportFormat::Png);
        let second = exporter.generate_filename(ExportFormat::Png);
        assert_ne!(first, second);
        assert!(first.starts_with("shot-"));
        assert!(first.ends_with(".png"));

        let stamp = |name: &str| -> i64 {
            name.trim_start_matches("shot-")
                .trim_end_matches(".png")
                .parse()
                .expect("numeric stamp")
        };
        assert!(stamp(&second) > stamp(&first));
    }

    #[test]
    fn png_round_trip_is_pixel_exact() {
        let source = gradient_source(13, 7);
        let state = TransformState::default()
            .apply(&TransformPatch::rotation(15.0).with_contrast(140.0));
        let raster = compositor::render(&source, &state, &RenderOptions::default()).expect("render");

        let bytes = encode(&raster, ExportFormat::Png, ExportQuality::new(0.1)).expect("encode");
        let decoded = image_rs::load_from_memory(&bytes).expect("decode").to_rgba8();
        assert_eq!(&decoded, raster.pixels());
    }

    #[test]
    fn lossy_formats_produce_signed_bytes() {
        let source = gradient_source(16, 16);
        let raster = compositor::render(&source, &TransformState::default(), &RenderOptions::default())
            .expect("render");

        let jpeg = encode(&raster, ExportFormat::Jpeg, ExportQuality::new(0.9)).expect("jpeg");
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);

        let webp = encode(&raster, ExportFormat::WebP, ExportQuality::new(0.8)).expect("webp");
        assert_eq!(&webp[..4], b"RIFF");
        assert_eq!(&webp[8..12], b"WEBP");
    }

    #[test]
    fn jpeg_flattens_transparency_onto_black() {
        let source = SourceImage::from_rgba(1, 1, vec![255, 255, 255, 0]).expect("source");
        let raster = compositor::render(&source, &TransformState::default(), &RenderOptions::default())
            .expect("render");
        assert_eq!(flatten_on_black(&raster).get_pixel(0, 0).0, [0, 0, 0]);
    }

    #[test]
    fn export_delivers_to_sink_and_honors_explicit_name() {
        let source = gradient_source(8, 8);
        let mut sink = MemorySink::default();
        let mut exporter = Exporter::default();

        let request = ExportRequest::new(ExportFormat::Jpeg, 0.9).with_filename("custom.jpg");
        let exported = exporter
            .export(&source, &TransformState::default(), &request, &mut sink)
            .expect("export");

        assert_eq!(exported.filename, "custom.jpg");
        assert_eq!(sink.saved().len(), 1);
        assert_eq!(sink.saved()[0], exported);
        assert!(!exported.bytes.is_empty());
    }

    #[test]
    fn sink_errors_propagate() {
        let source = gradient_source(4, 4);
        let mut exporter = Exporter::default();
        let mut failing = |_: &ExportedImage| -> Result<()> { Err(Error::Sink("disk full".into())) };

        let err = exporter
            .export(&source, &TransformState::default(), &ExportRequest::default(), &mut failing)
            .expect_err("sink failure");
        assert!(matches!(err, Error::Sink(_)));
    }
}
