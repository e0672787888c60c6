// SPDX-License-Identifier: MPL-2.0
//! Raster side of the editor: decoding sources, compositing and encoding.
//!
//! Everything here is stateless apart from [`export::Exporter`], which only
//! remembers its last filename stamp.

pub mod color_filter;
pub mod compositor;
pub mod export;
pub mod sink;
pub mod source;

pub use color_filter::ColorFilter;
pub use compositor::{render, GridOverlay, OutputRaster, RenderOptions};
pub use export::{ExportFormat, ExportRequest, ExportedImage, Exporter};
pub use sink::{DirectorySink, MemorySink, SaveSink};
pub use source::SourceImage;
