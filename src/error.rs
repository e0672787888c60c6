// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error type.
//!
//! Out-of-range edit parameters are clamped, and undo/redo at a history
//! boundary is a no-op, so neither appears here. What remains are caller
//! contract violations ([`Error::NoImageLoaded`]) and genuine I/O, decode or
//! encode failures.

use crate::media::export::ExportFormat;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A transform or export operation was requested with no image loaded.
    #[error("No image loaded: load a source image before editing")]
    NoImageLoaded,

    /// The source image could not be decoded or is unusable.
    #[error("Load Error: {0}")]
    Load(String),

    /// The compositor could not allocate or draw the output raster.
    #[error("Render Error: {0}")]
    Render(String),

    /// Encoding to the requested format failed.
    #[error("Encode Error ({format:?}): {message}")]
    Encode {
        format: ExportFormat,
        message: String,
    },

    /// The save sink rejected an exported image.
    #[error("Sink Error: {0}")]
    Sink(String),

    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),
}

impl Error {
    /// Returns a stable, machine-readable key for this error kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Error::NoImageLoaded => "error-no-image-loaded",
            Error::Load(_) => "error-load",
            Error::Render(_) => "error-render",
            Error::Encode { .. } => "error-encode",
            Error::Sink(_) => "error-sink",
            Error::Io(_) => "error-io",
            Error::Config(_) => "error-config",
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        match err {
            image_rs::ImageError::IoError(io) => Error::Io(io.to_string()),
            other => Error::Load(other.to_string()),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
