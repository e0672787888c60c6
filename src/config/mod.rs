// SPDX-License-Identifier: MPL-2.0
//! Editor configuration, loaded from and saved to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[history]` - Undo depth and duplicate handling
//! - `[defaults]` - The state a freshly loaded image starts from
//! - `[render]` - Debug grid overlay
//! - `[export]` - Format, quality and filename prefix for default exports
//! - `[diagnostics]` - Activity log size
//!
//! Every field is optional on disk; missing fields take their default.
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass a directory to `load_with_override()`/`save_with_override()`
//! 3. Set `LENS_EDIT_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use lens_edit::config;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! config.history.max_entries = 50;
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;
pub mod paths;

pub use defaults::*;

use crate::domain::diagnostics::LogCapacity;
use crate::domain::editing::{ExportQuality, HistoryCapacity};
use crate::editor::TransformState;
use crate::error::{Error, Result};
use crate::media::{ExportFormat, ExportRequest, GridOverlay, RenderOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Undo history settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of snapshots, clamped to 1–500.
    pub max_entries: usize,

    /// Collapse consecutive identical states into one entry.
    pub deduplicate: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_HISTORY_CAPACITY,
            deduplicate: DEFAULT_HISTORY_DEDUPLICATE,
        }
    }
}

/// Display rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Draw the debug grid over the display raster.
    pub grid: bool,

    /// Grid spacing in pixels.
    pub grid_spacing: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            grid: false,
            grid_spacing: DEFAULT_GRID_SPACING,
        }
    }
}

/// Settings used by default exports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    pub format: ExportFormat,

    /// Lossy quality in (0, 1]; ignored for PNG.
    pub quality: f32,

    pub filename_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            quality: DEFAULT_EXPORT_QUALITY,
            filename_prefix: DEFAULT_FILENAME_PREFIX.to_string(),
        }
    }
}

/// Activity log settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DiagnosticsConfig {
    pub activity_log_capacity: usize,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            activity_log_capacity: DEFAULT_ACTIVITY_LOG_CAPACITY,
        }
    }
}

// =============================================================================
// EditorConfig
// =============================================================================

/// Complete editor configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EditorConfig {
    #[serde(default)]
    pub history: HistoryConfig,

    /// Initial state of every loaded image (and the target of reset).
    #[serde(default)]
    pub defaults: TransformState,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

impl EditorConfig {
    #[must_use]
    pub fn history_capacity(&self) -> HistoryCapacity {
        HistoryCapacity::new(self.history.max_entries)
    }

    #[must_use]
    pub fn export_quality(&self) -> ExportQuality {
        ExportQuality::new(self.export.quality)
    }

    /// Request used by default exports (no explicit filename).
    #[must_use]
    pub fn export_request(&self) -> ExportRequest {
        ExportRequest {
            format: self.export.format,
            quality: self.export_quality(),
            filename: None,
        }
    }

    /// Options for the display raster.
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        if !self.render.grid {
            return RenderOptions::default();
        }
        RenderOptions::with_grid(GridOverlay {
            spacing: self
                .render
                .grid_spacing
                .clamp(MIN_GRID_SPACING, MAX_GRID_SPACING),
            ..GridOverlay::default()
        })
    }

    #[must_use]
    pub fn log_capacity(&self) -> LogCapacity {
        LogCapacity::new(self.diagnostics.activity_log_capacity)
    }
}

// =============================================================================
// Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
#[must_use]
pub fn load() -> (EditorConfig, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
#[must_use]
pub fn load_with_override(base_dir: Option<PathBuf>) -> (EditorConfig, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "using default config");
                    return (
                        EditorConfig::default(),
                        Some(format!("{}: {err}", path.display())),
                    );
                }
            }
        }
    }
    (EditorConfig::default(), None)
}

/// Loads configuration from a specific path.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`] if
/// it is not valid TOML for [`EditorConfig`].
pub fn load_from_path(path: &Path) -> Result<EditorConfig> {
    let content = fs::read_to_string(path)?;
    let config: EditorConfig = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
///
/// # Errors
///
/// See [`save_to_path`].
pub fn save(config: &EditorConfig) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
///
/// # Errors
///
/// See [`save_to_path`].
pub fn save_with_override(config: &EditorConfig, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path, creating parent directories.
///
/// # Errors
///
/// Returns [`Error::Io`] on write failure and [`Error::Config`] if the
/// configuration cannot be serialized.
pub fn save_to_path(config: &EditorConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
