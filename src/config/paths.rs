// SPDX-License-Identifier: MPL-2.0
//! Config directory resolution.
//!
//! # Resolution Order
//!
//! 1. **Explicit override** - `--config-dir` or a test directory
//! 2. **Environment variable** - `LENS_EDIT_CONFIG_DIR` (if non-empty)
//! 3. **Platform default** - via `dirs`, with the app name appended

use std::path::PathBuf;

/// Application name used for directory naming.
const APP_NAME: &str = "LensEdit";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "LENS_EDIT_CONFIG_DIR";

/// Returns the application config directory path.
///
/// - Linux: `~/.config/LensEdit/`
/// - macOS: `~/Library/Application Support/LensEdit/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\LensEdit\`
///
/// Returns `None` if the platform has no config directory.
#[must_use]
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Returns the config directory, preferring `override_path` when given.
#[must_use]
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}
