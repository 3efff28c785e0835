//! Application settings (database location, image directory, busy timeout).
//!
//! The settings file lives at `~/.config/brickshelf/settings.toml`. Every
//! value is resolved through the same priority chain so the CLI and tests
//! agree on where the catalog is.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the database file.
pub const DB_ENV: &str = "BRICKSHELF_DB";
/// Environment variable naming the image directory.
pub const IMAGE_DIR_ENV: &str = "BRICKSHELF_IMAGE_DIR";

pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("Invalid settings file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// On-disk shape of `settings.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsFile {
    pub storage: StorageSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    pub database_path: Option<PathBuf>,
    pub image_dir: Option<PathBuf>,
    pub busy_timeout_ms: Option<u64>,
}

/// Values supplied on the command line; they win over everything else.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub database_path: Option<PathBuf>,
    pub image_dir: Option<PathBuf>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub database_path: PathBuf,
    pub image_dir: PathBuf,
    pub busy_timeout: Duration,
}

/// Canonical path to the settings file: `~/.config/brickshelf/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("brickshelf").join("settings.toml")
}

/// Directory holding the default database and images.
pub fn default_data_dir() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join("brickshelf")
}

/// Read a settings file. A missing file yields the defaults.
pub fn load_settings_file(path: &Path) -> Result<SettingsFile, SettingsError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(SettingsFile::default()),
        Err(source) => {
            return Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    toml::from_str(&contents).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the settings file as a pretty-printed TOML string for display.
pub fn load_settings_string() -> Option<String> {
    let contents = std::fs::read_to_string(settings_path()).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    toml::to_string_pretty(&doc).ok()
}

impl Settings {
    /// Resolve settings from the real environment and settings file.
    pub fn load(overrides: &SettingsOverrides) -> Result<Self, SettingsError> {
        let file = load_settings_file(&settings_path())?;
        Ok(Self::resolve(
            overrides,
            &file,
            |key| std::env::var_os(key).map(PathBuf::from),
            &default_data_dir(),
        ))
    }

    /// Resolve each value using a priority chain:
    ///
    /// 1. CLI override (if `Some`)
    /// 2. Environment variable (if set and non-empty)
    /// 3. `[storage]` entry in `settings.toml`
    /// 4. Default under `data_dir`
    pub fn resolve(
        overrides: &SettingsOverrides,
        file: &SettingsFile,
        env: impl Fn(&str) -> Option<PathBuf>,
        data_dir: &Path,
    ) -> Self {
        let env = |key: &str| env(key).filter(|p| !p.as_os_str().is_empty());

        let database_path = overrides
            .database_path
            .clone()
            .or_else(|| env(DB_ENV))
            .or_else(|| file.storage.database_path.clone())
            .unwrap_or_else(|| data_dir.join("catalog.db"));

        let image_dir = overrides
            .image_dir
            .clone()
            .or_else(|| env(IMAGE_DIR_ENV))
            .or_else(|| file.storage.image_dir.clone())
            .unwrap_or_else(|| data_dir.join("images"));

        let busy_timeout = Duration::from_millis(
            file.storage
                .busy_timeout_ms
                .unwrap_or(DEFAULT_BUSY_TIMEOUT_MS),
        );

        Self {
            database_path,
            image_dir,
            busy_timeout,
        }
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
