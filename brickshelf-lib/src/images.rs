//! Image storage for catalog records.
//!
//! The store is a collaborator behind the [`ImageStore`] trait: the catalog
//! only hands it bytes and gets back a stored filename. [`DiskImageStore`]
//! keeps files flat in one directory, named `{id}_{set_number}.{ext}`.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Extensions accepted for uploaded images (compared case-insensitively).
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

const DEFAULT_EXTENSION: &str = "jpg";

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Invalid file type: .{0} (allowed: jpg, jpeg, png, gif, webp)")]
    UnsupportedExtension(String),
    #[error("Image I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Where record images are kept.
pub trait ImageStore {
    /// Store `bytes` for a record and return the stored filename.
    ///
    /// The extension of `original_filename` is validated before anything is
    /// written.
    fn save(
        &self,
        bytes: &[u8],
        original_filename: &str,
        record_id: &str,
        set_number: &str,
    ) -> Result<String, ImageError>;

    /// Remove a stored image. Removing a file that is already gone succeeds.
    fn delete(&self, stored_name: &str) -> Result<(), ImageError>;
}

// ── Naming ──────────────────────────────────────────────────────────────────

/// Lowercased extension of `original_filename`, defaulting to `jpg`.
pub fn image_extension(original_filename: &str) -> Result<String, ImageError> {
    let ext = match Path::new(original_filename).extension() {
        Some(ext) => ext.to_string_lossy().to_lowercase(),
        None => return Ok(DEFAULT_EXTENSION.to_string()),
    };
    if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(ImageError::UnsupportedExtension(ext))
    }
}

/// Replace characters that are unsafe in filenames with `_`.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | ' ' => '_',
            other => other,
        })
        .collect()
}

/// Stored name for a record's image.
pub fn stored_image_name(
    original_filename: &str,
    record_id: &str,
    set_number: &str,
) -> Result<String, ImageError> {
    let ext = image_extension(original_filename)?;
    Ok(format!("{}_{}.{}", record_id, sanitize_filename(set_number), ext))
}

// ── Disk Store ──────────────────────────────────────────────────────────────

/// Images stored as plain files in a single directory.
#[derive(Debug, Clone)]
pub struct DiskImageStore {
    dir: PathBuf,
}

impl DiskImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of a stored image. An empty name has no path.
    pub fn image_path(&self, stored_name: &str) -> Option<PathBuf> {
        if stored_name.is_empty() {
            None
        } else {
            Some(self.dir.join(stored_name))
        }
    }
}

impl ImageStore for DiskImageStore {
    fn save(
        &self,
        bytes: &[u8],
        original_filename: &str,
        record_id: &str,
        set_number: &str,
    ) -> Result<String, ImageError> {
        let name = stored_image_name(original_filename, record_id, set_number)?;
        std::fs::create_dir_all(&self.dir)?;

        // Write atomically
        let path = self.dir.join(&name);
        let tmp = self.dir.join(format!("{name}.tmp"));
        std::fs::write(&tmp, bytes)?;
        std::fs::rename(&tmp, &path)?;

        log::debug!("Saved image {} ({} bytes)", path.display(), bytes.len());
        Ok(name)
    }

    fn delete(&self, stored_name: &str) -> Result<(), ImageError> {
        let Some(path) = self.image_path(stored_name) else {
            return Ok(());
        };
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[path = "tests/images_tests.rs"]
mod tests;
