//! Application layer for the brickshelf collection catalog.
//!
//! Ties the data model, SQLite store, and CSV transcoder together behind a
//! single [`Collection`] handle, and owns the pieces a frontend needs around
//! it: settings resolution and on-disk image storage.

pub mod collection;
pub mod error;
pub mod images;
pub mod settings;

pub use collection::Collection;
pub use error::CatalogError;
pub use images::{DiskImageStore, ImageError, ImageStore};
pub use settings::{Settings, SettingsError, SettingsOverrides};
