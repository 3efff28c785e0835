//! The catalog engine: validated operations over one explicit database
//! connection and one image store.
//!
//! Set-number uniqueness is checked here before inserts and renames so the
//! common case reports a clean conflict. The unique index in the database
//! remains the final word when two writers race.

use std::io::{Read, Write};

use brickshelf_catalog::query::ListQuery;
use brickshelf_catalog::types::*;
use brickshelf_db as db;
use brickshelf_import::{ImportProgress, ImportSummary};
use rusqlite::Connection;

use crate::error::CatalogError;
use crate::images::{DiskImageStore, ImageStore};
use crate::settings::Settings;

pub struct Collection<S: ImageStore = DiskImageStore> {
    conn: Connection,
    images: S,
}

impl Collection<DiskImageStore> {
    /// Open the database and image directory named by `settings`.
    pub fn open(settings: &Settings) -> Result<Self, CatalogError> {
        if let Some(parent) = settings.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = db::open_database(&settings.database_path)?;
        conn.busy_timeout(settings.busy_timeout)?;
        log::debug!("Opened catalog at {}", settings.database_path.display());
        Ok(Self::new(conn, DiskImageStore::new(&settings.image_dir)))
    }
}

impl<S: ImageStore> Collection<S> {
    pub fn new(conn: Connection, images: S) -> Self {
        Self { conn, images }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn images(&self) -> &S {
        &self.images
    }

    // ── Records ─────────────────────────────────────────────────────────────

    /// Validate and store a new record.
    pub fn create(&self, new: &NewRecord) -> Result<CatalogRecord, CatalogError> {
        new.validate()?;
        if db::find_record_by_set_number(&self.conn, &new.set_number)?.is_some() {
            return Err(CatalogError::Conflict(new.set_number.clone()));
        }
        let record = db::insert_record(&self.conn, new)?;
        log::info!("Created {} ({})", record.set_number, record.id);
        Ok(record)
    }

    pub fn get(&self, id: &str) -> Result<Option<CatalogRecord>, CatalogError> {
        Ok(db::find_record_by_id(&self.conn, id)?)
    }

    pub fn get_by_set_number(&self, set_number: &str) -> Result<Option<CatalogRecord>, CatalogError> {
        Ok(db::find_record_by_set_number(&self.conn, set_number)?)
    }

    fn require(&self, id: &str) -> Result<CatalogRecord, CatalogError> {
        self.get(id)?.ok_or_else(|| CatalogError::not_found(id))
    }

    /// Apply a partial update and return the record as stored afterwards.
    ///
    /// An empty patch returns the record unchanged.
    pub fn update(&self, id: &str, patch: &RecordPatch) -> Result<CatalogRecord, CatalogError> {
        patch.validate()?;
        let existing = self.require(id)?;

        if let Some(set_number) = &patch.set_number
            && *set_number != existing.set_number
            && db::find_record_by_set_number(&self.conn, set_number)?.is_some()
        {
            return Err(CatalogError::Conflict(set_number.clone()));
        }

        db::update_record(&self.conn, id, patch)?;
        self.require(id)
    }

    /// Delete a record and release its image.
    ///
    /// Failing to remove the image file is logged, not returned.
    pub fn delete(&self, id: &str) -> Result<(), CatalogError> {
        let existing = self.require(id)?;
        db::delete_record(&self.conn, id)?;

        if let Some(name) = existing.image_filename.as_deref()
            && let Err(e) = self.images.delete(name)
        {
            log::warn!("Failed to delete image {} for {}: {}", name, existing.set_number, e);
        }
        log::info!("Deleted {} ({})", existing.set_number, existing.id);
        Ok(())
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    pub fn list(&self, query: &ListQuery) -> Result<Vec<CatalogRecord>, CatalogError> {
        Ok(db::list_records(&self.conn, query)?)
    }

    /// Substring search. A blank term is rejected.
    pub fn search(&self, term: &str) -> Result<Vec<CatalogRecord>, CatalogError> {
        if term.trim().is_empty() {
            return Err(ValidationError::EmptySearchTerm.into());
        }
        Ok(db::search_records(&self.conn, term)?)
    }

    pub fn statistics(&self) -> Result<CollectionStats, CatalogError> {
        Ok(db::collection_stats(&self.conn)?)
    }

    pub fn series(&self) -> Result<Vec<String>, CatalogError> {
        Ok(db::list_series(&self.conn)?)
    }

    // ── CSV ─────────────────────────────────────────────────────────────────

    /// Write every record, newest first. Returns the number of rows written.
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<usize, CatalogError> {
        let records = db::list_all_records(&self.conn)?;
        brickshelf_import::export_csv(&records, writer)?;
        Ok(records.len())
    }

    /// Import CSV rows, skipping set numbers already in the collection.
    pub fn import_csv<R: Read>(
        &self,
        reader: R,
        progress: Option<&dyn ImportProgress>,
    ) -> Result<ImportSummary, CatalogError> {
        Ok(brickshelf_import::import_csv(&self.conn, reader, progress)?)
    }

    // ── Images ──────────────────────────────────────────────────────────────

    /// Store a new image for a record, replacing any previous one.
    ///
    /// Returns the stored filename.
    pub fn attach_image(
        &self,
        id: &str,
        bytes: &[u8],
        original_filename: &str,
    ) -> Result<String, CatalogError> {
        let existing = self.require(id)?;
        let stored = self
            .images
            .save(bytes, original_filename, &existing.id, &existing.set_number)?;

        let patch = RecordPatch {
            image_filename: Some(Some(stored.clone())),
            ..Default::default()
        };
        db::update_record(&self.conn, id, &patch)?;

        // The new file may have overwritten the old one in place
        if let Some(old) = existing.image_filename.as_deref()
            && old != stored
            && let Err(e) = self.images.delete(old)
        {
            log::warn!("Failed to delete replaced image {}: {}", old, e);
        }

        Ok(stored)
    }
}
