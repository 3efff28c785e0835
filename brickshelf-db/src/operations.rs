//! CRUD operations for catalog records.
//!
//! The store assigns identifiers and audit timestamps. Uniqueness of the set
//! number is pre-checked by callers; the unique index on `set_number` is the
//! authoritative guard and surfaces as [`OperationError::DuplicateSetNumber`].

use brickshelf_catalog::types::*;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::types::{ToSql, Type};
use rusqlite::{params, Connection};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
    #[error("Set number '{0}' already exists")]
    DuplicateSetNumber(String),
}

impl OperationError {
    fn record_not_found(id: &str) -> Self {
        Self::NotFound {
            entity_type: "record".to_string(),
            id: id.to_string(),
        }
    }
}

/// Column list shared by every query that materializes a [`CatalogRecord`].
/// Order must match [`row_to_record`].
pub(crate) const RECORD_COLUMNS: &str = "id, set_number, alternate_set_number, title, owned,
    quantity_owned, release_year, description, series, num_parts, num_minifigs,
    bricklink_url, rebrickable_url, approximate_value, value_last_updated,
    condition_description, image_filename, notes, created_at, updated_at";

// ── Record Operations ───────────────────────────────────────────────────────

/// Insert a new record. Assigns the identifier and both timestamps.
pub fn insert_record(conn: &Connection, new: &NewRecord) -> Result<CatalogRecord, OperationError> {
    let now = now();
    let record = CatalogRecord {
        id: Uuid::new_v4().to_string(),
        set_number: new.set_number.clone(),
        alternate_set_number: new.alternate_set_number.clone(),
        title: new.title.clone(),
        owned: new.owned,
        quantity_owned: new.quantity_owned,
        release_year: new.release_year,
        description: new.description.clone(),
        series: new.series.clone(),
        num_parts: new.num_parts,
        num_minifigs: new.num_minifigs,
        bricklink_url: new.bricklink_url.clone(),
        rebrickable_url: new.rebrickable_url.clone(),
        approximate_value: new.approximate_value,
        value_last_updated: new.value_last_updated,
        condition_description: new.condition_description.clone(),
        image_filename: new.image_filename.clone(),
        notes: new.notes.clone(),
        created_at: now,
        updated_at: now,
    };

    let stamp = format_timestamp(&now);
    conn.execute(
        "INSERT INTO catalog_records (id, set_number, alternate_set_number, title, owned,
             quantity_owned, release_year, description, series, num_parts, num_minifigs,
             bricklink_url, rebrickable_url, approximate_value, value_last_updated,
             condition_description, image_filename, notes, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17,
             ?18, ?19, ?20)",
        params![
            record.id,
            record.set_number,
            record.alternate_set_number,
            record.title,
            record.owned,
            record.quantity_owned,
            record.release_year,
            record.description,
            record.series,
            record.num_parts,
            record.num_minifigs,
            record.bricklink_url,
            record.rebrickable_url,
            record.approximate_value,
            record.value_last_updated,
            record.condition_description,
            record.image_filename,
            record.notes,
            stamp,
            stamp,
        ],
    )
    .map_err(|e| map_unique_violation(e, &record.set_number))?;

    Ok(record)
}

/// Find a record by its identifier.
pub fn find_record_by_id(
    conn: &Connection,
    id: &str,
) -> Result<Option<CatalogRecord>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {RECORD_COLUMNS} FROM catalog_records WHERE id = ?1"
    ))?;
    match stmt.query_row(params![id], row_to_record) {
        Ok(r) => Ok(Some(r)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Find a record by set number (exact match).
pub fn find_record_by_set_number(
    conn: &Connection,
    set_number: &str,
) -> Result<Option<CatalogRecord>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {RECORD_COLUMNS} FROM catalog_records WHERE set_number = ?1"
    ))?;
    match stmt.query_row(params![set_number], row_to_record) {
        Ok(r) => Ok(Some(r)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Apply a partial update. Only supplied fields are written.
///
/// An empty patch is a successful no-op and does not touch `updated_at`.
pub fn update_record(
    conn: &Connection,
    id: &str,
    patch: &RecordPatch,
) -> Result<(), OperationError> {
    if patch.is_empty() {
        return Ok(());
    }

    let assignments = patch_assignments(patch);
    let stamp = format_timestamp(&now());

    let mut sql = String::from("UPDATE catalog_records SET ");
    for (i, (column, _)) in assignments.iter().enumerate() {
        if i > 0 {
            sql.push_str(", ");
        }
        sql.push_str(&format!("{column} = ?{}", i + 1));
    }
    let n = assignments.len();
    sql.push_str(&format!(", updated_at = ?{} WHERE id = ?{}", n + 1, n + 2));

    let mut values: Vec<&dyn ToSql> = assignments.iter().map(|(_, v)| v.as_ref()).collect();
    values.push(&stamp);
    values.push(&id);

    let changed = conn
        .execute(&sql, values.as_slice())
        .map_err(|e| map_unique_violation(e, patch.set_number.as_deref().unwrap_or_default()))?;
    if changed == 0 {
        return Err(OperationError::record_not_found(id));
    }
    Ok(())
}

/// Delete a record by identifier.
pub fn delete_record(conn: &Connection, id: &str) -> Result<(), OperationError> {
    let changed = conn.execute("DELETE FROM catalog_records WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(OperationError::record_not_found(id));
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────────

/// Column/value pairs for every field present in the patch.
///
/// Column names come from this fixed table, never from caller input.
fn patch_assignments(patch: &RecordPatch) -> Vec<(&'static str, Box<dyn ToSql>)> {
    let mut out: Vec<(&'static str, Box<dyn ToSql>)> = Vec::new();

    if let Some(v) = &patch.set_number {
        out.push(("set_number", Box::new(v.clone())));
    }
    if let Some(v) = &patch.alternate_set_number {
        out.push(("alternate_set_number", Box::new(v.clone())));
    }
    if let Some(v) = &patch.title {
        out.push(("title", Box::new(v.clone())));
    }
    if let Some(v) = patch.owned {
        out.push(("owned", Box::new(v)));
    }
    if let Some(v) = patch.quantity_owned {
        out.push(("quantity_owned", Box::new(v)));
    }
    if let Some(v) = patch.release_year {
        out.push(("release_year", Box::new(v)));
    }
    if let Some(v) = &patch.description {
        out.push(("description", Box::new(v.clone())));
    }
    if let Some(v) = &patch.series {
        out.push(("series", Box::new(v.clone())));
    }
    if let Some(v) = patch.num_parts {
        out.push(("num_parts", Box::new(v)));
    }
    if let Some(v) = patch.num_minifigs {
        out.push(("num_minifigs", Box::new(v)));
    }
    if let Some(v) = &patch.bricklink_url {
        out.push(("bricklink_url", Box::new(v.clone())));
    }
    if let Some(v) = &patch.rebrickable_url {
        out.push(("rebrickable_url", Box::new(v.clone())));
    }
    if let Some(v) = patch.approximate_value {
        out.push(("approximate_value", Box::new(v)));
    }
    if let Some(v) = patch.value_last_updated {
        out.push(("value_last_updated", Box::new(v)));
    }
    if let Some(v) = &patch.condition_description {
        out.push(("condition_description", Box::new(v.clone())));
    }
    if let Some(v) = &patch.image_filename {
        out.push(("image_filename", Box::new(v.clone())));
    }
    if let Some(v) = &patch.notes {
        out.push(("notes", Box::new(v.clone())));
    }

    out
}

fn map_unique_violation(err: rusqlite::Error, set_number: &str) -> OperationError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            OperationError::DuplicateSetNumber(set_number.to_string())
        }
        _ => err.into(),
    }
}

/// Current time at the precision the store keeps (microseconds), so a
/// freshly created record compares equal to its re-read copy.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Fixed-width RFC 3339 so lexical order matches chronological order.
pub(crate) fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(idx: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<CatalogRecord> {
    let created_at: String = row.get(18)?;
    let updated_at: String = row.get(19)?;
    Ok(CatalogRecord {
        id: row.get(0)?,
        set_number: row.get(1)?,
        alternate_set_number: row.get(2)?,
        title: row.get(3)?,
        owned: row.get(4)?,
        quantity_owned: row.get(5)?,
        release_year: row.get(6)?,
        description: row.get(7)?,
        series: row.get(8)?,
        num_parts: row.get(9)?,
        num_minifigs: row.get(10)?,
        bricklink_url: row.get(11)?,
        rebrickable_url: row.get(12)?,
        approximate_value: row.get(13)?,
        value_last_updated: row.get(14)?,
        condition_description: row.get(15)?,
        image_filename: row.get(16)?,
        notes: row.get(17)?,
        created_at: parse_timestamp(18, &created_at)?,
        updated_at: parse_timestamp(19, &updated_at)?,
    })
}
