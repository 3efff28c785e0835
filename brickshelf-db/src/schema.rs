//! SQLite schema creation, version checks, and text folding functions.

use std::cmp::Ordering;

use rusqlite::Connection;
use rusqlite::functions::FunctionFlags;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Database schema version {found} is newer than supported version {expected}")]
    VersionMismatch { expected: i32, found: i32 },
}

/// Schema version written by this build. Databases reporting a higher
/// version were created by a newer binary and are refused.
pub const CURRENT_VERSION: i32 = 1;

/// SQL function folding text to lowercase across all of Unicode.
pub const LOWER_FUNCTION: &str = "unicode_lower";

/// Collation ordering text case-insensitively across all of Unicode.
pub const CASELESS_COLLATION: &str = "UNICASE";

/// Create all tables and indexes if they don't exist.
///
/// Idempotent; safe to call on an existing database.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    if get_schema_version(conn)? == 0 {
        set_schema_version(conn, CURRENT_VERSION)?;
    }
    Ok(())
}

/// Open or create a catalog database at the given path.
pub fn open_database(path: &std::path::Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    register_text_functions(&conn)?;

    match get_schema_version(&conn)? {
        0 => create_schema(&conn)?,
        found if found > CURRENT_VERSION => {
            return Err(SchemaError::VersionMismatch {
                expected: CURRENT_VERSION,
                found,
            });
        }
        _ => {}
    }

    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    register_text_functions(&conn)?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Install [`LOWER_FUNCTION`] and [`CASELESS_COLLATION`] on a connection.
///
/// SQLite's built-in `LIKE` and `NOCASE` only fold ASCII letters, so
/// searches and title sorts go through these instead. Both are
/// per-connection and must be registered before any query uses them.
pub fn register_text_functions(conn: &Connection) -> Result<(), SchemaError> {
    conn.create_scalar_function(
        LOWER_FUNCTION,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|t| t.to_lowercase()))
        },
    )?;
    conn.create_collation(CASELESS_COLLATION, compare_caseless)?;
    Ok(())
}

fn compare_caseless(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Get the current schema version, or 0 if no schema exists.
pub fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

const SCHEMA_SQL: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- One row per catalog item
CREATE TABLE IF NOT EXISTS catalog_records (
    id TEXT PRIMARY KEY,
    set_number TEXT NOT NULL,
    alternate_set_number TEXT,
    title TEXT NOT NULL,
    owned BOOLEAN NOT NULL DEFAULT 0,
    quantity_owned INTEGER NOT NULL DEFAULT 0,
    release_year INTEGER,
    description TEXT,
    series TEXT,
    num_parts INTEGER NOT NULL DEFAULT 0,
    num_minifigs INTEGER NOT NULL DEFAULT 0,
    bricklink_url TEXT,
    rebrickable_url TEXT,
    approximate_value REAL,
    value_last_updated TEXT,
    condition_description TEXT,
    image_filename TEXT,
    notes TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_records_set_number ON catalog_records(set_number);
CREATE INDEX IF NOT EXISTS idx_records_series ON catalog_records(series);
CREATE INDEX IF NOT EXISTS idx_records_owned ON catalog_records(owned);
CREATE INDEX IF NOT EXISTS idx_records_created ON catalog_records(created_at);
"#;
