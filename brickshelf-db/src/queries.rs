//! Read queries for the catalog database.
//!
//! Provides filtered/sorted listing, substring search, series listing, and
//! collection statistics.

use brickshelf_catalog::query::{ListQuery, SortField};
use brickshelf_catalog::types::*;
use rusqlite::types::ToSql;
use rusqlite::{params, Connection};

use crate::operations::{row_to_record, OperationError, RECORD_COLUMNS};

// ── Listing ─────────────────────────────────────────────────────────────────

/// List records matching the query's filters, in the query's order.
///
/// The sort column comes from [`SortField::column`]; caller text never
/// reaches the SQL string. Without a sort field, newest records come first.
pub fn list_records(
    conn: &Connection,
    query: &ListQuery,
) -> Result<Vec<CatalogRecord>, OperationError> {
    let mut sql = format!("SELECT {RECORD_COLUMNS} FROM catalog_records WHERE 1=1");
    let mut param_values: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(series) = &query.series {
        param_values.push(Box::new(series.clone()));
        sql.push_str(&format!(" AND series = ?{}", param_values.len()));
    }
    if let Some(owned) = query.owned {
        param_values.push(Box::new(owned));
        sql.push_str(&format!(" AND owned = ?{}", param_values.len()));
    }

    sql.push_str(&order_clause(query));

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn ToSql> = param_values.iter().map(|v| v.as_ref()).collect();
    let rows = stmt.query_map(params.as_slice(), row_to_record)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Every record, newest first.
pub fn list_all_records(conn: &Connection) -> Result<Vec<CatalogRecord>, OperationError> {
    list_records(conn, &ListQuery::default())
}

fn order_clause(query: &ListQuery) -> String {
    match query.sort_field {
        Some(field) => {
            let collation = match field {
                SortField::Title | SortField::SetNumber => " COLLATE UNICASE",
                _ => "",
            };
            format!(
                " ORDER BY {}{} {}, rowid ASC",
                field.column(),
                collation,
                query.sort_direction.as_sql(),
            )
        }
        None => " ORDER BY created_at DESC, rowid DESC".to_string(),
    }
}

// ── Search ──────────────────────────────────────────────────────────────────

/// Case-insensitive substring search over set number, title, description,
/// series, and notes. Always ordered by title.
///
/// Both sides are folded with `unicode_lower`, so non-ASCII letters match
/// regardless of case.
pub fn search_records(
    conn: &Connection,
    term: &str,
) -> Result<Vec<CatalogRecord>, OperationError> {
    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
    let mut stmt = conn.prepare(&format!(
        "SELECT {RECORD_COLUMNS} FROM catalog_records
         WHERE unicode_lower(set_number) LIKE ?1 ESCAPE '\\'
            OR unicode_lower(title) LIKE ?1 ESCAPE '\\'
            OR unicode_lower(description) LIKE ?1 ESCAPE '\\'
            OR unicode_lower(series) LIKE ?1 ESCAPE '\\'
            OR unicode_lower(notes) LIKE ?1 ESCAPE '\\'
         ORDER BY title COLLATE UNICASE ASC, rowid ASC"
    ))?;
    let rows = stmt.query_map(params![pattern], row_to_record)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Escape LIKE wildcards so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

// ── Series ──────────────────────────────────────────────────────────────────

/// Distinct non-empty series names, alphabetically.
pub fn list_series(conn: &Connection) -> Result<Vec<String>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT series FROM catalog_records
         WHERE series IS NOT NULL AND series != ''
         ORDER BY series ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Compute collection statistics from the current table contents.
///
/// Sums cover owned records only, weighted by `quantity_owned`. Records
/// without a value contribute nothing to the value total.
pub fn collection_stats(conn: &Connection) -> Result<CollectionStats, OperationError> {
    let (total_sets, owned_sets, total_pieces, total_minifigs, total_value) = conn.query_row(
        "SELECT
             COUNT(*),
             COALESCE(SUM(CASE WHEN owned = 1 THEN 1 ELSE 0 END), 0),
             COALESCE(SUM(CASE WHEN owned = 1 THEN num_parts * quantity_owned ELSE 0 END), 0),
             COALESCE(SUM(CASE WHEN owned = 1 THEN num_minifigs * quantity_owned ELSE 0 END), 0),
             COALESCE(SUM(CASE WHEN owned = 1 AND approximate_value IS NOT NULL
                               THEN approximate_value * quantity_owned ELSE 0.0 END), 0.0)
         FROM catalog_records",
        [],
        |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, i64>(1)?,
                r.get::<_, i64>(2)?,
                r.get::<_, i64>(3)?,
                r.get::<_, f64>(4)?,
            ))
        },
    )?;

    let average_value = if owned_sets > 0 {
        total_value / owned_sets as f64
    } else {
        0.0
    };

    Ok(CollectionStats {
        total_sets,
        owned_sets,
        total_pieces,
        total_minifigs,
        total_value,
        average_value,
        most_expensive_set: find_owned_extremal(
            conn,
            "approximate_value IS NOT NULL",
            "approximate_value DESC",
        )?,
        largest_set: find_owned_extremal(conn, "1=1", "num_parts DESC")?,
        oldest_set: find_owned_extremal(conn, "release_year IS NOT NULL", "release_year ASC")?,
        newest_set: find_owned_extremal(conn, "release_year IS NOT NULL", "release_year DESC")?,
    })
}

/// First owned record under `condition`, ranked by `order`.
///
/// Both fragments are fixed strings from [`collection_stats`].
fn find_owned_extremal(
    conn: &Connection,
    condition: &'static str,
    order: &'static str,
) -> Result<Option<CatalogRecord>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {RECORD_COLUMNS} FROM catalog_records
         WHERE owned = 1 AND {condition}
         ORDER BY {order}, rowid ASC LIMIT 1"
    ))?;
    match stmt.query_row([], row_to_record) {
        Ok(r) => Ok(Some(r)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
