//! SQLite persistence layer for the collection catalog.
//!
//! Provides schema creation, record CRUD, filtered listing, search, and
//! collection statistics backed by SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    OperationError, delete_record, find_record_by_id, find_record_by_set_number, insert_record,
    update_record,
};
pub use queries::{collection_stats, list_all_records, list_records, list_series, search_records};
pub use schema::{SchemaError, open_database, open_memory};
