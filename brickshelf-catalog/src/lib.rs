//! Collection catalog data model types and listing queries.
//!
//! This crate defines the persistent data model for the collection catalog
//! without any database dependencies. Consumers can use these types directly
//! for serialization, display, or passing to `brickshelf-db` for persistence.

pub mod query;
pub mod types;

pub use query::{ListQuery, SortDirection, SortField};
pub use types::*;
