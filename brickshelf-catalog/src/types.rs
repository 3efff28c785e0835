//! Data model types for the collection catalog.
//!
//! These types represent the persistent record shape, the creation request
//! used by both interactive callers and CSV import, the typed partial update,
//! and the derived collection statistics.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

// ── Validation ──────────────────────────────────────────────────────────────

/// A creation request or patch violated a required-field rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Set number is required")]
    MissingSetNumber,
    #[error("Title is required")]
    MissingTitle,
    #[error("Search term is required")]
    EmptySearchTerm,
}

// ── Catalog Record ──────────────────────────────────────────────────────────

/// One item in the collection, as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    /// System-assigned identifier (UUID v4), immutable after creation.
    pub id: String,
    /// User-facing business key, unique across the collection.
    pub set_number: String,
    pub alternate_set_number: Option<String>,
    pub title: String,
    pub owned: bool,
    pub quantity_owned: i32,
    pub release_year: Option<i32>,
    pub description: Option<String>,
    pub series: Option<String>,
    pub num_parts: i32,
    pub num_minifigs: i32,
    pub bricklink_url: Option<String>,
    pub rebrickable_url: Option<String>,
    pub approximate_value: Option<f64>,
    pub value_last_updated: Option<NaiveDate>,
    pub condition_description: Option<String>,
    /// Stored filename inside the image directory, if an image is attached.
    pub image_filename: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ── Creation Request ────────────────────────────────────────────────────────

/// The fields a caller supplies to create a record.
///
/// Identifier and audit timestamps are assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewRecord {
    pub set_number: String,
    pub alternate_set_number: Option<String>,
    pub title: String,
    pub owned: bool,
    pub quantity_owned: i32,
    pub release_year: Option<i32>,
    pub description: Option<String>,
    pub series: Option<String>,
    pub num_parts: i32,
    pub num_minifigs: i32,
    pub bricklink_url: Option<String>,
    pub rebrickable_url: Option<String>,
    pub approximate_value: Option<f64>,
    pub value_last_updated: Option<NaiveDate>,
    pub condition_description: Option<String>,
    pub image_filename: Option<String>,
    pub notes: Option<String>,
}

impl NewRecord {
    pub fn new(set_number: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            set_number: set_number.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Check the required fields. Runs before any store interaction.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.set_number.trim().is_empty() {
            return Err(ValidationError::MissingSetNumber);
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        Ok(())
    }
}

// ── Partial Update ──────────────────────────────────────────────────────────

/// A sparse update: `None` leaves the field untouched.
///
/// Nullable fields use a nested option so a patch can distinguish
/// "leave alone" (`None`) from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordPatch {
    pub set_number: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub alternate_set_number: Option<Option<String>>,
    pub title: Option<String>,
    pub owned: Option<bool>,
    pub quantity_owned: Option<i32>,
    #[serde(deserialize_with = "nullable")]
    pub release_year: Option<Option<i32>>,
    #[serde(deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(deserialize_with = "nullable")]
    pub series: Option<Option<String>>,
    pub num_parts: Option<i32>,
    pub num_minifigs: Option<i32>,
    #[serde(deserialize_with = "nullable")]
    pub bricklink_url: Option<Option<String>>,
    #[serde(deserialize_with = "nullable")]
    pub rebrickable_url: Option<Option<String>>,
    #[serde(deserialize_with = "nullable")]
    pub approximate_value: Option<Option<f64>>,
    #[serde(deserialize_with = "nullable")]
    pub value_last_updated: Option<Option<NaiveDate>>,
    #[serde(deserialize_with = "nullable")]
    pub condition_description: Option<Option<String>>,
    #[serde(deserialize_with = "nullable")]
    pub image_filename: Option<Option<String>>,
    #[serde(deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
}

/// A present key (even `null`) becomes `Some(..)`; a missing key stays `None`
/// through `#[serde(default)]`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl RecordPatch {
    /// True when no field is supplied.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Reject patches that would blank a required field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.set_number.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(ValidationError::MissingSetNumber);
        }
        if self.title.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(ValidationError::MissingTitle);
        }
        Ok(())
    }
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Collection-wide derived metrics, recomputed on every request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStats {
    pub total_sets: i64,
    pub owned_sets: i64,
    /// Sum of `num_parts * quantity_owned` over owned records.
    pub total_pieces: i64,
    /// Sum of `num_minifigs * quantity_owned` over owned records.
    pub total_minifigs: i64,
    /// Sum of `approximate_value * quantity_owned` over owned, valued records.
    pub total_value: f64,
    /// `total_value / owned_sets`, or 0 with nothing owned.
    pub average_value: f64,
    pub most_expensive_set: Option<CatalogRecord>,
    pub largest_set: Option<CatalogRecord>,
    pub oldest_set: Option<CatalogRecord>,
    pub newest_set: Option<CatalogRecord>,
}
