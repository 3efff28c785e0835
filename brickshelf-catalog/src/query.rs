//! Listing criteria: equality filters plus a closed set of sort keys.
//!
//! Callers that receive raw strings (query parameters, CLI flags) go through
//! [`ListQuery::from_params`], which maps anything unrecognized to "absent"
//! so only known column names ever reach the query builder.

use serde::{Deserialize, Serialize};

/// Fields a listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Title,
    SetNumber,
    ReleaseYear,
    ApproximateValue,
    NumParts,
    CreatedAt,
}

impl SortField {
    pub const ALL: [SortField; 6] = [
        Self::Title,
        Self::SetNumber,
        Self::ReleaseYear,
        Self::ApproximateValue,
        Self::NumParts,
        Self::CreatedAt,
    ];

    /// The camelCase name used by callers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::SetNumber => "setNumber",
            Self::ReleaseYear => "releaseYear",
            Self::ApproximateValue => "approximateValue",
            Self::NumParts => "numParts",
            Self::CreatedAt => "createdAt",
        }
    }

    /// Storage column backing this sort key.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::SetNumber => "set_number",
            Self::ReleaseYear => "release_year",
            Self::ApproximateValue => "approximate_value",
            Self::NumParts => "num_parts",
            Self::CreatedAt => "created_at",
        }
    }

    /// Accepts the camelCase or snake_case spelling, case-insensitively.
    /// Returns `None` for anything else.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        let wanted = s.trim();
        Self::ALL.into_iter().find(|field| {
            field.as_str().eq_ignore_ascii_case(wanted) || field.column().eq_ignore_ascii_case(wanted)
        })
    }
}

/// Sort direction. Anything but "desc" is ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    pub fn from_str_loose(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }
}

/// Filter and sort criteria for listing records.
///
/// Filters combine with AND; a `None` filter is not applied. Without a sort
/// field the listing is ordered newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListQuery {
    pub series: Option<String>,
    pub owned: Option<bool>,
    pub sort_field: Option<SortField>,
    pub sort_direction: SortDirection,
}

impl ListQuery {
    /// Build a query from raw caller strings.
    ///
    /// An empty series means no series filter. `owned` is parsed leniently
    /// (`true`, `1`, `yes` are true; any other non-empty value is false).
    /// Unknown sort fields fall back to the default order.
    pub fn from_params(
        series: Option<&str>,
        owned: Option<&str>,
        sort_by: Option<&str>,
        sort_order: Option<&str>,
    ) -> Self {
        let series = series
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());
        let owned = owned
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| matches!(s.to_ascii_lowercase().as_str(), "true" | "1" | "yes"));
        let sort_field = sort_by.and_then(SortField::from_str_loose);
        let sort_direction = sort_order
            .map(SortDirection::from_str_loose)
            .unwrap_or_default();

        Self {
            series,
            owned,
            sort_field,
            sort_direction,
        }
    }

    pub fn with_series(mut self, series: impl Into<String>) -> Self {
        self.series = Some(series.into());
        self
    }

    pub fn with_owned(mut self, owned: bool) -> Self {
        self.owned = Some(owned);
        self
    }

    pub fn sorted_by(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort_field = Some(field);
        self.sort_direction = direction;
        self
    }
}
