//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use brickshelf_catalog::types::{NewRecord, RecordPatch};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "brickshelf")]
#[command(about = "Catalog a personal collection of building sets", long_about = None)]
pub(crate) struct Cli {
    /// Catalog database file (overrides BRICKSHELF_DB and settings.toml)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Directory for record images (overrides BRICKSHELF_IMAGE_DIR and settings.toml)
    #[arg(long, global = true)]
    pub image_dir: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Add a set to the catalog
    Add {
        /// Set number (must be unique)
        set_number: String,

        /// Set title
        title: String,

        /// Mark the set as owned
        #[arg(long)]
        owned: bool,

        #[command(flatten)]
        fields: RecordFields,
    },

    /// Show one record (by id or set number)
    Show {
        /// Record id or set number
        record: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List records with optional filters and sorting
    List {
        /// Only records in this series
        #[arg(long)]
        series: Option<String>,

        /// Only owned (true) or wanted (false) records
        #[arg(long)]
        owned: Option<String>,

        /// Sort field (title, setNumber, releaseYear, approximateValue, numParts, createdAt)
        #[arg(long)]
        sort: Option<String>,

        /// Sort direction (asc or desc)
        #[arg(long)]
        order: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search set number, title, description, series, and notes
    Search {
        /// Case-insensitive substring
        term: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change fields of an existing record
    Update {
        /// Record id or set number
        record: String,

        /// New set number
        #[arg(long)]
        set_number: Option<String>,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// Owned flag (true or false)
        #[arg(long)]
        owned: Option<bool>,

        #[command(flatten)]
        fields: RecordFields,

        /// Clear optional fields (repeatable)
        #[arg(long, value_enum, value_delimiter = ',')]
        clear: Vec<ClearableField>,
    },

    /// Delete a record and its image
    Delete {
        /// Record id or set number
        record: String,
    },

    /// Show collection statistics
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List distinct series names
    Series,

    /// Export the whole collection as CSV
    Export {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import records from a CSV file, skipping existing set numbers
    Import {
        /// CSV file to import
        file: PathBuf,
    },

    /// Manage record images
    Image {
        #[command(subcommand)]
        action: ImageAction,
    },

    /// Show storage settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

/// Optional record fields shared by `add` and `update`.
#[derive(Args, Clone, Default)]
pub(crate) struct RecordFields {
    /// Alternate set number (e.g., "75192-1")
    #[arg(long)]
    pub alternate_set_number: Option<String>,

    /// Number of copies owned
    #[arg(long)]
    pub quantity: Option<i32>,

    /// Release year
    #[arg(long)]
    pub year: Option<i32>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub series: Option<String>,

    /// Number of parts
    #[arg(long)]
    pub parts: Option<i32>,

    /// Number of minifigures
    #[arg(long)]
    pub minifigs: Option<i32>,

    #[arg(long)]
    pub bricklink_url: Option<String>,

    #[arg(long)]
    pub rebrickable_url: Option<String>,

    /// Approximate value
    #[arg(long)]
    pub value: Option<f64>,

    /// Date the value was last checked (YYYY-MM-DD)
    #[arg(long)]
    pub value_date: Option<NaiveDate>,

    /// Condition (e.g., "Sealed", "Built, complete")
    #[arg(long)]
    pub condition: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

/// Optional fields that `update --clear` can unset.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ClearableField {
    AlternateSetNumber,
    Year,
    Description,
    Series,
    BricklinkUrl,
    RebrickableUrl,
    Value,
    ValueDate,
    Condition,
    Notes,
}

#[derive(Subcommand)]
pub(crate) enum ImageAction {
    /// Attach an image file to a record, replacing any previous one
    Attach {
        /// Record id or set number
        record: String,

        /// Image file (jpg, jpeg, png, gif, webp)
        file: PathBuf,
    },

    /// Print the path of a record's image
    Path {
        /// Record id or set number
        record: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum SettingsAction {
    /// Show resolved settings and the settings file contents
    Show,

    /// Print the settings file path
    Path,
}

impl RecordFields {
    /// Build a creation request from the positional arguments and flags.
    pub(crate) fn into_new_record(self, set_number: String, title: String, owned: bool) -> NewRecord {
        NewRecord {
            set_number,
            alternate_set_number: self.alternate_set_number,
            title,
            owned,
            quantity_owned: self.quantity.unwrap_or(if owned { 1 } else { 0 }),
            release_year: self.year,
            description: self.description,
            series: self.series,
            num_parts: self.parts.unwrap_or(0),
            num_minifigs: self.minifigs.unwrap_or(0),
            bricklink_url: self.bricklink_url,
            rebrickable_url: self.rebrickable_url,
            approximate_value: self.value,
            value_last_updated: self.value_date,
            condition_description: self.condition,
            image_filename: None,
            notes: self.notes,
        }
    }

    /// Build a patch from the supplied flags. `clear` wins over a value
    /// given for the same field.
    pub(crate) fn into_patch(
        self,
        set_number: Option<String>,
        title: Option<String>,
        owned: Option<bool>,
        clear: &[ClearableField],
    ) -> RecordPatch {
        let set = |field: ClearableField, value: Option<String>| {
            if clear.contains(&field) {
                Some(None)
            } else {
                value.map(Some)
            }
        };

        RecordPatch {
            set_number,
            alternate_set_number: set(
                ClearableField::AlternateSetNumber,
                self.alternate_set_number,
            ),
            title,
            owned,
            quantity_owned: self.quantity,
            release_year: if clear.contains(&ClearableField::Year) {
                Some(None)
            } else {
                self.year.map(Some)
            },
            description: set(ClearableField::Description, self.description),
            series: set(ClearableField::Series, self.series),
            num_parts: self.parts,
            num_minifigs: self.minifigs,
            bricklink_url: set(ClearableField::BricklinkUrl, self.bricklink_url),
            rebrickable_url: set(ClearableField::RebrickableUrl, self.rebrickable_url),
            approximate_value: if clear.contains(&ClearableField::Value) {
                Some(None)
            } else {
                self.value.map(Some)
            },
            value_last_updated: if clear.contains(&ClearableField::ValueDate) {
                Some(None)
            } else {
                self.value_date.map(Some)
            },
            condition_description: set(ClearableField::Condition, self.condition),
            image_filename: None,
            notes: set(ClearableField::Notes, self.notes),
        }
    }
}

#[cfg(test)]
#[path = "tests/cli_types_tests.rs"]
mod tests;
