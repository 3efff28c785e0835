pub(crate) mod image;
pub(crate) mod query;
pub(crate) mod records;
pub(crate) mod settings;
pub(crate) mod stats;
pub(crate) mod transfer;

use brickshelf_catalog::types::CatalogRecord;
use brickshelf_lib::{Collection, ImageStore};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

/// Find a record by id, falling back to set number.
pub(crate) fn resolve_record<S: ImageStore>(
    collection: &Collection<S>,
    key: &str,
) -> Result<CatalogRecord, CliError> {
    if let Some(record) = collection.get(key)? {
        return Ok(record);
    }
    collection
        .get_by_set_number(key)?
        .ok_or_else(|| CliError::not_found(key))
}

/// Truncate a string to a maximum width, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}

pub(crate) fn format_value(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".to_string())
}

/// One line per record, for listings.
pub(crate) fn log_record_table(records: &[CatalogRecord]) {
    log::info!(
        "{}",
        format!(
            "  {:<12} {:<40} {:<16} {:>5} {:>6} {:>10}",
            "Set", "Title", "Series", "Year", "Parts", "Value"
        )
        .if_supports_color(Stdout, |t| t.bold()),
    );
    for record in records {
        let marker = if record.owned {
            "\u{2713}".if_supports_color(Stdout, |t| t.green()).to_string()
        } else {
            " ".to_string()
        };
        log::info!(
            "{} {:<12} {:<40} {:<16} {:>5} {:>6} {:>10}",
            marker,
            truncate_str(&record.set_number, 12),
            truncate_str(&record.title, 40),
            truncate_str(record.series.as_deref().unwrap_or("-"), 16),
            record
                .release_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "-".to_string()),
            record.num_parts,
            format_value(record.approximate_value),
        );
    }
}

/// Every field of a record, for `show` and after mutations.
pub(crate) fn log_record_detail(record: &CatalogRecord) {
    log::info!(
        "{} {}",
        record.set_number.if_supports_color(Stdout, |t| t.bold()),
        record.title.if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Id:             {}", record.id);
    let optional: [(&str, Option<String>); 10] = [
        ("Alternate:", record.alternate_set_number.clone()),
        ("Series:", record.series.clone()),
        ("Released:", record.release_year.map(|y| y.to_string())),
        ("Description:", record.description.clone()),
        ("Bricklink:", record.bricklink_url.clone()),
        ("Rebrickable:", record.rebrickable_url.clone()),
        ("Condition:", record.condition_description.clone()),
        (
            "Value date:",
            record
                .value_last_updated
                .map(|d| d.format("%Y-%m-%d").to_string()),
        ),
        ("Image:", record.image_filename.clone()),
        ("Notes:", record.notes.clone()),
    ];
    log::info!(
        "  Owned:          {} (quantity {})",
        if record.owned { "yes" } else { "no" },
        record.quantity_owned,
    );
    log::info!("  Parts:          {}", record.num_parts);
    log::info!("  Minifigs:       {}", record.num_minifigs);
    log::info!("  Value:          {}", format_value(record.approximate_value));
    for (label, value) in optional {
        if let Some(value) = value {
            log::info!("  {:<15} {}", label, value);
        }
    }
    log::info!(
        "  Added:          {}",
        record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    log::info!(
        "  Updated:        {}",
        record.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
}
