use brickshelf_catalog::types::CatalogRecord;
use brickshelf_lib::{Collection, ImageStore};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::format_value;

pub(crate) fn run_stats<S: ImageStore>(
    collection: &Collection<S>,
    json: bool,
) -> Result<(), CliError> {
    let stats = collection.statistics()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    log::info!(
        "{}",
        "Collection Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Sets:           {:>10}", stats.total_sets);
    log::info!("  Owned:          {:>10}", stats.owned_sets);
    log::info!("  Pieces:         {:>10}", stats.total_pieces);
    log::info!("  Minifigs:       {:>10}", stats.total_minifigs);
    log::info!("  Total value:    {:>10.2}", stats.total_value);
    log::info!("  Average value:  {:>10.2}", stats.average_value);
    crate::log_blank();
    log_extremal("Most expensive:", stats.most_expensive_set.as_ref(), |r| {
        format_value(r.approximate_value)
    });
    log_extremal("Largest:", stats.largest_set.as_ref(), |r| {
        format!("{} parts", r.num_parts)
    });
    log_extremal("Oldest:", stats.oldest_set.as_ref(), release_year);
    log_extremal("Newest:", stats.newest_set.as_ref(), release_year);

    Ok(())
}

fn release_year(record: &CatalogRecord) -> String {
    record
        .release_year
        .map(|y| y.to_string())
        .unwrap_or_default()
}

fn log_extremal(
    label: &str,
    record: Option<&CatalogRecord>,
    detail: impl Fn(&CatalogRecord) -> String,
) {
    match record {
        Some(r) => log::info!(
            "  {:<16}{} {} ({})",
            label,
            r.set_number,
            r.title,
            detail(r)
        ),
        None => log::info!("  {:<16}-", label),
    }
}
