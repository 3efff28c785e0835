use brickshelf_catalog::query::ListQuery;
use brickshelf_catalog::types::CatalogRecord;
use brickshelf_lib::{Collection, ImageStore};

use crate::CliError;

use super::log_record_table;

pub(crate) fn run_list<S: ImageStore>(
    collection: &Collection<S>,
    series: Option<&str>,
    owned: Option<&str>,
    sort: Option<&str>,
    order: Option<&str>,
    json: bool,
) -> Result<(), CliError> {
    if let Some(field) = sort
        && brickshelf_catalog::SortField::from_str_loose(field).is_none()
    {
        log::debug!("Unknown sort field '{}', using default order", field);
    }
    let query = ListQuery::from_params(series, owned, sort, order);
    let records = collection.list(&query)?;
    print_records(&records, json)
}

pub(crate) fn run_search<S: ImageStore>(
    collection: &Collection<S>,
    term: &str,
    json: bool,
) -> Result<(), CliError> {
    let records = collection.search(term)?;
    print_records(&records, json)
}

pub(crate) fn run_series<S: ImageStore>(collection: &Collection<S>) -> Result<(), CliError> {
    let series = collection.series()?;
    if series.is_empty() {
        log::info!("No series recorded yet.");
    }
    for name in series {
        log::info!("{}", name);
    }
    Ok(())
}

fn print_records(records: &[CatalogRecord], json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }
    if records.is_empty() {
        log::info!("No matching records.");
        return Ok(());
    }
    log_record_table(records);
    crate::log_blank();
    log::info!("{} record(s)", records.len());
    Ok(())
}
