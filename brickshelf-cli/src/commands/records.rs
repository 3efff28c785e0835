use brickshelf_catalog::types::{NewRecord, RecordPatch};
use brickshelf_lib::{Collection, ImageStore};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::{log_record_detail, resolve_record};

pub(crate) fn run_add<S: ImageStore>(
    collection: &Collection<S>,
    new: NewRecord,
) -> Result<(), CliError> {
    let record = collection.create(&new)?;
    log::info!(
        "{} Added {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        record.set_number,
    );
    log_record_detail(&record);
    Ok(())
}

pub(crate) fn run_show<S: ImageStore>(
    collection: &Collection<S>,
    key: &str,
    json: bool,
) -> Result<(), CliError> {
    let record = resolve_record(collection, key)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        log_record_detail(&record);
    }
    Ok(())
}

pub(crate) fn run_update<S: ImageStore>(
    collection: &Collection<S>,
    key: &str,
    patch: &RecordPatch,
) -> Result<(), CliError> {
    let existing = resolve_record(collection, key)?;
    if patch.is_empty() {
        log::warn!("Nothing to update; pass at least one field flag");
        return Ok(());
    }
    let record = collection.update(&existing.id, patch)?;
    log::info!(
        "{} Updated {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        record.set_number,
    );
    log_record_detail(&record);
    Ok(())
}

pub(crate) fn run_delete<S: ImageStore>(
    collection: &Collection<S>,
    key: &str,
) -> Result<(), CliError> {
    let existing = resolve_record(collection, key)?;
    collection.delete(&existing.id)?;
    log::info!(
        "{} Deleted {} {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        existing.set_number,
        existing.title,
    );
    Ok(())
}
