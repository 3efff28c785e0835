use std::path::Path;

use brickshelf_lib::{Collection, DiskImageStore};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::resolve_record;

pub(crate) fn run_image_attach(
    collection: &Collection<DiskImageStore>,
    key: &str,
    file: &Path,
) -> Result<(), CliError> {
    let record = resolve_record(collection, key)?;
    let bytes = std::fs::read(file)
        .map_err(|e| CliError::other(format!("Cannot read {}: {}", file.display(), e)))?;
    let original_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let stored = collection.attach_image(&record.id, &bytes, &original_name)?;
    log::info!(
        "{} Attached image to {}: {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        record.set_number,
        stored,
    );
    Ok(())
}

pub(crate) fn run_image_path(
    collection: &Collection<DiskImageStore>,
    key: &str,
) -> Result<(), CliError> {
    let record = resolve_record(collection, key)?;
    let path = record
        .image_filename
        .as_deref()
        .and_then(|name| collection.images().image_path(name));

    match path {
        Some(path) => println!("{}", path.display()),
        None => log::warn!("{} has no image", record.set_number),
    }
    Ok(())
}
