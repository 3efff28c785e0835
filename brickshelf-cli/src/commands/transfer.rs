use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use brickshelf_lib::{Collection, ImageStore};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::progress::ImportReporter;

/// Export every record as CSV to a file, or stdout when no file is given.
pub(crate) fn run_export<S: ImageStore>(
    collection: &Collection<S>,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    match output {
        Some(path) => {
            let file = File::create(&path)?;
            let count = collection.export_csv(BufWriter::new(file))?;
            log::info!("Exported {} record(s) to {}", count, path.display());
        }
        None => {
            // Log output shares stdout, so stay silent here
            let count = collection.export_csv(std::io::stdout().lock())?;
            log::debug!("Exported {} record(s) to stdout", count);
        }
    }
    Ok(())
}

/// Import records from a CSV file and report the outcome.
pub(crate) fn run_import<S: ImageStore>(
    collection: &Collection<S>,
    path: &Path,
    quiet: bool,
) -> Result<(), CliError> {
    let file = File::open(path)
        .map_err(|e| CliError::other(format!("Cannot open {}: {}", path.display(), e)))?;

    let reporter = ImportReporter::detect(quiet);
    let summary = collection.import_csv(BufReader::new(file), Some(reporter.as_progress()))?;

    crate::log_blank();
    log::info!(
        "{}",
        "Import Summary".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Imported:  {:>6}", summary.imported);
    log::info!("  Skipped:   {:>6} (already in collection)", summary.skipped);
    log::info!("  Errors:    {:>6}", summary.errors.len());

    for message in &summary.errors {
        log::warn!(
            "  {} {}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            message,
        );
    }

    Ok(())
}
