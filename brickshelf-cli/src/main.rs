//! brickshelf CLI
//!
//! Command-line interface for cataloging a personal collection of building
//! sets: records, search, statistics, CSV transfer, and images.

mod cli_types;
mod commands;
mod error;
mod progress;

use std::io::Write;

use clap::Parser;
use log::LevelFilter;

use brickshelf_lib::{Collection, Settings, SettingsOverrides};

use cli_types::{Cli, Commands, ImageAction, SettingsAction};
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logger(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Install the logger. `RUST_LOG` overrides the level chosen by the flags.
fn init_logger(quiet: bool, verbose: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .filter_module("rusqlite", LevelFilter::Warn)
        .target(env_logger::Target::Stdout);

    if verbose {
        builder.format_timestamp_millis().format_target(false);
    } else {
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }

    builder.parse_default_env().init();
}

/// Print an empty line through the logger so `--quiet` suppresses it.
pub(crate) fn log_blank() {
    log::info!("");
}

fn run(cli: Cli) -> Result<(), CliError> {
    let overrides = SettingsOverrides {
        database_path: cli.db,
        image_dir: cli.image_dir,
    };
    let settings = Settings::load(&overrides)?;
    let quiet = cli.quiet;

    // Settings commands must work even when the database cannot be opened
    if let Commands::Settings { action } = &cli.command {
        return match action {
            SettingsAction::Show => commands::settings::run_settings_show(&settings),
            SettingsAction::Path => commands::settings::run_settings_path(),
        };
    }

    let collection = Collection::open(&settings)?;

    match cli.command {
        Commands::Add {
            set_number,
            title,
            owned,
            fields,
        } => commands::records::run_add(&collection, fields.into_new_record(set_number, title, owned)),
        Commands::Show { record, json } => commands::records::run_show(&collection, &record, json),
        Commands::Update {
            record,
            set_number,
            title,
            owned,
            fields,
            clear,
        } => {
            let patch = fields.into_patch(set_number, title, owned, &clear);
            commands::records::run_update(&collection, &record, &patch)
        }
        Commands::Delete { record } => commands::records::run_delete(&collection, &record),
        Commands::List {
            series,
            owned,
            sort,
            order,
            json,
        } => commands::query::run_list(
            &collection,
            series.as_deref(),
            owned.as_deref(),
            sort.as_deref(),
            order.as_deref(),
            json,
        ),
        Commands::Search { term, json } => commands::query::run_search(&collection, &term, json),
        Commands::Series => commands::query::run_series(&collection),
        Commands::Stats { json } => commands::stats::run_stats(&collection, json),
        Commands::Export { output } => commands::transfer::run_export(&collection, output),
        Commands::Import { file } => commands::transfer::run_import(&collection, &file, quiet),
        Commands::Image { action } => match action {
            ImageAction::Attach { record, file } => {
                commands::image::run_image_attach(&collection, &record, &file)
            }
            ImageAction::Path { record } => commands::image::run_image_path(&collection, &record),
        },
        Commands::Settings { .. } => Ok(()),
    }
}
