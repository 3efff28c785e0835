use brickshelf_lib::Settings;
use brickshelf_lib::settings::{load_settings_string, settings_path};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

/// Show resolved settings and the raw settings file.
pub(crate) fn run_settings_show(settings: &Settings) -> Result<(), CliError> {
    log::info!("{}", "Settings".if_supports_color(Stdout, |t| t.bold()));
    log::info!("  Database:      {}", settings.database_path.display());
    log::info!("  Image dir:     {}", settings.image_dir.display());
    log::info!(
        "  Busy timeout:  {} ms",
        settings.busy_timeout.as_millis()
    );
    crate::log_blank();

    let path = settings_path();
    match load_settings_string() {
        Some(contents) => {
            log::info!(
                "{}",
                format!("{}:", path.display()).if_supports_color(Stdout, |t| t.bold()),
            );
            for line in contents.lines() {
                log::info!("  {}", line);
            }
        }
        None => log::info!("No settings file at {}", path.display()),
    }
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_settings_path() -> Result<(), CliError> {
    println!("{}", settings_path().display());
    Ok(())
}
