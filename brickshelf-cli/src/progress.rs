//! Progress reporting for CSV imports.

use std::io::IsTerminal;

use brickshelf_import::{ImportProgress, LogProgress};
use indicatif::{ProgressBar, ProgressStyle};

/// Draws a single progress bar on stderr.
pub(crate) struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub(crate) fn new() -> Self {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template("  {bar:30.cyan/blue} {pos:>5}/{len:5} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(style);
        Self { bar }
    }
}

impl ImportProgress for BarProgress {
    fn on_record(&self, current: usize, total: usize, set_number: &str) {
        self.bar.set_length(total as u64);
        self.bar.set_position(current as u64);
        self.bar.set_message(set_number.to_string());
    }

    fn on_phase(&self, message: &str) {
        self.bar.suspend(|| log::info!("{}", message));
    }

    fn on_complete(&self, message: &str) {
        self.bar.finish_and_clear();
        log::info!("{}", message);
    }
}

/// The reporter an import runs with.
///
/// A live bar only makes sense on an interactive terminal. Piped output and
/// `--quiet` runs get periodic log lines instead, which the logger level
/// then filters.
pub(crate) enum ImportReporter {
    Bar(BarProgress),
    Log(LogProgress),
}

impl ImportReporter {
    pub(crate) fn detect(quiet: bool) -> Self {
        Self::choose(quiet, std::io::stderr().is_terminal())
    }

    fn choose(quiet: bool, interactive: bool) -> Self {
        if interactive && !quiet {
            Self::Bar(BarProgress::new())
        } else {
            Self::Log(LogProgress)
        }
    }

    pub(crate) fn as_progress(&self) -> &dyn ImportProgress {
        match self {
            Self::Bar(bar) => bar as &dyn ImportProgress,
            Self::Log(log) => log as &dyn ImportProgress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_only_on_interactive_terminal() {
        assert!(matches!(ImportReporter::choose(false, true), ImportReporter::Bar(_)));
        assert!(matches!(ImportReporter::choose(false, false), ImportReporter::Log(_)));
    }

    #[test]
    fn quiet_uses_log_lines() {
        assert!(matches!(ImportReporter::choose(true, true), ImportReporter::Log(_)));
        assert!(matches!(ImportReporter::choose(true, false), ImportReporter::Log(_)));
    }

    #[test]
    fn log_reporter_accepts_updates() {
        let reporter = ImportReporter::choose(true, false);
        let progress = reporter.as_progress();
        progress.on_phase("Importing 2 records");
        progress.on_record(1, 2, "75192");
        progress.on_record(2, 2, "10294");
        progress.on_complete("Done");
    }
}
