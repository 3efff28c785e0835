//! Import progress reporting.

/// Trait for receiving import progress updates.
pub trait ImportProgress {
    /// Called after each row is processed, with the row's set number.
    fn on_record(&self, current: usize, total: usize, set_number: &str);

    /// Called when a phase starts (e.g., "Importing 42 records").
    fn on_phase(&self, message: &str);

    /// Called when the import is complete.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_record(&self, _current: usize, _total: usize, _set_number: &str) {}
    fn on_phase(&self, _message: &str) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl ImportProgress for LogProgress {
    fn on_record(&self, current: usize, total: usize, set_number: &str) {
        if current.is_multiple_of(100) || current == total {
            log::info!("  [{}/{}] {}", current, total, set_number);
        }
    }

    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
