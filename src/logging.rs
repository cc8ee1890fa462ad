//! Stderr logger for the `log` facade.
//!
//! Lines are written as `info string <message>` so diagnostics never mix
//! with the prediction output on stdout.

use log::{Level, LevelFilter, Log, Metadata, Record};

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        match record.level() {
            Level::Error => eprintln!("info string error: {}", record.args()),
            Level::Warn => eprintln!("info string warn: {}", record.args()),
            _ => eprintln!("info string {}", record.args()),
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Installs the stderr logger at `level`. Later calls only change the level.
pub fn init(level: LevelFilter) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_sets_max_level() {
        init(LevelFilter::Debug);
        assert_eq!(log::max_level(), LevelFilter::Debug);
        init(LevelFilter::Warn);
        assert_eq!(log::max_level(), LevelFilter::Warn);
        assert!(!LOGGER.enabled(&Metadata::builder().level(Level::Info).build()));
    }
}
