//! Stderr logger behind the `log` facade.
//!
//! Console reports go to stdout (or the report stream); everything logged
//! here is commentary on stderr with a styled level prefix.

use console::style;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

struct Logger {
    level: LevelFilter,
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let prefix = match record.level() {
            Level::Error => style("error: ").red().bold(),
            Level::Warn => style("warn:  ").yellow().bold(),
            Level::Info => style("info:  ").cyan().bold(),
            Level::Debug => style("debug: ").dim().bold(),
            Level::Trace => style("trace: ").dim(),
        };
        eprintln!("{}{}", prefix, record.args());
    }

    fn flush(&self) {}
}

/// Level for the `-q` / `-v` flags
pub fn level_for(quiet: bool, verbose: bool) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::Warn,
        (false, true) => LevelFilter::Debug,
        (false, false) => LevelFilter::Info,
    }
}

/// Install the logger. Fails if a logger is already set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(Logger { level }))?;
    log::set_max_level(level);
    Ok(())
}
