use chrono::Utc;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use fanlog_core::Color;

use crate::{Logger, global};

/// Forwards `log` records to the global fan-out logger.
struct FanlogBridge;

impl Log for FanlogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            global::with_global(|logger| logger.log_record(record));
        }
    }

    fn flush(&self) {}
}

/// Routes `log::error!` .. `log::trace!` into the global logger.
///
/// Fails if another `log` implementation is already installed.
pub fn install_log_bridge(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(FanlogBridge))?;
    log::set_max_level(level);
    Ok(())
}

/// Color and label used for records of `level`.
pub fn level_style(level: Level) -> (Color, &'static str) {
    match level {
        Level::Error => (Color::Red, "ERROR"),
        Level::Warn => (Color::Yellow, "WARN"),
        Level::Info => (Color::Green, "INFO"),
        Level::Debug => (Color::Blue, "DEBUG"),
        Level::Trace => (Color::Magenta, "TRACE"),
    }
}

impl Logger {
    /// Logs a `log` record as `[<time> <LEVEL>](<target>) <message>\n`.
    pub fn log_record(&self, record: &Record) {
        let time = Utc::now().format("%Y-%m-%dT%H:%M:%S%.3f");
        let (color, label) = level_style(record.level());
        self.log(
            color,
            format_args!("[{time} {label}]({}) {}\n", record.target(), record.args()),
        );
    }
}
