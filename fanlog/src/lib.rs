//! # fanlog
//! Embeddable fan-out logger: each message is formatted once and written to
//! the terminal (colored when it is one), to every open log file and to every
//! registered callback.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! fanlog = "0.1.0"
//! ```
//!
//! ```rust
//! use fanlog::{fanlog, logger_config, Color};
//!
//! let _guard = logger_config().init_global();
//! fanlog!(Color::Green, "hello {}\n", 5);
//! fanlog::log_warn!("disk at {}%", 93);
//! // guard terminates the logger when dropped
//! ```
//!
//! ## Logging to files
//! Files are opened in append or truncate mode and receive the plain,
//! uncolored message bytes with no added framing.
//!
//! ```rust
//! use fanlog::{fanlog, Color};
//!
//! let path = std::env::temp_dir().join("fanlog_doc.log");
//! fanlog::init();
//! fanlog::add_file(&path, false).expect("Unable to open log file");
//! fanlog!(Color::Default, "hello {}\n", 5);
//! fanlog::term();
//! assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello 5\n");
//! ```
//!
//! ## Callbacks
//! A callback is a function plus a shared context. The pair identifies the
//! registration, so the same pair is needed to remove it.
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use fanlog::{Color, log_to};
//!
//! fn collect(color: Color, message: &str, lines: &Mutex<Vec<String>>) {
//!     lines.lock().unwrap().push(format!("{color:?}: {message}"));
//! }
//!
//! let logger = fanlog::logger_config().no_stdout().build();
//! let lines = Arc::new(Mutex::new(Vec::new()));
//! logger.add_callback(collect, lines.clone()).unwrap();
//! log_to!(logger, Color::Red, "x");
//! logger.remove_callback(collect, &lines).unwrap();
//! log_to!(logger, Color::Red, "y");
//! assert_eq!(*lines.lock().unwrap(), ["Red: x"]);
//! ```

mod bridge;
mod global;
mod logger;
mod macros;

pub use bridge::{install_log_bridge, level_style};
pub use fanlog_core::{
    AnsiRenderer, Callback, Color, ColorMode, ColorRenderer, FANLOG_CONFIG, FanlogConfig,
    PlainRenderer, SinkError, SinkKind,
};
pub use global::{
    LoggerGuard, add_callback, add_file, init, is_initialized, log, remove_callback, term,
    with_global,
};
pub use logger::Logger;

use fanlog_core::{LogConsole, LogFile, stdout_renderer};
use std::{io::Write, path::Path};

#[doc(hidden)]
pub mod __private {
    pub use crate::macros::every;
}

/// Builder for configuring and initializing the logger.
pub struct ConfigBuilder {
    config: FanlogConfig,
    console: Option<LogConsole>,
    no_stdout: bool,
    log_files: Vec<LogFile>,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            config: *FANLOG_CONFIG,
            console: None,
            no_stdout: false,
            log_files: Vec::new(),
        }
    }
}

impl ConfigBuilder {
    /// Builds a standalone logger handle.
    pub fn build(self) -> Logger {
        let Self {
            config,
            console,
            no_stdout,
            log_files,
        } = self;
        let (console, stdout_mode) = match console {
            _ if no_stdout => (None, None),
            Some(console) => (Some(console), None),
            None => (
                Some(LogConsole::stdout(stdout_renderer(config.color_mode))),
                Some(config.color_mode),
            ),
        };
        let logger = Logger::from_parts(config, console, stdout_mode);
        for file in log_files {
            logger.attach_file(file);
        }
        logger
    }

    /// Sets the message bound, terminator included.
    pub fn with_max_message_length(mut self, length: usize) -> Self {
        self.config.max_message_length = length;
        self
    }
    /// Sets the file sink capacity. Never drops a file the builder already
    /// opened: the capacity is raised to the number of those files if needed.
    pub fn with_max_file_sinks(mut self, capacity: usize) -> Self {
        self.config.max_file_sinks = capacity.max(self.log_files.len());
        self
    }
    /// Sets the callback sink capacity.
    pub fn with_max_callback_sinks(mut self, capacity: usize) -> Self {
        self.config.max_callback_sinks = capacity;
        self
    }
    /// Sets when stdout output may be colored.
    pub fn with_color_mode(mut self, mode: ColorMode) -> Self {
        self.config.color_mode = mode;
        self
    }
    /// Opens a log file right away, appending or truncating.
    pub fn with_log_file<P: AsRef<Path>>(
        mut self,
        path: P,
        append: bool,
    ) -> Result<Self, SinkError> {
        if self.log_files.len() >= self.config.max_file_sinks {
            return Err(SinkError::CapacityExceeded {
                kind: SinkKind::File,
                capacity: self.config.max_file_sinks,
            }
            .report());
        }
        self.log_files
            .push(LogFile::open(path, append).map_err(SinkError::report)?);
        Ok(self)
    }
    /// Maybe opens a log file.
    pub fn maybe_with_log_file<P: AsRef<Path>>(
        self,
        path: Option<P>,
        append: bool,
    ) -> Result<Self, SinkError> {
        match path {
            Some(path) => self.with_log_file(path, append),
            None => Ok(self),
        }
    }
    /// Ignore console output
    pub fn no_stdout(self) -> Self {
        Self {
            no_stdout: true,
            ..self
        }
    }
    /// Dynamically set the console flag.
    pub fn with_stdout(self, yes: bool) -> Self {
        Self {
            no_stdout: !yes,
            ..self
        }
    }
    /// Writes console output to `out` through `renderer` instead of stdout.
    pub fn with_console<W, R>(self, out: W, renderer: R) -> Self
    where
        W: Write + Send + 'static,
        R: ColorRenderer + 'static,
    {
        Self {
            console: Some(LogConsole::new(Box::new(out), Box::new(renderer))),
            ..self
        }
    }
    /// Installs the logger as the global one, replacing any previous logger.
    /// Returns a guard that will terminate the logger when dropped.
    #[must_use = "LoggerGuard must be kept alive to ensure logging works. Do \"let _guard = logger_config().init_global();\""]
    pub fn init_global(self) -> LoggerGuard {
        global::install(self.build());
        LoggerGuard::new()
    }
}

/// Returns a default ConfigBuilder for configuring the logger.
pub fn logger_config() -> ConfigBuilder {
    ConfigBuilder::default()
}
