use std::{
    fmt,
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use fanlog_core::{
    Callback, Color, ColorMode, FanlogConfig, LogConsole, LogFile, LogWriter, SinkError,
    SinkRegistry, render_bounded, stdout_renderer,
};

/// A fan-out logger: every message goes to the console, every open log file
/// and every registered callback, in that order.
///
/// All operations lock one mutex for their whole duration, so messages from
/// concurrent callers never interleave. Callbacks run under that lock and must
/// not log through the same logger.
pub struct Logger {
    config: FanlogConfig,
    state: Mutex<LoggerState>,
}

struct LoggerState {
    console: Option<LogConsole>,
    /// Set when the console is the process stdout, so `init` can re-detect it.
    stdout_mode: Option<ColorMode>,
    registry: SinkRegistry,
}

impl Logger {
    /// Creates a logger with the process defaults, writing to stdout.
    pub fn new() -> Self {
        crate::logger_config().build()
    }

    pub(crate) fn from_parts(
        config: FanlogConfig,
        console: Option<LogConsole>,
        stdout_mode: Option<ColorMode>,
    ) -> Self {
        Self {
            config,
            state: Mutex::new(LoggerState {
                console,
                stdout_mode,
                registry: SinkRegistry::new(config.max_file_sinks, config.max_callback_sinks),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, LoggerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn config(&self) -> &FanlogConfig {
        &self.config
    }

    /// Empties both sink tables and re-detects whether stdout is a terminal.
    /// Open files are closed, not leaked.
    pub fn init(&self) {
        let mut state = self.state();
        state.registry.clear();
        if let Some(mode) = state.stdout_mode {
            state.console = Some(LogConsole::stdout(stdout_renderer(mode)));
        }
    }

    /// Closes every log file and drops every callback. Safe to call repeatedly.
    pub fn term(&self) {
        let mut state = self.state();
        state.registry.clear();
        if let Some(console) = state.console.as_mut() {
            console.flush();
        }
    }

    pub fn add_file<P: AsRef<Path>>(&self, path: P, append: bool) -> Result<(), SinkError> {
        self.state().registry.add_file(path, append)
    }

    /// Stores a file opened by the builder. Overflow is reported on stderr.
    pub(crate) fn attach_file(&self, file: LogFile) {
        self.state().registry.attach_file(file).ok();
    }

    pub fn add_callback<T: Send + Sync + 'static>(
        &self,
        func: Callback<T>,
        user_data: Arc<T>,
    ) -> Result<(), SinkError> {
        self.state().registry.add_callback(func, user_data)
    }

    pub fn remove_callback<T>(
        &self,
        func: Callback<T>,
        user_data: &Arc<T>,
    ) -> Result<(), SinkError> {
        self.state().registry.remove_callback(func, user_data)
    }

    pub fn file_sink_count(&self) -> usize {
        self.state().registry.file_count()
    }

    pub fn callback_sink_count(&self) -> usize {
        self.state().registry.callback_count()
    }

    /// Renders `args` once, truncating it to the message bound, and fans it out.
    pub fn log(&self, color: Color, args: fmt::Arguments<'_>) {
        let message = render_bounded(args, self.config.max_message_length);
        let mut state = self.state();
        let LoggerState {
            console, registry, ..
        } = &mut *state;
        if let Some(console) = console {
            console.regular(color, &message);
        }
        registry.dispatch(color, &message);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.term();
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("Logger")
            .field("config", &self.config)
            .field("file_sinks", &state.registry.file_count())
            .field("callback_sinks", &state.registry.callback_count())
            .finish()
    }
}
