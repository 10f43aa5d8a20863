use std::{
    fmt,
    path::Path,
    sync::{Arc, PoisonError, RwLock},
};

use fanlog_core::{Callback, Color, SinkError};

use crate::Logger;

/// Process-wide logger behind the free functions and macros.
static GLOBAL_LOGGER: RwLock<Option<Logger>> = RwLock::new(None);

/// Guard that terminates the global logger when dropped.
/// Hold this guard for the lifetime of your logging session.
pub struct LoggerGuard {
    _private: (),
}

impl LoggerGuard {
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }
}

impl Drop for LoggerGuard {
    fn drop(&mut self) {
        term();
    }
}

pub(crate) fn install(logger: Logger) {
    let previous = GLOBAL_LOGGER
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .replace(logger);
    // Dropped outside the lock: closing files may take a while.
    drop(previous);
}

/// Installs a fresh global logger with the process defaults.
///
/// Calling it again replaces the previous logger, closing its files and
/// dropping its callbacks.
pub fn init() {
    install(Logger::new());
}

/// Closes every global log file and drops every global callback.
/// Does nothing if the logger is not initialized.
pub fn term() {
    let previous = GLOBAL_LOGGER
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .take();
    if let Some(logger) = previous {
        logger.term();
    }
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .is_some()
}

/// Runs `f` against the global logger, if one is installed.
pub fn with_global<R>(f: impl FnOnce(&Logger) -> R) -> Option<R> {
    GLOBAL_LOGGER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .map(f)
}

pub fn add_file<P: AsRef<Path>>(path: P, append: bool) -> Result<(), SinkError> {
    with_global(|logger| logger.add_file(path, append)).unwrap_or(Err(SinkError::NotInitialized))
}

pub fn add_callback<T: Send + Sync + 'static>(
    func: Callback<T>,
    user_data: Arc<T>,
) -> Result<(), SinkError> {
    with_global(|logger| logger.add_callback(func, user_data))
        .unwrap_or(Err(SinkError::NotInitialized))
}

pub fn remove_callback<T>(func: Callback<T>, user_data: &Arc<T>) -> Result<(), SinkError> {
    with_global(|logger| logger.remove_callback(func, user_data))
        .unwrap_or(Err(SinkError::NotInitialized))
}

/// Logs through the global logger. Dropped silently outside an init/term session.
pub fn log(color: Color, args: fmt::Arguments<'_>) {
    with_global(|logger| logger.log(color, args));
}
