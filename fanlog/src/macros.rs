//! Emission and convenience macros over the global logger.
//!
//! The leveled macros prefix the message with a tag and the call site and
//! terminate it with a newline:
//!
//! | macro          | prefix   | color     |
//! |----------------|----------|-----------|
//! | `log_fatal!`   | `[FATA]` | red       |
//! | `log_error!`   | `[ERRO]` | red       |
//! | `log_warn!`    | `[WARN]` | yellow    |
//! | `log_info!`    | `[INFO]` | default   |
//! | `log_verbose!` | `[VERB]` | default   |

use std::sync::atomic::{AtomicUsize, Ordering};

/// Logs a format string with a color through the global logger.
///
/// ```rust
/// use fanlog::{fanlog, Color};
///
/// fanlog::init();
/// fanlog!(Color::Green, "{} tests passed\n", 12);
/// fanlog::term();
/// ```
#[macro_export]
macro_rules! fanlog {
    ($color:expr, $($arg:tt)+) => {
        $crate::log($color, ::std::format_args!($($arg)+))
    };
}

/// Logs through a specific `Logger` handle.
#[macro_export]
macro_rules! log_to {
    ($logger:expr, $color:expr, $($arg:tt)+) => {
        $logger.log($color, ::std::format_args!($($arg)+))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_tagged {
    ($color:expr, $tag:literal, $($arg:tt)+) => {
        $crate::log(
            $color,
            ::std::format_args!(
                "[{}]({}:{}) {}\n",
                $tag,
                ::std::file!(),
                ::std::line!(),
                ::std::format_args!($($arg)+)
            ),
        )
    };
}

/// Logs a `[FATA]` message, terminates the global logger and exits with status 1.
#[macro_export]
macro_rules! log_fatal {
    ($($arg:tt)+) => {{
        $crate::__log_tagged!($crate::Color::Red, "FATA", $($arg)+);
        $crate::term();
        ::std::process::exit(1)
    }};
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)+) => {
        $crate::__log_tagged!($crate::Color::Red, "ERRO", $($arg)+)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)+) => {
        $crate::__log_tagged!($crate::Color::Yellow, "WARN", $($arg)+)
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)+) => {
        $crate::__log_tagged!($crate::Color::Default, "INFO", $($arg)+)
    };
}

#[macro_export]
macro_rules! log_verbose {
    ($($arg:tt)+) => {
        $crate::__log_tagged!($crate::Color::Default, "VERB", $($arg)+)
    };
}

/// Evaluates the expression the first time this call site is reached only.
#[macro_export]
macro_rules! log_once {
    ($expr:expr) => {{
        static ONCE: ::std::sync::Once = ::std::sync::Once::new();
        ONCE.call_once(|| {
            $expr;
        });
    }};
}

/// Evaluates the expression on every `count`-th pass through this call site.
#[macro_export]
macro_rules! log_every {
    ($count:expr, $expr:expr) => {{
        static COUNTER: ::std::sync::atomic::AtomicUsize = ::std::sync::atomic::AtomicUsize::new(0);
        if $crate::__private::every(&COUNTER, $count) {
            $expr;
        }
    }};
}

/// Evaluates the expression when the condition holds.
#[macro_export]
macro_rules! log_when {
    ($cond:expr, $expr:expr) => {
        if $cond {
            $expr;
        }
    };
}

/// Advances a call-site counter; true on the pass that reaches `count`, which
/// also resets it. A `count` of 0 or 1 fires every time.
pub fn every(counter: &AtomicUsize, count: usize) -> bool {
    let previous = counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
            Some(if n + 1 >= count { 0 } else { n + 1 })
        })
        .unwrap_or_default();
    previous + 1 >= count
}
