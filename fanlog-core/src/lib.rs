//! # fanlog-core
//! Core building blocks for fanlog: colors and their terminal rendering, the
//! fixed-capacity sink registry and bounded message rendering.

mod color;
mod config;
mod error;
mod log_writer;
mod registry;
mod render;

pub use color::{AnsiRenderer, Color, ColorRenderer, PlainRenderer, stdout_renderer, use_color};
pub use config::{ColorMode, FANLOG_CONFIG, FanlogConfig};
pub use error::{SinkError, SinkKind};
pub use log_writer::{LogConsole, LogFile, LogWriter};
pub use registry::{Callback, CallbackSink, SinkRegistry};
pub use render::render_bounded;
