use std::{
    borrow::Cow,
    io::{self, IsTerminal, Write},
};

use crate::config::ColorMode;

/// Presentation tag attached to every message. Carries no ordering or filtering meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

/// Terminal colors indexed by `Color` discriminant. `Default` has no entry.
const TERMINAL_COLORS: [Option<colored::Color>; 9] = [
    None,
    Some(colored::Color::Black),
    Some(colored::Color::Red),
    Some(colored::Color::Green),
    Some(colored::Color::Yellow),
    Some(colored::Color::Blue),
    Some(colored::Color::Magenta),
    Some(colored::Color::Cyan),
    Some(colored::Color::White),
];

/// SGR foreground code for the terminal's own default color.
const DEFAULT_FG_CODE: &str = "39";

impl Color {
    pub const ALL: [Color; 9] = [
        Color::Default,
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::White,
    ];

    /// ANSI SGR foreground code, e.g. `"31"` for red.
    pub fn ansi_code(self) -> Cow<'static, str> {
        match TERMINAL_COLORS[self as usize] {
            Some(color) => color.to_fg_str(),
            None => Cow::Borrowed(DEFAULT_FG_CODE),
        }
    }
}

/// Capability to write a message to an output device in a given color.
pub trait ColorRenderer: Send {
    fn render(&self, out: &mut dyn Write, color: Color, text: &str) -> io::Result<()>;

    /// Whether this renderer ever emits escape sequences.
    fn is_colored(&self) -> bool;
}

/// Wraps non-default colors in `ESC[<code>m ... ESC[0m`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnsiRenderer;

impl ColorRenderer for AnsiRenderer {
    fn render(&self, out: &mut dyn Write, color: Color, text: &str) -> io::Result<()> {
        if color == Color::Default {
            return out.write_all(text.as_bytes());
        }
        write!(out, "\x1B[{}m{text}\x1B[0m", color.ansi_code())
    }

    fn is_colored(&self) -> bool {
        true
    }
}

/// Writes the text unchanged, whatever the color.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainRenderer;

impl ColorRenderer for PlainRenderer {
    fn render(&self, out: &mut dyn Write, _color: Color, text: &str) -> io::Result<()> {
        out.write_all(text.as_bytes())
    }

    fn is_colored(&self) -> bool {
        false
    }
}

/// Picks the renderer for the process stdout.
///
/// Output that is not an interactive terminal always gets plain text, so
/// redirected logs never contain escape sequences and never go missing.
pub fn stdout_renderer(mode: ColorMode) -> Box<dyn ColorRenderer> {
    let no_color = std::env::var_os("NO_COLOR").is_some();
    let colored = use_color(mode, no_color, io::stdout().is_terminal())
        && (enable_escape_sequences() || mode == ColorMode::Always);
    if colored {
        Box::new(AnsiRenderer)
    } else {
        Box::new(PlainRenderer)
    }
}

/// Color decision for a stream, before any platform console setup.
pub fn use_color(mode: ColorMode, no_color: bool, is_terminal: bool) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => !no_color && is_terminal,
    }
}

#[cfg(windows)]
fn enable_escape_sequences() -> bool {
    colored::control::set_virtual_terminal(true).is_ok()
}

#[cfg(not(windows))]
fn enable_escape_sequences() -> bool {
    true
}
