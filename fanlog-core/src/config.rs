use std::sync::LazyLock;

use derive_from_env::FromEnv;

/// Tunables read from `FANLOG_*` environment variables.
#[derive(FromEnv)]
#[from_env(prefix = "FANLOG")]
#[allow(non_snake_case)]
struct FanlogEnv {
    #[from_env(default = "200")]
    MAX_MESSAGE_LENGTH: usize,
    #[from_env(default = "10")]
    MAX_FILE_SINKS: usize,
    #[from_env(default = "10")]
    MAX_CALLBACK_SINKS: usize,
}

/// Process defaults, resolved once on first use.
///
/// Resolution is all-or-nothing: if any `FANLOG_*` value fails to parse, every
/// tunable keeps its built-in default.
pub static FANLOG_CONFIG: LazyLock<FanlogConfig> =
    LazyLock::new(|| FanlogConfig::from_env_or_default(FanlogEnv::from_env()));

impl FanlogEnv {
    fn into_config(self) -> FanlogConfig {
        FanlogConfig {
            max_message_length: self.MAX_MESSAGE_LENGTH,
            max_file_sinks: self.MAX_FILE_SINKS,
            max_callback_sinks: self.MAX_CALLBACK_SINKS,
            color_mode: ColorMode::Auto,
        }
    }
}

/// When the terminal writer may emit color escape sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Color only when stdout is an interactive terminal and `NO_COLOR` is unset.
    #[default]
    Auto,
    Always,
    Never,
}

/// Limits fixed for the lifetime of a logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanlogConfig {
    /// Rendered message bound, terminator included. At most
    /// `max_message_length - 1` bytes of text are delivered.
    pub max_message_length: usize,
    pub max_file_sinks: usize,
    pub max_callback_sinks: usize,
    pub color_mode: ColorMode,
}

impl FanlogConfig {
    pub const DEFAULT_MAX_MESSAGE_LENGTH: usize = 200;
    pub const DEFAULT_MAX_FILE_SINKS: usize = 10;
    pub const DEFAULT_MAX_CALLBACK_SINKS: usize = 10;

    /// Usable text bytes per message.
    pub fn message_capacity(&self) -> usize {
        self.max_message_length.saturating_sub(1)
    }

    fn from_env_or_default<E>(env: Result<FanlogEnv, E>) -> Self {
        env.map(FanlogEnv::into_config).unwrap_or_default()
    }
}

impl Default for FanlogConfig {
    fn default() -> Self {
        Self {
            max_message_length: Self::DEFAULT_MAX_MESSAGE_LENGTH,
            max_file_sinks: Self::DEFAULT_MAX_FILE_SINKS,
            max_callback_sinks: Self::DEFAULT_MAX_CALLBACK_SINKS,
            color_mode: ColorMode::Auto,
        }
    }
}

#[test]
fn test_default_config() {
    let config = FanlogConfig::default();
    assert_eq!(config.max_message_length, 200);
    assert_eq!(config.max_file_sinks, 10);
    assert_eq!(config.max_callback_sinks, 10);
    assert_eq!(config.message_capacity(), 199);
    assert_eq!(config.color_mode, ColorMode::Auto);
}

#[test]
fn test_message_capacity_never_underflows() {
    let config = FanlogConfig {
        max_message_length: 0,
        ..FanlogConfig::default()
    };
    assert_eq!(config.message_capacity(), 0);
}

#[test]
fn test_env_values_map_onto_config() {
    let env = FanlogEnv {
        MAX_MESSAGE_LENGTH: 64,
        MAX_FILE_SINKS: 3,
        MAX_CALLBACK_SINKS: 7,
    };
    let config = FanlogConfig::from_env_or_default::<()>(Ok(env));
    assert_eq!(config.max_message_length, 64);
    assert_eq!(config.max_file_sinks, 3);
    assert_eq!(config.max_callback_sinks, 7);
    assert_eq!(config.color_mode, ColorMode::Auto);
}

#[test]
fn test_env_error_falls_back_to_defaults() {
    let config = FanlogConfig::from_env_or_default(Err("invalid digit"));
    assert_eq!(config, FanlogConfig::default());
}
