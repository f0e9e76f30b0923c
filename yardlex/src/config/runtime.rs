// RUNTIME PREFERENCES (User Experience)

use crate::config::compile_time::source::MAX_CONFIG_FILE_SIZE;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Read a boolean preference from the environment
fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerPreferences {
    /// Whether to enforce the compile-time line/token/size limits
    pub enforce_limits: bool,

    /// Whether to log every emitted token at debug level
    pub log_token_events: bool,

    /// Whether to keep recognized tokens as look-behind context for rules.
    /// Rule sets that never inspect context can turn this off to save memory.
    pub track_context: bool,
}

impl Default for TokenizerPreferences {
    fn default() -> Self {
        Self {
            enforce_limits: env_flag(env_vars::TOKENIZER_ENFORCE_LIMITS, true),
            log_token_events: env_flag(env_vars::TOKENIZER_LOG_TOKENS, false),
            track_context: env_flag(env_vars::TOKENIZER_TRACK_CONTEXT, true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReducerPreferences {
    /// Whether to log each postfix emission at debug level
    pub log_reductions: bool,

    /// Whether to enforce the compile-time stack depth limit
    pub enforce_stack_limit: bool,
}

impl Default for ReducerPreferences {
    fn default() -> Self {
        Self {
            log_reductions: env_flag(env_vars::REDUCER_LOG_REDUCTIONS, false),
            enforce_stack_limit: env_flag(env_vars::REDUCER_ENFORCE_STACK_LIMIT, true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output
    pub enable_console_logging: bool,

    /// Minimum level that reaches the installed logger
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_flag(env_vars::LOGGING_USE_STRUCTURED, false),
            enable_console_logging: env_flag(env_vars::LOGGING_ENABLE_CONSOLE, true),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Warning),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel for compatibility
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

/// Runtime configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum RuntimeConfigError {
    #[error("Cannot read configuration file {path}: {message}")]
    Unreadable { path: String, message: String },

    #[error("Configuration file too large: {size} bytes (max: {max_size})")]
    TooLarge { size: u64, max_size: u64 },

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub tokenizer: TokenizerPreferences,
    pub reducer: ReducerPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse a configuration document; missing sections keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self, RuntimeConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, RuntimeConfigError> {
        let unreadable = |e: std::io::Error| RuntimeConfigError::Unreadable {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        let size = std::fs::metadata(path).map_err(unreadable)?.len();
        if size > MAX_CONFIG_FILE_SIZE {
            return Err(RuntimeConfigError::TooLarge {
                size,
                max_size: MAX_CONFIG_FILE_SIZE,
            });
        }

        let text = std::fs::read_to_string(path).map_err(unreadable)?;
        Self::from_toml_str(&text)
    }

    /// Render the configuration back to TOML
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Tokenizer
    pub const TOKENIZER_ENFORCE_LIMITS: &str = "YARDLEX_TOKENIZER_ENFORCE_LIMITS";
    pub const TOKENIZER_LOG_TOKENS: &str = "YARDLEX_TOKENIZER_LOG_TOKENS";
    pub const TOKENIZER_TRACK_CONTEXT: &str = "YARDLEX_TOKENIZER_TRACK_CONTEXT";

    // Reducer
    pub const REDUCER_LOG_REDUCTIONS: &str = "YARDLEX_REDUCER_LOG_REDUCTIONS";
    pub const REDUCER_ENFORCE_STACK_LIMIT: &str = "YARDLEX_REDUCER_ENFORCE_STACK_LIMIT";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "YARDLEX_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "YARDLEX_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "YARDLEX_LOGGING_MIN_LEVEL";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("warning"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("invalid"), None);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [reducer]
            log_reductions = true

            [logging]
            min_log_level = "debug"
            "#,
        )
        .unwrap();

        assert!(config.reducer.log_reductions);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
        assert_eq!(config.tokenizer, TokenizerPreferences::default());
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        let result = RuntimeConfig::from_toml_str("[tokenizer]\nenforce_limits = \"maybe\"");
        assert!(matches!(result, Err(RuntimeConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_round_trip_through_file() {
        let mut config = RuntimeConfig::default();
        config.tokenizer.track_context = false;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", config.to_toml_string().unwrap()).unwrap();

        let loaded = RuntimeConfig::load(file.path()).unwrap();
        assert!(!loaded.tokenizer.track_context);
    }

    #[test]
    fn test_missing_file() {
        let result = RuntimeConfig::load(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(RuntimeConfigError::Unreadable { .. })));
    }
}
