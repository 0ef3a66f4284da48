// RUNTIME PREFERENCES (User Experience)

use crate::expression::{ArgumentScan, FunctionSet, ParseOptions, SerializeOptions};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Errors raised while loading a runtime configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl ConfigError {
    /// Get error code for global logging system
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            Self::Io { .. } => crate::logging::codes::config::CONFIG_FILE_UNREADABLE,
            Self::Toml(_) => crate::logging::codes::config::CONFIG_PARSE_FAILURE,
            Self::InvalidValue { .. } => crate::logging::codes::config::CONFIG_INVALID_VALUE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecPreferences {
    /// Function names the parser accepts after the sentinel
    pub function_set: FunctionSet,

    /// How function arguments are delimited when decoding
    pub argument_scan: ArgumentScan,

    /// Whether the serializer emits `.default(..)` inside the expression
    pub use_new_default_format: bool,

    /// Whether debug events are logged for rejected expressions
    pub log_rejections: bool,
}

impl Default for CodecPreferences {
    fn default() -> Self {
        Self {
            function_set: env::var(env_vars::CODEC_FUNCTION_SET)
                .ok()
                .and_then(|v| FunctionSet::from_name(&v))
                .unwrap_or_default(),
            argument_scan: env::var(env_vars::CODEC_ARGUMENT_SCAN)
                .ok()
                .and_then(|v| ArgumentScan::from_name(&v))
                .unwrap_or_default(),
            use_new_default_format: env::var(env_vars::CODEC_NEW_DEFAULT_FORMAT)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_rejections: env::var(env_vars::CODEC_LOG_REJECTIONS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

impl CodecPreferences {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            functions: self.function_set,
            argument_scan: self.argument_scan,
        }
    }

    pub fn serialize_options(&self) -> SerializeOptions {
        SerializeOptions {
            use_new_default_format: self.use_new_default_format,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging (user preference)
    pub use_structured_logging: bool,

    /// Whether to enable console output (user preference)
    pub enable_console_logging: bool,

    /// User preferred minimum log level
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOGGING_ENABLE_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
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
fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub codec: CodecPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Environment defaults only, validated like a loaded file
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document; missing tables and keys fall back to env defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: RuntimeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML configuration file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Reject combinations the codec cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.codec.function_set == FunctionSet::Legacy && self.codec.use_new_default_format {
            return Err(ConfigError::InvalidValue {
                key: "codec.use_new_default_format".to_string(),
                message: "the legacy function set cannot decode .default(..)".to_string(),
            });
        }
        Ok(())
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Codec
    pub const CODEC_FUNCTION_SET: &str = "RTI_CODEC_FUNCTION_SET";
    pub const CODEC_ARGUMENT_SCAN: &str = "RTI_CODEC_ARGUMENT_SCAN";
    pub const CODEC_NEW_DEFAULT_FORMAT: &str = "RTI_CODEC_NEW_DEFAULT_FORMAT";
    pub const CODEC_LOG_REJECTIONS: &str = "RTI_CODEC_LOG_REJECTIONS";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "RTI_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "RTI_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "RTI_LOGGING_MIN_LEVEL";
}
