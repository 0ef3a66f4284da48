//! Configuration module for the runtime input codec
//!
//! Compile-time limits live in [`constants`]; user preferences that may vary
//! per deployment live in [`runtime`] and are read from `RTI_*` environment
//! variables or a TOML file.

pub mod constants;
pub mod runtime;

pub use constants::compile_time;
pub use runtime::{CodecPreferences, ConfigError, LoggingPreferences, RuntimeConfig};

