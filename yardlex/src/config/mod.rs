//! Configuration module for yardlex
//!
//! Limits that bound resource use are compile-time constants; everything a
//! user may reasonably want to tune lives in runtime preferences that come
//! from the environment or a TOML file.

pub mod constants;
pub mod runtime;

pub use constants::compile_time;
pub use runtime::{
    LogLevel, LoggingPreferences, ReducerPreferences, RuntimeConfig, RuntimeConfigError,
    TokenizerPreferences,
};

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("YARDLEX_BUILD_PROFILE").unwrap_or("development")
    }

    /// Package version the library was built as
    pub fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("yardlex {} ({} profile)", version(), profile())
    }
}
