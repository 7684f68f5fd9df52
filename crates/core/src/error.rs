//! Error types for invoker construction and configuration

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building an invoker
///
/// Calling a debounced function never fails; errors only surface when an
/// invoker or timer is constructed through the fallible constructors.
#[derive(Debug, Error)]
pub enum DebounceError {
    /// No tokio runtime is available to run deferred invocations
    #[error("no tokio runtime available to schedule deferred invocations")]
    NoRuntime,
}

/// Errors raised while loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML or has the wrong shape
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be rendered back to TOML
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Delay outside the accepted range
    #[error("delay_ms {value} is out of range (valid: 0-{max})")]
    InvalidDelay { value: u64, max: u64 },
}

/// Result type for invoker construction
pub type Result<T> = std::result::Result<T, DebounceError>;
