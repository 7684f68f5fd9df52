//! Debounced invocation
//!
//! This crate provides:
//! - `Debounced`: wraps a function so bursts of calls collapse into one
//!   trailing-edge call after a quiet period
//! - `Timer`: the tokio-backed schedule/cancel facility it runs on
//! - `DebounceConfig`: TOML configuration for the quiet period

pub mod config;
pub mod error;
pub mod invoker;
pub mod timer;

// Re-exports
pub use config::{example_config, DebounceConfig, MAX_DELAY_MS};
pub use error::{ConfigError, DebounceError, Result};
pub use invoker::{debounce, debounce_default, Debounced, DEFAULT_DELAY};
pub use timer::{Timer, TimerHandle};
