//! Invoker configuration
//!
//! Loaded from a TOML file with a single `[debounce]` table. Missing tables
//! and keys fall back to defaults.

use crate::error::ConfigError;
use crate::invoker::DEFAULT_DELAY;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Largest accepted delay (1 hour)
pub const MAX_DELAY_MS: u64 = 60 * 60 * 1000;

/// Debounce settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    /// Quiet period in milliseconds (default: 100, 0 disables debouncing)
    pub delay_ms: u64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_DELAY.as_millis() as u64,
        }
    }
}

/// On-disk layout
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    debounce: DebounceConfig,
}

impl DebounceConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(s)?;
        file.debounce.validate()?;
        Ok(file.debounce)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Render as a TOML document that [`DebounceConfig::from_toml_str`] accepts
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        let file = ConfigFile { debounce: *self };
        Ok(toml::to_string(&file)?)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delay_ms > MAX_DELAY_MS {
            return Err(ConfigError::InvalidDelay {
                value: self.delay_ms,
                max: MAX_DELAY_MS,
            });
        }
        Ok(())
    }

    /// Quiet period as a `Duration`
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Example config file with every key documented
pub fn example_config() -> &'static str {
    r#"# Debounce configuration

[debounce]
# Quiet period in milliseconds before a pending invocation fires.
# 0 disables debouncing: every call runs immediately.
# Valid range: 0-3600000
delay_ms = 100
"#
}
