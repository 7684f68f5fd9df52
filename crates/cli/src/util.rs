//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use debounce_core::DebounceConfig;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the tracing subscriber
///
/// Logs go to stderr so stdout stays clean for command output. `RUST_LOG`
/// takes precedence over `-v`. The returned guard must be kept alive while
/// logging to a file.
pub fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(guard)
}

/// Resolve the effective configuration
///
/// Precedence: `--delay` > config file > defaults.
pub fn load_config(path: Option<&Path>, delay_override: Option<u64>) -> Result<DebounceConfig> {
    let mut config = match path {
        Some(path) => DebounceConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => DebounceConfig::default(),
    };

    if let Some(delay_ms) = delay_override {
        config.delay_ms = delay_ms;
        config.validate().context("Invalid --delay value")?;
    }

    tracing::debug!("Effective config: delay_ms={}", config.delay_ms);
    Ok(config)
}

/// Milliseconds as a human-readable duration ("250ms", "1.5s")
pub fn format_delay(delay_ms: u64) -> String {
    if delay_ms == 0 {
        "disabled".to_string()
    } else if delay_ms < 1000 {
        format!("{}ms", delay_ms)
    } else if delay_ms % 1000 == 0 {
        format!("{}s", delay_ms / 1000)
    } else {
        format!("{:.1}s", delay_ms as f64 / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_delay() {
        assert_eq!(format_delay(0), "disabled");
        assert_eq!(format_delay(100), "100ms");
        assert_eq!(format_delay(2000), "2s");
        assert_eq!(format_delay(1500), "1.5s");
    }

    #[test]
    fn test_load_config_defaults() -> Result<()> {
        let config = load_config(None, None)?;
        assert_eq!(config, DebounceConfig::default());
        Ok(())
    }

    #[test]
    fn test_delay_override_beats_file() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("debounce.toml");
        std::fs::write(&path, "[debounce]\ndelay_ms = 300\n")?;

        assert_eq!(load_config(Some(&path), None)?.delay_ms, 300);
        assert_eq!(load_config(Some(&path), Some(0))?.delay_ms, 0);
        Ok(())
    }

    #[test]
    fn test_delay_override_validated() {
        assert!(load_config(None, Some(u64::MAX)).is_err());
    }
}
