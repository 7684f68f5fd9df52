//! Replay a timed call script
//!
//! Script format:
//! ```toml
//! delay_ms = 100   # optional, falls back to --delay / config
//!
//! [[call]]
//! at_ms = 0
//! arg = "1"
//! ```

use crate::util;
use anyhow::{Context, Result};
use debounce_core::{DebounceConfig, Debounced};
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info};

/// How often to check for a trailing invocation after the last call
const PENDING_POLL: Duration = Duration::from_millis(5);

/// Parsed call script
#[derive(Debug, Deserialize)]
pub struct Script {
    /// Overrides the configured delay for this script
    pub delay_ms: Option<u64>,
    #[serde(default, rename = "call")]
    pub calls: Vec<ScriptCall>,
}

/// One call to the debounced function
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptCall {
    /// Offset from replay start
    pub at_ms: u64,
    /// Argument passed to the debounced function
    pub arg: String,
}

/// One execution of the wrapped function
#[derive(Debug, Serialize)]
pub struct Execution {
    pub arg: String,
    pub elapsed_ms: u64,
}

impl Script {
    /// Parse a script, sorting calls by offset
    pub fn parse(s: &str) -> Result<Self> {
        let mut script: Script = toml::from_str(s).context("Invalid replay script")?;
        script.calls.sort_by_key(|call| call.at_ms);
        Ok(script)
    }

    /// Script delay if set, otherwise the configured one
    pub fn effective_config(&self, config: &DebounceConfig) -> Result<DebounceConfig> {
        let resolved = DebounceConfig {
            delay_ms: self.delay_ms.unwrap_or(config.delay_ms),
        };
        resolved.validate().context("Invalid delay_ms in replay script")?;
        Ok(resolved)
    }
}

pub async fn run(script_path: &Path, json: bool, config: &DebounceConfig) -> Result<()> {
    // 1. Load script
    let contents = tokio::fs::read_to_string(script_path)
        .await
        .with_context(|| format!("Failed to read script: {}", script_path.display()))?;
    let script = Script::parse(&contents)?;
    let config = script.effective_config(config)?;

    info!(
        "Replaying {} calls (delay: {})",
        script.calls.len(),
        util::format_delay(config.delay_ms)
    );

    // 2. Play the calls on schedule
    let executions = play(&script.calls, config.delay()).await?;

    // 3. Report
    if json {
        for execution in &executions {
            println!("{}", serde_json::to_string(execution)?);
        }
    } else {
        for execution in &executions {
            println!(
                "{:>6}  {} {}",
                format!("{}ms", execution.elapsed_ms).dimmed(),
                "→".green(),
                execution.arg
            );
        }
        println!(
            "{} calls, {} {}",
            script.calls.len(),
            executions.len(),
            if executions.len() == 1 { "execution" } else { "executions" }
        );
    }

    Ok(())
}

/// Issue each call at its offset and collect what actually executed
pub async fn play(calls: &[ScriptCall], delay: Duration) -> Result<Vec<Execution>> {
    let start = Instant::now();
    let (tx, mut rx) = mpsc::unbounded_channel::<Execution>();

    let debounced = Debounced::try_new(
        move |arg: String| {
            let elapsed_ms = start.elapsed().as_millis() as u64;
            let _ = tx.send(Execution { arg, elapsed_ms });
        },
        delay,
    )?;

    for call in calls {
        tokio::time::sleep_until(start + Duration::from_millis(call.at_ms)).await;
        debug!("t={}ms call({:?})", call.at_ms, call.arg);
        debounced.call(call.arg.clone());
    }

    while debounced.is_pending() {
        tokio::time::sleep(PENDING_POLL).await;
    }
    drop(debounced);

    let mut executions = Vec::new();
    while let Some(execution) = rx.recv().await {
        executions.push(execution);
    }
    Ok(executions)
}
