//! Debounce stdin lines
//!
//! Each line read from stdin is one input-change event. Events go through a
//! debounced submit function; the values that settle are printed.

use anyhow::{Context, Result};
use debounce_core::{DebounceConfig, Debounced};
use owo_colors::OwoColorize;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// How often to check for a trailing invocation after stdin closes
const PENDING_POLL: Duration = Duration::from_millis(5);

pub async fn run(config: &DebounceConfig) -> Result<()> {
    let delay = config.delay();
    info!("Watching stdin (delay: {:?})", delay);

    // 1. Settled values travel to the printer over a channel
    let (settled_tx, mut settled_rx) = mpsc::unbounded_channel::<String>();
    let submit = Debounced::try_new(
        move |line: String| {
            let _ = settled_tx.send(line);
        },
        delay,
    )?;

    let printer = tokio::spawn(async move {
        let mut settled = 0usize;
        while let Some(line) = settled_rx.recv().await {
            settled += 1;
            println!("{} {}", "→".green(), line);
        }
        settled
    });

    // 2. Feed stdin lines in as events
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut events = 0usize;

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        events += 1;
        debug!("Input event {}: {:?}", events, line);
        submit.call(line);
    }

    // 3. Stdin closed: let the last burst settle
    while submit.is_pending() {
        tokio::time::sleep(PENDING_POLL).await;
    }

    // Dropping the invoker closes the channel once any running submit returns
    drop(submit);
    let settled = printer.await.context("Printer task failed")?;

    info!("{} input events settled into {} submissions", events, settled);
    Ok(())
}
