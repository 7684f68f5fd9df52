//! Configuration display command

use crate::util;
use anyhow::Result;
use debounce_core::{example_config, DebounceConfig, MAX_DELAY_MS};
use owo_colors::OwoColorize;
use std::path::Path;

/// Show the effective configuration
pub fn run_show(config: &DebounceConfig, source: Option<&Path>) -> Result<()> {
    println!("{}", "Debounce Configuration".bold());
    match source {
        Some(path) => println!("{}: {}\n", "Location".dimmed(), path.display().dimmed()),
        None => println!("{}\n", "(built-in defaults)".dimmed()),
    }

    println!("{}", "[debounce]".yellow());
    println!(
        "  {} = {} {}",
        "delay_ms".cyan(),
        config.delay_ms,
        format!("({})", util::format_delay(config.delay_ms)).dimmed()
    );

    println!("\n{}", "Valid Ranges:".bold());
    println!("  delay_ms: 0-{} (0 = debouncing disabled)", MAX_DELAY_MS);

    Ok(())
}

/// Show example configuration
pub fn run_example() -> Result<()> {
    println!("{}", example_config());
    Ok(())
}
