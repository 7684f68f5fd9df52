//! Debounce CLI - debounce command

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

mod cmd;
mod util;

/// Debounce - collapse bursts of input events into one settled call
#[derive(Parser)]
#[command(name = "debounce")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (TOML with a [debounce] table)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Quiet period in milliseconds, overrides the config file (0 disables debouncing)
    #[arg(long, global = true)]
    delay: Option<u64>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Treat each stdin line as an input event and print the settled values
    Watch,
    /// Replay a timed call script and report which calls executed
    Replay {
        /// Script file (TOML list of [[call]] entries)
        script: PathBuf,
        /// Print one JSON object per execution
        #[arg(long)]
        json: bool,
    },
    /// Show the effective configuration
    Config {
        /// Print an example config file instead
        #[arg(long)]
        example: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Held until exit so buffered file logs get flushed
    let _log_guard = util::init_logging(cli.verbose, cli.log_file.as_deref())?;

    let config = util::load_config(cli.config.as_deref(), cli.delay)?;

    match cli.command {
        Commands::Watch => cmd::watch::run(&config).await,
        Commands::Replay { script, json } => cmd::replay::run(&script, json, &config).await,
        Commands::Config { example } => {
            if example {
                cmd::config::run_example()
            } else {
                cmd::config::run_show(&config, cli.config.as_deref())
            }
        }
    }
}
