//! # riskcalc
//!
//! Command-line front end for the trade risk calculator.
//!
//! Loads a JSON configuration file, sizes every configured instrument
//! independently and prints one report block per instrument to stdout.
//!
//! # Usage
//!
//! ```bash
//! riskcalc demos/three_tickers.json --log-level info
//! riskcalc demos/three_tickers.json --symbol TSLA
//! ```

mod evaluate;
mod report;

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use riskcalc_core::quote::StaticQuotes;
use tracing::{error, info};

/// Trade risk sizing and scale-in calculator.
#[derive(Parser)]
#[command(name = "riskcalc", about = "Trade risk sizing and scale-in calculator")]
struct Cli {
    /// Configuration file path (JSON).
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Log directory for file output; overrides `log_path` in the config.
    #[arg(long)]
    log_dir: Option<String>,

    /// Only evaluate this symbol.
    #[arg(short, long)]
    symbol: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load configuration; its meta block names the log file prefix and directory
    let config = riskcalc_core::config::load_config(&cli.config)?;

    // 2. Initialize logging
    let log_dir = config.effective_log_dir(cli.log_dir.as_deref());
    riskcalc_core::logging::init_logging(&cli.log_level, log_dir.as_deref(), &config.module_name());

    info!("{} starting, config={}, log_level={}", config.module_name(), cli.config.display(), cli.log_level);
    let quotes = StaticQuotes::from(&config.quotes);
    info!("config loaded, {} instrument(s), {} quote(s)", config.instruments.len(), quotes.len());

    let wanted = cli.symbol.as_deref().map(|s| s.trim().to_uppercase());
    let selected: Vec<_> = config
        .instruments
        .iter()
        .filter(|inst| wanted.as_ref().is_none_or(|w| inst.normalized_symbol() == *w))
        .collect();
    if selected.is_empty() {
        bail!("no configured instrument matches {}", wanted.unwrap_or_default());
    }

    // 3. Evaluate each instrument; a failure only skips that instrument
    let mut failed = 0usize;
    for (idx, inst) in selected.iter().enumerate() {
        match evaluate::evaluate_instrument(inst, &config.sizer, &quotes) {
            Ok(report) => {
                info!(
                    "instrument[{idx}]: {} sized, max_quantity={}, levels={}",
                    report.symbol,
                    report.sizing.max_quantity,
                    report.position.len()
                );
                println!("{report}");
            }
            Err(e) => {
                failed += 1;
                error!("instrument[{idx}]: failed to size '{}': {e}", inst.normalized_symbol());
            }
        }
    }

    info!("done: {} sized, {} failed", selected.len() - failed, failed);
    Ok(())
}
