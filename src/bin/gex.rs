//! GEX CLI
//!
//! Loads the latest raw options-chain snapshot for a symbol, computes the
//! gamma exposure profile and key levels, prints a summary and writes the
//! processed snapshot.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

use gex_levels::prelude::*;

/// Command-line arguments for the GEX processor.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Underlying symbol to process.
    #[arg(short, long, env = "TARGET_SYMBOL", default_value = "QQQ")]
    symbol: String,

    /// Explicit raw snapshot file (skips latest-file discovery).
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory holding raw snapshots.
    #[arg(long)]
    raw_dir: Option<PathBuf>,

    /// Directory receiving processed snapshots.
    #[arg(long)]
    processed_dir: Option<PathBuf>,

    /// Print the summary without writing the processed snapshot.
    #[arg(long)]
    no_save: bool,
}

impl Cli {
    /// Layer CLI overrides on top of the default store configuration
    fn store_config(&self) -> StoreConfig {
        let defaults = StoreConfig::default();
        StoreConfig {
            raw_dir: self.raw_dir.clone().unwrap_or(defaults.raw_dir),
            processed_dir: self.processed_dir.clone().unwrap_or(defaults.processed_dir),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let store = SnapshotStore::new(cli.store_config());

    println!("=== GEX Processor ===");
    println!("Symbol: {}", cli.symbol);
    println!("Date/Time: {}\n", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));

    // 1. Load raw snapshot
    let (path, raw) = match &cli.input {
        Some(path) => (path.clone(), SnapshotStore::load_raw(path)?),
        None => store
            .load_latest_raw(&cli.symbol)
            .with_context(|| format!("failed to load raw snapshot for {}", cli.symbol))?,
    };
    tracing::debug!("Raw snapshot: {}", path.display());

    // 2-4. Normalize, compute exposure, identify levels
    let profile = GexAnalyzer::new()
        .analyze(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    println!(
        "Contracts: {} loaded, {} used, {} dropped",
        profile.contracts_total,
        profile.contracts_used,
        profile.contracts_dropped()
    );
    println!("\n=== KEY LEVELS ===");
    println!("{}", profile.key_levels);
    println!("({})", profile.key_levels.market_regime.description());

    // 5. Persist
    if cli.no_save {
        return Ok(());
    }
    let snapshot = ProcessedSnapshot::new(&cli.symbol, &profile);
    let out = store
        .save_processed(&snapshot)
        .context("failed to save processed snapshot")?;
    println!("\nProcessed snapshot saved to {}", out.display());

    Ok(())
}
