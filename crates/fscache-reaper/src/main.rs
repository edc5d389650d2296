//! fscache-reaper - Expire stale files from a cache directory

use anyhow::{Context, Result};
use clap::Parser;
use fscache_core::{ReapTarget, Reaper, spawn_reaper_task, sweep};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;
mod target;

use config::{Config, LoggingConfig};
use target::{DirTarget, DryRun};

/// fscache-reaper - Expire stale files from a cache directory
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    /// Cache directory
    #[arg(short, long, env = "FSCACHE_REAPER_DIR")]
    dir: Option<String>,

    /// Run a single sweep and exit
    #[arg(long)]
    once: bool,

    /// Report what would be reaped without removing anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load(&args.config)?;

    init_logging(&config.logging);

    info!("Starting fscache-reaper v{}", env!("CARGO_PKG_VERSION"));

    let reaper = config.reaper.build();
    let dir = args.dir.unwrap_or(config.cache.dir);
    info!(
        "Reaping {} (expiry: {}s, period: {}s, mode: {})",
        dir,
        reaper.expiry().num_seconds(),
        reaper.period().num_seconds(),
        reaper.mode()
    );

    let target: Arc<dyn ReapTarget> = if args.dry_run {
        info!("Dry run, no files will be removed");
        Arc::new(DryRun::new(DirTarget::new(&dir)))
    } else {
        Arc::new(DirTarget::new(&dir))
    };
    let reaper: Arc<dyn Reaper> = Arc::new(reaper);

    if args.once {
        let stats = sweep(reaper.as_ref(), target.as_ref()).await?;
        info!(
            "Sweep finished: {} scanned, {} removed, {} failed",
            stats.scanned, stats.reaped, stats.failed
        );
        return Ok(());
    }

    let task = spawn_reaper_task(reaper, target);
    let signal = tokio::signal::ctrl_c().await;
    task.abort();
    signal.context("Failed to listen for shutdown signal")?;
    info!("Shutdown signal received");

    info!("Reaper stopped");
    Ok(())
}

/// Initialize logging, letting `RUST_LOG` override the configured level
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let json = logging.format.eq_ignore_ascii_case("json");

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(fmt::layer))
        .init();
}
