use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use procwatch_alert::engine::AlertEngine;
use procwatch_alert::rules;

#[derive(Parser)]
#[command(
    name = "procwatch-alertd",
    version,
    about = "Threshold alert daemon over a procwatch sample log"
)]
struct Opts {
    /// Alert rules JSON file
    #[arg(long)]
    config: PathBuf,

    /// Sample log to monitor
    #[arg(long)]
    log: PathBuf,

    /// Alert log to append to
    #[arg(long)]
    out: PathBuf,

    /// Run identifier stamped on every alert
    #[arg(long = "run-id")]
    run_id: String,

    /// Evaluation interval in seconds
    #[arg(long, default_value_t = 5)]
    interval: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    let opts = Opts::parse();

    let rules = rules::load_from_file(&opts.config)
        .with_context(|| format!("loading alert rules from {}", opts.config.display()))?;

    tracing::info!(
        rules = rules.len(),
        run_id = %opts.run_id,
        log = %opts.log.display(),
        out = %opts.out.display(),
        interval_s = opts.interval,
        "alert engine starting"
    );

    let engine = AlertEngine::new(rules, &opts.out);
    procwatch_alert::run::run(
        engine,
        opts.log,
        opts.run_id,
        Duration::from_secs(opts.interval),
    )
    .await;

    Ok(())
}
