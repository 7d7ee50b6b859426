use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use procwatch_sampler::run::{run, SamplerOptions};

#[derive(Parser)]
#[command(
    name = "procwatch-sampler",
    version,
    about = "Sample one process's resource usage into an append-only log"
)]
struct Opts {
    /// Process id to monitor
    #[arg(long)]
    pid: u32,

    /// Output sample log path
    #[arg(long)]
    out: PathBuf,

    /// Sampling interval in seconds
    #[arg(long, default_value_t = 1.0)]
    interval: f64,

    /// Run identifier; generated when omitted
    #[arg(long = "run-id")]
    run_id: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    let opts = Opts::parse();
    let run_id = opts
        .run_id
        .unwrap_or_else(|| format!("monitor_run_{}", Uuid::new_v4().simple()));

    tracing::info!(
        pid = opts.pid,
        run_id = %run_id,
        out = %opts.out.display(),
        interval_s = opts.interval,
        "sampler starting"
    );

    run(SamplerOptions {
        pid: opts.pid,
        run_id,
        out: opts.out,
        interval: Duration::from_secs_f64(opts.interval),
    })
    .await?;

    Ok(())
}
