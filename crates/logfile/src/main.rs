use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "procwatch-rotate",
    version,
    about = "Bound a procwatch log directory by retention count"
)]
struct Opts {
    /// Directory holding the log files
    #[arg(long)]
    dir: PathBuf,

    /// File-name suffix selecting the retention set
    #[arg(long, default_value = ".jsonl")]
    suffix: String,

    /// Number of newest files to keep
    #[arg(long, default_value_t = 10)]
    keep: usize,

    /// Gzip rotated files instead of deleting them
    #[arg(long)]
    compress: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    let opts = Opts::parse();
    tracing::info!(
        dir = %opts.dir.display(),
        suffix = %opts.suffix,
        keep = opts.keep,
        compress = opts.compress,
        "rotation starting"
    );

    let rotated = procwatch_logfile::rotate::rotate(&opts.dir, &opts.suffix, opts.keep, opts.compress)
        .with_context(|| format!("rotating {}", opts.dir.display()))?;

    tracing::info!(rotated, "rotation complete");
    Ok(())
}
