use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use procwatch_exporter::server::{serve, ExporterState};

#[derive(Parser)]
#[command(
    name = "procwatch-exporter",
    version,
    about = "Expose the latest procwatch sample as Prometheus text"
)]
struct Opts {
    /// Sample log to export
    #[arg(long)]
    log: PathBuf,

    /// HTTP listen port
    #[arg(long, default_value_t = 9090)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    let opts = Opts::parse();
    let addr = format!("0.0.0.0:{}", opts.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    tracing::info!(log = %opts.log.display(), %addr, "exporter listening");
    serve(listener, ExporterState::new(opts.log)).await?;

    Ok(())
}
