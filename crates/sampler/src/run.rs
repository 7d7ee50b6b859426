use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use procwatch_common::record::{LogEvent, StopRecord};
use procwatch_common::shutdown::shutdown_signal;
use procwatch_common::time;
use procwatch_logfile::append::append_line;

use crate::collector::ProcessCollector;

pub struct SamplerOptions {
    pub pid: u32,
    pub run_id: String,
    pub out: PathBuf,
    pub interval: Duration,
}

/// Sampling loop: collect, stamp running maxima, append, sleep, until the
/// monitored process exits or a shutdown signal arrives. The stop summary is
/// written exactly once, after the loop.
pub async fn run(opts: SamplerOptions) -> io::Result<()> {
    let mut collector = ProcessCollector::new(opts.pid);
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let started = Instant::now();
    let mut samples: u64 = 0;
    let mut max_cpu = 0.0_f64;
    let mut max_rss = 0_u64;
    let mut peak_fds = 0_u32;

    loop {
        let Some(mut sample) = collector.collect(&opts.run_id) else {
            tracing::info!(pid = opts.pid, "monitored process exited");
            break;
        };

        max_cpu = max_cpu.max(sample.cpu_percent);
        max_rss = max_rss.max(sample.rss_bytes);
        peak_fds = peak_fds.max(sample.fds_open);
        sample.cpu_max = max_cpu;
        sample.rss_max = max_rss;

        match serde_json::to_string(&LogEvent::Sample(sample)) {
            Ok(line) => {
                // A failed append drops this tick's sample; the next tick
                // writes fresh data anyway.
                if let Err(e) = append_line(&opts.out, &line) {
                    tracing::warn!(error = %e, out = %opts.out.display(), "sample append failed");
                }
            }
            Err(e) => tracing::error!(error = %e, "sample serialization failed"),
        }
        samples += 1;

        tokio::select! {
            _ = tokio::time::sleep(opts.interval) => {}
            _ = &mut shutdown => {
                tracing::info!("shutdown signal received");
                break;
            }
        }
    }

    let summary = StopRecord {
        timestamp: time::iso_timestamp(),
        samples,
        duration_seconds: started.elapsed().as_secs_f64(),
        max_cpu_percent: max_cpu,
        max_memory_rss: max_rss,
        peak_open_files: peak_fds,
        exit_code: 0,
    };
    let line = serde_json::to_string(&LogEvent::Stop(summary))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    append_line(&opts.out, &line)?;

    tracing::info!(samples, run_id = %opts.run_id, "run summary written");
    Ok(())
}
