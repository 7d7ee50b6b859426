use std::path::PathBuf;
use std::time::Duration;

use procwatch_common::shutdown::shutdown_signal;

use crate::engine::AlertEngine;

/// Evaluation loop: one pass, then sleep, until a shutdown signal arrives.
///
/// A failed pass (the sample log momentarily absent or unreadable) is logged
/// and retried on the next cycle; nothing carries over from the failed
/// attempt.
pub async fn run(mut engine: AlertEngine, sample_log: PathBuf, run_id: String, interval: Duration) {
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        match engine.evaluate(&sample_log, &run_id) {
            Ok(0) => {}
            Ok(appended) => tracing::info!(appended, "alerts appended"),
            Err(e) => {
                tracing::warn!(error = %e, log = %sample_log.display(), "evaluation cycle failed")
            }
        }

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = &mut shutdown => {
                tracing::info!("shutdown signal received");
                break;
            }
        }
    }
}
