use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use procwatch_logfile::reader;

use crate::render;

#[derive(Clone)]
pub struct ExporterState {
    sample_log: Arc<PathBuf>,
}

impl ExporterState {
    pub fn new(sample_log: PathBuf) -> Self {
        Self {
            sample_log: Arc::new(sample_log),
        }
    }
}

pub fn router(state: ExporterState) -> Router {
    Router::new()
        .route("/metrics", get(metrics))
        .fallback(not_found)
        .with_state(state)
}

pub async fn serve(listener: TcpListener, state: ExporterState) -> std::io::Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(procwatch_common::shutdown::shutdown_signal())
        .await
}

/// Serves the newest sample. The log path is opened fresh on every request:
/// the sampler replaces the file whole, so a held handle could go stale.
async fn metrics(State(state): State<ExporterState>) -> Response {
    match reader::latest(&state.sample_log) {
        Ok(Some(sample)) => (
            StatusCode::OK,
            [(
                header::CONTENT_TYPE,
                "text/plain; version=0.0.4; charset=utf-8",
            )],
            render::render_sample(&sample),
        )
            .into_response(),
        Ok(None) => (StatusCode::SERVICE_UNAVAILABLE, "No metrics found\n").into_response(),
        Err(e) => {
            tracing::warn!(error = %e, log = %state.sample_log.display(), "sample log unreadable");
            (StatusCode::SERVICE_UNAVAILABLE, "No metrics found\n").into_response()
        }
    }
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}
