/// Resolves once the process receives ctrl-c or, on unix, SIGTERM.
///
/// Run loops await this at cycle boundaries (or hand it to a server's
/// graceful-shutdown hook); no work runs inside the signal context itself.
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut term = signal(SignalKind::terminate()).expect("SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = term.recv() => {}
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await.expect("ctrl-c handler");
    }
}
