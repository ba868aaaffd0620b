//! Graceful shutdown: liveness fails first, then in-flight requests drain.

use std::future::Future;

use actix_web::dev::ServerHandle;
use tracing::{info, warn};

use students_backend::inbound::http::health::HealthState;

/// Resolve on SIGINT, or on SIGTERM where the platform has it.
///
/// A listener that cannot be installed is logged and never resolves, leaving
/// the other one in charge.
pub async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for interrupt");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for terminate");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => {}
        () = terminate => {}
    }
}

/// Wait for `signal`, mark the service unhealthy and stop the server
/// gracefully.
pub async fn shutdown_on<F>(signal: F, health_state: &HealthState, handle: &ServerHandle)
where
    F: Future<Output = ()>,
{
    signal.await;
    info!("shutdown requested, draining student records service");
    health_state.mark_unhealthy();
    handle.stop(true).await;
}
