use std::future::Future;

use axum::Router;
use axum::routing::get;
use engine::context::Context;
use tokio::net::TcpListener;

use crate::handlers;

/// Read-only routes over the projections. Nothing here talks to the chain.
pub fn router(context: Context) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/prescriptions", get(handlers::list_prescriptions))
        .route("/api/prescriptions/{id}", get(handlers::get_prescription))
        .route("/api/batches", get(handlers::list_batches))
        .route("/api/batches/{id}", get(handlers::get_batch))
        .with_state(context)
}

/// Serves the read API on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, context: Context, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let address = listener.local_addr()?;
    tracing::info!("Read API listening on http://{address}/api/health");

    axum::serve(listener, router(context)).with_graceful_shutdown(shutdown).await
}
