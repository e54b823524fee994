use std::sync::Arc;

use aide::openapi::OpenApi;
use axum::{Extension, Router};
use datadog_tracing::axum::{shutdown_signal, OtelAxumLayer, OtelInResponseLayer};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::routes;
use crate::{signed_url::SignedUrlService, types::Environment};

/// Builds the application router with its dependencies attached
#[must_use]
pub fn router(environment: Environment, service: Arc<SignedUrlService>) -> Router {
    let mut openapi = OpenApi::default();

    routes::handler()
        .finish_api(&mut openapi)
        .layer(Extension(openapi))
        .layer(Extension(environment))
        .layer(Extension(service))
}

/// Starts the server with the given environment and dependencies
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start(
    environment: Environment,
    service: Arc<SignedUrlService>,
) -> anyhow::Result<()> {
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], Environment::port()?));

    let router = router(environment, service)
        .layer(TraceLayer::new_for_http())
        // Include trace context as header into the response
        .layer(OtelInResponseLayer)
        // Start OpenTelemetry trace on incoming request
        .layer(OtelAxumLayer::default());

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🔄 Signed URL service started on http://{addr}");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}
