mod docs;
mod health;
/// Signed URL endpoint
pub mod signed_url;

use aide::axum::{routing::get, ApiRouter};

/// Creates the router with all handler routes
pub fn handler() -> ApiRouter {
    ApiRouter::new()
        .merge(docs::handler())
        .api_route("/health", get(health::handler))
        .api_route(
            "/",
            get(signed_url::create_signed_url).post(signed_url::create_signed_url),
        )
}
