use std::sync::Arc;

use signed_url_service::{
    credentials::DefaultCredentialProvider,
    server,
    signed_url::{SignedUrlService, SignerConfig},
    signing::GcsUrlSigner,
    storage::GcsClient,
    types::Environment,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    // Datadog for staging/production, plain logs for local development
    let tracer = match environment {
        Environment::Production | Environment::Staging => Some(datadog_tracing::init()?),
        Environment::Development { .. } => {
            fmt().with_env_filter(EnvFilter::from_default_env()).init();
            None
        }
    };

    let config = SignerConfig::from_environment(&environment);

    if config.fallback_identity.is_none() {
        info!("SVC_ACCT is not set, signing requires credentials with an embedded service account");
    }

    let storage_endpoint = environment.storage_endpoint();
    let service = Arc::new(
        SignedUrlService::new(
            Arc::new(DefaultCredentialProvider::new()),
            Arc::new(GcsClient::new(reqwest::Client::new(), &storage_endpoint)),
            Arc::new(GcsUrlSigner::new(storage_endpoint)),
            config,
        )
        .with_object_check(Environment::verify_object_exists()),
    );

    let result = server::start(environment, service).await;

    if let Some((_guard, tracer_shutdown)) = tracer {
        tracer_shutdown.shutdown();
    }

    info!("✅ Signed URL service shutdown complete");

    result
}
