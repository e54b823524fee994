use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Router};
use signed_url_service::{
    server,
    signed_url::{SignedUrlService, SignerConfig},
    types::Environment,
};
use tower::ServiceExt;

use super::fakes::{CountingSigner, FakeCredentials, FakeStorage};

pub const TEST_BUCKET: &str = "my-bucket";
pub const TEST_OBJECT: &str = "path/to/file.txt";
pub const FALLBACK_IDENTITY: &str = "tester@project.iam.gserviceaccount.com";

/// Setup test environment variables with all the required configuration
pub fn setup_test_env() {
    dotenvy::from_path(".env.example").ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// Router wired to in-memory collaborators
pub struct TestSetup {
    pub router: Router,
    pub environment: Environment,
    pub credentials: Arc<FakeCredentials>,
    pub storage: Arc<FakeStorage>,
    pub signer: Arc<CountingSigner>,
}

impl TestSetup {
    /// `my-bucket/path/to/file.txt` exists and `SVC_ACCT` is the fallback identity
    pub fn new() -> Self {
        Self::with(
            FakeCredentials::default(),
            FakeStorage::with_objects(&["my-bucket/path/to/file.txt"]),
            SignerConfig::new(
                Some(FALLBACK_IDENTITY.to_string()),
                std::time::Duration::from_secs(300),
            ),
        )
    }

    pub fn with(credentials: FakeCredentials, storage: FakeStorage, config: SignerConfig) -> Self {
        Self::build(
            Environment::Development {
                expiry_override: None,
            },
            credentials,
            storage,
            config,
            true,
        )
    }

    pub fn build(
        environment: Environment,
        credentials: FakeCredentials,
        storage: FakeStorage,
        config: SignerConfig,
        verify_object_exists: bool,
    ) -> Self {
        setup_test_env();

        let credentials = Arc::new(credentials);
        let storage = Arc::new(storage);
        let signer = Arc::new(CountingSigner::default());

        let service = Arc::new(
            SignedUrlService::new(credentials.clone(), storage.clone(), signer.clone(), config)
                .with_object_check(verify_object_exists),
        );

        let router = server::router(environment.clone(), service);

        Self {
            router,
            environment,
            credentials,
            storage,
            signer,
        }
    }

    pub async fn send_get_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_post_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("POST")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }
}
