//! Signed URL orchestration
//!
//! Resolves ambient credentials, optionally proves the object exists, and
//! signs a short-lived GET URL for it.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

mod error;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::credentials::{Credential, CredentialProvider};
use crate::signing::{SignRequest, SigningError, UrlSigner};
use crate::storage::StorageClient;
use crate::types::Environment;

pub use error::SignedUrlError;

/// Upper bound on the validity of every URL this service hands out
pub const MAX_SIGNED_URL_LIFETIME: Duration = Duration::from_secs(5 * 60);

/// Shortest lifetime a V4 signature accepts
pub const MIN_SIGNED_URL_LIFETIME: Duration = Duration::from_secs(1);

/// A signed URL and the instant it stops working
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedUrl {
    /// The full URL, signature included
    pub url: String,
    /// Issue time plus the configured lifetime
    pub expires_at: DateTime<Utc>,
}

/// How URLs are signed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerConfig {
    /// Identity used when the credential carries none (`SVC_ACCT`)
    pub fallback_identity: Option<String>,
    expires_in: Duration,
}

impl SignerConfig {
    /// Creates a signer configuration
    ///
    /// `expires_in` is clamped to
    /// [`MIN_SIGNED_URL_LIFETIME`]..=[`MAX_SIGNED_URL_LIFETIME`].
    #[must_use]
    pub fn new(fallback_identity: Option<String>, expires_in: Duration) -> Self {
        Self {
            fallback_identity,
            expires_in: expires_in.clamp(MIN_SIGNED_URL_LIFETIME, MAX_SIGNED_URL_LIFETIME),
        }
    }

    /// Reads the signer configuration for `environment`
    #[must_use]
    pub fn from_environment(environment: &Environment) -> Self {
        Self::new(
            Environment::fallback_signer_identity(),
            environment.signed_url_lifetime(),
        )
    }

    /// Lifetime of signed URLs
    #[must_use]
    pub const fn expires_in(&self) -> Duration {
        self.expires_in
    }

    /// The credential's own service account wins over the configured fallback
    #[must_use]
    pub fn resolve_identity<'a>(&'a self, credential: &'a Credential) -> Option<&'a str> {
        credential
            .embedded_identity()
            .or(self.fallback_identity.as_deref())
    }
}

/// Produces signed GET URLs for arbitrary bucket objects
#[derive(Debug)]
pub struct SignedUrlService {
    credentials: Arc<dyn CredentialProvider>,
    storage: Arc<dyn StorageClient>,
    signer: Arc<dyn UrlSigner>,
    config: SignerConfig,
    verify_object_exists: bool,
}

impl SignedUrlService {
    /// Creates a service that checks object existence before signing
    #[must_use]
    pub fn new(
        credentials: Arc<dyn CredentialProvider>,
        storage: Arc<dyn StorageClient>,
        signer: Arc<dyn UrlSigner>,
        config: SignerConfig,
    ) -> Self {
        Self {
            credentials,
            storage,
            signer,
            config,
            verify_object_exists: true,
        }
    }

    /// Toggles the metadata lookup that precedes signing
    #[must_use]
    pub const fn with_object_check(mut self, enabled: bool) -> Self {
        self.verify_object_exists = enabled;
        self
    }

    /// Signing configuration in use
    #[must_use]
    pub const fn config(&self) -> &SignerConfig {
        &self.config
    }

    /// Signs a GET URL for `object` in `bucket`
    ///
    /// Credentials are resolved and refreshed on every call; nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns `SignedUrlError::MissingParameter` if either name is empty
    /// Returns `SignedUrlError::Authentication` if credentials cannot be obtained
    /// Returns `SignedUrlError::StorageAccess` if the object lookup fails
    /// Returns `SignedUrlError::Signing` if no identity is available or signing fails
    pub async fn generate(&self, bucket: &str, object: &str) -> Result<SignedUrl, SignedUrlError> {
        if bucket.is_empty() {
            return Err(SignedUrlError::MissingParameter("bucket"));
        }
        if object.is_empty() {
            return Err(SignedUrlError::MissingParameter("object"));
        }

        let credential = self.credentials.resolve().await?;
        let credential = self.credentials.refresh(credential).await?;
        debug!("Using {} credentials", credential.source_kind());

        if self.verify_object_exists {
            let metadata = self
                .storage
                .object_metadata(bucket, object, credential.headers())
                .await?;
            debug!(
                "Found gs://{}/{} (size: {:?})",
                metadata.bucket, metadata.name, metadata.size
            );
        }

        let identity = self
            .config
            .resolve_identity(&credential)
            .ok_or(SigningError::MissingIdentity)?;

        let issued_at = Utc::now();
        let request = SignRequest {
            bucket,
            object,
            identity,
            expires_in: self.config.expires_in,
        };
        let url = self.signer.sign(&credential, &request).await?;

        let lifetime = chrono::Duration::from_std(self.config.expires_in)
            .unwrap_or_else(|_| chrono::Duration::zero());
        let expires_at = issued_at + lifetime;
        info!("Signed GET URL for gs://{bucket}/{object} as {identity}, expires at {expires_at}");

        Ok(SignedUrl { url, expires_at })
    }
}
