//! V4 signed URL generation for Cloud Storage
//!
//! Canonicalization and the `GOOG4-RSA-SHA256` scheme live in
//! `google-cloud-storage`; this module only picks the [`Signer`].
mod error;

use std::time::Duration;

use async_trait::async_trait;
use google_cloud_auth::credentials::impersonated;
use google_cloud_auth::signer::Signer;
use google_cloud_storage::builder::storage::SignedUrlBuilder;
use google_cloud_storage::http::Method;

use crate::credentials::Credential;

pub use error::{SigningError, SigningResult};

/// Public Cloud Storage endpoint
pub const DEFAULT_STORAGE_ENDPOINT: &str = "https://storage.googleapis.com";

/// The object and identity a GET URL is signed for
#[derive(Debug, Clone, Copy)]
pub struct SignRequest<'a> {
    /// Bucket holding the object
    pub bucket: &'a str,
    /// Object name
    pub object: &'a str,
    /// Service account the URL is signed as
    pub identity: &'a str,
    /// URL lifetime
    pub expires_in: Duration,
}

/// Signs GET URLs on behalf of a service account
#[async_trait]
pub trait UrlSigner: Send + Sync + std::fmt::Debug {
    /// Produces a signed URL for `request`, authenticated by `credential`
    async fn sign(
        &self,
        credential: &Credential,
        request: &SignRequest<'_>,
    ) -> SigningResult<String>;
}

/// Signs a GET URL for `request` with `signer`, against `endpoint`
///
/// # Errors
///
/// Returns `SigningError::Sign` if the signer fails or the endpoint is unusable
pub async fn sign_object_url(
    signer: &Signer,
    endpoint: &str,
    request: &SignRequest<'_>,
) -> SigningResult<String> {
    let bucket = format!("projects/_/buckets/{}", request.bucket);

    SignedUrlBuilder::for_object(bucket, request.object)
        .with_method(Method::GET)
        .with_expiration(request.expires_in)
        .with_endpoint(endpoint)
        .with_client_email(request.identity)
        .sign_with(signer)
        .await
        .map_err(|e| SigningError::Sign(e.to_string()))
}

/// [`UrlSigner`] backed by the credential's own signer, or IAM impersonation
///
/// When the URL is signed as the credential's embedded service account, its
/// signer is used as is. Any other identity is impersonated through the IAM
/// Credentials API with the credential as source.
#[derive(Clone, Debug)]
pub struct GcsUrlSigner {
    endpoint: String,
}

impl GcsUrlSigner {
    /// Creates a signer whose URLs point at `endpoint`
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        }
    }

    fn signer_for(credential: &Credential, identity: &str) -> SigningResult<Signer> {
        if let Some(signer) = credential
            .signer()
            .filter(|_| credential.embedded_identity() == Some(identity))
        {
            return Ok(signer.clone());
        }

        let source = credential
            .source_credentials()
            .ok_or_else(|| SigningError::NoSigner(identity.to_string()))?;

        impersonated::Builder::from_source_credentials(source.clone())
            .with_target_principal(identity)
            .build_signer()
            .map_err(|e| SigningError::SignerSetup {
                identity: identity.to_string(),
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl UrlSigner for GcsUrlSigner {
    async fn sign(
        &self,
        credential: &Credential,
        request: &SignRequest<'_>,
    ) -> SigningResult<String> {
        let signer = Self::signer_for(credential, request.identity)?;
        sign_object_url(&signer, &self.endpoint, request).await
    }
}
