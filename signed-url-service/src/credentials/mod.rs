//! Ambient credential discovery and refresh
//!
//! Discovery is delegated to `google-cloud-auth`, which implements
//! Application Default Credentials: the file named by
//! `GOOGLE_APPLICATION_CREDENTIALS`, the gcloud well-known file, then the
//! metadata server. Every credential type the library knows is accepted.
mod error;

use async_trait::async_trait;
use google_cloud_auth::credentials::{Builder, CacheableResource, Credentials};
use google_cloud_auth::signer::Signer;
use http::{Extensions, HeaderMap};

pub use error::{CredentialError, CredentialResult};

/// Points at an explicit credentials file, checked before anything else
pub const GOOGLE_APPLICATION_CREDENTIALS_ENV_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// An identity obtained from the execution environment
///
/// `headers` is empty until the credential has been refreshed.
#[derive(Clone)]
pub struct Credential {
    headers: HeaderMap,
    embedded_identity: Option<String>,
    signer: Option<Signer>,
    source: Option<Credentials>,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("headers", &"[censored]")
            .field("embedded_identity", &self.embedded_identity)
            .field("signer", &self.signer.is_some())
            .field("source", &self.source_kind())
            .finish()
    }
}

impl Credential {
    /// Creates a credential from ready-to-use authentication headers
    #[must_use]
    pub const fn from_headers(headers: HeaderMap, embedded_identity: Option<String>) -> Self {
        Self {
            headers,
            embedded_identity,
            signer: None,
            source: None,
        }
    }

    fn application_default(
        source: Credentials,
        signer: Option<Signer>,
        embedded_identity: Option<String>,
    ) -> Self {
        Self {
            headers: HeaderMap::new(),
            embedded_identity,
            signer,
            source: Some(source),
        }
    }

    /// Attaches a signer able to sign as the embedded identity
    #[must_use]
    pub fn with_signer(mut self, signer: Signer) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Replaces the authentication headers, keeping identity and signer
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Headers that authenticate a request, usually `authorization`
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Service account email carried by the credential itself, if any
    #[must_use]
    pub fn embedded_identity(&self) -> Option<&str> {
        self.embedded_identity.as_deref()
    }

    /// Signer for the embedded identity, when the credential can sign
    #[must_use]
    pub const fn signer(&self) -> Option<&Signer> {
        self.signer.as_ref()
    }

    /// Underlying library credentials, absent for credentials built from headers
    #[must_use]
    pub const fn source_credentials(&self) -> Option<&Credentials> {
        self.source.as_ref()
    }

    /// Short name of the credential source, safe to log
    #[must_use]
    pub const fn source_kind(&self) -> &'static str {
        if self.source.is_some() {
            "application_default"
        } else {
            "static"
        }
    }
}

/// Supplies credentials to the signed URL service
#[async_trait]
pub trait CredentialProvider: Send + Sync + std::fmt::Debug {
    /// Discovers the credential available in the current environment
    async fn resolve(&self) -> CredentialResult<Credential>;

    /// Populates usable authentication headers
    async fn refresh(&self, credential: Credential) -> CredentialResult<Credential>;
}

/// Application Default Credentials, rediscovered on every `resolve()`
#[derive(Clone, Debug, Default)]
pub struct DefaultCredentialProvider;

impl DefaultCredentialProvider {
    /// Creates a provider that discovers credentials from the process environment
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CredentialProvider for DefaultCredentialProvider {
    async fn resolve(&self) -> CredentialResult<Credential> {
        let credentials = Builder::default().build()?;

        // User credentials cannot sign; they rely on the configured fallback
        let signer = match Builder::default().build_signer() {
            Ok(signer) => Some(signer),
            Err(e) if e.is_not_supported() => None,
            Err(e) => return Err(e.into()),
        };

        let embedded_identity = match &signer {
            Some(signer) => match signer.client_email().await {
                Ok(email) => Some(email),
                Err(e) => {
                    tracing::debug!("Credential has no usable service account email: {e}");
                    None
                }
            },
            None => None,
        };

        Ok(Credential::application_default(
            credentials,
            signer.filter(|_| embedded_identity.is_some()),
            embedded_identity,
        ))
    }

    async fn refresh(&self, credential: Credential) -> CredentialResult<Credential> {
        let Some(source) = credential.source_credentials() else {
            return Ok(credential);
        };

        let headers = source.headers(Extensions::new()).await;
        match headers {
            Ok(CacheableResource::New { data, .. }) => Ok(credential.with_headers(data)),
            Ok(CacheableResource::NotModified) => Err(CredentialError::Refresh(
                "credentials returned no headers".to_string(),
            )),
            Err(e) => Err(CredentialError::Refresh(e.to_string())),
        }
    }
}
