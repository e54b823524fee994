use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use google_cloud_auth::credentials::service_account;
use google_cloud_auth::signer::Signer;
use http::header::AUTHORIZATION;
use http::{HeaderMap, HeaderValue};
use serde_json::json;
use signed_url_service::{
    credentials::{Credential, CredentialError, CredentialProvider, CredentialResult},
    signing::{sign_object_url, SignRequest, SigningResult, UrlSigner, DEFAULT_STORAGE_ENDPOINT},
    storage::{ObjectMetadata, StorageClient, StorageError, StorageResult},
};

/// How the fake credential provider behaves
#[derive(Debug, Clone, Default)]
pub enum CredentialBehavior {
    /// Resolves and refreshes, optionally carrying a service account
    #[default]
    Available,
    /// Nothing discoverable in the environment
    Missing,
    /// Discovery works but the token refresh fails
    RefreshFails,
}

#[derive(Debug, Default)]
pub struct FakeCredentials {
    pub behavior: CredentialBehavior,
    pub embedded_identity: Option<String>,
    pub resolved: AtomicUsize,
    pub refreshed: AtomicUsize,
}

impl FakeCredentials {
    pub fn with_identity(identity: &str) -> Self {
        Self {
            embedded_identity: Some(identity.to_string()),
            ..Self::default()
        }
    }

    pub fn failing(behavior: CredentialBehavior) -> Self {
        Self {
            behavior,
            ..Self::default()
        }
    }

    pub fn resolve_count(&self) -> usize {
        self.resolved.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialProvider for FakeCredentials {
    async fn resolve(&self) -> CredentialResult<Credential> {
        self.resolved.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            CredentialBehavior::Missing => Err(CredentialError::NotFound(
                "no credentials file and metadata server unreachable".to_string(),
            )),
            _ => Ok(Credential::from_headers(
                HeaderMap::new(),
                self.embedded_identity.clone(),
            )),
        }
    }

    async fn refresh(&self, credential: Credential) -> CredentialResult<Credential> {
        let n = self.refreshed.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            CredentialBehavior::RefreshFails => {
                Err(CredentialError::Refresh("network unreachable".to_string()))
            }
            _ => {
                let mut headers = HeaderMap::new();
                headers.insert(
                    AUTHORIZATION,
                    HeaderValue::from_str(&format!("Bearer access-token-{n}")).unwrap(),
                );
                Ok(credential.with_headers(headers))
            }
        }
    }
}

/// Outcome of a metadata lookup for a given `bucket/object`
#[derive(Debug, Clone, Copy)]
pub enum ObjectState {
    Forbidden,
    Unavailable,
}

/// In-memory bucket contents; anything not listed is missing
#[derive(Debug, Default)]
pub struct FakeStorage {
    objects: Mutex<HashMap<String, Option<ObjectState>>>,
    pub lookups: AtomicUsize,
}

impl FakeStorage {
    pub fn with_objects(objects: &[&str]) -> Self {
        let storage = Self::default();
        for object in objects {
            storage.insert(object, None);
        }
        storage
    }

    /// Registers `bucket/object`, optionally failing lookups for it
    pub fn insert(&self, path: &str, state: Option<ObjectState>) {
        self.objects.lock().unwrap().insert(path.to_string(), state);
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StorageClient for FakeStorage {
    async fn object_metadata(
        &self,
        bucket: &str,
        object: &str,
        auth: &HeaderMap,
    ) -> StorageResult<ObjectMetadata> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        assert!(auth[AUTHORIZATION]
            .to_str()
            .unwrap()
            .starts_with("Bearer access-token-"));

        let location = format!("gs://{bucket}/{object}");
        match self.objects.lock().unwrap().get(&format!("{bucket}/{object}")) {
            None => Err(StorageError::NotFound(location)),
            Some(Some(ObjectState::Forbidden)) => Err(StorageError::PermissionDenied(location)),
            Some(Some(ObjectState::Unavailable)) => {
                Err(StorageError::Upstream(format!("{location}: 503 Service Unavailable")))
            }
            Some(None) => Ok(ObjectMetadata {
                bucket: bucket.to_string(),
                name: object.to_string(),
                size: Some("1024".to_string()),
                content_type: Some("text/plain".to_string()),
                generation: None,
                updated: None,
            }),
        }
    }
}

/// Signs with a local test key through the real URL builder, recording identities
#[derive(Debug)]
pub struct CountingSigner {
    key: Signer,
    pub identities: Mutex<Vec<String>>,
}

impl Default for CountingSigner {
    fn default() -> Self {
        let key = service_account::Builder::new(json!({
            "type": "service_account",
            "project_id": "test-project",
            "client_email": "fixture@test-project.iam.gserviceaccount.com",
            "private_key_id": "fixture",
            "private_key": include_str!("../fixtures/test-private-key.pem"),
        }))
        .build_signer()
        .unwrap();

        Self {
            key,
            identities: Mutex::default(),
        }
    }
}

impl CountingSigner {
    pub fn call_count(&self) -> usize {
        self.identities.lock().unwrap().len()
    }
}

#[async_trait]
impl UrlSigner for CountingSigner {
    async fn sign(
        &self,
        credential: &Credential,
        request: &SignRequest<'_>,
    ) -> SigningResult<String> {
        assert!(credential.headers().contains_key(AUTHORIZATION));

        self.identities
            .lock()
            .unwrap()
            .push(request.identity.to_string());

        sign_object_url(&self.key, DEFAULT_STORAGE_ENDPOINT, request).await
    }
}
