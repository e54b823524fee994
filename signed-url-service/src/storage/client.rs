//! Cloud Storage JSON API client

use async_trait::async_trait;
use http::HeaderMap;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, StatusCode};
use tracing::debug;

use super::{ObjectMetadata, StorageClient, StorageError, StorageResult};

/// Object names are a single path segment in the JSON API, `/` included
const SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Reads object metadata through `storage/v1`
#[derive(Clone, Debug)]
pub struct GcsClient {
    http: Client,
    endpoint: String,
}

impl GcsClient {
    /// Creates a client against `endpoint`, e.g. `https://storage.googleapis.com`
    #[must_use]
    pub fn new(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        }
    }

    fn object_url(&self, bucket: &str, object: &str) -> String {
        format!(
            "{}/storage/v1/b/{}/o/{}",
            self.endpoint,
            utf8_percent_encode(bucket, SEGMENT_ENCODE_SET),
            utf8_percent_encode(object, SEGMENT_ENCODE_SET),
        )
    }
}

#[async_trait]
impl StorageClient for GcsClient {
    async fn object_metadata(
        &self,
        bucket: &str,
        object: &str,
        auth: &HeaderMap,
    ) -> StorageResult<ObjectMetadata> {
        let location = format!("gs://{bucket}/{object}");

        let response = self
            .http
            .get(self.object_url(bucket, object))
            .headers(auth.clone())
            .send()
            .await
            .map_err(|e| StorageError::Transport(format!("{location}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Metadata lookup for {location} returned {status}: {body}");

            return Err(match status {
                StatusCode::NOT_FOUND => StorageError::NotFound(location),
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    StorageError::PermissionDenied(location)
                }
                s if s.is_server_error() => StorageError::Upstream(format!("{location}: {s}")),
                s => StorageError::InvalidResponse(format!("{location}: unexpected status {s}")),
            });
        }

        response
            .json::<ObjectMetadata>()
            .await
            .map_err(|e| StorageError::InvalidResponse(format!("{location}: {e}")))
    }
}
