//! Cloud Storage object lookups

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

mod client;
mod error;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use http::HeaderMap;
use serde::Deserialize;

pub use client::GcsClient;
pub use error::{StorageError, StorageResult};

/// Subset of the JSON API object resource the service reads
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMetadata {
    /// Bucket holding the object
    pub bucket: String,
    /// Full object name
    pub name: String,
    /// Object size in bytes, encoded as a decimal string by the API
    #[serde(default)]
    pub size: Option<String>,
    /// Content type, if one was set on upload
    #[serde(default)]
    pub content_type: Option<String>,
    /// Object generation
    #[serde(default)]
    pub generation: Option<String>,
    /// Last metadata modification time
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
}

/// Read access to object metadata
#[async_trait]
pub trait StorageClient: Send + Sync + std::fmt::Debug {
    /// Fetches metadata for `object` in `bucket`, proving it exists and is readable
    ///
    /// `auth` carries the credential's authentication headers.
    async fn object_metadata(
        &self,
        bucket: &str,
        object: &str,
        auth: &HeaderMap,
    ) -> StorageResult<ObjectMetadata>;
}
