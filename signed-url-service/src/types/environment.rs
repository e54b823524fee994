//! Environment configuration for different deployment stages

use std::env;
use std::time::Duration;

use crate::signing::DEFAULT_STORAGE_ENDPOINT;
use crate::signed_url::MAX_SIGNED_URL_LIFETIME;

/// Application environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (local execution, emulators)
    Development {
        /// Optional override for the signed URL lifetime in seconds
        expiry_override: Option<u64>,
    },
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => {
                let expiry_override = env::var("SIGNED_URL_EXPIRY_SECS")
                    .ok()
                    .and_then(|val| val.parse::<u64>().ok())
                    .filter(|secs| *secs > 0);

                Self::Development { expiry_override }
            }
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Port the HTTP server listens on, the same in every stage
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is set but is not a valid port number
    pub fn port() -> Result<u16, std::num::ParseIntError> {
        env::var("PORT").map_or(Ok(8080), |p| p.parse())
    }

    /// Service account email used to sign when the ambient credential does not carry one
    ///
    /// Mirrors local developer execution, where user credentials have no
    /// service account attached.
    #[must_use]
    pub fn fallback_signer_identity() -> Option<String> {
        env::var("SVC_ACCT")
            .ok()
            .map(|val| val.trim().to_string())
            .filter(|val| !val.is_empty())
    }

    /// Lifetime of every signed URL, never above five minutes
    #[must_use]
    pub fn signed_url_lifetime(&self) -> Duration {
        match self {
            Self::Production | Self::Staging => MAX_SIGNED_URL_LIFETIME,
            Self::Development { expiry_override } => expiry_override
                .map(Duration::from_secs)
                .map_or(MAX_SIGNED_URL_LIFETIME, |d| d.min(MAX_SIGNED_URL_LIFETIME)),
        }
    }

    /// Whether object metadata is fetched before signing
    ///
    /// Enabled unless `VERIFY_OBJECT_EXISTS` is explicitly `false` or `0`.
    #[must_use]
    pub fn verify_object_exists() -> bool {
        env::var("VERIFY_OBJECT_EXISTS").map_or(true, |val| {
            !matches!(val.trim().to_lowercase().as_str(), "false" | "0" | "no")
        })
    }

    /// Cloud Storage endpoint used for metadata lookups and as the signed URL host
    #[must_use]
    pub fn storage_endpoint(&self) -> String {
        match self {
            Self::Production | Self::Staging => DEFAULT_STORAGE_ENDPOINT.to_string(),
            Self::Development { .. } => env::var("STORAGE_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_STORAGE_ENDPOINT.to_string()),
        }
    }

    /// Whether to show API docs
    #[must_use]
    pub const fn show_api_docs(&self) -> bool {
        matches!(self, Self::Development { .. } | Self::Staging)
    }
}
