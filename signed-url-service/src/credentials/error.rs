//! Error types for credential discovery and refresh

use google_cloud_auth::build_errors::Error as BuildError;
use thiserror::Error;

/// Result type for credential operations
pub type CredentialResult<T> = Result<T, CredentialError>;

/// Errors that can occur while discovering or refreshing ambient credentials
///
/// Messages never carry token or key material.
#[derive(Error, Debug)]
pub enum CredentialError {
    /// No credential source is available in this environment
    #[error("No application default credentials found: {0}")]
    NotFound(String),

    /// A credentials file exists but cannot be read or parsed
    #[error("Invalid credentials file: {0}")]
    InvalidCredentialsFile(String),

    /// The credentials file declares a `type` the auth library does not know
    #[error("Unsupported credential type: {0}")]
    UnsupportedType(String),

    /// Fetching fresh authentication headers failed
    #[error("Token refresh failed: {0}")]
    Refresh(String),
}

impl From<BuildError> for CredentialError {
    fn from(e: BuildError) -> Self {
        if e.is_unknown_type() {
            Self::UnsupportedType(e.to_string())
        } else if e.is_loading() || e.is_parsing() || e.is_missing_field() {
            Self::InvalidCredentialsFile(e.to_string())
        } else {
            Self::NotFound(e.to_string())
        }
    }
}
