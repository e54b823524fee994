//! Error types for URL signing

use thiserror::Error;

/// Result type for signing operations
pub type SigningResult<T> = Result<T, SigningError>;

/// Errors that can occur while producing a signed URL
#[derive(Error, Debug)]
pub enum SigningError {
    /// Neither the credential nor the configuration names a signer
    #[error("No signer identity available: credential has no service account and no fallback is configured")]
    MissingIdentity,

    /// The credential can neither sign as `identity` nor impersonate it
    #[error("Credential cannot sign as {0}")]
    NoSigner(String),

    /// Building an impersonating signer failed
    #[error("Failed to build signer for {identity}: {reason}")]
    SignerSetup {
        /// Service account the signer was meant for
        identity: String,
        /// What went wrong
        reason: String,
    },

    /// The signing backend rejected the request or could not be reached
    #[error("Signing failed: {0}")]
    Sign(String),
}
