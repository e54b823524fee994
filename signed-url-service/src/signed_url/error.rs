//! Error taxonomy of the signed URL flow

use thiserror::Error;

use crate::credentials::CredentialError;
use crate::signing::SigningError;
use crate::storage::StorageError;

/// Why a signed URL could not be produced
///
/// One variant per failure class, each wrapping the component error.
#[derive(Error, Debug)]
pub enum SignedUrlError {
    /// A required query parameter is absent or empty
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// Ambient credentials could not be discovered or refreshed
    #[error(transparent)]
    Authentication(#[from] CredentialError),

    /// The bucket or object could not be resolved
    #[error(transparent)]
    StorageAccess(#[from] StorageError),

    /// No signer identity, or the signature could not be produced
    #[error(transparent)]
    Signing(#[from] SigningError),
}
