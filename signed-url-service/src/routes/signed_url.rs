use std::sync::Arc;

use axum::{Extension, Json};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    signed_url::SignedUrlService,
    types::{AppError, SignedUrlParams},
};

/// Successful response body
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SignedUrlResponse {
    /// Signed GET URL, valid for at most five minutes
    pub data: String,
}

/// Creates a signed URL granting temporary read access to a bucket object
///
/// The service authenticates with the ambient credentials of its runtime,
/// checks that the object exists, and signs a V4 GET URL for it.
///
/// # Errors
///
/// - `400` when `bucket` or `object` is missing
/// - `401` when no credentials are available or they cannot be refreshed
/// - `403`/`404` when the object cannot be read or does not exist
/// - `503` when Cloud Storage is unavailable
/// - `500` when the URL cannot be signed
#[instrument(skip(service, params), fields(bucket = %params.bucket, object = %params.object))]
pub async fn create_signed_url(
    Extension(service): Extension<Arc<SignedUrlService>>,
    params: SignedUrlParams,
) -> Result<Json<SignedUrlResponse>, AppError> {
    let signed = service.generate(&params.bucket, &params.object).await?;

    tracing::debug!("Signed URL expires at {}", signed.expires_at.to_rfc3339());

    Ok(Json(SignedUrlResponse { data: signed.url }))
}
