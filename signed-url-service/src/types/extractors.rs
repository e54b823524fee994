//! Custom extractors for request validation

use aide::operation::OperationInput;
use aide::OperationOutput;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::signed_url::SignedUrlError;
use crate::types::error::AppError;

/// Query parameters naming the object to sign
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct SignedUrlParams {
    /// Bucket holding the object
    pub bucket: String,
    /// Object name, `/` separators included
    pub object: String,
}

impl SignedUrlParams {
    /// Reads `bucket` and `object` from a raw query string
    ///
    /// When a key repeats, the first value wins. Empty values count as missing,
    /// and `bucket` is checked before `object`.
    ///
    /// # Errors
    ///
    /// Returns `SignedUrlError::MissingParameter` naming the first absent key
    pub fn from_query(query: Option<&str>) -> Result<Self, SignedUrlError> {
        let query = query.unwrap_or_default();
        let pairs: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();

        let first = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .filter(|v| !v.is_empty())
        };

        let bucket = first("bucket").ok_or(SignedUrlError::MissingParameter("bucket"))?;
        let object = first("object").ok_or(SignedUrlError::MissingParameter("object"))?;

        Ok(Self { bucket, object })
    }
}

impl<S> FromRequestParts<S> for SignedUrlParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_query(parts.uri.query()).map_err(AppError::from)
    }
}

impl OperationInput for SignedUrlParams {
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        Query::<Self>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        // Documents the 400 for missing parameters
        AppError::inferred_responses(ctx, operation)
    }
}
