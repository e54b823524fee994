//! Universal error handling for the API

use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use schemars::JsonSchema;
use serde::Serialize;

use crate::credentials::CredentialError;
use crate::signed_url::SignedUrlError;
use crate::signing::SigningError;
use crate::storage::StorageError;

/// API error response envelope
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Machine-readable error code
    pub code: &'static str,
    /// Whether the client should retry the request
    pub allow_retry: bool,
}

/// Application error type that wraps the API error response
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    inner: ApiErrorResponse,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub fn new(
        status: StatusCode,
        code: &'static str,
        msg: impl Into<String>,
        retry: bool,
    ) -> Self {
        Self {
            status,
            inner: ApiErrorResponse {
                error: msg.into(),
                code,
                allow_retry: retry,
            },
        }
    }

    /// HTTP status of the response
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable error code of the response
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.inner.code
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.status.as_u16() {
            400..=499 => {
                tracing::warn!("Client error: {} - {}", self.inner.code, self.inner.error);
            }
            500..=599 => {
                tracing::error!("Server error: {} - {}", self.inner.code, self.inner.error);
            }
            _ => {}
        }

        (self.status, Json(self.inner)).into_response()
    }
}

/// Convert signed URL errors to application errors
impl From<SignedUrlError> for AppError {
    fn from(err: SignedUrlError) -> Self {
        let message = err.to_string();

        match err {
            SignedUrlError::MissingParameter(_) => {
                Self::new(StatusCode::BAD_REQUEST, "missing_parameter", message, false)
            }
            SignedUrlError::Authentication(e) => {
                let code = match e {
                    CredentialError::NotFound(_) => "credentials_not_found",
                    CredentialError::InvalidCredentialsFile(_)
                    | CredentialError::UnsupportedType(_) => "invalid_credentials",
                    CredentialError::Refresh(_) => "credentials_refresh_failed",
                };
                Self::new(StatusCode::UNAUTHORIZED, code, message, false)
            }
            SignedUrlError::StorageAccess(e) => match e {
                StorageError::NotFound(_) => {
                    Self::new(StatusCode::NOT_FOUND, "object_not_found", message, false)
                }
                StorageError::PermissionDenied(_) => {
                    Self::new(StatusCode::FORBIDDEN, "permission_denied", message, false)
                }
                e if e.is_retryable() => Self::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "upstream_error",
                    message,
                    true,
                ),
                _ => Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage_error",
                    message,
                    false,
                ),
            },
            SignedUrlError::Signing(e) => {
                let code = match e {
                    SigningError::MissingIdentity => "missing_signer_identity",
                    _ => "signing_failed",
                };
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, code, message, false)
            }
        }
    }
}

impl OperationOutput for AppError {
    type Inner = ApiErrorResponse;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<ApiErrorResponse>::operation_response(ctx, operation)
    }
}
