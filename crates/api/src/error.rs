//! Translation of registry errors into HTTP responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use registry::RegistryError;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

/// JSON body sent with every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors a handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body was not valid JSON for the expected shape.
    #[error("invalid request body")]
    InvalidBody(#[from] JsonRejection),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::Registry(err) => match err {
                RegistryError::Validation { .. } => StatusCode::BAD_REQUEST,
                RegistryError::NotFound(_) => StatusCode::NOT_FOUND,
                RegistryError::Conflict(_) => StatusCode::CONFLICT,
                RegistryError::CorruptRecord(_) | RegistryError::Store(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            Self::InvalidBody(rejection) => {
                debug!(%rejection, "rejected request body");
                self.to_string()
            }
            _ if status.is_server_error() => {
                error!(error = %self, "request failed");
                "internal server error".to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
