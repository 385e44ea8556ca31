use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use courier_session::SessionError;
use courier_types::api::ErrorResponse;

/// Every way a request can fail. The display text is exactly what the
/// caller sees in `{ "error": ... }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Forbidden")]
    Forbidden,

    #[error("{0}")]
    Validation(&'static str),

    #[error("Payload too large")]
    PayloadTooLarge,

    /// The session failed. `source` is logged, never returned.
    #[error("{message}")]
    Adapter {
        message: &'static str,
        #[source]
        source: SessionError,
    },
}

impl ApiError {
    /// `map_err` helper: wrap a session failure under a public message.
    pub fn adapter(message: &'static str) -> impl FnOnce(SessionError) -> Self {
        move |source| Self::Adapter { message, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Adapter { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Adapter { message, source } = &self {
            error!("{}: {}", message, source);
        }
        (self.status(), Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}
