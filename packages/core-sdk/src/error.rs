use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

pub type GatewayResult<T> = Result<T, GatewayError>;

#[derive(Debug, Error)]
pub enum GatewayError {
    /** \brief No shared secret configured on the server; requests fail closed. */
    #[error("Server auth not configured.")]
    AuthNotConfigured,

    #[error("Unauthorized (missing/invalid auth).")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    /** \brief Upstream completion call failed; the detail is logged, not returned. */
    #[error("upstream completion failed: {0}")]
    Upstream(String),
}

/**
 * \brief Error body, `{"detail": "..."}`, which the bundled client displays.
 */
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::AuthNotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::Unauthorized => StatusCode::UNAUTHORIZED,
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let detail = match &self {
            GatewayError::Upstream(_) => "Upstream completion failed.".to_string(),
            other => other.to_string(),
        };
        (self.status(), Json(ErrorBody { detail })).into_response()
    }
}
