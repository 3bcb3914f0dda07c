use axum::{
    extract::{Query, Request, State},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use tracing::warn;

use crate::error::GatewayError;
use crate::server::AppState;

#[derive(Debug, Default, Deserialize)]
struct AuthQuery {
    auth: Option<String>,
}

/**
 * \brief Decides whether a supplied code opens the gate.
 *
 * No configured secret always fails closed. Plain string equality is enough for
 * a shared link; this is not a security boundary.
 */
pub fn check_secret(configured: Option<&str>, supplied: Option<&str>) -> Result<(), GatewayError> {
    let Some(expected) = configured else {
        return Err(GatewayError::AuthNotConfigured);
    };
    match supplied {
        Some(code) if code == expected => Ok(()),
        _ => Err(GatewayError::Unauthorized),
    }
}

/**
 * \brief Axum middleware: reads the `auth` query parameter and rejects before the handler runs.
 */
pub async fn require_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, GatewayError> {
    // An unparseable query is treated like a missing code.
    let query = Query::<AuthQuery>::try_from_uri(request.uri())
        .map(|Query(q)| q)
        .unwrap_or_default();

    if let Err(err) = check_secret(state.config.auth_secret.as_deref(), query.auth.as_deref()) {
        warn!(path = %request.uri().path(), error = %err, "request rejected by auth gate");
        return Err(err);
    }
    Ok(next.run(request).await)
}
