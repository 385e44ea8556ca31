use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Reject the request with 403 unless it carries `Authorization: Bearer <token>`
/// matching the configured token exactly.
pub async fn require_token(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(ApiError::Forbidden)?;

    if !state.token.matches(presented) {
        return Err(ApiError::Forbidden);
    }

    Ok(next.run(req).await)
}
