use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};

use crate::chats;
use crate::messages;
use crate::middleware::require_token;
use crate::state::AppState;

/// 50 MB ceiling on request bodies (base64 images travel inline)
pub const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// All API routes, each behind the bearer token check.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/messages/{id}", get(messages::get_messages))
        .route("/send-text", post(messages::send_text))
        .route("/send-image", post(messages::send_image))
        .route("/chats", get(chats::list_chats))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
