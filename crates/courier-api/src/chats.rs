use axum::{Json, extract::State};
use tracing::debug;

use courier_types::api::ChatSummary;

use crate::error::ApiError;
use crate::state::AppState;
use crate::views;

/// GET /chats — every chat the session knows about.
pub async fn list_chats(State(state): State<AppState>) -> Result<Json<Vec<ChatSummary>>, ApiError> {
    let chats = state
        .call(state.client.get_chats())
        .await
        .map_err(ApiError::adapter("Could not fetch chats"))?;

    debug!("Listing {} chats", chats.len());
    Ok(Json(chats.iter().map(views::chat_summary).collect()))
}
