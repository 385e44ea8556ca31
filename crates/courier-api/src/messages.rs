use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use tracing::{debug, info};

use courier_session::{Media, MessageContent, SendOptions};
use courier_types::api::{
    MessageView, MessagesQuery, SendImageRequest, SendImageResponse, SendTextRequest,
    SendTextResponse,
};
use courier_types::models::ChatId;

use crate::error::ApiError;
use crate::state::AppState;
use crate::views;

pub const DEFAULT_LIMIT: u32 = 10;

/// Declared for images sent without an explicit `mimetype`.
pub const DEFAULT_IMAGE_MIMETYPE: &str = "image/jpeg";

/// GET /messages/{id}?limit=N — most recent messages of one conversation.
pub async fn get_messages(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<MessagesQuery>, QueryRejection>,
) -> Result<Json<Vec<MessageView>>, ApiError> {
    let Query(query) = query.map_err(|_| ApiError::Validation(INVALID_LIMIT))?;
    let limit = parse_limit(query.limit.as_deref())?;
    let chat_id = ChatId::normalize(&id);

    let messages = state
        .call(async {
            let chat = state.client.get_chat_by_id(&chat_id).await?;
            state.client.fetch_messages(&chat, limit).await
        })
        .await
        .map_err(ApiError::adapter("Could not fetch messages"))?;

    debug!("Fetched {} messages from {}", messages.len(), chat_id);
    Ok(Json(messages.iter().map(views::message_view).collect()))
}

/// POST /send-text — `{ number, message }`.
pub async fn send_text(
    State(state): State<AppState>,
    body: Result<Json<SendTextRequest>, JsonRejection>,
) -> Result<Json<SendTextResponse>, ApiError> {
    let req = body_or_default(body)?;
    let (Some(number), Some(message)) = (present(req.number), present(req.message)) else {
        return Err(ApiError::Validation("number and message required"));
    };

    let chat_id = ChatId::normalize(&number);
    let receipt = state
        .call(state.client.send_message(
            &chat_id,
            MessageContent::Text {
                body: message.clone(),
            },
            SendOptions::default(),
        ))
        .await
        .map_err(ApiError::adapter("Could not send text message"))?;

    info!("Text message sent to {} ({})", chat_id, receipt.id.serialized);
    Ok(Json(SendTextResponse {
        success: true,
        to: chat_id.into_string(),
        message,
    }))
}

/// POST /send-image — `{ number, base64, caption?, mimetype? }`. The payload
/// is forwarded as-is; only the body size ceiling bounds it.
pub async fn send_image(
    State(state): State<AppState>,
    body: Result<Json<SendImageRequest>, JsonRejection>,
) -> Result<Json<SendImageResponse>, ApiError> {
    let req = body_or_default(body)?;
    let (Some(number), Some(data)) = (present(req.number), present(req.base64)) else {
        return Err(ApiError::Validation("number and base64 required"));
    };
    let caption = req.caption.unwrap_or_default();
    let mimetype = present(req.mimetype).unwrap_or_else(|| DEFAULT_IMAGE_MIMETYPE.to_string());

    let chat_id = ChatId::normalize(&number);
    let receipt = state
        .call(state.client.send_message(
            &chat_id,
            MessageContent::Media(Media {
                mimetype,
                data,
            }),
            SendOptions {
                caption: Some(caption.clone()),
            },
        ))
        .await
        .map_err(ApiError::adapter("Could not send image"))?;

    info!("Image sent to {} ({})", chat_id, receipt.id.serialized);
    Ok(Json(SendImageResponse {
        success: true,
        to: chat_id.into_string(),
        caption,
    }))
}

const INVALID_LIMIT: &str = "limit must be a non-negative integer";

/// Absent or empty means the default; anything else must be plain ASCII
/// digits that fit a `u32`.
fn parse_limit(raw: Option<&str>) -> Result<u32, ApiError> {
    match raw {
        None | Some("") => Ok(DEFAULT_LIMIT),
        Some(value) if value.bytes().all(|b| b.is_ascii_digit()) => value
            .parse()
            .map_err(|_| ApiError::Validation(INVALID_LIMIT)),
        Some(_) => Err(ApiError::Validation(INVALID_LIMIT)),
    }
}

/// An unparsable body counts as an empty one so the caller gets the
/// "required" message. Only the size ceiling is reported separately.
fn body_or_default<T: Default>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            Err(ApiError::PayloadTooLarge)
        }
        Err(rejection) => {
            debug!("Treating unparsable body as empty: {}", rejection.body_text());
            Ok(T::default())
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
