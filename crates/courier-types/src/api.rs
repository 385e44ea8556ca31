use serde::{Deserialize, Serialize};

// -- Errors --

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

// -- Messages --

/// Query string of `GET /messages/{id}`. `limit` is kept raw so the handler
/// can tell an absent value from a malformed one.
#[derive(Debug, Default, Deserialize)]
pub struct MessagesQuery {
    pub limit: Option<String>,
}

/// Read-only projection of a message owned by the messaging session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageView {
    pub from: String,
    pub body: String,
    pub timestamp: i64,
    #[serde(rename = "hasmedia")]
    pub has_media: bool,
    pub id: String,
    #[serde(rename = "isGroupMsg")]
    pub is_group_msg: bool,
}

// Fields are optional so a partial body reaches the handler and gets the
// "required" message instead of a deserializer rejection.

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SendTextRequest {
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendTextResponse {
    pub success: bool,
    pub to: String,
    pub message: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SendImageRequest {
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub base64: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    /// Declared content type; `image/jpeg` when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendImageResponse {
    pub success: bool,
    pub to: String,
    pub caption: String,
}

// -- Chats --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummary {
    pub id: String,
    pub name: Option<String>,
    pub is_group: bool,
    pub last_message: Option<String>,
    /// Last activity, unix seconds.
    #[serde(default)]
    pub timestamp: Option<i64>,
}
