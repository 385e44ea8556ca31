use serde::{Deserialize, Serialize};

// Record shapes as the bridge reports them. Only the fields this service
// reads are modelled; everything else in the payload is ignored.

/// Qualified contact/chat id, e.g. `{ "_serialized": "1555@c.us", "user": "1555", "server": "c.us" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireId {
    #[serde(rename = "_serialized")]
    pub serialized: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub server: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageKey {
    pub id: String,
    #[serde(rename = "_serialized", default)]
    pub serialized: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageKey,
    pub from: String,
    #[serde(default)]
    pub body: String,
    pub timestamp: i64,
    #[serde(default)]
    pub has_media: bool,
    #[serde(default)]
    pub is_group_msg: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: WireId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_group: bool,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub last_message: Option<LastMessage>,
}

/// Preview of a chat's latest message. Bridges send partial records here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMessage {
    #[serde(default)]
    pub body: Option<String>,
}

/// Base64 payload plus its declared content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub mimetype: String,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageContent {
    Text { body: String },
    Media(Media),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// What the session returns for a delivered send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: MessageKey,
}
