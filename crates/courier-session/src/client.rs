use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use courier_types::models::ChatId;

use crate::models::{Chat, Message, MessageContent, Receipt, SendOptions};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("bridge request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("bridge returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("session authentication failed: {0}")]
    AuthFailure(String),

    #[error("invalid bridge url: {0}")]
    InvalidUrl(String),

    #[error("no response from session within {0:?}")]
    Timeout(Duration),
}

/// Operations the HTTP layer needs from a logged-in messaging session.
///
/// Implementations wait on the remote session and must not block the
/// runtime while doing so.
#[async_trait]
pub trait MessagingClient: Send + Sync {
    async fn get_chat_by_id(&self, chat_id: &ChatId) -> Result<Chat, SessionError>;

    /// Up to `limit` most recent messages, in whatever order the session
    /// returns them.
    async fn fetch_messages(&self, chat: &Chat, limit: u32) -> Result<Vec<Message>, SessionError>;

    async fn send_message(
        &self,
        chat_id: &ChatId,
        content: MessageContent,
        options: SendOptions,
    ) -> Result<Receipt, SessionError>;

    async fn get_chats(&self) -> Result<Vec<Chat>, SessionError>;
}
