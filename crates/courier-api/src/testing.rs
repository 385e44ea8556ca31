//! Test doubles for the session seam.

use std::sync::Mutex;

use async_trait::async_trait;

use courier_session::{
    Chat, LastMessage, Message, MessageContent, MessageKey, MessagingClient, Receipt,
    SendOptions, SessionError, WireId,
};
use courier_types::models::ChatId;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetChat(String),
    Fetch { chat: String, limit: u32 },
    Send { to: String, content: MessageContent, options: SendOptions },
    GetChats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Behavior {
    #[default]
    Succeed,
    Fail,
    Hang,
}

/// Records every call and answers with canned data.
#[derive(Default)]
pub struct SpyClient {
    pub behavior: Behavior,
    pub chats: Vec<Chat>,
    pub messages: Vec<Message>,
    calls: Mutex<Vec<Call>>,
}

/// Detail that must never reach an HTTP response.
pub const INTERNAL_DETAIL: &str = "Protocol error (Runtime.callFunctionOn): Target closed";

impl SpyClient {
    pub fn failing() -> Self {
        Self {
            behavior: Behavior::Fail,
            ..Default::default()
        }
    }

    pub fn hanging() -> Self {
        Self {
            behavior: Behavior::Hang,
            ..Default::default()
        }
    }

    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }

    pub fn with_chats(chats: Vec<Chat>) -> Self {
        Self {
            chats,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    async fn record(&self, call: Call) -> Result<(), SessionError> {
        self.calls.lock().unwrap().push(call);
        match self.behavior {
            Behavior::Succeed => Ok(()),
            Behavior::Fail => Err(SessionError::Status {
                status: 500,
                body: INTERNAL_DETAIL.to_string(),
            }),
            Behavior::Hang => std::future::pending().await,
        }
    }
}

#[async_trait]
impl MessagingClient for SpyClient {
    async fn get_chat_by_id(&self, chat_id: &ChatId) -> Result<Chat, SessionError> {
        self.record(Call::GetChat(chat_id.to_string())).await?;
        Ok(chat(chat_id.as_str()))
    }

    async fn fetch_messages(&self, chat: &Chat, limit: u32) -> Result<Vec<Message>, SessionError> {
        self.record(Call::Fetch {
            chat: chat.id.serialized.clone(),
            limit,
        })
        .await?;
        Ok(self.messages.iter().take(limit as usize).cloned().collect())
    }

    async fn send_message(
        &self,
        chat_id: &ChatId,
        content: MessageContent,
        options: SendOptions,
    ) -> Result<Receipt, SessionError> {
        self.record(Call::Send {
            to: chat_id.to_string(),
            content,
            options,
        })
        .await?;
        Ok(Receipt {
            id: MessageKey {
                id: "SENT".into(),
                serialized: format!("true_{chat_id}_SENT"),
            },
        })
    }

    async fn get_chats(&self) -> Result<Vec<Chat>, SessionError> {
        self.record(Call::GetChats).await?;
        Ok(self.chats.clone())
    }
}

pub fn chat(id: &str) -> Chat {
    let (user, server) = id.split_once('@').unwrap_or((id, ""));
    Chat {
        id: WireId {
            serialized: id.to_string(),
            user: user.to_string(),
            server: server.to_string(),
        },
        name: None,
        is_group: server == "g.us",
        timestamp: None,
        last_message: None,
    }
}

pub fn last_message(body: &str) -> LastMessage {
    LastMessage {
        body: Some(body.to_string()),
    }
}

pub fn message(id: &str, from: &str, body: &str) -> Message {
    Message {
        id: MessageKey {
            id: id.to_string(),
            serialized: format!("false_{from}_{id}"),
        },
        from: from.to_string(),
        body: body.to_string(),
        timestamp: 1_700_000_000,
        has_media: false,
        is_group_msg: false,
    }
}
