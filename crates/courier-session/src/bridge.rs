use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use courier_types::models::ChatId;

use crate::client::{MessagingClient, SessionError};
use crate::events::{SessionEvent, SessionEvents};
use crate::models::{Chat, Message, MessageContent, Receipt, SendOptions};

/// Log an unreachable bridge only every this many polls.
const UNREACHABLE_LOG_EVERY: u32 = 10;

#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Base URL of the web-client bridge, e.g. `http://127.0.0.1:8085`
    pub base_url: String,
    /// Sent as the `apikey` header when set
    pub api_key: Option<String>,
    /// How often to poll session status while initializing
    pub poll_interval: Duration,
}

/// [`MessagingClient`] backed by a headless web-client bridge process that
/// owns the actual session.
pub struct BridgeClient {
    http: reqwest::Client,
    base: Url,
    config: BridgeConfig,
    events: SessionEvents,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum SessionState {
    Starting,
    Qr,
    Authenticated,
    Ready,
    Failed,
    Disconnected,
}

#[derive(Debug, Deserialize)]
struct SessionStatus {
    state: SessionState,
    #[serde(default)]
    qr: Option<String>,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SendMessageBody<'a> {
    chat_id: &'a str,
    content: MessageContent,
    options: SendOptions,
}

impl BridgeClient {
    pub fn new(config: BridgeConfig, events: SessionEvents) -> Result<Self, SessionError> {
        let mut base =
            Url::parse(&config.base_url).map_err(|e| SessionError::InvalidUrl(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(SessionError::InvalidUrl(config.base_url.clone()));
        }
        // Segments are appended per request; keep the base free of a trailing slash.
        if let Ok(mut segments) = base.path_segments_mut() {
            segments.pop_if_empty();
        }

        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            base,
            config,
            events,
        })
    }

    pub fn events(&self) -> &SessionEvents {
        &self.events
    }

    /// Start the remote session and wait until it reports ready.
    ///
    /// Pairing codes are published as [`SessionEvent::Qr`] each time the
    /// bridge rotates them. An unreachable bridge is polled again; a session
    /// the bridge reports as failed ends initialization with
    /// [`SessionError::AuthFailure`]. Callers that need an upper bound wrap
    /// this in a timeout.
    pub async fn initialize(&self) -> Result<(), SessionError> {
        let mut attempts = 0u32;
        loop {
            match self.send_empty(self.request(Method::POST, &["session", "start"])).await {
                Ok(()) => break,
                Err(SessionError::Transport(e)) if is_unreachable(&e) => {
                    if attempts % UNREACHABLE_LOG_EVERY == 0 {
                        warn!("Bridge at {} not reachable yet: {}", self.base, e);
                    }
                    attempts += 1;
                    tokio::time::sleep(self.config.poll_interval).await;
                }
                Err(e) => return Err(e),
            }
        }
        info!("Session start requested on {}", self.base);

        let mut last_qr: Option<String> = None;
        let mut authenticated = false;
        loop {
            let status = match self
                .send_json::<SessionStatus>(self.request(Method::GET, &["session", "status"]))
                .await
            {
                Ok(status) => status,
                Err(SessionError::Transport(e)) if is_unreachable(&e) => {
                    warn!("Session status poll failed: {}", e);
                    tokio::time::sleep(self.config.poll_interval).await;
                    continue;
                }
                Err(e) => return Err(e),
            };

            debug!("Session state: {:?}", status.state);
            match status.state {
                SessionState::Qr => {
                    if let Some(qr) = status.qr {
                        if last_qr.as_deref() != Some(qr.as_str()) {
                            self.events.publish(SessionEvent::Qr(qr.clone()));
                            last_qr = Some(qr);
                        }
                    }
                }
                SessionState::Authenticated => {
                    if !authenticated {
                        self.events.publish(SessionEvent::Authenticated);
                        authenticated = true;
                    }
                }
                SessionState::Ready => {
                    if !authenticated {
                        self.events.publish(SessionEvent::Authenticated);
                    }
                    self.events.publish(SessionEvent::Ready);
                    return Ok(());
                }
                SessionState::Failed => {
                    let reason = status
                        .reason
                        .unwrap_or_else(|| "session reported failure".to_string());
                    self.events.publish(SessionEvent::AuthFailure(reason.clone()));
                    return Err(SessionError::AuthFailure(reason));
                }
                SessionState::Disconnected => {
                    if authenticated {
                        let reason = status.reason.unwrap_or_else(|| "disconnected".to_string());
                        self.events.publish(SessionEvent::Disconnected(reason));
                        authenticated = false;
                    }
                }
                SessionState::Starting => {}
            }

            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let req = self.http.request(method, self.url(segments));
        match &self.config.api_key {
            Some(key) => req.header("apikey", key),
            None => req,
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, SessionError> {
        let resp = check_status(req.send().await?).await?;
        Ok(resp.json().await?)
    }

    async fn send_empty(&self, req: RequestBuilder) -> Result<(), SessionError> {
        check_status(req.send().await?).await?;
        Ok(())
    }
}

fn is_unreachable(e: &reqwest::Error) -> bool {
    e.is_connect() || e.is_timeout()
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, SessionError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(SessionError::Status {
        status: status.as_u16(),
        body: body.chars().take(500).collect(),
    })
}

#[async_trait]
impl MessagingClient for BridgeClient {
    async fn get_chat_by_id(&self, chat_id: &ChatId) -> Result<Chat, SessionError> {
        self.send_json(self.request(Method::GET, &["chats", chat_id.as_str()]))
            .await
    }

    async fn fetch_messages(&self, chat: &Chat, limit: u32) -> Result<Vec<Message>, SessionError> {
        let req = self
            .request(Method::GET, &["chats", chat.id.serialized.as_str(), "messages"])
            .query(&[("limit", limit)]);
        self.send_json(req).await
    }

    async fn send_message(
        &self,
        chat_id: &ChatId,
        content: MessageContent,
        options: SendOptions,
    ) -> Result<Receipt, SessionError> {
        let body = SendMessageBody {
            chat_id: chat_id.as_str(),
            content,
            options,
        };
        self.send_json(self.request(Method::POST, &["messages"]).json(&body))
            .await
    }

    async fn get_chats(&self) -> Result<Vec<Chat>, SessionError> {
        self.send_json(self.request(Method::GET, &["chats"])).await
    }
}
