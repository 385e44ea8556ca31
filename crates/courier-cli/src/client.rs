use anyhow::{Result, bail};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use courier_types::api::{
    ChatSummary, ErrorResponse, MessageView, SendImageRequest, SendImageResponse,
    SendTextRequest, SendTextResponse,
};

/// Thin client for the courier REST API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(base_url: &str, token: String) -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::builder().build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub async fn chats(&self) -> Result<Vec<ChatSummary>> {
        self.send(self.http.get(self.url("/chats"))).await
    }

    pub async fn messages(&self, chat: &str, limit: Option<u32>) -> Result<Vec<MessageView>> {
        let mut req = self.http.get(self.url(&format!("/messages/{}", chat)));
        if let Some(limit) = limit {
            req = req.query(&[("limit", limit)]);
        }
        self.send(req).await
    }

    pub async fn send_text(&self, to: &str, message: &str) -> Result<SendTextResponse> {
        let body = SendTextRequest {
            number: Some(to.to_string()),
            message: Some(message.to_string()),
        };
        self.send(self.http.post(self.url("/send-text")).json(&body))
            .await
    }

    pub async fn send_image(&self, body: &SendImageRequest) -> Result<SendImageResponse> {
        self.send(self.http.post(self.url("/send-image")).json(body))
            .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T> {
        let resp = req.bearer_auth(&self.token).send().await?;
        debug!("{} {}", resp.status(), resp.url());
        decode(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json().await?);
    }
    let text = resp.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(err) => bail!("server returned {}: {}", status, err.error),
        Err(_) => bail!("server returned {}", status),
    }
}
