use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use courier_session::{MessagingClient, SessionError};
use courier_token::ApiToken;

pub type AppState = Arc<AppStateInner>;

/// Everything a request needs. Built once at startup, read-only afterwards.
pub struct AppStateInner {
    pub client: Arc<dyn MessagingClient>,
    pub token: ApiToken,
    /// Upper bound on a single request's wait for the session
    pub request_timeout: Duration,
}

impl AppStateInner {
    /// Run a session call, failing with [`SessionError::Timeout`] if it
    /// outlives `request_timeout`.
    pub async fn call<T, F>(&self, fut: F) -> Result<T, SessionError>
    where
        F: Future<Output = Result<T, SessionError>>,
    {
        tokio::time::timeout(self.request_timeout, fut)
            .await
            .map_err(|_| SessionError::Timeout(self.request_timeout))?
    }
}
