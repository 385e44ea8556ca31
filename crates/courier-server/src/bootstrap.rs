use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use axum::Router;
use tracing::info;

use courier_api::AppStateInner;
use courier_session::{BridgeClient, SessionEvents};

use crate::config::Config;

/// Load the token, bring the session to ready, and build the API router.
///
/// Returns an error on a missing token, a failed session or an expired
/// `ready_timeout`. The caller binds a listener only for an `Ok` router.
pub async fn prepare(config: &Config, events: SessionEvents) -> Result<Router> {
    let token = courier_token::load(&config.token_path).with_context(|| {
        format!(
            "cannot load API token from {} (generate one with `courier-keygen`)",
            config.token_path.display()
        )
    })?;

    let client = Arc::new(BridgeClient::new(config.bridge.clone(), events)?);
    info!("Initializing messaging session via {}", config.bridge.base_url);

    let initialized = match config.ready_timeout {
        Some(limit) => tokio::time::timeout(limit, client.initialize())
            .await
            .map_err(|_| anyhow!("messaging session not ready after {:?}", limit))?,
        None => client.initialize().await,
    };
    initialized.context("messaging session failed to initialize")?;

    if !client.events().is_ready() {
        bail!("messaging session initialized without reporting ready");
    }

    let state = Arc::new(AppStateInner {
        client,
        token,
        request_timeout: config.request_timeout,
    });
    Ok(courier_api::router(state))
}
