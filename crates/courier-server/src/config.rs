use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use courier_session::BridgeConfig;
use courier_token::token::DEFAULT_TOKEN_PATH;

/// Startup configuration, read once from `COURIER_*` environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub token_path: PathBuf,
    pub bridge: BridgeConfig,
    pub request_timeout: Duration,
    /// `None` waits for the session indefinitely
    pub ready_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            host: var("COURIER_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse(&var, "COURIER_PORT")?.unwrap_or(3000),
            token_path: var("COURIER_TOKEN_PATH")
                .unwrap_or_else(|| DEFAULT_TOKEN_PATH.into())
                .into(),
            bridge: BridgeConfig {
                base_url: var("COURIER_BRIDGE_URL")
                    .unwrap_or_else(|| "http://127.0.0.1:8085".into()),
                api_key: var("COURIER_BRIDGE_KEY"),
                poll_interval: Duration::from_millis(
                    parse(&var, "COURIER_POLL_INTERVAL_MS")?.unwrap_or(1000),
                ),
            },
            request_timeout: Duration::from_secs(
                parse(&var, "COURIER_REQUEST_TIMEOUT_SECS")?.unwrap_or(60),
            ),
            ready_timeout: parse(&var, "COURIER_READY_TIMEOUT_SECS")?.map(Duration::from_secs),
        })
    }
}

fn parse<T>(var: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    var(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .with_context(|| format!("{key} has an invalid value: {raw:?}"))
        })
        .transpose()
}
