use std::path::PathBuf;

use courier_token::token::DEFAULT_TOKEN_PATH;

/// Write a fresh API token to `COURIER_TOKEN_PATH` (default `api.token`),
/// replacing the current one.
fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "courier_keygen=info,courier_token=info".into()),
        )
        .init();

    let path: PathBuf = std::env::var("COURIER_TOKEN_PATH")
        .unwrap_or_else(|_| DEFAULT_TOKEN_PATH.into())
        .into();

    let token = courier_token::generate(&path)?;
    println!("Token generated: {}", token.as_str());

    Ok(())
}
