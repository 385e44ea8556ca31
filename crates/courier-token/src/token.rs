use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use rand_core::{OsRng, RngCore};
use subtle::ConstantTimeEq;
use thiserror::Error;
use tracing::info;

/// Raw entropy per token. Hex encoding doubles it to 64 characters.
pub const TOKEN_BYTES: usize = 32;

pub const DEFAULT_TOKEN_PATH: &str = "api.token";

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to write token file {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to read token file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("token file {0} is empty")]
    Empty(PathBuf),
}

/// The active bearer credential.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact, case-sensitive comparison in constant time over the content.
    pub fn matches(&self, presented: &str) -> bool {
        self.0.as_bytes().ct_eq(presented.as_bytes()).into()
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(<redacted>)")
    }
}

/// Create a fresh token and write it to `path`, replacing any previous one.
pub fn generate(path: &Path) -> Result<ApiToken, TokenError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    let token = hex::encode(bytes);

    write_owner_only(path, token.as_bytes()).map_err(|source| TokenError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!("API token written to {}", path.display());
    Ok(ApiToken(token))
}

/// Read the token written by [`generate`]. Surrounding whitespace is ignored.
pub fn load(path: &Path) -> Result<ApiToken, TokenError> {
    let raw = fs::read_to_string(path).map_err(|source| TokenError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let token = raw.trim();
    if token.is_empty() {
        return Err(TokenError::Empty(path.to_path_buf()));
    }

    Ok(ApiToken(token.to_string()))
}

#[cfg(unix)]
fn write_owner_only(path: &Path, contents: &[u8]) -> io::Result<()> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies on creation
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(contents)?;
    file.sync_all()
}

#[cfg(not(unix))]
fn write_owner_only(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(contents)?;
    file.sync_all()
}
