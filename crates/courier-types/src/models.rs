use std::fmt;

use serde::{Deserialize, Serialize};

/// Domain marker for one-to-one conversations.
pub const DIRECT_CHAT_SUFFIX: &str = "@c.us";

/// Canonical reference to a conversation: either `<number>@c.us` for a direct
/// chat or any already-qualified id such as `<id>@g.us` for a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(String);

impl ChatId {
    /// Purely textual: anything containing `@` is taken verbatim, everything
    /// else gets the direct-chat suffix. Shape is not validated here.
    pub fn normalize(raw: &str) -> Self {
        if raw.contains('@') {
            Self(raw.to_string())
        } else {
            Self(format!("{raw}{DIRECT_CHAT_SUFFIX}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ChatId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
