//! Authenticated session as handed over by the authentication provider.

use serde::{Deserialize, Serialize};

/// Identity of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: Option<String>,
}

/// Proof of authentication for the current request. Read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: SessionUser,
}

impl Session {
    pub fn new(id: impl Into<String>, name: Option<String>) -> Self {
        Self {
            user: SessionUser {
                id: id.into(),
                name,
            },
        }
    }

    /// Name shown in the status line; falls back to the identity reference.
    pub fn display_name(&self) -> &str {
        self.user
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(self.user.id.as_str())
    }
}
