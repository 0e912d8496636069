use std::fmt::{Debug, Formatter};

/// Credential material attached to outgoing requests.
#[derive(Clone, PartialEq, Eq)]
pub enum AccessToken {
    /// Session token issued by an OAuth2 exchange.
    Bearer(String),
    /// Per-request basic authentication; there is no session to expire.
    Basic { username: String, password: String },
}

impl AccessToken {
    pub fn is_bearer(&self) -> bool {
        matches!(self, AccessToken::Bearer(_))
    }
}

// Intentionally masked so tokens never reach the logs
impl Debug for AccessToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessToken::Bearer(_) => write!(f, "Bearer(****)"),
            AccessToken::Basic { username, .. } => write!(f, "Basic({username}:****)"),
        }
    }
}
