use crate::config::{ACCESS_TOKEN_ENV, USER_ID_ENV, require_env};
use crate::error::Result;

/// Signed-in user, passed explicitly to whatever needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub user_id: String,
    pub access_token: Option<String>,
}

impl SessionContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            access_token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Build from `MEETLENS_USER_ID` and the optional `MEETLENS_ACCESS_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let session = Self::new(require_env(USER_ID_ENV)?);
        Ok(match std::env::var(ACCESS_TOKEN_ENV) {
            Ok(token) if !token.is_empty() => session.with_token(token),
            _ => session,
        })
    }
}
