use crate::error::{Error, Result};

/// A token/secret pair used to sign a single call.
///
/// Built per call and never stored by the client. The two constructors
/// cover the shapes callers hold tokens in: an already-paired value
/// ([`Credentials::new`]) or two optional parts ([`Credentials::from_pair`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
    secret: String,
}

impl Credentials {
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Credentials {
            token: token.into(),
            secret: secret.into(),
        }
    }

    /// Collapse two optional parts into credentials; `None` unless both
    /// parts are present.
    pub fn from_pair(token: Option<&str>, secret: Option<&str>) -> Option<Self> {
        match (token, secret) {
            (Some(token), Some(secret)) => Some(Credentials::new(token, secret)),
            _ => None,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Both parts non-empty.
    pub fn is_complete(&self) -> bool {
        !self.token.is_empty() && !self.secret.is_empty()
    }

    pub(crate) fn require_complete(&self) -> Result<()> {
        if self.token.is_empty() {
            return Err(Error::InvalidCredentials("token"));
        }
        if self.secret.is_empty() {
            return Err(Error::InvalidCredentials("token secret"));
        }
        Ok(())
    }
}
