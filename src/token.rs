use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::{LOGIN_URL_KEY, OAUTH_TOKEN_KEY, OAUTH_TOKEN_SECRET_KEY};

/// Decoded form of a token-exchange response body.
#[derive(Debug, Clone)]
pub struct TokenExchange {
    pub token: String,
    pub token_secret: String,
    /// Every other parameter the exchange returned.
    pub extra: HashMap<String, String>,
}

/// Parse the urlencoded body of a token exchange.
pub fn parse_token_exchange(body: &str) -> Result<TokenExchange> {
    let mut destructured = url::form_urlencoded::parse(body.as_bytes())
        .into_iter()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect::<HashMap<String, String>>();
    let token = destructured.remove(OAUTH_TOKEN_KEY);
    let token_secret = destructured.remove(OAUTH_TOKEN_SECRET_KEY);
    match (token, token_secret) {
        (Some(token), Some(token_secret)) => Ok(TokenExchange {
            token,
            token_secret,
            extra: destructured,
        }),
        (None, _) => Err(Error::MalformedTokenExchange {
            key: OAUTH_TOKEN_KEY,
            body: body.to_string(),
        }),
        (_, _) => Err(Error::MalformedTokenExchange {
            key: OAUTH_TOKEN_SECRET_KEY,
            body: body.to_string(),
        }),
    }
}

/// Temporary credentials from the request-token exchange.
///
/// Ownership passes to the caller, who stores the pair until the user has
/// visited `authorize_url` and the verifier comes back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestToken {
    pub token: String,
    pub token_secret: String,
    /// Where to send the user for authorization; taken from the
    /// `login_url` parameter of the exchange response.
    pub authorize_url: String,
    /// Every non-token parameter the exchange returned.
    pub raw: HashMap<String, String>,
}

impl RequestToken {
    /// Parse a request-token exchange body.
    pub fn parse(body: &str) -> Result<Self> {
        let exchange = parse_token_exchange(body)?;
        let authorize_url = match exchange.extra.get(LOGIN_URL_KEY) {
            Some(url) => url.clone(),
            None => {
                return Err(Error::MalformedTokenExchange {
                    key: LOGIN_URL_KEY,
                    body: body.to_string(),
                })
            }
        };
        Ok(RequestToken {
            token: exchange.token,
            token_secret: exchange.token_secret,
            authorize_url,
            raw: exchange.extra,
        })
    }
}

/// Long-lived credentials from the access-token exchange; caller-owned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub token: String,
    pub token_secret: String,
    /// Every non-token parameter the exchange returned.
    pub raw: HashMap<String, String>,
}

impl AccessToken {
    /// Parse an access-token exchange body.
    pub fn parse(body: &str) -> Result<Self> {
        let exchange = parse_token_exchange(body)?;
        Ok(AccessToken {
            token: exchange.token,
            token_secret: exchange.token_secret,
            raw: exchange.extra,
        })
    }
}
