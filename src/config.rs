use std::time::Duration;

use crate::error::{Error, Result};

/// Signature scheme handed to the OAuth engine.
///
/// RSA-SHA1 is not offered because the signing collaborator
/// (`oauth1-request`) does not implement it; HMAC-SHA1 is the default the
/// protocol expects almost everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureScheme {
    HmacSha1,
    Plaintext,
}

impl Default for SignatureScheme {
    fn default() -> Self {
        SignatureScheme::HmacSha1
    }
}

/// Configuration owned by one [`ApiClient`](crate::ApiClient).
///
/// The five constructor arguments are required and must be non-empty;
/// everything else has a sensible default and can be adjusted through the
/// `with_*` builders. The value is never mutated once a client owns it.
///
/// # Example
///
/// ```
/// use oauth1_api_client::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new(
///     "consumer-key",
///     "consumer-secret",
///     "https://api.example.com/oauth/request_token",
///     "https://api.example.com/oauth/access_token",
///     "api.example.com",
/// )
/// .with_callback_url("https://client.example.com/callback")
/// .with_timeout(Duration::from_secs(30));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Consumer key identifying the caller.
    pub key: String,
    /// Consumer secret used for signing.
    pub secret: String,
    /// Full URL of the request-token endpoint.
    pub request_token_url: String,
    /// Full URL of the access-token endpoint.
    pub access_token_url: String,
    /// Host name all verb calls are issued against.
    pub api_host_name: String,
    /// `oauth_callback` sent with the request-token exchange, if any.
    pub callback_url: Option<String>,
    /// Signature scheme for all signed calls.
    pub signature: SignatureScheme,
    /// Length of the per-request nonce.
    pub nonce_size: usize,
    /// `Content-Type` attached to PUT/POST bodies, if set.
    pub content_type: Option<String>,
    /// Headers applied to every outgoing request.
    pub headers: Vec<(String, String)>,
    /// `User-Agent` for the built-in transport.
    pub user_agent: String,
    /// Request timeout for the built-in transport; `None` leaves the
    /// transport default in place.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(
        key: impl Into<String>,
        secret: impl Into<String>,
        request_token_url: impl Into<String>,
        access_token_url: impl Into<String>,
        api_host_name: impl Into<String>,
    ) -> Self {
        ClientConfig {
            key: key.into(),
            secret: secret.into(),
            request_token_url: request_token_url.into(),
            access_token_url: access_token_url.into(),
            api_host_name: api_host_name.into(),
            callback_url: None,
            signature: SignatureScheme::default(),
            nonce_size: 32,
            content_type: None,
            headers: vec![("Accept".to_string(), "application/json".to_string())],
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            timeout: None,
        }
    }

    /// Set the callback URL advertised during the request-token exchange.
    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    /// Select the signature scheme.
    pub fn with_signature_scheme(mut self, scheme: SignatureScheme) -> Self {
        self.signature = scheme;
        self
    }

    /// Set the nonce length used for signed requests.
    pub fn with_nonce_size(mut self, size: usize) -> Self {
        self.nonce_size = size;
        self
    }

    /// Set the `Content-Type` sent with PUT and POST bodies.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Append a header sent with every request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the `User-Agent` of the built-in transport.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout of the built-in transport.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let required = [
            ("key", &self.key),
            ("secret", &self.secret),
            ("request_token_url", &self.request_token_url),
            ("access_token_url", &self.access_token_url),
            ("api_host_name", &self.api_host_name),
        ];
        for (name, value) in &required {
            if value.is_empty() {
                return Err(Error::Configuration(format!(
                    "required configuration value {} is empty",
                    name
                )));
            }
        }
        if self.nonce_size == 0 {
            return Err(Error::Configuration(
                "nonce_size must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
