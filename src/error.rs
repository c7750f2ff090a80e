use reqwest::header::HeaderMap;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Error type covering every failure mode of the client.
///
/// Nothing is retried or suppressed internally; callers branch on the
/// variant to decide remediation (re-authenticate on 401, surface the body
/// on other non-2xx statuses, and so on).
#[derive(Error, Debug)]
pub enum Error {
    /// A required configuration value or call argument is missing or invalid.
    #[error("missing or invalid configuration: {0}")]
    Configuration(String),
    /// The operation requires complete credentials but the named part is empty.
    #[error("credentials are required but the {0} is missing")]
    InvalidCredentials(&'static str),
    /// The network exchange itself failed. When the failure happened after
    /// the response head arrived, the response headers are attached since
    /// they can carry diagnostic request identifiers.
    #[error("transport failure: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
        headers: Option<HeaderMap>,
    },
    /// The remote answered with a non-2xx status. The body is passed
    /// through unparsed.
    #[error("unexpected HTTP status {status}")]
    HttpStatus { status: u16, body: String },
    /// The response claimed success but its body is not valid JSON.
    #[error("malformed JSON body: {0}")]
    JsonParse(#[from] serde_json::Error),
    /// A token exchange answered without one of the keys the protocol
    /// requires.
    #[error("token exchange response has no {key}: {body}")]
    MalformedTokenExchange { key: &'static str, body: String },
}

impl Error {
    pub(crate) fn transport(source: reqwest::Error) -> Self {
        Error::Transport {
            source,
            headers: None,
        }
    }

    pub(crate) fn transport_with_headers(source: reqwest::Error, headers: HeaderMap) -> Self {
        Error::Transport {
            source,
            headers: Some(headers),
        }
    }

    /// The HTTP status of an `HttpStatus` failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response headers attached to a `Transport` failure, if any arrived.
    pub fn response_headers(&self) -> Option<&HeaderMap> {
        match self {
            Error::Transport {
                headers: Some(headers),
                ..
            } => Some(headers),
            _ => None,
        }
    }

    /// `true` for failures caused by the caller's configuration or
    /// arguments rather than by the remote service.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Configuration(_) | Error::InvalidCredentials(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderMap, HeaderValue};

    fn transport_source() -> reqwest::Error {
        // an unparsable URL is the only way to mint a reqwest::Error offline
        reqwest::Client::new()
            .get("htt p://invalid")
            .build()
            .unwrap_err()
    }

    #[test]
    fn status_accessor() {
        let err = Error::HttpStatus {
            status: 404,
            body: "missing".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(Error::Configuration("x".to_string()).status(), None);
    }

    #[test]
    fn transport_keeps_response_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("abc"));
        let err = Error::transport_with_headers(transport_source(), headers);
        let attached = err.response_headers().unwrap();
        assert_eq!(attached.get("x-request-id").unwrap(), "abc");
    }

    #[test]
    fn transport_without_response_has_no_headers() {
        let err = Error::transport(transport_source());
        assert!(err.response_headers().is_none());
    }

    #[test]
    fn config_error_classification() {
        assert!(Error::Configuration("x".to_string()).is_config_error());
        assert!(Error::InvalidCredentials("token").is_config_error());
        assert!(!Error::HttpStatus {
            status: 500,
            body: String::new()
        }
        .is_config_error());
    }
}
