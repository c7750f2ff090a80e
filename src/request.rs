use http::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::header::HeaderMap;
use reqwest::{
    Client as ReqwestClient, Method, Request, RequestBuilder as ReqwestRequestBuilder, Url,
};

use crate::error::{Error, Result};
use crate::signer::Signer;

/// Builder for one signed request.
///
/// Captures the method, URL, and signable payload next to the inner
/// `reqwest` builder so the signature can be computed over exactly what is
/// sent. A raw body set through [`body`](SignedRequest::body) travels
/// outside the signature; a form body set through
/// [`form`](SignedRequest::form) is covered by it.
pub(crate) struct SignedRequest<'a> {
    method: Method,
    url: Url,
    payload: String,
    inner: ReqwestRequestBuilder,
    signer: Signer<'a>,
}

impl<'a> SignedRequest<'a> {
    pub(crate) fn new(http: &ReqwestClient, method: Method, url: Url, signer: Signer<'a>) -> Self {
        let inner = http.request(method.clone(), url.clone());
        SignedRequest {
            method,
            url,
            payload: String::new(),
            inner,
            signer,
        }
    }

    pub(crate) fn headers(mut self, headers: HeaderMap) -> Self {
        self.inner = self.inner.headers(headers);
        self
    }

    /// Attach a raw body, optionally with a content type. The body does
    /// not participate in the signature.
    pub(crate) fn body(mut self, content: String, content_type: Option<&str>) -> Self {
        if let Some(content_type) = content_type {
            self.inner = self.inner.header(CONTENT_TYPE, content_type);
        }
        self.inner = self.inner.body(content);
        self
    }

    /// Attach a form-encoded body that is covered by the signature.
    pub(crate) fn form(mut self, params: &[(&str, &str)]) -> Result<Self> {
        let payload = serde_urlencoded::to_string(params)
            .map_err(|e| Error::Configuration(format!("unencodable form parameters: {}", e)))?;
        self.inner = self
            .inner
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(payload.clone());
        self.payload = payload;
        Ok(self)
    }

    /// Compute the `Authorization` header and finish the request.
    pub(crate) fn build(self) -> Result<Request> {
        self.authorize().build().map_err(Error::transport)
    }

    fn authorize(self) -> ReqwestRequestBuilder {
        let (is_url_query, bare_url, payload) = match self.url.query() {
            None | Some("") => (false, self.url.clone(), self.payload.as_str()),
            Some(query) => {
                let mut bare_url = self.url.clone();
                bare_url.set_query(None);
                (true, bare_url, query)
            }
        };
        let header = self
            .signer
            .authorization(&self.method, bare_url, payload, is_url_query);
        self.inner.header(AUTHORIZATION, header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SignatureScheme;
    use crate::credentials::Credentials;
    use crate::signer::OAuthParams;

    fn signer(credentials: &Credentials) -> Signer<'_> {
        Signer::new(
            "consumer-key",
            "consumer-secret",
            Some(credentials),
            SignatureScheme::HmacSha1,
            OAuthParams::new().nonce("fixed").timestamp(1_000_000_000),
        )
    }

    #[test]
    fn query_urls_are_signed_and_left_intact() {
        let credentials = Credentials::new("t", "s");
        let url = Url::parse("https://h.example.com/p?file=a.jpg&size=original").unwrap();
        let request = SignedRequest::new(&ReqwestClient::new(), Method::GET, url, signer(&credentials))
            .build()
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://h.example.com/p?file=a.jpg&size=original"
        );
        let auth = request.headers().get(AUTHORIZATION).unwrap().to_str().unwrap();
        assert!(auth.starts_with("OAuth "));
        assert!(auth.contains("oauth_signature="));
        assert!(auth.contains("oauth_token=\"t\""));
    }

    #[test]
    fn form_body_sets_content_type_and_payload() {
        let credentials = Credentials::new("t", "s");
        let url = Url::parse("https://h.example.com/oauth/request_token").unwrap();
        let request = SignedRequest::new(&ReqwestClient::new(), Method::POST, url, signer(&credentials))
            .form(&[("scope", "read write")])
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            request.headers().get(CONTENT_TYPE).unwrap(),
            "application/x-www-form-urlencoded"
        );
        assert_eq!(
            request.body().unwrap().as_bytes().unwrap(),
            b"scope=read+write"
        );
        assert!(request.headers().contains_key(AUTHORIZATION));
    }

    #[test]
    fn raw_body_carries_configured_content_type() {
        let credentials = Credentials::new("t", "s");
        let url = Url::parse("https://h.example.com/playlists").unwrap();
        let request = SignedRequest::new(&ReqwestClient::new(), Method::PUT, url, signer(&credentials))
            .body("{\"name\":\"mix\"}".to_string(), Some("application/json"))
            .build()
            .unwrap();
        assert_eq!(
            request.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(
            request.body().unwrap().as_bytes().unwrap(),
            b"{\"name\":\"mix\"}"
        );
    }
}
