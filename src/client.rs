use std::convert::TryFrom;

use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client as ReqwestClient, Method, Request, Url};

use crate::config::ClientConfig;
use crate::credentials::Credentials;
use crate::error::{Error, Result};
use crate::request::SignedRequest;
use crate::response::{read_classified, ApiResponse, ResponseExt};
use crate::signer::{self, OAuthParams, Signer};
use crate::token::{AccessToken, RequestToken};
use crate::urls::build_api_url;

/// The client facade.
///
/// Holds the configuration and the HTTP transport; every operation is
/// stateless beyond them, issues exactly one network exchange, and settles
/// exactly once. Calls carrying complete credentials go through the OAuth
/// signing engine; an unauthenticated `get` goes straight through the
/// transport with the consumer key in the query string instead.
///
/// # Example
///
/// ```no_run
/// use oauth1_api_client::{ApiClient, ClientConfig};
///
/// # async fn run() -> oauth1_api_client::Result<()> {
/// let config = ClientConfig::new(
///     "consumer-key",
///     "consumer-secret",
///     "https://api.example.com/oauth/request_token",
///     "https://api.example.com/oauth/access_token",
///     "api.example.com",
/// );
/// let client = ApiClient::new(config)?;
///
/// // anonymous lookup, identified by api_key
/// let release = client.get("/release/details", None, &[("releaseid", "12345")], None).await?;
/// println!("{}", release.body);
///
/// // the three-legged dance
/// let request_token = client.request_token(&[]).await?;
/// println!("authorize at: {}", request_token.authorize_url);
/// // ... user authorizes, verifier comes back ...
/// let access = client
///     .access_token(&request_token.token, &request_token.token_secret, "verifier")
///     .await?;
/// let locker = client
///     .auth(&access.token, &access.token_secret)
///     .get("/user/locker", Some("2"), &[])
///     .await?;
/// println!("{}", locker.body);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ApiClient {
    http: ReqwestClient,
    config: ClientConfig,
    headers: HeaderMap,
}

impl ApiClient {
    /// Construct a client, building the transport from the configuration.
    ///
    /// Fails with [`Error::Configuration`] when a required configuration
    /// value is missing.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = ReqwestClient::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(Error::transport)?;
        Self::with_http_client(config, http)
    }

    /// Construct a client around a caller-supplied `reqwest::Client`,
    /// for transport options this crate does not model.
    pub fn with_http_client(config: ClientConfig, http: ReqwestClient) -> Result<Self> {
        config.validate()?;
        let headers = build_header_map(&config.headers)?;
        Ok(ApiClient {
            http,
            config,
            headers,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch temporary credentials, beginning the three-legged flow.
    ///
    /// `extra_params` travel as a form body covered by the signature. The
    /// authorize URL comes from the `login_url` parameter of the exchange
    /// response.
    pub async fn request_token(&self, extra_params: &[(&str, &str)]) -> Result<RequestToken> {
        let request = self.prepare_request_token(extra_params)?;
        debug!("requesting temporary credentials from {}", request.url());
        let response = self.http.execute(request).await.map_err(Error::transport)?;
        let raw = read_classified(response).await?;
        RequestToken::parse(&raw.text)
    }

    /// Exchange an authorized request token and verifier for an access
    /// token.
    pub async fn access_token(
        &self,
        token: &str,
        secret: &str,
        verifier: &str,
    ) -> Result<AccessToken> {
        let credentials = Credentials::new(token, secret);
        let request = self.prepare_access_token(&credentials, verifier)?;
        debug!("exchanging request token at {}", request.url());
        let response = self.http.execute(request).await.map_err(Error::transport)?;
        let raw = read_classified(response).await?;
        AccessToken::parse(&raw.text)
    }

    /// Bind a credential pair, yielding a facade whose verb methods no
    /// longer take credentials.
    pub fn auth(&self, token: impl Into<String>, secret: impl Into<String>) -> Authed<'_> {
        Authed {
            client: self,
            credentials: Credentials::new(token, secret),
        }
    }

    /// GET `path` on the configured host.
    ///
    /// With complete credentials the request is signed; otherwise it goes
    /// out unsigned with the consumer key appended as `api_key`. `page`
    /// becomes the `page` query parameter when given.
    pub async fn get(
        &self,
        path: &str,
        page: Option<&str>,
        query: &[(&str, &str)],
        credentials: Option<&Credentials>,
    ) -> Result<ApiResponse> {
        let request = self.prepare_get(path, page, query, credentials)?;
        self.dispatch(request).await
    }

    /// Signed PUT of `content` to `path`. Credentials must be complete.
    pub async fn put(
        &self,
        path: &str,
        content: impl Into<String>,
        credentials: &Credentials,
    ) -> Result<ApiResponse> {
        let request = self.prepare_with_body(Method::PUT, path, content.into(), credentials)?;
        self.dispatch(request).await
    }

    /// Signed POST of `content` to `path`. Credentials must be complete.
    pub async fn post(
        &self,
        path: &str,
        content: impl Into<String>,
        credentials: &Credentials,
    ) -> Result<ApiResponse> {
        let request = self.prepare_with_body(Method::POST, path, content.into(), credentials)?;
        self.dispatch(request).await
    }

    /// Signed DELETE of `path`. Credentials must be complete.
    pub async fn delete(&self, path: &str, credentials: &Credentials) -> Result<ApiResponse> {
        credentials.require_complete()?;
        let url = self.signed_url(path, None, &[])?;
        debug!("signed DELETE {}", url);
        let request = self
            .signed_request(Method::DELETE, url, Some(credentials))
            .build()?;
        self.dispatch(request).await
    }

    async fn dispatch(&self, request: Request) -> Result<ApiResponse> {
        let response = self.http.execute(request).await.map_err(Error::transport)?;
        response.normalize().await
    }

    fn prepare_get(
        &self,
        path: &str,
        page: Option<&str>,
        query: &[(&str, &str)],
        credentials: Option<&Credentials>,
    ) -> Result<Request> {
        match credentials.filter(|credentials| credentials.is_complete()) {
            Some(credentials) => {
                let url = self.signed_url(path, page, query)?;
                debug!("signed GET {}", url);
                self.signed_request(Method::GET, url, Some(credentials))
                    .build()
            }
            None => {
                let url = build_api_url(
                    &self.config.key,
                    None,
                    &self.config.api_host_name,
                    path,
                    page,
                    query,
                )?;
                debug!("unsigned GET {}", url);
                self.http
                    .get(url)
                    .headers(self.headers.clone())
                    .build()
                    .map_err(Error::transport)
            }
        }
    }

    fn prepare_with_body(
        &self,
        method: Method,
        path: &str,
        content: String,
        credentials: &Credentials,
    ) -> Result<Request> {
        credentials.require_complete()?;
        let url = self.signed_url(path, None, &[])?;
        debug!("signed {} {}", method, url);
        self.signed_request(method, url, Some(credentials))
            .body(content, self.config.content_type.as_deref())
            .build()
    }

    fn prepare_request_token(&self, extra_params: &[(&str, &str)]) -> Result<Request> {
        let url = parse_endpoint(&self.config.request_token_url)?;
        let mut params = OAuthParams::new().nonce(signer::nonce(self.config.nonce_size));
        if let Some(ref callback) = self.config.callback_url {
            params = params.callback(callback.as_str());
        }
        let signer = Signer::new(
            &self.config.key,
            &self.config.secret,
            None,
            self.config.signature,
            params,
        );
        SignedRequest::new(&self.http, Method::POST, url, signer)
            .headers(self.headers.clone())
            .form(extra_params)?
            .build()
    }

    fn prepare_access_token(&self, credentials: &Credentials, verifier: &str) -> Result<Request> {
        credentials.require_complete()?;
        let url = parse_endpoint(&self.config.access_token_url)?;
        let params = OAuthParams::new()
            .nonce(signer::nonce(self.config.nonce_size))
            .verifier(verifier.to_string());
        let signer = Signer::new(
            &self.config.key,
            &self.config.secret,
            Some(credentials),
            self.config.signature,
            params,
        );
        SignedRequest::new(&self.http, Method::POST, url, signer)
            .headers(self.headers.clone())
            .form(&[])?
            .build()
    }

    fn signed_url(&self, path: &str, page: Option<&str>, query: &[(&str, &str)]) -> Result<Url> {
        build_api_url(
            &self.config.key,
            Some(&self.config.secret),
            &self.config.api_host_name,
            path,
            page,
            query,
        )
    }

    fn signed_request<'a>(
        &'a self,
        method: Method,
        url: Url,
        credentials: Option<&'a Credentials>,
    ) -> SignedRequest<'a> {
        let params = OAuthParams::new().nonce(signer::nonce(self.config.nonce_size));
        let signer = Signer::new(
            &self.config.key,
            &self.config.secret,
            credentials,
            self.config.signature,
            params,
        );
        SignedRequest::new(&self.http, method, url, signer).headers(self.headers.clone())
    }
}

/// Verb facade with a fixed credential pair, returned by
/// [`ApiClient::auth`]. Each method produces exactly the result of calling
/// the corresponding client method with the bound credentials.
pub struct Authed<'a> {
    client: &'a ApiClient,
    credentials: Credentials,
}

impl Authed<'_> {
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub async fn get(
        &self,
        path: &str,
        page: Option<&str>,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse> {
        self.client
            .get(path, page, query, Some(&self.credentials))
            .await
    }

    pub async fn put(&self, path: &str, content: impl Into<String>) -> Result<ApiResponse> {
        self.client.put(path, content, &self.credentials).await
    }

    pub async fn post(&self, path: &str, content: impl Into<String>) -> Result<ApiResponse> {
        self.client.post(path, content, &self.credentials).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.client.delete(path, &self.credentials).await
    }
}

fn parse_endpoint(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| Error::Configuration(format!("invalid endpoint URL {:?}: {}", raw, e)))
}

fn build_header_map(pairs: &[(String, String)]) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        let name = HeaderName::try_from(name.as_str())
            .map_err(|e| Error::Configuration(format!("invalid header name {:?}: {}", name, e)))?;
        let value = HeaderValue::try_from(value.as_str())
            .map_err(|e| Error::Configuration(format!("invalid value for header {}: {}", name, e)))?;
        map.insert(name, value);
    }
    Ok(map)
}
