/*!
OAuth 1.0 client for JSON web APIs.

# Overview

This library issues HTTP requests against a configured API host, signing
them with the OAuth 1.0a protocol where credentials are available and
falling back to `api_key`-identified anonymous calls where they are not.
Signature computation is delegated to the
[oauth1-request](https://crates.io/crates/oauth1-request) crate and the
network exchange to [reqwest](https://crates.io/crates/reqwest); this crate
wires the two together behind one client facade with request-token and
access-token exchanges and GET/PUT/POST/DELETE verbs.

# How to use

## Anonymous lookup

```no_run
use oauth1_api_client::{ApiClient, ClientConfig};

# async fn run() -> oauth1_api_client::Result<()> {
let config = ClientConfig::new(
    "[CONSUMER_KEY]",
    "[CONSUMER_SECRET]",
    "https://api.example.com/oauth/request_token",
    "https://api.example.com/oauth/access_token",
    "api.example.com",
);
let client = ApiClient::new(config)?;

// unsigned call: the consumer key rides along as ?api_key=...
let resp = client
    .get("/track/details", None, &[("trackid", "123")], None)
    .await?;
println!("status {}: {}", resp.status, resp.body);
# Ok(())
# }
```

## Acquiring and using an access token

```no_run
use oauth1_api_client::{ApiClient, ClientConfig};

# async fn run() -> oauth1_api_client::Result<()> {
let config = ClientConfig::new(
    "[CONSUMER_KEY]",
    "[CONSUMER_SECRET]",
    "https://api.example.com/oauth/request_token",
    "https://api.example.com/oauth/access_token",
    "api.example.com",
)
.with_callback_url("https://client.example.com/callback");
let client = ApiClient::new(config)?;

// step 1: temporary credentials
let request_token = client.request_token(&[]).await?;
println!("please authorize at: {}", request_token.authorize_url);

// step 2: the user authorizes and the verifier comes back

// step 3: exchange for an access token and call with it
let access = client
    .access_token(&request_token.token, &request_token.token_secret, "[VERIFIER]")
    .await?;
let me = client
    .auth(&access.token, &access.token_secret)
    .get("/user/profile", None, &[])
    .await?;
println!("{}", me.body);
# Ok(())
# }
```
*/
mod client;
mod config;
mod credentials;
mod error;
mod request;
mod response;
mod signer;
mod token;
mod urls;

// exposed to external program
pub use client::{ApiClient, Authed};
pub use config::{ClientConfig, SignatureScheme};
pub use credentials::Credentials;
pub use error::{Error, Result};
pub use response::{ApiResponse, ResponseExt};
pub use signer::{OAuthParams, Signer};
pub use token::{parse_token_exchange, AccessToken, RequestToken, TokenExchange};
pub use urls::build_api_url;

// exposed constant variables
/// Query parameter identifying the caller on unsigned calls.
pub const API_KEY_PARAM: &str = "api_key";
/// Parameter of the request-token exchange carrying the authorize URL.
pub const LOGIN_URL_KEY: &str = "login_url";
/// Represents `oauth_token`.
pub const OAUTH_TOKEN_KEY: &str = "oauth_token";
/// Represents `oauth_token_secret`.
pub const OAUTH_TOKEN_SECRET_KEY: &str = "oauth_token_secret";

// crate-private constant variables
pub(crate) const OAUTH_KEY_PREFIX: &str = "oauth_";
