use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Response;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Outcome of a successful call: status, parsed JSON body, headers.
#[derive(Debug)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
    pub headers: HeaderMap,
}

pub(crate) struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub text: String,
}

/// Read the body and classify the transport outcome.
///
/// Body-read failures become [`Error::Transport`] with the already-received
/// headers attached; non-2xx statuses become [`Error::HttpStatus`] carrying
/// the unparsed body.
pub(crate) async fn read_classified(response: Response) -> Result<RawResponse> {
    let status = response.status();
    let headers = response.headers().clone();
    let text = match response.text().await {
        Ok(text) => text,
        Err(source) => return Err(Error::transport_with_headers(source, headers)),
    };
    if !status.is_success() {
        return Err(Error::HttpStatus {
            status: status.as_u16(),
            body: text,
        });
    }
    Ok(RawResponse {
        status: status.as_u16(),
        headers,
        text,
    })
}

fn parse_json_body(raw: RawResponse) -> Result<ApiResponse> {
    let body = if raw.text.is_empty() {
        Value::Object(Map::new())
    } else {
        serde_json::from_str(&raw.text)?
    };
    Ok(ApiResponse {
        status: raw.status,
        body,
        headers: raw.headers,
    })
}

/// Add `normalize` to `reqwest::Response`.
// this trait is sealed
#[async_trait]
pub trait ResponseExt: private::Sealed {
    /// Classify the response into an [`ApiResponse`] or a typed failure.
    async fn normalize(self) -> Result<ApiResponse>;
}

#[async_trait]
impl ResponseExt for Response {
    async fn normalize(self) -> Result<ApiResponse> {
        parse_json_body(read_classified(self).await?)
    }
}

mod private {
    pub trait Sealed {}
    impl Sealed for reqwest::Response {}
}
