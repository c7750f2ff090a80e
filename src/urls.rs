use url::Url;

use crate::error::{Error, Result};
use crate::API_KEY_PARAM;

const PAGE_PARAM: &str = "page";

/// Assemble the HTTPS URL for a verb call.
///
/// Caller query pairs are preserved as given, a page token becomes the
/// `page` parameter, and the consumer key is appended as `api_key` only for
/// unsigned calls (`api_secret` absent). Signed calls authenticate through
/// the `Authorization` header, so the key never appears in their URL.
pub fn build_api_url(
    api_key: &str,
    api_secret: Option<&str>,
    host: &str,
    path: &str,
    page: Option<&str>,
    query: &[(&str, &str)],
) -> Result<Url> {
    if host.is_empty() {
        return Err(Error::Configuration("api host name is empty".to_string()));
    }
    if path.is_empty() {
        return Err(Error::Configuration("request path is empty".to_string()));
    }
    let mut url = Url::parse(&format!("https://{}", host))
        .map_err(|e| Error::Configuration(format!("invalid api host name {:?}: {}", host, e)))?;
    if url.host_str().is_none() {
        return Err(Error::Configuration(format!(
            "invalid api host name {:?}",
            host
        )));
    }
    url.set_path(path);
    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
        if let Some(page) = page {
            pairs.append_pair(PAGE_PARAM, page);
        }
        if !api_key.is_empty() && api_secret.is_none() {
            pairs.append_pair(API_KEY_PARAM, api_key);
        }
    }
    // query_pairs_mut leaves an empty query behind when nothing was added
    if let Some("") = url.query() {
        url.set_query(None);
    }
    Ok(url)
}
