use std::borrow::Cow;

use http::Method;
use oauth1_request::signature_method::{Plaintext, SignatureMethod};
use oauth1_request::signer::Signer as OAuthSigner;
use oauth1_request::{HmacSha1, Options};
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use url::Url;

use crate::config::SignatureScheme;
use crate::credentials::Credentials;
use crate::OAUTH_KEY_PREFIX;

/// Generate a fresh alphanumeric nonce of the given length.
pub(crate) fn nonce(size: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(size)
        .map(char::from)
        .collect()
}

/// Computes the `Authorization` header for one signed request.
///
/// Borrows the consumer pair from the configuration and, for token-signed
/// calls, the per-call credentials. The signature itself comes from the
/// `oauth1-request` engine; this type only feeds it the request parameters
/// in the order it requires.
#[derive(Debug)]
pub struct Signer<'a> {
    consumer_key: &'a str,
    consumer_secret: &'a str,
    token: Option<&'a Credentials>,
    scheme: SignatureScheme,
    params: OAuthParams<'a>,
}

impl<'a> Signer<'a> {
    pub fn new(
        consumer_key: &'a str,
        consumer_secret: &'a str,
        token: Option<&'a Credentials>,
        scheme: SignatureScheme,
        params: OAuthParams<'a>,
    ) -> Self {
        Signer {
            consumer_key,
            consumer_secret,
            token,
            scheme,
            params,
        }
    }

    /// Build the `Authorization` header value for the request.
    ///
    /// `payload` is the parameter string covered by the signature: the URL
    /// query when `is_url_query`, otherwise a form-encoded body.
    pub fn authorization(
        &self,
        method: &Method,
        url: Url,
        payload: &str,
        is_url_query: bool,
    ) -> String {
        match self.scheme {
            SignatureScheme::HmacSha1 => {
                self.sign_with(HmacSha1, method, url, payload, is_url_query)
            }
            SignatureScheme::Plaintext => {
                self.sign_with(Plaintext, method, url, payload, is_url_query)
            }
        }
    }

    fn sign_with<M>(
        &self,
        signature_method: M,
        method: &Method,
        url: Url,
        payload: &str,
        is_url_query: bool,
    ) -> String
    where
        M: SignatureMethod,
    {
        let token_secret = self.token.map(|credentials| credentials.secret());
        let options = self
            .params
            .build_options(self.token.map(|credentials| credentials.token()));

        // destructure the payload and bring it into canonical order
        let parsed: Vec<(Cow<str>, Cow<str>)> = url::form_urlencoded::parse(payload.as_bytes())
            .into_iter()
            .collect();
        let marker = vec![(Cow::from(OAUTH_KEY_PREFIX), Cow::from(""))];
        let mut entries = [parsed, marker].concat();
        entries.sort();

        // the engine wants non-oauth parameters fed around the oauth_* block
        let mut divided = entries.splitn(2, |(key, _)| key == &OAUTH_KEY_PREFIX);
        let before_oauth = divided.next().unwrap();
        let after_oauth = divided.next().unwrap_or_default();

        let mut signer = if is_url_query {
            OAuthSigner::with_signature_method(
                signature_method,
                method.as_str(),
                url,
                self.consumer_secret,
                token_secret,
            )
        } else {
            OAuthSigner::form_with_signature_method(
                signature_method,
                method.as_str(),
                url,
                self.consumer_secret,
                token_secret,
            )
        };

        for (key, value) in before_oauth {
            if !key.starts_with(OAUTH_KEY_PREFIX) {
                signer.parameter(key, value);
            }
        }
        let mut signer = signer.oauth_parameters(self.consumer_key, &options);
        for (key, value) in after_oauth {
            if !key.starts_with(OAUTH_KEY_PREFIX) {
                signer.parameter(key, value);
            }
        }

        signer.finish().authorization
    }
}

/// Per-request oauth parameters handed to the engine.
#[derive(Debug, Clone)]
pub struct OAuthParams<'a> {
    callback: Option<Cow<'a, str>>,
    nonce: Option<String>,
    timestamp: Option<u64>,
    verifier: Option<Cow<'a, str>>,
    version: bool,
}

impl Default for OAuthParams<'_> {
    fn default() -> Self {
        OAuthParams {
            callback: None,
            nonce: None,
            timestamp: None,
            verifier: None,
            // advertise protocol version 1.0 unless a caller opts out
            version: true,
        }
    }
}

impl<'a> OAuthParams<'a> {
    pub fn new() -> Self {
        Default::default()
    }

    /// Set the `oauth_callback` value.
    pub fn callback<T>(self, callback: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        OAuthParams {
            callback: Some(callback.into()),
            ..self
        }
    }

    /// Pin the `oauth_nonce` value; when unset the engine generates one.
    pub fn nonce(self, nonce: impl Into<String>) -> Self {
        OAuthParams {
            nonce: Some(nonce.into()),
            ..self
        }
    }

    /// Pin the `oauth_timestamp` value; when unset the engine uses the
    /// current time.
    pub fn timestamp(self, timestamp: u64) -> Self {
        OAuthParams {
            timestamp: Some(timestamp),
            ..self
        }
    }

    /// Set the `oauth_verifier` value.
    pub fn verifier<T>(self, verifier: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        OAuthParams {
            verifier: Some(verifier.into()),
            ..self
        }
    }

    /// Whether to send `oauth_version=1.0`.
    pub fn version(self, version: bool) -> Self {
        OAuthParams { version, ..self }
    }

    fn build_options<'s>(&'s self, token: Option<&'s str>) -> Options<'s> {
        let mut options = Options::new();

        // NOTE: items must be added in alphabetical order
        if let Some(ref callback) = self.callback {
            options.callback(callback.as_ref());
        }
        if let Some(ref nonce) = self.nonce {
            options.nonce(nonce.as_str());
        }
        if let Some(timestamp) = self.timestamp {
            options.timestamp(timestamp);
        }
        if let Some(token) = token {
            options.token(token);
        }
        if let Some(ref verifier) = self.verifier {
            options.verifier(verifier.as_ref());
        }
        options.version(self.version);

        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_signature(auth_header: &str) -> String {
        let content = auth_header.strip_prefix("OAuth ").unwrap();
        let mapped_header = content
            .split(',')
            .map(|item| item.splitn(2, '=').collect::<Vec<&str>>())
            .filter(|v| v.len() == 2)
            .map(|v| (v[0], v[1]))
            .collect::<Vec<(&str, &str)>>();
        let sig_content = mapped_header.iter().find(|(k, _)| k == &"oauth_signature");
        percent_encoding::percent_decode_str(sig_content.unwrap().1)
            .decode_utf8_lossy()
            .trim_matches('"')
            .to_string()
    }

    #[test]
    fn nonce_has_requested_length() {
        assert_eq!(nonce(32).len(), 32);
        assert_eq!(nonce(8).len(), 8);
        assert!(nonce(16).chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn consecutive_nonces_differ() {
        assert_ne!(nonce(32), nonce(32));
    }

    #[test]
    fn sign_post_without_token() {
        // temporary-credential request from RFC 5849
        let params = OAuthParams::new()
            .nonce("wIjqoS")
            .timestamp(137_131_200)
            .callback("http://printer.example.com/ready")
            .version(false);
        let signer = Signer::new(
            "dpf43f3p2l4k3l03",
            "kd94hf93k423kf44",
            None,
            SignatureScheme::HmacSha1,
            params,
        );
        let url = Url::parse("https://photos.example.net/initiate").unwrap();
        let header = signer.authorization(&Method::POST, url, "", false);
        assert_eq!(extract_signature(&header), "74KNZJeDHnMBp0EMJ9ZHt/XKycU=");
    }

    #[test]
    fn sign_get_with_url_query() {
        // resource request from RFC 5849
        let credentials = Credentials::new("nnch734d00sl2jdk", "pfkkdhi9sl3r4s00");
        let params = OAuthParams::new()
            .nonce("chapoH")
            .timestamp(137_131_202)
            .version(false);
        let signer = Signer::new(
            "dpf43f3p2l4k3l03",
            "kd94hf93k423kf44",
            Some(&credentials),
            SignatureScheme::HmacSha1,
            params,
        );
        let url = Url::parse("http://photos.example.net/photos").unwrap();
        let header = signer.authorization(
            &Method::GET,
            url,
            "file=vacation.jpg&size=original",
            true,
        );
        assert_eq!(extract_signature(&header), "MdpQcU8iPSUjWoN/UDMsK2sui9I=");
    }

    #[test]
    fn sign_post_with_form_payload() {
        // signature walkthrough from the Twitter developer documentation
        let credentials = Credentials::new(
            "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
            "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
        );
        let params = OAuthParams::new()
            .nonce("kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg")
            .timestamp(1_318_622_958);
        let signer = Signer::new(
            "xvz1evFS4wEEPTGEFPHBog",
            "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
            Some(&credentials),
            SignatureScheme::HmacSha1,
            params,
        );
        let url = Url::parse("https://api.twitter.com/1.1/statuses/update.json").unwrap();
        let payload = serde_urlencoded::to_string(&[
            ("include_entities", "true"),
            (
                "status",
                "Hello Ladies + Gentlemen, a signed OAuth request!",
            ),
        ])
        .unwrap();
        let header = signer.authorization(&Method::POST, url, &payload, false);
        assert_eq!(extract_signature(&header), "hCtSmYh+iHYCEqBWrE7C7hYmtUk=");
    }

    #[test]
    fn plaintext_signature_is_the_secret_pair() {
        let credentials = Credentials::new("nnch734d00sl2jdk", "pfkkdhi9sl3r4s00");
        let signer = Signer::new(
            "dpf43f3p2l4k3l03",
            "kd94hf93k423kf44",
            Some(&credentials),
            SignatureScheme::Plaintext,
            OAuthParams::new().nonce("fixed").timestamp(1),
        );
        let url = Url::parse("https://photos.example.net/photos").unwrap();
        let header = signer.authorization(&Method::GET, url, "", false);
        assert_eq!(
            extract_signature(&header),
            "kd94hf93k423kf44&pfkkdhi9sl3r4s00"
        );
    }
}
