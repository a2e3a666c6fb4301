//! `reqwest`-backed [`Transport`].
//!
//! Status handling is applied to the buffered response: 429 becomes
//! [`TransportError::RateLimited`] (seconds taken from `Retry-After`) and any
//! other non-success becomes [`TransportError::Api`] carrying the body text.
//! Both can be turned off with [`HttpTransport::reject_error_status`], in
//! which case the error body is returned as response data alongside its
//! status.
//!
//! Bodies that are not JSON are returned as a JSON string so that callers
//! still see the payload.

use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode, Url};
use serde_json::Value;
use verity_config::HttpConfig;

use crate::error::TransportError;
use crate::request::{RequestConfig, Response};
use crate::Transport;

/// Used when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// HTTP transport over a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: Option<Url>,
    reject_error_status: bool,
}

impl HttpTransport {
    /// Wrap an existing client. No base URL; error statuses are rejected.
    #[must_use]
    pub const fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: None,
            reject_error_status: true,
        }
    }

    /// Build a client from configuration: user agent, timeouts, default
    /// headers, base URL, and status policy.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Config`] for zero timeouts,
    /// [`TransportError::InvalidHeader`] for unusable default headers,
    /// [`TransportError::InvalidUrl`] for an unparseable base URL, or
    /// [`TransportError::Http`] if the client fails to build.
    pub fn from_config(config: &HttpConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout()?)
            .connect_timeout(config.connect_timeout()?)
            .default_headers(default_headers(&config.headers)?)
            .build()?;

        let mut transport = Self::new(http).reject_error_status(config.reject_error_status);
        if config.is_configured() {
            let base_url = Url::parse(&config.base_url)
                .map_err(|e| TransportError::InvalidUrl(format!("{e} for {}", config.base_url)))?;
            transport = transport.with_base_url(base_url);
        }
        Ok(transport)
    }

    /// Resolve relative request URLs against `base_url`.
    ///
    /// Standard URL joining applies: keep a trailing slash on the base
    /// (`https://host/api/`) to append, and note that a leading slash on the
    /// request path replaces the base path.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Whether non-success statuses are raised as errors (default `true`).
    #[must_use]
    pub const fn reject_error_status(mut self, reject: bool) -> Self {
        self.reject_error_status = reject;
        self
    }

    #[must_use]
    pub const fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    fn resolve(&self, url: &str, query: &[(String, String)]) -> Result<Url, TransportError> {
        let mut resolved = match &self.base_url {
            Some(base) => base.join(url),
            None => Url::parse(url),
        }
        .map_err(|e| TransportError::InvalidUrl(format!("{e} for {url}")))?;

        if !query.is_empty() {
            resolved.query_pairs_mut().extend_pairs(query);
        }
        Ok(resolved)
    }

    async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<Value>,
        config: RequestConfig,
    ) -> Result<Response, TransportError> {
        let target = self.resolve(url, &config.query)?;
        tracing::debug!(%method, url = %target, "sending request");

        let body = if method == Method::DELETE {
            body.or(config.data)
        } else {
            body
        };

        let mut builder = self.http.request(method, target);
        for (name, value) in &config.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        read_response(builder.send().await?, self.reject_error_status).await
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str, config: RequestConfig) -> Result<Response, TransportError> {
        self.execute(Method::GET, url, None, config).await
    }

    async fn post(
        &self,
        url: &str,
        body: Value,
        config: RequestConfig,
    ) -> Result<Response, TransportError> {
        self.execute(Method::POST, url, Some(body), config).await
    }

    async fn put(
        &self,
        url: &str,
        body: Value,
        config: RequestConfig,
    ) -> Result<Response, TransportError> {
        self.execute(Method::PUT, url, Some(body), config).await
    }

    async fn delete(&self, url: &str, config: RequestConfig) -> Result<Response, TransportError> {
        self.execute(Method::DELETE, url, None, config).await
    }
}

fn default_headers(headers: &BTreeMap<String, String>) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| TransportError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| TransportError::InvalidHeader {
            name: name.clone(),
            reason: e.to_string(),
        })?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

/// Buffer the response, apply the status policy, then decode the body.
async fn read_response(
    resp: reqwest::Response,
    reject_error_status: bool,
) -> Result<Response, TransportError> {
    let status = resp.status();
    let headers: BTreeMap<String, String> = resp
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    let bytes = resp.bytes().await?;

    if reject_error_status {
        if let Some(err) = status_error(status, &headers, &bytes) {
            tracing::debug!(status = status.as_u16(), "request rejected by status");
            return Err(err);
        }
    }

    Ok(Response {
        status: status.as_u16(),
        headers,
        data: decode_body(&bytes)?,
    })
}

/// Map a non-success status to its error. `headers` keys are lowercase.
fn status_error(
    status: StatusCode,
    headers: &BTreeMap<String, String>,
    body: &[u8],
) -> Option<TransportError> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Some(TransportError::RateLimited {
            retry_after_secs: retry_after_secs(headers),
        });
    }
    if status.is_success() {
        return None;
    }
    Some(TransportError::Api {
        status: status.as_u16(),
        message: String::from_utf8_lossy(body).into_owned(),
    })
}

fn retry_after_secs(headers: &BTreeMap<String, String>) -> u64 {
    headers
        .get("retry-after")
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

/// Empty (or whitespace-only) bodies decode to `null`. Text that is not JSON
/// becomes a JSON string; only bytes that are not UTF-8 fail.
fn decode_body(bytes: &[u8]) -> Result<Value, TransportError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    if let Ok(value) = serde_json::from_slice(bytes) {
        return Ok(value);
    }
    std::str::from_utf8(bytes)
        .map(|text| Value::String(text.to_string()))
        .map_err(|e| TransportError::Decode(format!("body is neither JSON nor UTF-8: {e}")))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn transport_with_base(base: &str) -> HttpTransport {
        HttpTransport::new(reqwest::Client::new()).with_base_url(Url::parse(base).unwrap())
    }

    fn headers(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[rstest]
    #[case::explicit("120", 120)]
    #[case::padded(" 15 ", 15)]
    #[case::http_date("Wed, 21 Oct 2015 07:28:00 GMT", DEFAULT_RETRY_AFTER_SECS)]
    fn retry_after_is_read_in_seconds(#[case] value: &str, #[case] expected: u64) {
        assert_eq!(retry_after_secs(&headers(&[("retry-after", value)])), expected);
    }

    #[test]
    fn retry_after_defaults_when_missing() {
        assert_eq!(retry_after_secs(&BTreeMap::new()), DEFAULT_RETRY_AFTER_SECS);
    }

    #[test]
    fn rate_limit_wins_over_generic_error() {
        let err = status_error(
            StatusCode::TOO_MANY_REQUESTS,
            &headers(&[("retry-after", "30")]),
            b"slow down",
        );
        assert!(matches!(
            err,
            Some(TransportError::RateLimited {
                retry_after_secs: 30
            })
        ));
    }

    #[test]
    fn error_status_carries_body_text() {
        let err = status_error(StatusCode::BAD_GATEWAY, &BTreeMap::new(), b"upstream down");
        match err {
            Some(TransportError::Api { status, message }) => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream down");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[rstest]
    #[case(StatusCode::OK)]
    #[case(StatusCode::CREATED)]
    #[case(StatusCode::NO_CONTENT)]
    fn success_status_is_not_an_error(#[case] status: StatusCode) {
        assert!(status_error(status, &BTreeMap::new(), b"").is_none());
    }

    #[tokio::test]
    async fn read_response_collects_status_headers_and_json() {
        let resp = reqwest::Response::from(
            ::http::Response::builder()
                .status(201)
                .header("X-Request-Id", "r-1")
                .body(r#"{"id": 5}"#)
                .unwrap(),
        );
        let response = read_response(resp, true).await.unwrap();
        assert_eq!(response.status, 201);
        assert_eq!(response.header("x-request-id"), Some("r-1"));
        assert_eq!(response.data, json!({"id": 5}));
    }

    #[tokio::test]
    async fn read_response_rejects_after_buffering() {
        let resp = reqwest::Response::from(
            ::http::Response::builder()
                .status(429)
                .header("Retry-After", "7")
                .body("")
                .unwrap(),
        );
        assert!(matches!(
            read_response(resp, true).await,
            Err(TransportError::RateLimited { retry_after_secs: 7 })
        ));
    }

    #[tokio::test]
    async fn read_response_keeps_error_status_when_tolerated() {
        let resp = reqwest::Response::from(
            ::http::Response::builder()
                .status(500)
                .body(r#"{"error": "boom"}"#)
                .unwrap(),
        );
        let response = read_response(resp, false).await.unwrap();
        assert_eq!(response.status, 500);
        assert_eq!(response.data, json!({"error": "boom"}));
    }

    #[test]
    fn empty_body_decodes_to_null() {
        assert_eq!(decode_body(b"").unwrap(), Value::Null);
        assert_eq!(decode_body(b" \n").unwrap(), Value::Null);
    }

    #[test]
    fn text_body_decodes_to_string() {
        assert_eq!(decode_body(b"Deleted").unwrap(), json!("Deleted"));
        assert_eq!(decode_body(b"<html>").unwrap(), json!("<html>"));
    }

    #[test]
    fn non_utf8_body_is_decode_error() {
        assert!(matches!(
            decode_body(&[0xff, 0xfe, 0x00]),
            Err(TransportError::Decode(_))
        ));
    }

    #[test]
    fn relative_url_joins_base() {
        let transport = transport_with_base("https://api.example.com/v1/");
        let url = transport.resolve("users/5", &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/users/5");
    }

    #[test]
    fn absolute_url_ignores_base() {
        let transport = transport_with_base("https://api.example.com/v1/");
        let url = transport.resolve("https://other.example.com/x", &[]).unwrap();
        assert_eq!(url.as_str(), "https://other.example.com/x");
    }

    #[test]
    fn relative_url_without_base_is_invalid() {
        let transport = HttpTransport::new(reqwest::Client::new());
        assert!(matches!(
            transport.resolve("/users", &[]),
            Err(TransportError::InvalidUrl(_))
        ));
    }

    #[test]
    fn query_pairs_are_appended() {
        let transport = transport_with_base("https://api.example.com/");
        let query = vec![
            ("page".to_string(), "2".to_string()),
            ("q".to_string(), "a b".to_string()),
        ];
        let url = transport.resolve("search?lang=en", &query).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/search?lang=en&page=2&q=a+b"
        );
    }

    #[test]
    fn from_config_applies_base_url_and_policy() {
        let config = HttpConfig {
            base_url: "https://api.example.com/".into(),
            reject_error_status: false,
            ..HttpConfig::default()
        };
        let transport = HttpTransport::from_config(&config).unwrap();
        assert_eq!(
            transport.base_url().map(Url::as_str),
            Some("https://api.example.com/")
        );
        assert!(!transport.reject_error_status);
    }

    #[test]
    fn from_config_rejects_bad_header() {
        let mut config = HttpConfig::default();
        config.headers.insert("bad header".into(), "x".into());
        assert!(matches!(
            HttpTransport::from_config(&config),
            Err(TransportError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn from_config_rejects_zero_timeout() {
        let config = HttpConfig {
            timeout_secs: 0,
            ..HttpConfig::default()
        };
        assert!(matches!(
            HttpTransport::from_config(&config),
            Err(TransportError::Config(_))
        ));
    }
}
