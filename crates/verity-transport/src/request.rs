//! Per-request configuration and the response envelope.

use std::collections::BTreeMap;
use std::time::Duration;

use serde_json::Value;

/// Pass-through request options. Interpreted by the transport, not the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestConfig {
    /// Extra request headers.
    pub headers: BTreeMap<String, String>,
    /// Query pairs appended to the URL, in order.
    pub query: Vec<(String, String)>,
    /// Overrides the transport's default timeout for this request.
    pub timeout: Option<Duration>,
    /// Body carried in the config rather than positionally. Only DELETE
    /// sends it; the other verbs take their body as an argument and GET
    /// has none.
    pub data: Option<Value>,
}

impl RequestConfig {
    /// Empty options: no headers, no query, transport timeout, no data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Response envelope returned by every transport call.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    /// Header names are lowercase.
    pub headers: BTreeMap<String, String>,
    /// Decoded body. An empty body is `null`; text that is not JSON is a
    /// JSON string.
    pub data: Value,
}

impl Response {
    /// A `200 OK` response carrying `data` and no headers.
    #[must_use]
    pub const fn ok(data: Value) -> Self {
        Self {
            status: 200,
            headers: BTreeMap::new(),
            data,
        }
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    #[must_use]
    pub fn into_data(self) -> Value {
        self.data
    }
}
