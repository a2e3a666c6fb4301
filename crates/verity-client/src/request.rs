//! Per-verb request options.
//!
//! Each option set is built, handed to one call, and dropped with it. The
//! schema is borrowed for the duration of the call only.

use serde::Serialize;
use serde_json::Value;
use verity_schema::{Schema, SchemaError};
use verity_transport::RequestConfig;

/// Options for a GET.
#[derive(Debug, Clone)]
pub struct Fetch<'s, S> {
    pub url: String,
    pub schema: &'s S,
    pub config: RequestConfig,
}

impl<'s, S: Schema> Fetch<'s, S> {
    /// GET `url`, validating the response with `schema`.
    pub fn new(url: impl Into<String>, schema: &'s S) -> Self {
        Self {
            url: url.into(),
            schema,
            config: RequestConfig::default(),
        }
    }

    /// Replace the pass-through transport options.
    #[must_use]
    pub fn config(mut self, config: RequestConfig) -> Self {
        self.config = config;
        self
    }
}

/// Options for a POST.
#[derive(Debug, Clone)]
pub struct Create<'s, S> {
    pub url: String,
    pub body: Value,
    pub schema: &'s S,
    pub config: RequestConfig,
}

impl<'s, S: Schema> Create<'s, S> {
    /// POST `body` to `url`, validating the response with `schema`.
    pub fn new(url: impl Into<String>, body: Value, schema: &'s S) -> Self {
        Self {
            url: url.into(),
            body,
            schema,
            config: RequestConfig::default(),
        }
    }

    /// Serialize any `Serialize` type as the body.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if `body` cannot be represented as JSON.
    pub fn json<B: Serialize>(
        url: impl Into<String>,
        body: &B,
        schema: &'s S,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::new(url, serde_json::to_value(body)?, schema))
    }

    /// Replace the pass-through transport options.
    #[must_use]
    pub fn config(mut self, config: RequestConfig) -> Self {
        self.config = config;
        self
    }
}

/// Options for a PUT.
#[derive(Debug, Clone)]
pub struct Replace<'s, S> {
    pub url: String,
    pub body: Value,
    pub schema: &'s S,
    pub config: RequestConfig,
}

impl<'s, S: Schema> Replace<'s, S> {
    /// PUT `body` to `url`, validating the response with `schema`.
    pub fn new(url: impl Into<String>, body: Value, schema: &'s S) -> Self {
        Self {
            url: url.into(),
            body,
            schema,
            config: RequestConfig::default(),
        }
    }

    /// Serialize any `Serialize` type as the body.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if `body` cannot be represented as JSON.
    pub fn json<B: Serialize>(
        url: impl Into<String>,
        body: &B,
        schema: &'s S,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::new(url, serde_json::to_value(body)?, schema))
    }

    /// Replace the pass-through transport options.
    #[must_use]
    pub fn config(mut self, config: RequestConfig) -> Self {
        self.config = config;
        self
    }
}

/// Options for a DELETE. Body and schema are both optional.
///
/// ```
/// use serde_json::json;
/// use verity_client::Remove;
///
/// let remove = Remove::new("/x").body(json!({"reason": "stale"}));
/// assert!(remove.schema.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Remove<'s, S = NoSchema> {
    pub url: String,
    pub body: Option<Value>,
    pub schema: Option<&'s S>,
    pub config: RequestConfig,
}

impl Remove<'static, NoSchema> {
    /// DELETE `url` with no body and no schema.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: None,
            schema: None,
            config: RequestConfig::default(),
        }
    }
}

impl<'s, S> Remove<'s, S> {
    /// Validate the response against `schema`.
    pub fn schema<'t, T: Schema>(self, schema: &'t T) -> Remove<'t, T> {
        Remove {
            url: self.url,
            body: self.body,
            schema: Some(schema),
            config: self.config,
        }
    }

    /// Send `body`; it is carried to the transport in `RequestConfig::data`.
    #[must_use]
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Replace the pass-through transport options.
    #[must_use]
    pub fn config(mut self, config: RequestConfig) -> Self {
        self.config = config;
        self
    }
}

/// Schema type of a [`Remove`] that has no schema. Never consulted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSchema;

impl Schema for NoSchema {
    type Output = Value;

    fn parse(&self, value: &Value) -> Result<Value, SchemaError> {
        Ok(value.clone())
    }
}
