//! # verity-transport
//!
//! The HTTP transport capability used by the Verity validating client, and a
//! `reqwest`-backed implementation of it.
//!
//! A [`Transport`] performs one HTTP call per verb and returns a [`Response`]
//! envelope whose `data` field holds the decoded JSON body. Network failures
//! and (by default) non-success statuses are raised as [`TransportError`].
//! Retries, caching, and authentication are not handled here.

mod error;
mod http;
mod request;

pub use error::TransportError;
pub use http::HttpTransport;
pub use request::{RequestConfig, Response};

use std::future::Future;

use serde_json::Value;

/// Asynchronous HTTP capability, one method per supported verb.
///
/// Implementations must be safe to share between concurrent calls.
pub trait Transport: Send + Sync {
    fn get(
        &self,
        url: &str,
        config: RequestConfig,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send;

    fn post(
        &self,
        url: &str,
        body: Value,
        config: RequestConfig,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send;

    fn put(
        &self,
        url: &str,
        body: Value,
        config: RequestConfig,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send;

    /// DELETE has no positional body; a body travels in [`RequestConfig::data`].
    fn delete(
        &self,
        url: &str,
        config: RequestConfig,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send;
}
