//! # verity-client
//!
//! Validating HTTP client for Verity.
//!
//! [`ValidatingClient`] wraps a [`Transport`] and checks every response
//! against a schema supplied at the call site:
//!
//! | Operation | Verb | Body | Schema |
//! |-----------|------|------|--------|
//! | [`fetch`](ValidatingClient::fetch) | GET | none | required |
//! | [`create`](ValidatingClient::create) | POST | required | required |
//! | [`replace`](ValidatingClient::replace) | PUT | required | required |
//! | [`remove`](ValidatingClient::remove) | DELETE | optional, sent in `RequestConfig::data` | optional |
//!
//! Validation is advisory. A payload that does not match its schema is still
//! returned (as [`Validated::Unvalidated`]) and the observer receives a
//! [`ValidationFailure`] describing every violation. Transport failures and
//! defective schemas are returned as [`ClientError`].
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use serde_json::json;
//! use verity_client::{CompiledSchema, Fetch, HttpTransport, ValidatingClient, observer};
//! use verity_config::VerityConfig;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = VerityConfig::load()?;
//! let transport = Arc::new(HttpTransport::from_config(&config.http)?);
//! let client = ValidatingClient::new(transport, observer::log_failure);
//!
//! let user = CompiledSchema::new(&json!({
//!     "type": "object",
//!     "properties": { "id": { "type": "number" } },
//!     "required": ["id"]
//! }))?;
//! let _response = client.fetch(Fetch::new("/users/5", &user)).await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod failure;
pub mod observer;
mod request;
mod validated;

pub use client::ValidatingClient;
pub use error::ClientError;
pub use failure::{Method, ValidationFailure};
pub use observer::Observer;
pub use request::{Create, Fetch, NoSchema, Remove, Replace};
pub use validated::Validated;

pub use verity_schema::{
    CompiledSchema, FnSchema, Issue, Schema, SchemaError, SchemaRegistry, TypedSchema,
    ValidationError, from_fn,
};
pub use verity_transport::{HttpTransport, RequestConfig, Response, Transport, TransportError};
