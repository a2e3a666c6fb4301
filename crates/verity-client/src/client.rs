//! The validating dispatcher.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use verity_schema::{Schema, SchemaError};
use verity_transport::{Response, Transport, TransportError};

use crate::error::ClientError;
use crate::failure::{Method, ValidationFailure};
use crate::observer::Observer;
use crate::request::{Create, Fetch, Remove, Replace};
use crate::validated::Validated;

/// HTTP client that checks every response against a caller-supplied schema.
///
/// A response that fails validation is not an error: the observer is notified
/// once with a [`ValidationFailure`] and the raw payload is returned as
/// [`Validated::Unvalidated`]. Transport failures and schema defects are
/// returned as [`ClientError`].
///
/// The client holds no state besides its two collaborators, so clones and
/// concurrent calls are independent.
pub struct ValidatingClient<T> {
    transport: Arc<T>,
    observer: Observer,
}

impl<T: Transport> ValidatingClient<T> {
    /// Build a client over a shared transport. The client never opens or
    /// closes the transport; its lifecycle stays with the caller.
    pub fn new<F>(transport: Arc<T>, observer: F) -> Self
    where
        F: Fn(ValidationFailure) + Send + Sync + 'static,
    {
        Self::with_observer(transport, Arc::new(observer))
    }

    /// Build a client with an already-shared observer.
    #[must_use]
    pub fn with_observer(transport: Arc<T>, observer: Observer) -> Self {
        Self {
            transport,
            observer,
        }
    }

    /// The shared transport this client sends through.
    #[must_use]
    pub const fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// GET `url` and validate the response.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the request fails and
    /// [`ClientError::Schema`] if the schema is defective.
    pub async fn fetch<S: Schema>(
        &self,
        request: Fetch<'_, S>,
    ) -> Result<Validated<S::Output>, ClientError> {
        let Fetch {
            url,
            schema,
            config,
        } = request;
        let call = self.transport.get(&url, config);
        self.dispatch(Method::Get, &url, schema, call).await
    }

    /// POST `body` to `url` and validate the response.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch`].
    pub async fn create<S: Schema>(
        &self,
        request: Create<'_, S>,
    ) -> Result<Validated<S::Output>, ClientError> {
        let Create {
            url,
            body,
            schema,
            config,
        } = request;
        let call = self.transport.post(&url, body, config);
        self.dispatch(Method::Post, &url, schema, call).await
    }

    /// PUT `body` to `url` and validate the response.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch`].
    pub async fn replace<S: Schema>(
        &self,
        request: Replace<'_, S>,
    ) -> Result<Validated<S::Output>, ClientError> {
        let Replace {
            url,
            body,
            schema,
            config,
        } = request;
        let call = self.transport.put(&url, body, config);
        self.dispatch(Method::Put, &url, schema, call).await
    }

    /// DELETE `url`. A body is carried in [`RequestConfig::data`](verity_transport::RequestConfig::data),
    /// replacing any value already there. Without a schema the response is
    /// discarded and `None` is returned.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch`].
    pub async fn remove<S: Schema>(
        &self,
        request: Remove<'_, S>,
    ) -> Result<Option<Validated<S::Output>>, ClientError> {
        let Remove {
            url,
            body,
            schema,
            mut config,
        } = request;
        if body.is_some() {
            config.data = body;
        }

        let data = self
            .send(Method::Delete, &url, self.transport.delete(&url, config))
            .await?;
        match schema {
            Some(schema) => self.check(Method::Delete, &url, schema, data).map(Some),
            None => Ok(None),
        }
    }

    async fn dispatch<S: Schema>(
        &self,
        method: Method,
        url: &str,
        schema: &S,
        call: impl Future<Output = Result<Response, TransportError>>,
    ) -> Result<Validated<S::Output>, ClientError> {
        let data = self.send(method, url, call).await?;
        self.check(method, url, schema, data)
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        call: impl Future<Output = Result<Response, TransportError>>,
    ) -> Result<Value, ClientError> {
        tracing::debug!(%method, url, "dispatching request");
        Ok(call.await?.data)
    }

    /// Only [`SchemaError::Validation`] is recovered; every other schema error propagates.
    fn check<S: Schema>(
        &self,
        method: Method,
        url: &str,
        schema: &S,
        data: Value,
    ) -> Result<Validated<S::Output>, ClientError> {
        match schema.parse(&data) {
            Ok(value) => Ok(Validated::Valid(value)),
            Err(SchemaError::Validation(error)) => {
                tracing::debug!(
                    %method,
                    url,
                    issues = error.len(),
                    "response failed validation, returning raw payload"
                );
                (self.observer)(ValidationFailure {
                    url: url.to_string(),
                    method,
                    error,
                });
                Ok(Validated::Unvalidated(data))
            }
            Err(other) => Err(ClientError::Schema(other)),
        }
    }
}

impl<T> Clone for ValidatingClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            observer: Arc::clone(&self.observer),
        }
    }
}

impl<T> fmt::Debug for ValidatingClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatingClient").finish_non_exhaustive()
    }
}
