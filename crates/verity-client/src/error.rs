//! Client error types.

use thiserror::Error;
use verity_schema::SchemaError;
use verity_transport::TransportError;

/// Failures a validating call can return.
///
/// Validation failures never appear here; they are reported to the observer
/// and the raw payload is returned instead.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The transport failed; passed through unchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The schema itself is defective (compile, decode, or lookup failure).
    #[error("schema error: {0}")]
    Schema(SchemaError),
}
