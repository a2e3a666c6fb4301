//! Validation-failure observers.
//!
//! An observer is any `Fn(ValidationFailure) + Send + Sync`. It runs
//! synchronously inside the failing call and cannot change its outcome. To
//! report asynchronously, spawn from inside the closure; the client never
//! waits for spawned work.

use std::sync::Arc;

use crate::failure::ValidationFailure;

/// Shared observer callback.
pub type Observer = Arc<dyn Fn(ValidationFailure) + Send + Sync>;

/// Observer that reports each failure through `tracing`: one `warn` event per
/// failure and one `debug` event per issue.
#[allow(clippy::needless_pass_by_value)]
pub fn log_failure(failure: ValidationFailure) {
    tracing::warn!(
        method = %failure.method,
        url = %failure.url,
        issues = failure.error.len(),
        "response failed schema validation"
    );
    for issue in &failure.error {
        tracing::debug!(
            method = %failure.method,
            url = %failure.url,
            path = %issue.path,
            message = %issue.message,
            "schema violation"
        );
    }
}
