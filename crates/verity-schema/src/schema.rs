//! The schema capability consumed by the validating client.

use std::fmt;

use serde_json::Value;

use crate::error::SchemaError;

/// Something that can check a JSON value against an expected shape.
///
/// `parse` returns the typed output on success. A non-conforming value must be
/// reported as [`SchemaError::Validation`] listing every violation; any other
/// variant signals a defect in the schema and is never recovered from.
pub trait Schema: Send + Sync {
    /// Typed value produced by a successful parse.
    type Output;

    /// Validate `value` and produce the typed output.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Validation`] if `value` does not conform, or
    /// another [`SchemaError`] variant if the schema itself is broken.
    fn parse(&self, value: &Value) -> Result<Self::Output, SchemaError>;
}

impl<S: Schema + ?Sized> Schema for &S {
    type Output = S::Output;

    fn parse(&self, value: &Value) -> Result<Self::Output, SchemaError> {
        (**self).parse(value)
    }
}

/// A [`Schema`] backed by a closure. Built with [`from_fn`].
#[derive(Clone)]
pub struct FnSchema<F> {
    f: F,
}

/// Wrap a closure as a [`Schema`].
///
/// ```
/// use serde_json::{Value, json};
/// use verity_schema::{Issue, Schema, SchemaError, ValidationError, from_fn};
///
/// let even = from_fn(|value: &Value| match value.as_u64() {
///     Some(n) if n % 2 == 0 => Ok(n),
///     _ => Err(SchemaError::Validation(ValidationError::new(vec![Issue::new(
///         "",
///         "expected an even number",
///     )]))),
/// });
///
/// assert_eq!(even.parse(&json!(4)).unwrap(), 4);
/// assert!(even.parse(&json!(3)).unwrap_err().is_validation());
/// ```
pub const fn from_fn<F, T>(f: F) -> FnSchema<F>
where
    F: Fn(&Value) -> Result<T, SchemaError> + Send + Sync,
{
    FnSchema { f }
}

impl<F, T> Schema for FnSchema<F>
where
    F: Fn(&Value) -> Result<T, SchemaError> + Send + Sync,
{
    type Output = T;

    fn parse(&self, value: &Value) -> Result<T, SchemaError> {
        (self.f)(value)
    }
}

impl<F> fmt::Debug for FnSchema<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSchema").finish_non_exhaustive()
    }
}
