//! Schemas generated from Rust types.

use std::fmt;
use std::marker::PhantomData;

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::compiled::CompiledSchema;
use crate::error::SchemaError;
use crate::schema::Schema;

/// Validates against the schema `schemars` derives for `T`, then decodes into `T`.
///
/// Validation runs first so a non-conforming payload reports every violation
/// rather than serde's first-error-only message.
pub struct TypedSchema<T> {
    compiled: CompiledSchema,
    _output: PhantomData<fn() -> T>,
}

impl<T: JsonSchema + DeserializeOwned> TypedSchema<T> {
    /// # Errors
    ///
    /// Returns [`SchemaError::Compile`] if the derived schema cannot be compiled.
    pub fn new() -> Result<Self, SchemaError> {
        Ok(Self {
            compiled: CompiledSchema::for_type::<T>()?,
            _output: PhantomData,
        })
    }

    #[must_use]
    pub const fn compiled(&self) -> &CompiledSchema {
        &self.compiled
    }
}

impl<T> Schema for TypedSchema<T>
where
    T: DeserializeOwned,
{
    type Output = T;

    fn parse(&self, value: &Value) -> Result<T, SchemaError> {
        self.compiled.validate(value)?;
        T::deserialize(value).map_err(|e| SchemaError::Decode(e.to_string()))
    }
}

impl<T> Clone for TypedSchema<T> {
    fn clone(&self) -> Self {
        Self {
            compiled: self.compiled.clone(),
            _output: PhantomData,
        }
    }
}

impl<T> fmt::Debug for TypedSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedSchema")
            .field("type", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}
