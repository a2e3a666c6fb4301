//! Outcome of a validated call.

use serde::Serialize;
use serde_json::Value;

/// Either the schema's typed output or, when validation failed, the raw payload.
///
/// The `Unvalidated` case is not an error: the observer has already been told
/// about the mismatch, and the payload is handed back as a best-effort fallback.
#[derive(Debug, Clone, PartialEq)]
pub enum Validated<T> {
    Valid(T),
    Unvalidated(Value),
}

impl<T> Validated<T> {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The typed value, discarding a raw fallback.
    #[must_use]
    pub fn valid(self) -> Option<T> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Unvalidated(_) => None,
        }
    }

    #[must_use]
    pub const fn as_valid(&self) -> Option<&T> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Unvalidated(_) => None,
        }
    }

    /// The raw payload, if validation failed.
    #[must_use]
    pub const fn raw(&self) -> Option<&Value> {
        match self {
            Self::Valid(_) => None,
            Self::Unvalidated(raw) => Some(raw),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Validated<U> {
        match self {
            Self::Valid(value) => Validated::Valid(f(value)),
            Self::Unvalidated(raw) => Validated::Unvalidated(raw),
        }
    }
}

impl<T: Serialize> Validated<T> {
    /// Collapse either case into JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if a typed value cannot be turned back into JSON.
    pub fn into_value(self) -> Result<Value, serde_json::Error> {
        match self {
            Self::Valid(value) => serde_json::to_value(value),
            Self::Unvalidated(raw) => Ok(raw),
        }
    }
}
