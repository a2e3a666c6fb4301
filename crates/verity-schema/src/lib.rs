//! # verity-schema
//!
//! Schema capability and JSON Schema engines for Verity.
//!
//! This crate provides:
//! - [`Schema`]: the capability the validating client consumes, `parse(value) -> T`
//! - [`ValidationError`]: every violation of a payload, as `path: message` issues
//! - [`SchemaError`]: tagged error that separates validation failures from schema defects
//! - [`CompiledSchema`]: a JSON Schema document compiled with `jsonschema`
//! - [`TypedSchema`]: a schema generated from a Rust type with `schemars`, decoded with `serde`
//! - [`SchemaRegistry`]: named schemas shared across call sites
//!
//! ## Error classification
//!
//! Only [`SchemaError::Validation`] describes a payload that does not match its
//! schema. The other variants are defects in the schema itself (it failed to
//! compile, or it accepted a value its typed output cannot decode) and callers
//! must not treat them as validation failures.

mod compiled;
mod error;
mod registry;
mod schema;
mod typed;

pub use compiled::CompiledSchema;
pub use error::{Issue, SchemaError, ValidationError};
pub use registry::SchemaRegistry;
pub use schema::{FnSchema, Schema, from_fn};
pub use typed::TypedSchema;
