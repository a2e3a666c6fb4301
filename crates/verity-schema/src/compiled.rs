//! JSON Schema documents compiled with `jsonschema`.

use std::fmt;
use std::sync::Arc;

use jsonschema::Validator;
use schemars::{JsonSchema, schema_for};
use serde_json::Value;

use crate::error::{Issue, SchemaError, ValidationError};
use crate::schema::Schema;

/// A compiled JSON Schema. Parsing yields the accepted value unchanged.
///
/// Cloning is cheap; the compiled validator is shared.
#[derive(Clone)]
pub struct CompiledSchema {
    document: Arc<Value>,
    validator: Arc<Validator>,
}

impl CompiledSchema {
    /// Compile a schema document.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Compile`] if the document is not a valid schema.
    pub fn new(document: &Value) -> Result<Self, SchemaError> {
        let validator = jsonschema::validator_for(document)
            .map_err(|e| SchemaError::Compile(e.to_string()))?;
        Ok(Self {
            document: Arc::new(document.clone()),
            validator: Arc::new(validator),
        })
    }

    /// Compile a schema from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Compile`] if the text is not JSON or not a valid schema.
    pub fn from_json_str(text: &str) -> Result<Self, SchemaError> {
        let document: Value = serde_json::from_str(text)
            .map_err(|e| SchemaError::Compile(format!("schema is not valid JSON: {e}")))?;
        Self::new(&document)
    }

    /// Compile the schema `schemars` derives for `T`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Compile`] if the generated schema cannot be
    /// serialized or compiled.
    pub fn for_type<T: JsonSchema>() -> Result<Self, SchemaError> {
        let document = serde_json::to_value(schema_for!(T))
            .map_err(|e| SchemaError::Compile(e.to_string()))?;
        Self::new(&document)
    }

    /// The schema document this validator was compiled from.
    #[must_use]
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Check `value` against the schema, collecting every violation.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] with one [`Issue`] per violation.
    pub fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        let issues: Vec<Issue> = self
            .validator
            .iter_errors(value)
            .map(|e| Issue::new(pointer_to_path(&e.instance_path.to_string()), e.to_string()))
            .collect();

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(issues))
        }
    }

    #[must_use]
    pub fn is_valid(&self, value: &Value) -> bool {
        self.validator.is_valid(value)
    }
}

impl Schema for CompiledSchema {
    type Output = Value;

    fn parse(&self, value: &Value) -> Result<Value, SchemaError> {
        self.validate(value)?;
        Ok(value.clone())
    }
}

impl fmt::Debug for CompiledSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledSchema")
            .field("document", &self.document)
            .finish_non_exhaustive()
    }
}

/// Convert a JSON Pointer (`/items/0/id`) into a dotted path (`items.0.id`).
fn pointer_to_path(pointer: &str) -> String {
    pointer
        .split('/')
        .skip(1)
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .collect::<Vec<_>>()
        .join(".")
}
