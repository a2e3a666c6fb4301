//! Named schema registry.
//!
//! Lets an application compile its response schemas once at startup and look
//! them up by name at each call site.

use std::collections::HashMap;

use schemars::{JsonSchema, schema_for};
use serde_json::{Map, Value};

use crate::compiled::CompiledSchema;
use crate::error::SchemaError;

/// Name-keyed store of compiled JSON Schemas.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, CompiledSchema>,
    strict_mode: bool,
}

impl SchemaRegistry {
    /// Create an empty, permissive registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry. In strict mode every object schema that does
    /// not mention `additionalProperties` rejects unknown keys.
    #[must_use]
    pub fn with_strict_mode(strict_mode: bool) -> Self {
        Self {
            schemas: HashMap::new(),
            strict_mode,
        }
    }

    #[must_use]
    pub const fn strict_mode(&self) -> bool {
        self.strict_mode
    }

    /// Register a schema document under `name`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Compile`] if the document is not a valid schema.
    pub fn register_value(&mut self, name: &str, document: &Value) -> Result<(), SchemaError> {
        let compiled = if self.strict_mode {
            let mut strict = document.clone();
            apply_strict_mode(&mut strict);
            CompiledSchema::new(&strict)?
        } else {
            CompiledSchema::new(document)?
        };
        self.schemas.insert(name.to_string(), compiled);
        Ok(())
    }

    /// Register a schema from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Compile`] if the text is not JSON or not a valid schema.
    pub fn register_str(&mut self, name: &str, text: &str) -> Result<(), SchemaError> {
        let document: Value = serde_json::from_str(text)
            .map_err(|e| SchemaError::Compile(format!("schema '{name}' is not valid JSON: {e}")))?;
        self.register_value(name, &document)
    }

    /// Register the schema `schemars` derives for `T`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Compile`] if the generated schema cannot be compiled.
    pub fn register_type<T: JsonSchema>(&mut self, name: &str) -> Result<(), SchemaError> {
        let document = serde_json::to_value(schema_for!(T))
            .map_err(|e| SchemaError::Compile(e.to_string()))?;
        self.register_value(name, &document)
    }

    /// Look up a schema by name.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NotFound`] if nothing is registered under `name`.
    pub fn get(&self, name: &str) -> Result<&CompiledSchema, SchemaError> {
        self.schemas
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

fn apply_strict_mode(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if is_object_schema(map) && !map.contains_key("additionalProperties") {
                map.insert("additionalProperties".to_string(), Value::Bool(false));
            }
            for key in ["properties", "patternProperties", "$defs", "definitions"] {
                if let Some(Value::Object(children)) = map.get_mut(key) {
                    children.values_mut().for_each(apply_strict_mode);
                }
            }
            for key in ["items", "additionalProperties", "not", "if", "then", "else"] {
                if let Some(child) = map.get_mut(key) {
                    apply_strict_mode(child);
                }
            }
            for key in ["prefixItems", "allOf", "anyOf", "oneOf"] {
                if let Some(Value::Array(children)) = map.get_mut(key) {
                    children.iter_mut().for_each(apply_strict_mode);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(apply_strict_mode),
        _ => {}
    }
}

fn is_object_schema(map: &Map<String, Value>) -> bool {
    match map.get("type") {
        Some(Value::String(kind)) => kind == "object",
        Some(Value::Array(kinds)) => kinds
            .iter()
            .any(|k| matches!(k, Value::String(kind) if kind == "object")),
        _ => map.contains_key("properties") || map.contains_key("required"),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::schema::Schema;

    const USER_SCHEMA: &str = r#"{
        "type": "object",
        "properties": {
            "id": { "type": "integer" },
            "profile": {
                "type": "object",
                "properties": { "bio": { "type": "string" } }
            }
        },
        "required": ["id"]
    }"#;

    #[test]
    fn register_and_lookup() {
        let mut reg = SchemaRegistry::new();
        reg.register_str("user", USER_SCHEMA).unwrap();

        let schema = reg.get("user").unwrap();
        assert!(schema.parse(&json!({"id": 1})).is_ok());
        assert!(schema.parse(&json!({"id": "1"})).unwrap_err().is_validation());
    }

    #[test]
    fn missing_name_is_not_found() {
        let reg = SchemaRegistry::new();
        assert!(matches!(reg.get("nope"), Err(SchemaError::NotFound(name)) if name == "nope"));
    }

    #[test]
    fn names_are_sorted() {
        let mut reg = SchemaRegistry::new();
        reg.register_value("zeta", &json!({})).unwrap();
        reg.register_value("alpha", &json!({})).unwrap();
        reg.register_str("user", USER_SCHEMA).unwrap();
        assert_eq!(reg.names(), vec!["alpha", "user", "zeta"]);
        assert_eq!(reg.len(), 3);
        assert!(reg.contains("user"));
    }

    #[test]
    fn invalid_text_fails_compile() {
        let mut reg = SchemaRegistry::new();
        assert!(matches!(
            reg.register_str("broken", "{"),
            Err(SchemaError::Compile(_))
        ));
        assert!(reg.is_empty());
    }

    #[test]
    fn register_type_uses_derived_schema() {
        #[derive(schemars::JsonSchema)]
        #[allow(dead_code)]
        struct Order {
            sku: String,
            quantity: u32,
        }

        let mut reg = SchemaRegistry::new();
        reg.register_type::<Order>("order").unwrap();
        let schema = reg.get("order").unwrap();
        assert!(schema.is_valid(&json!({"sku": "a-1", "quantity": 2})));
        assert!(!schema.is_valid(&json!({"sku": "a-1"})));
    }

    #[test]
    fn strict_mode_rejects_unknown_keys_at_every_level() {
        let payload = json!({"id": 1, "profile": {"bio": "hi", "extra": true}});

        let mut permissive = SchemaRegistry::new();
        permissive.register_str("user", USER_SCHEMA).unwrap();
        assert!(permissive.get("user").unwrap().is_valid(&payload));

        let mut strict = SchemaRegistry::with_strict_mode(true);
        strict.register_str("user", USER_SCHEMA).unwrap();
        let err = strict.get("user").unwrap().validate(&payload).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.issues()[0].path, "profile");
    }

    #[test]
    fn strict_mode_keeps_explicit_additional_properties() {
        let mut strict = SchemaRegistry::with_strict_mode(true);
        strict
            .register_value(
                "open",
                &json!({"type": "object", "additionalProperties": true}),
            )
            .unwrap();
        assert!(strict.get("open").unwrap().is_valid(&json!({"anything": 1})));
    }
}
