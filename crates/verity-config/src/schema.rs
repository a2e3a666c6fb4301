//! Schema registry configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SchemaConfig {
    /// Reject keys not declared by object schemas that leave `additionalProperties` unset.
    #[serde(default)]
    pub strict_mode: bool,
}
