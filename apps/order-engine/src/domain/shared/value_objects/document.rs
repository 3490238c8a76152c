//! Open key-value document for schema-flexible fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Schema-flexible structured document.
///
/// Used for `base_recipe` (ingredient list + yield) and
/// `production_parameters` (timing/temperature/batch-size hints), which
/// evolve faster than the rest of the schema. The core stores and returns
/// these opaquely; only edges that interpret a document validate its shape
/// (currently: none).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    /// Empty document.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Look up a top-level field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set a top-level field.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns true if the document has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Document {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
