//! The form-definition node the pipeline reads from.
//!
//! The core only needs a name and a key/value option lookup; `FieldNode` is
//! that narrow seam. `FormNode` is the concrete JSON-backed adapter used by
//! the CLI and tests — a host framework can implement the trait over its own
//! field tree instead.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::is_set;

/// Typed view of the nested `liform` option bag.
///
/// Sub-keys are only populated when set to a non-empty string, so callers can
/// treat `None` uniformly as "absent or falsy".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiformOptions {
    pub widget: Option<String>,
    pub description: Option<String>,
}

impl LiformOptions {
    fn from_value(v: &Value) -> Self {
        let bag = match v.as_object() {
            Some(m) => m,
            None => return Self::default(),
        };
        let sub = |key: &str| {
            bag.get(key)
                .filter(|v| is_set(v))
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        Self { widget: sub("widget"), description: sub("description") }
    }
}

/// Read-only view of one field definition. Option lookup returns `None` for
/// unset options rather than erroring.
pub trait FieldNode {
    fn name(&self) -> &str;
    fn option(&self, name: &str) -> Option<&Value>;

    /// The `liform` option bag, parsed; empty when the option is unset or
    /// not a mapping.
    fn liform(&self) -> LiformOptions {
        self.option("liform")
            .map(LiformOptions::from_value)
            .unwrap_or_default()
    }
}

/// JSON-deserializable field definition:
/// `{ "name": "...", "kind": "...", "options": {...}, "children": [...] }`.
///
/// `children` is carried for tree-shaped documents but not read by the
/// common pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormNode {
    pub name: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub options: IndexMap<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FormNode>,
}

impl FieldNode for FormNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn option(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }
}
