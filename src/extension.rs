//! The single open extension point.
//!
//! An extension takes the field node and the schema built so far and returns
//! an augmented schema. Extensions are applied last, in registration order,
//! so each sees the previous one's output and may override anything the
//! common pipeline produced. Failures are caller-code defects and propagate
//! unchanged; the pipeline never catches them.

use crate::field::FieldNode;
use crate::schema::Schema;

/// Single-method capability: `(node, schema) -> schema`. Implemented for any
/// matching closure, so no dedicated type is needed for one-off extensions.
pub trait SchemaExtension {
    fn apply(&self, node: &dyn FieldNode, schema: Schema) -> anyhow::Result<Schema>;
}

impl<F> SchemaExtension for F
where
    F: Fn(&dyn FieldNode, Schema) -> anyhow::Result<Schema>,
{
    fn apply(&self, node: &dyn FieldNode, schema: Schema) -> anyhow::Result<Schema> {
        self(node, schema)
    }
}
