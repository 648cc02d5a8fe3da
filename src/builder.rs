//! The common-specification pipeline shared by every field kind.
//!
//! `apply_common` runs a fixed sequence of passes over one schema fragment:
//! label → placeholder → attr → pattern → description → widget → extensions.
//! The order is the documented contract (extensions must run last so they can
//! override anything earlier passes wrote). Every pass is independently
//! optional and no-ops when its source option is absent; only the extension
//! fold can fail.

use std::sync::Arc;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::extension::SchemaExtension;
use crate::field::FieldNode;
use crate::schema::{Schema, is_set};
use crate::translate::TranslationService;

// ------------------------------ Predicates -------------------------------- //

/// Boolean `required` option; absent reads as false.
pub fn is_required(node: &dyn FieldNode) -> bool {
    node.option("required").and_then(Value::as_bool).unwrap_or(false)
}

/// Boolean `disabled` option; absent reads as false.
pub fn is_disabled(node: &dyn FieldNode) -> bool {
    node.option("disabled").and_then(Value::as_bool).unwrap_or(false)
}

// A set (truthy) option, rendered as translatable text. Loosely-typed
// definitions may carry scalar labels/help; those stringify rather than
// falling back to the field name.
fn option_text(node: &dyn FieldNode, name: &str) -> Option<String> {
    let v = node.option(name).filter(|v| is_set(v))?;
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// ------------------------------- Builder ---------------------------------- //

/// Orchestrates the common pass. Holds only the translation collaborator;
/// no state survives a call, so one builder serves concurrent transforms.
pub struct SchemaBuilder {
    translator: Arc<dyn TranslationService>,
}

impl SchemaBuilder {
    pub fn new(translator: Arc<dyn TranslationService>) -> Self {
        Self { translator }
    }

    /// Run the full pipeline over `schema` and return the augmented result.
    pub fn apply_common(
        &self,
        node: &dyn FieldNode,
        schema: Schema,
        extensions: &[&dyn SchemaExtension],
        widget_hint: Option<&str>,
    ) -> Result<Schema> {
        let schema = self.add_label(node, schema);
        let schema = add_placeholder(node, schema);
        let schema = add_attr(node, schema);
        let schema = add_pattern(node, schema);
        let schema = self.add_description(node, schema);
        let schema = add_widget(node, schema, widget_hint);
        self.apply_extensions(node, schema, extensions)
    }

    fn translate(&self, key: &str, node: &dyn FieldNode) -> String {
        let domain = option_text(node, "translation_domain");
        self.translator.translate(key, &Schema::new(), domain.as_deref())
    }

    /// `title` is always present: the translated `label` option, or the
    /// translated field name as the fallback key.
    fn add_label(&self, node: &dyn FieldNode, mut schema: Schema) -> Schema {
        let label = option_text(node, "label");
        let key = label.as_deref().unwrap_or_else(|| node.name());
        let title = self.translate(key, node);
        schema.insert("title".into(), Value::from(title));
        schema
    }

    /// Description precedence (legacy order, preserved verbatim): `help`,
    /// overridden by `help_block`, both overridden by `liform.description`.
    /// Only the last resolved source wins; absence of all leaves it unset.
    fn add_description(&self, node: &dyn FieldNode, mut schema: Schema) -> Schema {
        for key in ["help", "help_block"] {
            if let Some(help) = option_text(node, key) {
                let text = self.translate(&help, node);
                schema.insert("description".into(), Value::from(text));
            }
        }
        if let Some(desc) = node.liform().description {
            let text = self.translate(&desc, node);
            schema.insert("description".into(), Value::from(text));
        }
        schema
    }

    fn apply_extensions(
        &self,
        node: &dyn FieldNode,
        schema: Schema,
        extensions: &[&dyn SchemaExtension],
    ) -> Result<Schema> {
        let mut schema = schema;
        for extension in extensions {
            schema = extension.apply(node, schema).map_err(|source| Error::Extension {
                field: node.name().to_string(),
                source,
            })?;
        }
        Ok(schema)
    }
}

// --------------------------- Stateless passes ------------------------------ //

fn add_placeholder(node: &dyn FieldNode, mut schema: Schema) -> Schema {
    if let Some(placeholder) = node.option("placeholder").filter(|v| is_set(v)) {
        schema.insert("placeholder".into(), placeholder.clone());
    }
    schema
}

fn add_attr(node: &dyn FieldNode, mut schema: Schema) -> Schema {
    if let Some(attr) = node.option("attr").filter(|v| is_set(v)) {
        schema.insert("attr".into(), attr.clone());
    }
    schema
}

/// Lift `attr.pattern` to the top level. A non-mapping `attr` means
/// "pattern absent", never an error.
fn add_pattern(node: &dyn FieldNode, mut schema: Schema) -> Schema {
    let pattern = node
        .option("attr")
        .and_then(Value::as_object)
        .and_then(|attr| attr.get("pattern"))
        .filter(|v| !v.is_null());
    if let Some(pattern) = pattern {
        schema.insert("pattern".into(), pattern.clone());
    }
    schema
}

/// `liform.widget` wins; the caller hint applies whenever it is absent.
fn add_widget(node: &dyn FieldNode, mut schema: Schema, widget_hint: Option<&str>) -> Schema {
    let widget = node
        .liform()
        .widget
        .or_else(|| widget_hint.filter(|w| !w.is_empty()).map(str::to_string));
    if let Some(widget) = widget {
        schema.insert("widget".into(), Value::from(widget));
    }
    schema
}

// -------------------------------- Tests ----------------------------------- //
