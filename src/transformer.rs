//! Per-kind transformers: thin seeds over the shared pipeline.
//!
//! Differentiation between kinds lives entirely in the seeded keys; no kind
//! overrides the common pass. Kinds are a closed enum sharing one builder
//! rather than a type-per-kind family.

use std::sync::Arc;

use serde_json::Value;

use crate::builder::SchemaBuilder;
use crate::error::{Error, Result};
use crate::extension::SchemaExtension;
use crate::field::FieldNode;
use crate::schema::Schema;
use crate::translate::TranslationService;

/// Optional collaborator that infers constraint keys (e.g. `pattern`,
/// `minLength`) from external validation metadata. Opaque to the pipeline;
/// only constraint-aware kinds consult it.
pub trait ConstraintGuesser: Send + Sync {
    fn guess(&self, node: &dyn FieldNode) -> Schema;
}

// ------------------------------- Kinds ------------------------------------ //

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    DateTime,
    Hidden,
    Text,
    Choice,
}

impl FieldKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "datetime" => Some(Self::DateTime),
            "hidden" => Some(Self::Hidden),
            "text" => Some(Self::Text),
            "choice" => Some(Self::Choice),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::DateTime => "datetime",
            Self::Hidden => "hidden",
            Self::Text => "text",
            Self::Choice => "choice",
        }
    }
}

// ----------------------------- Transformer -------------------------------- //

/// One per field kind; constructed once, invoked per field. The translator
/// is mandatory by construction; the guesser is opt-in.
pub struct Transformer {
    kind: FieldKind,
    builder: SchemaBuilder,
    guesser: Option<Arc<dyn ConstraintGuesser>>,
}

impl Transformer {
    pub fn new(kind: FieldKind, translator: Arc<dyn TranslationService>) -> Self {
        Self { kind, builder: SchemaBuilder::new(translator), guesser: None }
    }

    pub fn with_guesser(mut self, guesser: Arc<dyn ConstraintGuesser>) -> Self {
        self.guesser = Some(guesser);
        self
    }

    /// Resolve a transformer for a kind name, for callers selecting by the
    /// node's `kind` string.
    pub fn for_kind(name: &str, translator: Arc<dyn TranslationService>) -> Result<Self> {
        let kind = FieldKind::from_name(name)
            .ok_or_else(|| Error::UnknownFieldKind { name: name.to_string() })?;
        Ok(Self::new(kind, translator))
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Seed the kind-specific keys, then run the common pass.
    pub fn transform(
        &self,
        node: &dyn FieldNode,
        extensions: &[&dyn SchemaExtension],
        widget_hint: Option<&str>,
    ) -> Result<Schema> {
        let schema = self.seed(node);
        self.builder.apply_common(node, schema, extensions, widget_hint)
    }

    fn seed(&self, node: &dyn FieldNode) -> Schema {
        let mut schema = Schema::new();
        match self.kind {
            FieldKind::DateTime => {
                schema.insert("type".into(), Value::from("datetime"));
            }
            // hidden inputs still transport plain strings
            FieldKind::Hidden => {
                schema.insert("type".into(), Value::from("string"));
            }
            FieldKind::Text => {
                schema.insert("type".into(), Value::from("string"));
                if let Some(guesser) = &self.guesser {
                    // guessed constraints never clobber seeded keys
                    for (k, v) in guesser.guess(node) {
                        schema.entry(k).or_insert(v);
                    }
                }
            }
            FieldKind::Choice => {
                schema.insert("type".into(), Value::from("string"));
                if let Some(choices) = node.option("choices").and_then(Value::as_array) {
                    schema.insert("enum".into(), Value::Array(choices.clone()));
                }
            }
        }
        schema
    }
}

// -------------------------------- Tests ----------------------------------- //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FormNode;
    use crate::translate::IdentityTranslator;
    use serde_json::json;

    fn node(options: serde_json::Value) -> FormNode {
        serde_json::from_value(json!({ "name": "when", "options": options })).unwrap()
    }

    fn transformer(kind: FieldKind) -> Transformer {
        Transformer::new(kind, Arc::new(IdentityTranslator))
    }

    #[test]
    fn datetime_seeds_its_own_type_tag() {
        let out = transformer(FieldKind::DateTime)
            .transform(&node(json!({ "label": "form.when" })), &[], None)
            .unwrap();
        assert_eq!(out["type"], json!("datetime"));
        assert_eq!(out["title"], json!("form.when"));
    }

    #[test]
    fn hidden_seeds_string_type() {
        let out = transformer(FieldKind::Hidden)
            .transform(&node(json!({})), &[], None)
            .unwrap();
        assert_eq!(out["type"], json!("string"));
        assert_eq!(out["title"], json!("when"));
    }

    #[test]
    fn choice_seeds_enum_from_choices_option() {
        let out = transformer(FieldKind::Choice)
            .transform(&node(json!({ "choices": ["red", "green"] })), &[], None)
            .unwrap();
        assert_eq!(out["type"], json!("string"));
        assert_eq!(out["enum"], json!(["red", "green"]));
    }

    #[test]
    fn text_merges_guessed_constraints_without_clobbering() {
        struct Fixed;
        impl ConstraintGuesser for Fixed {
            fn guess(&self, _: &dyn FieldNode) -> Schema {
                let mut s = Schema::new();
                s.insert("minLength".into(), json!(3));
                s.insert("type".into(), json!("integer")); // must lose to the seed
                s
            }
        }
        let out = transformer(FieldKind::Text)
            .with_guesser(Arc::new(Fixed))
            .transform(&node(json!({})), &[], None)
            .unwrap();
        assert_eq!(out["minLength"], json!(3));
        assert_eq!(out["type"], json!("string"));
    }

    #[test]
    fn kind_names_round_trip_and_unknowns_fail() {
        for kind in [FieldKind::DateTime, FieldKind::Hidden, FieldKind::Text, FieldKind::Choice] {
            assert_eq!(FieldKind::from_name(kind.name()), Some(kind));
        }
        let Err(err) = Transformer::for_kind("money", Arc::new(IdentityTranslator)) else {
            panic!("expected unknown kind to fail");
        };
        assert!(matches!(err, Error::UnknownFieldKind { name } if name == "money"));
    }

    #[test]
    fn transform_runs_the_full_common_pass() {
        let n = node(json!({
            "placeholder": "pick a date",
            "attr": { "pattern": "\\d{4}-\\d{2}-\\d{2}", "class": "date" },
            "help": "ISO date",
        }));
        let out = transformer(FieldKind::DateTime)
            .transform(&n, &[], Some("datepicker"))
            .unwrap();
        assert_eq!(out["type"], json!("datetime"));
        assert_eq!(out["placeholder"], json!("pick a date"));
        assert_eq!(out["pattern"], json!("\\d{4}-\\d{2}-\\d{2}"));
        assert_eq!(out["description"], json!("ISO date"));
        assert_eq!(out["widget"], json!("datepicker"));
    }
}
