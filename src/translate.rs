//! Message translation collaborator.
//!
//! The pipeline resolves labels and descriptions through this seam; it makes
//! no caching assumptions. Parameter keys carry their own delimiters (e.g.
//! `%name%`) and are substituted verbatim into the resolved text.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// Resolves a message key + parameters + domain to localized text. Shared
/// across concurrent transforms, so implementations must be safe for
/// read-only concurrent use.
pub trait TranslationService: Send + Sync {
    fn translate(
        &self,
        key: &str,
        params: &serde_json::Map<String, Value>,
        domain: Option<&str>,
    ) -> String;
}

fn substitute(text: &str, params: &serde_json::Map<String, Value>) -> String {
    let mut out = text.to_string();
    for (k, v) in params {
        let replacement = match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        out = out.replace(k.as_str(), &replacement);
    }
    out
}

/// Echoes the key (params still substituted). The default collaborator when
/// no catalog is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl TranslationService for IdentityTranslator {
    fn translate(
        &self,
        key: &str,
        params: &serde_json::Map<String, Value>,
        _domain: Option<&str>,
    ) -> String {
        substitute(key, params)
    }
}

const DEFAULT_DOMAIN: &str = "messages";

/// Catalog-backed translator loaded from JSON of the shape
/// `{ "<domain>": { "<key>": "<text>" } }`. Unknown keys echo the key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogTranslator {
    #[serde(flatten)]
    domains: IndexMap<String, IndexMap<String, String>>,
}

impl CatalogTranslator {
    pub fn from_json_str(src: &str) -> serde_json::Result<Self> {
        serde_json::from_str(src)
    }
}

impl TranslationService for CatalogTranslator {
    fn translate(
        &self,
        key: &str,
        params: &serde_json::Map<String, Value>,
        domain: Option<&str>,
    ) -> String {
        let text = self
            .domains
            .get(domain.unwrap_or(DEFAULT_DOMAIN))
            .and_then(|d| d.get(key))
            .map(String::as_str)
            .unwrap_or(key);
        substitute(text, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(v: Value) -> serde_json::Map<String, Value> {
        v.as_object().unwrap().clone()
    }

    #[test]
    fn catalog_resolves_domain_then_key() {
        let t = CatalogTranslator::from_json_str(
            r#"{ "messages": { "form.email": "E-mail" }, "admin": { "form.email": "Mail (admin)" } }"#,
        )
        .unwrap();
        let none = params(json!({}));
        assert_eq!(t.translate("form.email", &none, None), "E-mail");
        assert_eq!(t.translate("form.email", &none, Some("admin")), "Mail (admin)");
    }

    #[test]
    fn missing_key_or_domain_echoes_the_key() {
        let t = CatalogTranslator::default();
        assert_eq!(t.translate("form.email", &params(json!({})), Some("nope")), "form.email");
    }

    #[test]
    fn params_substituted_verbatim() {
        let t = CatalogTranslator::from_json_str(
            r#"{ "messages": { "greet": "Hello %name%, you have %count%" } }"#,
        )
        .unwrap();
        let p = params(json!({ "%name%": "Ada", "%count%": 3 }));
        assert_eq!(t.translate("greet", &p, None), "Hello Ada, you have 3");
        assert_eq!(IdentityTranslator.translate("hi %name%", &p, None), "hi Ada");
    }
}
