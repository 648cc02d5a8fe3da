//! Minimal CLI: field definition documents → schema JSON.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use crate::field::FormNode;
use crate::schema::Schema;
use crate::transformer::Transformer;
use crate::translate::{CatalogTranslator, IdentityTranslator, TranslationService};

// ------------------------------- Types ------------------------------------ //

/// transform JSON form-field definitions into JSON-Schema-like fragments
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// transform each input document and print the resulting schema
    Schema(SchemaOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// translation catalog JSON ({"domain": {"key": "text"}}); identity lookup if omitted
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// default widget hint applied when a field sets none of its own
    #[arg(long)]
    widget_hint: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct SchemaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ---------------------------- Implementation ------------------------------- //

impl InputSettings {
    fn translator(&self) -> Result<std::sync::Arc<dyn TranslationService>> {
        match self.catalog.as_ref() {
            None => Ok(std::sync::Arc::new(IdentityTranslator)),
            Some(path) => {
                let source = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read catalog {}", path.display()))?;
                let catalog = CatalogTranslator::from_json_str(&source)
                    .with_context(|| format!("failed to parse catalog {}", path.display()))?;
                Ok(std::sync::Arc::new(catalog))
            }
        }
    }

    fn load_nodes(&self) -> Result<Vec<FormNode>> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        let mut nodes = Vec::new();
        for source_path in source_paths {
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read {}", source_path.display()))?;
            let node = from_str_with_path::<FormNode>(&source)
                .with_context(|| format!("failed to parse {}", source_path.display()))?;
            nodes.push(node);
        }
        Ok(nodes)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Schema(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                let translator = target.input_settings.translator()?;
                let widget_hint = target.input_settings.widget_hint.as_deref();

                let mut schemas: Vec<(String, Schema)> = Vec::new();
                for node in target.input_settings.load_nodes()? {
                    let transformer = Transformer::for_kind(&node.kind, translator.clone())
                        .with_context(|| format!("field `{}`", node.name))?;
                    let schema = transformer.transform(&node, &[], widget_hint)?;
                    schemas.push((node.name, schema));
                }

                // one document prints bare; several print keyed by field name
                let output = if schemas.len() == 1 {
                    Value::Object(schemas.pop().map(|(_, s)| s).unwrap_or_default())
                } else {
                    Value::Object(schemas.into_iter().map(|(n, s)| (n, Value::Object(s))).collect())
                };
                let rendered = serde_json::to_string_pretty(&output)?;

                if let Some(out) = target.out.as_ref() {
                    if let Some(parent) = out.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(out, &rendered)
                        .with_context(|| format!("failed to write {}", out.display()))?;
                } else {
                    println!("{rendered}");
                }
                Ok(())
            }
        }
    }
}

// --------------------------- Internal helpers ------------------------------ //

/// Deserialize with JSON-path context in error messages.
fn from_str_with_path<T: serde::de::DeserializeOwned>(src: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| {
        let path = err.path().to_string();
        anyhow::anyhow!("at JSON path {path}: {}", err.into_inner())
    })
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            // Treat as a literal path
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_paths_pass_through_unresolved() {
        let paths = resolve_file_path_patterns(["fields/email.json"]).unwrap();
        assert_eq!(paths, vec![PathBuf::from("fields/email.json")]);
    }

    #[test]
    fn parse_errors_carry_the_json_path() {
        let err = from_str_with_path::<FormNode>(r#"{ "name": "x", "children": [{ "name": 3 }] }"#)
            .unwrap_err();
        assert!(err.to_string().contains("children[0].name"), "got: {err}");
    }
}
