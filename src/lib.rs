//! Transform declarative form-field definitions into JSON-Schema-like
//! fragments a client can validate/render a form from.
//!
//! Design goals:
//! - One fixed common-specification pipeline (label → placeholder → attr →
//!   pattern → description → widget → extensions); the order is the contract.
//! - Per-kind transformers are thin seeds over the shared pipeline, not a
//!   class hierarchy.
//! - Missing optional configuration is never an error; every step no-ops
//!   when its source option is absent.
//! - Extensions are the single open extension point, applied in registration
//!   order so later ones can override anything the pipeline produced.
pub mod schema;
pub mod field;
pub mod translate;
pub mod extension;
pub mod error;
pub mod builder;
pub mod transformer;
pub mod cli;

pub use schema::{Schema, is_set};
pub use field::{FieldNode, FormNode, LiformOptions};
pub use translate::{TranslationService, IdentityTranslator, CatalogTranslator};
pub use extension::SchemaExtension;
pub use error::{Error, Result};
pub use builder::{SchemaBuilder, is_required, is_disabled};
pub use transformer::{FieldKind, Transformer, ConstraintGuesser};
