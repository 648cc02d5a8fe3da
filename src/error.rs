//! Library error type.
//!
//! Missing optional configuration is never an error; the only failure modes
//! are a field kind with no registered transformer and a caller-supplied
//! extension failing mid-fold.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// No transformer is registered for the given kind name.
    #[error("unknown field kind `{name}`")]
    UnknownFieldKind { name: String },

    /// A caller-supplied extension failed; the source is propagated
    /// unchanged and never inspected here.
    #[error("schema extension failed for field `{field}`")]
    Extension {
        field: String,
        #[source]
        source: anyhow::Error,
    },
}
