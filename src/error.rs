// workitems-validator/src/error.rs

use std::path::PathBuf;
use thiserror::Error;

use crate::loader::DocumentKind;

/// Fatal failures. Each one ends the run with the `Validation error: ...`
/// report and exit status 1.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{kind} file not found: {}", path.display())]
    NotFound { kind: DocumentKind, path: PathBuf },

    #[error("{kind} file {} could not be read: {source}", path.display())]
    Read {
        kind: DocumentKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{kind} file {} is not valid JSON: {source}", path.display())]
    Parse {
        kind: DocumentKind,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("schema has no 'outputDataDefinition.outputSchema' entry")]
    MissingOutputSchema,

    #[error("output schema is not a valid Draft 4 schema: {0}")]
    InvalidSchema(String),
}
