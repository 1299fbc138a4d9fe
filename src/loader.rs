// workitems-validator/src/loader.rs

use serde::Deserialize;
use serde_json::Value;
use std::{fmt, fs, path::Path};
use tracing::debug;

use crate::error::Error;

/// Which of the two input files is being loaded; used in error text.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DocumentKind { Schema, Data }

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Schema => "Schema",
            Self::Data => "Data",
        })
    }
}

/// Read and parse a whole JSON file. Existence is checked before opening so a
/// missing path is reported as `NotFound` rather than as an I/O error.
pub fn load_json(path: &Path, kind: DocumentKind) -> Result<Value, Error> {
    if !path.exists() {
        return Err(Error::NotFound { kind, path: path.to_path_buf() });
    }
    let text = fs::read_to_string(path)
        .map_err(|source| Error::Read { kind, path: path.to_path_buf(), source })?;
    let value = parse_unbounded(&text)
        .map_err(|source| Error::Parse { kind, path: path.to_path_buf(), source })?;
    debug!(kind = %kind, path = %path.display(), bytes = text.len(), "loaded json document");
    Ok(value)
}

/// `serde_json` caps nesting at 128 levels by default; lift the cap and let
/// `serde_stacker` grow the stack instead.
fn parse_unbounded(text: &str) -> Result<Value, serde_json::Error> {
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}
