// workitems-validator/src/extract.rs

use serde_json::Value;
use thiserror::Error;

pub const WORKITEMS_KEY: &str = "workitems";

/// The candidate document does not carry a usable `workitems` array.
/// Reported through the normal report channel, not as a fatal error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    #[error("'workitems' property is missing from input file.")]
    Missing,
    #[error("'workitems' is not a valid list.")]
    NotAList,
}

impl ShapeError {
    /// Keyword placed in the synthetic error record.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Missing => "required",
            Self::NotAList => "type",
        }
    }
}

/// Borrow the `workitems` array out of the candidate document.
/// A document that is not an object counts as missing the key.
pub fn workitems(document: &Value) -> Result<&[Value], ShapeError> {
    match document.as_object().and_then(|m| m.get(WORKITEMS_KEY)) {
        None => Err(ShapeError::Missing),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(ShapeError::NotAList),
    }
}
