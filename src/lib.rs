pub mod error;
pub mod loader;
pub mod normalize;
pub mod extract;
pub mod validate;
pub mod report;
pub mod pipeline;

pub use error::Error;
pub use loader::{DocumentKind, load_json};
pub use normalize::normalize_patterns;
pub use extract::{ShapeError, workitems};
pub use validate::ItemValidator;
pub use report::{ErrorRecord, ItemCounts, Report};
pub use pipeline::run;

/// Name printed in the usage-error report.
pub const PROGRAM_NAME: &str = "workitems-validator";

pub fn usage() -> String {
    format!("Usage: {PROGRAM_NAME} <schema_file> <data_file>")
}
