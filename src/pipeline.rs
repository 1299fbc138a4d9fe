// workitems-validator/src/pipeline.rs

use std::path::Path;
use tracing::{debug, info};

use crate::{
    error::Error,
    extract::workitems,
    loader::{DocumentKind, load_json},
    normalize::normalize_patterns,
    report::Report,
    validate::ItemValidator,
};

/// Schema file -> data file -> workitems -> per-item validation -> report.
///
/// `Ok` covers every outcome that belongs in a report, including a missing or
/// malformed `workitems` entry. `Err` is reserved for fatal failures.
pub fn run(schema_path: &Path, data_path: &Path) -> Result<Report, Error> {
    let mut schema = load_json(schema_path, DocumentKind::Schema)?;
    let rewritten = normalize_patterns(&mut schema);
    debug!(rewritten, "normalized schema patterns");

    let data = load_json(data_path, DocumentKind::Data)?;

    let items = match workitems(&data) {
        Ok(items) => items,
        Err(shape) => {
            info!(keyword = shape.keyword(), "{shape}");
            return Ok(Report::shape_error(shape));
        }
    };
    debug!(count = items.len(), "extracted workitems");

    let validator = ItemValidator::from_wrapper(&schema)?;
    Ok(validator.validate_all(items))
}
