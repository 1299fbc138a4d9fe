// workitems-validator/src/report.rs

use serde::Serialize;
use serde_json::{Map, Value};

use crate::extract::ShapeError;

/// One failed item (or one synthetic failure) in the report.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    /// 1-based position among all items; absent on synthetic records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_index: Option<usize>,
    pub instance_path: String,
    pub schema_path: String,
    pub keyword: String,
    pub params: Value,
    pub message: String,
}

impl ErrorRecord {
    /// Record that is not tied to any item: empty paths, empty params.
    pub fn synthetic(keyword: &str, message: impl Into<String>) -> Self {
        Self {
            item_index: None,
            instance_path: String::new(),
            schema_path: String::new(),
            keyword: keyword.to_string(),
            params: Value::Object(Map::new()),
            message: message.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ItemCounts {
    pub item_count: usize,
    pub valid_items: usize,
    pub invalid_items: usize,
}

/// The single JSON object written to stdout.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub is_valid: bool,
    pub errors: Vec<ErrorRecord>,
    /// Only present once per-item validation actually ran.
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub counts: Option<ItemCounts>,
}

impl Report {
    /// Start an item report; `is_valid` flips as failures are recorded.
    pub fn for_items(item_count: usize) -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            counts: Some(ItemCounts { item_count, ..ItemCounts::default() }),
        }
    }

    pub fn record_valid(&mut self) {
        if let Some(c) = self.counts.as_mut() { c.valid_items += 1; }
    }

    pub fn record_invalid(&mut self, record: ErrorRecord) {
        self.is_valid = false;
        if let Some(c) = self.counts.as_mut() { c.invalid_items += 1; }
        self.errors.push(record);
    }

    pub fn shape_error(err: ShapeError) -> Self {
        Self {
            is_valid: false,
            errors: vec![ErrorRecord::synthetic(err.keyword(), err.to_string())],
            counts: None,
        }
    }

    /// Fatal branch (usage, missing file, parse failure, ...).
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            errors: vec![ErrorRecord::synthetic("error", message)],
            counts: None,
        }
    }

    /// One compact JSON line, no trailing newline.
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            // unreachable: every field is plain JSON data
            r#"{"isValid":false,"errors":[]}"#.to_string()
        })
    }

    /// Human-readable lines mirrored to stderr.
    pub fn diagnostics(&self) -> Vec<String> {
        if self.counts.is_none() {
            return self.errors.iter().map(|e| e.message.clone()).collect();
        }
        if self.is_valid {
            return vec!["File is valid".to_string()];
        }
        self.errors
            .iter()
            .map(|e| match e.item_index {
                Some(n) => format!("Item {n} in 'workitems' is invalid: {}", e.message),
                None => e.message.clone(),
            })
            .collect()
    }
}
