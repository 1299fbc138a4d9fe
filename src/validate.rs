// workitems-validator/src/validate.rs

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::{
    error::Error,
    report::{ErrorRecord, Report},
};

/// Keywords whose next schema-path segment is a user-chosen name.
const NAMED_CHILDREN: &[&str] = &["properties", "patternProperties", "definitions", "dependencies"];
/// Keywords whose next segment may be an array index.
const INDEXED_CHILDREN: &[&str] = &["items", "allOf", "anyOf", "oneOf"];

/// Draft 4 validator for a single work item, compiled once per run.
pub struct ItemValidator {
    schema: Value,
    compiled: jsonschema::Validator,
}

impl ItemValidator {
    pub fn new(schema: Value) -> Result<Self, Error> {
        let compiled = jsonschema::draft4::new(&schema)
            .map_err(|e| Error::InvalidSchema(e.to_string()))?;
        Ok(Self { schema, compiled })
    }

    /// Compile the schema nested at `outputDataDefinition.outputSchema`.
    pub fn from_wrapper(wrapper: &Value) -> Result<Self, Error> {
        let schema = wrapper
            .get("outputDataDefinition")
            .and_then(|d| d.get("outputSchema"))
            .ok_or(Error::MissingOutputSchema)?;
        Self::new(schema.clone())
    }

    #[cfg(test)]
    fn schema(&self) -> &Value { &self.schema }

    /// First violation for the item at 0-based `index`, if any.
    pub fn check(&self, index: usize, item: &Value) -> Option<ErrorRecord> {
        let error = self.compiled.iter_errors(item).next()?;
        let schema_path = error.schema_path.to_string();
        let (keyword, params) = locate_keyword(&self.schema, &schema_path);
        Some(ErrorRecord {
            item_index: Some(index + 1),
            instance_path: format!("workitems[{index}]{}", error.instance_path),
            schema_path,
            keyword,
            params,
            message: error.to_string(),
        })
    }

    /// Validate every item independently, preserving order.
    pub fn validate_all(&self, items: &[Value]) -> Report {
        let mut report = Report::for_items(items.len());
        for (index, item) in items.iter().enumerate() {
            match self.check(index, item) {
                None => report.record_valid(),
                Some(record) => {
                    debug!(item = index + 1, keyword = %record.keyword, "item failed validation");
                    report.record_invalid(record);
                }
            }
        }
        if let Some(c) = report.counts {
            info!(items = c.item_count, valid = c.valid_items, invalid = c.invalid_items, "validated workitems");
        }
        report
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Step { Keyword, Name, MaybeIndex }

/// Find the keyword a schema path ends in and its value in `schema`.
///
/// Names under `properties`/`definitions`/... and array indices are skipped so
/// a property called `type` is not mistaken for the `type` keyword. Local
/// `$ref` targets (`#/...`) are followed; when the value cannot be addressed
/// the params fall back to `{}`.
fn locate_keyword(schema: &Value, schema_path: &str) -> (String, Value) {
    let mut keyword = String::new();
    // where the current schema node lives, and where the last keyword's value lives
    let mut pointer = String::new();
    let mut keyword_pointer = String::new();
    let mut step = Step::Keyword;
    for segment in schema_path.split('/').skip(1) {
        match step {
            Step::Name => {
                pointer.push('/');
                pointer.push_str(segment);
                step = Step::Keyword;
                continue;
            }
            Step::MaybeIndex if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) => {
                pointer.push('/');
                pointer.push_str(segment);
                step = Step::Keyword;
                continue;
            }
            _ => {}
        }
        if segment == "$ref" {
            let target = schema
                .pointer(&pointer)
                .and_then(|s| s.get("$ref"))
                .and_then(Value::as_str)
                .and_then(|r| r.strip_prefix('#'));
            keyword_pointer = format!("{pointer}/$ref");
            pointer = match target {
                Some(local) => local.to_string(),
                None => keyword_pointer.clone(),
            };
        } else {
            pointer.push('/');
            pointer.push_str(segment);
            keyword_pointer = pointer.clone();
        }
        keyword = segment.to_string();
        step = if NAMED_CHILDREN.contains(&segment) {
            Step::Name
        } else if INDEXED_CHILDREN.contains(&segment) {
            Step::MaybeIndex
        } else {
            Step::Keyword
        };
    }
    let params = schema
        .pointer(&keyword_pointer)
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new()));
    (keyword, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn person_schema() -> Value {
        json!({
            "type": "object",
            "required": ["name", "status"],
            "properties": {
                "name": {"type": "string"},
                "status": {"enum": ["open", "done"]},
                "code": {"type": "string", "pattern": "^\\d{3}$"},
                "tags": {"type": "array", "items": {"type": "string"}}
            }
        })
    }

    #[test]
    fn valid_item_has_no_record() {
        let v = ItemValidator::new(person_schema()).unwrap();
        assert!(v.check(0, &json!({"name": "a", "status": "open", "code": "123"})).is_none());
    }

    #[test]
    fn type_violation_record() {
        let v = ItemValidator::new(person_schema()).unwrap();
        let r = v.check(4, &json!({"name": 7, "status": "open"})).unwrap();
        assert_eq!(r.item_index, Some(5));
        assert_eq!(r.instance_path, "workitems[4]/name");
        assert_eq!(r.schema_path, "/properties/name/type");
        assert_eq!(r.keyword, "type");
        assert_eq!(r.params, json!("string"));
        assert!(!r.message.is_empty());
    }

    #[test]
    fn required_violation_points_at_item_root() {
        let v = ItemValidator::new(person_schema()).unwrap();
        let r = v.check(0, &json!({"name": "a"})).unwrap();
        assert_eq!(r.instance_path, "workitems[0]");
        assert_eq!(r.keyword, "required");
        assert_eq!(r.params, json!(["name", "status"]));
    }

    #[test]
    fn pattern_and_enum_violations() {
        let v = ItemValidator::new(person_schema()).unwrap();
        let r = v.check(0, &json!({"name": "a", "status": "open", "code": "12a"})).unwrap();
        assert_eq!(r.keyword, "pattern");
        assert_eq!(r.params, json!("^\\d{3}$"));
        let r = v.check(0, &json!({"name": "a", "status": "closed"})).unwrap();
        assert_eq!(r.keyword, "enum");
        assert_eq!(r.params, json!(["open", "done"]));
    }

    #[test]
    fn nested_array_item_path() {
        let v = ItemValidator::new(person_schema()).unwrap();
        let r = v.check(1, &json!({"name": "a", "status": "done", "tags": ["x", 2]})).unwrap();
        assert_eq!(r.instance_path, "workitems[1]/tags/1");
        assert_eq!(r.keyword, "type");
        assert_eq!(r.params, json!("string"));
    }

    #[test]
    fn only_first_error_is_kept() {
        let v = ItemValidator::new(person_schema()).unwrap();
        let report = v.validate_all(&[json!({"name": 1, "status": "nope", "code": "x"})]);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.counts.unwrap().invalid_items, 1);
    }

    #[test]
    fn counts_and_indices_over_all_items() {
        let v = ItemValidator::new(person_schema()).unwrap();
        let items = vec![
            json!({"name": "a", "status": "open"}),
            json!({"name": "b"}),
            json!({"name": "c", "status": "done"}),
            json!("not an object"),
            json!({"name": "e", "status": "open"}),
        ];
        let report = v.validate_all(&items);
        let c = report.counts.unwrap();
        assert_eq!((c.item_count, c.valid_items, c.invalid_items), (5, 3, 2));
        assert!(!report.is_valid);
        let indices: Vec<_> = report.errors.iter().map(|e| e.item_index).collect();
        assert_eq!(indices, vec![Some(2), Some(4)]);
    }

    #[test]
    fn empty_schema_accepts_anything() {
        let v = ItemValidator::new(json!({})).unwrap();
        let report = v.validate_all(&[json!(1), json!("x"), json!({"a": [null]}), json!(null)]);
        assert!(report.is_valid);
        assert_eq!(report.counts.unwrap().valid_items, 4);
    }

    #[test]
    fn wrapper_lookup() {
        let wrapper = json!({"outputDataDefinition": {"outputSchema": {"type": "object"}}});
        let v = ItemValidator::from_wrapper(&wrapper).unwrap();
        assert_eq!(v.schema(), &json!({"type": "object"}));

        let err = ItemValidator::from_wrapper(&json!({"outputDataDefinition": {}})).err().unwrap();
        assert!(matches!(err, Error::MissingOutputSchema));
        let err = ItemValidator::from_wrapper(&json!([1])).err().unwrap();
        assert!(matches!(err, Error::MissingOutputSchema));
    }

    #[test]
    fn remote_refs_are_not_fetched() {
        let err = ItemValidator::new(json!({"$ref": "http://schemas.example.invalid/item.json"}))
            .err()
            .unwrap();
        assert!(matches!(err, Error::InvalidSchema(_)));
    }

    #[test]
    fn uncompilable_schema_is_rejected() {
        let err = ItemValidator::new(json!({"type": "string", "pattern": "("})).err().unwrap();
        assert!(matches!(err, Error::InvalidSchema(_)));
    }

    #[test]
    fn keyword_skips_property_names() {
        let schema = json!({"properties": {"type": {"properties": {"required": {"minLength": 2}}}}});
        let (kw, params) = locate_keyword(&schema, "/properties/type/properties/required/minLength");
        assert_eq!(kw, "minLength");
        assert_eq!(params, json!(2));
    }

    #[test]
    fn keyword_skips_indices_and_dependency_names() {
        let schema = json!({
            "anyOf": [{"type": "string"}, {"type": "integer"}],
            "dependencies": {"a": ["b"]}
        });
        assert_eq!(locate_keyword(&schema, "/anyOf/1/type"), ("type".to_string(), json!("integer")));
        assert_eq!(locate_keyword(&schema, "/anyOf"), ("anyOf".to_string(), schema["anyOf"].clone()));
        assert_eq!(locate_keyword(&schema, "/dependencies/a"), ("dependencies".to_string(), json!({"a": ["b"]})));
    }

    #[test]
    fn keyword_follows_local_refs() {
        let schema = json!({
            "definitions": {"id": {"type": "integer", "minimum": 1}},
            "properties": {"id": {"$ref": "#/definitions/id"}}
        });
        let (kw, params) = locate_keyword(&schema, "/properties/id/$ref/minimum");
        assert_eq!(kw, "minimum");
        assert_eq!(params, json!(1));
        let (kw, params) = locate_keyword(&schema, "/properties/missing/$ref/type");
        assert_eq!(kw, "type");
        assert_eq!(params, json!({}));
    }

    #[test]
    fn empty_schema_path() {
        assert_eq!(locate_keyword(&json!({}), ""), (String::new(), json!({})));
    }
}
