// workitems-validator/src/normalize.rs

use serde_json::Value;

/// Collapse doubled backslashes in every string stored under a `pattern` key,
/// at any depth. Schemas produced by the upstream generator escape regex
/// backslashes twice (`\\d` instead of `\d`).
///
/// One non-overlapping pass per string, so `\\\\` becomes `\\`. Non-string
/// `pattern` values (e.g. a property that happens to be named `pattern`) are
/// walked like any other subtree. Returns how many strings were rewritten.
pub fn normalize_patterns(schema: &mut Value) -> usize {
    let mut rewritten = 0;
    // explicit stack: no recursion depth limit
    let mut stack = vec![schema];
    while let Some(node) = stack.pop() {
        match node {
            Value::Object(map) => {
                for (key, value) in map.iter_mut() {
                    if key == "pattern" {
                        if let Value::String(pattern) = value {
                            if pattern.contains(r"\\") {
                                *pattern = pattern.replace(r"\\", r"\");
                                rewritten += 1;
                            }
                            continue;
                        }
                    }
                    stack.push(value);
                }
            }
            Value::Array(items) => stack.extend(items.iter_mut()),
            _ => {}
        }
    }
    rewritten
}
