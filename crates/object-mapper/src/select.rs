//! Reading values out of a source tree.

use crate::parser::parse_path;
use crate::types::{parse_position, resolve_position, PathSegment, WILDCARD_NAME};
use crate::value::Value;

/// Selects the value at `path` inside `node`.
///
/// Absence of any kind (missing key, index out of range, a shape that does not
/// match the path) is `None`. A stored `null` is also `None`.
///
/// Wildcards collect sub-results into arrays. `[]` keeps each result at the
/// index it came from, leaving holes for elements that yielded nothing; `*`
/// packs its results densely.
pub fn select(node: &Value, path: &[PathSegment]) -> Option<Value> {
    match path.split_first()? {
        (PathSegment::Index { ix, .. }, rest) => select_arr(node, ix, rest),
        (PathSegment::Name { name, .. }, rest) => select_obj(node, name, rest),
    }
}

/// Parses `path` and selects it from `source`.
///
/// # Example
///
/// ```
/// use object_mapper::{get_value, Value};
/// use serde_json::json;
///
/// let src = Value::from(json!({"foo": [{"bar": "a"}, {"bar": "b"}]}));
/// assert_eq!(get_value(&src, "foo[].bar"), Some(Value::from(json!(["a", "b"]))));
/// assert_eq!(get_value(&src, "foo.bar"), Some(Value::from("a")));
/// assert_eq!(get_value(&src, "foo[5].bar"), None);
/// ```
pub fn get_value(source: &Value, path: &str) -> Option<Value> {
    select(source, &parse_path(path))
}

fn descend(node: &Value, rest: &[PathSegment]) -> Option<Value> {
    if rest.is_empty() {
        (!node.is_null()).then(|| node.clone())
    } else {
        select(node, rest)
    }
}

fn select_arr(node: &Value, ix: &str, rest: &[PathSegment]) -> Option<Value> {
    let Value::Array(items) = node else {
        // Not a sequence: keep going with the rest of the path and wrap the
        // result as if the node had been a one-element sequence.
        if rest.is_empty() {
            return None;
        }
        return select(node, rest).map(|found| Value::array([found]));
    };

    let mut results: Vec<Option<Value>> = items
        .iter()
        .map(|item| item.as_ref().and_then(|item| descend(item, rest)))
        .collect();
    while matches!(results.last(), Some(None)) {
        results.pop();
    }

    if ix.is_empty() && !results.is_empty() {
        return Some(Value::Array(results));
    }

    // Negative positions count from the end of the results, not of the source.
    if let Some(found) = parse_position(ix)
        .and_then(|pos| resolve_position(pos, results.len()))
        .and_then(|i| results.get(i).cloned().flatten())
    {
        return Some(found);
    }

    if let ([Some(Value::Object(only))], Some(PathSegment::Name { name, .. })) =
        (results.as_slice(), rest.first())
    {
        return only.get(name).filter(|v| !v.is_null()).cloned();
    }

    None
}

fn select_obj(node: &Value, name: &str, rest: &[PathSegment]) -> Option<Value> {
    if name == WILDCARD_NAME {
        return select_keys(node, rest);
    }
    match node {
        Value::Object(map) => map.get(name).and_then(|child| descend(child, rest)),
        // A sequence where a key was expected: look in its first element.
        Value::Array(items) => match items.first() {
            Some(Some(Value::Object(first))) => {
                first.get(name).and_then(|child| descend(child, rest))
            }
            _ => None,
        },
        _ => None,
    }
}

fn select_keys(node: &Value, rest: &[PathSegment]) -> Option<Value> {
    let found: Vec<Value> = match node {
        Value::Object(map) => map.values().filter_map(|child| descend(child, rest)).collect(),
        Value::Array(items) => items
            .iter()
            .flatten()
            .filter_map(|child| descend(child, rest))
            .collect(),
        _ => return None,
    };
    if found.is_empty() {
        None
    } else {
        Some(Value::array(found))
    }
}
