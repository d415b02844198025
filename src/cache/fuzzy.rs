//! Fuzzy Equality Module
//!
//! Decides whether two requests should share a cache entry. Values that are
//! absent, `null`, `""`, `{}` or `[]` all count as "no value".

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use crate::cache::QueryParams;

// == Emptiness ==
/// Returns true when a (possibly missing) value carries no information.
///
/// `false` and `0` are real values and are not empty.
pub fn is_empty_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
        Some(_) => false,
    }
}

// == Value Comparison ==
/// Deep comparison of two loose values.
///
/// Objects compare key by key regardless of key order, arrays compare
/// element-wise by position, scalars compare by value. Empty values match
/// each other at every depth.
pub fn values_basically_equal(a: &Value, b: &Value) -> bool {
    loosely_equal(Some(a), Some(b))
}

fn loosely_equal(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (is_empty_value(a), is_empty_value(b)) {
        (true, true) => return true,
        (false, false) => {}
        _ => return false,
    }

    match (a, b) {
        (Some(Value::Object(left)), Some(Value::Object(right))) => objects_equal(left, right),
        (Some(Value::Array(left)), Some(Value::Array(right))) => {
            left.len() == right.len()
                && left
                    .iter()
                    .zip(right)
                    .all(|(x, y)| loosely_equal(Some(x), Some(y)))
        }
        (Some(left), Some(right)) => left == right,
        _ => false,
    }
}

fn objects_equal(left: &Map<String, Value>, right: &Map<String, Value>) -> bool {
    let names: BTreeSet<&str> = left.keys().chain(right.keys()).map(String::as_str).collect();
    names
        .into_iter()
        .all(|name| loosely_equal(left.get(name), right.get(name)))
}

// == Params Comparison ==
/// Fuzzy equality of two normalized parameter sets.
///
/// Absent params contribute no names, so `None` equals `{foo: ""}` but not
/// `{foo: "bar"}`. Equivalence is always decided per name.
pub fn are_basically_equal(a: Option<&QueryParams>, b: Option<&QueryParams>) -> bool {
    let names: BTreeSet<&str> = a
        .into_iter()
        .flat_map(QueryParams::names)
        .chain(b.into_iter().flat_map(QueryParams::names))
        .collect();

    names.into_iter().all(|name| {
        loosely_equal(
            a.and_then(|params| params.get(name)),
            b.and_then(|params| params.get(name)),
        )
    })
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> QueryParams {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_values() {
        assert!(is_empty_value(None));
        assert!(is_empty_value(Some(&Value::Null)));
        assert!(is_empty_value(Some(&json!(""))));
        assert!(is_empty_value(Some(&json!([]))));
        assert!(is_empty_value(Some(&json!({}))));
        assert!(!is_empty_value(Some(&json!(false))));
        assert!(!is_empty_value(Some(&json!(0))));
        assert!(!is_empty_value(Some(&json!(" "))));
    }

    #[test]
    fn test_both_absent_are_equal() {
        assert!(are_basically_equal(None, None));
        assert!(are_basically_equal(None, Some(&QueryParams::new())));
    }

    #[test]
    fn test_absent_matches_empty_valued_key() {
        let with_empty = params(json!({"foo": ""}));
        assert!(are_basically_equal(None, Some(&with_empty)));
        assert!(are_basically_equal(Some(&with_empty), None));

        let with_null = params(json!({"foo": null, "bar": {}}));
        assert!(are_basically_equal(Some(&with_null), Some(&QueryParams::new())));
    }

    #[test]
    fn test_absent_does_not_match_real_value() {
        let with_value = params(json!({"foo": "bar"}));
        assert!(!are_basically_equal(None, Some(&with_value)));
        assert!(!are_basically_equal(
            Some(&with_value),
            Some(&params(json!({"foo": ""})))
        ));
    }

    #[test]
    fn test_param_order_is_irrelevant() {
        let forward = QueryParams::new().with("a", "1").with("b", "2");
        let backward = QueryParams::new().with("b", "2").with("a", "1");
        assert!(are_basically_equal(Some(&forward), Some(&backward)));
    }

    #[test]
    fn test_scalars_compare_by_value() {
        let text = params(json!({"page": "1"}));
        let number = params(json!({"page": 1}));
        assert!(!are_basically_equal(Some(&text), Some(&number)));
        assert!(are_basically_equal(Some(&number), Some(&params(json!({"page": 1})))));
    }

    #[test]
    fn test_nested_objects_recurse() {
        let a = json!({"filter": {"name": "x", "tag": ""}});
        let b = json!({"filter": {"name": "x"}});
        assert!(values_basically_equal(&a, &b));

        let c = json!({"filter": {"name": "y"}});
        assert!(!values_basically_equal(&a, &c));
    }

    #[test]
    fn test_arrays_compare_positionally() {
        assert!(values_basically_equal(&json!(["a", null]), &json!(["a", ""])));
        assert!(!values_basically_equal(&json!(["a", "b"]), &json!(["b", "a"])));
        assert!(!values_basically_equal(&json!(["a"]), &json!(["a", "b"])));
    }

    #[test]
    fn test_false_is_not_empty() {
        let flagged = params(json!({"active": false}));
        assert!(!are_basically_equal(None, Some(&flagged)));
    }
}
