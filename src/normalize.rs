use crate::value::Value;
use indexmap::IndexMap;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizeError {
    #[error("Cannot normalize non-text value of kind {0}")]
    NotText(String),
}

/// Canonicalization rule for scalar leaves of a configuration tree.
pub trait TextNormalizer {
    /// Normalize one scalar: never called with null, arrays or objects.
    fn normalize(&self, value: &Value) -> Result<Value, NormalizeError>;
}

/// Strips surrounding whitespace and upper-cases text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrimUppercase;

impl TextNormalizer for TrimUppercase {
    fn normalize(&self, value: &Value) -> Result<Value, NormalizeError> {
        match value {
            Value::String(s) => Ok(Value::String(s.trim().to_uppercase())),
            other => Err(NormalizeError::NotText(other.kind().to_string())),
        }
    }
}

/// Recursively apply `func` to the scalar leaves of `value`.
///
/// Objects are rebuilt with the same keys in the same order; an entry whose
/// key is in `skipped_keys` is copied over untouched, nested or not. Arrays
/// keep their length and order, and their elements are never skipped. Null
/// stays null without calling `func`. The first error from `func` aborts the
/// walk.
pub fn apply_func<F, E>(
    value: &Value,
    func: &F,
    skipped_keys: &HashSet<String>,
) -> Result<Value, E>
where
    F: Fn(&Value) -> Result<Value, E>,
{
    match value {
        Value::Object(map) => {
            let mut result = IndexMap::with_capacity(map.len());
            for (k, v) in map {
                let v = if skipped_keys.contains(k) {
                    v.clone()
                } else {
                    apply_func(v, func, skipped_keys)?
                };
                result.insert(k.clone(), v);
            }
            Ok(Value::Object(result))
        }
        Value::Array(items) => items
            .iter()
            .map(|v| apply_func(v, func, skipped_keys))
            .collect::<Result<Vec<_>, E>>()
            .map(Value::Array),
        Value::Null => Ok(Value::Null),
        scalar => func(scalar),
    }
}

/// [`apply_func`] driven by a [`TextNormalizer`].
pub fn normalize_with<N>(
    value: &Value,
    normalizer: &N,
    skipped_keys: &HashSet<String>,
) -> Result<Value, NormalizeError>
where
    N: TextNormalizer + ?Sized,
{
    apply_func(value, &|v: &Value| normalizer.normalize(v), skipped_keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use serde_json::json;
    use std::convert::Infallible;

    fn upper(v: &Value) -> Result<Value, Infallible> {
        Ok(match v {
            Value::String(s) => Value::String(s.trim().to_uppercase()),
            other => other.clone(),
        })
    }

    fn keys(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn tree(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    /// `Value` equality ignores object key order; the serialized form does not.
    fn assert_same_order(actual: &Value, expected: &Value) {
        assert_eq!(
            serde_json::to_string(actual).unwrap(),
            serde_json::to_string(expected).unwrap()
        );
    }

    #[rstest]
    #[case::null(json!(null), json!(null))]
    #[case::scalar(json!(" abc "), json!("ABC"))]
    #[case::empty_object(json!({}), json!({}))]
    #[case::empty_array(json!([]), json!([]))]
    #[case::flat_object(json!({"b": null, "a": "x"}), json!({"b": null, "a": "X"}))]
    #[case::array_of_objects(
        json!([
            {"dimension": " region ", "column_in_source_table": "region_id", "analytical_view_name": "sales"},
            {"dimension": "city", "column_in_source_table": "city_id", "analytical_view_name": "sales"}
        ]),
        json!([
            {"dimension": "REGION", "column_in_source_table": "REGION_ID", "analytical_view_name": "SALES"},
            {"dimension": "CITY", "column_in_source_table": "CITY_ID", "analytical_view_name": "SALES"}
        ])
    )]
    #[case::mixed_nesting(
        json!({"outer": [{"z": "q", "inner": {"deep": [" a ", ["b", {"c": "d", "b": "e"}]], "alpha": "f"}}]}),
        json!({"outer": [{"z": "Q", "inner": {"deep": ["A", ["B", {"c": "D", "b": "E"}]], "alpha": "F"}}]})
    )]
    fn test_apply_func_shapes(
        #[case] input: serde_json::Value,
        #[case] expected: serde_json::Value,
    ) {
        let result = apply_func(&tree(input), &upper, &HashSet::new()).unwrap();
        let expected = tree(expected);
        assert_eq!(result, expected);
        assert_same_order(&result, &expected);
    }

    #[test]
    fn test_apply_func_preserves_key_order() {
        let mut map = IndexMap::new();
        map.insert("zeta".to_string(), Value::from("z"));
        map.insert("alpha".to_string(), Value::from("a"));
        map.insert("mid".to_string(), Value::Null);
        let input = Value::Object(map);

        let result = apply_func(&input, &upper, &keys(&["alpha"])).unwrap();
        let result_keys: Vec<&String> = result.as_object().unwrap().keys().collect();
        assert_eq!(result_keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_skipped_keys_are_copied_untouched() {
        let input = tree(json!({
            "id": " keep me ",
            "nested": {"x": " y "},
            "name": " change me "
        }));
        let result = apply_func(&input, &upper, &keys(&["id", "nested", "absent"])).unwrap();

        assert_eq!(result.get("id"), input.get("id"));
        assert_eq!(result.get("nested"), input.get("nested"));
        assert_eq!(result.get("name"), Some(&Value::from("CHANGE ME")));
    }

    #[test]
    fn test_skipped_keys_apply_inside_arrays() {
        let input = tree(json!([{"v": " b ", "id": " a "}, "id"]));
        let result = apply_func(&input, &upper, &keys(&["id"])).unwrap();
        assert_same_order(&result, &tree(json!([{"v": "B", "id": " a "}, "ID"])));
    }

    #[test]
    fn test_sequence_elements_normalized_independently() {
        let input = tree(json!([" a ", null, {"k": " v "}, [" w "]]));
        let result = apply_func(&input, &upper, &HashSet::new()).unwrap();
        let (items, normalized_items) = (input.as_array().unwrap(), result.as_array().unwrap());
        assert_eq!(items.len(), normalized_items.len());
        for (item, normalized) in items.iter().zip(normalized_items) {
            assert_eq!(&apply_func(item, &upper, &HashSet::new()).unwrap(), normalized);
        }
    }

    #[test]
    fn test_null_never_reaches_func() {
        let failing = |_: &Value| -> Result<Value, String> { Err("called".to_string()) };
        let input = tree(json!({"a": null, "b": [null, null]}));
        assert_eq!(apply_func(&input, &failing, &HashSet::new()).unwrap(), input);
    }

    #[test]
    fn test_func_error_propagates() {
        let failing = |v: &Value| -> Result<Value, String> {
            match v.as_str() {
                Some("bad") => Err("bad value".to_string()),
                _ => Ok(v.clone()),
            }
        };
        let input = tree(json!({"ok": "fine", "list": ["also fine", "bad"]}));
        assert_eq!(
            apply_func(&input, &failing, &HashSet::new()),
            Err("bad value".to_string())
        );
    }

    #[test]
    fn test_input_not_mutated() {
        let input = tree(json!({"a": [" x "]}));
        let snapshot = input.clone();
        let _ = apply_func(&input, &upper, &HashSet::new()).unwrap();
        assert_eq!(input, snapshot);
    }

    #[test]
    fn test_idempotent_for_idempotent_func() {
        let input = tree(json!({"definition": {"a": " Mixed Case "}, "dimensions": [{"d": " x"}]}));
        let once = normalize_with(&input, &TrimUppercase, &HashSet::new()).unwrap();
        let twice = normalize_with(&once, &TrimUppercase, &HashSet::new()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_deep_nesting() {
        let mut value = Value::from(" leaf ");
        for depth in 0..200 {
            value = if depth % 2 == 0 {
                Value::Array(vec![value])
            } else {
                let mut map = IndexMap::new();
                map.insert("child".to_string(), value);
                Value::Object(map)
            };
        }
        let mut result = normalize_with(&value, &TrimUppercase, &HashSet::new()).unwrap();
        loop {
            result = match result {
                Value::Array(mut items) => items.remove(0),
                Value::Object(mut map) => map.swap_remove("child").unwrap(),
                leaf => {
                    assert_eq!(leaf, Value::from("LEAF"));
                    break;
                }
            };
        }
    }

    #[rstest]
    #[case::plain("sales", "SALES")]
    #[case::padded("  raw_sales\t", "RAW_SALES")]
    #[case::inner_space(" a b ", "A B")]
    #[case::empty("", "")]
    fn test_trim_uppercase(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(
            TrimUppercase.normalize(&Value::from(input)),
            Ok(Value::from(expected))
        );
    }

    #[rstest]
    #[case::int(Value::Int(3), "int")]
    #[case::boolean(Value::Boolean(true), "boolean")]
    #[case::float(Value::Float(0.5), "float")]
    fn test_trim_uppercase_rejects_non_text(#[case] input: Value, #[case] kind: &str) {
        assert_eq!(
            TrimUppercase.normalize(&input),
            Err(NormalizeError::NotText(kind.to_string()))
        );
    }
}
