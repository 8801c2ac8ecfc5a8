//! Order-insensitive array equality.
//!
//! Arrays are represented as [`serde_json::Value`] so that element types may
//! differ per slot, and so that "undefined" (`None`) and "null"
//! (`Some(Value::Null)`) stay distinguishable.

use std::cmp::Ordering;
use std::mem::discriminant;

use serde_json::Value;

/// Compares two arrays for multiset equality using [`primitive_comparison`].
///
/// Both `None` or both `Null` are equal; any other mix of missing and present
/// values is unequal. Otherwise both arrays are **sorted in place** and
/// compared slot by slot, requiring the same JSON type in each slot.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use urlquery_core::utils::are_equal;
///
/// let mut left = json!([1, 2]);
/// let mut right = json!([2, 1]);
/// assert!(are_equal(Some(&mut left), Some(&mut right)));
/// // Both inputs are left sorted.
/// assert_eq!(right, json!([1, 2]));
///
/// assert!(are_equal(None, None));
/// assert!(!are_equal(Some(&mut json!(null)), None));
/// ```
pub fn are_equal(left: Option<&mut Value>, right: Option<&mut Value>) -> bool {
    are_equal_by(left, right, primitive_comparison)
}

/// Compares two arrays for multiset equality using a custom item comparison.
///
/// `compare` is used both to sort the arrays and to compare the sorted
/// slots; it should describe a total order.
pub fn are_equal_by<F>(left: Option<&mut Value>, right: Option<&mut Value>, mut compare: F) -> bool
where
    F: FnMut(&Value, &Value) -> Ordering,
{
    let (left, right) = match (left, right) {
        (None, None) => return true,
        (Some(Value::Null), Some(Value::Null)) => return true,
        (Some(left), Some(right)) => (left, right),
        _ => return false,
    };

    let (Value::Array(left), Value::Array(right)) = (left, right) else {
        return false;
    };

    if left.len() != right.len() {
        return false;
    }

    left.sort_by(&mut compare);
    right.sort_by(&mut compare);

    left.iter().zip(right.iter()).all(|(a, b)| {
        discriminant(a) == discriminant(b) && compare(a, b) == Ordering::Equal
    })
}

/// Compares two items the way the relational operators order primitives.
///
/// Values of the same JSON type are ordered naturally (numbers numerically,
/// strings lexicographically, `false < true`). Values of different types are
/// ordered by type so that sorting mixed arrays stays well defined.
pub fn primitive_comparison(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => a
                .as_f64()
                .partial_cmp(&b.as_f64())
                .unwrap_or(Ordering::Equal),
        },
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Array(_), Value::Array(_)) | (Value::Object(_), Value::Object(_)) => {
            a.to_string().cmp(&b.to_string())
        }
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

const fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn eq(mut left: Option<Value>, mut right: Option<Value>) -> bool {
        are_equal(left.as_mut(), right.as_mut())
    }

    #[test]
    fn test_undefined_undefined() {
        assert!(eq(None, None));
    }

    #[test]
    fn test_null_null() {
        assert!(eq(Some(Value::Null), Some(Value::Null)));
    }

    #[test]
    fn test_undefined_null() {
        assert!(!eq(None, Some(Value::Null)));
        assert!(!eq(Some(Value::Null), None));
    }

    #[test]
    fn test_missing_against_empty_array() {
        assert!(!eq(None, Some(json!([]))));
        assert!(!eq(Some(Value::Null), Some(json!([]))));
        assert!(!eq(Some(json!([])), None));
        assert!(!eq(Some(json!([])), Some(Value::Null)));
    }

    #[test]
    fn test_missing_against_non_empty_array() {
        assert!(!eq(None, Some(json!([10, 1]))));
        assert!(!eq(Some(Value::Null), Some(json!([2, 1]))));
        assert!(!eq(Some(json!([1, 2, 3, 4])), None));
        assert!(!eq(Some(json!(["a", "b"])), Some(Value::Null)));
    }

    #[test]
    fn test_empty_arrays_equal() {
        assert!(eq(Some(json!([])), Some(json!([]))));
    }

    #[test]
    fn test_string_arrays() {
        assert!(!eq(Some(json!(["a", "b"])), Some(json!(["a", "b", "c"]))));
        assert!(eq(Some(json!(["a", "b"])), Some(json!(["a", "b"]))));
        assert!(eq(Some(json!(["a", "b"])), Some(json!(["b", "a"]))));
        assert!(!eq(Some(json!(["a", "b"])), Some(json!(["b", "c"]))));
    }

    #[test]
    fn test_numeric_arrays() {
        assert!(!eq(Some(json!([1, 2])), Some(json!([1, 2, 3]))));
        assert!(eq(Some(json!([1, 2])), Some(json!([1, 2]))));
        assert!(eq(Some(json!([1, 2])), Some(json!([2, 1]))));
        assert!(!eq(Some(json!([1, 2])), Some(json!([2, 3]))));
    }

    #[test]
    fn test_numbers_sort_numerically() {
        assert!(eq(Some(json!([10, 9, 1])), Some(json!([1, 10, 9]))));
        assert!(eq(Some(json!([1.5, -2])), Some(json!([-2, 1.5]))));
    }

    #[test]
    fn test_arrays_with_different_types() {
        assert!(!eq(Some(json!(["a", "b"])), Some(json!([1, 2]))));
        assert!(!eq(Some(json!(["1"])), Some(json!([1]))));
    }

    #[test]
    fn test_non_array_values_are_unequal() {
        assert!(!eq(Some(json!("ab")), Some(json!("ab"))));
        assert!(!eq(Some(json!({"a": 1})), Some(json!([]))));
    }

    #[test]
    fn test_inputs_are_sorted_in_place() {
        let mut left = json!([3, 1, 2]);
        let mut right = json!([2, 3, 1]);
        assert!(are_equal(Some(&mut left), Some(&mut right)));
        assert_eq!(left, json!([1, 2, 3]));
        assert_eq!(right, json!([1, 2, 3]));
    }

    #[test]
    fn test_custom_comparison() {
        let case_insensitive = |a: &Value, b: &Value| {
            let a = a.as_str().unwrap_or_default().to_lowercase();
            let b = b.as_str().unwrap_or_default().to_lowercase();
            a.cmp(&b)
        };
        let mut left = json!(["B", "a"]);
        let mut right = json!(["A", "b"]);
        assert!(are_equal_by(Some(&mut left), Some(&mut right), case_insensitive));
        assert!(!are_equal(Some(&mut left), Some(&mut right)));
    }

    #[test]
    fn test_primitive_comparison() {
        assert_eq!(primitive_comparison(&json!(1), &json!(2)), Ordering::Less);
        assert_eq!(primitive_comparison(&json!("b"), &json!("a")), Ordering::Greater);
        assert_eq!(primitive_comparison(&json!(true), &json!(true)), Ordering::Equal);
        assert_eq!(primitive_comparison(&json!(1), &json!("a")), Ordering::Less);
    }
}
