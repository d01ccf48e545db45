use serde_json::{Number, Value};

/// Structural equality used by the `test` operation.
///
/// Numbers compare by value regardless of representation, so `1` equals
/// `1.0`. Objects compare as key sets, ignoring member order.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use json_patcher::json_patch::deep_equal;
///
/// assert!(deep_equal(&json!({"a": [1, 2], "b": 1}), &json!({"b": 1.0, "a": [1, 2]})));
/// assert!(!deep_equal(&json!([1, 2]), &json!([2, 1])));
/// assert!(!deep_equal(&json!(null), &json!(0)));
/// ```
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        (Value::String(a), Value::String(b)) => a == b,

        (Value::Array(arr_a), Value::Array(arr_b)) => {
            arr_a.len() == arr_b.len() && arr_a.iter().zip(arr_b).all(|(x, y)| deep_equal(x, y))
        }

        (Value::Object(obj_a), Value::Object(obj_b)) => {
            if obj_a.len() != obj_b.len() {
                return false;
            }
            for (key, val_a) in obj_a {
                match obj_b.get(key) {
                    Some(val_b) if deep_equal(val_a, val_b) => {}
                    _ => return false,
                }
            }
            true
        }

        _ => false,
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    match (integer_of(a), integer_of(b)) {
        (Some(x), Some(y)) => x == y,
        (Some(x), None) => b.as_f64().is_some_and(|f| float_equals_integer(f, x)),
        (None, Some(y)) => a.as_f64().is_some_and(|f| float_equals_integer(f, y)),
        (None, None) => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
    }
}

fn integer_of(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

/// Exact comparison; `f as i128` is lossless for an integral `f` in range.
fn float_equals_integer(f: f64, n: i128) -> bool {
    const MIN: f64 = -9_223_372_036_854_775_808.0; // -2^63
    const MAX: f64 = 18_446_744_073_709_551_616.0; // 2^64
    f.fract() == 0.0 && (MIN..MAX).contains(&f) && f as i128 == n
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn primitives() {
        assert!(deep_equal(&json!(null), &json!(null)));
        assert!(deep_equal(&json!(true), &json!(true)));
        assert!(!deep_equal(&json!(true), &json!(false)));
        assert!(deep_equal(&json!("x"), &json!("x")));
        assert!(!deep_equal(&json!("1"), &json!(1)));
    }

    #[test]
    fn numbers_compare_by_value() {
        assert!(deep_equal(&json!(5), &json!(5.0)));
        assert!(deep_equal(&json!(-3), &json!(-3.0)));
        assert!(deep_equal(&json!(u64::MAX), &json!(u64::MAX)));
        assert!(!deep_equal(&json!(5), &json!(5.5)));
        assert!(!deep_equal(&json!(-1), &json!(u64::MAX)));
    }

    #[test]
    fn integer_and_float_compare_exactly() {
        assert!(!deep_equal(&json!(9007199254740993_i64), &json!(9007199254740992.0)));
        assert!(!deep_equal(&json!(9007199254740992.0), &json!(9007199254740993_i64)));
        assert!(deep_equal(&json!(9007199254740992_i64), &json!(9007199254740992.0)));
        assert!(!deep_equal(&json!(u64::MAX), &json!(18446744073709551616.0)));
        assert!(!deep_equal(&json!(0), &json!(f64::MIN_POSITIVE)));
    }

    #[test]
    fn containers() {
        assert!(deep_equal(&json!([1, [2, {"a": 3}]]), &json!([1, [2, {"a": 3}]])));
        assert!(!deep_equal(&json!([1, 2]), &json!([1, 2, 3])));
        assert!(deep_equal(&json!({"a": 1, "b": 2}), &json!({"b": 2, "a": 1})));
        assert!(!deep_equal(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
        assert!(!deep_equal(&json!({"a": 1}), &json!({"b": 1})));
        assert!(!deep_equal(&json!({}), &json!([])));
    }
}
