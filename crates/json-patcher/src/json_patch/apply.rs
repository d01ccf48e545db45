//! JSON Patch apply logic.

use log::{debug, trace};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::equal::deep_equal;
use super::resolve::{resolve, Location};
use super::types::{ErrorHandling, JsonPointer, Op, PatchError, PatchOptions};

// ── Individual operation applicators ─────────────────────────────────────

fn apply_add(doc: &mut Value, path: &JsonPointer, value: Value) -> Result<(), PatchError> {
    match resolve(doc, path)? {
        Location::Root(root) => *root = value,
        Location::Slot(slot) => slot.set(value),
    }
    Ok(())
}

fn apply_add_many(doc: &mut Value, path: &JsonPointer, value: Value) -> Result<(), PatchError> {
    match resolve(doc, path)? {
        Location::Root(_) => Err(PatchError::NonArrayTarget {
            path: path.to_string(),
        }),
        Location::Slot(slot) => slot.set_many(value),
    }
}

fn apply_remove(doc: &mut Value, path: &JsonPointer) -> Result<(), PatchError> {
    match resolve(doc, path)? {
        Location::Root(root) => *root = Value::Null,
        Location::Slot(slot) => {
            slot.remove()?;
        }
    }
    Ok(())
}

fn apply_replace(doc: &mut Value, path: &JsonPointer, value: Value) -> Result<(), PatchError> {
    match resolve(doc, path)? {
        Location::Root(root) => *root = value,
        Location::Slot(slot) => {
            slot.replace(value)?;
        }
    }
    Ok(())
}

fn apply_copy(doc: &mut Value, path: &JsonPointer, from: &JsonPointer) -> Result<(), PatchError> {
    let value = match resolve(doc, from)? {
        Location::Root(root) => root.clone(),
        Location::Slot(slot) => slot.get()?.clone(),
    };
    apply_add(doc, path, value)
}

/// Remove at `from`, then add at `path`.
///
/// When `path` fails to resolve after the removal, the value is put back at
/// its original key position or index before the error is returned.
fn apply_move(doc: &mut Value, path: &JsonPointer, from: &JsonPointer) -> Result<(), PatchError> {
    let self_containment = || PatchError::SelfContainment {
        from: from.to_string(),
        path: path.to_string(),
    };
    if from.is_prefix_of(path) {
        return Err(self_containment());
    }
    let detached = match resolve(doc, from)? {
        // The root pointer is a prefix of every path.
        Location::Root(_) => return Err(self_containment()),
        Location::Slot(slot) => slot.detach()?,
    };

    let err = match resolve(doc, path) {
        Ok(Location::Root(root)) => {
            *root = detached.value;
            return Ok(());
        }
        Ok(Location::Slot(slot)) => {
            slot.set(detached.value);
            return Ok(());
        }
        Err(err) => err,
    };

    // Only the source container changed, so `from` resolves again.
    if let Ok(Location::Slot(slot)) = resolve(doc, from) {
        slot.reattach(detached);
    }
    Err(err)
}

fn apply_test(doc: &mut Value, path: &JsonPointer, value: &Value) -> Result<(), PatchError> {
    let equal = match resolve(doc, path)? {
        Location::Root(root) => deep_equal(root, value),
        Location::Slot(slot) => deep_equal(slot.get()?, value),
    };
    if equal {
        Ok(())
    } else {
        Err(PatchError::ValueMismatch {
            path: path.to_string(),
        })
    }
}

// ── Public API ────────────────────────────────────────────────────────────

/// Apply a single operation to `doc` in place.
///
/// On error, `doc` is left as it was before the call.
pub fn apply_op(doc: &mut Value, op: &Op) -> Result<(), PatchError> {
    match op {
        Op::Add { path, value, .. } => apply_add(doc, path, value.clone()),
        Op::AddMany { path, value, .. } => apply_add_many(doc, path, value.clone()),
        Op::Remove { path, .. } => apply_remove(doc, path),
        Op::Replace { path, value, .. } => apply_replace(doc, path, value.clone()),
        Op::Move { path, from, .. } => apply_move(doc, path, from),
        Op::Copy { path, from, .. } => apply_copy(doc, path, from),
        Op::Test { path, value, .. } => apply_test(doc, path, value),
    }
}

fn apply_ops(working: &mut Value, ops: &[Op], options: &PatchOptions) -> Result<(), PatchError> {
    for (index, op) in ops.iter().enumerate() {
        match apply_op(working, op) {
            Ok(()) => trace!("applied op #{index} '{}' at '{}'", op.op_name(), op.path()),
            Err(err) => match op.on_error().unwrap_or(options.on_error) {
                ErrorHandling::Throw => {
                    debug!("op #{index} '{}' failed: {err}", op.op_name());
                    return Err(err);
                }
                ErrorHandling::Skip => {
                    debug!("skipping op #{index} '{}': {err}", op.op_name());
                }
            },
        }
    }
    Ok(())
}

/// Apply `ops` in order to a copy of `doc` and return the copy.
///
/// `doc` itself is never modified. Each failing operation is handled by its
/// own `on_error` override, or by `options.on_error` when it has none:
/// [`ErrorHandling::Throw`] aborts with the error, [`ErrorHandling::Skip`]
/// discards that operation and continues with the next one.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use json_patcher::json_patch::{apply_patch, Op, PatchOptions};
///
/// let doc = json!({"list": [1, 2, 3]});
/// let ops = vec![
///     Op::add_many("/list/1", json!([4, 5])).unwrap(),
///     Op::remove("/missing").unwrap(),
/// ];
/// let out = apply_patch(&doc, &ops, &PatchOptions::skipping()).unwrap();
/// assert_eq!(out, json!({"list": [1, 4, 5, 2, 3]}));
/// assert_eq!(doc, json!({"list": [1, 2, 3]}));
/// ```
pub fn apply_patch(doc: &Value, ops: &[Op], options: &PatchOptions) -> Result<Value, PatchError> {
    let mut working = doc.clone();
    apply_ops(&mut working, ops, options)?;
    Ok(working)
}

/// Apply `ops` to the JSON projection of `obj` and read the result back as a
/// new `T`.
///
/// # Errors
///
/// [`PatchError::Projection`] when `obj` can't be represented as JSON or the
/// patched document no longer fits `T`; otherwise as [`apply_patch`].
pub fn apply_patch_to<T>(obj: &T, ops: &[Op], options: &PatchOptions) -> Result<T, PatchError>
where
    T: Serialize + DeserializeOwned,
{
    let mut working =
        serde_json::to_value(obj).map_err(|e| PatchError::Projection(e.to_string()))?;
    apply_ops(&mut working, ops, options)?;
    serde_json::from_value(working).map_err(|e| PatchError::Projection(e.to_string()))
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json_patch::types::ErrorKind;
    use serde_json::json;

    fn path(s: &str) -> JsonPointer {
        JsonPointer::parse(s).unwrap()
    }

    #[test]
    fn add_to_object() {
        let mut doc = json!({"a": 1});
        apply_op(&mut doc, &Op::add("/b", json!(2)).unwrap()).unwrap();
        assert_eq!(doc, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn add_at_root_replaces_document() {
        let mut doc = json!({"a": 1});
        apply_op(&mut doc, &Op::add("", json!([1])).unwrap()).unwrap();
        assert_eq!(doc, json!([1]));
    }

    #[test]
    fn add_into_array_boundaries() {
        let mut doc = json!([1, 2]);
        apply_op(&mut doc, &Op::add("/2", json!(3)).unwrap()).unwrap();
        assert_eq!(doc, json!([1, 2, 3]));

        let err = apply_op(&mut doc, &Op::add("/4", json!(9)).unwrap()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PathNotFound);
        assert_eq!(doc, json!([1, 2, 3]));
    }

    #[test]
    fn add_many_at_root_fails() {
        let mut doc = json!([1]);
        let err = apply_op(&mut doc, &Op::add_many("", json!([2])).unwrap()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NonArrayTarget);
    }

    #[test]
    fn remove_root_yields_null() {
        let mut doc = json!({"a": 1});
        apply_op(&mut doc, &Op::remove("").unwrap()).unwrap();
        assert_eq!(doc, Value::Null);
    }

    #[test]
    fn replace_root_and_missing() {
        let mut doc = json!({"a": 1});
        apply_op(&mut doc, &Op::replace("", json!(7)).unwrap()).unwrap();
        assert_eq!(doc, json!(7));

        let mut doc = json!({"a": 1});
        let err = apply_op(&mut doc, &Op::replace("/b", json!(2)).unwrap()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::KeyNotFound);
        assert_eq!(doc, json!({"a": 1}));
    }

    #[test]
    fn move_within_array() {
        let mut doc = json!([1, 2, 3]);
        apply_op(&mut doc, &Op::move_from("/0", "/1").unwrap()).unwrap();
        assert_eq!(doc, json!([2, 1, 3]));

        let mut doc = json!([1, 2, 3]);
        apply_op(&mut doc, &Op::move_from("/1", "/-").unwrap()).unwrap();
        assert_eq!(doc, json!([1, 3, 2]));
    }

    #[test]
    fn move_into_own_child_fails() {
        let mut doc = json!({"a": {"b": 1}});
        let err = apply_op(&mut doc, &Op::move_from("/a", "/a/c").unwrap()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SelfContainmentViolation);

        let err = apply_op(&mut doc, &Op::move_from("", "/x").unwrap()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SelfContainmentViolation);
        assert!(err.to_string().contains("parent"));
        assert!(err.to_string().contains("child"));
        assert_eq!(doc, json!({"a": {"b": 1}}));
    }

    #[test]
    fn move_to_same_location_is_noop() {
        let mut doc = json!({"a": 1, "b": 2});
        apply_op(&mut doc, &Op::move_from("/a", "/a").unwrap()).unwrap();
        assert_eq!(doc, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn failed_move_restores_source() {
        let mut doc = json!({"a": 1, "var": 5, "z": 0});
        let err = apply_op(&mut doc, &Op::move_from("/var", "/boo/foo").unwrap()).unwrap_err();
        assert!(err.to_string().contains("boo"));
        let keys: Vec<&String> = doc.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["a", "var", "z"]);
        assert_eq!(doc["var"], json!(5));

        let mut doc = json!({"arr": [1, 2, 3], "tar": []});
        let err = apply_op(&mut doc, &Op::move_from("/arr/1", "/tar/7").unwrap()).unwrap_err();
        assert!(err.to_string().contains('7'));
        assert_eq!(doc, json!({"arr": [1, 2, 3], "tar": []}));
    }

    #[test]
    fn copy_is_deep() {
        let mut doc = json!({"a": {"b": [1]}});
        apply_op(&mut doc, &Op::copy_from("/a", "/c").unwrap()).unwrap();
        apply_op(&mut doc, &Op::add("/c/b/-", json!(2)).unwrap()).unwrap();
        assert_eq!(doc, json!({"a": {"b": [1]}, "c": {"b": [1, 2]}}));
    }

    #[test]
    fn copy_root_into_itself() {
        let mut doc = json!([1, 2, 3]);
        apply_op(&mut doc, &Op::copy_from("", "/2").unwrap()).unwrap();
        assert_eq!(doc, json!([1, 2, [1, 2, 3], 3]));
    }

    #[test]
    fn test_op_uses_numeric_equality() {
        let mut doc = json!({"n": 1});
        apply_op(&mut doc, &Op::test("/n", json!(1.0)).unwrap()).unwrap();
        let err = apply_op(&mut doc, &Op::test("/n", json!(2)).unwrap()).unwrap_err();
        assert_eq!(err, PatchError::ValueMismatch { path: "/n".into() });
    }

    #[test]
    fn op_level_skip_overrides_throw() {
        let doc = json!({"a": 1});
        let ops = vec![
            Op::remove("/missing").unwrap().with_on_error(ErrorHandling::Skip),
            Op::add("/b", json!(2)).unwrap(),
        ];
        let out = apply_patch(&doc, &ops, &PatchOptions::default()).unwrap();
        assert_eq!(out, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn op_level_throw_overrides_skip() {
        let doc = json!({"a": 1});
        let ops = vec![Op::Remove {
            path: path("/missing"),
            on_error: Some(ErrorHandling::Throw),
        }];
        let err = apply_patch(&doc, &ops, &PatchOptions::skipping()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::KeyNotFound);
    }

    #[test]
    fn projection_roundtrip() {
        #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
        struct Point {
            x: i32,
            y: i32,
        }

        let p = Point { x: 1, y: 2 };
        let ops = vec![Op::replace("/x", json!(10)).unwrap()];
        let out = apply_patch_to(&p, &ops, &PatchOptions::default()).unwrap();
        assert_eq!(out, Point { x: 10, y: 2 });
        assert_eq!(p, Point { x: 1, y: 2 });

        let ops = vec![Op::replace("/y", json!("text")).unwrap()];
        let err = apply_patch_to(&p, &ops, &PatchOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Projection);
    }
}
