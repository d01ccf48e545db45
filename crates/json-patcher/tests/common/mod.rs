#![allow(dead_code)]

use json_patcher::json_patch::{apply_patch, from_json, ErrorHandling, Op, PatchError, PatchOptions};
use serde_json::{Map, Value};

/// Decode one operation from its wire form.
pub fn op(v: Value) -> Op {
    from_json(&v).unwrap_or_else(|e| panic!("bad op {v}: {e}"))
}

/// Decode one operation and force its `onError` override.
pub fn op_with(v: Value, mode: ErrorHandling) -> Op {
    op(v).with_on_error(mode)
}

pub fn apply_one(doc: &Value, v: Value) -> Result<Value, PatchError> {
    apply_patch(doc, &[op(v)], &PatchOptions::default())
}

/// Build a wire operation object from its fields, skipping `None`s.
pub fn wire(name: &str, path: &str, extra: Option<(&str, Value)>) -> Value {
    let mut m = Map::new();
    m.insert("op".into(), Value::String(name.into()));
    m.insert("path".into(), Value::String(path.into()));
    if let Some((key, value)) = extra {
        m.insert(key.into(), value);
    }
    Value::Object(m)
}

/// Fail the current test unless `err`'s message contains every part.
pub fn assert_message_contains(err: &PatchError, parts: &[&str]) {
    let message = err.to_string();
    for part in parts {
        assert!(message.contains(part), "{message:?} should contain {part:?}");
    }
}
