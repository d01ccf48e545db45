//! JSON codec for patch operations.
//!
//! An operation is an object with `op` and `path`, an optional `onError`, and
//! either `value` (add, addmany, replace, test) or `from` (move, copy).
//! Fields are written in that order. `op` and `onError` are matched
//! case-insensitively on read.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Map, Value};

use crate::json_patch::types::{ErrorHandling, JsonPointer, Op, PatchError};

// ── Path helpers ──────────────────────────────────────────────────────────

fn encode_path(path: &JsonPointer) -> Value {
    Value::String(path.to_string())
}

fn required<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a Value, PatchError> {
    obj.get(key)
        .ok_or_else(|| PatchError::InvalidOp(format!("Patch operation must contain '{key}' property")))
}

fn decode_pointer(obj: &Map<String, Value>, key: &str) -> Result<JsonPointer, PatchError> {
    let s = required(obj, key)?
        .as_str()
        .ok_or_else(|| PatchError::InvalidOp(format!("'{key}' property must be a string")))?;
    Ok(JsonPointer::parse(s)?)
}

fn decode_on_error(obj: &Map<String, Value>) -> Result<Option<ErrorHandling>, PatchError> {
    match obj.get("onError") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => s.parse().map(Some),
        Some(other) => Err(PatchError::InvalidOp(format!(
            "Unknown value of 'onError' property: '{other}'"
        ))),
    }
}

// ── Decoders ──────────────────────────────────────────────────────────────

type Decoder = fn(&Map<String, Value>, JsonPointer, Option<ErrorHandling>) -> Result<Op, PatchError>;

/// Every operation name with the function that builds it.
const DECODERS: [(&str, Decoder); 7] = [
    ("add", decode_add),
    ("addmany", decode_add_many),
    ("remove", decode_remove),
    ("replace", decode_replace),
    ("move", decode_move),
    ("copy", decode_copy),
    ("test", decode_test),
];

fn decode_add(obj: &Map<String, Value>, path: JsonPointer, on_error: Option<ErrorHandling>) -> Result<Op, PatchError> {
    let value = required(obj, "value")?.clone();
    Ok(Op::Add { path, value, on_error })
}

fn decode_add_many(obj: &Map<String, Value>, path: JsonPointer, on_error: Option<ErrorHandling>) -> Result<Op, PatchError> {
    let value = required(obj, "value")?.clone();
    Ok(Op::AddMany { path, value, on_error })
}

fn decode_remove(_obj: &Map<String, Value>, path: JsonPointer, on_error: Option<ErrorHandling>) -> Result<Op, PatchError> {
    Ok(Op::Remove { path, on_error })
}

fn decode_replace(obj: &Map<String, Value>, path: JsonPointer, on_error: Option<ErrorHandling>) -> Result<Op, PatchError> {
    let value = required(obj, "value")?.clone();
    Ok(Op::Replace { path, value, on_error })
}

fn decode_move(obj: &Map<String, Value>, path: JsonPointer, on_error: Option<ErrorHandling>) -> Result<Op, PatchError> {
    let from = decode_pointer(obj, "from")?;
    Ok(Op::Move { path, from, on_error })
}

fn decode_copy(obj: &Map<String, Value>, path: JsonPointer, on_error: Option<ErrorHandling>) -> Result<Op, PatchError> {
    let from = decode_pointer(obj, "from")?;
    Ok(Op::Copy { path, from, on_error })
}

fn decode_test(obj: &Map<String, Value>, path: JsonPointer, on_error: Option<ErrorHandling>) -> Result<Op, PatchError> {
    let value = required(obj, "value")?.clone();
    Ok(Op::Test { path, value, on_error })
}

// ── Serialization ─────────────────────────────────────────────────────────

/// Serialize an `Op` to a `serde_json::Value`.
///
/// `onError` is written only when the operation carries an override.
pub fn to_json(op: &Op) -> Value {
    let mut m = Map::new();
    m.insert("op".into(), json!(op.op_name()));
    m.insert("path".into(), encode_path(op.path()));
    if let Some(mode) = op.on_error() {
        m.insert("onError".into(), json!(mode.as_str()));
    }
    match op {
        Op::Add { value, .. }
        | Op::AddMany { value, .. }
        | Op::Replace { value, .. }
        | Op::Test { value, .. } => {
            m.insert("value".into(), value.clone());
        }
        Op::Move { from, .. } | Op::Copy { from, .. } => {
            m.insert("from".into(), encode_path(from));
        }
        Op::Remove { .. } => {}
    }
    Value::Object(m)
}

/// Deserialize a `serde_json::Value` into an `Op`.
///
/// # Errors
///
/// [`PatchError::InvalidOp`] for a non-object, a missing or unknown `op`, a
/// missing `path`/`value`/`from`, or a bad `onError`;
/// [`PatchError::MalformedPointer`] for a bad `path` or `from`.
pub fn from_json(v: &Value) -> Result<Op, PatchError> {
    let obj = v
        .as_object()
        .ok_or_else(|| PatchError::InvalidOp("Patch operation should be a JSON object".into()))?;
    let op_str = required(obj, "op")?
        .as_str()
        .ok_or_else(|| PatchError::InvalidOp("'op' property must be a string".into()))?;
    let decode = DECODERS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(op_str))
        .map(|(_, decode)| *decode)
        .ok_or_else(|| PatchError::InvalidOp(format!("Unknown value of 'op' property: '{op_str}'")))?;

    let path = decode_pointer(obj, "path")?;
    let on_error = decode_on_error(obj)?;
    decode(obj, path, on_error)
}

/// Serialize a list of operations to a JSON array.
pub fn to_json_patch(ops: &[Op]) -> Value {
    Value::Array(ops.iter().map(to_json).collect())
}

/// Deserialize a JSON array into a list of operations.
pub fn from_json_patch(v: &Value) -> Result<Vec<Op>, PatchError> {
    let arr = v
        .as_array()
        .ok_or_else(|| PatchError::InvalidOp("Patch should be a JSON array".into()))?;
    arr.iter().map(from_json).collect()
}

impl Serialize for Op {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        to_json(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Op {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = Value::deserialize(deserializer)?;
        from_json(&v).map_err(serde::de::Error::custom)
    }
}
