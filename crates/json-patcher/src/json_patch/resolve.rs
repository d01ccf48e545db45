//! Pointer resolution.
//!
//! [`resolve`] walks every reference token but the last, and binds the final
//! token to the container that holds it. The result is a [`Location`]: either
//! the document root or a [`Slot`] inside an object or array. Resolution
//! never modifies the document.

use json_patcher_pointer::{format_json_pointer, parse_index, JsonPointer};
use serde_json::{Map, Value};

use super::types::PatchError;

/// Position addressed by the final token inside an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayIndex {
    /// `-`: one past the end for insertion, the last element otherwise.
    End,
    /// A numeric index, known to be `<= len` at resolution time.
    At(usize),
}

/// Where a pointer lands.
#[derive(Debug)]
pub enum Location<'a> {
    /// The pointer is the root pointer.
    Root(&'a mut Value),
    Slot(Slot<'a>),
}

/// A final reference token bound to its container.
///
/// Accessors live in `slot.rs`.
#[derive(Debug)]
pub enum Slot<'a> {
    Object {
        map: &'a mut Map<String, Value>,
        key: &'a str,
        pointer: &'a JsonPointer,
    },
    Array {
        array: &'a mut Vec<Value>,
        index: ArrayIndex,
        pointer: &'a JsonPointer,
    },
}

/// Resolve `pointer` against `root`.
///
/// # Errors
///
/// * [`PatchError::PathNotFound`] when an intermediate key is missing or its
///   value is `null`.
/// * [`PatchError::ArrayElementNotFound`] when an array token doesn't name an
///   element, or when the final token is an index greater than the length.
/// * [`PatchError::NotContainer`] when an intermediate value is a primitive.
/// * [`PatchError::TerminalNotContainer`] when the final token's container is
///   a primitive.
/// * [`PatchError::InvalidIndex`] when the final token of an array is neither
///   `-` nor a canonical non-negative integer.
pub fn resolve<'a>(root: &'a mut Value, pointer: &'a JsonPointer) -> Result<Location<'a>, PatchError> {
    let Some((last, parents)) = pointer.tokens().split_last() else {
        return Ok(Location::Root(root));
    };

    let mut current = root;
    for (depth, token) in parents.iter().enumerate() {
        let next = match current {
            Value::Object(map) => map.get_mut(token.as_str()).ok_or_else(|| PatchError::PathNotFound {
                path: prefix_string(pointer, depth + 1),
            })?,
            Value::Array(array) => {
                let index = element_index(token, array.len()).ok_or_else(|| {
                    PatchError::ArrayElementNotFound {
                        token: token.clone(),
                        array: prefix_string(pointer, depth),
                    }
                })?;
                &mut array[index]
            }
            other => {
                return Err(PatchError::NotContainer {
                    path: prefix_string(pointer, depth),
                    type_name: type_name(other),
                })
            }
        };
        if next.is_null() {
            return Err(PatchError::PathNotFound {
                path: prefix_string(pointer, depth + 1),
            });
        }
        current = next;
    }

    match current {
        Value::Object(map) => Ok(Location::Slot(Slot::Object {
            map,
            key: last.as_str(),
            pointer,
        })),
        Value::Array(array) => {
            let index = insertion_index(last, array.len(), pointer)?;
            Ok(Location::Slot(Slot::Array { array, index, pointer }))
        }
        _ => Err(PatchError::TerminalNotContainer {
            path: pointer.to_string(),
        }),
    }
}

/// Index of an existing element named by an intermediate token.
fn element_index(token: &str, len: usize) -> Option<usize> {
    if token == "-" {
        return len.checked_sub(1);
    }
    parse_index(token).filter(|&index| index < len)
}

fn insertion_index(token: &str, len: usize, pointer: &JsonPointer) -> Result<ArrayIndex, PatchError> {
    if token == "-" {
        return Ok(ArrayIndex::End);
    }
    match parse_index(token) {
        Some(index) if index <= len => Ok(ArrayIndex::At(index)),
        Some(_) => Err(PatchError::ArrayElementNotFound {
            token: token.to_string(),
            array: container_string(pointer),
        }),
        None => Err(PatchError::InvalidIndex {
            token: token.to_string(),
            array: container_string(pointer),
        }),
    }
}

/// Canonical form of the first `len` tokens of `pointer`.
pub(crate) fn prefix_string(pointer: &JsonPointer, len: usize) -> String {
    format_json_pointer(&pointer.tokens()[..len])
}

/// Canonical form of the pointer to the container of `pointer`'s target.
pub(crate) fn container_string(pointer: &JsonPointer) -> String {
    prefix_string(pointer, pointer.len().saturating_sub(1))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "Null",
        Value::Bool(_) => "Boolean",
        Value::Number(n) if n.is_f64() => "Float",
        Value::Number(_) => "Integer",
        Value::String(_) => "String",
        Value::Array(_) => "Array",
        Value::Object(_) => "Object",
    }
}
