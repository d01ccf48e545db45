//! Accessors for a resolved [`Slot`].
//!
//! A slot is consumed by every mutating accessor, so one resolution backs at
//! most one mutation.

use std::mem;

use json_patcher_pointer::JsonPointer;
use serde_json::{Map, Value};

use super::resolve::{container_string, ArrayIndex, Slot};
use super::types::PatchError;

/// A value taken out of its container, together with where it was.
#[derive(Debug)]
pub(crate) struct Detached {
    pub(crate) value: Value,
    position: usize,
}

impl<'a> Slot<'a> {
    /// The current value at the slot.
    pub fn get(&self) -> Result<&Value, PatchError> {
        match self {
            Slot::Object { map, key, pointer } => map
                .get(*key)
                .ok_or_else(|| key_not_found(key, pointer)),
            Slot::Array { array, index, pointer } => {
                let i = existing_index(array.len(), *index, pointer)?;
                Ok(&array[i])
            }
        }
    }

    /// Add-semantics write: an object key is created or overwritten in place,
    /// an array gets `value` inserted at the index (or appended for `-`).
    pub fn set(self, value: Value) {
        match self {
            Slot::Object { map, key, .. } => {
                map.insert(key.to_string(), value);
            }
            Slot::Array { array, index, .. } => match index {
                ArrayIndex::End => array.push(value),
                ArrayIndex::At(i) => array.insert(i, value),
            },
        }
    }

    /// Array-only splice. An array `value` contributes its elements in order;
    /// any other value is inserted as one element.
    pub fn set_many(self, value: Value) -> Result<(), PatchError> {
        match self {
            Slot::Object { pointer, .. } => Err(PatchError::NonArrayTarget {
                path: pointer.to_string(),
            }),
            Slot::Array { array, index, .. } => {
                let items = match value {
                    Value::Array(items) => items,
                    single => vec![single],
                };
                let at = match index {
                    ArrayIndex::End => array.len(),
                    ArrayIndex::At(i) => i,
                };
                array.splice(at..at, items);
                Ok(())
            }
        }
    }

    /// Delete the value at the slot and return it.
    pub fn remove(self) -> Result<Value, PatchError> {
        Ok(self.detach()?.value)
    }

    /// Remove the existing value, then set `value` at the same slot. An
    /// object member is re-added at the end; an array element keeps its index.
    pub fn replace(self, value: Value) -> Result<Value, PatchError> {
        match self {
            Slot::Object { map, key, pointer } => {
                let old = map
                    .shift_remove(key)
                    .ok_or_else(|| key_not_found(key, pointer))?;
                map.insert(key.to_string(), value);
                Ok(old)
            }
            Slot::Array { array, index, pointer } => {
                let i = existing_index(array.len(), index, pointer)?;
                Ok(mem::replace(&mut array[i], value))
            }
        }
    }

    pub(crate) fn detach(self) -> Result<Detached, PatchError> {
        match self {
            Slot::Object { map, key, pointer } => {
                let position = map
                    .keys()
                    .position(|k| k == key)
                    .ok_or_else(|| key_not_found(key, pointer))?;
                let value = map
                    .shift_remove(key)
                    .ok_or_else(|| key_not_found(key, pointer))?;
                Ok(Detached { value, position })
            }
            Slot::Array { array, index, pointer } => {
                let position = existing_index(array.len(), index, pointer)?;
                Ok(Detached {
                    value: array.remove(position),
                    position,
                })
            }
        }
    }

    /// Put a detached value back where it was taken from.
    pub(crate) fn reattach(self, detached: Detached) {
        match self {
            Slot::Object { map, key, .. } => {
                insert_at(map, detached.position, key.to_string(), detached.value)
            }
            Slot::Array { array, .. } => {
                let position = detached.position.min(array.len());
                array.insert(position, detached.value);
            }
        }
    }
}

fn existing_index(
    len: usize,
    index: ArrayIndex,
    pointer: &JsonPointer,
) -> Result<usize, PatchError> {
    match index {
        ArrayIndex::End => len.checked_sub(1).ok_or_else(|| PatchError::IndexOutOfRange {
            index: "-".into(),
            array: container_string(pointer),
        }),
        ArrayIndex::At(i) if i < len => Ok(i),
        ArrayIndex::At(i) => Err(PatchError::IndexOutOfRange {
            index: i.to_string(),
            array: container_string(pointer),
        }),
    }
}

fn key_not_found(key: &str, pointer: &JsonPointer) -> PatchError {
    PatchError::KeyNotFound {
        key: key.to_string(),
        object: container_string(pointer),
    }
}

/// Insert `key` at `position` in iteration order.
fn insert_at(map: &mut Map<String, Value>, position: usize, key: String, value: Value) {
    let mut entries: Vec<(String, Value)> = mem::take(map).into_iter().collect();
    let position = position.min(entries.len());
    entries.insert(position, (key, value));
    map.extend(entries);
}
