//! A JSON Patch engine over `serde_json::Value`.
//!
//! Parses patch operations, resolves [JSON Pointers](json_patcher_pointer)
//! against a document and applies `add`, `addmany`, `remove`, `replace`,
//! `move`, `copy` and `test` with per-operation error handling.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use json_patcher::json_patch::{apply_patch, from_json_patch, PatchOptions};
//!
//! let ops = from_json_patch(&json!([
//!     {"op": "add", "path": "/b", "value": 2},
//!     {"op": "move", "from": "/a", "path": "/c"},
//! ]))
//! .unwrap();
//! let out = apply_patch(&json!({"a": 1}), &ops, &PatchOptions::default()).unwrap();
//! assert_eq!(out, json!({"b": 2, "c": 1}));
//! ```

pub mod json_patch;
pub mod json_cli;

pub use json_patcher_pointer::{JsonPointer, JsonPointerError};
