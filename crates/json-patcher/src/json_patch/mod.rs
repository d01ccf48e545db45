//! JSON Patch implementation.
//!
//! # Operations
//!
//! The RFC 6902 operations `add`, `remove`, `replace`, `move`, `copy` and
//! `test`, plus `addmany`, which splices the elements of an array value into
//! a target array.
//!
//! Every operation may carry its own [`ErrorHandling`] mode; operations
//! without one use [`PatchOptions::on_error`]. [`apply_patch`] never
//! modifies its input document.

pub mod types;
pub mod resolve;
pub mod slot;
pub mod equal;
pub mod apply;
pub mod codec;

pub use types::{ErrorHandling, ErrorKind, Op, PatchError, PatchOptions};
pub use resolve::{resolve, ArrayIndex, Location, Slot};
pub use equal::deep_equal;
pub use apply::{apply_op, apply_patch, apply_patch_to};
pub use codec::json::{from_json, from_json_patch, to_json, to_json_patch};
