//! JSON Pointer (RFC 6901) utilities.
//!
//! This crate implements [JSON Pointer (RFC 6901)](https://tools.ietf.org/html/rfc6901)
//! parsing and formatting together with the [`JsonPointer`] type used by the
//! patch engine to address locations inside a document.
//!
//! # Example
//!
//! ```
//! use json_patcher_pointer::JsonPointer;
//!
//! let pointer: JsonPointer = "/foo/bar".parse().unwrap();
//! assert_eq!(pointer.tokens(), ["foo", "bar"]);
//! assert_eq!(pointer.parent().unwrap().to_string(), "/foo");
//! assert_eq!(pointer.to_string(), "/foo/bar");
//! ```

use thiserror::Error;

pub mod pointer;
pub mod util;
pub mod validate;

pub use pointer::JsonPointer;
pub use util::{escape_component, format_json_pointer, is_valid_index, parse_index, unescape_component};
pub use validate::{validate_json_pointer, validate_tokens};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JsonPointerError {
    #[error("JSON pointer '{0}' must be empty or start with '/'")]
    MissingLeadingSlash(String),
    #[error("JSON pointer '{0}' can't contain empty reference tokens")]
    EmptyReferenceToken(String),
    #[error("root pointer does not have a last reference token")]
    NoLastToken,
    #[error("root pointer does not have a parent")]
    NoParent,
    #[error("there is no prefix of {len} reference tokens in a pointer of {available}")]
    PrefixOutOfRange { len: usize, available: usize },
}

impl JsonPointerError {
    /// Whether the error comes from bad pointer syntax rather than misuse of
    /// a well-formed pointer.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            JsonPointerError::MissingLeadingSlash(_) | JsonPointerError::EmptyReferenceToken(_)
        )
    }
}
