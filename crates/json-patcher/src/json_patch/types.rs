//! Core types for the JSON Patch module: operations, error-handling modes,
//! options and errors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

pub use json_patcher_pointer::{JsonPointer, JsonPointerError};

// ── Error ─────────────────────────────────────────────────────────────────

/// Failure of a pointer resolution, slot access or operation.
///
/// Messages quote the offending path, key or index.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PatchError {
    #[error("malformed JSON pointer: {0}")]
    MalformedPointer(#[from] JsonPointerError),
    #[error("Unable to find path '{path}'")]
    PathNotFound { path: String },
    #[error("Unable to find element '{token}' in an array at '{array}'")]
    ArrayElementNotFound { token: String, array: String },
    #[error("Value at '{path}' is of primitive type '{type_name}' and can't participate in a pointer")]
    NotContainer { path: String, type_name: &'static str },
    #[error("Unable to build pointer for '{path}': its parent is neither an object nor an array")]
    TerminalNotContainer { path: String },
    #[error("Unable to find property '{key}' in an object at '{object}'")]
    KeyNotFound { key: String, object: String },
    #[error("Index '{index}' is out of range of an array at '{array}'")]
    IndexOutOfRange { index: String, array: String },
    #[error("'{token}' is not a valid index of an array at '{array}'")]
    InvalidIndex { token: String, array: String },
    #[error("Operation 'addmany' works only with arrays, '{path}' is not an array element")]
    NonArrayTarget { path: String },
    #[error("Unable to move parent '{from}' into its child '{path}'")]
    SelfContainment { from: String, path: String },
    #[error("JSON patch test failed: value at '{path}' differs from the expected one")]
    ValueMismatch { path: String },
    #[error("{0}")]
    InvalidOp(String),
    #[error("object projection failed: {0}")]
    Projection(String),
}

/// The failure taxonomy, without the located details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedPointer,
    PathNotFound,
    NotContainer,
    TerminalNotContainer,
    KeyNotFound,
    IndexOutOfRange,
    InvalidIndex,
    NonArrayTarget,
    SelfContainmentViolation,
    ValueMismatch,
    InvalidOperation,
    Projection,
}

impl PatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PatchError::MalformedPointer(_) => ErrorKind::MalformedPointer,
            PatchError::PathNotFound { .. } | PatchError::ArrayElementNotFound { .. } => {
                ErrorKind::PathNotFound
            }
            PatchError::NotContainer { .. } => ErrorKind::NotContainer,
            PatchError::TerminalNotContainer { .. } => ErrorKind::TerminalNotContainer,
            PatchError::KeyNotFound { .. } => ErrorKind::KeyNotFound,
            PatchError::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            PatchError::InvalidIndex { .. } => ErrorKind::InvalidIndex,
            PatchError::NonArrayTarget { .. } => ErrorKind::NonArrayTarget,
            PatchError::SelfContainment { .. } => ErrorKind::SelfContainmentViolation,
            PatchError::ValueMismatch { .. } => ErrorKind::ValueMismatch,
            PatchError::InvalidOp(_) => ErrorKind::InvalidOperation,
            PatchError::Projection(_) => ErrorKind::Projection,
        }
    }
}

// ── Error handling mode ───────────────────────────────────────────────────

/// What the driver does when an operation fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ErrorHandling {
    /// Abort the whole patch and return the error.
    #[default]
    Throw,
    /// Leave the document as it was before the failed operation and go on.
    Skip,
}

impl ErrorHandling {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorHandling::Throw => "throw",
            ErrorHandling::Skip => "skip",
        }
    }
}

impl fmt::Display for ErrorHandling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorHandling {
    type Err = PatchError;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("throw") {
            Ok(ErrorHandling::Throw)
        } else if s.eq_ignore_ascii_case("skip") {
            Ok(ErrorHandling::Skip)
        } else {
            Err(PatchError::InvalidOp(format!(
                "Unknown value of 'onError' property: '{s}'"
            )))
        }
    }
}

impl Serialize for ErrorHandling {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ErrorHandling {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ── Op enum ───────────────────────────────────────────────────────────────

/// A JSON Patch operation.
///
/// Every variant carries the target `path` and an optional `on_error`
/// override; `None` inherits the driver's [`PatchOptions::on_error`].
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Add {
        path: JsonPointer,
        value: Value,
        on_error: Option<ErrorHandling>,
    },
    /// Like `Add`, but an array `value` is spliced element by element.
    AddMany {
        path: JsonPointer,
        value: Value,
        on_error: Option<ErrorHandling>,
    },
    Remove {
        path: JsonPointer,
        on_error: Option<ErrorHandling>,
    },
    Replace {
        path: JsonPointer,
        value: Value,
        on_error: Option<ErrorHandling>,
    },
    Move {
        path: JsonPointer,
        from: JsonPointer,
        on_error: Option<ErrorHandling>,
    },
    Copy {
        path: JsonPointer,
        from: JsonPointer,
        on_error: Option<ErrorHandling>,
    },
    Test {
        path: JsonPointer,
        value: Value,
        on_error: Option<ErrorHandling>,
    },
}

impl Op {
    pub fn add(path: &str, value: Value) -> Result<Self, PatchError> {
        Ok(Op::Add {
            path: JsonPointer::parse(path)?,
            value,
            on_error: None,
        })
    }

    pub fn add_many(path: &str, value: Value) -> Result<Self, PatchError> {
        Ok(Op::AddMany {
            path: JsonPointer::parse(path)?,
            value,
            on_error: None,
        })
    }

    pub fn remove(path: &str) -> Result<Self, PatchError> {
        Ok(Op::Remove {
            path: JsonPointer::parse(path)?,
            on_error: None,
        })
    }

    pub fn replace(path: &str, value: Value) -> Result<Self, PatchError> {
        Ok(Op::Replace {
            path: JsonPointer::parse(path)?,
            value,
            on_error: None,
        })
    }

    /// `move` from `from` to `path`.
    pub fn move_from(from: &str, path: &str) -> Result<Self, PatchError> {
        Ok(Op::Move {
            path: JsonPointer::parse(path)?,
            from: JsonPointer::parse(from)?,
            on_error: None,
        })
    }

    /// `copy` from `from` to `path`.
    pub fn copy_from(from: &str, path: &str) -> Result<Self, PatchError> {
        Ok(Op::Copy {
            path: JsonPointer::parse(path)?,
            from: JsonPointer::parse(from)?,
            on_error: None,
        })
    }

    pub fn test(path: &str, value: Value) -> Result<Self, PatchError> {
        Ok(Op::Test {
            path: JsonPointer::parse(path)?,
            value,
            on_error: None,
        })
    }

    /// Returns the same operation with its error-handling override set.
    pub fn with_on_error(mut self, mode: ErrorHandling) -> Self {
        match &mut self {
            Op::Add { on_error, .. }
            | Op::AddMany { on_error, .. }
            | Op::Remove { on_error, .. }
            | Op::Replace { on_error, .. }
            | Op::Move { on_error, .. }
            | Op::Copy { on_error, .. }
            | Op::Test { on_error, .. } => *on_error = Some(mode),
        }
        self
    }

    /// Returns the operation name as it appears in the `op` field.
    pub fn op_name(&self) -> &'static str {
        match self {
            Op::Add { .. } => "add",
            Op::AddMany { .. } => "addmany",
            Op::Remove { .. } => "remove",
            Op::Replace { .. } => "replace",
            Op::Move { .. } => "move",
            Op::Copy { .. } => "copy",
            Op::Test { .. } => "test",
        }
    }

    /// Returns the path of the operation.
    pub fn path(&self) -> &JsonPointer {
        match self {
            Op::Add { path, .. }
            | Op::AddMany { path, .. }
            | Op::Remove { path, .. }
            | Op::Replace { path, .. }
            | Op::Move { path, .. }
            | Op::Copy { path, .. }
            | Op::Test { path, .. } => path,
        }
    }

    /// Returns the operation's own error-handling override, if any.
    pub fn on_error(&self) -> Option<ErrorHandling> {
        match self {
            Op::Add { on_error, .. }
            | Op::AddMany { on_error, .. }
            | Op::Remove { on_error, .. }
            | Op::Replace { on_error, .. }
            | Op::Move { on_error, .. }
            | Op::Copy { on_error, .. }
            | Op::Test { on_error, .. } => *on_error,
        }
    }
}

// ── Options ───────────────────────────────────────────────────────────────

/// Options for `apply_patch`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchOptions {
    /// Mode used by operations that carry no `on_error` override.
    pub on_error: ErrorHandling,
}

impl PatchOptions {
    pub fn skipping() -> Self {
        Self {
            on_error: ErrorHandling::Skip,
        }
    }
}
