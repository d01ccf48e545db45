//! The [`JsonPointer`] type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::util::{format_json_pointer, unescape_component};
use crate::validate::{validate_json_pointer, validate_tokens};
use crate::JsonPointerError;

/// A parsed JSON Pointer: an immutable sequence of unescaped reference tokens.
///
/// The pointer with no tokens is the root pointer and denotes the whole
/// document. No token is ever the empty string.
///
/// # Example
///
/// ```
/// use json_patcher_pointer::JsonPointer;
///
/// let pointer = JsonPointer::parse("/a~1b/c~0d/0").unwrap();
/// assert_eq!(pointer.tokens(), ["a/b", "c~d", "0"]);
/// assert_eq!(pointer.last_token().unwrap(), "0");
/// assert_eq!(pointer.to_string(), "/a~1b/c~0d/0");
///
/// assert!(JsonPointer::parse("").unwrap().is_root());
/// assert!(JsonPointer::parse("/a//b").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JsonPointer {
    tokens: Vec<String>,
}

impl JsonPointer {
    /// The root pointer (`""`).
    pub const fn root() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Parse an escaped pointer string.
    ///
    /// # Errors
    ///
    /// Fails if the string is non-empty and doesn't start with `/`, or if it
    /// contains an empty reference token.
    pub fn parse(pointer: &str) -> Result<Self, JsonPointerError> {
        validate_json_pointer(pointer)?;
        if pointer.is_empty() {
            return Ok(Self::root());
        }
        let tokens = pointer[1..].split('/').map(unescape_component).collect();
        Ok(Self { tokens })
    }

    /// Build a pointer from already-unescaped reference tokens.
    ///
    /// # Errors
    ///
    /// Fails if any token is empty.
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self, JsonPointerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        validate_tokens(&tokens)?;
        Ok(Self { tokens })
    }

    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of reference tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Same as [`JsonPointer::is_root`].
    pub fn is_empty(&self) -> bool {
        self.is_root()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The final reference token.
    ///
    /// # Errors
    ///
    /// [`JsonPointerError::NoLastToken`] for the root pointer.
    pub fn last_token(&self) -> Result<&str, JsonPointerError> {
        self.tokens
            .last()
            .map(String::as_str)
            .ok_or(JsonPointerError::NoLastToken)
    }

    /// Every reference token but the last, in order.
    ///
    /// # Errors
    ///
    /// [`JsonPointerError::NoLastToken`] for the root pointer.
    pub fn tokens_except_last(
        &self,
    ) -> Result<impl Iterator<Item = &str> + '_, JsonPointerError> {
        let (_, init) = self
            .tokens
            .split_last()
            .ok_or(JsonPointerError::NoLastToken)?;
        Ok(init.iter().map(String::as_str))
    }

    /// The pointer made of the first `len` reference tokens.
    ///
    /// `prefix(0)` is the root pointer and `prefix(self.len())` is a copy of
    /// `self`.
    ///
    /// # Errors
    ///
    /// [`JsonPointerError::PrefixOutOfRange`] if `len` exceeds the number of
    /// tokens.
    pub fn prefix(&self, len: usize) -> Result<JsonPointer, JsonPointerError> {
        if len > self.tokens.len() {
            return Err(JsonPointerError::PrefixOutOfRange {
                len,
                available: self.tokens.len(),
            });
        }
        Ok(Self {
            tokens: self.tokens[..len].to_vec(),
        })
    }

    /// The pointer to the container holding this pointer's target.
    ///
    /// # Errors
    ///
    /// [`JsonPointerError::NoParent`] for the root pointer.
    pub fn parent(&self) -> Result<JsonPointer, JsonPointerError> {
        if self.is_root() {
            return Err(JsonPointerError::NoParent);
        }
        self.prefix(self.tokens.len() - 1)
    }

    /// Whether `self` addresses an ancestor of `other`'s target.
    ///
    /// The root pointer is a prefix of every pointer, itself included. A
    /// non-root pointer is a prefix of `other` only if it is strictly shorter
    /// and its tokens equal `other`'s leading tokens.
    ///
    /// # Example
    ///
    /// ```
    /// use json_patcher_pointer::JsonPointer;
    ///
    /// let foo: JsonPointer = "/foo".parse().unwrap();
    /// let foo_bar: JsonPointer = "/foo/bar".parse().unwrap();
    ///
    /// assert!(foo.is_prefix_of(&foo_bar));
    /// assert!(!foo_bar.is_prefix_of(&foo));
    /// assert!(!foo.is_prefix_of(&foo));
    /// assert!(JsonPointer::root().is_prefix_of(&foo));
    /// ```
    pub fn is_prefix_of(&self, other: &JsonPointer) -> bool {
        if self.is_root() {
            return true;
        }
        if self.tokens.len() >= other.tokens.len() {
            return false;
        }
        self.tokens
            .iter()
            .zip(&other.tokens)
            .all(|(mine, theirs)| mine == theirs)
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_json_pointer(&self.tokens))
    }
}

impl FromStr for JsonPointer {
    type Err = JsonPointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for JsonPointer {
    type Error = JsonPointerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for JsonPointer {
    type Error = JsonPointerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl Serialize for JsonPointer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for JsonPointer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
