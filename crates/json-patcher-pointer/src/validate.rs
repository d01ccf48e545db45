//! Syntax validation for JSON Pointer strings and token lists.

use crate::JsonPointerError;

/// Validate a JSON Pointer string.
///
/// # Errors
///
/// - [`JsonPointerError::MissingLeadingSlash`] if the pointer is non-empty
///   and doesn't start with `/`
/// - [`JsonPointerError::EmptyReferenceToken`] if splitting on `/` yields an
///   empty token (`"/"`, `"/a//b"`, `"/a/"`)
///
/// # Example
///
/// ```
/// use json_patcher_pointer::validate_json_pointer;
///
/// validate_json_pointer("").unwrap();
/// validate_json_pointer("/foo/bar").unwrap();
/// validate_json_pointer("foo").unwrap_err();
/// validate_json_pointer("/foo//bar").unwrap_err();
/// ```
pub fn validate_json_pointer(pointer: &str) -> Result<(), JsonPointerError> {
    if pointer.is_empty() {
        return Ok(());
    }
    if !pointer.starts_with('/') {
        return Err(JsonPointerError::MissingLeadingSlash(pointer.to_string()));
    }
    if pointer[1..].split('/').any(str::is_empty) {
        return Err(JsonPointerError::EmptyReferenceToken(pointer.to_string()));
    }
    Ok(())
}

/// Validate already-unescaped reference tokens.
pub fn validate_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<(), JsonPointerError> {
    if tokens.iter().any(|t| t.as_ref().is_empty()) {
        return Err(JsonPointerError::EmptyReferenceToken(
            crate::format_json_pointer(tokens),
        ));
    }
    Ok(())
}
