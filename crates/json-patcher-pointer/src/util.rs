//! Escaping helpers for JSON Pointer reference tokens.

/// Unescapes a JSON Pointer reference token.
///
/// Per RFC 6901, `~1` is replaced with `/` and then `~0` is replaced with `~`.
///
/// # Example
///
/// ```
/// use json_patcher_pointer::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// assert_eq!(unescape_component("~01"), "~1");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // Order matters: ~1 must be replaced before ~0
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer reference token.
///
/// Per RFC 6901, `~` is replaced with `~0` and `/` is replaced with `~1`.
///
/// # Example
///
/// ```
/// use json_patcher_pointer::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    // Order matters: ~ must be escaped before /
    component.replace('~', "~0").replace('/', "~1")
}

/// Format reference tokens into a JSON Pointer string.
///
/// Returns an empty string for the root (no tokens).
pub fn format_json_pointer<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push('/');
        out.push_str(&escape_component(token.as_ref()));
    }
    out
}

/// Check if a string is a canonical non-negative array index.
///
/// Leading zeros are rejected except for `"0"` itself.
///
/// # Example
///
/// ```
/// use json_patcher_pointer::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("-"));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}

/// Parse a reference token as an array index.
///
/// Returns `None` for anything [`is_valid_index`] rejects or that overflows
/// `usize`.
pub fn parse_index(token: &str) -> Option<usize> {
    if !is_valid_index(token) {
        return None;
    }
    token.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_component() {
        assert_eq!(unescape_component("foo"), "foo");
        assert_eq!(unescape_component("a~0b~1c"), "a~b/c");
        assert_eq!(unescape_component("~0~0"), "~~");
        assert_eq!(unescape_component("~1~1"), "//");
        // ~01 is an escaped tilde followed by a literal 1, not a slash
        assert_eq!(unescape_component("~01"), "~1");
    }

    #[test]
    fn test_escape_component() {
        assert_eq!(escape_component("foo"), "foo");
        assert_eq!(escape_component("a~b/c"), "a~0b~1c");
        assert_eq!(escape_component("~1"), "~01");
    }

    #[test]
    fn test_format_json_pointer() {
        assert_eq!(format_json_pointer::<&str>(&[]), "");
        assert_eq!(format_json_pointer(&["foo", "bar"]), "/foo/bar");
        assert_eq!(format_json_pointer(&["a~b", "c/d"]), "/a~0b/c~1d");
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index("0"), Some(0));
        assert_eq!(parse_index("42"), Some(42));
        assert_eq!(parse_index("007"), None);
        assert_eq!(parse_index("1.5"), None);
        assert_eq!(parse_index("+1"), None);
        assert_eq!(parse_index(""), None);
        assert_eq!(parse_index("99999999999999999999999999"), None);
    }
}
