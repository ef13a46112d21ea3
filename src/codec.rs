//! Leaf value codec.
//!
//! Flat files store one entry per line, so a string leaf must not contain a
//! raw newline, and a string that reads like a number must stay a string.
//! [`encode`] wraps strings in double quotes and escapes newlines;
//! [`decode`] reverses it. Non-string scalars pass through untouched.
//!
//! Backslashes are not escaped: a string that already contains the two
//! characters `\n` comes back with a real newline in their place.
//!
//! ```rust
//! use serde_flatenv::codec::{decode, encode};
//! use serde_flatenv::Value;
//!
//! let original = Value::from("line1\nline2");
//! let encoded = encode(original.clone());
//! assert_eq!(encoded, Value::from("\"line1\\nline2\""));
//! assert_eq!(decode(encoded), original);
//! ```

use crate::Value;

const QUOTE: char = '"';
const NEWLINE_ESCAPE: &str = "\\n";

/// Encodes a leaf for the flat form.
pub fn encode(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(encode_str(&s)),
        other => other,
    }
}

/// Decodes a leaf read from the flat form.
pub fn decode(value: Value) -> Value {
    match value {
        Value::String(s) => match decode_str(&s) {
            Some(decoded) => Value::String(decoded),
            None => Value::String(s),
        },
        other => other,
    }
}

/// Quote-wraps `s` with every newline escaped.
///
/// # Examples
///
/// ```rust
/// use serde_flatenv::codec::encode_str;
///
/// assert_eq!(encode_str("3"), "\"3\"");
/// assert_eq!(encode_str(""), "\"\"");
/// ```
#[must_use]
pub fn encode_str(s: &str) -> String {
    let escaped = s.replace('\n', NEWLINE_ESCAPE);
    let mut out = String::with_capacity(escaped.len() + 2);
    out.push(QUOTE);
    out.push_str(&escaped);
    out.push(QUOTE);
    out
}

/// Strips the quote framing and unescapes newlines.
///
/// Returns `None` when `s` is not quote-framed (shorter than two characters,
/// or not starting and ending with `"`).
///
/// # Examples
///
/// ```rust
/// use serde_flatenv::codec::decode_str;
///
/// assert_eq!(decode_str("\"a\\nb\"").as_deref(), Some("a\nb"));
/// assert_eq!(decode_str("plain"), None);
/// assert_eq!(decode_str("\""), None);
/// ```
#[must_use]
pub fn decode_str(s: &str) -> Option<String> {
    if s.len() < 2 || !s.starts_with(QUOTE) || !s.ends_with(QUOTE) {
        return None;
    }
    let inner = &s[1..s.len() - 1];
    Some(inner.replace(NEWLINE_ESCAPE, "\n"))
}
