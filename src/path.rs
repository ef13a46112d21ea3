//! Key-path segments.
//!
//! A nested location is a sequence of segments joined with a separator
//! (`"__"` by default) into one flat key: `user__tags__0`. A segment made
//! only of ASCII digits is a list index; anything else is a map key.
//!
//! There is no escaping. A map key that contains the separator, or that is
//! made only of digits, cannot be told apart on the way back.

use std::fmt;

/// Default separator between segments of a flat key.
pub const SEPARATOR: &str = "__";

/// One step of a nested path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Key(&'a str),
    Index(usize),
}

impl<'a> Segment<'a> {
    /// Classifies a raw segment.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_flatenv::path::Segment;
    ///
    /// assert_eq!(Segment::parse("12"), Segment::Index(12));
    /// assert_eq!(Segment::parse("name"), Segment::Key("name"));
    /// assert_eq!(Segment::parse("-1"), Segment::Key("-1"));
    /// assert_eq!(Segment::parse("+1"), Segment::Key("+1"));
    /// ```
    #[must_use]
    pub fn parse(raw: &'a str) -> Self {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(index) = raw.parse::<usize>() {
                return Segment::Index(index);
            }
        }
        Segment::Key(raw)
    }

    #[must_use]
    pub const fn is_index(&self) -> bool {
        matches!(self, Segment::Index(_))
    }
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => f.write_str(k),
            Segment::Index(i) => write!(f, "{}", i),
        }
    }
}

/// Joins raw segments into a flat key.
///
/// # Examples
///
/// ```rust
/// use serde_flatenv::path::{join, SEPARATOR};
///
/// assert_eq!(join(&["user", "tags", "0"], SEPARATOR), "user__tags__0");
/// assert_eq!(join::<&str>(&[], SEPARATOR), "");
/// ```
#[must_use]
pub fn join<S: AsRef<str>>(segments: &[S], separator: &str) -> String {
    let mut key = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            key.push_str(separator);
        }
        key.push_str(segment.as_ref());
    }
    key
}

/// Splits a flat key into raw segments.
///
/// # Examples
///
/// ```rust
/// use serde_flatenv::path::{split, SEPARATOR};
///
/// assert_eq!(split("user__tags__0", SEPARATOR), vec!["user", "tags", "0"]);
/// assert_eq!(split("plain", SEPARATOR), vec!["plain"]);
/// ```
#[must_use]
pub fn split<'a>(key: &'a str, separator: &str) -> Vec<&'a str> {
    key.split(separator).collect()
}
