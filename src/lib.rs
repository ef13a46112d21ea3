//! # serde_flatenv
//!
//! Store nested data in formats that only hold flat `key=value` pairs, and get
//! it back unchanged.
//!
//! ## How it works
//!
//! A nested [`Value`] is flattened into one entry per leaf. The key is the
//! path to the leaf with segments joined by `__`, and list positions become
//! decimal segments:
//!
//! ```text
//! {"user": {"name": "ann", "tags": ["x", "y"]}}
//!
//! user__name="ann"
//! user__tags__0="x"
//! user__tags__1="y"
//! ```
//!
//! String leaves are wrapped in double quotes with newlines escaped, so a
//! multi-line string stays on one line and the string `"3"` stays distinct
//! from the number `3`. Unflattening splits each key, creates a list for
//! every digit-only segment and a map for every other segment, and unwraps
//! the strings.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_flatenv::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Metadata {
//!     version: String,
//!     shamir_threshold: u32,
//!     recipients: Vec<String>,
//! }
//!
//! let md = Metadata {
//!     version: "3.7.1".to_string(),
//!     shamir_threshold: 2,
//!     recipients: vec!["age1abc".to_string(), "age1def".to_string()],
//! };
//!
//! let text = to_string(&md).unwrap();
//! assert_eq!(
//!     text,
//!     "version=\"3.7.1\"\nshamir_threshold=2\nrecipients__0=\"age1abc\"\nrecipients__1=\"age1def\"\n"
//! );
//!
//! let back: Metadata = from_str(&text).unwrap();
//! assert_eq!(md, back);
//! ```
//!
//! ## Working with flat maps directly
//!
//! ```rust
//! use serde_flatenv::{flatten, unflatten, value};
//!
//! let nested = value!({"user": {"name": "ann", "tags": ["x", "y"]}});
//! let flat = flatten(&nested);
//! assert_eq!(flat.len(), 3);
//! assert_eq!(unflatten(&flat), nested);
//! ```
//!
//! ## Known limitations
//!
//! The format has no escaping, so some inputs do not survive a round trip:
//!
//! - empty lists and maps have no leaves and vanish
//! - a map key made only of digits comes back as a list index
//! - a map key containing the separator is split in two
//! - a string containing the two characters `\n` comes back with a newline
//!
//! These are properties of the flat format and are not reported as errors.

pub mod codec;
pub mod de;
pub mod dotenv;
pub mod error;
pub mod flatten;
pub mod macros;
pub mod map;
pub mod options;
pub mod path;
pub mod ser;
pub mod unflatten;
pub mod value;

pub use de::ValueDeserializer;
pub use error::{Error, Result};
pub use flatten::{flatten, flatten_with_options, FlatMap};
pub use map::Map;
pub use options::FlatOptions;
pub use ser::ValueSerializer;
pub use unflatten::{unflatten, unflatten_with_options};
pub use value::{Number, Value};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde_flatenv::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value: Value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_object());
/// ```
///
/// # Errors
///
/// Returns an error if the value has a map key that is not a scalar.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    ser::to_value(value)
}

/// Convert a [`Value`] into any `T: DeserializeOwned`.
///
/// # Errors
///
/// Returns an error if the value's shape does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}

/// Serialize any `T: Serialize` straight to a flat map.
///
/// # Examples
///
/// ```rust
/// use serde_flatenv::{to_flat_map, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Key { arn: String, roles: Vec<String> }
///
/// let key = Key { arn: "arn:1".into(), roles: vec!["admin".into()] };
/// let flat = to_flat_map(&key).unwrap();
/// assert_eq!(flat["arn"], Value::from("\"arn:1\""));
/// assert_eq!(flat["roles__0"], Value::from("\"admin\""));
/// ```
///
/// # Errors
///
/// Returns an error if `T` cannot be converted to a [`Value`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_flat_map<T>(value: &T) -> Result<FlatMap>
where
    T: ?Sized + Serialize,
{
    to_flat_map_with_options(value, &FlatOptions::default())
}

/// Serialize any `T: Serialize` to a flat map with custom options.
///
/// # Errors
///
/// Returns an error if `T` cannot be converted to a [`Value`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_flat_map_with_options<T>(value: &T, options: &FlatOptions) -> Result<FlatMap>
where
    T: ?Sized + Serialize,
{
    Ok(flatten_with_options(&to_value(value)?, options))
}

/// Rebuild any `T: DeserializeOwned` from a flat map.
///
/// # Errors
///
/// Returns an error if the rebuilt value does not match `T`. Fields that
/// were empty lists or maps are absent after flattening; mark them
/// `#[serde(default)]` to read them back.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_flat_map<T>(flat: &FlatMap) -> Result<T>
where
    T: DeserializeOwned,
{
    from_flat_map_with_options(flat, &FlatOptions::default())
}

/// Rebuild any `T: DeserializeOwned` from a flat map with custom options.
///
/// # Errors
///
/// Returns an error if the rebuilt value does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_flat_map_with_options<T>(flat: &FlatMap, options: &FlatOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(unflatten_with_options(flat, options))
}

/// Serialize any `T: Serialize` to `key=value` lines.
///
/// Map entries holding `None` or unit are left out. A `None` list element
/// is written as `key=` so the list keeps its length.
///
/// # Errors
///
/// Returns an error if `T` cannot be converted to a [`Value`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &FlatOptions::default())
}

/// Serialize any `T: Serialize` to `key=value` lines with custom options.
///
/// The metadata prefix is not applied; see [`dotenv::emit_document`] for
/// documents that mix content and metadata.
///
/// # Examples
///
/// ```rust
/// use serde_flatenv::{to_string_with_options, FlatOptions};
/// use std::collections::BTreeMap;
///
/// let mut inner = BTreeMap::new();
/// inner.insert("port", 5432);
/// let mut outer = BTreeMap::new();
/// outer.insert("db", inner);
///
/// let options = FlatOptions::new().with_separator(".");
/// assert_eq!(to_string_with_options(&outer, &options).unwrap(), "db.port=5432\n");
/// ```
///
/// # Errors
///
/// Returns an error if `T` cannot be converted to a [`Value`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &FlatOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let flat = to_flat_map_with_options(value, options)?;
    dotenv::emit_lines(&dotenv::entries_from_flat(flat, "", &options.separator))
}

/// Serialize any `T: Serialize` as `key=value` lines to a writer.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string(value)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize any `T: DeserializeOwned` from `key=value` lines.
///
/// Bare values are read as booleans or numbers where they parse as such,
/// and an empty value is `None`; quoted values are always strings.
///
/// # Errors
///
/// Returns an error if a line has no `=` or the data does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_str_with_options(s, &FlatOptions::default())
}

/// Deserialize any `T: DeserializeOwned` from `key=value` lines with custom options.
///
/// # Errors
///
/// Returns an error if a line has no `=` or the data does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(s: &str, options: &FlatOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    let entries = dotenv::parse_lines(s)?;
    let flat = dotenv::flat_from_entries(
        entries
            .iter()
            .map(|entry| (entry.key.as_str(), &entry.value)),
    );
    from_flat_map_with_options(&flat, options)
}

/// Deserialize any `T: DeserializeOwned` from a reader of `key=value` lines.
///
/// # Errors
///
/// Returns an error if reading fails, a line has no `=`, or the data does
/// not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
    }

    fn alice() -> User {
        User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
        }
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let text = to_string(&point).unwrap();
        assert_eq!(text, "x=1\ny=2\n");
        let back: Point = from_str(&text).unwrap();
        assert_eq!(point, back);
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let text = to_string(&alice()).unwrap();
        let back: User = from_str(&text).unwrap();
        assert_eq!(alice(), back);
    }

    #[test]
    fn test_flat_map_roundtrip() {
        let flat = to_flat_map(&alice()).unwrap();
        assert_eq!(flat.len(), 5);
        let back: User = from_flat_map(&flat).unwrap();
        assert_eq!(alice(), back);
    }

    #[test]
    fn test_to_value() {
        let value = to_value(&Point { x: 1, y: 2 }).unwrap();
        match value {
            Value::Object(obj) => {
                assert_eq!(obj.get("x"), Some(&Value::Number(Number::Integer(1))));
                assert_eq!(obj.get("y"), Some(&Value::Number(Number::Integer(2))));
            }
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_writer_and_reader() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &alice()).unwrap();
        let back: User = from_reader(buffer.as_slice()).unwrap();
        assert_eq!(alice(), back);
    }

    #[test]
    fn test_custom_separator_roundtrip() {
        let options = FlatOptions::new().with_separator("/");
        let text = to_string_with_options(&alice(), &options).unwrap();
        assert!(text.contains("tags/1=\"user\"\n"));
        let back: User = from_str_with_options(&text, &options).unwrap();
        assert_eq!(alice(), back);
    }

    #[test]
    fn test_invalid_line_is_reported() {
        let err = from_str::<Point>("x=1\ny 2\n").unwrap_err();
        assert_eq!(err, Error::invalid_line(2, "y 2"));
    }
}
