//! Dotenv documents: `key=value` lines around the flatten/unflatten core.
//!
//! A document holds plain content entries plus a nested metadata value. On
//! disk the metadata is flattened and written as extra lines whose keys
//! carry a reserved prefix (`sops_` by default):
//!
//! ```text
//! DATABASE_URL=postgres://db
//! sops_version="3.7.1"
//! sops_kms__0__arn="arn:aws:kms:eu-west-1:1:key/a"
//! ```
//!
//! Reading reverses it: prefixed lines are stripped of the prefix, parsed as
//! scalars, and unflattened back into the metadata value.
//!
//! ```rust
//! use serde_flatenv::dotenv::{emit_document, load_document, Document, Entry};
//! use serde_flatenv::{value, FlatOptions};
//!
//! let doc = Document {
//!     entries: vec![Entry::new("API_KEY", "s3cr3t")],
//!     metadata: value!({"version": "3.7.1", "kms": [{"arn": "arn:1"}]}),
//! };
//! let options = FlatOptions::default();
//! let text = emit_document(&doc, &options).unwrap();
//! assert_eq!(text, "API_KEY=s3cr3t\nsops_version=\"3.7.1\"\nsops_kms__0__arn=\"arn:1\"\n");
//! assert_eq!(load_document(&text, &options).unwrap(), doc);
//! ```

use crate::codec;
use crate::path::{self, Segment};
use crate::{
    flatten_with_options, unflatten_with_options, Error, FlatMap, FlatOptions, Map, Number,
    Result, Value,
};
use tracing::debug;

/// One `key=value` line.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: String,
    pub value: Value,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Entry {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Content entries plus the metadata tree stored alongside them.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub entries: Vec<Entry>,
    pub metadata: Value,
}

impl Default for Document {
    fn default() -> Self {
        Document {
            entries: Vec::new(),
            metadata: Value::Object(Map::new()),
        }
    }
}

/// Parses `key=value` lines.
///
/// Empty lines are skipped. Each line is split at its first `=`, so values
/// may contain `=`. Values are kept as raw strings.
///
/// # Errors
///
/// Returns [`Error::InvalidLine`] for a non-empty line without `=`.
///
/// # Examples
///
/// ```rust
/// use serde_flatenv::dotenv::{parse_lines, Entry};
///
/// let entries = parse_lines("A=1\n\nB=x=y\n").unwrap();
/// assert_eq!(entries, vec![Entry::new("A", "1"), Entry::new("B", "x=y")]);
/// ```
pub fn parse_lines(input: &str) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for (index, line) in input.split('\n').enumerate() {
        if line.is_empty() {
            continue;
        }
        let (key, value) = line
            .split_once('=')
            .ok_or_else(|| Error::invalid_line(index + 1, line))?;
        entries.push(Entry::new(key, value));
    }
    Ok(entries)
}

/// Writes one `key=value` line per entry.
///
/// # Errors
///
/// Returns [`Error::ComplexValue`] if an entry holds a list or map.
///
/// # Examples
///
/// ```rust
/// use serde_flatenv::dotenv::{emit_lines, Entry};
/// use serde_flatenv::Value;
///
/// let text = emit_lines(&[Entry::new("A", "1"), Entry::new("B", 2)]).unwrap();
/// assert_eq!(text, "A=1\nB=2\n");
///
/// let err = emit_lines(&[Entry::new("L", Value::Array(vec![Value::from(1)]))]).unwrap_err();
/// assert_eq!(err.to_string(), "cannot use complex value in dotenv file: [1]");
/// ```
pub fn emit_lines(entries: &[Entry]) -> Result<String> {
    let mut out = String::new();
    for entry in entries {
        if !entry.value.is_scalar() {
            return Err(Error::complex_value(&entry.value));
        }
        out.push_str(&entry.key);
        out.push('=');
        if !entry.value.is_null() {
            out.push_str(&entry.value.to_string());
        }
        out.push('\n');
    }
    Ok(out)
}

/// Emits a single value on its own; only strings are supported.
///
/// # Errors
///
/// Returns [`Error::UnsupportedEmit`] for anything but a string.
pub fn emit_value(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(Error::unsupported_emit(other.kind())),
    }
}

/// Reads raw line text as a scalar.
///
/// Quote-framed text stays a string so that [`codec::decode`] can unwrap it;
/// an empty value is `Null` (an empty string is always written as `""`);
/// bare `true`/`false`, integers and finite floats become typed scalars;
/// anything else is a plain string.
///
/// # Examples
///
/// ```rust
/// use serde_flatenv::dotenv::parse_scalar;
/// use serde_flatenv::Value;
///
/// assert_eq!(parse_scalar("\"3\""), Value::from("\"3\""));
/// assert_eq!(parse_scalar(""), Value::Null);
/// assert_eq!(parse_scalar("3"), Value::from(3));
/// assert_eq!(parse_scalar("2.5"), Value::from(2.5));
/// assert_eq!(parse_scalar("true"), Value::Bool(true));
/// assert_eq!(parse_scalar("inf"), Value::from("inf"));
/// assert_eq!(parse_scalar("abc"), Value::from("abc"));
/// ```
#[must_use]
pub fn parse_scalar(raw: &str) -> Value {
    if codec::decode_str(raw).is_some() {
        return Value::String(raw.to_string());
    }
    match raw {
        "" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Number(Number::Integer(i));
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() => Value::Number(Number::Float(f)),
        _ => Value::String(raw.to_string()),
    }
}

/// Turns flat entries into lines under `prefix`.
///
/// `Null` map values are dropped. `Null` list elements are kept, written as
/// `key=`, so the list keeps its length.
///
/// # Examples
///
/// ```rust
/// use serde_flatenv::dotenv::{emit_lines, entries_from_flat};
/// use serde_flatenv::{flatten, value};
///
/// let flat = flatten(&value!({"a": [1, null], "b": null}));
/// let text = emit_lines(&entries_from_flat(flat, "", "__")).unwrap();
/// assert_eq!(text, "a__0=1\na__1=\n");
/// ```
#[must_use]
pub fn entries_from_flat(flat: FlatMap, prefix: &str, separator: &str) -> Vec<Entry> {
    flat.into_iter()
        .filter(|(key, value)| !value.is_null() || is_list_element(key, separator))
        .map(|(key, value)| Entry::new(format!("{}{}", prefix, key), value))
        .collect()
}

fn is_list_element(key: &str, separator: &str) -> bool {
    let segments = path::split(key, separator);
    segments.len() > 1
        && segments
            .last()
            .map_or(false, |last| Segment::parse(last).is_index())
}

/// Collects raw lines into a flat map, parsing each value with [`parse_scalar`].
#[must_use]
pub fn flat_from_entries<'a, I>(entries: I) -> FlatMap
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
{
    entries
        .into_iter()
        .map(|(key, value)| {
            let scalar = match value {
                Value::String(raw) => parse_scalar(raw),
                other => other.clone(),
            };
            (key.to_string(), scalar)
        })
        .collect()
}

/// Parses a document, separating prefixed metadata lines from content.
///
/// # Errors
///
/// Returns [`Error::InvalidLine`] for a line without `=`.
pub fn load_document(input: &str, options: &FlatOptions) -> Result<Document> {
    let lines = parse_lines(input)?;
    let prefix = options.metadata_prefix.as_str();

    let (metadata_lines, entries): (Vec<Entry>, Vec<Entry>) = lines
        .into_iter()
        .partition(|entry| entry.key.starts_with(prefix));

    let flat = flat_from_entries(
        metadata_lines
            .iter()
            .map(|entry| (&entry.key[prefix.len()..], &entry.value)),
    );
    let metadata = unflatten_with_options(&flat, options);

    debug!(
        content = entries.len(),
        metadata = flat.len(),
        "loaded dotenv document"
    );
    Ok(Document { entries, metadata })
}

/// Writes a document: content lines first, then the flattened metadata under
/// the reserved prefix.
///
/// # Errors
///
/// Returns [`Error::ComplexValue`] if a content entry holds a list or map.
pub fn emit_document(document: &Document, options: &FlatOptions) -> Result<String> {
    let flat = flatten_with_options(&document.metadata, options);
    let metadata = entries_from_flat(flat, &options.metadata_prefix, &options.separator);

    debug!(
        content = document.entries.len(),
        metadata = metadata.len(),
        "emitting dotenv document"
    );

    let mut lines = document.entries.clone();
    lines.extend(metadata);
    emit_lines(&lines)
}
