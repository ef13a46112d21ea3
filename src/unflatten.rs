//! Flat key=value entries → nested value.
//!
//! Each flat key is split into segments and walked from the root map. A
//! digit-only segment addresses a list slot, anything else a map slot; the
//! container is created on first use and lists grow with `Null` placeholders
//! up to the addressed index. The leaf is run through
//! [`codec::decode`](crate::codec::decode) before it is stored.
//!
//! The result does not depend on the order of the flat entries: a slot's
//! kind comes only from the segment that addresses it, and growing a list
//! never touches elements that are already set.
//!
//! ```rust
//! use serde_flatenv::{unflatten, value, FlatMap, Value};
//!
//! let mut flat = FlatMap::new();
//! flat.insert("user__tags__1".to_string(), Value::from("\"y\""));
//! flat.insert("user__name".to_string(), Value::from("\"ann\""));
//! flat.insert("user__tags__0".to_string(), Value::from("\"x\""));
//!
//! assert_eq!(
//!     unflatten(&flat),
//!     value!({"user": {"name": "ann", "tags": ["x", "y"]}})
//! );
//! ```
//!
//! ## Conflicting entries
//!
//! Entries produced by [`flatten`](crate::flatten) never conflict. Hand-written
//! input can, and conflicts are settled by these rules:
//!
//! - a list or map beats a scalar at the same slot
//! - a map beats a list: a list addressed by a key becomes a map keyed by the
//!   decimal indices of its non-null elements, and an index addressing a map is
//!   stored as a string key
//!
//! The outcome is the same whatever the entry order, with one exception: an
//! explicit `Null` list element is dropped if its list is turned into a map
//! later, but kept as a map entry if the map already exists when it arrives.

use crate::codec;
use crate::path::{self, Segment};
use crate::{FlatMap, FlatOptions, Map, Value};
use tracing::{debug, trace, warn};

/// Rebuilds a nested value with the default `"__"` separator.
#[must_use]
pub fn unflatten(flat: &FlatMap) -> Value {
    unflatten_with_options(flat, &FlatOptions::default())
}

/// Rebuilds a nested value with custom options.
///
/// The root is always a map. Its keys are taken verbatim, digits included,
/// since the root never becomes a list.
///
/// # Examples
///
/// ```rust
/// use serde_flatenv::{unflatten_with_options, FlatMap, FlatOptions, Value};
///
/// let mut flat = FlatMap::new();
/// flat.insert("list.2".to_string(), Value::from(7));
///
/// let options = FlatOptions::new().with_separator(".");
/// let value = unflatten_with_options(&flat, &options);
/// let list = value.as_object().and_then(|o| o.get("list")).and_then(Value::as_array);
/// assert_eq!(list, Some(&vec![Value::Null, Value::Null, Value::from(7)]));
/// ```
#[must_use]
pub fn unflatten_with_options(flat: &FlatMap, options: &FlatOptions) -> Value {
    let mut root = Map::new();
    for (key, value) in flat {
        insert_entry(&mut root, key, value.clone(), &options.separator);
    }
    debug!(entries = flat.len(), keys = root.len(), "unflattened value");
    Value::Object(root)
}

fn insert_entry(root: &mut Map, key: &str, value: Value, separator: &str) {
    let mut segments = path::split(key, separator).into_iter();
    let first = segments.next().unwrap_or_default();

    let mut slot = root.slot(first);
    for raw in segments {
        slot = descend(slot, raw, key);
    }

    trace!(key = %key, kind = value.kind(), "store flat entry");
    store_leaf(slot, codec::decode(value), key);
}

/// Moves from `slot` into the child addressed by `raw`, shaping `slot` into
/// the container that segment requires.
fn descend<'v>(slot: &'v mut Value, raw: &str, key: &str) -> &'v mut Value {
    let segment = Segment::parse(raw);
    match (slot, segment) {
        (Value::Array(arr), Segment::Index(index)) => {
            if arr.len() <= index {
                arr.resize(index + 1, Value::Null);
            }
            &mut arr[index]
        }
        (Value::Object(obj), _) => obj.slot(raw),
        (slot, segment) => {
            *slot = match (std::mem::take(slot), segment) {
                (Value::Array(arr), _) => {
                    warn!(key = %key, segment = raw, "list addressed by key, converting to map");
                    Value::Object(list_to_map(arr))
                }
                (old, Segment::Index(_)) => {
                    if !old.is_null() {
                        warn!(key = %key, segment = raw, replaced = old.kind(), "scalar replaced by list");
                    }
                    Value::Array(Vec::new())
                }
                (old, Segment::Key(_)) => {
                    if !old.is_null() {
                        warn!(key = %key, segment = raw, replaced = old.kind(), "scalar replaced by map");
                    }
                    Value::Object(Map::new())
                }
            };
            descend(slot, raw, key)
        }
    }
}

fn store_leaf(slot: &mut Value, value: Value, key: &str) {
    if !slot.is_scalar() && value.is_scalar() {
        warn!(key = %key, kept = slot.kind(), "scalar entry shadowed by nested entries, dropped");
        return;
    }
    *slot = value;
}

fn list_to_map(arr: Vec<Value>) -> Map {
    arr.into_iter()
        .enumerate()
        .filter(|(_, v)| !v.is_null())
        .map(|(i, v)| (i.to_string(), v))
        .collect()
}
