//! Nested value → flat key=value entries.
//!
//! Every scalar leaf becomes one entry whose key is the path to the leaf,
//! segments joined by the separator, and whose value is the leaf run through
//! [`codec::encode`](crate::codec::encode). Empty lists and maps have no
//! leaves and therefore disappear.
//!
//! ```rust
//! use serde_flatenv::{flatten, value, Value};
//!
//! let flat = flatten(&value!({"a": {}, "b": [1]}));
//! assert_eq!(flat.len(), 1);
//! assert_eq!(flat.get("b__0"), Some(&Value::from(1)));
//! ```

use crate::codec;
use crate::path;
use crate::{FlatOptions, Value};
use indexmap::IndexMap;
use tracing::{debug, trace};

/// Flat key → encoded scalar, in emission order.
///
/// Equality ignores order, so two flat maps with the same entries compare
/// equal regardless of how they were produced.
pub type FlatMap = IndexMap<String, Value>;

/// Flattens `root` with the default `"__"` separator.
#[must_use]
pub fn flatten(root: &Value) -> FlatMap {
    flatten_with_options(root, &FlatOptions::default())
}

/// Flattens `root` with custom options.
///
/// The walk is depth-first and visits children left to right, using an
/// explicit stack so deep inputs cannot exhaust the call stack. A scalar
/// root is emitted under the empty key.
///
/// # Examples
///
/// ```rust
/// use serde_flatenv::{flatten, value, Value};
///
/// let flat = flatten(&value!({"user": {"name": "ann", "tags": ["x", "y"]}}));
/// let keys: Vec<_> = flat.keys().map(String::as_str).collect();
/// assert_eq!(keys, ["user__name", "user__tags__0", "user__tags__1"]);
/// assert_eq!(flat["user__name"], Value::from("\"ann\""));
/// ```
#[must_use]
pub fn flatten_with_options(root: &Value, options: &FlatOptions) -> FlatMap {
    let mut flat = FlatMap::new();
    let mut path: Vec<String> = Vec::new();
    // (parent path length, segment addressing the node, node)
    let mut stack: Vec<(usize, Option<String>, &Value)> = vec![(0, None, root)];

    while let Some((depth, segment, node)) = stack.pop() {
        path.truncate(depth);
        path.extend(segment);
        let depth = path.len();

        match node {
            Value::Object(obj) => {
                // Reversed so the first key is popped first.
                for (key, child) in obj.iter().rev() {
                    stack.push((depth, Some(key.clone()), child));
                }
            }
            Value::Array(arr) => {
                for (index, child) in arr.iter().enumerate().rev() {
                    stack.push((depth, Some(index.to_string()), child));
                }
            }
            leaf => {
                let key = path::join(&path, &options.separator);
                trace!(key = %key, kind = leaf.kind(), "emit flat entry");
                flat.insert(key, codec::encode(leaf.clone()));
            }
        }
    }

    debug!(entries = flat.len(), "flattened value");
    flat
}
