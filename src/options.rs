//! Configuration for flat key=value conversion.
//!
//! [`FlatOptions`] controls the separator placed between path segments and
//! the prefix that marks metadata entries in a dotenv document.
//!
//! ## Examples
//!
//! ```rust
//! use serde_flatenv::{flatten_with_options, value, FlatOptions};
//!
//! let options = FlatOptions::new().with_separator(".");
//! let flat = flatten_with_options(&value!({"db": {"port": 5432}}), &options);
//! assert!(flat.contains_key("db.port"));
//! ```

use crate::path::SEPARATOR;

/// Default prefix of metadata keys in a dotenv document.
pub const METADATA_PREFIX: &str = "sops_";

/// Options shared by the flattener, the unflattener and the dotenv layer.
///
/// # Examples
///
/// ```rust
/// use serde_flatenv::FlatOptions;
///
/// let options = FlatOptions::new();
/// assert_eq!(options.separator, "__");
/// assert_eq!(options.metadata_prefix, "sops_");
///
/// let options = FlatOptions::new()
///     .with_separator("::")
///     .with_metadata_prefix("meta_");
/// assert_eq!(options.separator, "::");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlatOptions {
    pub separator: String,
    pub metadata_prefix: String,
}

impl Default for FlatOptions {
    fn default() -> Self {
        FlatOptions {
            separator: SEPARATOR.to_string(),
            metadata_prefix: METADATA_PREFIX.to_string(),
        }
    }
}

impl FlatOptions {
    /// Creates default options (`"__"` separator, `"sops_"` metadata prefix).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the separator placed between path segments.
    ///
    /// An empty separator is ignored and the current one is kept, since it
    /// would make every key a single segment.
    #[must_use]
    pub fn with_separator(mut self, separator: &str) -> Self {
        if !separator.is_empty() {
            self.separator = separator.to_string();
        }
        self
    }

    /// Sets the prefix that marks metadata keys in a dotenv document.
    #[must_use]
    pub fn with_metadata_prefix(mut self, prefix: &str) -> Self {
        self.metadata_prefix = prefix.to_string();
        self
    }
}
