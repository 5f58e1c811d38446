use crate::common::RESERVED_INDEX_NAME;
use crate::index::{IndexKey, IndexSpec};

/// An index as listed by the store at reconciliation time.
///
/// Carries the store-assigned name next to the logical shape. Only lives for
/// the duration of one reconciliation pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExistingIndex {
    name: String,
    spec: IndexSpec,
}

impl ExistingIndex {
    /// Creates a descriptor from a listing entry.
    ///
    /// A missing `unique` flag defaults to `false`, matching how stores omit
    /// the flag for non-unique indexes.
    pub fn new(name: &str, keys: Vec<IndexKey>, unique: Option<bool>) -> Self {
        ExistingIndex {
            name: name.to_string(),
            spec: IndexSpec::new(keys).unique(unique.unwrap_or(false)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keys(&self) -> &[IndexKey] {
        self.spec.keys()
    }

    pub fn is_unique(&self) -> bool {
        self.spec.is_unique()
    }

    /// Returns the logical shape of this index, without its name.
    pub fn spec(&self) -> &IndexSpec {
        &self.spec
    }

    /// Returns `true` for the store's implicit primary-key index.
    pub fn is_reserved(&self) -> bool {
        self.name == RESERVED_INDEX_NAME
    }
}

impl From<(String, IndexSpec)> for ExistingIndex {
    fn from((name, spec): (String, IndexSpec)) -> Self {
        ExistingIndex { name, spec }
    }
}
