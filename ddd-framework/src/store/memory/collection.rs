use crate::common::{atomic, Atomic, ID_FIELD, RESERVED_INDEX_NAME};
use crate::errors::{ErrorKind, FrameworkError, FrameworkResult};
use crate::index::{ExistingIndex, IndexSpec};
use crate::store::CollectionProvider;
use indexmap::IndexMap;
use std::sync::Arc;

/// In-memory collection holding an index catalog.
///
/// # Characteristics
/// - Starts with the reserved primary-key index `_id_`
/// - Assigns index names from the key sequence (`email_1_createdAt_-1`)
/// - Lists indexes in creation order
/// - Creating an index identical to an existing one is a no-op
/// - Creating an index under an existing name with other options is rejected
/// - Applies each create batch atomically: either all indexes are created or none
///
/// Clones share the same catalog.
#[derive(Clone)]
pub struct InMemoryCollection {
    inner: Arc<InMemoryCollectionInner>,
}

impl InMemoryCollection {
    pub fn new(name: &str) -> Self {
        InMemoryCollection {
            inner: Arc::new(InMemoryCollectionInner::new(name)),
        }
    }

    /// Returns the names of all indexes in creation order.
    pub fn index_names(&self) -> Vec<String> {
        self.inner.indexes.read().keys().cloned().collect()
    }
}

impl CollectionProvider for InMemoryCollection {
    fn name(&self) -> String {
        self.inner.name.clone()
    }

    fn list_indexes(&self) -> FrameworkResult<Vec<ExistingIndex>> {
        Ok(self.inner.list_indexes())
    }

    fn drop_index(&self, name: &str) -> FrameworkResult<()> {
        self.inner.drop_index(name)
    }

    fn create_indexes(&self, specs: &[IndexSpec]) -> FrameworkResult<Vec<String>> {
        self.inner.create_indexes(specs)
    }
}

struct InMemoryCollectionInner {
    name: String,
    indexes: Atomic<IndexMap<String, IndexSpec>>,
}

impl InMemoryCollectionInner {
    fn new(name: &str) -> Self {
        let mut indexes = IndexMap::new();
        let id_index = IndexSpec::field(ID_FIELD).unique(true);
        indexes.insert(RESERVED_INDEX_NAME.to_string(), id_index);
        InMemoryCollectionInner {
            name: name.to_string(),
            indexes: atomic(indexes),
        }
    }

    fn list_indexes(&self) -> Vec<ExistingIndex> {
        self.indexes
            .read()
            .iter()
            .map(|(name, spec)| ExistingIndex::from((name.clone(), spec.clone())))
            .collect()
    }

    fn drop_index(&self, name: &str) -> FrameworkResult<()> {
        if name == RESERVED_INDEX_NAME {
            log::error!("Attempt to drop the primary-key index of collection '{}'", self.name);
            return Err(FrameworkError::new(
                &format!("Cannot drop the primary-key index of collection '{}'", self.name),
                ErrorKind::IndexMutationError,
            ));
        }

        let removed = self.indexes.write().shift_remove(name);
        match removed {
            Some(_) => Ok(()),
            None => Err(FrameworkError::new(
                &format!("Index '{}' not found on collection '{}'", name, self.name),
                ErrorKind::IndexNotFound,
            )),
        }
    }

    fn create_indexes(&self, specs: &[IndexSpec]) -> FrameworkResult<Vec<String>> {
        let mut indexes = self.indexes.write();
        let mut staged: IndexMap<String, IndexSpec> = IndexMap::new();
        for spec in specs {
            if spec.keys().is_empty() {
                return Err(FrameworkError::new(
                    "Index key specification must not be empty",
                    ErrorKind::IndexMutationError,
                ));
            }

            let name = spec.default_name();
            match indexes.get(&name).or_else(|| staged.get(&name)) {
                Some(current) if current == spec => {}
                Some(current) => {
                    log::error!(
                        "Index '{}' already exists on collection '{}' as {}",
                        name,
                        self.name,
                        current
                    );
                    return Err(FrameworkError::new(
                        &format!(
                            "Index '{}' already exists on collection '{}' with different options: {}",
                            name, self.name, current
                        ),
                        ErrorKind::IndexMutationError,
                    ));
                }
                None => {
                    staged.insert(name, spec.clone());
                }
            }
        }

        let names = specs.iter().map(|spec| spec.default_name()).collect();
        indexes.extend(staged);
        Ok(names)
    }
}
