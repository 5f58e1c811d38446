use crate::errors::{ErrorKind, FrameworkError, FrameworkResult};
use crate::store::memory::InMemoryCollection;
use crate::store::{Collection, DatabaseProvider};
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory database creating collections on first use.
///
/// Clones share the same collections.
#[derive(Clone)]
pub struct InMemoryDatabase {
    inner: Arc<InMemoryDatabaseInner>,
}

impl InMemoryDatabase {
    pub fn new(name: &str) -> Self {
        InMemoryDatabase {
            inner: Arc::new(InMemoryDatabaseInner {
                name: name.to_string(),
                collections: DashMap::new(),
            }),
        }
    }

    /// Returns the concrete in-memory collection, creating it if needed.
    pub fn in_memory_collection(&self, name: &str) -> InMemoryCollection {
        self.inner
            .collections
            .entry(name.to_string())
            .or_insert_with(|| InMemoryCollection::new(name))
            .clone()
    }

    /// Returns the names of all collections created so far.
    pub fn collection_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .inner
            .collections
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        names
    }
}

impl DatabaseProvider for InMemoryDatabase {
    fn name(&self) -> String {
        self.inner.name.clone()
    }

    fn collection(&self, name: &str) -> FrameworkResult<Collection> {
        if name.trim().is_empty() || name.contains('$') {
            log::error!("Invalid collection name '{}' in database '{}'", name, self.inner.name);
            return Err(FrameworkError::new(
                &format!("Invalid collection name '{}'", name),
                ErrorKind::ConnectivityError,
            ));
        }
        Ok(Collection::new(self.in_memory_collection(name)))
    }
}

struct InMemoryDatabaseInner {
    name: String,
    collections: DashMap<String, InMemoryCollection>,
}
